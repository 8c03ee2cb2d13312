//! Core library for tocsea
//!
//! This crate holds the **Functional Core** of the TOCSEA recommendation
//! service. The `tocsea` binary is the Imperative Shell: it owns the HTTP
//! server, the model client, and the command line.
//!
//! # Architecture Overview
//!
//! - **`tocsea_core`** (this crate): pure text and request transformations with zero I/O
//! - **`tocsea`**: model calls, HTTP routing, and orchestration
//!
//! Every function here takes text or JSON in and returns text or a struct
//! out. Model output is free-form, so nothing in this crate fails on
//! unexpected input: extraction degrades to the raw text and missing
//! sections degrade to empty strings.
//!
//! # Module Organization
//!
//! - [`recommend::extract`]: flat recommendation list extraction
//! - [`recommend::sections`]: splitting detailed output into the three labeled sections
//! - [`recommend::prompt`]: prompt construction for both model calls
//! - [`recommend::request`]: validation of the incoming request body
//! - [`recommend::types`]: wire types shared by the server and the CLI
//!
//! # Example Usage
//!
//! ```rust
//! use tocsea_core::recommend::{extract_recommendations, sectionize};
//!
//! let list = extract_recommendations("Sure!\n🌴 Coconut – 12 trees\n🌿 Pandan – 8 trees");
//! assert_eq!(list, "🌴 Coconut – 12 trees\n🌿 Pandan – 8 trees");
//!
//! let sections = sectionize("SECTION 1:\n• Build contour terraces\nSECTION 3:\n• Water seedlings weekly");
//! assert_eq!(sections.soil_loss, "• Build contour terraces\n• Water seedlings weekly");
//! assert_eq!(sections.soil_type, "");
//! assert_eq!(sections.vegetation, "• Water seedlings weekly");
//! ```

pub mod recommend;
