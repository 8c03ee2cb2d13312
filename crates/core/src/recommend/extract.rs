//! Flat recommendation list extraction.
//!
//! Model output for the vegetation list is supposed to be one
//! `<marker> <name> – <quantity> <unit>` entry per line, but in practice it
//! arrives wrapped in chatter, collapsed onto a single line, or with
//! mangled emoji markers. Extraction matches on shape only, never on plant
//! vocabulary, and tries each [`ExtractionStrategy`] in order.

use std::sync::OnceLock;

use regex::Regex;

/// A way of pulling recommendation entries out of raw model text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Keep every trimmed line shaped like `name – 12 unit`.
    LineByLine,
    /// Scan the whole text for `name – 12 unit` runs, for entries that were
    /// concatenated onto one line or wrapped across lines.
    Inline,
}

impl ExtractionStrategy {
    /// Strategies in the order they are attempted.
    pub const ORDERED: [ExtractionStrategy; 2] =
        [ExtractionStrategy::LineByLine, ExtractionStrategy::Inline];

    pub fn name(self) -> &'static str {
        match self {
            ExtractionStrategy::LineByLine => "line_by_line",
            ExtractionStrategy::Inline => "inline",
        }
    }

    /// Run this strategy. Returns `None` when it finds nothing.
    pub fn apply(self, raw: &str) -> Option<String> {
        let entries: Vec<&str> = match self {
            ExtractionStrategy::LineByLine => {
                let re = line_pattern();
                raw.lines()
                    .map(str::trim)
                    .filter(|line| re.is_match(line))
                    .collect()
            }
            ExtractionStrategy::Inline => inline_pattern()
                .find_iter(raw)
                .map(|m| m.as_str())
                .collect(),
        };

        if entries.is_empty() {
            None
        } else {
            Some(entries.join("\n"))
        }
    }
}

/// Result of [`extract_with_strategy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    /// The strategy that produced `text`, or `None` when the raw text was
    /// returned unchanged.
    pub strategy: Option<ExtractionStrategy>,
}

// Up to three marker characters of any kind, so corrupted emoji still match.
fn line_pattern() -> &'static Regex {
    static RE_LINE: OnceLock<Regex> = OnceLock::new();
    RE_LINE.get_or_init(|| Regex::new(r"^.{0,3}\s*.+?[–\-]\s*\d+\s+\w+").unwrap())
}

fn inline_pattern() -> &'static Regex {
    static RE_INLINE: OnceLock<Regex> = OnceLock::new();
    RE_INLINE.get_or_init(|| Regex::new(r".{0,3}\s+[^–\-]+?[–\-]\s*\d+\s+\w+").unwrap())
}

/// Extract recommendation entries and report which strategy matched.
pub fn extract_with_strategy(raw: &str) -> Extraction {
    ExtractionStrategy::ORDERED
        .iter()
        .find_map(|strategy| {
            strategy.apply(raw).map(|text| Extraction {
                text,
                strategy: Some(*strategy),
            })
        })
        .unwrap_or_else(|| Extraction {
            text: raw.to_string(),
            strategy: None,
        })
}

/// Extract newline-joined recommendation entries from raw model text.
///
/// Falls back to the raw text verbatim when no strategy matches, so callers
/// must tolerate unstructured output.
pub fn extract_recommendations(raw: &str) -> String {
    extract_with_strategy(raw).text
}
