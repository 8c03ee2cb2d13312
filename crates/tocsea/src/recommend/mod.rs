mod service;

pub use service::{ErrorMode, GenerationSettings, RecommendationService};

use crate::config::ServiceOptions;
use crate::prelude::{eprintln, println, *};
use tocsea_core::recommend::{validate_request, RecommendationResponse, Section};

#[derive(Debug, clap::Parser)]
#[command(name = "recommend")]
#[command(about = "Generate vegetation recommendations once and print them")]
pub struct App {
    /// Soil type label (e.g., "Loamy Soil")
    #[clap(env = "TOCSEA_SOIL_TYPE")]
    soil_type: String,

    /// Predicted soil loss in metric tons per year
    #[clap(env = "TOCSEA_SOIL_LOSS", allow_hyphen_values = true)]
    soil_loss: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    #[clap(flatten)]
    service: ServiceOptions,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    // Same validation as the HTTP body, so both surfaces accept the same input.
    let body = serde_json::json!({
        "soil_type": app.soil_type,
        "soil_loss": app.soil_loss,
    });
    let assessment = validate_request(&body)?;

    if global.verbose {
        eprintln!("Provider: {}", app.service.provider.name());
        eprintln!("Base URL: {}", app.service.base_url());
        eprintln!("Model: {}", app.service.model);
    }

    let service = app.service.build_service()?;
    let response = service.recommend(&assessment).await?;

    if app.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", format_text(&response));
    }

    Ok(())
}

const SECTION_TITLES: [(Section, &str); 3] = [
    (Section::SoilLoss, "Soil loss mitigation"),
    (Section::SoilType, "Soil type management"),
    (Section::Vegetation, "Planting and maintenance"),
];

/// Plain text rendering for the terminal.
pub fn format_text(response: &RecommendationResponse) -> String {
    let mut output = format!("Recommended vegetation\n\n{}\n", response.recommendations);

    for (section, title) in SECTION_TITLES {
        let body = response.detailed_recommendations.get(section);
        if body.is_empty() {
            continue;
        }
        output.push_str(&format!("\n{title}\n\n{body}\n"));
    }

    output
}
