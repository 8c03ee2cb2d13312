use crate::prelude::*;
use clap::Parser;

mod ai;
mod config;
mod error;
mod prelude;
mod recommend;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Vegetation recommendations for coastal soil erosion"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "TOCSEA_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Run the HTTP API
    Serve(crate::server::App),

    /// Generate recommendations for one soil assessment
    Recommend(crate::recommend::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(sub_app) => crate::server::run(sub_app, app.global).await,
        SubCommands::Recommend(sub_app) => crate::recommend::run(sub_app, app.global).await,
    }
}
