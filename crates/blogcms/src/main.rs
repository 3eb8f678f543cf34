use crate::prelude::*;
use clap::Parser;

mod articles;
mod cms;
mod config;
mod error;
mod news;
mod prelude;
mod server;
mod store;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Blog API backed by microCMS, with a sample-data fallback"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    #[clap(flatten)]
    config: config::ConfigArgs,

    /// Whether to display additional information.
    #[clap(long, env = "BLOG_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve the blog HTTP API
    Serve(crate::server::ServeOptions),

    /// Read articles from the command line
    News(crate::news::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::News(sub_app) => crate::news::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
