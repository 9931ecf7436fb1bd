use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

use profession_scraper::{load_config, PageSource, ScrapeError, ScraperConfig};

/// Fetches profession related materials and items from the Neverwinter wiki
#[derive(Parser, Debug)]
#[command(name = "profession-scraper")]
#[command(version)]
struct Cli {
    /// TOML configuration file (defaults to ./professions.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// MediaWiki API endpoint, e.g. https://neverwinter.gamepedia.com/api.php
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Profession page to scrape; repeat to scrape several
    #[arg(long = "profession", global = true)]
    professions: Vec<String>,

    /// How pages related to a profession are found
    #[arg(long, global = true, value_enum)]
    source: Option<PageSource>,

    /// Do not show progress bars
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch recipes of every profession
    UpdateRecipes {
        /// Destination to save recipes to
        #[arg(long, default_value = "professions.jsonl")]
        output_file: PathBuf,
    },
    /// Fetch item tooltips of every profession
    UpdateItems {
        /// Destination to save items to
        #[arg(long, default_value = "data.jsonl")]
        output_file: PathBuf,
    },
    /// Fetch recipes and items in one pass
    UpdateData {
        /// Destination to save recipes to
        #[arg(long, alias = "recipes_file", default_value = "recipes.jsonl")]
        recipes_file: PathBuf,
        /// Destination to save items to
        #[arg(long, alias = "items_file", default_value = "items.jsonl")]
        items_file: PathBuf,
    },
}

impl Cli {
    fn apply_overrides(&self, config: &mut ScraperConfig) {
        if let Some(api_url) = &self.api_url {
            config.site.api_url = api_url.clone();
        }
        if !self.professions.is_empty() {
            config.professions = self.professions.clone();
        }
        if let Some(source) = self.source {
            config.source = source;
        }
        if self.no_progress {
            config.progress = false;
        }
    }
}

async fn run(cli: Cli) -> Result<(), ScrapeError> {
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    match &cli.command {
        Command::UpdateRecipes { output_file } => {
            profession_scraper::update_recipes(&config, output_file).await?;
        }
        Command::UpdateItems { output_file } => {
            profession_scraper::update_items(&config, output_file).await?;
        }
        Command::UpdateData {
            recipes_file,
            items_file,
        } => {
            profession_scraper::update_data(&config, recipes_file, items_file).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
