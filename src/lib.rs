pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parsers;
pub mod scraper;
pub mod site;
pub mod wikitext;

use log::info;
use std::path::Path;

// Re-export commonly used types
pub use crate::config::{load_config, PageSource, ScraperConfig, SiteConfig};
pub use error::ScrapeError;
pub use model::{FieldValue, Quantity, Record, RecordKind, TierOutput};
pub use output::{JsonLinesWriter, RecordSink};
pub use parsers::{parse_item_tooltip, parse_profession_row};
pub use scraper::{classify, ScrapeSummary, Scraper, Sinks};
pub use site::{MediaWikiClient, WikiSite};

/// Fetches the recipes of every configured profession into a JSON Lines file
pub async fn update_recipes(
    config: &ScraperConfig,
    output_file: &Path,
) -> Result<ScrapeSummary, ScrapeError> {
    let site = MediaWikiClient::new(&config.site)?;
    let mut recipes = JsonLinesWriter::create(output_file)?;

    let summary = Scraper::new(&site, config)
        .run(&mut Sinks::recipes(&mut recipes))
        .await?;
    recipes.finish()?;

    info!("Saved {} recipes to {}", summary.recipes, output_file.display());
    Ok(summary)
}

/// Fetches the item tooltips of every configured profession into a JSON Lines file
pub async fn update_items(
    config: &ScraperConfig,
    output_file: &Path,
) -> Result<ScrapeSummary, ScrapeError> {
    let site = MediaWikiClient::new(&config.site)?;
    let mut items = JsonLinesWriter::create(output_file)?;

    let summary = Scraper::new(&site, config)
        .run(&mut Sinks::items(&mut items))
        .await?;
    items.finish()?;

    info!("Saved {} items to {}", summary.items, output_file.display());
    Ok(summary)
}

/// Fetches recipes and items in a single pass, each kind into its own file
pub async fn update_data(
    config: &ScraperConfig,
    recipes_file: &Path,
    items_file: &Path,
) -> Result<ScrapeSummary, ScrapeError> {
    let site = MediaWikiClient::new(&config.site)?;
    let mut recipes = JsonLinesWriter::create(recipes_file)?;
    let mut items = JsonLinesWriter::create(items_file)?;

    let summary = Scraper::new(&site, config)
        .run(&mut Sinks::both(&mut recipes, &mut items))
        .await?;
    recipes.finish()?;
    items.finish()?;

    info!(
        "Saved {} recipes to {} and {} items to {}",
        summary.recipes,
        recipes_file.display(),
        summary.items,
        items_file.display()
    );
    Ok(summary)
}
