use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// How the pages related to a profession are enumerated
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PageSource {
    /// Pages transcluded as templates on the profession page
    #[default]
    Templates,
    /// Pages linked from the profession page
    Links,
}

impl PageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSource::Templates => "templates",
            PageSource::Links => "links",
        }
    }
}

/// Main scraper configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    /// Profession pages to scrape, in order
    #[serde(default = "default_professions")]
    pub professions: Vec<String>,
    /// How related pages are listed
    #[serde(default)]
    pub source: PageSource,
    /// Show a progress bar per profession
    #[serde(default = "default_progress")]
    pub progress: bool,
    /// Wiki connection settings
    #[serde(default)]
    pub site: SiteConfig,
}

/// Settings for talking to the wiki
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// MediaWiki Action API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            timeout: default_timeout(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            professions: default_professions(),
            source: PageSource::default(),
            progress: default_progress(),
            site: SiteConfig::default(),
        }
    }
}

// Default value functions
fn default_professions() -> Vec<String> {
    [
        "Gathering",
        "Alchemy",
        "Armorsmithing",
        "Artificing",
        "Blacksmithing",
        "Jewelcrafting",
        "Leatherworking",
        "Tailoring",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

fn default_progress() -> bool {
    true
}

fn default_api_url() -> String {
    "https://neverwinter.gamepedia.com/api.php".to_string()
}

fn default_user_agent() -> String {
    concat!("profession-scraper/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Load configuration from a file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with PROFESSION_SCRAPER__ prefix
/// 2. `path` if given, else professions.toml in the current directory
/// 3. Default values
///
/// An explicit path must exist; the default file may be missing.
pub fn load_config(path: Option<&Path>) -> Result<ScraperConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("professions").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: PROFESSION_SCRAPER__SITE__TIMEOUT
        .add_source(
            Environment::with_prefix("PROFESSION_SCRAPER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
