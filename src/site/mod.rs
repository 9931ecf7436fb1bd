use crate::config::PageSource;
use crate::error::ScrapeError;
use async_trait::async_trait;

mod mediawiki;

pub use self::mediawiki::MediaWikiClient;

/// Read access to a wiki
#[async_trait]
pub trait WikiSite: Send + Sync {
    /// Titles of the pages related to a profession page, in the order the wiki lists them
    async fn list_related(
        &self,
        profession: &str,
        source: PageSource,
    ) -> Result<Vec<String>, ScrapeError>;

    /// Raw wikitext of a page, empty if the page does not exist
    async fn page_text(&self, title: &str) -> Result<String, ScrapeError>;
}
