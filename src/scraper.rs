use crate::config::{PageSource, ScraperConfig};
use crate::error::ScrapeError;
use crate::model::RecordKind;
use crate::output::RecordSink;
use crate::parsers::parser_for;
use crate::site::WikiSite;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};

const TOOLTIP_SUFFIX: &str = "/Tooltip";

/// Where each kind of record goes. A kind without a sink is not fetched.
#[derive(Default)]
pub struct Sinks<'a> {
    pub recipes: Option<&'a mut dyn RecordSink>,
    pub items: Option<&'a mut dyn RecordSink>,
}

impl<'a> Sinks<'a> {
    pub fn recipes(sink: &'a mut dyn RecordSink) -> Self {
        Self {
            recipes: Some(sink),
            items: None,
        }
    }

    pub fn items(sink: &'a mut dyn RecordSink) -> Self {
        Self {
            recipes: None,
            items: Some(sink),
        }
    }

    pub fn both(recipes: &'a mut dyn RecordSink, items: &'a mut dyn RecordSink) -> Self {
        Self {
            recipes: Some(recipes),
            items: Some(items),
        }
    }

    fn for_kind(&mut self, kind: RecordKind) -> Option<&mut (dyn RecordSink + 'a)> {
        match kind {
            RecordKind::Recipe => self.recipes.as_deref_mut(),
            RecordKind::Item => self.items.as_deref_mut(),
        }
    }
}

/// Counts of a finished run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub recipes: usize,
    pub items: usize,
    pub skipped: usize,
}

/// Decides what a page related to `profession` holds from its title
pub fn classify(title: &str, profession: &str) -> Option<RecordKind> {
    if title.ends_with(TOOLTIP_SUFFIX) {
        Some(RecordKind::Item)
    } else if title
        .strip_prefix(profession)
        .is_some_and(|rest| rest.starts_with('/'))
    {
        Some(RecordKind::Recipe)
    } else {
        None
    }
}

/// Walks the profession pages of a wiki and feeds parsed records to sinks
pub struct Scraper<'s, S: WikiSite + ?Sized> {
    site: &'s S,
    professions: Vec<String>,
    source: PageSource,
    progress: bool,
}

impl<'s, S: WikiSite + ?Sized> Scraper<'s, S> {
    pub fn new(site: &'s S, config: &ScraperConfig) -> Self {
        Self {
            site,
            professions: config.professions.clone(),
            source: config.source,
            progress: config.progress,
        }
    }

    /// Scrapes every profession in order. The first error stops the run.
    pub async fn run(&self, sinks: &mut Sinks<'_>) -> Result<ScrapeSummary, ScrapeError> {
        let mut summary = ScrapeSummary::default();

        for profession in &self.professions {
            let titles = self.site.list_related(profession, self.source).await?;
            info!("Found {} pages related to {}", titles.len(), profession);

            let bar = self.progress_bar(profession, titles.len());
            for title in titles {
                bar.inc(1);
                let Some(kind) = classify(&title, profession) else {
                    debug!("Skipping unrelated page {}", title);
                    summary.skipped += 1;
                    continue;
                };
                let Some(sink) = sinks.for_kind(kind) else {
                    debug!("Skipping {} page {}", kind, title);
                    summary.skipped += 1;
                    continue;
                };

                let text = self.site.page_text(&title).await?;
                let record = parser_for(kind).parse(&text).map_err(|e| {
                    error!("Failed to parse {} page {}: {}", kind, title, e);
                    e
                })?;
                sink.write_record(&record)?;

                match kind {
                    RecordKind::Recipe => summary.recipes += 1,
                    RecordKind::Item => summary.items += 1,
                }
            }
            bar.finish();
        }

        info!(
            "Wrote {} recipes and {} items, skipped {} pages",
            summary.recipes, summary.items, summary.skipped
        );
        Ok(summary)
    }

    fn progress_bar(&self, profession: &str, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len as u64);
        let style = ProgressStyle::with_template("{msg} {bar:40.cyan/blue} {pos}/{len} items [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_message(format!("Fetching items related to {}", profession));
        bar
    }
}
