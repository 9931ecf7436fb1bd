use crate::config::{PageSource, SiteConfig};
use crate::error::ScrapeError;
use crate::site::WikiSite;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

const BASE_PARAMS: [(&str, &str); 3] = [
    ("action", "query"),
    ("format", "json"),
    ("formatversion", "2"),
];

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<Query>,
    #[serde(rename = "continue")]
    continuation: Option<BTreeMap<String, String>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    templates: Vec<TitleEntry>,
    #[serde(default)]
    links: Vec<TitleEntry>,
    #[serde(default)]
    revisions: Vec<Revision>,
}

#[derive(Debug, Deserialize)]
struct TitleEntry {
    title: String,
}

#[derive(Debug, Deserialize)]
struct Revision {
    slots: Slots,
}

#[derive(Debug, Deserialize)]
struct Slots {
    main: Slot,
}

#[derive(Debug, Deserialize)]
struct Slot {
    #[serde(default)]
    content: String,
}

/// Client for the MediaWiki Action API
pub struct MediaWikiClient {
    client: Client,
    api_url: String,
}

impl MediaWikiClient {
    pub fn new(config: &SiteConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    async fn query(&self, params: &[(String, String)]) -> Result<QueryResponse, ScrapeError> {
        debug!("GET {} {:?}", self.api_url, params);
        let response = self
            .client
            .get(&self.api_url)
            .query(&BASE_PARAMS)
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScrapeError::ApiError(format!(
                "{} returned status {}",
                self.api_url,
                response.status()
            )));
        }

        let body: QueryResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(ScrapeError::ApiError(format!("{}: {}", error.code, error.info)));
        }
        Ok(body)
    }
}

#[async_trait]
impl WikiSite for MediaWikiClient {
    async fn list_related(
        &self,
        profession: &str,
        source: PageSource,
    ) -> Result<Vec<String>, ScrapeError> {
        let limit = match source {
            PageSource::Templates => "tllimit",
            PageSource::Links => "pllimit",
        };

        let mut titles = Vec::new();
        let mut continuation = BTreeMap::new();
        loop {
            let mut params = vec![
                ("prop".to_string(), source.as_str().to_string()),
                ("titles".to_string(), profession.to_string()),
                (limit.to_string(), "max".to_string()),
            ];
            params.extend(continuation);

            let response = self.query(&params).await?;
            for page in response.query.map(|q| q.pages).unwrap_or_default() {
                if page.missing {
                    warn!("Page {:?} does not exist", page.title);
                }
                let entries = match source {
                    PageSource::Templates => page.templates,
                    PageSource::Links => page.links,
                };
                titles.extend(entries.into_iter().map(|entry| entry.title));
            }

            match response.continuation {
                Some(next) => continuation = next,
                None => break,
            }
        }

        debug!("{} lists {} {}", profession, titles.len(), source.as_str());
        Ok(titles)
    }

    async fn page_text(&self, title: &str) -> Result<String, ScrapeError> {
        let params = [
            ("prop".to_string(), "revisions".to_string()),
            ("rvprop".to_string(), "content".to_string()),
            ("rvslots".to_string(), "main".to_string()),
            ("titles".to_string(), title.to_string()),
        ];

        let response = self.query(&params).await?;
        let page = response.query.and_then(|q| q.pages.into_iter().next());
        match page {
            Some(page) if !page.missing => Ok(page
                .revisions
                .into_iter()
                .next()
                .map(|revision| revision.slots.main.content)
                .unwrap_or_default()),
            _ => {
                warn!("Page {:?} does not exist", title);
                Ok(String::new())
            }
        }
    }
}
