use std::collections::HashMap;

use failure::Error;
use failure::Fail;
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::datasets::Throttle;

/// Title and persistent identifier of one originating dataset.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DatasetMetadata {
    pub title: String,
    pub doi: Option<String>,
}

impl DatasetMetadata {
    /// The record a code degrades to when the search fails: the
    /// uppercased code stands in for the title.
    fn fallback(code: &str) -> Self {
        Self {
            title: code.to_uppercase(),
            doi: None,
        }
    }
}

/// This struct reflects the body of a dataset search response.
#[derive(Debug, Deserialize)]
struct DatasetSearchResult {
    data: DatasetSearchResultData,
}

#[derive(Debug, Deserialize)]
struct DatasetSearchResultData {
    items: Vec<DatasetSearchResultItem>,
}

#[derive(Debug, Deserialize)]
struct DatasetSearchResultItem {
    title: Option<String>,
    name: Option<String>,
    global_id: Option<String>,
}

/// This error occurs when a dataset search returns no items.
#[derive(Debug, Fail)]
#[fail(display = "Search for dataset {} returned no results.", code)]
pub struct EmptySearchResult {
    code: String,
}

impl EmptySearchResult {
    fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
        }
    }
}

/// Resolves dataset codes to metadata via the search endpoint,
/// caching every outcome so each code is requested at most once per
/// run. Requests are strictly sequential and throttled.
pub struct DatasetResolver {
    client: Client,
    search_url: String,
    throttle: Box<dyn Throttle>,
    cache: HashMap<String, DatasetMetadata>,
}

impl DatasetResolver {
    pub fn new(search_url: &str, throttle: Box<dyn Throttle>) -> Self {
        Self {
            client: Client::new(),
            search_url: search_url.to_string(),
            throttle,
            cache: HashMap::new(),
        }
    }

    /// Resolve a dataset code, consulting the cache first. Failed or
    /// empty lookups degrade to a fallback record which is cached as
    /// well, so the endpoint is never asked about the same code twice.
    pub fn resolve(&mut self, code: &str) -> &DatasetMetadata {
        let code = normalize(code);

        if !self.cache.contains_key(&code) {
            self.throttle.wait();

            let metadata = match self.fetch(&code) {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Unable to resolve metadata for dataset {}: {}", code, e);
                    DatasetMetadata::fallback(&code)
                }
            };

            debug!("Resolved dataset {} to `{}`.", code, metadata.title);
            self.cache.insert(code.clone(), metadata);
        }

        &self.cache[&code]
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn fetch(&self, code: &str) -> Result<DatasetMetadata, Error> {
        let result = self
            .client
            .get(&self.search_url)
            .query(&[("q", code), ("type", "dataset"), ("per_page", "1")])
            .send()?
            .error_for_status()?
            .json::<DatasetSearchResult>()?;

        let item = result
            .data
            .items
            .into_iter()
            .next()
            .ok_or_else(|| EmptySearchResult::new(code))?;

        Ok(DatasetMetadata {
            title: item
                .title
                .or(item.name)
                .unwrap_or_else(|| code.to_uppercase()),
            doi: item.global_id,
        })
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_lowercase()
}
