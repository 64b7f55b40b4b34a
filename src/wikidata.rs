use crate::error::Result;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const WIKIDATA_API: &str = "https://www.wikidata.org/w/api.php";

/// Wikidata property "logo image".
pub const LOGO_PROPERTY: &str = "P154";

/// Structured-data lookups needed to find a brand's logo.
pub trait KnowledgeBase {
    /// Up to `limit` entity ids whose label matches `name` in `language`.
    fn search_candidates(&self, name: &str, language: &str, limit: u32) -> Result<Vec<String>>;

    /// Media file name of the entity's logo claim, if it has one.
    fn logo_filename(&self, entity_id: &str) -> Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(default)]
    id: Option<String>,
}

/// Client for the Wikidata action API.
pub struct WikidataClient<'a> {
    http: &'a Client,
    api_url: String,
    timeout: Duration,
}

impl<'a> WikidataClient<'a> {
    pub fn new(http: &'a Client, api_url: &str, timeout: Duration) -> Self {
        Self {
            http,
            api_url: api_url.to_string(),
            timeout,
        }
    }

    fn get_json(&self, params: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .http
            .get(&self.api_url)
            .query(params)
            .timeout(self.timeout)
            .send()?
            .error_for_status()?;

        Ok(response.json()?)
    }
}

impl KnowledgeBase for WikidataClient<'_> {
    fn search_candidates(&self, name: &str, language: &str, limit: u32) -> Result<Vec<String>> {
        let limit = limit.to_string();
        let body = self.get_json(&[
            ("action", "wbsearchentities"),
            ("search", name),
            ("language", language),
            ("type", "item"),
            ("limit", &limit),
            ("format", "json"),
        ])?;

        parse_search_ids(body)
    }

    fn logo_filename(&self, entity_id: &str) -> Result<Option<String>> {
        let body = self.get_json(&[
            ("action", "wbgetclaims"),
            ("entity", entity_id),
            ("property", LOGO_PROPERTY),
            ("format", "json"),
        ])?;

        Ok(parse_logo_filename(&body))
    }
}

/// Entity ids from a `wbsearchentities` response, in ranking order.
pub fn parse_search_ids(body: Value) -> Result<Vec<String>> {
    let response: SearchResponse = serde_json::from_value(body)?;

    Ok(response
        .search
        .into_iter()
        .filter_map(|entry| entry.id)
        .filter(|id| !id.is_empty())
        .collect())
}

/// Logo file name from a `wbgetclaims` response.
///
/// Any missing or malformed part of `claims.P154[0].mainsnak.datavalue.value`
/// means "no logo".
pub fn parse_logo_filename(body: &Value) -> Option<String> {
    body.get("claims")?
        .get(LOGO_PROPERTY)?
        .get(0)?
        .get("mainsnak")?
        .get("datavalue")?
        .get("value")?
        .as_str()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Find the entity id that best matches a brand name.
///
/// Languages are tried in order. Within a language the first candidate that
/// already carries a logo wins; otherwise the first candidate is returned as a
/// best effort. Only when every language comes back empty is `None` returned.
pub fn resolve_entity<K: KnowledgeBase + ?Sized>(
    kb: &K,
    name: &str,
    languages: &[String],
    limit: u32,
) -> Result<Option<String>> {
    for language in languages {
        let candidates = kb.search_candidates(name, language, limit)?;
        debug!("{} candidate(s) for '{}' in '{}'", candidates.len(), name, language);

        for entity_id in &candidates {
            if kb.logo_filename(entity_id)?.is_some() {
                info!("Resolved '{}' to {} (has logo, language '{}')", name, entity_id, language);
                return Ok(Some(entity_id.clone()));
            }
        }

        if let Some(first) = candidates.into_iter().next() {
            info!("No candidate with a logo for '{}' in '{}', falling back to {}", name, language, first);
            return Ok(Some(first));
        }
    }

    Ok(None)
}
