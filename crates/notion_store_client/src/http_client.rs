//! HTTP client implementation for the record-store API.
//!
//! This module provides a reqwest-based implementation of the
//! [`RecordStore`](crate::RecordStore) trait.

use crate::pagination::{PAGE_SIZE, PageOf, collect_paginated};
use crate::{ChildBlock, ExternalRecord, RecordStore, StoreError, StoredKey};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

/// API version header value pinned for all requests.
const API_VERSION: &str = "2022-06-28";

/// Error bodies are truncated to this many characters for diagnostics.
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Client for the record-store API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestStoreClient {
    base_url: String,
    api_token: SecretString,
    client: reqwest::Client,
}

impl ReqwestStoreClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the store API (e.g., "https://api.notion.com")
    /// * `api_token` - The integration token used as a bearer credential
    pub fn new(base_url: &str, api_token: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client,
        }
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.api_token.expose_secret())
            .header("Notion-Version", API_VERSION)
    }

    /// Build an authenticated POST request.
    fn post_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(self.api_token.expose_secret())
            .header("Notion-Version", API_VERSION)
    }

    /// Handle a response, converting non-success status codes to errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, StoreError> {
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    /// Execute a request with no interest in the response body.
    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), StoreError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }
}

/// Extract status and a truncated body from a failed response.
async fn error_from_response(resp: reqwest::Response) -> StoreError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let body_snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    StoreError::Api {
        status,
        body: body_snippet,
    }
}

#[async_trait]
impl RecordStore for ReqwestStoreClient {
    async fn list_children(&self, container_id: &str) -> Result<Vec<ChildBlock>, StoreError> {
        let url = format!("{}/v1/blocks/{}/children", self.base_url, container_id);
        collect_paginated(|cursor| {
            let url = url.clone();
            async move {
                let mut req = self
                    .get_request(&url)
                    .query(&[("page_size", PAGE_SIZE.to_string())]);
                if let Some(cursor) = cursor {
                    req = req.query(&[("start_cursor", cursor)]);
                }
                let resp = req.send().await?;
                self.handle_response::<PageOf<ChildBlock>>(resp).await
            }
        })
        .await
    }

    async fn query_records_by_date(
        &self,
        database_id: &str,
        iso_date: &str,
    ) -> Result<Vec<StoredKey>, StoreError> {
        let url = format!("{}/v1/databases/{}/query", self.base_url, database_id);
        let pages = collect_paginated(|cursor| {
            let url = url.clone();
            let mut body = json!({
                "page_size": PAGE_SIZE,
                "filter": { "property": "Date", "date": { "equals": iso_date } },
            });
            if let Some(cursor) = cursor {
                body["start_cursor"] = Value::String(cursor);
            }
            async move {
                let resp = self.post_request(&url).json(&body).send().await?;
                self.handle_response::<PageOf<Value>>(resp).await
            }
        })
        .await?;
        Ok(pages.iter().map(key_from_page).collect())
    }

    async fn create_record(
        &self,
        database_id: &str,
        record: &ExternalRecord,
    ) -> Result<(), StoreError> {
        let url = format!("{}/v1/pages", self.base_url);
        let payload = record_payload(database_id, record);
        tracing::debug!(title = %record.title, "creating record");
        self.execute_empty(self.post_request(&url).json(&payload))
            .await
    }
}

/// Derive the dedup key of a stored page from its properties.
fn key_from_page(page: &Value) -> StoredKey {
    let properties = &page["properties"];
    StoredKey {
        location: rich_text_plain(&properties["Location"]),
        program: select_name(&properties["Program"]),
    }
}

/// Concatenated plain text of a rich-text property, empty when absent.
fn rich_text_plain(prop: &Value) -> String {
    prop.get("rich_text")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.get("plain_text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Selected option name of a select property, empty when absent.
fn select_name(prop: &Value) -> String {
    prop.get("select")
        .and_then(|s| s.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Build the create-page payload. `Program` and `Source` are select
/// properties; the store creates unseen option values on the fly, so no
/// option management is needed client-side.
fn record_payload(database_id: &str, record: &ExternalRecord) -> Value {
    let segments: Vec<Value> = record
        .body_segments
        .iter()
        .map(|seg| json!({ "text": { "content": seg } }))
        .collect();
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "Name": { "title": [ { "text": { "content": record.title } } ] },
            "Date": { "date": { "start": record.date } },
            "Location": { "rich_text": [ { "text": { "content": record.location } } ] },
            "Program": { "select": { "name": record.program } },
            "Source": { "select": { "name": record.source_url } },
            "Workout": { "rich_text": segments },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_page_reads_location_and_program() {
        let page = json!({
            "properties": {
                "Location": { "rich_text": [
                    { "plain_text": "Gym " }, { "plain_text": "A" }
                ]},
                "Program": { "select": { "name": "CrossFit" } }
            }
        });
        let key = key_from_page(&page);
        assert_eq!(key.location, "Gym A");
        assert_eq!(key.program, "CrossFit");
    }

    #[test]
    fn key_from_page_tolerates_missing_properties() {
        let page = json!({ "properties": {} });
        let key = key_from_page(&page);
        assert_eq!(key.location, "");
        assert_eq!(key.program, "");
    }

    #[test]
    fn record_payload_carries_all_properties() {
        let record = ExternalRecord {
            title: "01/02/2026 - Gym A - CrossFit".into(),
            date: "2026-02-01".into(),
            location: "Gym A".into(),
            program: "CrossFit".into(),
            source_url: "https://wod.example.com/schedule".into(),
            body_segments: vec!["Warm up".into(), "5 rounds".into()],
        };
        let payload = record_payload("db1", &record);
        assert_eq!(payload["parent"]["database_id"], "db1");
        let props = &payload["properties"];
        assert_eq!(props["Name"]["title"][0]["text"]["content"], record.title);
        assert_eq!(props["Date"]["date"]["start"], "2026-02-01");
        assert_eq!(props["Program"]["select"]["name"], "CrossFit");
        assert_eq!(
            props["Source"]["select"]["name"],
            "https://wod.example.com/schedule"
        );
        let workout = props["Workout"]["rich_text"].as_array().expect("segments");
        assert_eq!(workout.len(), 2);
        assert_eq!(workout[1]["text"]["content"], "5 rounds");
    }

    #[test]
    fn record_payload_empty_body_has_no_segments() {
        let record = ExternalRecord {
            title: "t".into(),
            date: "2026-02-01".into(),
            location: String::new(),
            program: "WOD".into(),
            source_url: "u".into(),
            body_segments: Vec::new(),
        };
        let payload = record_payload("db1", &record);
        let workout = payload["properties"]["Workout"]["rich_text"]
            .as_array()
            .expect("segments");
        assert!(workout.is_empty());
    }
}
