//! Low-level authenticated client for the GitLab REST API.
//!
//! Every call blocks until the platform answers. Any non-2xx response is a
//! hard failure for the calling operation; there is no retry, backoff, or
//! rate-limit handling anywhere in this crate.

use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;

use crate::config::Settings;

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the GitLab REST API.
pub struct GitLabClient {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl GitLabClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: settings.base_url.clone(),
            token: settings.token.clone(),
            client,
        })
    }

    /// GET a resource, returning the decoded JSON body.
    pub fn get(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .with_context(|| format!("GET {} failed to send", path))?;

        Self::decode("GET", path, response)
    }

    /// POST a JSON body, returning the decoded JSON response.
    pub fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<serde_json::Value> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(body)
            .send()
            .with_context(|| format!("POST {} failed to send", path))?;

        Self::decode("POST", path, response)
    }

    /// DELETE a resource. GitLab answers 202 with a message or 204 with
    /// nothing; an empty body decodes as JSON null.
    pub fn delete(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.url(path);
        let response = self
            .client
            .delete(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .with_context(|| format!("DELETE {} failed to send", path))?;

        Self::decode("DELETE", path, response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn decode(
        method: &str,
        path: &str,
        response: reqwest::blocking::Response,
    ) -> Result<serde_json::Value> {
        let status = response.status();
        let body = response.text().unwrap_or_default();

        if !status.is_success() {
            anyhow::bail!("{} {} returned {}: {}", method, path, status, body.trim());
        }

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body)
            .with_context(|| format!("{} {} returned unparseable JSON", method, path))
    }
}

#[cfg(test)]
mod tests {
    use crate::gitlab::testutil;
    use serde_json::json;

    #[test]
    fn test_get_decodes_json_body() {
        let (client, server) = testutil::serve(vec![(200, r#"{"id": 5, "name": "acme"}"#)]);

        let value = client.get("groups/5").unwrap();
        assert_eq!(value["id"], 5);

        let requests = server.join().unwrap();
        assert!(requests[0].starts_with("GET /groups/5"));
    }

    #[test]
    fn test_non_success_bails_with_status_and_body() {
        let (client, server) = testutil::serve(vec![(403, r#"{"message": "forbidden"}"#)]);

        let err = client.post("projects", &json!({"name": "x"})).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("403"), "{}", msg);
        assert!(msg.contains("forbidden"), "{}", msg);

        server.join().unwrap();
    }

    #[test]
    fn test_delete_tolerates_empty_body() {
        let (client, server) = testutil::serve(vec![(204, "")]);

        assert_eq!(client.delete("projects/9").unwrap(), serde_json::Value::Null);

        server.join().unwrap();
    }
}
