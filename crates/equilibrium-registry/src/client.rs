use crate::types::TagsListResponse;
use anyhow::{anyhow, bail, Context, Result};
use equilibrium_core::config::RegistryConfig;
use equilibrium_core::schema::{SchemaValidator, REGISTRY_TAGS};
use equilibrium_core::types::TagDigestMap;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, trace};

/// Client for the Docker Registry v2 tags endpoint
pub struct RegistryClient {
    client: reqwest::Client,
    /// Replaces `https://<host>` when set
    base_url: Option<String>,
    /// Bearer token for authentication
    auth_token: Option<String>,
}

impl RegistryClient {
    /// Create a new registry client
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("equilibrium/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            auth_token: config.token.clone(),
        })
    }

    /// Set authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Send requests to `base_url` instead of `https://<host>`
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Tags endpoint for `<host>/<namespace>/.../<image>`
    pub fn api_url(&self, repository: &str) -> Result<String> {
        let parts: Vec<&str> = repository.split('/').collect();
        if parts.len() < 3 || parts.iter().any(|p| p.is_empty()) {
            bail!("Invalid registry format: {}", repository);
        }

        let origin = self.origin(parts[0]);
        Ok(format!("{}/v2/{}/tags/list", origin, parts[1..].join("/")))
    }

    fn origin(&self, host: &str) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}", host),
        }
    }

    /// List all tags of a repository with their digests (handles pagination)
    ///
    /// Tags the registry reports without digest information are omitted.
    pub async fn list_tags(&self, repository: &str) -> Result<TagDigestMap> {
        let mut url = self.api_url(repository)?;
        let host = repository.split('/').next().unwrap_or_default();
        let origin = self.origin(host);
        let mut listing = TagsListResponse::default();
        let mut visited = HashSet::new();

        loop {
            if !visited.insert(url.clone()) {
                bail!("Registry pagination revisits {}", url);
            }
            debug!("Listing tags from: {}", url);

            let response = self
                .client
                .get(&url)
                .headers(self.headers()?)
                .send()
                .await
                .with_context(|| format!("Failed to connect to registry at {}", url))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(anyhow!(
                    "Registry returned {} for {}: {}",
                    status,
                    url,
                    if body.is_empty() {
                        "(no response body)".to_string()
                    } else {
                        body
                    }
                ));
            }

            // Check for Link header for pagination
            let next_url = response
                .headers()
                .get("link")
                .and_then(|h| h.to_str().ok())
                .and_then(|link| parse_link_header(link, &origin));

            let body = response
                .text()
                .await
                .context("Failed to read tags response")?;
            listing.extend(parse_tags_page(&body)?);

            match next_url {
                Some(next) => url = next,
                None => break,
            }
        }

        let digests = listing.tag_digests()?;
        trace!(
            "Found {} tags total, {} with digests",
            listing.tags.len(),
            digests.len()
        );
        Ok(digests)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.auth_token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .context("Invalid registry token")?,
            );
        }
        Ok(headers)
    }
}

/// Parse, schema-check and deserialize one page of a tags listing
fn parse_tags_page(body: &str) -> Result<TagsListResponse> {
    let value: serde_json::Value =
        serde_json::from_str(body).context("Invalid JSON response from registry")?;

    SchemaValidator::global()
        .validate(&value, REGISTRY_TAGS)
        .context("Registry API response validation failed")?;

    serde_json::from_value(value).context("Failed to parse tags response")
}

/// Parse Link header for pagination
/// Format: </v2/proj/app/tags/list?n=100&last=tag>; rel="next"
fn parse_link_header(link: &str, origin: &str) -> Option<String> {
    for part in link.split(',') {
        let part = part.trim();
        if part.contains("rel=\"next\"") {
            let start = part.find('<')? + 1;
            let end = start + part[start..].find('>')?;
            let url = &part[start..end];
            // URL might be relative, make it absolute
            if url.starts_with('/') {
                return Some(format!("{}{}", origin, url));
            }
            return Some(url.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RegistryClient {
        RegistryClient::new(&RegistryConfig::default()).unwrap()
    }

    #[test]
    fn test_registry_client_creation() {
        let client = client();
        assert!(client.auth_token.is_none());
        assert!(client.base_url.is_none());

        let client = client
            .with_token("test-token")
            .with_base_url("http://127.0.0.1:5000");
        assert_eq!(client.auth_token, Some("test-token".to_string()));
        assert_eq!(client.base_url.as_deref(), Some("http://127.0.0.1:5000"));
    }

    #[test]
    fn test_api_url() {
        assert_eq!(
            client().api_url("gcr.io/proj/app").unwrap(),
            "https://gcr.io/v2/proj/app/tags/list"
        );
        assert_eq!(
            client().api_url("us-docker.pkg.dev/proj/repo/app").unwrap(),
            "https://us-docker.pkg.dev/v2/proj/repo/app/tags/list"
        );
    }

    #[test]
    fn test_api_url_with_base_url() {
        let client = client().with_base_url("http://127.0.0.1:5000/");
        assert_eq!(
            client.api_url("gcr.io/proj/app").unwrap(),
            "http://127.0.0.1:5000/v2/proj/app/tags/list"
        );
    }

    #[test]
    fn test_api_url_requires_namespace() {
        for repository in ["gcr.io/app", "app", "gcr.io//app"] {
            let err = client().api_url(repository).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid registry format: {}", repository)
            );
        }
    }

    #[test]
    fn test_parse_link_header() {
        assert_eq!(
            parse_link_header(
                "</v2/proj/app/tags/list?n=2&last=b>; rel=\"next\"",
                "https://gcr.io"
            ),
            Some("https://gcr.io/v2/proj/app/tags/list?n=2&last=b".to_string())
        );
        assert_eq!(
            parse_link_header(
                "<https://mirror.example.com/v2/x/tags/list?last=a>; rel=\"next\"",
                "https://gcr.io"
            ),
            Some("https://mirror.example.com/v2/x/tags/list?last=a".to_string())
        );
        assert_eq!(
            parse_link_header("</v2/x/tags/list>; rel=\"prev\"", "https://gcr.io"),
            None
        );
    }

    #[test]
    fn test_parse_link_header_malformed() {
        assert_eq!(
            parse_link_header("/v2/x>; <rel=\"next\"", "https://gcr.io"),
            None
        );
        assert_eq!(
            parse_link_header("</v2/x/tags/list; rel=\"next\"", "https://gcr.io"),
            None
        );
    }

    #[test]
    fn test_parse_tags_page_rejects_invalid_json() {
        let err = parse_tags_page("not json").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON response"));
    }

    #[test]
    fn test_parse_tags_page_rejects_schema_violation() {
        let err = parse_tags_page(r#"{"tags": []}"#).unwrap_err();
        assert!(err
            .to_string()
            .contains("Registry API response validation failed"));
    }
}
