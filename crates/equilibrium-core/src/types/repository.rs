use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Full repository URL such as `gcr.io/project-id/image-name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryUrl {
    /// Registry hostname (e.g., "gcr.io", "registry.example.com:5000")
    host: String,
    /// Namespace and image path (e.g., "project-id/image-name")
    path: String,
}

impl RepositoryUrl {
    /// Parse a repository URL; a host-only or bare image name is rejected
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches('/');
        let (host, path) = trimmed
            .split_once('/')
            .ok_or_else(|| Error::invalid_repository_url(s))?;

        if host.is_empty() || path.is_empty() || path.split('/').any(str::is_empty) {
            return Err(Error::invalid_repository_url(s));
        }

        Ok(Self {
            host: host.to_string(),
            path: path.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path segments below the host
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/')
    }

    /// Repository name: the last path segment
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host, self.path)
    }
}

impl FromStr for RepositoryUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RepositoryUrl {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<RepositoryUrl> for String {
    fn from(url: RepositoryUrl) -> Self {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository_url() {
        let cases = vec![
            ("gcr.io/datadoghq/apm-inject", "gcr.io", "datadoghq/apm-inject", "apm-inject"),
            ("gcr.io/project/team/service", "gcr.io", "project/team/service", "service"),
            ("localhost:5000/ns/app", "localhost:5000", "ns/app", "app"),
            ("registry.example.com/app/", "registry.example.com", "app", "app"),
        ];

        for (input, host, path, name) in cases {
            let url = RepositoryUrl::parse(input).unwrap();
            assert_eq!(url.host(), host, "Host mismatch for {}", input);
            assert_eq!(url.path(), path, "Path mismatch for {}", input);
            assert_eq!(url.name(), name, "Name mismatch for {}", input);
        }
    }

    #[test]
    fn test_rejects_short_urls() {
        for bad in ["apm-inject", "", "/image", "gcr.io//image"] {
            let err = RepositoryUrl::parse(bad).unwrap_err();
            assert!(
                err.to_string().contains("Repository URL must be full format"),
                "Unexpected error for {:?}: {}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        let url = RepositoryUrl::parse("gcr.io/project/team/service").unwrap();
        assert_eq!(url.to_string(), "gcr.io/project/team/service");
        assert_eq!(url.segments().count(), 3);
    }
}
