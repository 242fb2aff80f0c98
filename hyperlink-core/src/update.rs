/// Update checker: compares the running version against the latest GitHub release

use crate::constants::{RELEASES_URL, UPDATE_TIMEOUT_SECS};
use crate::error::UpdateError;
use log::{info, warn};
use serde::Deserialize;
use std::time::Duration;

/// Result of an update check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate { latest: String },
    Available { version: String, url: String },
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: Option<String>,
    html_url: Option<String>,
}

/// HTTP client for the releases endpoint
pub struct UpdateChecker {
    client: reqwest::Client,
    endpoint: String,
    current_version: String,
}

impl UpdateChecker {
    /// Create a checker for `current_version` against the default releases endpoint
    pub fn new(current_version: &str) -> Result<Self, UpdateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPDATE_TIMEOUT_SECS))
            .user_agent(concat!("Hyperlink/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: RELEASES_URL.to_string(),
            current_version: current_version.to_string(),
        })
    }

    /// Point the checker at a different endpoint
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Fetch the latest release and compare it to the running version
    pub async fn check(&self) -> Result<UpdateStatus, UpdateError> {
        info!("Checking for updates... Current version: {}", self.current_version);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| {
                warn!("Update check error: network error: {}", e);
                UpdateError::Network(e)
            })?;

        if !response.status().is_success() {
            warn!("Update check error: server returned {}", response.status());
            return Err(UpdateError::Server(response.status()));
        }

        let body = response.text().await?;
        let status = Self::evaluate(&self.current_version, &body)?;
        info!("Update check result: {:?}", status);
        Ok(status)
    }

    /// Decide from a release JSON body whether an update is available
    fn evaluate(current: &str, body: &str) -> Result<UpdateStatus, UpdateError> {
        let release: Release = serde_json::from_str(body).map_err(|_| UpdateError::InvalidResponse)?;

        let (Some(tag), Some(url)) = (release.tag_name, release.html_url) else {
            return Err(UpdateError::InvalidResponse);
        };

        let latest = strip_v(&tag).to_string();
        if is_newer(current, &latest) {
            Ok(UpdateStatus::Available { version: latest, url })
        } else {
            Ok(UpdateStatus::UpToDate { latest })
        }
    }
}

/// Drop a leading `v` from a release tag
pub fn strip_v(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Parse dotted integer components, skipping anything non-numeric, padded to three
fn components(version: &str) -> Vec<u64> {
    let mut parts: Vec<u64> = version
        .split('.')
        .filter_map(|p| p.trim().parse().ok())
        .collect();
    while parts.len() < 3 {
        parts.push(0);
    }
    parts
}

/// True when `latest` is a newer version than `current`
pub fn is_newer(current: &str, latest: &str) -> bool {
    let current = components(current);
    let latest = components(latest);

    for (c, l) in current.iter().zip(latest.iter()) {
        if l > c {
            return true;
        }
        if l < c {
            return false;
        }
    }

    latest.len() > current.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Answer a single request on a local port with a canned response
    fn serve_once(status: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 4096];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}/repos/padrewin/Hyperlink/releases/latest", addr)
    }

    fn local_checker(current: &str, endpoint: String) -> UpdateChecker {
        let mut checker = UpdateChecker::new(current).unwrap().with_endpoint(endpoint);
        // keep proxy settings from the environment away from the local listener
        checker.client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        checker
    }

    #[tokio::test]
    async fn test_check_reports_available_release() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"tag_name": "v9.0.0", "html_url": "https://github.com/padrewin/Hyperlink/releases/tag/v9.0.0"}"#,
        );
        let status = local_checker("1.0.0", endpoint).check().await.unwrap();
        assert_eq!(
            status,
            UpdateStatus::Available {
                version: "9.0.0".into(),
                url: "https://github.com/padrewin/Hyperlink/releases/tag/v9.0.0".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_check_not_found_is_server_error() {
        let endpoint = serve_once("404 Not Found", r#"{"message": "Not Found"}"#);
        let err = local_checker("1.0.0", endpoint).check().await.unwrap_err();
        assert!(matches!(err, UpdateError::Server(status) if status == reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_check_malformed_body() {
        let endpoint = serve_once("200 OK", "<html>rate limited</html>");
        let err = local_checker("1.0.0", endpoint).check().await.unwrap_err();
        assert!(matches!(err, UpdateError::InvalidResponse));
    }

    #[tokio::test]
    async fn test_check_unreachable_is_network_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        // the listener is dropped, so nothing accepts on this port
        let endpoint = format!("http://{}/releases/latest", addr);
        let err = local_checker("1.0.0", endpoint).check().await.unwrap_err();
        assert!(matches!(err, UpdateError::Network(_)));
    }

    #[test]
    fn test_is_newer() {
        assert!(is_newer("1.0.0", "1.0.1"));
        assert!(is_newer("1.2.9", "1.3.0"));
        assert!(is_newer("1.9", "2"));
        assert!(!is_newer("1.2.0", "1.2.0"));
        assert!(!is_newer("1.2.0", "1.1.9"));
        assert!(!is_newer("2.0.0", "1.99.99"));
    }

    #[test]
    fn test_padding_and_extra_components() {
        assert!(!is_newer("1", "1.0.0"));
        assert!(is_newer("1.0.0", "1.0.0.1"));
        assert!(!is_newer("1.0.0.1", "1.0.0"));
    }

    #[test]
    fn test_non_numeric_components_skipped() {
        // "beta" is dropped, leaving 1.3 padded to 1.3.0
        assert!(is_newer("1.2.5", "1.3.beta"));
    }

    #[test]
    fn test_strip_v() {
        assert_eq!(strip_v("v1.0.5"), "1.0.5");
        assert_eq!(strip_v("1.0.5"), "1.0.5");
    }

    #[test]
    fn test_evaluate_available() {
        let body = r#"{"tag_name": "v1.3.0", "html_url": "https://github.com/padrewin/Hyperlink/releases/tag/v1.3.0"}"#;
        assert_eq!(
            UpdateChecker::evaluate("1.2.0", body).unwrap(),
            UpdateStatus::Available {
                version: "1.3.0".into(),
                url: "https://github.com/padrewin/Hyperlink/releases/tag/v1.3.0".into(),
            }
        );
    }

    #[test]
    fn test_evaluate_up_to_date() {
        let body = r#"{"tag_name": "1.2.0", "html_url": "https://example.com"}"#;
        assert_eq!(
            UpdateChecker::evaluate("1.2.0", body).unwrap(),
            UpdateStatus::UpToDate { latest: "1.2.0".into() }
        );
    }

    #[test]
    fn test_evaluate_invalid() {
        assert!(matches!(
            UpdateChecker::evaluate("1.0.0", r#"{"message": "Not Found"}"#),
            Err(UpdateError::InvalidResponse)
        ));
        assert!(matches!(
            UpdateChecker::evaluate("1.0.0", "<html>"),
            Err(UpdateError::InvalidResponse)
        ));
    }
}
