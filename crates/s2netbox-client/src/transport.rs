//! HTTP transport for command documents.
//!
//! The protocol core only needs "POST text, receive text"; the trait keeps
//! that seam narrow so unit tests can substitute a scripted transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::S2NetboxError;

/// Fixed endpoint path the appliance serves the XML API on.
const API_PATH: &str = "/goforms/nbapi";

/// Generic "POST a command document, receive a response document"
/// capability.
///
/// Retry and timeout policy, when wanted, lives behind this trait; the
/// client core issues exactly one request per command.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request document and return the raw response text.
    async fn send_command(&self, xml: &str) -> Result<String, S2NetboxError>;
}

/// Production transport: HTTP POST with the `APIcommand=<urlencoded XML>`
/// form framing the vendor expects.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport for the given appliance URL.
    ///
    /// A bare host URL gets the fixed `/goforms/nbapi` path appended; a URL
    /// already carrying it is used as-is.
    pub fn new(base_url: &str) -> Result<Self, S2NetboxError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(S2NetboxError::Http)?;

        let trimmed = base_url.trim_end_matches('/');
        let url = if trimmed.ends_with(API_PATH) {
            trimmed.to_string()
        } else {
            format!("{trimmed}{API_PATH}")
        };

        Ok(Self { client, url })
    }

    /// The resolved endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_command(&self, xml: &str) -> Result<String, S2NetboxError> {
        debug!("POST {}", self.url);

        let body = format!("APIcommand={}", urlencoding::encode(xml));
        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(S2NetboxError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(S2NetboxError::Fault {
                code: status.to_string(),
                raw: body,
            });
        }

        response.text().await.map_err(S2NetboxError::Http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_path_is_appended_once() {
        let transport = HttpTransport::new("https://netbox.example.com").unwrap();
        assert_eq!(transport.url(), "https://netbox.example.com/goforms/nbapi");

        let transport = HttpTransport::new("https://netbox.example.com/").unwrap();
        assert_eq!(transport.url(), "https://netbox.example.com/goforms/nbapi");

        let transport = HttpTransport::new("https://netbox.example.com/goforms/nbapi").unwrap();
        assert_eq!(transport.url(), "https://netbox.example.com/goforms/nbapi");
    }
}
