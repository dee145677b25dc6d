use crate::config::ClientConfig;
use crate::error::FormError;
use crate::form::AnalyzeTransport;
use crate::models::{AnalyzeRequest, ResponseEnvelope};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// JSON-over-HTTP transport for the analysis endpoint.
///
/// One request per call. No retries, and no timeout unless configured.
pub struct HttpTransport {
    inner: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let inner = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            inner,
            url: config.analyze_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AnalyzeTransport for HttpTransport {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<ResponseEnvelope, FormError> {
        debug!("POST {} {:?}", self.url, request);

        let resp = self.inner.post(&self.url).json(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!("{} ({} bytes)", status, body.len());

        // Failing requests still carry an envelope with the server's message;
        // prefer that over the bare status.
        match serde_json::from_str::<ResponseEnvelope>(&body) {
            Ok(envelope) if status.is_success() || !envelope.success => Ok(envelope),
            Ok(_) => Err(FormError::Http {
                status: status.as_u16(),
            }),
            Err(_) if !status.is_success() => Err(FormError::Http {
                status: status.as_u16(),
            }),
            Err(e) => Err(FormError::MalformedResponse(e.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
