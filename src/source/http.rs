use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::models::ReportSnapshot;

use super::{FetchError, ReportSource};

pub const LIVE_REPORT_PATH: &str = "/api/live_report";

/// Polls `GET {base}/api/live_report` over HTTP.
pub struct HttpReportSource {
    client: reqwest::Client,
    url: String,
}

impl HttpReportSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            url: report_url(base_url),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    async fn fetch_report(&self) -> Result<ReportSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        ReportSnapshot::from_json(&body).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

fn report_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), LIVE_REPORT_PATH)
}
