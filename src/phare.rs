//! Thin client for the phare.io uptime API
//!
//! One HTTP call per operation, bearer-token auth, fixed timeout. Nothing is
//! retried; a failed call surfaces as an error with enough context to tell
//! which operation aborted the run.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::config::Config;
use crate::monitor::{Monitor, MonitorSet};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response envelope of the monitor listing endpoint.
#[derive(Debug, Deserialize)]
struct MonitorList {
    data: Vec<Monitor>,
}

pub struct PhareClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PhareClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("phare-sync/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.endpoint)
    }

    /// Fetches every monitor visible to the account behind the token,
    /// keyed by monitor name.
    pub async fn list_monitors(&self) -> Result<MonitorSet> {
        let response = self
            .http
            .get(self.url("uptime/monitors"))
            .bearer_auth(&self.token)
            .send()
            .await
            .context("failed to list monitors")?;
        if !response.status().is_success() {
            bail!("failed to list monitors: HTTP {}", response.status());
        }
        let list: MonitorList = response
            .json()
            .await
            .context("monitor listing was not valid JSON")?;

        let mut monitors = MonitorSet::new();
        for monitor in list.data {
            let name = monitor
                .name()
                .context("remote monitor has no name")?
                .to_string();
            monitors.insert(name, monitor);
        }
        Ok(monitors)
    }

    pub async fn create_monitor(&self, monitor: &Monitor) -> Result<()> {
        let response = self
            .http
            .post(self.url("uptime/monitors"))
            .bearer_auth(&self.token)
            .json(monitor)
            .send()
            .await
            .context("failed to create monitor")?;
        if !response.status().is_success() {
            bail!("failed to create monitor: HTTP {}", response.status());
        }
        Ok(())
    }

    /// Overwrites the monitor identified by `id` with the full local record.
    pub async fn update_monitor(&self, id: u64, monitor: &Monitor) -> Result<()> {
        let response = self
            .http
            .post(self.url(&format!("uptime/monitors/{id}")))
            .bearer_auth(&self.token)
            .json(monitor)
            .send()
            .await
            .with_context(|| format!("failed to update monitor {id}"))?;
        if !response.status().is_success() {
            bail!("failed to update monitor {id}: HTTP {}", response.status());
        }
        Ok(())
    }

    pub async fn pause_monitor(&self, id: u64) -> Result<()> {
        self.toggle(id, "pause").await
    }

    pub async fn resume_monitor(&self, id: u64) -> Result<()> {
        self.toggle(id, "resume").await
    }

    async fn toggle(&self, id: u64, action: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url(&format!("uptime/monitors/{id}/{action}")))
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("failed to {action} monitor {id}"))?;
        if !response.status().is_success() {
            bail!(
                "failed to {action} monitor {id}: HTTP {}",
                response.status()
            );
        }
        Ok(())
    }
}
