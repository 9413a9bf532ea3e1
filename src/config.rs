//! Client configuration resolved once at startup

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.phare.io";

/// Everything the API client needs: where to talk and the token to present.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub token: String,
}

impl Config {
    /// Builds a configuration from the resolved CLI/environment values.
    ///
    /// The token file is read here, exactly once; afterwards the token lives
    /// only inside this struct. The contents are trimmed so a trailing
    /// newline in the file cannot end up in the Authorization header.
    pub fn load(token_file: Option<&Path>, endpoint: &str) -> Result<Self> {
        let token_file =
            token_file.context("no API token: set PHARE_TOKEN_FILE or pass --token-file")?;
        let token = fs::read_to_string(token_file)
            .with_context(|| format!("failed to read token file {}", token_file.display()))?
            .trim()
            .to_string();
        ensure!(
            !token.is_empty(),
            "token file {} is empty",
            token_file.display()
        );

        Ok(Self {
            endpoint: endpoint.to_string(),
            token,
        })
    }
}
