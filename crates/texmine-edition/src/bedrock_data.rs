// Bedrock metadata documents
//
// blocks.json and terrain_texture.json drive the Bedrock derivation
// catalog. They are JSON with line comments, which serde_json rejects,
// so comment lines are stripped before parsing. Fetched from the raw
// GitHub mirror of bedrock-samples and cached per branch.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::debug;
use serde_json::Value;

use texmine_version::VersionKind;

const RAW_BASE_URL: &str = "https://raw.githubusercontent.com/Mojang/bedrock-samples";

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches and caches Bedrock metadata documents. Stable versions live
/// on the `main` branch of bedrock-samples, previews on `preview`.
pub struct BedrockDataClient {
    http: reqwest::blocking::Client,
    base_url: String,
    blocks: Mutex<Option<Value>>,
    terrain: Mutex<Option<Value>>,
}

impl BedrockDataClient {
    pub fn new(kind: VersionKind) -> Result<Self> {
        Self::with_base_url(&format!("{RAW_BASE_URL}/{}", branch_for(kind)))
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            blocks: Mutex::new(None),
            terrain: Mutex::new(None),
        })
    }

    /// The block definition index: block name to texture identifiers.
    pub fn blocks(&self) -> Result<Value> {
        self.fetch_cached(&self.blocks, "blocks.json")
    }

    /// The terrain texture index: texture identifier to file paths.
    pub fn terrain_texture(&self) -> Result<Value> {
        self.fetch_cached(&self.terrain, "textures/terrain_texture.json")
    }

    fn fetch_cached(&self, cache: &Mutex<Option<Value>>, path: &str) -> Result<Value> {
        let mut cached = cache
            .lock()
            .map_err(|_| anyhow!("metadata cache poisoned"))?;
        if let Some(value) = cached.as_ref() {
            return Ok(value.clone());
        }
        let url = format!("{}/resource_pack/{path}", self.base_url);
        debug!("fetching {url}");
        let body = self
            .http
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("fetching {path}"))?
            .text()
            .with_context(|| format!("reading {path}"))?;
        let value = parse_commented_json(&body).with_context(|| format!("parsing {path}"))?;
        *cached = Some(value.clone());
        Ok(value)
    }
}

fn branch_for(kind: VersionKind) -> &'static str {
    match kind {
        VersionKind::Stable => "main",
        VersionKind::Experimental => "preview",
    }
}

/// Parse JSON that may carry `//` line comments.
pub fn parse_commented_json(text: &str) -> Result<Value> {
    let stripped: String = text
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n");
    serde_json::from_str(&stripped).context("decoding JSON")
}
