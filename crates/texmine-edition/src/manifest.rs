// Mojang version manifest client
//
// Fetches and caches the piston-meta version manifest, the index every
// Java version lookup starts from. Each version entry carries a URL to a
// per-version detail document holding the client jar download.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::debug;
use serde::Deserialize;

const VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize)]
pub struct VersionManifest {
    pub latest: LatestVersions,
    pub versions: Vec<ManifestVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestVersion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// Per-version detail document; only the client download is of interest.
#[derive(Debug, Deserialize)]
struct VersionDetail {
    downloads: VersionDownloads,
}

#[derive(Debug, Deserialize)]
struct VersionDownloads {
    client: DownloadEntry,
}

#[derive(Debug, Deserialize)]
pub struct DownloadEntry {
    pub url: String,
    pub sha1: String,
    pub size: u64,
}

/// Caching client for the Mojang version manifest. The manifest is
/// fetched once per process and shared between lookups.
pub struct ManifestClient {
    http: reqwest::blocking::Client,
    manifest_url: String,
    cached: Mutex<Option<Arc<VersionManifest>>>,
}

impl ManifestClient {
    pub fn new() -> Result<Self> {
        Self::with_url(VERSION_MANIFEST_URL)
    }

    pub fn with_url(manifest_url: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            manifest_url: manifest_url.to_string(),
            cached: Mutex::new(None),
        })
    }

    /// Fetch the manifest, or return the cached copy.
    pub fn manifest(&self) -> Result<Arc<VersionManifest>> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| anyhow!("manifest cache poisoned"))?;
        if let Some(manifest) = cached.as_ref() {
            return Ok(Arc::clone(manifest));
        }
        debug!("fetching version manifest from {}", self.manifest_url);
        let manifest: VersionManifest = self
            .http
            .get(&self.manifest_url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .context("fetching version manifest")?
            .json()
            .context("decoding version manifest")?;
        debug!("manifest lists {} versions", manifest.versions.len());
        let manifest = Arc::new(manifest);
        *cached = Some(Arc::clone(&manifest));
        Ok(manifest)
    }

    /// Look up a version entry by exact id.
    pub fn find(&self, id: &str) -> Result<ManifestVersion> {
        let manifest = self.manifest()?;
        manifest
            .versions
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("version {id} not found in manifest"))
    }

    /// Resolve the client jar download for a version entry.
    pub fn client_download(&self, version: &ManifestVersion) -> Result<DownloadEntry> {
        debug!("fetching version detail for {}", version.id);
        let detail: VersionDetail = self
            .http
            .get(&version.url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("fetching detail for {}", version.id))?
            .json()
            .with_context(|| format!("decoding detail for {}", version.id))?;
        Ok(detail.downloads.client)
    }

    pub fn http(&self) -> &reqwest::blocking::Client {
        &self.http
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST_JSON: &str = r#"{
        "latest": { "release": "1.21", "snapshot": "24w34a" },
        "versions": [
            { "id": "24w34a", "type": "snapshot",
              "url": "https://example.invalid/24w34a.json",
              "time": "2024-08-21T13:21:04+00:00",
              "releaseTime": "2024-08-21T13:11:59+00:00",
              "sha1": "aaaa", "complianceLevel": 1 },
            { "id": "1.21", "type": "release",
              "url": "https://example.invalid/1.21.json",
              "time": "2024-06-13T08:32:38+00:00",
              "releaseTime": "2024-06-13T08:24:03+00:00",
              "sha1": "bbbb", "complianceLevel": 1 }
        ]
    }"#;

    #[test]
    fn manifest_decodes_ids_and_kinds() {
        let manifest: VersionManifest = serde_json::from_str(MANIFEST_JSON).unwrap();
        assert_eq!(manifest.latest.release, "1.21");
        assert_eq!(manifest.latest.snapshot, "24w34a");
        assert_eq!(manifest.versions.len(), 2);
        assert_eq!(manifest.versions[0].kind, "snapshot");
        assert_eq!(manifest.versions[1].id, "1.21");
    }

    #[test]
    fn detail_decodes_client_download() {
        let detail: VersionDetail = serde_json::from_str(
            r#"{
                "downloads": {
                    "client": {
                        "sha1": "cccc",
                        "size": 26836080,
                        "url": "https://example.invalid/client.jar"
                    },
                    "server": {
                        "sha1": "dddd",
                        "size": 51420480,
                        "url": "https://example.invalid/server.jar"
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(detail.downloads.client.size, 26836080);
        assert!(detail.downloads.client.url.ends_with("client.jar"));
    }

    #[test]
    fn find_reports_unknown_versions() {
        let client = ManifestClient::with_url("https://example.invalid/manifest.json").unwrap();
        *client.cached.lock().unwrap() =
            Some(Arc::new(serde_json::from_str(MANIFEST_JSON).unwrap()));

        assert_eq!(client.find("1.21").unwrap().kind, "release");
        assert!(client.find("0.0.0").is_err());
    }
}
