// bedrock-samples repository access
//
// Bedrock has no public asset archive per version; Mojang publishes the
// resource pack in the bedrock-samples git repository, one tag per
// version. A sparse blobless clone keeps the checkout small.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use log::{debug, info};

const BEDROCK_SAMPLES_URL: &str = "https://github.com/Mojang/bedrock-samples.git";

/// A local sparse clone of bedrock-samples, checked out one tag at a time.
pub struct BedrockRepo {
    path: PathBuf,
    remote_url: String,
}

impl BedrockRepo {
    /// Clone the repository into `dir/bedrock-samples`, restricted to the
    /// resource pack. Blobs outside the sparse set are never fetched.
    pub fn clone_into(dir: &Path) -> Result<Self> {
        Self::clone_from(BEDROCK_SAMPLES_URL, dir)
    }

    pub fn clone_from(remote_url: &str, dir: &Path) -> Result<Self> {
        let path = dir.join("bedrock-samples");
        info!("cloning {remote_url} into {}", path.display());
        run_git(
            dir,
            &[
                "clone",
                "--filter=blob:none",
                "--sparse",
                "--quiet",
                remote_url,
                "bedrock-samples",
            ],
        )?;
        let repo = Self {
            path,
            remote_url: remote_url.to_string(),
        };
        run_git(&repo.path, &["sparse-checkout", "set", "resource_pack"])?;
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    /// Resource pack root of the current checkout.
    pub fn resource_pack(&self) -> PathBuf {
        self.path.join("resource_pack")
    }

    /// List all version tags, e.g. "v1.21.0.3" and "v1.21.20.21-preview".
    pub fn tags(&self) -> Result<Vec<String>> {
        let stdout = run_git(&self.path, &["tag", "--list"])?;
        let tags: Vec<String> = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        debug!("repository has {} tags", tags.len());
        Ok(tags)
    }

    /// Check out the tag for a version string such as "v1.21.0.3".
    pub fn checkout(&self, tag: &str) -> Result<()> {
        info!("checking out {tag}");
        run_git(&self.path, &["checkout", "--quiet", &format!("tags/{tag}")])?;
        Ok(())
    }
}

fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    debug!("git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .context("running git")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git {} failed: {}", args.join(" "), stderr.trim());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
