// Client jar acquisition
//
// Downloads a version's client jar and unpacks it. The jar is a plain
// zip; textures live under assets/minecraft/textures and recipes under
// data/minecraft/recipe inside it.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use zip::ZipArchive;

use crate::manifest::{DownloadEntry, ManifestClient};

/// Download the client jar for `version_id` into `dir`, returning the
/// jar path. An existing file at that path is overwritten.
pub fn download_client_jar(
    client: &ManifestClient,
    version_id: &str,
    dir: &Path,
) -> Result<PathBuf> {
    let entry = client.find(version_id)?;
    let download = client.client_download(&entry)?;
    let jar_path = dir.join(format!("{version_id}.jar"));
    fetch_to_file(client, &download, &jar_path)?;
    Ok(jar_path)
}

fn fetch_to_file(client: &ManifestClient, download: &DownloadEntry, dest: &Path) -> Result<()> {
    info!(
        "downloading client jar ({} bytes) to {}",
        download.size,
        dest.display()
    );
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(dest)
        .with_context(|| format!("creating {}", dest.display()))?;
    let mut resp = client
        .http()
        .get(&download.url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .context("downloading client jar")?;
    let written = resp
        .copy_to(&mut file)
        .context("writing client jar")?;
    debug!("wrote {written} bytes");
    Ok(())
}

/// Unpack a jar into `dest`.
pub fn extract_jar(jar_path: &Path, dest: &Path) -> Result<()> {
    info!("extracting {} to {}", jar_path.display(), dest.display());
    let file = File::open(jar_path)
        .with_context(|| format!("opening {}", jar_path.display()))?;
    let mut archive = ZipArchive::new(file).context("reading jar")?;
    archive
        .extract(dest)
        .with_context(|| format!("extracting to {}", dest.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use zip::write::FileOptions;

    #[test]
    fn extract_unpacks_nested_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let jar_path = tmp.path().join("test.jar");

        let file = File::create(&jar_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = FileOptions::default();
        writer
            .start_file("assets/minecraft/textures/block/stone.png", options)
            .unwrap();
        writer.write_all(b"not a real png").unwrap();
        writer
            .start_file("data/minecraft/recipe/stone_slab.json", options)
            .unwrap();
        writer.write_all(b"{}").unwrap();
        writer.finish().unwrap();

        let dest = tmp.path().join("unpacked");
        extract_jar(&jar_path, &dest).unwrap();

        assert!(
            dest.join("assets/minecraft/textures/block/stone.png")
                .is_file()
        );
        assert!(dest.join("data/minecraft/recipe/stone_slab.json").is_file());
    }

    #[test]
    fn extract_rejects_non_zip_input() {
        let tmp = tempfile::tempdir().unwrap();
        let bogus = tmp.path().join("bogus.jar");
        fs::write(&bogus, b"definitely not a zip").unwrap();

        assert!(extract_jar(&bogus, &tmp.path().join("out")).is_err());
    }
}
