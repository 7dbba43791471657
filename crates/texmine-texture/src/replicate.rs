// Texture replication
//
// Copies textures under additional names, e.g. glass_pane_top -> glass_pane.
// A rule may carry a shape for an optional post-copy crop.

use std::fs;
use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use crate::error::DeriveError;
use crate::shape::{BlockShape, crop_file};

/// Static replication rule: any file whose stem equals `source` is copied
/// beside itself as `target`, optionally cropped afterwards.
#[derive(Debug, Clone, Copy)]
pub struct ReplicationRule {
    pub source: &'static str,
    pub target: &'static str,
    pub crop: Option<BlockShape>,
}

impl ReplicationRule {
    pub const fn copy(source: &'static str, target: &'static str) -> Self {
        Self {
            source,
            target,
            crop: None,
        }
    }
}

/// Replicate matching textures across an asset tree.
///
/// Returns the number of files replicated; zero matches is not an error.
pub fn replicate(asset_dir: &Path, rules: &[ReplicationRule]) -> Result<usize, DeriveError> {
    info!("replicating textures in {}", asset_dir.display());
    let mut count = 0;
    for entry in WalkDir::new(asset_dir).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(rule) = rules.iter().find(|rule| rule.source == stem) else {
            continue;
        };
        let dest = path.with_file_name(format!("{}.png", rule.target));
        debug!("replicating {} -> {}", path.display(), dest.display());
        match rule.crop {
            Some(shape) => crop_file(path, shape, &dest)?,
            None => {
                fs::copy(path, &dest)?;
            }
        }
        count += 1;
    }
    Ok(count)
}
