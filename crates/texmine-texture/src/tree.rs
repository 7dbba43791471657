// Asset tree utilities
//
// The pipeline around derivation: filter raw extracted assets down to
// block/item PNGs, flatten nested texture subdirectories, scale, and
// optionally merge blocks and items into a single directory.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use log::{debug, info};
use walkdir::WalkDir;

use crate::error::DeriveError;
use crate::shape::{BlockShape, crop_file};

/// A directory of block/item textures. `block_dir` is the subdirectory
/// block textures live in ("block" for raw Java assets, "blocks" for
/// filtered trees).
#[derive(Debug, Clone)]
pub struct AssetTree {
    root: PathBuf,
    block_dir: String,
}

impl AssetTree {
    pub fn new(root: impl Into<PathBuf>, block_dir: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            block_dir: block_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a block texture by name. Names may carry a subdirectory
    /// (e.g. "candles/black_candle").
    pub fn block_file(&self, name: &str) -> PathBuf {
        self.root.join(&self.block_dir).join(format!("{name}.png"))
    }

    pub fn texture_exists(&self, name: &str) -> bool {
        self.block_file(name).is_file()
    }
}

/// Copy the block and item source directories into `output` as `blocks/`
/// and `items/`, keeping only PNG files. A previous output is replaced.
pub fn filter_textures(
    blocks_src: &Path,
    items_src: &Path,
    output: &Path,
) -> Result<(), DeriveError> {
    info!("filtering textures into {}", output.display());
    if output.is_dir() {
        fs::remove_dir_all(output)?;
    }
    copy_png_tree(blocks_src, &output.join("blocks"))?;
    copy_png_tree(items_src, &output.join("items"))?;
    Ok(())
}

fn copy_png_tree(src: &Path, dest: &Path) -> Result<(), DeriveError> {
    debug!("copying textures {} -> {}", src.display(), dest.display());
    fs::create_dir_all(dest)?;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
    }
    Ok(())
}

/// Flatten one level of subdirectories under `blocks/` and `items/`
/// (Bedrock nests candles and similar variants).
pub fn simplify_structure(root: &Path) -> Result<(), DeriveError> {
    info!("simplifying texture directory structure");
    for sub in ["blocks", "items"] {
        let dir = root.join(sub);
        if !dir.is_dir() {
            continue;
        }
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            for file in fs::read_dir(entry.path())? {
                let file = file?;
                fs::rename(file.path(), dir.join(file.file_name()))?;
            }
            fs::remove_dir_all(entry.path())?;
        }
    }
    Ok(())
}

/// Scale every PNG in the tree by an integer factor (nearest neighbor,
/// keeping pixels crisp). Non-PNG leftovers are removed. `do_crop` squares
/// each texture to 16x16 first, cutting animation strips down to one frame.
pub fn scale_textures(root: &Path, factor: u32, do_crop: bool) -> Result<(), DeriveError> {
    info!("scaling textures by {factor}x");
    let files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    for path in files {
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            fs::remove_file(&path)?;
            continue;
        }
        if do_crop {
            crop_file(&path, BlockShape::Square, &path)?;
        }
        if factor > 1 {
            let img = image::open(&path)
                .map_err(|source| DeriveError::Image {
                    path: path.clone(),
                    source,
                })?
                .to_rgba8();
            let scaled = imageops::resize(
                &img,
                img.width() * factor,
                img.height() * factor,
                FilterType::Nearest,
            );
            scaled.save(&path).map_err(|source| DeriveError::Image {
                path: path.clone(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Merge `blocks/` and `items/` into the tree root. Items are merged last
/// and take priority on name collisions.
pub fn merge_dirs(root: &Path) -> Result<(), DeriveError> {
    info!("merging block and item textures");
    for sub in ["blocks", "items"] {
        let dir = root.join(sub);
        if !dir.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&dir).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            fs::copy(entry.path(), root.join(entry.file_name()))?;
        }
        fs::remove_dir_all(&dir)?;
    }
    Ok(())
}
