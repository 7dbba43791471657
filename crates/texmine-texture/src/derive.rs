// Derivation orchestrator
//
// Walks a derived-texture catalog and materializes each entry into the
// asset tree. Per-entry resolution failures are logged and skipped;
// filesystem and image errors abort the run.

use std::fs;

use log::{debug, info, warn};

use crate::error::DeriveError;
use crate::recipe::{RecipeIngredients, resolve_base};
use crate::shape::{BlockShape, crop_file};
use crate::tree::AssetTree;

/// How one derived texture is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivationRule {
    /// Crop a known base texture to a shape.
    Direct { shape: BlockShape, base: String },
    /// Copy a known base texture unmodified.
    Copy { base: String },
    /// Recover the base texture from the product's crafting recipe, then
    /// crop to the shape implied by the product name.
    RecipeDerived { recipe: RecipeIngredients },
}

/// One entry of a derived-texture catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedEntry {
    pub name: String,
    pub rule: DerivationRule,
}

/// Alternate recipe files produce a product that already has a primary
/// recipe ("from_" conversions, re-dyed carpets); deriving them again
/// would be redundant.
pub fn is_alternate_recipe(name: &str) -> bool {
    name.contains("from_") || (name.contains("dye_") && name.contains("_carpet"))
}

/// Derive every catalog entry into the asset tree.
///
/// Returns the number of textures written. Entry order does not affect
/// output content; every step overwrites its target, so re-running after
/// a partial failure is safe.
pub fn derive_textures(
    catalog: &[DerivedEntry],
    tree: &AssetTree,
    exceptions: &[(&str, &str)],
    denylist: &[&str],
) -> Result<usize, DeriveError> {
    info!("deriving {} partial textures", catalog.len());
    let mut count = 0;
    for entry in catalog {
        if denylist.contains(&entry.name.as_str()) {
            debug!("skipping denylisted entry {}", entry.name);
            continue;
        }
        if is_alternate_recipe(&entry.name) {
            debug!("skipping alternate recipe {}", entry.name);
            continue;
        }
        match derive_entry(entry, tree, exceptions) {
            Ok(true) => count += 1,
            Ok(false) => {}
            Err(err) if err.is_per_entry() => {
                warn!("skipping {}: {err}", entry.name);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(count)
}

fn derive_entry(
    entry: &DerivedEntry,
    tree: &AssetTree,
    exceptions: &[(&str, &str)],
) -> Result<bool, DeriveError> {
    match &entry.rule {
        DerivationRule::Direct { shape, base } => {
            crop_file(&tree.block_file(base), *shape, &tree.block_file(&entry.name))?;
            Ok(true)
        }
        DerivationRule::Copy { base } => {
            let dest = tree.block_file(&entry.name);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(tree.block_file(base), &dest)?;
            Ok(true)
        }
        DerivationRule::RecipeDerived { recipe } => {
            let Some(shape) = BlockShape::for_derived_name(&entry.name) else {
                debug!("skipping {}: no shape suffix", entry.name);
                return Ok(false);
            };
            let base = resolve_base(recipe, exceptions, |name| tree.texture_exists(name))?;
            crop_file(&tree.block_file(&base), shape, &tree.block_file(&entry.name))?;
            Ok(true)
        }
    }
}
