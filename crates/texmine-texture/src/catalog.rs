// Derived-texture catalogs
//
// Static rule tables plus the per-edition catalog builders. Java derives
// its catalog from the crafting recipe files shipped in the client jar;
// Bedrock maps blocks.json block names through terrain_texture.json.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde_json::Value;
use walkdir::WalkDir;

use crate::derive::{DerivationRule, DerivedEntry, is_alternate_recipe};
use crate::error::DeriveError;
use crate::recipe::parse_recipe;
use crate::replicate::ReplicationRule;
use crate::shape::BlockShape;

/// Composite textures that reuse a differently-named base file. Consulted
/// in order; the first rewrite whose target texture exists wins.
pub const JAVA_TEXTURE_EXCEPTIONS: &[(&str, &str)] = &[
    ("smooth_quartz", "quartz_block_bottom"),
    ("smooth_sandstone", "sandstone_top"),
    ("smooth_red_sandstone", "red_sandstone_top"),
    ("smooth_stone", "smooth_stone_slab_side"),
];

pub const JAVA_REPLICATE_MAP: &[ReplicationRule] = &[
    ReplicationRule::copy("glass_pane_top", "glass_pane"),
    ReplicationRule::copy("red_stained_glass_pane_top", "red_glass_pane"),
    ReplicationRule::copy("orange_stained_glass_pane_top", "orange_glass_pane"),
    ReplicationRule::copy("yellow_stained_glass_pane_top", "yellow_glass_pane"),
    ReplicationRule::copy("lime_stained_glass_pane_top", "lime_glass_pane"),
    ReplicationRule::copy("green_stained_glass_pane_top", "green_glass_pane"),
    ReplicationRule::copy("cyan_stained_glass_pane_top", "cyan_glass_pane"),
    ReplicationRule::copy("light_blue_stained_glass_pane_top", "light_blue_glass_pane"),
    ReplicationRule::copy("blue_stained_glass_pane_top", "blue_glass_pane"),
    ReplicationRule::copy("purple_stained_glass_pane_top", "purple_glass_pane"),
    ReplicationRule::copy("magenta_stained_glass_pane_top", "magenta_glass_pane"),
    ReplicationRule::copy("pink_stained_glass_pane_top", "pink_glass_pane"),
    ReplicationRule::copy("black_stained_glass_pane_top", "black_glass_pane"),
    ReplicationRule::copy("brown_stained_glass_pane_top", "brown_glass_pane"),
];

pub const BEDROCK_REPLICATE_MAP: &[ReplicationRule] = &[
    ReplicationRule::copy("glass_pane_top", "glass_pane"),
    ReplicationRule::copy("glass_pane_top_red", "red_glass_pane"),
    ReplicationRule::copy("glass_pane_top_orange", "orange_glass_pane"),
    ReplicationRule::copy("glass_pane_top_yellow", "yellow_glass_pane"),
    ReplicationRule::copy("glass_pane_top_lime", "lime_glass_pane"),
    ReplicationRule::copy("glass_pane_top_green", "green_glass_pane"),
    ReplicationRule::copy("glass_pane_top_cyan", "cyan_glass_pane"),
    ReplicationRule::copy("glass_pane_top_light_blue", "light_blue_glass_pane"),
    ReplicationRule::copy("glass_pane_top_blue", "blue_glass_pane"),
    ReplicationRule::copy("glass_pane_top_purple", "purple_glass_pane"),
    ReplicationRule::copy("glass_pane_top_magenta", "magenta_glass_pane"),
    ReplicationRule::copy("glass_pane_top_pink", "pink_glass_pane"),
    ReplicationRule::copy("glass_pane_top_black", "black_glass_pane"),
    ReplicationRule::copy("glass_pane_top_brown", "brown_glass_pane"),
];

/// Bedrock block names that are not real textures.
pub const BEDROCK_DENYLIST: &[&str] = &["carpet"];

/// Build the Java derived-texture catalog from a directory of crafting
/// recipe JSON files. Products without a partial-block suffix, alternate
/// recipes, and re-dyed carpet recipes are skipped; recipes that fail to
/// parse are logged and dropped.
pub fn java_recipe_catalog(recipe_dir: &Path) -> Result<Vec<DerivedEntry>, DeriveError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(recipe_dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(product) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if is_alternate_recipe(product) {
            continue;
        }
        if BlockShape::for_derived_name(product).is_none() {
            continue;
        }
        let json = fs::read_to_string(path)?;
        match parse_recipe(&json) {
            Ok(recipe) => entries.push(DerivedEntry {
                name: product.to_string(),
                rule: DerivationRule::RecipeDerived { recipe },
            }),
            Err(err) => warn!("skipping recipe {product}: {err}"),
        }
    }
    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct TerrainTexture {
    texture_data: HashMap<String, TerrainEntry>,
}

#[derive(Debug, Deserialize)]
struct TerrainEntry {
    textures: TextureRef,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextureRef {
    One(TexturePath),
    Many(Vec<TexturePath>),
}

/// A texture path, either bare or wrapped in an object with tint data.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TexturePath {
    Plain(String),
    Tinted { path: String },
}

impl TexturePath {
    fn path(&self) -> &str {
        match self {
            TexturePath::Plain(path) | TexturePath::Tinted { path } => path,
        }
    }
}

impl TerrainEntry {
    /// First texture file of the entry, relative to the blocks directory.
    fn filename(&self) -> Option<&str> {
        let raw = match &self.textures {
            TextureRef::One(path) => path.path(),
            TextureRef::Many(paths) => paths.first()?.path(),
        };
        Some(raw.strip_prefix("textures/blocks/").unwrap_or(raw))
    }
}

/// A blocks.json texture identifier: one id for all faces, or a per-face
/// map (the side face is the one partial blocks reuse).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlockTextures {
    Uniform(String),
    Faces(HashMap<String, String>),
}

impl BlockTextures {
    fn identifier(&self) -> Option<&str> {
        match self {
            BlockTextures::Uniform(id) => Some(id),
            BlockTextures::Faces(faces) => faces.get("side").map(String::as_str),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BlockEntry {
    #[serde(default)]
    textures: Option<BlockTextures>,
}

/// Build the Bedrock derived-texture catalog from blocks.json and
/// terrain_texture.json. Slabs and stairs resolve their base through the
/// terrain table; carpets map onto the colored wool textures; waxed copper
/// variants are plain copies of their unwaxed base.
pub fn bedrock_catalog(blocks: &Value, terrain: &Value) -> Result<Vec<DerivedEntry>, DeriveError> {
    let terrain: TerrainTexture = serde_json::from_value(terrain.clone())
        .map_err(|err| DeriveError::Metadata(format!("terrain_texture.json: {err}")))?;
    let Some(blocks) = blocks.as_object() else {
        return Err(DeriveError::Metadata(
            "blocks.json is not an object".to_string(),
        ));
    };

    let mut entries = Vec::new();
    for (name, value) in blocks {
        if name.contains("slab") && !name.contains("double_slab") {
            push_terrain_entry(&mut entries, name, value, &terrain, BlockShape::Slab);
        } else if name.contains("stairs") {
            push_terrain_entry(&mut entries, name, value, &terrain, BlockShape::Stair);
        } else if name.contains("carpet") && !name.contains("moss") {
            let color = name.trim_end_matches("_carpet").replace("light_gray", "silver");
            entries.push(DerivedEntry {
                name: name.clone(),
                rule: DerivationRule::Direct {
                    shape: BlockShape::Carpet,
                    base: format!("wool_colored_{color}"),
                },
            });
        } else if name.contains("copper") && name.contains("waxed") {
            push_copper_entries(&mut entries, name);
        }
    }
    Ok(entries)
}

fn push_terrain_entry(
    entries: &mut Vec<DerivedEntry>,
    name: &str,
    value: &Value,
    terrain: &TerrainTexture,
    shape: BlockShape,
) {
    let entry: BlockEntry = match serde_json::from_value(value.clone()) {
        Ok(entry) => entry,
        Err(err) => {
            warn!("skipping {name}: unreadable blocks.json entry: {err}");
            return;
        }
    };
    let Some(identifier) = entry.textures.as_ref().and_then(BlockTextures::identifier) else {
        warn!("skipping {name}: no usable texture identifier");
        return;
    };
    let Some(base) = terrain
        .texture_data
        .get(identifier)
        .and_then(TerrainEntry::filename)
    else {
        warn!("skipping {name}: identifier {identifier:?} not in terrain_texture.json");
        return;
    };
    entries.push(DerivedEntry {
        name: prefixed_name(name, base),
        rule: DerivationRule::Direct {
            shape,
            base: base.to_string(),
        },
    });
}

/// Waxed copper blocks reuse the unwaxed texture. Doors are copied as
/// their separate top and bottom halves.
fn push_copper_entries(entries: &mut Vec<DerivedEntry>, name: &str) {
    let base = name.replace("waxed_", "");
    if name.contains("_door") {
        for half in ["top", "bottom"] {
            entries.push(DerivedEntry {
                name: format!("{name}_{half}"),
                rule: DerivationRule::Copy {
                    base: format!("{base}_{half}"),
                },
            });
        }
        return;
    }
    let base = if base == "copper" {
        "copper_block".to_string()
    } else {
        base
    };
    entries.push(DerivedEntry {
        name: name.to_string(),
        rule: DerivationRule::Copy { base },
    });
}

/// Derived textures land in the same subdirectory as their base.
fn prefixed_name(name: &str, base: &str) -> String {
    match base.split_once('/') {
        Some((sub, _)) => format!("{sub}/{name}"),
        None => name.to_string(),
    }
}
