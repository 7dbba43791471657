// Texture derivation engine
//
// Generates the texture variants the game ships no standalone art for:
// shape-cropped partial blocks (slabs, stairs, carpets, snow, glass panes),
// replicated aliases, and recipe-derived composites. Also carries the
// asset-tree utilities (filter, scale, merge) the extraction pipeline runs
// around the derivation step.

pub mod catalog;
pub mod derive;
pub mod error;
pub mod recipe;
pub mod replicate;
pub mod shape;
pub mod tree;

pub use catalog::{
    BEDROCK_DENYLIST, BEDROCK_REPLICATE_MAP, JAVA_REPLICATE_MAP, JAVA_TEXTURE_EXCEPTIONS,
    bedrock_catalog, java_recipe_catalog,
};
pub use derive::{DerivationRule, DerivedEntry, derive_textures};
pub use error::DeriveError;
pub use recipe::{RecipeIngredients, parse_recipe, resolve_base};
pub use replicate::{ReplicationRule, replicate};
pub use shape::{BlockShape, crop, crop_file};
pub use tree::AssetTree;
