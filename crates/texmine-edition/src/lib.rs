// Edition pipelines
//
// Ties version resolution to asset acquisition and texture extraction.
// JavaEdition works from the Mojang version manifest and the client jar;
// BedrockEdition works from a sparse clone of the bedrock-samples
// repository. Both hand the acquired assets to texmine-texture.

pub mod bedrock_data;
pub mod bedrock_repo;
pub mod client_jar;
pub mod edition;
pub mod manifest;

pub use bedrock_data::BedrockDataClient;
pub use bedrock_repo::BedrockRepo;
pub use edition::{
    BedrockEdition, Edition, JavaEdition, TextureOptions, VersionRequest, edition_for,
};
pub use manifest::ManifestClient;
