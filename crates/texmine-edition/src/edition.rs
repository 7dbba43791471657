// Edition pipelines
//
// One pipeline per edition, behind the Edition trait: resolve the
// requested version, acquire its assets, run derivation, and post-process
// the output tree. Scratch files live in a temp directory that is dropped
// when the pipeline finishes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::info;
use tempfile::TempDir;

use texmine_texture::{
    AssetTree, BEDROCK_DENYLIST, BEDROCK_REPLICATE_MAP, JAVA_REPLICATE_MAP,
    JAVA_TEXTURE_EXCEPTIONS, ReplicationRule, bedrock_catalog, derive_textures,
    java_recipe_catalog, replicate,
    tree::{filter_textures, merge_dirs, scale_textures, simplify_structure},
};
use texmine_version::{EditionKind, VersionKind, latest, parse};

use crate::bedrock_data::BedrockDataClient;
use crate::bedrock_repo::BedrockRepo;
use crate::client_jar::{download_client_jar, extract_jar};
use crate::manifest::ManifestClient;

/// Which version a pipeline should extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    Latest(VersionKind),
    Exact(String),
}

/// Output post-processing knobs.
#[derive(Debug, Clone)]
pub struct TextureOptions {
    /// Nearest-neighbour upscale factor applied to every texture.
    pub scale_factor: u32,
    /// Merge blocks/ and items/ into a single flat directory.
    pub do_merge: bool,
    /// Crop oversized sheets (animation strips) down to 16x16.
    pub do_crop: bool,
    /// Derive partial-block textures (slabs, stairs, carpets, ...).
    pub do_partials: bool,
    /// Apply the per-edition replication map.
    pub do_replicate: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            scale_factor: 100,
            do_merge: false,
            do_crop: true,
            do_partials: true,
            do_replicate: true,
        }
    }
}

/// A Minecraft edition the extractor knows how to pull textures from.
pub trait Edition {
    fn kind(&self) -> EditionKind;

    /// Resolve a request to a concrete version identifier.
    fn resolve_version(&self, request: &VersionRequest) -> Result<String>;

    /// Extract the textures for a request into `output`. Returns the
    /// resolved version identifier.
    fn get_textures(
        &self,
        request: &VersionRequest,
        output: &Path,
        options: &TextureOptions,
    ) -> Result<String>;
}

/// Java edition: Mojang version manifest plus the client jar.
pub struct JavaEdition {
    manifest: ManifestClient,
}

impl JavaEdition {
    pub fn new() -> Result<Self> {
        Ok(Self {
            manifest: ManifestClient::new()?,
        })
    }
}

impl Edition for JavaEdition {
    fn kind(&self) -> EditionKind {
        EditionKind::Java
    }

    fn resolve_version(&self, request: &VersionRequest) -> Result<String> {
        match request {
            VersionRequest::Latest(kind) => {
                let manifest = self.manifest.manifest()?;
                let ids: Vec<&str> = manifest.versions.iter().map(|v| v.id.as_str()).collect();
                let best = latest(ids, EditionKind::Java, Some(*kind))
                    .with_context(|| format!("no {kind} version in manifest"))?;
                Ok(best.to_string())
            }
            VersionRequest::Exact(raw) => {
                parse(raw, EditionKind::Java, None)?;
                // The manifest id is authoritative; reject versions it
                // does not list.
                Ok(self.manifest.find(raw)?.id)
            }
        }
    }

    fn get_textures(
        &self,
        request: &VersionRequest,
        output: &Path,
        options: &TextureOptions,
    ) -> Result<String> {
        let version = self.resolve_version(request)?;
        info!("extracting java {version}");

        let scratch = TempDir::new().context("creating scratch directory")?;
        let jar = download_client_jar(&self.manifest, &version, scratch.path())?;
        let unpacked = scratch.path().join("unpacked");
        extract_jar(&jar, &unpacked)?;

        let textures = unpacked.join("assets/minecraft/textures");
        if !textures.is_dir() {
            bail!("{version} jar has no texture directory");
        }

        if options.do_partials {
            let catalog = java_recipe_catalog(&unpacked.join("data/minecraft/recipe"))?;
            let raw_tree = AssetTree::new(&textures, "block");
            let derived = derive_textures(&catalog, &raw_tree, JAVA_TEXTURE_EXCEPTIONS, &[])?;
            info!("derived {derived} partial textures");
        }

        filter_textures(&textures.join("block"), &textures.join("item"), output)?;
        finish_tree(
            output,
            if options.do_replicate {
                JAVA_REPLICATE_MAP
            } else {
                &[]
            },
            options,
        )?;
        Ok(version)
    }
}

/// Bedrock edition: tagged checkouts of the bedrock-samples repository.
pub struct BedrockEdition;

impl BedrockEdition {
    pub fn new() -> Self {
        Self
    }

    fn resolve_tag(&self, repo: &BedrockRepo, request: &VersionRequest) -> Result<String> {
        match request {
            VersionRequest::Latest(kind) => {
                let tags = repo.tags()?;
                let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
                let best = latest(refs, EditionKind::Bedrock, Some(*kind))
                    .with_context(|| format!("no {kind} tag in bedrock-samples"))?;
                Ok(best.to_string())
            }
            VersionRequest::Exact(raw) => bedrock_tag(raw),
        }
    }
}

impl Default for BedrockEdition {
    fn default() -> Self {
        Self::new()
    }
}

impl Edition for BedrockEdition {
    fn kind(&self) -> EditionKind {
        EditionKind::Bedrock
    }

    fn resolve_version(&self, request: &VersionRequest) -> Result<String> {
        match request {
            VersionRequest::Latest(_) => {
                let scratch = TempDir::new().context("creating scratch directory")?;
                let repo = BedrockRepo::clone_into(scratch.path())?;
                self.resolve_tag(&repo, request)
            }
            VersionRequest::Exact(raw) => bedrock_tag(raw),
        }
    }

    fn get_textures(
        &self,
        request: &VersionRequest,
        output: &Path,
        options: &TextureOptions,
    ) -> Result<String> {
        let scratch = TempDir::new().context("creating scratch directory")?;
        let repo = BedrockRepo::clone_into(scratch.path())?;
        let tag = self.resolve_tag(&repo, request)?;
        info!("extracting bedrock {tag}");
        repo.checkout(&tag)?;

        let textures = repo.resource_pack().join("textures");
        filter_textures(&textures.join("blocks"), &textures.join("items"), output)?;
        simplify_structure(output)?;

        if options.do_partials {
            let kind = parse(&tag, EditionKind::Bedrock, None)?.kind();
            let data = BedrockDataClient::new(kind)?;
            let catalog = bedrock_catalog(&data.blocks()?, &data.terrain_texture()?)?;
            let tree = AssetTree::new(output, "blocks");
            let derived = derive_textures(&catalog, &tree, &[], BEDROCK_DENYLIST)?;
            info!("derived {derived} partial textures");
        }

        finish_tree(
            output,
            if options.do_replicate {
                BEDROCK_REPLICATE_MAP
            } else {
                &[]
            },
            options,
        )?;
        Ok(tag)
    }
}

/// Build the pipeline for an edition.
pub fn edition_for(kind: EditionKind) -> Result<Box<dyn Edition>> {
    Ok(match kind {
        EditionKind::Java => Box::new(JavaEdition::new()?),
        EditionKind::Bedrock => Box::new(BedrockEdition::new()),
    })
}

/// Shared output tail: replicate, scale, optionally merge.
fn finish_tree(
    output: &Path,
    replicate_rules: &[ReplicationRule],
    options: &TextureOptions,
) -> Result<()> {
    if !replicate_rules.is_empty() {
        let copied = replicate(output, replicate_rules)?;
        info!("replicated {copied} textures");
    }
    scale_textures(output, options.scale_factor, options.do_crop)?;
    if options.do_merge {
        merge_dirs(output)?;
    }
    Ok(())
}

/// Canonical bedrock-samples tag for a raw version string, with or
/// without the leading `v`.
fn bedrock_tag(raw: &str) -> Result<String> {
    parse(raw, EditionKind::Bedrock, None)?;
    if raw.starts_with('v') {
        Ok(raw.to_string())
    } else {
        Ok(format!("v{raw}"))
    }
}
