// texmine — Minecraft texture extractor.
//
// Resolves a version (exact, or the latest of a release channel), pulls
// its assets, derives the partial-block textures the game ships no art
// for, and writes the scaled result to an output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info, warn};

use texmine_edition::{TextureOptions, VersionRequest, edition_for};
use texmine_version::{EditionKind, VersionKind, classify};

#[derive(Parser, Debug)]
#[command(name = "texmine", about = "Extract and derive Minecraft block/item textures")]
struct Args {
    /// Version to extract: an exact version ("1.21", "24w34a",
    /// "v1.21.0.3"), or "stable" / "experimental" for the latest of
    /// that channel. Defaults to the latest stable version.
    version: Option<String>,

    /// Extract from Java edition.
    #[arg(short = 'j', long, conflicts_with = "bedrock")]
    java: bool,

    /// Extract from Bedrock edition.
    #[arg(short = 'b', long)]
    bedrock: bool,

    /// Output directory.
    #[arg(short, long, default_value = "textures")]
    output: PathBuf,

    /// Integer upscale factor applied to every texture.
    #[arg(long, default_value_t = 100)]
    scale: u32,

    /// Merge block and item textures into a single flat directory.
    #[arg(long)]
    flatten: bool,

    /// Skip deriving partial-block textures (slabs, stairs, carpets, ...).
    #[arg(long)]
    no_partials: bool,

    /// Skip the replicated texture aliases (glass panes).
    #[arg(long)]
    no_replicate: bool,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let (edition_kind, request) = resolve_request(&args)?;
    let options = TextureOptions {
        scale_factor: args.scale,
        do_merge: args.flatten,
        do_partials: !args.no_partials,
        do_replicate: !args.no_replicate,
        ..TextureOptions::default()
    };

    let edition = edition_for(edition_kind)?;
    let version = edition
        .get_textures(&request, &args.output, &options)
        .with_context(|| format!("extracting {edition_kind} textures"))?;
    info!(
        "done: {edition_kind} {version} -> {}",
        args.output.display()
    );
    Ok(())
}

/// Work out which edition and version the arguments ask for.
///
/// An explicit -j/-b flag wins; otherwise the edition is inferred from
/// the version string's shape, with Java as the fallback.
fn resolve_request(args: &Args) -> Result<(EditionKind, VersionRequest)> {
    let flag_edition = if args.java {
        Some(EditionKind::Java)
    } else if args.bedrock {
        Some(EditionKind::Bedrock)
    } else {
        None
    };

    let request = match args.version.as_deref() {
        None | Some("stable") => VersionRequest::Latest(VersionKind::Stable),
        Some("experimental") => VersionRequest::Latest(VersionKind::Experimental),
        Some(raw) => VersionRequest::Exact(raw.to_string()),
    };

    let edition = match (&request, flag_edition) {
        (_, Some(edition)) => edition,
        (VersionRequest::Exact(raw), None) => match classify(raw, None) {
            Ok((edition, _)) => edition,
            Err(err) => {
                warn!("{err}; assuming java");
                EditionKind::Java
            }
        },
        (VersionRequest::Latest(_), None) => EditionKind::Java,
    };
    Ok((edition, request))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(argv: &[&str]) -> Args {
        Args::parse_from(argv)
    }

    #[test]
    fn defaults_to_latest_stable_java() {
        let args = parse_args(&["texmine"]);
        let (edition, request) = resolve_request(&args).unwrap();
        assert_eq!(edition, EditionKind::Java);
        assert_eq!(request, VersionRequest::Latest(VersionKind::Stable));
    }

    #[test]
    fn channel_keywords_select_the_channel() {
        let args = parse_args(&["texmine", "experimental", "-b"]);
        let (edition, request) = resolve_request(&args).unwrap();
        assert_eq!(edition, EditionKind::Bedrock);
        assert_eq!(request, VersionRequest::Latest(VersionKind::Experimental));
    }

    #[test]
    fn edition_is_inferred_from_the_version_shape() {
        let args = parse_args(&["texmine", "v1.21.0.3"]);
        let (edition, _) = resolve_request(&args).unwrap();
        assert_eq!(edition, EditionKind::Bedrock);

        let args = parse_args(&["texmine", "24w34a"]);
        let (edition, _) = resolve_request(&args).unwrap();
        assert_eq!(edition, EditionKind::Java);
    }

    #[test]
    fn explicit_flag_beats_inference() {
        let args = parse_args(&["texmine", "1.21", "-b"]);
        let (edition, request) = resolve_request(&args).unwrap();
        assert_eq!(edition, EditionKind::Bedrock);
        assert_eq!(request, VersionRequest::Exact("1.21".to_string()));
    }

    #[test]
    fn conflicting_edition_flags_are_rejected() {
        assert!(Args::try_parse_from(["texmine", "-j", "-b"]).is_err());
    }
}
