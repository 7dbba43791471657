// Version string parsing
//
// Surface forms per edition:
//   Java:    "1.21", "1.21.1", "24w34a", "1.21-pre2", "1.21.1-rc1"
//   Bedrock: "v1.21.0.3", "v1.21.0.20-preview" (leading "v" optional on input)

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static JAVA_RELEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").expect("valid regex"));
static JAVA_SNAPSHOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})w(\d{2})([a-z])$").expect("valid regex"));
static JAVA_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?-(pre|rc)(\d+)$").expect("valid regex"));
static BEDROCK_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v(\d+)\.(\d{2})\.(\d{1,2})\.(\d{1,2})(-preview)?$").expect("valid regex")
});

/// Minecraft edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditionKind {
    Java,
    Bedrock,
}

impl fmt::Display for EditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditionKind::Java => write!(f, "java"),
            EditionKind::Bedrock => write!(f, "bedrock"),
        }
    }
}

/// Release channel of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionKind {
    Stable,
    /// Snapshot, pre-release, release candidate, or preview.
    Experimental,
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionKind::Stable => write!(f, "stable"),
            VersionKind::Experimental => write!(f, "experimental"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("unrecognized {edition} version string: {input:?}")]
    Parse { edition: EditionKind, input: String },

    #[error("{input:?} does not match any known version format")]
    Invalid { input: String },

    #[error("no usable version candidate in the list")]
    NoCandidate,
}

/// Pre-release stage of a Java candidate build. Ordering matters:
/// a release candidate comes after a pre-release of the same version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Pre = 0,
    Rc = 1,
}

/// Parsed Java edition version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaSpec {
    Release {
        major: u32,
        minor: u32,
        patch: u32,
    },
    Candidate {
        major: u32,
        minor: u32,
        patch: u32,
        stage: Stage,
        index: u32,
    },
    /// Weekly snapshot, e.g. "24w34a". `letter` is the zero-based index of
    /// the trailing letter within the week.
    Snapshot {
        year: u32,
        week: u32,
        letter: u32,
    },
}

/// Parsed Bedrock edition version. Stable and preview builds share the
/// same 4-number shape; previews carry a `-preview` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BedrockSpec {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub revision: u32,
    pub preview: bool,
}

/// A parsed, immutable, comparable version. Values of different editions
/// are never ordered against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionSpec {
    Java(JavaSpec),
    Bedrock(BedrockSpec),
}

impl VersionSpec {
    pub fn edition(&self) -> EditionKind {
        match self {
            VersionSpec::Java(_) => EditionKind::Java,
            VersionSpec::Bedrock(_) => EditionKind::Bedrock,
        }
    }

    pub fn kind(&self) -> VersionKind {
        match self {
            VersionSpec::Java(JavaSpec::Release { .. }) => VersionKind::Stable,
            VersionSpec::Java(_) => VersionKind::Experimental,
            VersionSpec::Bedrock(spec) if spec.preview => VersionKind::Experimental,
            VersionSpec::Bedrock(_) => VersionKind::Stable,
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            VersionSpec::Java(JavaSpec::Release {
                major,
                minor,
                patch,
            }) => {
                if patch == 0 {
                    write!(f, "{major}.{minor}")
                } else {
                    write!(f, "{major}.{minor}.{patch}")
                }
            }
            VersionSpec::Java(JavaSpec::Candidate {
                major,
                minor,
                patch,
                stage,
                index,
            }) => {
                if patch == 0 {
                    write!(f, "{major}.{minor}")?;
                } else {
                    write!(f, "{major}.{minor}.{patch}")?;
                }
                match stage {
                    Stage::Pre => write!(f, "-pre{index}"),
                    Stage::Rc => write!(f, "-rc{index}"),
                }
            }
            VersionSpec::Java(JavaSpec::Snapshot { year, week, letter }) => {
                let letter = char::from(b'a' + letter as u8);
                write!(f, "{year:02}w{week:02}{letter}")
            }
            VersionSpec::Bedrock(BedrockSpec {
                major,
                minor,
                patch,
                revision,
                preview,
            }) => {
                write!(f, "v{major}.{minor:02}.{patch}.{revision}")?;
                if preview {
                    write!(f, "-preview")?;
                }
                Ok(())
            }
        }
    }
}

/// Parse a raw version string for one edition. `required` rejects strings
/// that parse but belong to the other release channel.
pub fn parse(
    raw: &str,
    edition: EditionKind,
    required: Option<VersionKind>,
) -> Result<VersionSpec, VersionError> {
    let spec = match edition {
        EditionKind::Java => parse_java(raw),
        EditionKind::Bedrock => parse_bedrock(raw),
    };
    let spec = spec.ok_or_else(|| VersionError::Parse {
        edition,
        input: raw.to_string(),
    })?;
    if let Some(kind) = required {
        if spec.kind() != kind {
            return Err(VersionError::Parse {
                edition,
                input: raw.to_string(),
            });
        }
    }
    Ok(spec)
}

fn parse_java(raw: &str) -> Option<VersionSpec> {
    if let Some(caps) = JAVA_RELEASE.captures(raw) {
        return Some(VersionSpec::Java(JavaSpec::Release {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            patch: caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).ok()?,
        }));
    }
    if let Some(caps) = JAVA_CANDIDATE.captures(raw) {
        let stage = match &caps[4] {
            "pre" => Stage::Pre,
            _ => Stage::Rc,
        };
        return Some(VersionSpec::Java(JavaSpec::Candidate {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            patch: caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).ok()?,
            stage,
            index: caps[5].parse().ok()?,
        }));
    }
    if let Some(caps) = JAVA_SNAPSHOT.captures(raw) {
        let letter = caps[3].bytes().next()? - b'a';
        return Some(VersionSpec::Java(JavaSpec::Snapshot {
            year: caps[1].parse().ok()?,
            week: caps[2].parse().ok()?,
            letter: u32::from(letter),
        }));
    }
    None
}

fn parse_bedrock(raw: &str) -> Option<VersionSpec> {
    // Bedrock tags all start with a literal "v"; tolerate its absence.
    let prefixed;
    let tag = if raw.starts_with('v') {
        raw
    } else {
        prefixed = format!("v{raw}");
        &prefixed
    };
    let caps = BEDROCK_VERSION.captures(tag)?;
    Some(VersionSpec::Bedrock(BedrockSpec {
        major: caps[1].parse().ok()?,
        minor: caps[2].parse().ok()?,
        patch: caps[3].parse().ok()?,
        revision: caps[4].parse().ok()?,
        preview: caps.get(5).is_some(),
    }))
}
