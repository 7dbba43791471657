// Version resolution for Minecraft release identifiers
//
// Parses the two release-naming schemes (Java and Bedrock), classifies
// strings as stable/experimental, and provides a strict order used to pick
// the latest version out of a raw candidate list (git tags, manifest ids).

pub mod classify;
pub mod compare;
pub mod spec;

pub use classify::classify;
pub use compare::{is_after, latest};
pub use spec::{
    BedrockSpec, EditionKind, JavaSpec, Stage, VersionError, VersionKind, VersionSpec, parse,
};
