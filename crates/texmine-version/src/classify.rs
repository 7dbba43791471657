// Edition and channel classification
//
// Pure dispatch over the parser. With no edition hint the string is tried
// against Java first, then Bedrock (with its optional leading "v"), which
// is how the CLI auto-detects the edition from a bare version argument.

use crate::spec::{EditionKind, VersionError, VersionKind, parse};

/// Classify a raw version string as (edition, channel).
///
/// `edition` restricts matching to one family; without it the first family
/// to parse wins. `VersionError::Invalid` when nothing matches.
pub fn classify(
    raw: &str,
    edition: Option<EditionKind>,
) -> Result<(EditionKind, VersionKind), VersionError> {
    let order: &[EditionKind] = match edition {
        Some(EditionKind::Java) => &[EditionKind::Java],
        Some(EditionKind::Bedrock) => &[EditionKind::Bedrock],
        None => &[EditionKind::Java, EditionKind::Bedrock],
    };
    for &family in order {
        if let Ok(spec) = parse(raw, family, None) {
            return Ok((family, spec.kind()));
        }
    }
    Err(VersionError::Invalid {
        input: raw.to_string(),
    })
}
