// Version ordering
//
// Strict total order within each edition. Versions of different editions
// are incomparable. The order is used to pick the latest version of a
// release channel out of a raw identifier list.

use std::cmp::Ordering;

use log::debug;

use crate::spec::{
    BedrockSpec, EditionKind, JavaSpec, VersionError, VersionKind, VersionSpec, parse,
};

impl JavaSpec {
    /// Sort key: (track, a, b, c, stage rank, stage index).
    ///
    /// Track 1 is the snapshot channel; a snapshot postdates any versioned
    /// build it appears next to, since snapshots belong to the following
    /// development cycle. Within track 0, equal (major, minor, patch)
    /// triplets order stable > rc > pre, then by stage index; differing
    /// triplets are decided by the triplet alone.
    fn sort_key(&self) -> (u8, u32, u32, u32, u8, u32) {
        match *self {
            JavaSpec::Release {
                major,
                minor,
                patch,
            } => (0, major, minor, patch, 2, 0),
            JavaSpec::Candidate {
                major,
                minor,
                patch,
                stage,
                index,
            } => (0, major, minor, patch, stage as u8, index),
            JavaSpec::Snapshot { year, week, letter } => (1, year, week, letter, 0, 0),
        }
    }
}

impl Ord for JavaSpec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for JavaSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl BedrockSpec {
    /// Lexicographic on the 4-number tuple; for an equal tuple the stable
    /// build comes after its preview.
    fn sort_key(&self) -> (u32, u32, u32, u32, u8) {
        let stable_rank = if self.preview { 0 } else { 1 };
        (
            self.major,
            self.minor,
            self.patch,
            self.revision,
            stable_rank,
        )
    }
}

impl Ord for BedrockSpec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for BedrockSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialOrd for VersionSpec {
    /// `None` for cross-edition comparisons.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (VersionSpec::Java(a), VersionSpec::Java(b)) => Some(a.cmp(b)),
            (VersionSpec::Bedrock(a), VersionSpec::Bedrock(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Whether `candidate` is strictly after `reference`. False for equal
/// versions and for cross-edition pairs.
pub fn is_after(candidate: &VersionSpec, reference: &VersionSpec) -> bool {
    candidate.partial_cmp(reference) == Some(Ordering::Greater)
}

/// Scan raw identifiers and return the latest one of the requested channel.
///
/// Unparseable entries are skipped rather than failing the scan; an empty
/// or fully-unparseable list is `VersionError::NoCandidate`.
pub fn latest<'a, I>(
    candidates: I,
    edition: EditionKind,
    kind: Option<VersionKind>,
) -> Result<&'a str, VersionError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, VersionSpec)> = None;
    for raw in candidates {
        let spec = match parse(raw, edition, kind) {
            Ok(spec) => spec,
            Err(_) => {
                debug!("skipping candidate {raw:?}: not a {edition} version");
                continue;
            }
        };
        let replace = match &best {
            Some((_, current)) => is_after(&spec, current),
            None => true,
        };
        if replace {
            best = Some((raw, spec));
        }
    }
    best.map(|(raw, _)| raw).ok_or(VersionError::NoCandidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn java(raw: &str) -> VersionSpec {
        parse(raw, EditionKind::Java, None).unwrap()
    }

    fn bedrock(raw: &str) -> VersionSpec {
        parse(raw, EditionKind::Bedrock, None).unwrap()
    }

    fn after(a: &str, b: &str) -> bool {
        is_after(&java(a), &java(b))
    }

    #[test]
    fn is_after_is_irreflexive() {
        for raw in ["1.21", "1.21.1", "24w34a", "1.21-pre1", "1.21-rc2"] {
            assert!(!after(raw, raw), "{raw} must not be after itself");
        }
        let b = bedrock("v1.21.0.3");
        assert!(!is_after(&b, &b));
    }

    #[test]
    fn stable_ordering_is_lexicographic() {
        assert!(after("1.21", "1.20"));
        assert!(after("1.21.1", "1.21"));
        assert!(after("2.0", "1.99.9"));
        assert!(!after("1.20", "1.21"));
        assert!(!after("1.21", "1.21.1"));
    }

    #[test]
    fn stable_beats_rc_beats_pre() {
        assert!(after("1.21", "1.21-rc1"));
        assert!(after("1.21-rc1", "1.21-pre1"));
        assert!(after("1.21-rc2", "1.21-rc1"));
        assert!(after("1.21-pre3", "1.21-pre1"));
        assert!(!after("1.21-pre1", "1.21"));
    }

    #[test]
    fn stage_is_ignored_across_triplets() {
        assert!(after("1.21.1-pre1", "1.21"));
        assert!(after("1.21.1-pre1", "1.21-rc9"));
        assert!(!after("1.21-rc9", "1.21.1-pre1"));
    }

    #[test]
    fn snapshot_ordering() {
        assert!(after("24w34b", "24w34a"));
        assert!(after("24w35a", "24w34c"));
        assert!(after("25w01a", "24w52b"));
        assert!(!after("24w34a", "24w34b"));
    }

    #[test]
    fn exactly_one_direction_holds_for_distinct_versions() {
        let raws = [
            "1.20", "1.21", "1.21.1", "1.21-pre1", "1.21-pre2", "1.21-rc1", "24w34a", "24w34b",
        ];
        for a in raws {
            for b in raws {
                if a == b {
                    continue;
                }
                assert!(
                    after(a, b) ^ after(b, a),
                    "exactly one of ({a}, {b}) must be after the other"
                );
            }
        }
    }

    #[test]
    fn bedrock_ordering() {
        assert!(is_after(&bedrock("v1.21.0.3"), &bedrock("v1.21.0.2")));
        assert!(is_after(&bedrock("v1.21.10.1"), &bedrock("v1.21.0.3")));
        // The stable build of the same 4-tuple is after its preview.
        assert!(is_after(
            &bedrock("v1.21.0.3"),
            &bedrock("v1.21.0.3-preview")
        ));
    }

    #[test]
    fn cross_edition_is_incomparable() {
        assert!(!is_after(&java("1.21"), &bedrock("v1.20.0.1")));
        assert!(!is_after(&bedrock("v1.20.0.1"), &java("1.21")));
    }

    #[test]
    fn latest_picks_maximum_per_channel() {
        let candidates = ["1.20", "1.21", "1.21-rc1", "24w34a"];
        assert_eq!(
            latest(candidates, EditionKind::Java, Some(VersionKind::Stable)),
            Ok("1.21")
        );
        assert_eq!(
            latest(
                candidates,
                EditionKind::Java,
                Some(VersionKind::Experimental)
            ),
            Ok("24w34a")
        );
    }

    #[test]
    fn latest_skips_unparseable_candidates() {
        let candidates = ["not-a-version", "1.20.1", "also nonsense"];
        assert_eq!(
            latest(candidates, EditionKind::Java, None),
            Ok("1.20.1")
        );
    }

    #[test]
    fn latest_fails_on_empty_or_useless_lists() {
        assert_eq!(
            latest([], EditionKind::Java, None),
            Err(VersionError::NoCandidate)
        );
        assert_eq!(
            latest(["garbage"], EditionKind::Bedrock, None),
            Err(VersionError::NoCandidate)
        );
    }

    #[test]
    fn latest_over_bedrock_tags() {
        let tags = [
            "v1.20.80.5",
            "v1.21.0.3",
            "v1.21.0.20-preview",
            "v1.21.10.2-preview",
        ];
        assert_eq!(
            latest(tags, EditionKind::Bedrock, Some(VersionKind::Stable)),
            Ok("v1.21.0.3")
        );
        assert_eq!(
            latest(tags, EditionKind::Bedrock, Some(VersionKind::Experimental)),
            Ok("v1.21.10.2-preview")
        );
    }
}
