//! Picks the highest plain release of each tracked release line

use std::collections::{BTreeMap, BTreeSet};

use semver::Version;
use tracing::debug;

use crate::version::semver::{ReleaseLine, parse_release};

/// Highest release per tracked line, iterated in ascending line order
pub type SelectedReleases = BTreeMap<ReleaseLine, Version>;

/// Reduce raw version strings to one highest release per tracked line.
///
/// Strings that are not strict `major.minor.patch` releases are dropped, as
/// are releases whose line is not tracked. A tracked line without any
/// qualifying release is absent from the result.
pub fn select_latest_per_line(
    versions: &[String],
    tracked_lines: &BTreeSet<ReleaseLine>,
) -> SelectedReleases {
    let mut selected = SelectedReleases::new();

    for version in versions.iter().filter_map(|v| parse_release(v)) {
        let line = ReleaseLine::of(&version);
        if !tracked_lines.contains(&line) {
            continue;
        }

        if selected.get(&line).is_none_or(|current| *current < version) {
            selected.insert(line, version);
        }
    }

    for (line, version) in &selected {
        debug!("Selected {} for release line {}", version, line);
    }

    selected
}
