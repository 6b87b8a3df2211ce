use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use serde::Deserialize;

/// Matches plain `major.minor.patch` releases; qualifiers such as `-RC1` and
/// zero-padded components such as `3.02.9` are rejected.
static RELEASE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)$").unwrap()
});

static LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0|[1-9]\d*)\.(0|[1-9]\d*)$").unwrap());

/// A `major.minor` release line (e.g. "3.2")
///
/// Ordered numerically, so "3.10" sorts after "3.9".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ReleaseLine {
    pub major: u64,
    pub minor: u64,
}

impl ReleaseLine {
    pub fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// The line a release belongs to
    pub fn of(version: &Version) -> Self {
        Self::new(version.major, version.minor)
    }
}

impl fmt::Display for ReleaseLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid release line {0:?}: expected \"major.minor\"")]
pub struct InvalidReleaseLine(pub String);

impl FromStr for ReleaseLine {
    type Err = InvalidReleaseLine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidReleaseLine(s.to_string());
        let caps = LINE_PATTERN.captures(s).ok_or_else(invalid)?;
        let major = caps[1].parse().map_err(|_| invalid())?;
        let minor = caps[2].parse().map_err(|_| invalid())?;
        Ok(Self::new(major, minor))
    }
}

impl TryFrom<String> for ReleaseLine {
    type Error = InvalidReleaseLine;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse a strict `major.minor.patch` release identifier.
///
/// Returns None for anything carrying a pre-release or build qualifier,
/// fewer or more than three components, zero-padded components, or
/// components that overflow u64. A parsed release therefore always renders
/// back to the exact input text.
///
/// Examples:
/// - "3.2.10" -> Some(Version(3, 2, 10))
/// - "3.2.0-RC1" -> None
/// - "3.2" -> None
pub fn parse_release(version: &str) -> Option<Version> {
    let caps = RELEASE_PATTERN.captures(version)?;
    let major = caps[1].parse().ok()?;
    let minor = caps[2].parse().ok()?;
    let patch = caps[3].parse().ok()?;
    Some(Version::new(major, minor, patch))
}
