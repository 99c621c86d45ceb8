use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Distribution track a version was published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Release,
    Snapshot,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Release, Channel::Snapshot];

    /// Path segment under the repository base URL.
    pub fn repository_path(&self) -> &'static str {
        match self {
            Channel::Release => "releases",
            Channel::Snapshot => "snapshots",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::Release => "Release",
            Channel::Snapshot => "Snapshot",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "release" | "releases" => Ok(Channel::Release),
            "snapshot" | "snapshots" => Ok(Channel::Snapshot),
            other => Err(format!(
                "Unknown channel '{}', expected 'release' or 'snapshot'",
                other
            )),
        }
    }
}

/// One published MeldMC version.
///
/// The identifier is never empty and carries no surrounding whitespace.
/// Records order by plain string comparison of the identifier, so "1.10.0"
/// sorts below "1.2.0". The channel only breaks ties between otherwise equal
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRecord {
    identifier: String,
    channel: Channel,
}

impl VersionRecord {
    /// Returns `None` when `raw` is blank or could not be used as a single
    /// directory name (path separators, `..`, control characters).
    pub fn new(raw: &str, channel: Channel) -> Option<Self> {
        let identifier = raw.trim();
        if identifier.is_empty() || !is_safe_identifier(identifier) {
            return None;
        }
        Some(Self {
            identifier: identifier.to_string(),
            channel,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn is_snapshot(&self) -> bool {
        self.channel == Channel::Snapshot
    }

    /// Name of the launcher profile registered for this version.
    pub fn profile_name(&self) -> String {
        format!("MeldMC {}", self.identifier)
    }
}

impl Ord for VersionRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifier
            .cmp(&other.identifier)
            .then_with(|| self.channel.cmp(&other.channel))
    }
}

impl PartialOrd for VersionRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// Sorts latest first.
/// Identifiers become part of `versions/meldmc-<identifier>`, so they must
/// stay inside that one path component.
fn is_safe_identifier(identifier: &str) -> bool {
    !identifier.contains("..")
        && !identifier
            .chars()
            .any(|c| c == '/' || c == '\\' || c == ':' || c.is_control())
}

pub fn sort_latest_first(records: &mut [VersionRecord]) {
    records.sort_by(|a, b| b.cmp(a));
}

/// Immutable snapshot of both channel lists, each latest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelLists {
    pub releases: Vec<VersionRecord>,
    pub snapshots: Vec<VersionRecord>,
}

impl ChannelLists {
    pub fn for_channel(&self, channel: Channel) -> &[VersionRecord] {
        match channel {
            Channel::Release => &self.releases,
            Channel::Snapshot => &self.snapshots,
        }
    }

    pub fn latest(&self, channel: Channel) -> Option<&VersionRecord> {
        self.for_channel(channel).first()
    }

    pub fn find(&self, channel: Channel, identifier: &str) -> Option<&VersionRecord> {
        let identifier = identifier.trim();
        self.for_channel(channel)
            .iter()
            .find(|record| record.identifier() == identifier)
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty() && self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_rejects_blank() {
        let record = VersionRecord::new("  1.2.0\n", Channel::Release).unwrap();
        assert_eq!(record.identifier(), "1.2.0");
        assert!(VersionRecord::new("", Channel::Release).is_none());
        assert!(VersionRecord::new(" \t\n", Channel::Snapshot).is_none());
    }

    #[test]
    fn test_new_rejects_path_like_identifiers() {
        for raw in ["1/../../../x", "..", "1.2..3", "a\\b", "C:evil", "1.0\0"] {
            assert!(VersionRecord::new(raw, Channel::Release).is_none(), "{:?}", raw);
        }
        assert!(VersionRecord::new("1.2.0-SNAPSHOT+build.5", Channel::Snapshot).is_some());
    }

    #[test]
    fn test_equality_includes_channel() {
        let release = VersionRecord::new("1.0.0", Channel::Release).unwrap();
        let snapshot = VersionRecord::new("1.0.0", Channel::Snapshot).unwrap();
        assert_ne!(release, snapshot);
        assert_eq!(release, VersionRecord::new("1.0.0", Channel::Release).unwrap());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut records: Vec<VersionRecord> = ["1.2.0", "1.10.0", "1.2.0-SNAPSHOT-20240101", "0.9"]
            .iter()
            .filter_map(|v| VersionRecord::new(v, Channel::Snapshot))
            .collect();
        sort_latest_first(&mut records);

        let ids: Vec<&str> = records.iter().map(|r| r.identifier()).collect();
        assert_eq!(ids, vec!["1.2.0-SNAPSHOT-20240101", "1.2.0", "1.10.0", "0.9"]);
    }

    #[test]
    fn test_profile_name() {
        let record = VersionRecord::new("1.2.0", Channel::Release).unwrap();
        assert_eq!(record.profile_name(), "MeldMC 1.2.0");
    }

    #[test]
    fn test_channel_lists_lookup() {
        let lists = ChannelLists {
            releases: vec![
                VersionRecord::new("1.2.0", Channel::Release).unwrap(),
                VersionRecord::new("1.1.0", Channel::Release).unwrap(),
            ],
            snapshots: Vec::new(),
        };

        assert!(!lists.is_empty());
        assert_eq!(lists.latest(Channel::Release).unwrap().identifier(), "1.2.0");
        assert!(lists.latest(Channel::Snapshot).is_none());
        assert!(lists.find(Channel::Release, " 1.1.0 ").is_some());
        assert!(lists.find(Channel::Snapshot, "1.1.0").is_none());
        assert!(ChannelLists::default().is_empty());
    }

    #[test]
    fn test_channel_parsing() {
        assert_eq!("release".parse::<Channel>().unwrap(), Channel::Release);
        assert_eq!("Snapshots".parse::<Channel>().unwrap(), Channel::Snapshot);
        assert!("nightly".parse::<Channel>().is_err());
        assert_eq!(Channel::Snapshot.repository_path(), "snapshots");
    }
}
