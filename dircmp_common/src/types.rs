use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Longest accepted file name, in bytes. Anything beyond this is treated as
/// unreadable rather than truncated.
pub const MAX_NAME_LEN: usize = 1024;

/// Digest algorithm used for file fingerprints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgo {
    Sha256,
    Blake3,
    #[default]
    Both,
}

impl HashAlgo {
    pub fn wants_sha256(self) -> bool {
        matches!(self, HashAlgo::Sha256 | HashAlgo::Both)
    }

    pub fn wants_blake3(self) -> bool {
        matches!(self, HashAlgo::Blake3 | HashAlgo::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgo::Sha256 => "sha256",
            HashAlgo::Blake3 => "blake3",
            HashAlgo::Both => "both",
        }
    }
}

impl FromStr for HashAlgo {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(HashAlgo::Sha256),
            "blake3" => Ok(HashAlgo::Blake3),
            "both" => Ok(HashAlgo::Both),
            other => Err(format!(
                "unknown algorithm `{other}` (expected sha256, blake3 or both)"
            )),
        }
    }
}

/// One regular file observed during a scan. The fingerprint is `None` when
/// hashing failed; such entries never compare equal to anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFingerprint {
    pub name: String,
    pub path: PathBuf,
    pub fingerprint: Option<String>,
}

impl FileFingerprint {
    pub fn is_valid(&self) -> bool {
        self.fingerprint.is_some()
    }
}

/// All regular files of one folder, in directory-listing order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub root: PathBuf,
    pub files: Vec<FileFingerprint>,
}

impl ScanResult {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Outcome of classifying one file name across both folders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Match,
    Diff,
    Missing,
    Extra,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Match => "MATCH",
            Classification::Diff => "DIFF",
            Classification::Missing => "MISSING",
            Classification::Extra => "EXTRA",
        }
    }
}

/// One classified file name, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedEntry {
    pub name: String,
    pub classification: Classification,
    /// Fingerprint carried for reporting: folder1's when the name exists
    /// there, folder2's for EXTRA entries, `None` when hashing failed.
    pub fingerprint: Option<String>,
    /// Human-readable suffix, e.g. "not found in Folder2"
    pub note: Option<String>,
}

/// Aggregate counters for one classification pass.
///
/// `total` counts folder1 entries only, so `total == matched + diff + missing`
/// holds at all times; EXTRA entries are counted separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub matched: usize,
    pub diff: usize,
    pub missing: usize,
    pub extra: usize,
}

impl Tally {
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Match => {
                self.total += 1;
                self.matched += 1;
            }
            Classification::Diff => {
                self.total += 1;
                self.diff += 1;
            }
            Classification::Missing => {
                self.total += 1;
                self.missing += 1;
            }
            Classification::Extra => {
                self.extra += 1;
            }
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.total == self.matched + self.diff + self.missing
    }
}
