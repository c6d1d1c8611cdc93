use dircmp_common::{Classification, ClassifiedEntry, FileFingerprint, ScanResult, Tally};
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub const MISSING_NOTE: &str = "not found in Folder2";
pub const EXTRA_NOTE: &str = "only in Folder2";

/// Classify every file name across the two scans.
///
/// Folder1 is the reference set: its entries come first, in scan order, as
/// MATCH, DIFF or MISSING. Names present only in folder2 follow afterwards,
/// in folder2's scan order, as EXTRA. Names are compared as exact strings,
/// case-sensitive, without normalization. Two fingerprints are equal only
/// when both are valid and identical, so an unreadable file on either side
/// can never classify as MATCH.
pub fn classify(scan1: &ScanResult, scan2: &ScanResult) -> (Vec<ClassifiedEntry>, Tally) {
    let folder2_by_name: HashMap<&str, &FileFingerprint> = scan2
        .files
        .iter()
        .map(|file| (file.name.as_str(), file))
        .collect();
    let folder1_names: HashSet<&str> = scan1.files.iter().map(|file| file.name.as_str()).collect();

    let mut entries = Vec::with_capacity(scan1.len() + scan2.len());
    let mut tally = Tally::default();

    for file in &scan1.files {
        let (classification, note) = match folder2_by_name.get(file.name.as_str()) {
            None => (Classification::Missing, Some(MISSING_NOTE.to_string())),
            Some(other) => match (&file.fingerprint, &other.fingerprint) {
                (Some(a), Some(b)) if a == b => (Classification::Match, None),
                _ => (Classification::Diff, None),
            },
        };

        tally.record(classification);
        entries.push(ClassifiedEntry {
            name: file.name.clone(),
            classification,
            fingerprint: file.fingerprint.clone(),
            note,
        });
    }

    for file in &scan2.files {
        if folder1_names.contains(file.name.as_str()) {
            continue;
        }

        tally.record(Classification::Extra);
        entries.push(ClassifiedEntry {
            name: file.name.clone(),
            classification: Classification::Extra,
            fingerprint: file.fingerprint.clone(),
            note: Some(EXTRA_NOTE.to_string()),
        });
    }

    debug!(
        "classified {} names: {} matched, {} diff, {} missing, {} extra",
        entries.len(),
        tally.matched,
        tally.diff,
        tally.missing,
        tally.extra
    );

    (entries, tally)
}
