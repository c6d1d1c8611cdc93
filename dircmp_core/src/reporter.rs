use dircmp_common::{Classification, ClassifiedEntry, DircmpError, Tally};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Fallback width when the terminal size cannot be queried
pub const DEFAULT_TERM_WIDTH: usize = 80;

/// Width of the bracketed status column, "[MISSING]" plus slack
const STATUS_COL_WIDTH: usize = 11;

/// Widest note suffix (" not found in Folder2"), used for centering math
const MAX_NOTE_LEN: usize = 21;

const BANNER: &str = "===============================================";
const RULE: &str = "-----------------------------------------------";

const GREEN: &str = "\x1b[0;32m";
const RED: &str = "\x1b[0;31m";
const YELLOW: &str = "\x1b[1;33m";
const CYAN: &str = "\x1b[0;36m";
const RESET: &str = "\x1b[0m";

fn color_for(classification: Classification) -> &'static str {
    match classification {
        Classification::Match => GREEN,
        Classification::Diff => RED,
        Classification::Missing => YELLOW,
        Classification::Extra => CYAN,
    }
}

/// Renders a classification stream as aligned, optionally colored and
/// centered terminal lines.
///
/// The terminal width is plain input data, so rendering the same entries and
/// tally with the same width and color setting is byte-for-byte reproducible.
/// Colors only wrap the status tag; they never change what is classified or
/// counted.
pub struct TextReporter {
    width: usize,
    use_color: bool,
}

impl TextReporter {
    pub fn new(width: usize, use_color: bool) -> Self {
        Self { width, use_color }
    }

    pub fn render<W: Write>(
        &self,
        out: &mut W,
        folder1: &Path,
        folder2: &Path,
        entries: &[ClassifiedEntry],
        tally: &Tally,
    ) -> io::Result<()> {
        // Pad names to the longest one across both folders
        let name_width = entries
            .iter()
            .map(|entry| entry.name.chars().count())
            .max()
            .unwrap_or(1)
            .max(1);
        let content_width = STATUS_COL_WIDTH + 1 + name_width + MAX_NOTE_LEN;
        let left_pad = self.width.saturating_sub(content_width) / 2;

        self.center(out, BANNER)?;
        self.center(out, "Folder File Comparison Utility")?;
        self.center(out, BANNER)?;
        writeln!(out)?;
        self.center(out, "Comparing files in folders:")?;
        self.center(out, &format!("Folder 1: {}", folder1.display()))?;
        self.center(out, &format!("Folder 2: {}", folder2.display()))?;
        self.center(out, RULE)?;
        writeln!(out)?;

        for entry in entries {
            self.status_line(out, entry, left_pad, name_width)?;
        }

        writeln!(out)?;
        self.center(out, RULE)?;
        self.center(out, "Summary")?;
        self.center(out, RULE)?;

        let rows = [
            ("Total files checked", tally.total),
            ("Matches", tally.matched),
            ("Differences", tally.diff),
            ("Missing in Folder2", tally.missing),
            ("Extra in Folder2", tally.extra),
        ];
        let label_width = rows
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        for (label, value) in rows {
            self.center(out, &format!("{label:<label_width$} : {value}"))?;
        }

        self.center(out, BANNER)?;
        Ok(())
    }

    fn status_line<W: Write>(
        &self,
        out: &mut W,
        entry: &ClassifiedEntry,
        left_pad: usize,
        name_width: usize,
    ) -> io::Result<()> {
        let tag = format!("[{}]", entry.classification.as_str());
        let (color, reset) = if self.use_color {
            (color_for(entry.classification), RESET)
        } else {
            ("", "")
        };
        let note = match &entry.note {
            Some(note) => format!(" {note}"),
            None => String::new(),
        };
        let status_width = STATUS_COL_WIDTH;
        let name = &entry.name;

        writeln!(
            out,
            "{:left_pad$}{color}{tag:<status_width$}{reset} {name:<name_width$}{note}",
            ""
        )
    }

    fn center<W: Write>(&self, out: &mut W, line: &str) -> io::Result<()> {
        let len = line.chars().count();
        if self.width > len {
            let pad = (self.width - len) / 2;
            writeln!(out, "{:pad$}{line}", "")
        } else {
            writeln!(out, "{line}")
        }
    }
}

/// Machine-readable report: entries partitioned into the matched set and
/// everything else
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonReport {
    pub matched: Vec<ReportEntry>,
    pub unmatched: Vec<ReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub name: String,
    /// Hex fingerprint (composite in `both` mode); null when hashing failed
    pub hash: Option<String>,
}

pub fn build_json_report(entries: &[ClassifiedEntry]) -> JsonReport {
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for entry in entries {
        let report_entry = ReportEntry {
            name: entry.name.clone(),
            hash: entry.fingerprint.clone(),
        };
        if entry.classification == Classification::Match {
            matched.push(report_entry);
        } else {
            unmatched.push(report_entry);
        }
    }

    JsonReport { matched, unmatched }
}

/// Serialize the whole report in memory, then move it into place with a
/// temp-file rename so a crash mid-write never leaves a truncated document.
pub fn write_json_report(report: &JsonReport, dest: &Path) -> Result<(), DircmpError> {
    let mut data = serde_json::to_string_pretty(report)
        .map_err(|e| DircmpError::Serialization(e.to_string()))?;
    data.push('\n');

    let file_name = dest
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| DircmpError::Report(format!("invalid report path: {}", dest.display())))?;
    let temp_path = dest.with_file_name(format!("{file_name}.tmp"));

    fs::write(&temp_path, data.as_bytes())?;
    fs::rename(&temp_path, dest)?;

    debug!(
        "wrote JSON report ({} matched, {} unmatched) to {:?}",
        report.matched.len(),
        report.unmatched.len(),
        dest
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn entry(
        name: &str,
        classification: Classification,
        fingerprint: Option<&str>,
        note: Option<&str>,
    ) -> ClassifiedEntry {
        ClassifiedEntry {
            name: name.to_string(),
            classification,
            fingerprint: fingerprint.map(str::to_string),
            note: note.map(str::to_string),
        }
    }

    fn sample_entries() -> Vec<ClassifiedEntry> {
        vec![
            entry("a.txt", Classification::Match, Some("aaa"), None),
            entry("b.txt", Classification::Diff, Some("bbb"), None),
            entry(
                "c.txt",
                Classification::Missing,
                Some("ccc"),
                Some("not found in Folder2"),
            ),
            entry(
                "d.txt",
                Classification::Extra,
                Some("ddd"),
                Some("only in Folder2"),
            ),
        ]
    }

    fn sample_tally() -> Tally {
        let mut tally = Tally::default();
        tally.record(Classification::Match);
        tally.record(Classification::Diff);
        tally.record(Classification::Missing);
        tally.record(Classification::Extra);
        tally
    }

    fn render_to_string(reporter: &TextReporter) -> String {
        let mut out = Vec::new();
        reporter
            .render(
                &mut out,
                &PathBuf::from("/left"),
                &PathBuf::from("/right"),
                &sample_entries(),
                &sample_tally(),
            )
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_rendering_has_aligned_columns() {
        // Width 0 disables centering, which makes the columns easy to check
        let reporter = TextReporter::new(0, false);
        let text = render_to_string(&reporter);

        assert!(text.contains("[MATCH]     a.txt\n"));
        assert!(text.contains("[DIFF]      b.txt\n"));
        assert!(text.contains("[MISSING]   c.txt not found in Folder2\n"));
        assert!(text.contains("[EXTRA]     d.txt only in Folder2\n"));
    }

    #[test]
    fn summary_has_aligned_colons() {
        let reporter = TextReporter::new(0, false);
        let text = render_to_string(&reporter);

        assert!(text.contains("Total files checked : 3\n"));
        assert!(text.contains("Matches             : 1\n"));
        assert!(text.contains("Differences         : 1\n"));
        assert!(text.contains("Missing in Folder2  : 1\n"));
        assert!(text.contains("Extra in Folder2    : 1\n"));
    }

    #[test]
    fn rendering_is_reproducible() {
        let reporter = TextReporter::new(DEFAULT_TERM_WIDTH, true);
        assert_eq!(render_to_string(&reporter), render_to_string(&reporter));
    }

    #[test]
    fn color_never_changes_the_text_content() {
        let plain = render_to_string(&TextReporter::new(0, false));
        let colored = render_to_string(&TextReporter::new(0, true));
        let stripped: String = {
            let mut text = colored;
            for code in [GREEN, RED, YELLOW, CYAN, RESET] {
                text = text.replace(code, "");
            }
            text
        };
        assert_eq!(plain, stripped);
    }

    #[test]
    fn centering_pads_to_the_given_width() {
        let reporter = TextReporter::new(120, false);
        let text = render_to_string(&reporter);
        let banner_line = text.lines().next().unwrap();

        let pad = (120 - BANNER.chars().count()) / 2;
        assert_eq!(banner_line, format!("{:pad$}{}", "", BANNER));
    }

    #[test]
    fn json_report_partitions_matched_from_the_rest() {
        let report = build_json_report(&sample_entries());

        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].name, "a.txt");
        assert_eq!(report.matched[0].hash.as_deref(), Some("aaa"));

        let unmatched: Vec<_> = report.unmatched.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(unmatched, ["b.txt", "c.txt", "d.txt"]);
    }

    #[test]
    fn json_report_written_atomically_and_parseable() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("report.json");

        let mut entries = sample_entries();
        entries.push(entry("broken.txt", Classification::Diff, None, None));
        let report = build_json_report(&entries);
        write_json_report(&report, &dest).unwrap();

        // No leftover temp file
        assert!(!temp.path().join("report.json.tmp").exists());

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&dest).unwrap()).unwrap();
        assert_eq!(parsed["matched"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["unmatched"].as_array().unwrap().len(), 4);
        assert!(parsed["unmatched"][3]["hash"].is_null());
    }

    #[test]
    fn json_report_is_idempotent() {
        let entries = sample_entries();
        assert_eq!(build_json_report(&entries), build_json_report(&entries));
    }
}
