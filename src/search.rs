/*============================================================
  Synavera Project: Syn-Seek
  Module: synseek::search
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Parse the two-line stanzas printed by `<tool> -Ss` into
    structured package records.

  Security / Safety Notes:
    Operates on captured text only. Malformed headers are
    skipped and reported, never trusted.

  Dependencies:
    regex for the header grammar.

  Operational Scope:
    Runs once per search session on the full captured stdout
    of the external tool.

  Revision History:
    2025-11-12 COD  Authored search output parser.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Structured parsing with clear failure modes
    - Source ordering preserved
============================================================*/

use regex::{Captures, Regex};

use crate::error::{Result, SynseekError};
use crate::package::PackageEntry;

/// Token printed after the version when the package is flagged out of date.
pub const OUTDATED_MARKER: &str = "!!";

/// Outcome of parsing one search output.
#[derive(Debug, Default)]
pub struct SearchReport {
    pub entries: Vec<PackageEntry>,
    /// Header lines that did not match the grammar.
    pub rejected: Vec<String>,
}

/// Header grammar plus the stanza state machine.
pub struct SearchParser {
    header: Regex,
}

impl SearchParser {
    pub fn new() -> Result<Self> {
        // Optional groups stay in this order: outdated, votes, group, status.
        let pattern = format!(
            concat!(
                r"^(?P<repo>.+?)/(?P<package>.+?) (?P<version>\S+)",
                r"(?P<outdated> {})?",
                r"(?: \((?P<votes>\d+), (?P<popularity>\d+(?:\.\d+)?)\))?",
                r"(?: \((?P<group>[^)]+)\))?",
                r"(?: \[(?P<status>[^\]]+)\])?",
            ),
            regex::escape(OUTDATED_MARKER)
        );
        let header = Regex::new(&pattern).map_err(|err| {
            SynseekError::Runtime(format!("Failed to compile search header grammar: {err}"))
        })?;
        Ok(Self { header })
    }

    /// Parse full search output, keeping rejected header lines.
    pub fn parse_report(&self, raw: &str) -> SearchReport {
        let mut report = SearchReport::default();
        let mut pending: Option<PackageEntry> = None;

        for line in raw.lines() {
            if line.is_empty() {
                continue;
            }
            if line.starts_with(char::is_whitespace) {
                // A description without a parsed header has nothing to attach to.
                if let Some(mut entry) = pending.take() {
                    entry.description = line.trim().to_string();
                    report.entries.push(entry);
                }
                continue;
            }
            match self.parse_header(line) {
                Some(entry) => pending = Some(entry),
                None => {
                    pending = None;
                    report.rejected.push(line.to_string());
                }
            }
        }

        report
    }

    /// Parse a single header line, or `None` if it does not fit the grammar.
    pub fn parse_header(&self, line: &str) -> Option<PackageEntry> {
        let caps = self.header.captures(line)?;
        let votes = match caps.name("votes") {
            Some(raw) => Some(raw.as_str().parse::<u64>().ok()?),
            None => None,
        };

        Some(PackageEntry {
            repo: caps["repo"].to_string(),
            package: caps["package"].to_string(),
            version: caps["version"].to_string(),
            outdated: caps.name("outdated").is_some(),
            votes,
            popularity: optional(&caps, "popularity"),
            group: optional(&caps, "group"),
            status: optional(&caps, "status"),
            description: String::new(),
        })
    }
}

/// Parse search output into entries in source order, skipping bad headers.
#[cfg(test)]
pub fn parse_search_output(raw: &str) -> Result<Vec<PackageEntry>> {
    Ok(SearchParser::new()?.parse_report(raw).entries)
}

fn optional(caps: &Captures<'_>, name: &str) -> Option<String> {
    caps.name(name).map(|found| found.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(line: &str) -> PackageEntry {
        SearchParser::new()
            .unwrap()
            .parse_header(line)
            .unwrap_or_else(|| panic!("header did not parse: {line}"))
    }

    #[test]
    fn parses_sample_output() {
        let raw = "extra/gvfs-mtp 1.30.3-1 (gnome) [installed]\n    Virtual filesystem implementation for GIO\naur/android-studio 2.2.3.0-1 (626, 22.50)\n    The official Android IDE\n";
        let entries = parse_search_output(raw).unwrap();
        assert_eq!(entries.len(), 2);

        let gvfs = &entries[0];
        assert_eq!(gvfs.repo, "extra");
        assert_eq!(gvfs.package, "gvfs-mtp");
        assert_eq!(gvfs.version, "1.30.3-1");
        assert_eq!(gvfs.group.as_deref(), Some("gnome"));
        assert_eq!(gvfs.status.as_deref(), Some("installed"));
        assert_eq!(gvfs.votes, None);
        assert_eq!(gvfs.popularity, None);
        assert!(!gvfs.outdated);
        assert_eq!(gvfs.description, "Virtual filesystem implementation for GIO");

        let studio = &entries[1];
        assert_eq!(studio.repo, "aur");
        assert_eq!(studio.package, "android-studio");
        assert_eq!(studio.version, "2.2.3.0-1");
        assert_eq!(studio.votes, Some(626));
        assert_eq!(studio.popularity.as_deref(), Some("22.50"));
        assert_eq!(studio.group, None);
        assert_eq!(studio.status, None);
        assert_eq!(studio.description, "The official Android IDE");
    }

    #[test]
    fn bare_header_has_no_optional_fields() {
        let entry = header("core/bash 5.2.026-2");
        assert_eq!(entry.qualified_name(), "core/bash");
        assert_eq!(entry.version, "5.2.026-2");
        assert!(!entry.outdated);
        assert_eq!(entry.votes, None);
        assert_eq!(entry.group, None);
        assert_eq!(entry.status, None);
    }

    #[test]
    fn outdated_marker_and_all_groups() {
        let entry = header("aur/foo-git r12.abc-1 !! (3, 0.01) (devel) [installed: r10.aaa-1]");
        assert!(entry.outdated);
        assert_eq!(entry.votes, Some(3));
        assert_eq!(entry.popularity.as_deref(), Some("0.01"));
        assert_eq!(entry.group.as_deref(), Some("devel"));
        assert_eq!(entry.status.as_deref(), Some("installed: r10.aaa-1"));
    }

    #[test]
    fn status_without_group() {
        let entry = header("extra/vim 9.1.0-1 [installed]");
        assert_eq!(entry.group, None);
        assert_eq!(entry.status.as_deref(), Some("installed"));
    }

    #[test]
    fn integer_popularity_is_accepted() {
        let entry = header("aur/yay 12.3.5-1 (2200, 15)");
        assert_eq!(entry.votes, Some(2200));
        assert_eq!(entry.popularity.as_deref(), Some("15"));
    }

    #[test]
    fn preserves_source_order() {
        let raw = "aur/zeta 1-1\n  last alphabetically\ncore/alpha 1-1\n  first alphabetically\nextra/mid 1-1\n  middle\n";
        let names: Vec<String> = parse_search_output(raw)
            .unwrap()
            .into_iter()
            .map(|entry| entry.package)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn malformed_header_is_skipped_with_its_description() {
        let parser = SearchParser::new().unwrap();
        let raw = "warning: database out of date\n    dangling text\ncore/zsh 5.9-5\n\tThe Z shell\n";
        let report = parser.parse_report(raw);
        assert_eq!(report.rejected, vec!["warning: database out of date"]);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].package, "zsh");
        assert_eq!(report.entries[0].description, "The Z shell");
    }

    #[test]
    fn blank_lines_and_trailing_header_are_ignored() {
        let raw = "\ncore/zsh 5.9-5\n\n    The Z shell\n\ncore/fish 3.7.1-1\n";
        let entries = parse_search_output(raw).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "The Z shell");
    }

    #[test]
    fn empty_output_yields_nothing() {
        assert!(parse_search_output("").unwrap().is_empty());
    }
}
