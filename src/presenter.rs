/*============================================================
  Synavera Project: Syn-Seek
  Module: synseek::presenter
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Render parsed search results as a numbered, colour-coded
    listing followed by the selection banner.

  Security / Safety Notes:
    Produces text only; the caller owns the output stream.

  Dependencies:
    colored for ANSI styling.

  Operational Scope:
    Used once per search session between parsing and the
    selection prompt.

  Revision History:
    2025-11-12 COD  Authored listing presenter.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Styling isolated from parsing
    - Deterministic layout for a given entry sequence
============================================================*/

use colored::{Color, ColoredString, Colorize};

use crate::package::PackageEntry;

/// Visual roles used in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Number,
    Repo,
    Package,
    Version,
    OutdatedVersion,
    Group,
    Status,
    Votes,
    Banner,
}

impl Style {
    fn color(self) -> Color {
        match self {
            Style::Number => Color::Yellow,
            Style::Repo => Color::Magenta,
            Style::Package => Color::White,
            Style::Version => Color::Green,
            Style::OutdatedVersion => Color::Red,
            Style::Group => Color::Blue,
            Style::Status => Color::Cyan,
            Style::Votes => Color::Blue,
            Style::Banner => Color::Green,
        }
    }

    fn bold(self) -> bool {
        matches!(self, Style::Number | Style::Package | Style::Banner)
    }
}

/// Formats search listings.
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    pub fn new() -> Self {
        Self
    }

    /// Two lines per entry, numbered from 1 in input order.
    pub fn render(&self, entries: &[PackageEntry]) -> String {
        let mut out = String::new();
        for (index, entry) in entries.iter().enumerate() {
            let number = (index + 1).to_string();
            out.push_str(&self.header_line(&number, entry));
            out.push('\n');
            out.push_str(&" ".repeat(number.len() + 1));
            out.push_str(&entry.description);
            out.push('\n');
        }
        out
    }

    /// Instructions shown right before the prompt.
    pub fn banner(&self) -> String {
        format!(
            "{} Enter n° of packages to be installed (ex: 1 2 3 or 1-3)\n{} {}\n",
            paint(Style::Banner, "==>"),
            paint(Style::Banner, "==>"),
            "-".repeat(55)
        )
    }

    /// Prompt marker printed on the input line.
    pub fn prompt(&self) -> String {
        format!("{} ", paint(Style::Banner, "==>"))
    }

    fn header_line(&self, number: &str, entry: &PackageEntry) -> String {
        let version_style = if entry.outdated {
            Style::OutdatedVersion
        } else {
            Style::Version
        };
        let mut line = format!(
            "{} {}{}{} {}",
            paint(Style::Number, number),
            paint(Style::Repo, &entry.repo),
            paint(Style::Repo, "/"),
            paint(Style::Package, &entry.package),
            paint(version_style, &entry.version),
        );
        if let Some(group) = &entry.group {
            line.push(' ');
            line.push_str(&paint(Style::Group, &format!("({group})")).to_string());
        }
        if let Some(status) = &entry.status {
            line.push(' ');
            line.push_str(&paint(Style::Status, &format!("[{status}]")).to_string());
        }
        if let Some(votes) = entry.votes {
            let popularity = entry.popularity.as_deref().unwrap_or("0");
            line.push(' ');
            line.push_str(
                &paint(Style::Votes, &format!("({votes}, {popularity})")).to_string(),
            );
        }
        line
    }
}

fn paint(style: Style, text: &str) -> ColoredString {
    let painted = text.color(style.color());
    if style.bold() {
        painted.bold()
    } else {
        painted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch == '\u{1b}' {
                for next in chars.by_ref() {
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    fn entry(repo: &str, package: &str) -> PackageEntry {
        PackageEntry {
            repo: repo.into(),
            package: package.into(),
            version: "1.0-1".into(),
            description: "A package".into(),
            ..PackageEntry::default()
        }
    }

    #[test]
    fn renders_numbered_stanzas() {
        let mut gvfs = entry("extra", "gvfs-mtp");
        gvfs.group = Some("gnome".into());
        gvfs.status = Some("installed".into());
        let mut studio = entry("aur", "android-studio");
        studio.votes = Some(626);
        studio.popularity = Some("22.50".into());

        let text = strip_ansi(&Presenter::new().render(&[gvfs, studio]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1 extra/gvfs-mtp 1.0-1 (gnome) [installed]",
                "  A package",
                "2 aur/android-studio 1.0-1 (626, 22.50)",
                "  A package",
            ]
        );
    }

    #[test]
    fn description_indent_follows_number_width() {
        let entries: Vec<PackageEntry> = (0..10).map(|_| entry("core", "pkg")).collect();
        let text = strip_ansi(&Presenter::new().render(&entries));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "  A package");
        assert_eq!(lines[18], "10 core/pkg 1.0-1");
        assert_eq!(lines[19], "   A package");
    }

    #[test]
    fn package_name_round_trips_through_listing() {
        let names = ["gvfs-mtp", "android-studio", "lib32-glibc", "python-pip"];
        let entries: Vec<PackageEntry> = names.iter().map(|name| entry("extra", name)).collect();
        let text = strip_ansi(&Presenter::new().render(&entries));

        let recovered: Vec<String> = text
            .lines()
            .step_by(2)
            .filter_map(|line| line.split(' ').nth(1))
            .filter_map(|qualified| qualified.split_once('/'))
            .map(|(_, package)| package.to_string())
            .collect();
        assert_eq!(recovered, names);
    }

    #[test]
    fn empty_listing_renders_nothing() {
        assert!(Presenter::new().render(&[]).is_empty());
    }

    #[test]
    fn banner_has_two_lines() {
        let banner = strip_ansi(&Presenter::new().banner());
        let lines: Vec<&str> = banner.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1-3"));
    }
}
