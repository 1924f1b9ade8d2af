/*============================================================
  Synavera Project: Syn-Seek
  Module: synseek::package
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Shared structure describing one package record parsed from
    the external tool's search output.

  Security / Safety Notes:
    Pure data container; no I/O performed in this module.

  Dependencies:
    None beyond std.

  Operational Scope:
    Produced by the search parser, consumed by the presenter
    and the install step of a single session.

  Revision History:
    2025-11-12 COD  Introduced PackageEntry type.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Clear data contracts between modules
============================================================*/

/// One search result: header fields plus the description line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageEntry {
    pub repo: String,
    pub package: String,
    pub version: String,
    pub outdated: bool,
    /// AUR vote count.
    pub votes: Option<u64>,
    /// AUR popularity, kept as printed by the tool.
    pub popularity: Option<String>,
    pub group: Option<String>,
    /// Install status label such as `installed`.
    pub status: Option<String>,
    pub description: String,
}

impl PackageEntry {
    /// `repo/package` as the tool prints it.
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.repo, self.package)
    }
}
