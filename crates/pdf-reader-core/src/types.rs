// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the file handler.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Opaque handle issued by the host document picker (e.g. a `content://`
/// URI).
///
/// Never a raw filesystem path. Only the scheme and the path-like component
/// are interpreted; everything else is handed back to the host untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceIdentifier(String);

impl ResourceIdentifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URI scheme, if the identifier has one (`content`, `file`, ...).
    pub fn scheme(&self) -> Option<&str> {
        let (scheme, _) = split_scheme(&self.0);
        scheme
    }

    /// Whether the scheme matches `expected`, ignoring ASCII case.
    pub fn has_scheme(&self, expected: &str) -> bool {
        self.scheme()
            .is_some_and(|s| s.eq_ignore_ascii_case(expected))
    }

    /// Percent-decoded path component.
    ///
    /// `None` for opaque identifiers (`scheme:` followed by something other
    /// than `/`). For `content://authority/a/b.pdf` this is `/a/b.pdf`; for a
    /// scheme-less `report.pdf` it is `report.pdf`.
    pub fn path(&self) -> Option<String> {
        let (scheme, rest) = split_scheme(&self.0);
        let rest = strip_query_and_fragment(rest);

        let raw_path = if let Some(after) = rest.strip_prefix("//") {
            let end = after.find('/').unwrap_or(after.len());
            &after[end..]
        } else if scheme.is_some() && !rest.starts_with('/') {
            return None;
        } else {
            rest
        };

        Some(percent_decode_str(raw_path).decode_utf8_lossy().into_owned())
    }

    /// Last `/`-separated segment of the path, or the whole path if it has no
    /// separator. `None` when that segment is empty.
    pub fn path_tail(&self) -> Option<String> {
        let path = self.path()?;
        let tail = match path.rfind('/') {
            Some(cut) => &path[cut + 1..],
            None => path.as_str(),
        };
        (!tail.is_empty()).then(|| tail.to_owned())
    }
}

impl std::fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceIdentifier {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Split `scheme:rest`. The scheme must come before any `/`, `?` or `#` and
/// use only RFC 3986 scheme characters, otherwise the whole input is `rest`.
fn split_scheme(raw: &str) -> (Option<&str>, &str) {
    let Some(colon) = raw.find(':') else {
        return (None, raw);
    };
    let candidate = &raw[..colon];
    let mut chars = candidate.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if valid {
        (Some(candidate), &raw[colon + 1..])
    } else {
        (None, raw)
    }
}

fn strip_query_and_fragment(s: &str) -> &str {
    let end = s.find(['?', '#']).unwrap_or(s.len());
    &s[..end]
}

/// Local file the copier writes into. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationPath(PathBuf);

impl DestinationPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Directory that must exist before the file can be created. `None` for
    /// a bare file name relative to the working directory.
    pub fn parent_dir(&self) -> Option<&Path> {
        self.0.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

impl std::fmt::Display for DestinationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Human-facing label for a resource. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Returns `None` for an empty string.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        (!name.is_empty()).then_some(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a host metadata query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameLookup {
    /// The host returned a display-name record.
    Found(DisplayName),
    /// No record, an empty field, or the lookup failed.
    NotFound,
}

impl From<Option<String>> for NameLookup {
    fn from(value: Option<String>) -> Self {
        match value.and_then(DisplayName::new) {
            Some(name) => Self::Found(name),
            None => Self::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_uri_parts() {
        let id = ResourceIdentifier::new(
            "content://com.android.providers.downloads.documents/document/report.pdf",
        );
        assert_eq!(id.scheme(), Some("content"));
        assert_eq!(id.path().as_deref(), Some("/document/report.pdf"));
        assert_eq!(id.path_tail().as_deref(), Some("report.pdf"));
    }

    #[test]
    fn path_is_percent_decoded() {
        let id = ResourceIdentifier::new(
            "content://com.android.externalstorage.documents/document/primary%3ADownload%2FQ3%20report.pdf",
        );
        assert_eq!(
            id.path().as_deref(),
            Some("/document/primary:Download/Q3 report.pdf")
        );
        assert_eq!(id.path_tail().as_deref(), Some("Q3 report.pdf"));
    }

    #[test]
    fn query_and_fragment_are_not_path() {
        let id = ResourceIdentifier::new("content://media/external/file/42?limit=1#top");
        assert_eq!(id.path().as_deref(), Some("/external/file/42"));
    }

    #[test]
    fn bare_name_has_no_scheme() {
        let id = ResourceIdentifier::new("report.pdf");
        assert_eq!(id.scheme(), None);
        assert_eq!(id.path().as_deref(), Some("report.pdf"));
        assert_eq!(id.path_tail().as_deref(), Some("report.pdf"));
    }

    #[test]
    fn colon_after_slash_is_not_a_scheme() {
        let id = ResourceIdentifier::new("docs/a:b.pdf");
        assert_eq!(id.scheme(), None);
        assert_eq!(id.path_tail().as_deref(), Some("a:b.pdf"));
    }

    #[test]
    fn opaque_uri_has_no_path() {
        let id = ResourceIdentifier::new("mailto:someone@example.com");
        assert!(id.has_scheme("MAILTO"));
        assert_eq!(id.path(), None);
        assert_eq!(id.path_tail(), None);
    }

    #[test]
    fn authority_only_has_no_tail() {
        let id = ResourceIdentifier::new("content://com.example.provider");
        assert_eq!(id.path().as_deref(), Some(""));
        assert_eq!(id.path_tail(), None);

        let trailing = ResourceIdentifier::new("content://com.example.provider/dir/");
        assert_eq!(trailing.path_tail(), None);
    }

    #[test]
    fn destination_parent() {
        assert_eq!(
            DestinationPath::new("/tmp/a/b.pdf").parent_dir(),
            Some(Path::new("/tmp/a"))
        );
        assert_eq!(DestinationPath::new("b.pdf").parent_dir(), None);
    }

    #[test]
    fn empty_display_name_is_not_found() {
        assert_eq!(DisplayName::new(""), None);
        assert_eq!(NameLookup::from(Some(String::new())), NameLookup::NotFound);
        assert_eq!(NameLookup::from(None), NameLookup::NotFound);
        assert!(matches!(
            NameLookup::from(Some("a.pdf".to_owned())),
            NameLookup::Found(n) if n.as_str() == "a.pdf"
        ));
    }
}
