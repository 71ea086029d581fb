//! Output format registry.
//!
//! The display names double as the selection strings accepted by the CLI and
//! must stay stable: they are matched exactly when a user picks a format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A property-list serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Apple binary plist (`bplist00`).
    Binary,
    /// XML plist.
    #[default]
    Xml,
    /// JSON.
    Json,
    /// OpenStep (old-style ASCII) plist.
    #[serde(rename = "openstep")]
    OpenStep,
}

impl Format {
    /// All formats, in the order they are presented to users.
    const ALL: [Format; 4] = [Format::Binary, Format::Xml, Format::Json, Format::OpenStep];

    /// Returns every supported format in registry order.
    pub fn all() -> &'static [Format] {
        &Self::ALL
    }

    /// Canonical human-readable name.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Xml => "XML",
            Self::Json => "JSON",
            Self::OpenStep => "OpenStep",
        }
    }

    /// Looks a format up by its canonical name (exact, case-sensitive).
    pub fn from_description(name: &str) -> Option<Format> {
        Self::ALL.iter().copied().find(|f| f.describe() == name)
    }

    /// Infers a format from a path's extension.
    ///
    /// Returns `None` for extensions that do not pin down a format, `plist`
    /// included, so callers keep whatever format they already had.
    pub fn from_extension(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xml" => Some(Self::Xml),
            "json" => Some(Self::Json),
            "openstep" | "ostep" => Some(Self::OpenStep),
            "bplist" => Some(Self::Binary),
            _ => None,
        }
    }

    /// Preferred file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Binary => "plist",
            Self::Xml => "xml",
            Self::Json => "json",
            Self::OpenStep => "openstep",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_description_round_trip() {
        for format in Format::all() {
            assert_eq!(Format::from_description(format.describe()), Some(*format));
        }
    }

    #[test]
    fn test_descriptions_are_distinct() {
        let names: HashSet<_> = Format::all().iter().map(|f| f.describe()).collect();
        assert_eq!(names.len(), Format::all().len());
    }

    #[test]
    fn test_registry_order() {
        assert_eq!(
            Format::all(),
            &[Format::Binary, Format::Xml, Format::Json, Format::OpenStep]
        );
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Format::from_description("not-a-format"), None);
        assert_eq!(Format::from_description(""), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Format::from_description("xml"), None);
        assert_eq!(Format::from_description("Json"), None);
        assert_eq!(Format::from_description("JSON"), Some(Format::Json));
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension(Path::new("out.xml")), Some(Format::Xml));
        assert_eq!(Format::from_extension(Path::new("out.JSON")), Some(Format::Json));
        assert_eq!(
            Format::from_extension(Path::new("a/b/out.ostep")),
            Some(Format::OpenStep)
        );
        assert_eq!(
            Format::from_extension(Path::new("out.openstep")),
            Some(Format::OpenStep)
        );
        assert_eq!(Format::from_extension(Path::new("out.bplist")), Some(Format::Binary));
        assert_eq!(Format::from_extension(Path::new("out.plist")), None);
        assert_eq!(Format::from_extension(Path::new("out")), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Format::OpenStep).unwrap();
        assert_eq!(json, "\"openstep\"");
        let parsed: Format = serde_json::from_str("\"binary\"").unwrap();
        assert_eq!(parsed, Format::Binary);
    }

    #[test]
    fn test_display_matches_description() {
        assert_eq!(Format::Xml.to_string(), "XML");
    }
}
