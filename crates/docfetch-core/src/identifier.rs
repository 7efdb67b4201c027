//! Identifier model and output filename derivation.

use std::fmt;

/// Character in identifiers that cannot appear in a file name.
const RESERVED_SEPARATOR: char = '/';
/// Replacement written in its place.
const SEPARATOR_REPLACEMENT: &str = "-";

/// Opaque document identifier read from the input list.
///
/// Used verbatim in the request target and, after substitution, as the
/// output file name. Not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Identifier(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name for this identifier's artifact: every `/` becomes `-`.
    ///
    /// Returns `None` when the result cannot name a file in the output
    /// directory (empty, `.` or `..`).
    pub fn file_name(&self) -> Option<String> {
        let name = output_file_name(&self.0);
        if name.is_empty() || name == "." || name == ".." {
            None
        } else {
            Some(name)
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::new(s)
    }
}

/// Applies the separator substitution to a raw identifier.
pub fn output_file_name(raw: &str) -> String {
    raw.replace(RESERVED_SEPARATOR, SEPARATOR_REPLACEMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_becomes_dash() {
        assert_eq!(output_file_name("MR003081/2008"), "MR003081-2008");
    }

    #[test]
    fn all_slashes_replaced() {
        assert_eq!(output_file_name("a/b/c//d"), "a-b-c--d");
        assert_eq!(output_file_name("/lead/"), "-lead-");
    }

    #[test]
    fn other_characters_untouched() {
        assert_eq!(output_file_name("RJ000123\\2010 x"), "RJ000123\\2010 x");
    }

    #[test]
    fn unusable_names_rejected() {
        assert_eq!(Identifier::new("").file_name(), None);
        assert_eq!(Identifier::new(".").file_name(), None);
        assert_eq!(Identifier::new("..").file_name(), None);
        assert_eq!(
            Identifier::new("../x").file_name().as_deref(),
            Some("..-x")
        );
    }

    #[test]
    fn display_is_raw() {
        let id = Identifier::from("SP001/2011");
        assert_eq!(id.to_string(), "SP001/2011");
        assert_eq!(id.file_name().as_deref(), Some("SP001-2011"));
    }
}
