//! Chord reference scanner — collects the distinct chord names used
//! anywhere in a document, for the chord legend.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

/// `[` + anything but brackets + `]`. A `[` with no closing bracket, or one
/// followed by another `[`, is not a marker.
pub(crate) fn chord_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[^\[\]]*\]").expect("valid regex"))
}

fn chord_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\[\]\*]+").expect("valid regex"))
}

/// Extract the chord name from a marker such as `[C]` or `[Am*]`.
///
/// The name is the first run of characters other than brackets and `*`,
/// trimmed. Markers without one (`[]`, `[*]`, `[ ]`) yield `None`.
pub fn chord_name(marker: &str) -> Option<&str> {
    let name = chord_name_regex().find(marker)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Every distinct chord name referenced in `document`, sorted.
///
/// The whole raw text is scanned, directives included, so a marker inside
/// a `{comment: ...}` payload counts as a reference.
pub fn scan_chord_references(document: &str) -> BTreeSet<String> {
    chord_marker_regex()
        .find_iter(document)
        .filter_map(|m| chord_name(m.as_str()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn marker_suffix_is_ignored() {
        assert_eq!(chord_name("[C*]"), Some("C"));
        assert_eq!(chord_name("[C]"), Some("C"));
        assert_eq!(chord_name("[ Am ]"), Some("Am"));
    }

    #[test]
    fn empty_markers_have_no_name() {
        assert_eq!(chord_name("[]"), None);
        assert_eq!(chord_name("[*]"), None);
        assert_eq!(chord_name("[  ]"), None);
    }

    #[test]
    fn references_are_distinct_and_sorted() {
        let doc = "[G]Amazing [C]grace, how [G]sweet\n[Em]the [D7*]sound [G]\n";
        let refs: Vec<String> = scan_chord_references(doc).into_iter().collect();
        assert_eq!(refs, vec!["C", "D7", "Em", "G"]);
    }

    #[test]
    fn directives_are_scanned_too() {
        let doc = "{comment: Intro [Am] [F]}\nla la [G]\n";
        let refs: Vec<String> = scan_chord_references(doc).into_iter().collect();
        assert_eq!(refs, vec!["Am", "F", "G"]);
    }

    #[test]
    fn unmatched_bracket_is_not_a_reference() {
        let refs = scan_chord_references("open [C and [G] then [ ] and []");
        assert_eq!(refs.into_iter().collect::<Vec<_>>(), vec!["G".to_string()]);
    }
}
