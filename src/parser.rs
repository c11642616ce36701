//! Line parser — classifies each source line as directives or plain text,
//! and splits plain lines into lyric and chord tokens.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Directive, DirectiveKind, DirectiveMatch, ParsedLine, Token};
use crate::scanner::{chord_marker_regex, chord_name};

struct DirectivePattern {
    kind: DirectiveKind,
    /// Keyword present anywhere on the line
    detect: Regex,
    /// Whole-line shape: leader, payload (if any), trailer
    shape: Regex,
}

fn directive_patterns() -> &'static [DirectivePattern] {
    static PATTERNS: OnceLock<Vec<DirectivePattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        DirectiveKind::PRIORITY
            .iter()
            .map(|&kind| {
                let keyword = regex::escape(kind.keyword());
                let (detect, shape) = match kind {
                    DirectiveKind::ChordDefinitions => (
                        format!(r"\{{{keyword}\}}"),
                        format!(r"^(?P<leader>[^{{}}]*)\{{{keyword}\}}(?P<trailer>.*)$"),
                    ),
                    _ => (
                        format!(r"\{{{keyword}:.*\}}"),
                        format!(
                            r"^(?P<leader>[^{{}}]*)\{{{keyword}:(?P<payload>[^}}]*)\}}(?P<trailer>.*)$"
                        ),
                    ),
                };
                DirectivePattern {
                    kind,
                    detect: Regex::new(&detect).expect("valid regex"),
                    shape: Regex::new(&shape).expect("valid regex"),
                }
            })
            .collect()
    })
}

/// Classify one source line. `line_number` is 1-based and only used for
/// error reporting.
///
/// Directives are matched left to right: each one is read from the trailer
/// of the one before it, so a line may carry several. Text between two
/// directives becomes the leader of the second. A line whose keyword is
/// present but whose shape does not match is a
/// [`Error::MalformedDirective`] naming the first such kind in priority
/// order.
pub fn parse_line(line_number: usize, line: &str) -> Result<ParsedLine> {
    let mut matches: Vec<DirectiveMatch> = Vec::new();
    let mut rest = line;

    loop {
        let mut detected = directive_patterns()
            .iter()
            .filter(|pattern| pattern.detect.is_match(rest))
            .peekable();
        let Some(first) = detected.peek().map(|pattern| pattern.kind) else {
            break;
        };
        let (kind, caps) = detected
            .find_map(|pattern| pattern.shape.captures(rest).map(|caps| (pattern.kind, caps)))
            .ok_or(Error::MalformedDirective {
                line: line_number,
                kind: first,
            })?;

        let payload = caps
            .name("payload")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        let directive = match kind {
            DirectiveKind::Title => Directive::Title(payload),
            DirectiveKind::Subtitle => Directive::Subtitle(payload),
            DirectiveKind::Comment => Directive::Comment(payload),
            DirectiveKind::ChordDefinitions => Directive::ChordDefinitions,
        };
        let trailer = caps.name("trailer").map_or("", |m| m.as_str());

        // The previous trailer is re-split into this leader and what follows.
        if let Some(previous) = matches.last_mut() {
            previous.trailer.clear();
        }
        matches.push(DirectiveMatch {
            leader: caps["leader"].to_string(),
            directive,
            trailer: trailer.to_string(),
        });
        rest = trailer;
    }

    if matches.is_empty() {
        Ok(ParsedLine::Plain(line.to_string()))
    } else {
        Ok(ParsedLine::Directives(matches))
    }
}

/// Split a line around chord markers, keeping the markers as their own
/// pieces. Empty pieces are not returned.
pub fn split_tokens(line: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in chord_marker_regex().find_iter(line) {
        if m.start() > last {
            pieces.push(&line[last..m.start()]);
        }
        pieces.push(m.as_str());
        last = m.end();
    }
    if last < line.len() {
        pieces.push(&line[last..]);
    }
    pieces
}

/// Tokenize a plain line. Whitespace-only pieces are dropped; a bracket
/// piece without a chord name stays literal text.
pub fn tokenize(line: &str) -> Vec<Token> {
    split_tokens(line)
        .into_iter()
        .filter(|piece| !piece.trim().is_empty())
        .map(|piece| match chord_name_of_marker(piece) {
            Some(name) => Token::Chord(name.to_string()),
            None => Token::Text(piece.to_string()),
        })
        .collect()
}

/// Chord name if `piece` is exactly one marker, `[` + non-brackets + `]`.
fn chord_name_of_marker(piece: &str) -> Option<&str> {
    let inner = piece.strip_prefix('[')?.strip_suffix(']')?;
    if inner.contains(['[', ']']) {
        return None;
    }
    chord_name(piece)
}

/// Whether the line holds at least one chord marker.
pub fn has_chord_marker(line: &str) -> bool {
    chord_marker_regex()
        .find_iter(line)
        .any(|m| chord_name(m.as_str()).is_some())
}
