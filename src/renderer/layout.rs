//! Line layout — places the lyric and chord tokens of one plain line.
//!
//! Lyric text flows left to right on the lyric baseline. Chord labels sit
//! on a raised baseline at the cursor the lyrics have reached; they never
//! push the lyrics to the right. Only when two chords follow each other
//! with no lyric between them does the second one move past the first.

use super::constants::*;
use super::text::TextMeasurer;
use crate::model::{LayoutRecord, Token, TokenKind};
use crate::parser::tokenize;

/// Result of laying out one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub records: Vec<LayoutRecord>,
    /// Top of the lyric text boxes
    pub lyric_y: f64,
    /// Top of the chord label boxes, one bold line above `lyric_y`
    pub chord_y: f64,
    /// Horizontal cursor after the last lyric token
    pub end_x: f64,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    x: f64,
    /// Width of the previous token plus the chord gap, if it was a chord
    previous_chord_width: Option<f64>,
}

/// Lay out `line` with its lyric text boxes topped at `lyric_y`.
pub fn layout_line(line: &str, lyric_y: f64, measurer: &dyn TextMeasurer) -> LineLayout {
    layout_tokens(&tokenize(line), lyric_y, measurer)
}

pub fn layout_tokens(tokens: &[Token], lyric_y: f64, measurer: &dyn TextMeasurer) -> LineLayout {
    let chord_y = lyric_y + measurer.height_of("C", &CHORD_LABEL_STYLE);
    let mut records = Vec::with_capacity(tokens.len());

    let start = Cursor { x: 0.0, previous_chord_width: None };
    let end = tokens.iter().fold(start, |cursor, token| match token {
        Token::Text(text) => {
            records.push(LayoutRecord {
                kind: TokenKind::Lyric,
                text: text.clone(),
                x: cursor.x,
                y: lyric_y,
                style: BODY_STYLE,
            });
            Cursor {
                x: cursor.x + measurer.width_of(text, &BODY_STYLE),
                previous_chord_width: None,
            }
        }
        Token::Chord(name) => {
            let x = cursor.x + cursor.previous_chord_width.unwrap_or(0.0);
            records.push(LayoutRecord {
                kind: TokenKind::Chord,
                text: name.clone(),
                x,
                y: chord_y,
                style: CHORD_LABEL_STYLE,
            });
            let gap_width = measurer.width_of(&format!("{name}{CHORD_GAP}"), &CHORD_LABEL_STYLE);
            Cursor { x, previous_chord_width: Some(gap_width) }
        }
    });

    LineLayout { records, lyric_y, chord_y, end_x: end.x }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextStyle;
    use crate::renderer::text::TextMetrics;

    /// Every character is 10 wide in normal weight and 12 in bold.
    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
            let per_char = match style.weight {
                crate::model::FontWeight::Normal => 10.0,
                crate::model::FontWeight::Bold => 12.0,
            };
            TextMetrics { width: text.chars().count() as f64 * per_char, height: 14.0 }
        }
    }

    fn positions(layout: &LineLayout) -> Vec<(TokenKind, &str, f64, f64)> {
        layout
            .records
            .iter()
            .map(|r| (r.kind, r.text.as_str(), r.x, r.y))
            .collect()
    }

    #[test]
    fn chord_sits_above_following_lyric() {
        let layout = layout_line("Hello [C]world", 100.0, &FixedMeasurer);
        assert_eq!(layout.chord_y, 114.0);
        assert_eq!(
            positions(&layout),
            vec![
                (TokenKind::Lyric, "Hello ", 0.0, 100.0),
                (TokenKind::Chord, "C", 60.0, 114.0),
                (TokenKind::Lyric, "world", 60.0, 100.0),
            ]
        );
        assert_eq!(layout.end_x, 110.0);
    }

    #[test]
    fn adjacent_chords_do_not_overlap() {
        let layout = layout_line("[G][C*] [Am]la", 0.0, &FixedMeasurer);
        let p = positions(&layout);
        // "G  " is 3 bold characters; "C  " likewise.
        assert_eq!(p[0], (TokenKind::Chord, "G", 0.0, 14.0));
        assert_eq!(p[1], (TokenKind::Chord, "C", 36.0, 14.0));
        assert_eq!(p[2], (TokenKind::Chord, "Am", 72.0, 14.0));
        assert_eq!(p[3], (TokenKind::Lyric, "la", 72.0, 0.0));

        let m = FixedMeasurer;
        let blank = m.width_of(" ", &CHORD_LABEL_STYLE);
        for pair in layout.records.windows(2).take(2) {
            let first = m.width_of(&pair[0].text, &CHORD_LABEL_STYLE);
            assert!(pair[1].x >= pair[0].x + first + 2.0 * blank);
        }
    }

    #[test]
    fn lyric_between_chords_resets_the_gap() {
        let layout = layout_line("[G]a[C]b", 0.0, &FixedMeasurer);
        let p = positions(&layout);
        assert_eq!(p[0].2, 0.0);
        assert_eq!(p[1], (TokenKind::Lyric, "a", 0.0, 0.0));
        assert_eq!(p[2], (TokenKind::Chord, "C", 10.0, 14.0));
        assert_eq!(p[3], (TokenKind::Lyric, "b", 10.0, 0.0));
    }

    #[test]
    fn trailing_chord_does_not_advance_cursor() {
        let layout = layout_line("end [D7]", 0.0, &FixedMeasurer);
        assert_eq!(layout.end_x, 40.0);
        assert_eq!(layout.records[1].x, 40.0);
    }

    #[test]
    fn empty_line_has_no_records() {
        let layout = layout_line("", 50.0, &FixedMeasurer);
        assert!(layout.records.is_empty());
        assert_eq!(layout.end_x, 0.0);
    }
}
