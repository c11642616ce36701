//! Data model for chord sheets: chord shapes, line tokens, directives,
//! text styles and the drawing primitives handed to a rendering surface.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of strings every chord diagram is drawn for.
pub const STRING_COUNT: usize = 4;

/// Most fret rows a diagram grid may span.
pub const MAX_FRETS_SHOWN: u32 = 24;

// ─── Chords ──────────────────────────────────────────────────────────

/// A hand-authored chord shape, looked up by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    /// Label drawn above the diagram; unique key in the library
    pub name: String,
    /// Fret that diagram row zero represents (0 = open position, no label)
    pub base_fret: u32,
    /// Number of fret rows in the grid
    pub frets_shown: u32,
    /// Per-string fret, left to right: -1 muted, 0 open, >0 fretted
    pub strings: [i32; STRING_COUNT],
    /// One digit per string; '0' means no finger label
    pub fingering: String,
}

/// Typed view of one entry of [`Chord::strings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFret {
    Muted,
    Open,
    Fretted(u32),
}

impl StringFret {
    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            -1 => Some(StringFret::Muted),
            0 => Some(StringFret::Open),
            v if v > 0 => Some(StringFret::Fretted(v as u32)),
            _ => None,
        }
    }
}

impl Chord {
    pub fn new(
        name: &str,
        base_fret: u32,
        frets_shown: u32,
        strings: [i32; STRING_COUNT],
        fingering: &str,
    ) -> Self {
        Chord {
            name: name.to_string(),
            base_fret,
            frets_shown,
            strings,
            fingering: fingering.to_string(),
        }
    }

    /// Typed per-string frets. Out-of-range raw values read as muted;
    /// [`Chord::validate`] rejects them before a chord enters a library.
    pub fn string_frets(&self) -> impl Iterator<Item = StringFret> + '_ {
        self.strings
            .iter()
            .map(|&raw| StringFret::from_raw(raw).unwrap_or(StringFret::Muted))
    }

    /// Finger digits aligned with [`Chord::strings`]; `None` for '0'.
    pub fn fingers(&self) -> impl Iterator<Item = Option<char>> + '_ {
        self.fingering
            .chars()
            .map(|c| if c == '0' { None } else { Some(c) })
    }

    /// Check the invariants the diagram geometry relies on.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".into());
        }
        let digits = self.fingering.chars().count();
        if digits != STRING_COUNT {
            return Err(format!(
                "fingering '{}' has {digits} digits, expected {STRING_COUNT}",
                self.fingering
            ));
        }
        if let Some(c) = self.fingering.chars().find(|c| !c.is_ascii_digit()) {
            return Err(format!("fingering contains non-digit '{c}'"));
        }
        if !(1..=MAX_FRETS_SHOWN).contains(&self.frets_shown) {
            return Err(format!(
                "frets_shown {} is outside 1..={MAX_FRETS_SHOWN}",
                self.frets_shown
            ));
        }
        let top_fret = self.base_fret.checked_add(self.frets_shown).ok_or_else(|| {
            format!(
                "base_fret {} plus frets_shown {} overflows",
                self.base_fret, self.frets_shown
            )
        })?;
        for (i, &raw) in self.strings.iter().enumerate() {
            match StringFret::from_raw(raw) {
                None => return Err(format!("string {} has invalid fret {raw}", i + 1)),
                Some(StringFret::Fretted(fret)) => {
                    if !(self.base_fret..=top_fret).contains(&fret) {
                        return Err(format!(
                            "string {} fret {fret} is outside frets {}..={top_fret}",
                            i + 1,
                            self.base_fret,
                        ));
                    }
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

// ─── Line tokens ─────────────────────────────────────────────────────

/// One piece of a plain line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// Lyric text, kept verbatim (including surrounding spaces)
    Text(String),
    /// Chord marker with brackets and trailing markers stripped
    Chord(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Lyric,
    Chord,
}

/// Placement of one token within a laid-out line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRecord {
    pub kind: TokenKind,
    pub text: String,
    /// Left edge, relative to the margin box
    pub x: f64,
    /// Top of the text box, relative to the margin box (y up)
    pub y: f64,
    pub style: TextStyle,
}

// ─── Directives ──────────────────────────────────────────────────────

/// Bracket directives, in the order the parser tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveKind {
    Title,
    Subtitle,
    ChordDefinitions,
    Comment,
}

impl DirectiveKind {
    pub const PRIORITY: [DirectiveKind; 4] = [
        DirectiveKind::Title,
        DirectiveKind::Subtitle,
        DirectiveKind::ChordDefinitions,
        DirectiveKind::Comment,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            DirectiveKind::Title => "title",
            DirectiveKind::Subtitle => "subtitle",
            DirectiveKind::ChordDefinitions => "chord-definitions",
            DirectiveKind::Comment => "comment",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Directive {
    Title(String),
    Subtitle(String),
    Comment(String),
    ChordDefinitions,
}

impl Directive {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::Title(_) => DirectiveKind::Title,
            Directive::Subtitle(_) => DirectiveKind::Subtitle,
            Directive::Comment(_) => DirectiveKind::Comment,
            Directive::ChordDefinitions => DirectiveKind::ChordDefinitions,
        }
    }
}

/// A directive together with the text around it on the same line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveMatch {
    pub leader: String,
    pub directive: Directive,
    pub trailer: String,
}

/// Classification of one (trimmed) source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParsedLine {
    /// Every directive kind whose pattern matched, in priority order
    Directives(Vec<DirectiveMatch>),
    Plain(String),
}

// ─── Styles ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    Upright,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f64,
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub color: &'static str,
    pub align: Align,
}

impl TextStyle {
    pub const fn plain(size: f64) -> Self {
        TextStyle {
            size,
            weight: FontWeight::Normal,
            slant: FontSlant::Upright,
            color: "#000000",
            align: Align::Left,
        }
    }

    pub const fn bold(self) -> Self {
        TextStyle { weight: FontWeight::Bold, ..self }
    }

    pub const fn italic(self) -> Self {
        TextStyle { slant: FontSlant::Italic, ..self }
    }

    pub const fn centered(self) -> Self {
        TextStyle { align: Align::Center, ..self }
    }

    pub const fn colored(self, color: &'static str) -> Self {
        TextStyle { color, ..self }
    }
}

// ─── Drawing primitives ──────────────────────────────────────────────

/// Which edge of the text the `y` of a [`DrawOp::Text`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Top,
    Baseline,
}

/// A drawing instruction in a y-up coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DrawOp {
    Text {
        text: String,
        x: f64,
        y: f64,
        anchor: TextAnchor,
        style: TextStyle,
    },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// `(x, y)` is the top-left corner
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Circle { cx: f64, cy: f64, r: f64, filled: bool },
}

impl DrawOp {
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        match self {
            DrawOp::Text { text, x, y, anchor, style } => DrawOp::Text {
                text,
                x: x + dx,
                y: y + dy,
                anchor,
                style,
            },
            DrawOp::Line { x1, y1, x2, y2 } => DrawOp::Line {
                x1: x1 + dx,
                y1: y1 + dy,
                x2: x2 + dx,
                y2: y2 + dy,
            },
            DrawOp::Rect { x, y, width, height } => DrawOp::Rect {
                x: x + dx,
                y: y + dy,
                width,
                height,
            },
            DrawOp::Circle { cx, cy, r, filled } => DrawOp::Circle {
                cx: cx + dx,
                cy: cy + dy,
                r,
                filled,
            },
        }
    }

    /// Lowest y the primitive reaches, ignoring text descent.
    pub(crate) fn min_y(&self) -> f64 {
        match self {
            DrawOp::Text { y, .. } => *y,
            DrawOp::Line { y1, y2, .. } => y1.min(*y2),
            DrawOp::Rect { y, height, .. } => y - height,
            DrawOp::Circle { cy, r, .. } => cy - r,
        }
    }
}

/// A finalized page: every primitive in margin-box coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedSheet {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Height of the margin box; the vertical cursor started here
    pub bounds_height: f64,
    pub ops: Vec<DrawOp>,
    /// One entry per drawn diagram, in drawing order. Each
    /// `{chord-definitions}` line appends the whole sorted set again.
    pub legend: Vec<String>,
}
