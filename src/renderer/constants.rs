//! Shared constants for the sheet renderer (all in points).

use crate::model::TextStyle;

// ── Page & margins ──────────────────────────────────────────────────
pub(crate) const DEFAULT_PAGE_WIDTH: f64 = 612.0; // US Letter
pub(crate) const DEFAULT_PAGE_HEIGHT: f64 = 792.0;
pub(crate) const DEFAULT_PAGE_MARGIN: f64 = 36.0;

// ── Text styles ─────────────────────────────────────────────────────
pub(crate) const BODY_STYLE: TextStyle = TextStyle::plain(12.0);
pub(crate) const TITLE_STYLE: TextStyle = TextStyle::plain(18.0)
    .bold()
    .centered()
    .colored(TITLE_COLOR);
pub(crate) const SUBTITLE_STYLE: TextStyle = TextStyle::plain(14.0).italic().centered();
pub(crate) const COMMENT_STYLE: TextStyle = TextStyle::plain(12.0).bold();
pub(crate) const CHORD_LABEL_STYLE: TextStyle = TextStyle::plain(12.0).bold().colored(CHORD_COLOR);
pub(crate) const DIAGRAM_NAME_STYLE: TextStyle = TextStyle::plain(12.0).bold().centered();
pub(crate) const ANNOTATION_STYLE: TextStyle = TextStyle::plain(6.0);

// ── Colors ──────────────────────────────────────────────────────────
pub(crate) const TITLE_COLOR: &str = "#00FF00";
pub(crate) const CHORD_COLOR: &str = "#FF0000";
pub(crate) const STROKE_COLOR: &str = "#000000";

/// Two blanks separate chords that follow each other with no lyric between.
pub(crate) const CHORD_GAP: &str = "  ";

// ── Chord diagram (local box, y up) ─────────────────────────────────
pub(crate) const DIAGRAM_WIDTH: f64 = 30.0;
pub(crate) const STRING_X0: f64 = 6.0; // leftmost string lane
pub(crate) const STRING_PITCH: f64 = 6.0;
pub(crate) const FRET_ROW_HEIGHT: f64 = 6.0;
pub(crate) const GRID_BOTTOM: f64 = 12.0;
pub(crate) const NUT_ROW_OFFSET: f64 = 3.0; // above the grid top
pub(crate) const MARK_RADIUS: f64 = 2.0; // open circles and dots
pub(crate) const MUTE_HALF_WIDTH: f64 = 2.0;
pub(crate) const BASE_FRET_LABEL_X: f64 = 26.0;
pub(crate) const FINGER_LABEL_Y: f64 = 6.0;

// ── Legend ──────────────────────────────────────────────────────────
pub(crate) const LEGEND_X: f64 = 72.0;
pub(crate) const LEGEND_WIDTH: f64 = 468.0;
pub(crate) const LEGEND_ROW_HEIGHT: f64 = 50.0;
pub(crate) const LEGEND_PITCH: f64 = 50.0;

// ── SVG output ──────────────────────────────────────────────────────
pub(crate) const FONT_ASCENT: f64 = 0.718; // Helvetica ascender, em units
pub(crate) const STROKE_WIDTH: f64 = 1.0;
