//! Chord diagram geometry — turns a chord shape into drawing primitives in
//! the diagram's local box (origin bottom-left, y up).
//!
//! Layout, top to bottom: chord name, mute/open marks on the nut row, the
//! string × fret grid with dots, finger digits.

use super::constants::*;
use super::text::TextMeasurer;
use crate::model::{Chord, DrawOp, StringFret, TextAnchor, STRING_COUNT};

/// Vertical positions of one diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramMetrics {
    pub grid_top: f64,
    pub nut_row: f64,
    /// Total box height: grid plus the chord name above it
    pub height: f64,
}

impl DiagramMetrics {
    pub fn for_chord(chord: &Chord, name_height: f64) -> Self {
        let rows = chord.frets_shown.max(1) as f64;
        let grid_top = GRID_BOTTOM + rows * FRET_ROW_HEIGHT;
        DiagramMetrics {
            grid_top,
            nut_row: grid_top + NUT_ROW_OFFSET,
            height: grid_top + name_height,
        }
    }

    /// Height of a diagram for `chord` with names measured by `measurer`.
    pub fn measure(chord: &Chord, measurer: &dyn TextMeasurer) -> Self {
        Self::for_chord(chord, measurer.height_of("C", &DIAGRAM_NAME_STYLE))
    }
}

fn string_x(index: usize) -> f64 {
    STRING_X0 + index as f64 * STRING_PITCH
}

/// Vertical centre of the dot for `fret` on a diagram starting at `base_fret`.
pub fn dot_y(metrics: &DiagramMetrics, base_fret: u32, fret: u32) -> f64 {
    metrics.nut_row - (fret as f64 - base_fret as f64) * FRET_ROW_HEIGHT
}

/// Drawing primitives for `chord`, with the name measured by `measurer`.
pub fn layout_diagram(chord: &Chord, measurer: &dyn TextMeasurer) -> Vec<DrawOp> {
    let metrics = DiagramMetrics::measure(chord, measurer);
    let mut ops = Vec::new();

    ops.push(DrawOp::Text {
        text: chord.name.clone(),
        x: DIAGRAM_WIDTH / 2.0,
        y: metrics.height,
        anchor: TextAnchor::Top,
        style: DIAGRAM_NAME_STYLE,
    });

    // Grid
    let left = string_x(0);
    let right = string_x(STRING_COUNT - 1);
    ops.push(DrawOp::Rect {
        x: left,
        y: metrics.grid_top,
        width: right - left,
        height: metrics.grid_top - GRID_BOTTOM,
    });
    for i in 1..STRING_COUNT - 1 {
        let x = string_x(i);
        ops.push(DrawOp::Line { x1: x, y1: GRID_BOTTOM, x2: x, y2: metrics.grid_top });
    }
    let mut y = GRID_BOTTOM + FRET_ROW_HEIGHT;
    while y < metrics.grid_top {
        ops.push(DrawOp::Line { x1: left, y1: y, x2: right, y2: y });
        y += FRET_ROW_HEIGHT;
    }

    if chord.base_fret > 0 {
        ops.push(DrawOp::Text {
            text: chord.base_fret.to_string(),
            x: BASE_FRET_LABEL_X,
            y: metrics.grid_top - NUT_ROW_OFFSET,
            anchor: TextAnchor::Baseline,
            style: ANNOTATION_STYLE,
        });
    }

    for (i, fret) in chord.string_frets().enumerate() {
        let x = string_x(i);
        match fret {
            StringFret::Muted => {
                let low = metrics.grid_top + 1.0;
                let high = low + 2.0 * MUTE_HALF_WIDTH;
                ops.push(DrawOp::Line {
                    x1: x - MUTE_HALF_WIDTH,
                    y1: low,
                    x2: x + MUTE_HALF_WIDTH,
                    y2: high,
                });
                ops.push(DrawOp::Line {
                    x1: x + MUTE_HALF_WIDTH,
                    y1: low,
                    x2: x - MUTE_HALF_WIDTH,
                    y2: high,
                });
            }
            StringFret::Open => ops.push(DrawOp::Circle {
                cx: x,
                cy: metrics.nut_row,
                r: MARK_RADIUS,
                filled: false,
            }),
            StringFret::Fretted(f) => ops.push(DrawOp::Circle {
                cx: x,
                cy: dot_y(&metrics, chord.base_fret, f),
                r: MARK_RADIUS,
                filled: true,
            }),
        }
    }

    for (i, finger) in chord.fingers().enumerate() {
        if let Some(digit) = finger {
            ops.push(DrawOp::Text {
                text: digit.to_string(),
                x: string_x(i) - 2.0,
                y: FINGER_LABEL_Y,
                anchor: TextAnchor::Baseline,
                style: ANNOTATION_STYLE,
            });
        }
    }

    ops
}
