//! SVG builder — accumulates SVG elements and produces the final string.
//!
//! Also converts a finalized sheet (y up, margin-box relative) into SVG
//! user space (y down, page relative).

use super::constants::*;
use crate::model::{Align, DrawOp, FontSlant, FontWeight, RenderedSheet, TextAnchor, TextStyle};

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub(super) struct SvgBuilder {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgBuilder {
    pub(super) fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub(super) fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" style="font-family: 'Helvetica', 'Arial', sans-serif;">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            x1, y1, x2, y2, color, width
        ));
    }

    pub(super) fn rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: &str,
        stroke: &str,
        stroke_width: f64,
    ) {
        if stroke_width > 0.0 {
            self.elements.push(format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}"/>"#,
                x, y, w, h, fill, stroke, stroke_width
            ));
        } else {
            self.elements.push(format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                x, y, w, h, fill
            ));
        }
    }

    pub(super) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, stroke: &str) {
        self.elements.push(format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}"/>"#,
            cx, cy, r, fill, stroke, STROKE_WIDTH
        ));
    }

    pub(super) fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        let escaped = content
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        let weight = match style.weight {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        };
        let font_style = match style.slant {
            FontSlant::Upright => "normal",
            FontSlant::Italic => "italic",
        };
        let anchor = match style.align {
            Align::Left => "start",
            Align::Center => "middle",
        };
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" font-weight="{}" font-style="{}" fill="{}" text-anchor="{}" xml:space="preserve">{}</text>"#,
            x, y, style.size, weight, font_style, style.color, anchor, escaped
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Sheet → SVG
// ═══════════════════════════════════════════════════════════════════════

/// Serialize a finalized sheet as a self-contained SVG document.
pub fn sheet_to_svg(sheet: &RenderedSheet) -> String {
    let mut svg = SvgBuilder::new(sheet.width, sheet.height);
    svg.rect(0.0, 0.0, sheet.width, sheet.height, "white", "none", 0.0);

    let px = |x: f64| sheet.margin + x;
    let py = |y: f64| sheet.margin + (sheet.bounds_height - y);

    for op in &sheet.ops {
        match op {
            DrawOp::Text { text, x, y, anchor, style } => {
                if text.trim().is_empty() {
                    continue;
                }
                let baseline = match anchor {
                    TextAnchor::Top => y - style.size * FONT_ASCENT,
                    TextAnchor::Baseline => *y,
                };
                svg.text(px(*x), py(baseline), text, style);
            }
            DrawOp::Line { x1, y1, x2, y2 } => {
                svg.line(px(*x1), py(*y1), px(*x2), py(*y2), STROKE_COLOR, STROKE_WIDTH);
            }
            DrawOp::Rect { x, y, width, height } => {
                svg.rect(px(*x), py(*y), *width, *height, "none", STROKE_COLOR, STROKE_WIDTH);
            }
            DrawOp::Circle { cx, cy, r, filled } => {
                let fill = if *filled { STROKE_COLOR } else { "none" };
                svg.circle(px(*cx), py(*cy), *r, fill, STROKE_COLOR);
            }
        }
    }

    svg.build()
}
