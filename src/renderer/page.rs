//! Rendering surface — a page with a vertical cursor that records drawing
//! primitives for one conversion run.
//!
//! Coordinates are relative to the margin box with y pointing up: the
//! cursor starts at the top of the box and moves down as text flows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::constants::*;
use super::text::{TextMeasurer, TextMetrics};
use crate::error::Result;
use crate::model::{Align, DrawOp, RenderedSheet, TextAnchor, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_WIDTH,
            height: DEFAULT_PAGE_HEIGHT,
            margin: DEFAULT_PAGE_MARGIN,
        }
    }
}

impl PageSetup {
    pub fn bounds_width(&self) -> f64 {
        (self.width - 2.0 * self.margin).max(0.0)
    }

    pub fn bounds_height(&self) -> f64 {
        (self.height - 2.0 * self.margin).max(0.0)
    }
}

/// What the layout code needs from a page: measurement, a cursor, and a
/// place to put primitives.
pub trait Surface {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
    fn cursor(&self) -> f64;
    fn move_down(&mut self, dy: f64);
    fn bounds_width(&self) -> f64;
    fn draw(&mut self, op: DrawOp);

    /// Flowing text: box top at the cursor, then the cursor moves below it.
    fn text(&mut self, text: &str, style: &TextStyle) {
        let metrics = self.measure(text, style);
        let x = match style.align {
            Align::Left => 0.0,
            Align::Center => self.bounds_width() / 2.0,
        };
        let y = self.cursor();
        self.draw(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            anchor: TextAnchor::Top,
            style: *style,
        });
        self.move_down(metrics.height);
    }

    /// Reserve a `width` × `height` box at horizontal offset `x` whose top
    /// sits at the cursor. `draw` works in the box's own coordinates
    /// (origin bottom-left); the cursor ends up at the bottom of the box.
    fn reserve_box<F>(&mut self, x: f64, width: f64, height: f64, draw: F) -> Result<()>
    where
        Self: Sized,
        F: FnOnce(&mut Frame) -> Result<()>,
    {
        let mut frame = Frame::new(width, height);
        draw(&mut frame)?;
        let bottom = self.cursor() - height;
        for op in frame.ops {
            self.draw(op.translated(x, bottom));
        }
        self.move_down(height);
        Ok(())
    }
}

/// Local drawing area handed out by [`Surface::reserve_box`].
#[derive(Debug)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    ops: Vec<DrawOp>,
}

impl Frame {
    fn new(width: f64, height: f64) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Place a group of primitives with its local origin at `(x, y)`.
    pub fn place(&mut self, ops: Vec<DrawOp>, x: f64, y: f64) {
        self.ops.extend(ops.into_iter().map(|op| op.translated(x, y)));
    }
}

/// The page of one conversion run. Owned by the document assembler and
/// passed explicitly to every layout step.
pub struct Page {
    setup: PageSetup,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    cursor: f64,
    ops: Vec<DrawOp>,
    legend: Vec<String>,
}

impl Page {
    pub fn new(setup: PageSetup, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        Self {
            setup,
            measurer,
            cursor: setup.bounds_height(),
            ops: Vec::new(),
            legend: Vec::new(),
        }
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub(crate) fn record_legend_chord(&mut self, name: &str) {
        self.legend.push(name.to_string());
    }

    /// Close the page. The sheet grows past the page height when the
    /// content runs below the bottom margin.
    pub fn finalize(self) -> RenderedSheet {
        let bounds_height = self.setup.bounds_height();
        let lowest = self
            .ops
            .iter()
            .map(DrawOp::min_y)
            .fold(self.cursor, f64::min)
            .min(0.0);
        RenderedSheet {
            width: self.setup.width,
            height: self.setup.height - lowest,
            margin: self.setup.margin,
            bounds_height,
            ops: self.ops,
            legend: self.legend,
        }
    }
}

impl Surface for Page {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        self.measurer.measure(text, style)
    }

    fn cursor(&self) -> f64 {
        self.cursor
    }

    fn move_down(&mut self, dy: f64) {
        self.cursor -= dy;
    }

    fn bounds_width(&self) -> f64 {
        self.setup.bounds_width()
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}
