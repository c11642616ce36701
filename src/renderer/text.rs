//! Text measurement used by the layout engine.
//!
//! Layout never computes font metrics itself; it asks a [`TextMeasurer`]
//! for the width and height of a string in a given style.

use unicode_width::UnicodeWidthStr;

use crate::model::{FontWeight, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    fn width_of(&self, text: &str, style: &TextStyle) -> f64 {
        self.measure(text, style).width
    }

    fn height_of(&self, text: &str, style: &TextStyle) -> f64 {
        self.measure(text, style).height
    }
}

/// Estimates metrics from display width; close to Helvetica on average.
#[derive(Debug, Clone)]
pub struct EstimatedTextMeasurer {
    pub char_width_factor: f64,
    pub bold_width_factor: f64,
    pub line_height_factor: f64,
}

impl Default for EstimatedTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.5,
            bold_width_factor: 0.56,
            line_height_factor: 1.156,
        }
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let factor = match style.weight {
            FontWeight::Normal => self.char_width_factor,
            FontWeight::Bold => self.bold_width_factor,
        };
        // Wide (CJK) characters count as two columns.
        let columns = UnicodeWidthStr::width(text) as f64;
        TextMetrics {
            width: columns * style.size * factor,
            height: style.size * self.line_height_factor,
        }
    }
}
