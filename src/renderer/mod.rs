//! Sheet renderer — drives the parser, layout engine and chord diagrams
//! line by line over a [`Page`], then finalizes it.
//!
//! The renderer computes its own layout from the source text and produces
//! either a [`RenderedSheet`] (serializable page description) or a
//! self-contained SVG string.

mod constants;
mod diagram;
mod layout;
mod page;
mod svg_builder;
mod text;

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::chords::ChordLibrary;
use crate::error::{Error, Result};
use crate::model::{Directive, DirectiveMatch, DrawOp, ParsedLine, RenderedSheet, TextAnchor};
use crate::parser::{has_chord_marker, parse_line};
use crate::scanner::scan_chord_references;
use constants::*;

pub use diagram::{dot_y, layout_diagram, DiagramMetrics};
pub use layout::{layout_line, layout_tokens, LineLayout};
pub use page::{Frame, Page, PageSetup, Surface};
pub use svg_builder::sheet_to_svg;
pub use text::{EstimatedTextMeasurer, TextMeasurer, TextMetrics};

// ═══════════════════════════════════════════════════════════════════════
// Options
// ═══════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RenderOptions {
    pub page: PageSetup,
    /// Abort on a malformed directive instead of dropping the line
    pub strict: bool,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page: PageSetup::default(),
            strict: false,
            text_measurer: Arc::new(EstimatedTextMeasurer::default()),
        }
    }
}

impl std::fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("page", &self.page)
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Lay out a whole chord sheet.
pub fn render_sheet(
    document: &str,
    library: &ChordLibrary,
    options: &RenderOptions,
) -> Result<RenderedSheet> {
    let referenced = scan_chord_references(document);
    info!(
        "rendering {} lines, {} referenced chords",
        document.lines().count(),
        referenced.len()
    );
    for name in referenced.iter().filter(|name| !library.contains(name)) {
        warn!("chord '{name}' is not in the chord library");
    }

    let mut page = Page::new(options.page, options.text_measurer.clone());
    for (index, raw) in document.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        match parse_line(line_number, line) {
            Ok(ParsedLine::Directives(matches)) => {
                for m in &matches {
                    render_directive(&mut page, m, &referenced, library)?;
                }
            }
            Ok(ParsedLine::Plain(text)) => render_plain_line(&mut page, &text),
            Err(err @ Error::MalformedDirective { .. }) if !options.strict => {
                warn!("skipping line: {err}");
            }
            Err(err) => return Err(err),
        }
    }

    let sheet = page.finalize();
    info!("finished sheet: {} primitives, height {:.1}", sheet.ops.len(), sheet.height);
    Ok(sheet)
}

/// Lay out a chord sheet and serialize it as SVG.
pub fn render_sheet_to_svg(
    document: &str,
    library: &ChordLibrary,
    options: &RenderOptions,
) -> Result<String> {
    render_sheet(document, library, options).map(|sheet| sheet_to_svg(&sheet))
}

// ═══════════════════════════════════════════════════════════════════════
// Line handlers
// ═══════════════════════════════════════════════════════════════════════

fn render_directive(
    page: &mut Page,
    m: &DirectiveMatch,
    referenced: &BTreeSet<String>,
    library: &ChordLibrary,
) -> Result<()> {
    debug!(
        "directive {} (leader {:?}, trailer {:?})",
        m.directive.kind(),
        m.leader,
        m.trailer
    );

    if !m.leader.trim().is_empty() {
        page.text(&m.leader, &BODY_STYLE);
    }

    match &m.directive {
        Directive::Title(title) => page.text(title, &TITLE_STYLE),
        Directive::Subtitle(subtitle) => page.text(subtitle, &SUBTITLE_STYLE),
        Directive::Comment(comment) => page.text(comment, &COMMENT_STYLE),
        Directive::ChordDefinitions => render_legend(page, referenced, library)?,
    }

    if !m.trailer.trim().is_empty() {
        page.text(&m.trailer, &BODY_STYLE);
    }
    Ok(())
}

fn render_plain_line(page: &mut Page, line: &str) {
    if has_chord_marker(line) {
        page.text(" ", &BODY_STYLE);
    }

    let layout = layout_line(line, page.cursor(), page.measurer());
    debug!("{line} --- width = {:.1}", layout.end_x);
    for record in layout.records {
        page.draw(DrawOp::Text {
            text: record.text,
            x: record.x,
            y: record.y,
            anchor: TextAnchor::Top,
            style: record.style,
        });
    }

    page.text(" ", &BODY_STYLE);
}

/// Draw one diagram per referenced chord, in sorted order, left to right.
/// Rows wrap when the next diagram would cross the right edge.
fn render_legend(
    page: &mut Page,
    referenced: &BTreeSet<String>,
    library: &ChordLibrary,
) -> Result<()> {
    let chords = referenced
        .iter()
        .map(|name| library.require(name))
        .collect::<Result<Vec<_>>>()?;

    let per_row = (((LEGEND_WIDTH - DIAGRAM_WIDTH) / LEGEND_PITCH).floor() as usize + 1).max(1);
    let rows = chords.len().div_ceil(per_row).max(1);
    let height = rows as f64 * LEGEND_ROW_HEIGHT;

    let diagrams: Vec<_> = chords
        .iter()
        .map(|chord| {
            let measurer = page.measurer();
            (layout_diagram(chord, measurer), DiagramMetrics::measure(chord, measurer))
        })
        .collect();

    page.reserve_box(LEGEND_X, LEGEND_WIDTH, height, |frame| {
        for (i, (ops, metrics)) in diagrams.into_iter().enumerate() {
            let column = (i % per_row) as f64;
            let row = (i / per_row) as f64;
            let top = frame.height - row * LEGEND_ROW_HEIGHT;
            frame.place(ops, column * LEGEND_PITCH, top - metrics.height);
        }
        Ok(())
    })?;

    for chord in &chords {
        page.record_legend_chord(&chord.name);
    }
    Ok(())
}
