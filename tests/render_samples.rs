//! Rendering tests — lay out sample songs and inline documents.

use std::path::PathBuf;
use std::sync::Arc;

use chordsheet::renderer::TextMetrics;
use chordsheet::{
    load_chord_library, read_file, render_file_to_svg, render_str, scan_chord_references,
    sheet_to_json, Align, ChordLibrary, DrawOp, Error, FontWeight, RenderOptions, RenderedSheet,
    TextMeasurer, TextStyle,
};
use pretty_assertions::assert_eq;

fn songs_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("songs")
}

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// 6 per character in normal weight, 7 in bold; height equals font size.
struct FixedMeasurer;

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let per_char = match style.weight {
            FontWeight::Normal => 6.0,
            FontWeight::Bold => 7.0,
        };
        TextMetrics {
            width: text.chars().count() as f64 * per_char,
            height: style.size,
        }
    }
}

fn fixed_options() -> RenderOptions {
    RenderOptions {
        text_measurer: Arc::new(FixedMeasurer),
        ..RenderOptions::default()
    }
}

fn render(doc: &str) -> RenderedSheet {
    render_str(doc, ChordLibrary::builtin(), &fixed_options()).expect("render failed")
}

/// (text, x, y) of every non-blank text primitive.
fn texts(sheet: &RenderedSheet) -> Vec<(String, f64, f64)> {
    sheet
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } if !text.trim().is_empty() => {
                Some((text.clone(), *x, *y))
            }
            _ => None,
        })
        .collect()
}

#[test]
fn render_amazing_grace_svg() {
    let path = songs_dir().join("amazing-grace.cho");
    let svg = render_file_to_svg(&path, ChordLibrary::builtin(), &RenderOptions::default())
        .expect("Failed to render amazing-grace");

    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.contains("</svg>"), "SVG should be closed");
    assert!(svg.contains("Amazing Grace"), "SVG should contain title");
    assert!(svg.contains("John Newton"), "SVG should contain subtitle");
    assert!(svg.contains("<circle"), "SVG should contain diagram marks");

    let doc = roxmltree::Document::parse(&svg).expect("SVG should be well-formed XML");
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    let rects = root.children().filter(|n| n.has_tag_name("rect")).count();
    // background + one grid per legend chord
    assert_eq!(rects, 1 + 5);

    let out = output_dir().join("amazing-grace.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
}

#[test]
fn legend_matches_referenced_chords() {
    let text = read_file(songs_dir().join("rising-sun.cho")).unwrap();
    let sheet = render_str(&text, ChordLibrary::builtin(), &fixed_options()).unwrap();

    let scanned: Vec<String> = scan_chord_references(&text).into_iter().collect();
    assert_eq!(sheet.legend, scanned);
    assert_eq!(sheet.legend, vec!["Am", "C", "D7", "Em", "F"]);
}

#[test]
fn legend_is_sorted_not_in_order_of_use() {
    let sheet = render("[G] [C]\n{chord-definitions}");
    assert_eq!(sheet.legend, vec!["C", "G"]);

    let names: Vec<(String, f64)> = sheet
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, x, style, .. } if style.align == Align::Center => {
                Some((text.clone(), *x))
            }
            _ => None,
        })
        .collect();
    // legend box at x = 72, diagram names centred 15 into each 50-wide slot
    assert_eq!(names, vec![("C".to_string(), 87.0), ("G".to_string(), 137.0)]);
}

#[test]
fn title_alone_emits_one_centred_bold_line() {
    let sheet = render("{title: My Song}");
    assert_eq!(sheet.ops.len(), 1);
    match &sheet.ops[0] {
        DrawOp::Text { text, x, y, style, .. } => {
            assert_eq!(text, "My Song");
            assert_eq!(*x, 270.0);
            assert_eq!(*y, 720.0);
            assert_eq!(style.weight, FontWeight::Bold);
            assert_eq!(style.align, Align::Center);
            assert_eq!(style.size, 18.0);
        }
        other => panic!("expected title text, got {other:?}"),
    }
}

#[test]
fn leader_and_trailer_flow_around_directive() {
    let sheet = render("Intro: {comment: slowly} x2");
    assert_eq!(
        texts(&sheet),
        vec![
            ("Intro: ".to_string(), 0.0, 720.0),
            ("slowly".to_string(), 0.0, 708.0),
            (" x2".to_string(), 0.0, 696.0),
        ]
    );
}

#[test]
fn chord_line_reserves_raised_baseline() {
    let sheet = render("Hello [C]world\nnext");
    assert_eq!(
        texts(&sheet),
        vec![
            ("Hello ".to_string(), 0.0, 708.0),
            ("C".to_string(), 36.0, 720.0),
            ("world".to_string(), 36.0, 708.0),
            // one trailing spacer below the lyric line, no leading spacer
            ("next".to_string(), 0.0, 696.0),
        ]
    );
}

#[test]
fn empty_lines_become_blank_spacers() {
    let sheet = render("one\n\ntwo");
    let ys: Vec<f64> = texts(&sheet).into_iter().map(|(_, _, y)| y).collect();
    assert_eq!(ys, vec![720.0, 696.0]);
}

#[test]
fn every_directive_on_a_line_is_rendered() {
    let doc = "{title: A} {comment: B}";
    let expected = vec![("A".to_string(), 270.0, 720.0), ("B".to_string(), 0.0, 702.0)];
    assert_eq!(texts(&render(doc)), expected);

    let strict = RenderOptions { strict: true, ..fixed_options() };
    let sheet = render_str(doc, ChordLibrary::builtin(), &strict).expect("strict render");
    assert_eq!(texts(&sheet), expected);
}

#[test]
fn legend_records_one_entry_per_drawn_diagram() {
    let sheet = render("[G]\n{chord-definitions}\n{chord-definitions}");
    assert_eq!(sheet.legend, vec!["G", "G"]);

    // as a set it still equals the scanned references
    let drawn: std::collections::BTreeSet<String> = sheet.legend.iter().cloned().collect();
    assert_eq!(drawn, scan_chord_references("[G]"));
}

#[test]
fn unknown_legend_chord_is_an_error() {
    let path = songs_dir().join("unknown-chord.cho");
    match render_file_to_svg(&path, ChordLibrary::builtin(), &RenderOptions::default()) {
        Err(err @ Error::UnknownChord { .. }) => assert_eq!(err.to_string(), "unknown chord: Bb9"),
        other => panic!("expected UnknownChord, got {other:?}"),
    }
}

#[test]
fn unknown_chord_in_lyrics_only_is_fine() {
    let sheet = render("Sing [Bb9]this");
    assert!(texts(&sheet).iter().any(|(t, _, _)| t == "Bb9"));
}

#[test]
fn custom_library_supplies_missing_chord() {
    let library = load_chord_library(songs_dir().join("custom-chords.json")).unwrap();
    let path = songs_dir().join("unknown-chord.cho");
    let svg = render_file_to_svg(&path, &library, &RenderOptions::default()).unwrap();
    assert!(svg.contains("Bb9"));
}

#[test]
fn malformed_directive_is_dropped_unless_strict() {
    let text = read_file(songs_dir().join("malformed.cho")).unwrap();

    let sheet = render_str(&text, ChordLibrary::builtin(), &fixed_options()).unwrap();
    let rendered: Vec<String> = texts(&sheet).into_iter().map(|(t, _, _)| t).collect();
    assert_eq!(rendered, vec!["Broken Lines", "G", "still ", "C", "renders"]);

    let strict = RenderOptions { strict: true, ..fixed_options() };
    match render_str(&text, ChordLibrary::builtin(), &strict) {
        Err(Error::MalformedDirective { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected MalformedDirective, got {other:?}"),
    }
}

#[test]
fn long_legend_wraps_rows() {
    let json = (0..10)
        .map(|i| {
            format!(
                r#"{{"name": "X{i}", "base_fret": 0, "frets_shown": 4, "strings": [0, 0, 0, 0], "fingering": "0000"}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    let library = ChordLibrary::from_json(&format!("[{json}]")).unwrap();
    let doc = (0..10).map(|i| format!("[X{i}]")).collect::<String>()
        + "\n{chord-definitions}\nafter";
    let sheet = render_str(&doc, &library, &fixed_options()).unwrap();

    assert_eq!(sheet.legend.len(), 10);
    let diagram_names: Vec<(String, f64, f64)> = sheet
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, x, y, style, .. } if style.align == Align::Center => {
                Some((text.clone(), *x, *y))
            }
            _ => None,
        })
        .collect();
    let x8 = &diagram_names[8];
    let x9 = &diagram_names[9];
    assert_eq!((x8.0.as_str(), x8.1), ("X8", 72.0 + 8.0 * 50.0 + 15.0));
    // the tenth diagram starts a second row at the left edge, 50 lower
    assert_eq!((x9.0.as_str(), x9.1), ("X9", 87.0));
    assert_eq!(x8.2 - x9.2, 50.0);

    // text after the legend sits below both rows
    let after = texts(&sheet).into_iter().find(|(t, _, _)| t == "after").unwrap();
    let legend_top = 720.0 - 12.0 - 12.0; // chord spacer + trailing spacer
    assert_eq!(after.2, legend_top - 100.0);
}

#[test]
fn sheet_serializes_to_json() {
    let sheet = render("{title: Json}\n[G]la");
    let json = sheet_to_json(&sheet).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["legend"], serde_json::json!([]));
    assert_eq!(value["ops"][0]["op"], "text");
    assert_eq!(value["ops"][0]["text"], "Json");
}
