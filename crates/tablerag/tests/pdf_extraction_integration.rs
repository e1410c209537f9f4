//! End-to-end coverage over real (synthesized) PDF bytes, driving the
//! pdfium-backed extraction strategies and the text fallback through
//! `extract::extract_tables` / `pipeline::process_pdf` rather than feeding
//! hand-built `Table` values straight into the later pipeline stages.
//!
//! The fixtures below are minimal single-content-stream PDFs built directly
//! with `lopdf`: one draws an explicit ruled-line grid (`m`/`l`/`S`
//! operators) for the lattice strategy, one lays text out in an aligned
//! grid with no lines for the stream strategy, and one has a page with body
//! text only, to exercise the whole-document fallback path.
use std::sync::Arc;

use lopdf::{dictionary, Object, Stream};

use tablerag::config::Config;
use tablerag::extract::extract_tables;
use tablerag::pdf::PdfTextExtractor;
use tablerag::pipeline::process_pdf;
use tablerag::types::Strategy;

fn test_config() -> Config {
    Config {
        api_key: "secret".into(),
        pdf_pages: "all".into(),
        max_doc_chars: 6000,
        overlap_chars: 800,
        max_text_pages: 200,
        max_header_rows: 4,
        min_rows_for_table: 2,
        min_cols_for_table: 2,
        extractor_workers: 3,
        camelot_lattice_line_scale: 40,
        camelot_stream_edge_tol: 200,
        camelot_stream_row_tol: 10,
        host: "0.0.0.0".into(),
        port: 8080,
        max_request_body_bytes: 50 * 1024 * 1024,
    }
}

fn pdf_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
}

/// Builds a single-page PDF from one content stream.
fn build_single_page_pdf(content: Vec<u8>) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let media_box =
        vec![Object::Integer(0), Object::Integer(0), Object::Integer(612), Object::Integer(792)];

    let stream = Stream::new(dictionary! {}, content);
    let content_id = doc.add_object(stream);
    let resources = dictionary! { "Font" => dictionary! { "F1" => Object::Reference(font) } };

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => media_box,
        "Contents" => Object::Reference(content_id),
        "Resources" => resources,
    });

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
    });
    if let Ok(obj) = doc.get_object_mut(page_id) {
        if let Ok(dict) = obj.as_dict_mut() {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => Object::Reference(pages_id) });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A ruled-line `rows x cols` grid with one short token per cell, drawn with
/// `m`/`l`/`S` line operators the way a real table's cell borders would be.
fn lattice_table_content(rows: usize, cols: usize) -> Vec<u8> {
    let x_start = 72.0_f64;
    let y_start = 600.0;
    let cell_w = 80.0;
    let cell_h = 20.0;
    let table_w = cols as f64 * cell_w;
    let table_h = rows as f64 * cell_h;

    let mut ops = String::new();
    for r in 0..=rows {
        let y = y_start + r as f64 * cell_h;
        ops.push_str(&format!("{x_start} {y} m {} {y} l S\n", x_start + table_w));
    }
    for c in 0..=cols {
        let x = x_start + c as f64 * cell_w;
        ops.push_str(&format!("{x} {y_start} m {x} {} l S\n", y_start + table_h));
    }

    ops.push_str("BT\n/F1 8 Tf\n");
    for r in 0..rows {
        for c in 0..cols {
            let x = x_start + c as f64 * cell_w + 4.0;
            let y = y_start + r as f64 * cell_h + 6.0;
            let text = format!("R{}C{}", r + 1, c + 1);
            ops.push_str(&format!("{x} {y} Td ({text}) Tj\n"));
        }
    }
    ops.push_str("ET\n");
    ops.into_bytes()
}

/// A whitespace-aligned `rows x cols` grid of text with no drawn lines at
/// all, for the stream strategy.
fn stream_table_content(rows: usize, cols: usize) -> Vec<u8> {
    let x_start = 72.0_f64;
    let y_start = 700.0;
    let col_width = 100.0;
    let row_height = 16.0;

    let mut ops = String::from("BT\n/F1 10 Tf\n");
    for r in 0..rows {
        for c in 0..cols {
            let x = x_start + c as f64 * col_width;
            let y = y_start - r as f64 * row_height;
            let text = format!("Data-{}-{}", r + 1, c + 1);
            ops.push_str(&format!("{x} {y} Td ({text}) Tj\n"));
        }
    }
    ops.push_str("ET\n");
    ops.into_bytes()
}

fn prose_content(lines: &[&str]) -> Vec<u8> {
    let mut ops = String::from("BT\n/F1 10 Tf\n72 720 Td\n");
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            ops.push_str("0 -14 Td\n");
        }
        ops.push_str(&format!("({}) Tj\n", pdf_escape(line)));
    }
    ops.push_str("ET\n");
    ops.into_bytes()
}

#[tokio::test]
async fn lattice_strategy_finds_a_ruled_line_table() {
    let pdf_bytes = build_single_page_pdf(lattice_table_content(4, 3));
    let extractor = Arc::new(PdfTextExtractor::new().expect("pdfium must bind in the test environment"));
    let config = test_config();

    let scratch = tablerag::pdf::RequestPdfFile::write(&pdf_bytes).unwrap();
    let pdf_path = Arc::new(scratch.path_buf());

    let tables = extract_tables(pdf_path, extractor, &config).await.unwrap();
    let lattice_tables: Vec<_> = tables.iter().filter(|t| t.strategy == Strategy::Lattice).collect();
    assert!(!lattice_tables.is_empty(), "lattice strategy should find the ruled-line grid");
    assert!(lattice_tables[0].rows.iter().flatten().any(|cell| cell.contains("R1C1")));
}

#[tokio::test]
async fn lattice_strategy_finds_nothing_on_a_page_with_no_ruled_lines() {
    let pdf_bytes = build_single_page_pdf(stream_table_content(4, 3));
    let extractor = Arc::new(PdfTextExtractor::new().expect("pdfium must bind in the test environment"));
    let config = test_config();

    let scratch = tablerag::pdf::RequestPdfFile::write(&pdf_bytes).unwrap();
    let pdf_path = Arc::new(scratch.path_buf());

    let tables = extract_tables(pdf_path, extractor, &config).await.unwrap();
    assert!(
        tables.iter().all(|t| t.strategy != Strategy::Lattice),
        "lattice must not match a page with no ruled lines, even though stream/plumber will"
    );
    assert!(tables.iter().any(|t| t.strategy == Strategy::Stream || t.strategy == Strategy::Plumber));
}

#[tokio::test]
async fn process_pdf_with_a_table_emits_table_documents() {
    let pdf_bytes = build_single_page_pdf(lattice_table_content(4, 3));
    let config = test_config();

    let documents = process_pdf(&pdf_bytes, "grid.pdf", &config).await.unwrap();
    assert!(!documents.is_empty());
    assert!(documents.iter().any(|d| d.metadata.table_id.is_some()));
}

#[tokio::test]
async fn process_pdf_with_no_table_falls_back_to_whole_document_text() {
    let pdf_bytes = build_single_page_pdf(prose_content(&[
        "This page has ordinary paragraph text and no table at all.",
        "A second line continues the paragraph.",
    ]));
    let config = test_config();

    let documents = process_pdf(&pdf_bytes, "prose.pdf", &config).await.unwrap();
    assert_eq!(documents.len(), 1);
    assert!(documents[0].text.contains("ordinary paragraph text"));
    assert!(documents[0].metadata.table_id.is_none());
}
