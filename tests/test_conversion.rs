//! End-to-end conversion tests: in-memory and generated PDF documents to
//! XLSX files.

use pdf2xlsx::source::{raw_table, MemorySource};
use pdf2xlsx::{ConversionConfig, Converter, SkipReason, TableStatus};
use std::io::Read;
use std::path::{Path, PathBuf};

fn sample_document() -> MemorySource {
    MemorySource::new().with_page(
        Some("Revenue 42\nGrowth 3.5%"),
        vec![raw_table([["Name", "Qty"], ["A", "10"]])],
    )
}

fn write_pdf(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    pdf_oxide::api::Pdf::from_text(text)
        .expect("Failed to create PDF")
        .save(&path)
        .expect("Failed to write PDF");
    path
}

fn read_worksheet(path: &Path) -> String {
    let file = std::fs::File::open(path).expect("workbook exists");
    let mut archive = zip::ZipArchive::new(file).expect("workbook is a zip");
    let mut part = archive
        .by_name("xl/worksheets/sheet1.xml")
        .expect("worksheet part");
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_end_to_end_layout() {
    let mut source = sample_document();
    let conversion = Converter::default().convert_document(&mut source).unwrap();
    let sheet = &conversion.sheet;

    let expected: Vec<Vec<&str>> = vec![
        vec!["=== Page 1 Text ==="],
        vec!["Revenue 42"],
        vec!["Growth 3.5%"],
        vec![],
        vec!["=== Page 1 Table 1 ==="],
        vec!["Name", "Qty"],
        vec!["A", "10"],
        vec![],
        vec!["=== Extracted Numbers ==="],
        vec!["42", "3.5%", "10"],
    ];
    assert_eq!(sheet.max_row() as usize, expected.len());
    for (i, row) in expected.iter().enumerate() {
        assert_eq!(&sheet.row_values(i as u32 + 1), row, "row {}", i + 1);
    }
    assert_eq!(conversion.report.number_count(), 3);
}

#[test]
fn test_outcome_message_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("numbers.xlsx");

    let outcome = Converter::default().convert_source(&mut sample_document(), &output);
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(
        outcome.message,
        format!("Successfully extracted 3 numbers to {}", output.display())
    );

    let xml = read_worksheet(&output);
    assert!(xml.contains("Revenue 42"));
    assert!(xml.contains(r#"<c r="A9" s="1" t="inlineStr">"#));
    assert!(xml.contains(r#"<c r="C10" s="2" t="inlineStr">"#));
}

#[test]
fn test_conversion_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("twice.xlsx");
    let converter = Converter::default();

    assert!(converter.convert_source(&mut sample_document(), &output).success);
    let first = std::fs::read(&output).unwrap();
    assert!(converter.convert_source(&mut sample_document(), &output).success);
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unwritable_output_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("out.xlsx");

    let outcome = Converter::default().convert_source(&mut sample_document(), &output);
    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Error: IO error"));
    assert!(!output.exists());
}

#[test]
fn test_multi_page_document() {
    let mut source = MemorySource::new()
        .with_page(
            Some("Invoice 1,024 items"),
            vec![
                raw_table([["Header only", "100"]]),
                raw_table([["Item", "Price", "Tax"], ["Bolt", "$0.25", "5%"], ["Nut", "$0.10", "5%"]]),
            ],
        )
        .with_page(None, Vec::new())
        .with_page(Some("\n\n"), vec![raw_table([["k", "v"], ["rate", "-2.5%"]])]);

    let conversion = Converter::new(ConversionConfig::new().with_numbers_per_row(4))
        .convert_document(&mut source)
        .unwrap();
    let report = &conversion.report;

    assert_eq!(report.pages, 3);
    assert_eq!(
        report.numbers,
        vec!["1,024", "$0.25", "5%", "$0.10", "5%", "-2.5%"]
    );
    assert_eq!(
        report.tables[0].status,
        TableStatus::Skipped {
            reason: SkipReason::HeaderOnly
        }
    );
    assert_eq!(
        report.tables[1].status,
        TableStatus::Written { rows: 2, tokens: 4 }
    );
    assert_eq!((report.tables[2].page, report.tables[2].index), (3, 1));

    let sheet = &conversion.sheet;
    // Page 3 text is blank: header and spacer only
    assert_eq!(sheet.value(9, 1), Some("=== Page 3 Text ==="));
    assert_eq!(sheet.value(11, 1), Some("=== Page 3 Table 1 ==="));
    // Numbers wrap every 4 tokens
    assert_eq!(sheet.row_values(16), vec!["1,024", "$0.25", "5%", "$0.10"]);
    assert_eq!(sheet.row_values(17), vec!["5%", "-2.5%"]);
}

#[test]
fn test_report_serializes() {
    let conversion = Converter::default()
        .convert_document(&mut MemorySource::new().with_page(None, vec![raw_table([["only"]])]))
        .unwrap();
    let json = serde_json::to_value(&conversion.report).unwrap();
    assert_eq!(json["tables"][0]["status"], "skipped");
    assert_eq!(json["tables"][0]["reason"]["kind"], "header_only");
}

#[test]
fn test_convert_pdf_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_pdf(dir.path(), "report.pdf", "Revenue 42\nUnits 7");
    let output = dir.path().join("report.xlsx");

    let outcome = Converter::default().convert_file(&input, &output);
    assert!(outcome.success, "{}", outcome.message);

    let report = outcome.report.expect("report on success");
    assert_eq!(report.pages, 1);
    assert!(report.numbers.iter().any(|n| n == "42"), "{:?}", report.numbers);
    assert!(report.numbers.iter().any(|n| n == "7"), "{:?}", report.numbers);
    assert_eq!(
        outcome.message,
        format!(
            "Successfully extracted {} numbers to {}",
            report.number_count(),
            output.display()
        )
    );

    let xml = read_worksheet(&output);
    assert!(xml.contains("=== Page 1 Text ==="));
    assert!(xml.contains("Revenue"));
    assert!(xml.contains("=== Extracted Numbers ==="));
}

#[test]
fn test_input_released_after_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_pdf(dir.path(), "reused.pdf", "Revenue 42");
    let output = dir.path().join("reused.xlsx");
    let converter = Converter::default();

    assert!(converter.convert_file(&input, &output).success);

    // The input can be replaced and removed once the call returns
    let input = write_pdf(dir.path(), "reused.pdf", "Expenses 913");
    let outcome = converter.convert_file(&input, &output);
    assert!(outcome.success, "{}", outcome.message);
    assert!(read_worksheet(&output).contains("Expenses"));

    std::fs::remove_file(&input).unwrap();
    assert!(!input.exists());
}

#[test]
fn test_corrupt_pdf_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("corrupt.pdf");
    std::fs::write(&input, b"this is not a pdf").unwrap();
    let output = dir.path().join("corrupt.xlsx");

    let outcome = Converter::default().convert_file(&input, &output);
    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Error: "));
    assert!(outcome.report.is_none());
    assert!(!output.exists());
}

#[test]
fn test_control_characters_in_text() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("control.xlsx");
    let mut source =
        MemorySource::new().with_text_page("Total\u{000B}due 42\nform\u{000C}feed 7");

    let outcome = Converter::default().convert_source(&mut source, &output);
    assert!(outcome.success, "{}", outcome.message);

    let xml = read_worksheet(&output);
    assert!(!xml
        .chars()
        .any(|c| c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')));
    assert!(xml.contains("Total_x000B_due 42"));
    assert!(xml.contains("form_x000C_feed 7"));
}
