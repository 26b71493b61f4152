//! XLSX output.
//!
//! Serializes a [`Sheet`] as a minimal Office Open XML workbook with a single
//! worksheet. Cell text is stored as inline strings, so no shared string
//! table is needed. Three cell formats are emitted: the default one, the
//! section header font (bold + header color) and the number font.
//!
//! The package is assembled in memory and written to disk in one call, so a
//! failure while building never leaves a half-written file behind. Archive
//! entries carry a fixed timestamp: saving the same sheet twice produces the
//! same bytes.

use crate::config::ConversionConfig;
use crate::error::{Error, Result};
use crate::sheet::{CellStyle, Sheet};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIP_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Writes sheets as `.xlsx` packages.
#[derive(Debug, Clone)]
pub struct XlsxWriter {
    sheet_name: String,
    header_color: String,
    number_color: String,
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new(&ConversionConfig::default())
    }
}

impl XlsxWriter {
    /// Create a writer using the sheet name and colors of `config`.
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            sheet_name: config.sheet_name.clone(),
            header_color: config.header_color.to_ascii_uppercase(),
            number_color: config.number_color.to_ascii_uppercase(),
        }
    }

    /// Serialize `sheet` to XLSX bytes.
    pub fn to_bytes(&self, sheet: &Sheet) -> Result<Vec<u8>> {
        let worksheet = worksheet_xml(sheet)?;
        let workbook = self.workbook_xml();
        let styles = self.styles_xml();

        let parts: [(&str, &[u8]); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", ROOT_RELS_XML.as_bytes()),
            ("xl/workbook.xml", workbook.as_bytes()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.as_bytes()),
            ("xl/styles.xml", styles.as_bytes()),
            ("xl/worksheets/sheet1.xml", &worksheet),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            zip.start_file(name, entry_options())?;
            zip.write_all(content)?;
        }
        Ok(zip.finish()?.into_inner())
    }

    /// Write `sheet` to `path`, replacing any existing file.
    pub fn save(&self, sheet: &Sheet, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes(sheet)?;
        std::fs::write(path.as_ref(), bytes)?;
        log::debug!(
            "Saved {} cells to {}",
            sheet.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    fn workbook_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            SPREADSHEET_NS,
            RELATIONSHIP_NS,
            escape(self.sheet_name.as_str())
        )
    }

    fn styles_xml(&self) -> String {
        // Font 0 default, 1 header, 2 number; cellXfs index = style id
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="{ns}"><fonts count="3"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><color rgb="FF{header}"/><name val="Calibri"/></font><font><sz val="11"/><color rgb="FF{number}"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="0" fontId="2" fillId="0" borderId="0" xfId="0" applyFont="1"/></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#,
            ns = SPREADSHEET_NS,
            header = self.header_color,
            number = self.number_color,
        )
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

/// Index into `cellXfs` for a style tag.
fn style_index(style: Option<CellStyle>) -> Option<&'static str> {
    match style {
        None => None,
        Some(CellStyle::Header) => Some("1"),
        Some(CellStyle::Number) => Some("2"),
    }
}

/// Column letters for a 1-based column index (`1 -> A`, `27 -> AA`).
pub fn column_name(col: u32) -> String {
    let mut n = col;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A1-style reference for a 1-based cell coordinate.
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", column_name(col), row)
}

/// Make cell text legal XML 1.0.
///
/// C0 control characters other than tab, LF and CR cannot appear in XML, so
/// they are written as OOXML `_xHHHH_` escapes. An underscore that would
/// otherwise be read as the start of such an escape is itself escaped as
/// `_x005F_`.
pub fn encode_cell_text(text: &str) -> Cow<'_, str> {
    let needs_encoding = text.chars().any(is_xml_illegal)
        || text.match_indices('_').any(|(i, _)| looks_like_escape(&text[i..]));
    if !needs_encoding {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for (i, c) in text.char_indices() {
        if is_xml_illegal(c) {
            out.push_str(&format!("_x{:04X}_", c as u32));
        } else if c == '_' && looks_like_escape(&text[i..]) {
            out.push_str("_x005F_");
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn is_xml_illegal(c: char) -> bool {
    c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')
}

/// Whether `s` starts with `_xHHHH_`.
fn looks_like_escape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 7
        && b[0] == b'_'
        && b[1] == b'x'
        && b[2..6].iter().all(u8::is_ascii_hexdigit)
        && b[6] == b'_'
}

fn xml_err(e: impl std::fmt::Display) -> Error {
    Error::Xml(e.to_string())
}

fn worksheet_xml(sheet: &Sheet) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(
            BytesStart::new("worksheet").with_attributes([("xmlns", SPREADSHEET_NS)]),
        ))
        .map_err(xml_err)?;

    if !sheet.is_empty() {
        let range = format!("A1:{}", cell_ref(sheet.max_row(), sheet.max_col()));
        writer
            .write_event(Event::Empty(
                BytesStart::new("dimension").with_attributes([("ref", range.as_str())]),
            ))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::Start(BytesStart::new("sheetData")))
        .map_err(xml_err)?;

    let mut open_row: Option<u32> = None;
    for (row, col, cell) in sheet.cells() {
        // Empty unstyled cells carry nothing worth storing
        if cell.value.is_empty() && cell.style.is_none() {
            continue;
        }

        if open_row != Some(row) {
            if open_row.is_some() {
                writer
                    .write_event(Event::End(BytesEnd::new("row")))
                    .map_err(xml_err)?;
            }
            let r = row.to_string();
            writer
                .write_event(Event::Start(
                    BytesStart::new("row").with_attributes([("r", r.as_str())]),
                ))
                .map_err(xml_err)?;
            open_row = Some(row);
        }

        let reference = cell_ref(row, col);
        let mut c = BytesStart::new("c");
        c.push_attribute(("r", reference.as_str()));
        if let Some(s) = style_index(cell.style) {
            c.push_attribute(("s", s));
        }

        if cell.value.is_empty() {
            writer.write_event(Event::Empty(c)).map_err(xml_err)?;
            continue;
        }

        c.push_attribute(("t", "inlineStr"));
        writer.write_event(Event::Start(c)).map_err(xml_err)?;
        writer
            .write_event(Event::Start(BytesStart::new("is")))
            .map_err(xml_err)?;
        writer
            .write_event(Event::Start(
                BytesStart::new("t").with_attributes([("xml:space", "preserve")]),
            ))
            .map_err(xml_err)?;
        writer
            .write_event(Event::Text(BytesText::new(&encode_cell_text(&cell.value))))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("t")))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("is")))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("c")))
            .map_err(xml_err)?;
    }

    if open_row.is_some() {
        writer
            .write_event(Event::End(BytesEnd::new("row")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("sheetData")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("worksheet")))
        .map_err(xml_err)?;

    Ok(writer.into_inner())
}
