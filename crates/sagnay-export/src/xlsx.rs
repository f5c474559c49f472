//! XLSX (Office Open XML spreadsheet) writer.
//!
//! Produces a minimal single-sheet workbook: a zip container holding the
//! package relationships, workbook, styles and one worksheet. Header cells
//! use a bold style; numbers are stored as numeric cells, everything else
//! as inline strings.

use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use sagnay_model::{Cell, Table};

use crate::common::{column_letter, xml_safe};
use crate::error::Result;

/// Sheet name used for every export.
pub const SHEET_NAME: &str = "Products";

/// SpreadsheetML main namespace.
pub const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

/// Office document relationships namespace.
pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Worksheet part path inside the container.
pub const SHEET_PART: &str = "xl/worksheets/sheet1.xml";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

// Style index 1 is the bold header font.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/></cellXfs></styleSheet>"#;

const HEADER_STYLE: &str = "1";

/// Render a table as an XLSX workbook.
pub fn render_xlsx(table: &Table) -> Result<Vec<u8>> {
    let workbook = workbook_xml()?;
    let sheet = sheet_xml(table)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let parts: [(&str, &[u8]); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes()),
        ("xl/styles.xml", STYLES.as_bytes()),
        (SHEET_PART, &sheet),
    ];
    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(bytes)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn workbook_xml() -> Result<Vec<u8>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("workbook");
    root.push_attribute(("xmlns", MAIN_NS));
    root.push_attribute(("xmlns:r", REL_NS));
    xml.write_event(Event::Start(root))?;
    xml.write_event(Event::Start(BytesStart::new("sheets")))?;
    let mut sheet = BytesStart::new("sheet");
    sheet.push_attribute(("name", SHEET_NAME));
    sheet.push_attribute(("sheetId", "1"));
    sheet.push_attribute(("r:id", "rId1"));
    xml.write_event(Event::Empty(sheet))?;
    xml.write_event(Event::End(BytesEnd::new("sheets")))?;
    xml.write_event(Event::End(BytesEnd::new("workbook")))?;
    Ok(xml.into_inner())
}

fn sheet_xml(table: &Table) -> Result<Vec<u8>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("worksheet");
    root.push_attribute(("xmlns", MAIN_NS));
    xml.write_event(Event::Start(root))?;

    if !table.widths.is_empty() {
        xml.write_event(Event::Start(BytesStart::new("cols")))?;
        for (idx, width) in table.widths.iter().enumerate() {
            let index = (idx + 1).to_string();
            let width = width.to_string();
            let mut col = BytesStart::new("col");
            col.push_attribute(("min", index.as_str()));
            col.push_attribute(("max", index.as_str()));
            col.push_attribute(("width", width.as_str()));
            col.push_attribute(("customWidth", "1"));
            xml.write_event(Event::Empty(col))?;
        }
        xml.write_event(Event::End(BytesEnd::new("cols")))?;
    }

    xml.write_event(Event::Start(BytesStart::new("sheetData")))?;
    let header: Vec<Cell> = table.headers.iter().map(|h| Cell::text(h.as_str())).collect();
    write_row(&mut xml, 1, &header, Some(HEADER_STYLE))?;
    for (idx, row) in table.rows.iter().enumerate() {
        write_row(&mut xml, idx + 2, row, None)?;
    }
    xml.write_event(Event::End(BytesEnd::new("sheetData")))?;
    xml.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(xml.into_inner())
}

fn write_row<W: Write>(
    xml: &mut Writer<W>,
    row_number: usize,
    cells: &[Cell],
    style: Option<&str>,
) -> Result<()> {
    let number = row_number.to_string();
    let mut row = BytesStart::new("row");
    row.push_attribute(("r", number.as_str()));
    xml.write_event(Event::Start(row))?;
    for (col_idx, cell) in cells.iter().enumerate() {
        let reference = format!("{}{}", column_letter(col_idx), row_number);
        let mut c = BytesStart::new("c");
        c.push_attribute(("r", reference.as_str()));
        if let Some(style) = style {
            c.push_attribute(("s", style));
        }
        if cell.numeric {
            c.push_attribute(("t", "n"));
            xml.write_event(Event::Start(c))?;
            xml.write_event(Event::Start(BytesStart::new("v")))?;
            xml.write_event(Event::Text(BytesText::new(&cell.text)))?;
            xml.write_event(Event::End(BytesEnd::new("v")))?;
        } else {
            c.push_attribute(("t", "inlineStr"));
            xml.write_event(Event::Start(c))?;
            xml.write_event(Event::Start(BytesStart::new("is")))?;
            let mut t = BytesStart::new("t");
            t.push_attribute(("xml:space", "preserve"));
            xml.write_event(Event::Start(t))?;
            let text = xml_safe(&cell.text);
            xml.write_event(Event::Text(BytesText::new(&text)))?;
            xml.write_event(Event::End(BytesEnd::new("t")))?;
            xml.write_event(Event::End(BytesEnd::new("is")))?;
        }
        xml.write_event(Event::End(BytesEnd::new("c")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("row")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use sagnay_model::{MissingFieldPolicy, Record, RecordKind, Records};

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn workbook_has_products_sheet_and_widths() {
        let records = Records::new(
            RecordKind::Product,
            vec![Record::new().with("name", "Rice").with("stock", 20)],
        );
        let table = Table::build(&records, &[], MissingFieldPolicy::Lenient).unwrap();
        let bytes = render_xlsx(&table).unwrap();

        let workbook = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Products" sheetId="1" r:id="rId1"/>"#));

        let sheet = read_part(&bytes, SHEET_PART);
        assert_eq!(sheet.matches("<col ").count(), 7);
        assert!(sheet.contains(r#"<col min="1" max="1" width="25" customWidth="1"/>"#));
        assert!(sheet.contains(r#"<c r="A1" s="1" t="inlineStr">"#));
        assert!(sheet.contains(r#"<c r="D2" t="n"><v>20</v></c>"#));
    }

    #[test]
    fn text_is_escaped() {
        let records = Records::new(
            RecordKind::Product,
            vec![Record::new().with("name", "Salt & <Pepper>")],
        );
        let table = Table::build(&records, &[], MissingFieldPolicy::Lenient).unwrap();
        let sheet = read_part(&render_xlsx(&table).unwrap(), SHEET_PART);
        assert!(sheet.contains("Salt &amp; &lt;Pepper&gt;"));
    }
}
