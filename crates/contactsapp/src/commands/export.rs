//! Workbook export.
//!
//! Writes the rows of the current view (filtered and sorted, not paginated) to
//! an Office Open XML workbook: a zip archive holding one worksheet named
//! `Contacts`. The first row carries the nine field labels; every cell is an
//! inline string, so no shared-strings part is needed and spreadsheet apps
//! never reinterpret phone numbers or dates.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Contact, ContactField};
use crate::store::ContactStore;
use crate::view::{matching_rows, ViewState};
use quick_xml::escape::escape;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const SHEET_NAME: &str = "Contacts";

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"</Types>"#
);

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#
);

const WORKBOOK_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"</Relationships>"#
);

pub fn run<S: ContactStore>(store: &S, state: &ViewState, path: &Path) -> Result<CmdResult> {
    let rows = matching_rows(&store.list_contacts()?, state);

    let file = File::create(path)?;
    write_workbook(file, &rows)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "exported workbook");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} contact{} to {}",
        rows.len(),
        if rows.len() == 1 { "" } else { "s" },
        path.display()
    )));
    result.export_path = Some(path.to_path_buf());
    Ok(result)
}

/// Write `rows` as a single-sheet workbook.
pub fn write_workbook<W: Write + Seek>(writer: W, rows: &[Contact]) -> Result<()> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(rows)),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}

fn workbook_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>"#,
            r#"</workbook>"#
        ),
        SHEET_NAME
    )
}

fn sheet_xml(rows: &[Contact]) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        r#"<sheetData>"#
    ));

    let header = ContactField::ALL.map(|f| f.label());
    push_row(&mut xml, 1, &header);
    for (i, contact) in rows.iter().enumerate() {
        let values = ContactField::ALL.map(|f| contact.display_value(f));
        push_row(&mut xml, i + 2, &values);
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_row(xml: &mut String, row: usize, values: &[&str]) {
    xml.push_str(&format!(r#"<row r="{}">"#, row));
    for (col, value) in values.iter().enumerate() {
        let reference = format!("{}{}", column_name(col), row);
        if value.is_empty() {
            xml.push_str(&format!(r#"<c r="{}"/>"#, reference));
            continue;
        }
        xml.push_str(&format!(
            r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
            reference,
            escape(xml_safe(value).as_str())
        ));
    }
    xml.push_str("</row>");
}

/// Spreadsheet column letters for a zero-based index: 0 → A, 25 → Z, 26 → AA.
fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

// XML 1.0 forbids most control characters even when escaped.
fn xml_safe(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{contact, StoreFixture};
    use crate::view::filter::FieldSelector;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut out = String::new();
        part.read_to_string(&mut out).unwrap();
        out
    }

    /// Cell texts per row, with empty cells skipped.
    fn sheet_rows(xml: &str) -> Vec<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        let mut rows = Vec::new();
        let mut in_text = false;
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"row" => rows.push(Vec::new()),
                Event::Start(e) if e.name().as_ref() == b"t" => in_text = true,
                Event::End(e) if e.name().as_ref() == b"t" => in_text = false,
                Event::Text(t) if in_text => {
                    let text = t.unescape().unwrap().into_owned();
                    rows.last_mut().unwrap().push(text);
                }
                Event::Eof => break,
                _ => {}
            }
        }
        rows
    }

    fn workbook(rows: &[Contact]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        write_workbook(&mut buf, rows).unwrap();
        buf.into_inner()
    }

    #[test]
    fn header_row_is_field_labels() {
        let bytes = workbook(&[]);
        let rows = sheet_rows(&read_part(&bytes, "xl/worksheets/sheet1.xml"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Contact Owner");
        assert_eq!(rows[0][8], "Contact Bia");
    }

    #[test]
    fn sheet_is_named_contacts() {
        let bytes = workbook(&[]);
        assert!(read_part(&bytes, "xl/workbook.xml").contains(r#"<sheet name="Contacts""#));
        assert!(read_part(&bytes, "[Content_Types].xml").contains("/xl/worksheets/sheet1.xml"));
    }

    #[test]
    fn values_are_escaped() {
        let mut tricky = contact(1, "Ann", "15/03/2024");
        tricky.account_name = "Smith & <Sons>".into();
        let bytes = workbook(&[tricky]);
        let xml = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(xml.contains("Smith &amp; &lt;Sons&gt;"));
        let rows = sheet_rows(&xml);
        assert_eq!(rows[1][1], "Smith & <Sons>");
    }

    #[test]
    fn absent_optional_fields_are_empty_cells() {
        let bytes = workbook(&[contact(1, "Ann", "15/03/2024")]);
        let xml = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(xml.contains(r#"<c r="G2"/>"#));
        assert_eq!(sheet_rows(&xml)[1].len(), 6);
    }

    #[test]
    fn exports_filtered_sorted_unpaginated_rows() {
        let store = StoreFixture::new()
            .with_named(1, "Carla", "01/01/2024")
            .with_named(2, "Bob", "01/01/2024")
            .with_named(3, "Alice", "01/01/2024")
            .store;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let state = ViewState::new()
            .with_field(FieldSelector::Field(ContactField::Name))
            .with_search("l")
            .toggle_sort(ContactField::Name)
            .with_page_index(5);

        let result = run(&store, &state, &path).unwrap();
        assert_eq!(result.export_path.as_deref(), Some(path.as_path()));

        let bytes = std::fs::read(&path).unwrap();
        let rows = sheet_rows(&read_part(&bytes, "xl/worksheets/sheet1.xml"));
        let names: Vec<_> = rows[1..].iter().map(|r| r[2].as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carla"]);
    }

    #[test]
    fn column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(8), "I");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
    }
}
