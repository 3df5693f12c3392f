//! XLSX reader for the first worksheet of a workbook.
//!
//! Only cell text is read: shared strings, inline strings, formula results,
//! numbers and booleans. Styles, formats and other sheets are ignored.

use std::io::{BufRead, BufReader, Cursor, Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use super::{InputError, ReadOptions, Table};

const WORKBOOK_PATH: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PATH: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";
const DEFAULT_SHEET_PATH: &str = "xl/worksheets/sheet1.xml";

/// Columns in a worksheet (`A` through `XFD`).
const MAX_COLUMNS: usize = 16_384;

/// Parse XLSX bytes into a [`Table`] built from the first worksheet.
pub(crate) fn parse_xlsx(data: &[u8], options: ReadOptions) -> Result<Table, InputError> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let sheet_path = first_sheet_path(&mut archive)?;
    let shared_strings = read_shared_strings(&mut archive)?;

    let file = match archive.by_name(&sheet_path) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Err(InputError::NoWorksheet),
        Err(e) => return Err(e.into()),
    };
    let rows = read_sheet_rows(BufReader::new(file), &shared_strings)?;

    Ok(Table::from_rows(rows, options))
}

fn local_name(e: &BytesStart<'_>) -> Vec<u8> {
    e.local_name().as_ref().to_vec()
}

/// Value of the attribute with the given local name, if present.
fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, InputError> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Resolve the archive path of the first sheet listed in the workbook.
fn first_sheet_path<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String, InputError> {
    let rel_id = match archive.by_name(WORKBOOK_PATH) {
        Ok(file) => first_sheet_rel_id(BufReader::new(file))?,
        Err(_) => None,
    };
    let Some(rel_id) = rel_id else {
        return Ok(DEFAULT_SHEET_PATH.to_string());
    };

    let target = match archive.by_name(WORKBOOK_RELS_PATH) {
        Ok(file) => relationship_target(BufReader::new(file), &rel_id)?,
        Err(_) => None,
    };

    Ok(match target {
        Some(t) if t.starts_with('/') => t.trim_start_matches('/').to_string(),
        Some(t) => format!("xl/{t}"),
        None => DEFAULT_SHEET_PATH.to_string(),
    })
}

fn first_sheet_rel_id<B: BufRead>(reader: B) -> Result<Option<String>, InputError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if local_name(e) == b"sheet" => {
                // r:id; the sheetId attribute has a different local name
                return attr_value(e, b"id");
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

fn relationship_target<B: BufRead>(reader: B, rel_id: &str) -> Result<Option<String>, InputError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if local_name(e) == b"Relationship" => {
                if attr_value(e, b"Id")?.as_deref() == Some(rel_id) {
                    return attr_value(e, b"Target");
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

fn read_shared_strings<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Vec<String>, InputError> {
    let Ok(file) = archive.by_name(SHARED_STRINGS_PATH) else {
        return Ok(Vec::new()); // SharedStrings is optional
    };
    parse_shared_strings(BufReader::new(file))
}

fn parse_shared_strings<B: BufRead>(reader: B) -> Result<Vec<String>, InputError> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut strings = Vec::new();
    let mut buf = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    // Phonetic runs repeat the text in another script
    let mut in_phonetic = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match local_name(e).as_slice() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            // <si/> is an empty string
            Event::Empty(ref e) if local_name(e) == b"si" => strings.push(String::new()),
            Event::Text(ref e) if in_t => current.push_str(&e.unescape()?),
            Event::End(ref e) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(std::mem::take(&mut current));
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(strings)
}

/// Zero-based column index from a cell reference such as `"B7"`.
///
/// Returns `None` for references without letters or past the last
/// worksheet column.
fn column_index(cell_ref: &str) -> Option<usize> {
    let mut col = 0usize;
    for ch in cell_ref.chars() {
        if ch == '$' {
            continue;
        }
        if !ch.is_ascii_alphabetic() {
            break;
        }
        let digit = ch.to_ascii_uppercase() as usize - 'A' as usize + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
        if col > MAX_COLUMNS {
            return None;
        }
    }
    col.checked_sub(1)
}

/// Cell type attribute values that need interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Shared,
    Inline,
    Bool,
    Plain,
}

impl CellKind {
    fn from_attr(t: Option<&str>) -> Self {
        match t {
            Some("s") => CellKind::Shared,
            Some("inlineStr") => CellKind::Inline,
            Some("b") => CellKind::Bool,
            _ => CellKind::Plain,
        }
    }
}

fn read_sheet_rows<B: BufRead>(
    reader: B,
    shared_strings: &[String],
) -> Result<Vec<Vec<Option<String>>>, InputError> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut rows = Vec::new();
    let mut buf = Vec::new();
    let mut row: Vec<Option<String>> = Vec::new();

    let mut col = 0usize;
    let mut kind = CellKind::Plain;
    let mut value = String::new();
    let mut inline = String::new();
    let mut in_v = false;
    let mut in_is = false;
    let mut in_inline_t = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match local_name(e).as_slice() {
                b"row" => row.clear(),
                b"c" => {
                    col = attr_value(e, b"r")?
                        .as_deref()
                        .and_then(column_index)
                        .unwrap_or(row.len());
                    kind = CellKind::from_attr(attr_value(e, b"t")?.as_deref());
                    value.clear();
                    inline.clear();
                }
                b"v" => in_v = true,
                b"is" => in_is = true,
                b"t" if in_is => in_inline_t = true,
                _ => {}
            },
            Event::Text(ref e) if in_v => value.push_str(&e.unescape()?),
            Event::Text(ref e) if in_inline_t => inline.push_str(&e.unescape()?),
            Event::End(ref e) => match e.local_name().as_ref() {
                b"v" => in_v = false,
                b"t" => in_inline_t = false,
                b"is" => in_is = false,
                b"c" => {
                    let text = match kind {
                        CellKind::Shared => value
                            .trim()
                            .parse::<usize>()
                            .ok()
                            .and_then(|idx| shared_strings.get(idx).cloned()),
                        CellKind::Inline => Some(std::mem::take(&mut inline)),
                        CellKind::Bool => {
                            let flag = if value.trim() == "1" { "TRUE" } else { "FALSE" };
                            Some(flag.to_string())
                        }
                        CellKind::Plain => Some(std::mem::take(&mut value)),
                    }
                    .filter(|s| !s.trim().is_empty());

                    if text.is_some() {
                        if row.len() <= col {
                            row.resize(col + 1, None);
                        }
                        row[col] = text;
                    }
                }
                b"row" => {
                    if row.iter().any(Option::is_some) {
                        rows.push(std::mem::take(&mut row));
                    }
                    row.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(rows)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A1"), Some(0));
        assert_eq!(column_index("B7"), Some(1));
        assert_eq!(column_index("$AA$10"), Some(26));
        assert_eq!(column_index("12"), None);
        assert_eq!(column_index("XFD1"), Some(MAX_COLUMNS - 1));
    }

    #[test]
    fn test_column_index_past_last_column() {
        assert_eq!(column_index("XFE1"), None);
        assert_eq!(column_index("ZZZZZZZZZZZZZZ1"), None);
    }

    #[test]
    fn test_overlong_cell_ref_falls_back_to_position() {
        let sheet = r#"<worksheet><sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>Gate</t></is></c><c r="ZZZZZZZZZZZZZZ1" t="inlineStr"><is><t>https://gate.example</t></is></c></row>
</sheetData></worksheet>"#;
        let data = build_xlsx(&[("xl/worksheets/sheet1.xml", sheet)]);
        let table = parse_xlsx(&data, ReadOptions { has_header: false }).unwrap();
        assert_eq!(table.column_count, 2);
        assert_eq!(table.rows[0][1].as_deref(), Some("https://gate.example"));
    }

    #[test]
    fn test_parse_first_sheet_via_relationships() {
        let table = parse_xlsx(&stores_workbook(), ReadOptions::default()).unwrap();
        assert_eq!(table.headers, Some(vec!["Name".into(), "URL".into()]));
        // Row 3 is empty and skipped
        assert_eq!(table.len(), 4);
        assert_eq!(table.column_count, 3);
    }

    #[test]
    fn test_cell_kinds() {
        let table = parse_xlsx(&stores_workbook(), ReadOptions::default()).unwrap();
        // Rich text runs are concatenated
        assert_eq!(table.rows[0][0].as_deref(), Some("Store A"));
        assert_eq!(table.rows[0][1].as_deref(), Some("https://a.example"));
        // Inline string with a styled but empty neighbour
        assert_eq!(table.rows[1][0].as_deref(), Some("Kiosk"));
        assert_eq!(table.rows[1].get(1).cloned().flatten(), None);
        // Number keeps its text; formula result lands in column C
        assert_eq!(table.rows[2][0].as_deref(), Some("42"));
        assert_eq!(table.rows[2][1], None);
        assert_eq!(table.rows[2][2].as_deref(), Some("https://c.example"));
        // Boolean
        assert_eq!(table.rows[3][0].as_deref(), Some("TRUE"));
    }

    #[test]
    fn test_input_rows_from_xlsx() {
        let table = parse_xlsx(&stores_workbook(), ReadOptions::default()).unwrap();
        let rows = table.input_rows().unwrap();
        assert_eq!(rows[0].label, "Store A");
        assert_eq!(rows[0].target.as_deref(), Some("https://a.example"));
        assert_eq!(rows[1].target, None);
        assert_eq!(rows[3].target.as_deref(), Some("https://d.example"));
    }

    #[test]
    fn test_default_sheet_path_without_workbook() {
        let data = build_xlsx(&[("xl/worksheets/sheet1.xml", STORES)]);
        let table = parse_xlsx(&data, ReadOptions { has_header: false }).unwrap();
        // Shared strings are missing, so the first two rows have no values
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0][0].as_deref(), Some("Kiosk"));
    }

    #[test]
    fn test_missing_worksheet() {
        let data = build_xlsx(&[("xl/workbook.xml", WORKBOOK)]);
        assert!(matches!(
            parse_xlsx(&data, ReadOptions::default()),
            Err(InputError::NoWorksheet)
        ));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            parse_xlsx(b"PK\x03\x04garbage", ReadOptions::default()),
            Err(InputError::Archive(_))
        ));
    }

    #[test]
    fn test_parse_shared_strings_empty_item() {
        let xml = r#"<sst><si><t>a</t></si><si/><si><t>c</t></si></sst>"#;
        let strings = parse_shared_strings(xml.as_bytes()).unwrap();
        assert_eq!(strings, vec!["a".to_string(), String::new(), "c".to_string()]);
    }

    #[test]
    fn test_parse_shared_strings_skips_phonetic() {
        let xml = r#"<sst><si><t>東京</t><rPh sb="0" eb="2"><t>トウキョウ</t></rPh></si></sst>"#;
        let strings = parse_shared_strings(xml.as_bytes()).unwrap();
        assert_eq!(strings, vec!["東京".to_string()]);
    }
}
