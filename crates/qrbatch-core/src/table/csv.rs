//! Minimal CSV/TSV reader.

use super::{ReadOptions, Table};

/// Field separator for delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Parse CSV/TSV bytes into a [`Table`].
///
/// Quoted fields may contain separators, newlines and `""` escapes. Blank
/// cells become `None` and rows with no values are dropped.
pub(crate) fn parse_delimited(data: &[u8], delim: Delimiter, options: ReadOptions) -> Table {
    let text = String::from_utf8_lossy(data);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let rows = split_records(text, delim.as_char())
        .into_iter()
        .map(|record| {
            record
                .into_iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        None
                    } else {
                        Some(field)
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|row| row.iter().any(Option::is_some))
        .collect();

    Table::from_rows(rows, options)
}

/// Split text into records of fields, respecting quotes.
fn split_records(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            '\r' => {
                // CRLF or bare CR both end the record
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                fields.push(std::mem::take(&mut current));
                records.push(std::mem::take(&mut fields));
            }
            '\n' => {
                fields.push(std::mem::take(&mut current));
                records.push(std::mem::take(&mut fields));
            }
            c if c == sep => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }

    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        records.push(fields);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_header() -> ReadOptions {
        ReadOptions { has_header: false }
    }

    #[test]
    fn test_parse_csv_basic() {
        let data = b"Name,URL\nStore A,https://a.example\nKiosk,";
        let table = parse_delimited(data, Delimiter::Comma, ReadOptions::default());
        assert_eq!(table.headers, Some(vec!["Name".into(), "URL".into()]));
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][1].as_deref(), Some("https://a.example"));
        assert_eq!(table.rows[1][1], None);
    }

    #[test]
    fn test_parse_tsv() {
        let data = b"A\thttps://a\nB\thttps://b";
        let table = parse_delimited(data, Delimiter::Tab, no_header());
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_count, 2);
        assert_eq!(table.rows[1][0].as_deref(), Some("B"));
    }

    #[test]
    fn test_quoted_fields() {
        let data = b"\"Smith, J\",\"https://x/?a=1,2\"\n\"He said \"\"hi\"\"\",u";
        let table = parse_delimited(data, Delimiter::Comma, no_header());
        assert_eq!(table.rows[0][0].as_deref(), Some("Smith, J"));
        assert_eq!(table.rows[0][1].as_deref(), Some("https://x/?a=1,2"));
        assert_eq!(table.rows[1][0].as_deref(), Some("He said \"hi\""));
    }

    #[test]
    fn test_quoted_newline() {
        let data = b"\"Line one\nLine two\",https://a\n";
        let table = parse_delimited(data, Delimiter::Comma, no_header());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][0].as_deref(), Some("Line one\nLine two"));
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let data = b"a,1\r\n\r\n,\r\nb,2\r\n";
        let table = parse_delimited(data, Delimiter::Comma, no_header());
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1][0].as_deref(), Some("b"));
    }

    #[test]
    fn test_bom_is_stripped() {
        let data = "\u{feff}Name,URL\nA,u".as_bytes();
        let table = parse_delimited(data, Delimiter::Comma, ReadOptions::default());
        assert_eq!(table.headers.as_ref().unwrap()[0], "Name");
    }

    #[test]
    fn test_single_column() {
        let data = b"Name\nA\nB";
        let table = parse_delimited(data, Delimiter::Comma, ReadOptions::default());
        assert_eq!(table.column_count, 1);
        assert!(table.input_rows().is_err());
    }

    #[test]
    fn test_empty_input() {
        let table = parse_delimited(b"", Delimiter::Comma, ReadOptions::default());
        assert!(table.is_empty());
        assert!(table.headers.is_none());
    }
}
