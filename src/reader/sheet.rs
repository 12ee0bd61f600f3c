//! Statement sheet reader
//!
//! Santander's "XLS" download is an HTML document with a single `<table>`.
//! The whole file is read and parsed in [`StatementSheet::open`], so the file
//! handle never outlives that call; rows are then handed out lazily by
//! [`RawRows`].

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::layout::SheetLayout;
use crate::error::{ConvertError, ConvertResult};
use crate::models::RawRow;

/// Compound File Binary header of genuine .xls workbooks
const OLE2_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// A parsed statement, positioned just after its header row
#[derive(Debug)]
pub struct StatementSheet {
    layout: SheetLayout,
    header_row: usize,
    /// Rows after the header: (1-based row number, cell texts)
    rows: Vec<(usize, Vec<String>)>,
}

impl StatementSheet {
    /// Open and parse a statement file
    ///
    /// # Errors
    ///
    /// `UnreadableFile` if the file can't be read or holds no table,
    /// `SchemaMismatch` if no header row matching the layout is found.
    pub fn open(path: impl AsRef<Path>, layout: &SheetLayout) -> ConvertResult<Self> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|e| ConvertError::UnreadableFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if bytes.starts_with(&OLE2_MAGIC) {
            return Err(ConvertError::UnreadableFile {
                path: path.to_path_buf(),
                reason: "binary Excel workbook; expected the HTML statement download".into(),
            });
        }

        Self::from_html(path, &decode(bytes), layout)
    }

    /// Parse statement HTML that was already loaded from `path`
    pub fn from_html(path: impl AsRef<Path>, html: &str, layout: &SheetLayout) -> ConvertResult<Self> {
        let path = path.as_ref();
        let unreadable = |reason: String| ConvertError::UnreadableFile {
            path: path.to_path_buf(),
            reason,
        };

        let table_selector = selector("table").map_err(&unreadable)?;
        let row_selector = selector("tr").map_err(&unreadable)?;
        let cell_selector = selector("td, th").map_err(&unreadable)?;

        let document = Html::parse_document(html);
        let table = document
            .select(&table_selector)
            .next()
            .ok_or_else(|| unreadable("no table found".into()))?;

        let all_rows: Vec<(usize, Vec<String>)> = table
            .select(&row_selector)
            .enumerate()
            .map(|(idx, row)| (idx + 1, cell_texts(row, &cell_selector)))
            .collect();

        let header_pos = all_rows
            .iter()
            .position(|(_, cells)| layout.is_header(cells))
            .ok_or_else(|| ConvertError::SchemaMismatch {
                path: path.to_path_buf(),
                reason: format!("no header row with {}", layout.expected_header()),
            })?;

        let header_row = all_rows[header_pos].0;
        debug!(path = %path.display(), header_row, "found statement header");

        Ok(Self {
            layout: layout.clone(),
            header_row,
            rows: all_rows.into_iter().skip(header_pos + 1).collect(),
        })
    }

    /// 1-based table row of the header
    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// Consume the sheet into its transaction rows
    pub fn into_rows(self) -> RawRows {
        RawRows {
            layout: self.layout,
            rows: self.rows.into_iter(),
        }
    }
}

/// Transaction rows of a sheet, in file order
///
/// Rows with the wrong cell count (separators, summaries) and blank rows are
/// skipped.
#[derive(Debug)]
pub struct RawRows {
    layout: SheetLayout,
    rows: std::vec::IntoIter<(usize, Vec<String>)>,
}

impl Iterator for RawRows {
    type Item = RawRow;

    fn next(&mut self) -> Option<RawRow> {
        for (row_number, cells) in self.rows.by_ref() {
            match self.layout.project(row_number, &cells) {
                Some(raw) if raw.is_blank() => {
                    debug!(row_number, "skipping blank row");
                }
                Some(raw) => return Some(raw),
                None => {
                    debug!(row_number, cells = cells.len(), "skipping non-transaction row");
                }
            }
        }
        None
    }
}

fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("invalid selector '{}': {:?}", css, e))
}

fn cell_texts(row: ElementRef<'_>, cell_selector: &Selector) -> Vec<String> {
    row.select(cell_selector)
        .map(|cell| cell.text().collect::<String>())
        .collect()
}

/// Decode as UTF-8, falling back to Windows-1252 for Windows-encoded downloads
fn decode(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => WINDOWS_1252
            .decode_without_bom_handling(e.as_bytes())
            .0
            .into_owned(),
    };
    if text.starts_with('\u{feff}') {
        text['\u{feff}'.len_utf8()..].to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STATEMENT: &str = r#"<html><body>
<table>
<tr><td colspan="9">Account: 1234 5678</td></tr>
<tr><th></th><th>Date</th><th></th><th>Description</th><th></th><th>Money in</th><th>Money out</th><th>Balance</th><th></th></tr>
<tr><td></td><td>15/03/2024</td><td></td><td>TESCO STORES</td><td></td><td>42.50</td><td></td><td>1200.00</td><td></td></tr>
<tr><td colspan="9">&nbsp;</td></tr>
<tr><td></td><td>16/03/2024</td><td></td><td>ATM WITHDRAWAL</td><td></td><td></td><td>50.00</td><td>1150.00</td><td></td></tr>
<tr><td></td><td></td><td></td><td></td><td></td><td></td><td></td><td></td><td></td></tr>
<tr><td>Total</td><td>42.50</td></tr>
</table>
</body></html>"#;

    #[test]
    fn test_reads_rows_after_header() {
        let sheet = StatementSheet::from_html("s.xls", STATEMENT, &SheetLayout::santander()).unwrap();
        assert_eq!(sheet.header_row(), 2);

        let rows: Vec<RawRow> = sheet.into_rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 3);
        assert_eq!(rows[0].date, "15/03/2024");
        assert_eq!(rows[0].credit, "42.50");
        assert_eq!(rows[1].description, "ATM WITHDRAWAL");
        assert_eq!(rows[1].debit, "50.00");
    }

    #[test]
    fn test_missing_table_is_unreadable() {
        let err = StatementSheet::from_html("s.xls", "<p>hello</p>", &SheetLayout::santander())
            .unwrap_err();
        assert_eq!(err.kind(), "UnreadableFileError");
    }

    #[test]
    fn test_missing_header_is_schema_mismatch() {
        let html = "<table><tr><td>a</td><td>b</td></tr></table>";
        let err = StatementSheet::from_html("s.xls", html, &SheetLayout::santander()).unwrap_err();
        assert_eq!(err.kind(), "SchemaMismatchError");
        assert!(err.to_string().contains("s.xls"));
    }

    #[test]
    fn test_wrong_layout_is_schema_mismatch() {
        let err = StatementSheet::from_html("s.xls", STATEMENT, &SheetLayout::simple()).unwrap_err();
        assert!(matches!(err, ConvertError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = StatementSheet::open(temp_dir.path().join("nope.xls"), &SheetLayout::santander())
            .unwrap_err();
        assert_eq!(err.kind(), "UnreadableFileError");
    }

    #[test]
    fn test_open_rejects_binary_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("real.xls");
        let mut bytes = OLE2_MAGIC.to_vec();
        bytes.extend_from_slice(&[0; 64]);
        fs::write(&path, bytes).unwrap();

        let err = StatementSheet::open(&path, &SheetLayout::santander()).unwrap_err();
        assert!(err.to_string().contains("binary Excel workbook"));
    }

    #[test]
    fn test_open_windows_1252_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cp1252.xls");
        let html = "<table>\
            <tr><td>Date</td><td>Description</td><td>Money out</td><td>Money in</td><td>Balance</td></tr>\
            <tr><td>01/02/2024</td><td>CAF\u{c9}</td><td>\u{a3}3.20</td><td></td><td>\u{a3}96.80</td></tr>\
            </table>";
        let bytes: Vec<u8> = html.chars().map(|c| c as u32 as u8).collect();
        fs::write(&path, bytes).unwrap();

        let sheet = StatementSheet::open(&path, &SheetLayout::simple()).unwrap();
        let rows: Vec<RawRow> = sheet.into_rows().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "CAF\u{c9}");
        assert_eq!(rows[0].debit, "\u{a3}3.20");
    }

    #[test]
    fn test_windows_1252_punctuation_and_euro() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cp1252.xls");

        let bytes = b"<table>\
            <tr><td>Date</td><td>Description</td><td>Money out</td><td>Money in</td><td>Balance</td></tr>\
            <tr><td>01/02/2024</td><td>M&amp;S\x92S CAF\xC9 \x96 LONDON</td><td></td><td>\x805.00</td><td></td></tr>\
            </table>"
            .to_vec();
        fs::write(&path, bytes).unwrap();

        let sheet = StatementSheet::open(&path, &SheetLayout::simple()).unwrap();
        let rows: Vec<RawRow> = sheet.into_rows().collect();
        assert_eq!(rows[0].description, "M&S\u{2019}S CAF\u{c9} \u{2013} LONDON");
        assert_eq!(rows[0].credit, "\u{20ac}5.00");

        let record = crate::services::RecordMapper::default().map(&rows[0]).unwrap();
        assert_eq!(record.amount, crate::models::Money::from_cents(500));
        assert_eq!(record.description, "M&S\u{2019}S CAF\u{c9} \u{2013} LONDON");
    }
}
