//! HomeBank CSV export
//!
//! HomeBank's transaction import is positional and schema-sensitive: the
//! eight columns below, in this order, with `MM/DD/YYYY` dates. Balance has no
//! column. Only `date`, `payment`, `memo` and `amount` are filled in.

use std::io::Write;

use crate::models::TransactionRecord;

/// Column names HomeBank expects
pub const HOMEBANK_HEADER: [&str; 8] = [
    "date", "payment", "number", "payee", "memo", "amount", "category", "tags",
];

/// HomeBank payment mode 0: none
const PAYMENT_NONE: &str = "0";

/// Render one record as HomeBank CSV fields
pub fn homebank_fields(record: &TransactionRecord) -> [String; 8] {
    [
        record.date.format("%m/%d/%Y").to_string(),
        PAYMENT_NONE.to_string(),
        String::new(),
        String::new(),
        record.description.clone(),
        record.amount.to_string(),
        String::new(),
        String::new(),
    ]
}

/// Write the header and one line per record; returns the record count
pub fn write_homebank_csv<'a, I, W>(records: I, writer: W, delimiter: u8) -> csv::Result<usize>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
    W: Write,
{
    let mut wtr = super::csv_writer(writer, delimiter);
    wtr.write_record(HOMEBANK_HEADER)?;

    let mut count = 0;
    for record in records {
        wtr.write_record(homebank_fields(record))?;
        count += 1;
    }

    wtr.flush()?;
    Ok(count)
}
