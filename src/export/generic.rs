//! Generic CSV export
//!
//! Bank-agnostic schema: `date,description,amount,balance` with ISO dates and
//! plain signed decimals.

use std::io::Write;

use crate::models::TransactionRecord;

/// Column names of the generic schema
pub const GENERIC_HEADER: [&str; 4] = ["date", "description", "amount", "balance"];

/// Render one record as generic CSV fields
pub fn generic_fields(record: &TransactionRecord) -> [String; 4] {
    [
        record.date.format("%Y-%m-%d").to_string(),
        record.description.clone(),
        record.amount.to_string(),
        record
            .balance
            .map(|balance| balance.to_string())
            .unwrap_or_default(),
    ]
}

/// Write the header and one line per record; returns the record count
pub fn write_generic_csv<'a, I, W>(records: I, writer: W) -> csv::Result<usize>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
    W: Write,
{
    let mut wtr = super::csv_writer(writer, b',');
    wtr.write_record(GENERIC_HEADER)?;

    let mut count = 0;
    for record in records {
        wtr.write_record(generic_fields(record))?;
        count += 1;
    }

    wtr.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RawRow};
    use crate::services::RecordMapper;
    use chrono::NaiveDate;

    fn record(cells: [&str; 5]) -> TransactionRecord {
        RecordMapper::default().map(&RawRow::new(1, cells)).unwrap()
    }

    fn render(records: &[TransactionRecord]) -> String {
        let mut out = Vec::new();
        write_generic_csv(records, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_credit_and_debit_rows() {
        let records = vec![
            record(["15/03/2024", "TESCO STORES", "", "42.50", "1200.00"]),
            record(["15/03/2024", "ATM WITHDRAWAL", "50.00", "", "1150.00"]),
        ];

        assert_eq!(
            render(&records),
            "date,description,amount,balance\n\
             2024-03-15,TESCO STORES,42.50,1200.00\n\
             2024-03-15,ATM WITHDRAWAL,-50.00,1150.00\n"
        );
    }

    #[test]
    fn test_missing_balance_is_empty() {
        let records = vec![record(["01/01/2024", "GIFT", "", "5", ""])];
        assert_eq!(
            render(&records),
            "date,description,amount,balance\n2024-01-01,GIFT,5.00,\n"
        );
    }

    #[test]
    fn test_description_with_comma_is_quoted() {
        let records = vec![record(["01/01/2024", "SMITH, J \"REF\"", "1.00", "", ""])];
        assert!(render(&records).contains("\"SMITH, J \"\"REF\"\"\",-1.00,"));
    }

    #[test]
    fn test_empty_statement_writes_header_only() {
        assert_eq!(render(&[]), "date,description,amount,balance\n");
    }

    #[test]
    fn test_date_and_amount_round_trip() {
        let original = vec![
            record(["29/02/2024", "LEAP", "1,234.56", "", "-10.00"]),
            record(["31/12/2023", "NYE", "", "0.01", "0.00"]),
        ];

        let csv_text = render(&original);
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());

        let parsed: Vec<(NaiveDate, Money)> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (
                    NaiveDate::parse_from_str(&r[0], "%Y-%m-%d").unwrap(),
                    Money::parse(&r[2]).unwrap(),
                )
            })
            .collect();

        assert_eq!(parsed.len(), original.len());
        for (record, (date, amount)) in original.iter().zip(parsed) {
            assert_eq!(record.date, date);
            assert_eq!(record.amount, amount);
        }
    }
}
