//! Example: Build a table in memory and write it as Shift-JIS with CRLF

use lib_legacy_csv::{save_file, Column, CsvOptions, Record, Table, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut table = Table::new();
    table.push(Record::from_values(["id", "name", "tags", "memo"]));

    let mut row = Record::new();
    row.push(Column::new(1));
    row.push("山田 太郎");
    row.push(Column::new(Value::from(vec!["vip", "tokyo"])));
    row.push("multi\nline, with \"quotes\"");
    table.push(row);

    // Only the second column is set, the rest is padded on output
    table.record_mut(2).set(1, Column::quoted("佐藤"));

    save_file(&table, "test_output.csv", &CsvOptions::legacy())?;
    println!("Wrote {} records to test_output.csv", table.len());

    Ok(())
}
