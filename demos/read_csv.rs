//! Example: Read a Shift-JIS CSV file record by record and export it as UTF-8

use std::path::Path;
use lib_legacy_csv::{open_reader, save_file, CsvOptions, Table};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let csv_path = Path::new("assets/examples/customers.csv");
    let mut reader = open_reader(csv_path, &CsvOptions::legacy())?;

    let mut table = Table::new();
    while let Some(record) = reader.read_record()? {
        table.push(record);
    }

    println!("CSV Info");
    println!("Records: {}", table.len());
    println!("Columns: {}", table.max_column_size());
    println!("Lines: {}", reader.line_number());
    println!();

    println!("Headers");
    for (name, position) in table.header_index() {
        println!("{} - {}", position, name);
    }

    save_file(&table, "test_output.csv", &CsvOptions::utf8())?;
    println!("\nExported to test_output.csv");

    Ok(())
}
