use std::error::Error;
use std::fs;

use lib_legacy_csv::{
    encode, load_file, load_reader, load_str, open_reader, save, save_file, Column, CsvOptions,
    Dialect, Encoding, Record, Table, Value,
};

fn sample_table() -> Table {
    let mut table = Table::new();
    table.push(Record::from_values(["id", "name", "note"]));
    table.push(Record::from_values(["1", "山田 太郎", "hello, world"]));
    table.push(Record::from_values(["2", "say \"hi\"", "line1\nline2"]));

    let mut sparse = Record::new();
    sparse.set(1, "only second");
    table.push(sparse);

    let mut typed = Record::new();
    typed.push(Column::new(42));
    typed.push(Column::quoted("forced"));
    table.push(typed);
    table
}

#[test]
fn scenarios_from_the_format_description() {
    assert_eq!(
        load_str("a,b,c\n1,2,3\n").to_texts(),
        vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]
    );
    assert_eq!(load_str("\"hello, world\",42\n").to_texts(), vec![vec!["hello, world", "42"]]);
    assert_eq!(load_str("\"say \"\"hi\"\"\",x\n").to_texts(), vec![vec!["say \"hi\"", "x"]]);
    assert_eq!(load_str("\"line1\nline2\",y\n").to_texts(), vec![vec!["line1\nline2", "y"]]);

    let dialect = Dialect::default();
    assert_eq!(encode(&Value::from(5), false, &dialect), "5");
    assert_eq!(encode(&Value::from(5), true, &dialect), "\"5\"");

    let table = Table::from_rows([vec!["a", "b"], vec!["1", "2", "3", "4"]]);
    for line in table.to_csv_value(&dialect, "\n").lines() {
        assert_eq!(line.matches(',').count(), 3);
    }
}

fn padded_texts(table: &Table) -> Vec<Vec<String>> {
    let width = table.max_column_size();
    table
        .iter()
        .map(|record| {
            let mut texts = record.texts();
            texts.resize(width, String::new());
            texts
        })
        .collect()
}

#[test]
fn write_then_load_preserves_values() -> Result<(), Box<dyn Error>> {
    let table = sample_table();

    let lf_options = [
        CsvOptions::utf8(),
        CsvOptions::default().with_line_terminator("\n"),
        CsvOptions::utf8().with_encoding(Encoding::EucJp),
    ];
    for options in lf_options {
        let mut buffer = Vec::new();
        save(&table, &mut buffer, &options)?;
        let loaded = load_reader(buffer.as_slice(), &options)?;
        assert_eq!(loaded.to_texts(), padded_texts(&table));
    }
    Ok(())
}

#[test]
fn bulk_parser_keeps_carriage_returns() -> Result<(), Box<dyn Error>> {
    let table = Table::from_rows([vec!["a", "b"], vec!["c", "d"]]);
    let mut buffer = Vec::new();
    save(&table, &mut buffer, &CsvOptions::default())?;

    let loaded = load_reader(buffer.as_slice(), &CsvOptions::default())?;
    assert_eq!(loaded.to_texts(), vec![vec!["a", "b\r"], vec!["c", "d\r"]]);
    Ok(())
}

#[test]
fn streaming_reader_handles_crlf_files() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sample.csv");
    let table = sample_table();
    save_file(&table, &path, &CsvOptions::default())?;

    let reader = open_reader(&path, &CsvOptions::default())?;
    let streamed: Table = reader.collect::<Result<_, _>>()?;
    assert_eq!(streamed.to_texts(), padded_texts(&table));
    Ok(())
}

#[test]
fn save_file_appends_when_asked() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("append.csv");
    let options = CsvOptions::utf8();

    save_file(&Table::from_rows([vec!["a", "b"]]), &path, &options)?;
    save_file(&Table::from_rows([vec!["c"]]), &path, &options.clone().with_append(true))?;
    assert_eq!(fs::read_to_string(&path)?, "a,b\nc\n");

    save_file(&Table::from_rows([vec!["d"]]), &path, &options)?;
    assert_eq!(fs::read_to_string(&path)?, "d\n");
    Ok(())
}

#[test]
fn shift_jis_file_on_disk() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sjis.csv");
    save_file(&Table::from_rows([vec!["東京", "大阪"]]), &path, &CsvOptions::legacy())?;

    let bytes = fs::read(&path)?;
    assert!(std::str::from_utf8(&bytes).is_err());
    assert!(bytes.ends_with(b"\r\n"));

    let mut reader = open_reader(&path, &CsvOptions::legacy())?;
    let record = reader.read_record()?.ok_or("missing record")?;
    assert_eq!(record.texts(), vec!["東京", "大阪"]);
    assert!(reader.read_record()?.is_none());

    let options = CsvOptions::default().with_charset("euc-jp")?;
    assert_eq!(options.encoding, Encoding::EucJp);
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_file("/definitely/not/here.csv", &CsvOptions::default());
    assert!(matches!(result, Err(lib_legacy_csv::CsvError::Io(_))));
}
