use chartlet_common::accessor::{date, number, Accessor};
use chartlet_common::time::parse_date;
use chartlet_common::value::{Value, ValueKind};
use chartlet_data::{load_csv, parse_csv, CsvOptions, LoaderError};
use rstest::rstest;

fn fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn test_load_weather() {
    let ds = load_csv(fixture("weather.csv"), &CsvOptions::default()).unwrap();
    assert_eq!(
        ds.columns(),
        ["date", "temperatureMax", "humidity", "summary", "windy"]
    );
    assert_eq!(ds.len(), 4);

    let first = &ds.records()[0];
    assert_eq!(first.get("date"), Some(&Value::Date(parse_date("2024-01-07").unwrap())));
    assert_eq!(first.get("temperatureMax"), Some(&Value::Number(31.2)));
    assert_eq!(first.get("windy"), Some(&Value::Boolean(false)));
    assert_eq!(
        first.get("summary").map(Value::kind),
        Some(ValueKind::Text)
    );

    // empty and NaN cells read as nulls through accessors
    let temp = number("temperatureMax");
    let humidity = number("humidity");
    assert_eq!(temp.access(&ds.records()[2]), Ok(None));
    assert_eq!(humidity.access(&ds.records()[3]), Ok(None));
    assert_eq!(
        date("date").access(&ds.records()[3]),
        Ok(parse_date("2024-01-28"))
    );
}

#[rstest]
#[case(b'\t', "a\tb\n1\t2\n")]
#[case(b';', "a;b\n1;2\n")]
#[case(b'|', "a|b\n1|2\n")]
fn test_delimiters(#[case] delimiter: u8, #[case] text: &str) {
    let ds = parse_csv(text, &CsvOptions::default().with_delimiter(delimiter)).unwrap();
    assert_eq!(ds.records()[0].get("b"), Some(&Value::Number(2.0)));
}

#[test]
fn test_quoted_fields() {
    let ds = parse_csv(
        "city,population\n\"Portland, OR\",652503\n",
        &CsvOptions::default(),
    )
    .unwrap();
    assert_eq!(
        ds.records()[0].get("city"),
        Some(&Value::Text("Portland, OR".to_string()))
    );
}

#[test]
fn test_trim_headers() {
    let text = " a , b \n1,2\n";
    let trimmed = parse_csv(text, &CsvOptions::default()).unwrap();
    assert!(trimmed.records()[0].contains("a"));

    let untrimmed = parse_csv(text, &CsvOptions::default().with_trim(false)).unwrap();
    assert!(untrimmed.records()[0].contains(" a "));
    // cells are still typed after trimming
    assert_eq!(untrimmed.records()[0].get(" b "), Some(&Value::Number(2.0)));
}

#[test]
fn test_ragged_rows_are_rejected() {
    let err = parse_csv("a,b\n1,2,3\n", &CsvOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        LoaderError::RaggedRow {
            expected: 2,
            found: 3,
            ..
        }
    ));
}
