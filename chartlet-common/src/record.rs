use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One row of a dataset: field name to typed value, in column order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRecord {
    fields: IndexMap<String, Value>,
}

impl DataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Build a [`DataRecord`] from `field => value` pairs
#[macro_export]
macro_rules! record {
    ($($field:expr => $value:expr),* $(,)?) => {
        $crate::record::DataRecord::new()$(.with_field($field, $value))*
    };
}

/// An ordered, fully materialized table of homogeneous records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<DataRecord>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<DataRecord>) -> Self {
        Self { columns, records }
    }

    /// Column names are taken from the first record
    pub fn from_records(records: Vec<DataRecord>) -> Self {
        let columns = records
            .first()
            .map(|r| r.field_names().map(String::from).collect())
            .unwrap_or_default();
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataRecord;
    type IntoIter = std::slice::Iter<'a, DataRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<DataRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = DataRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_macro_keeps_order() {
        let r = record! { "b" => 1.0, "a" => "x", "c" => Value::Null };
        assert_eq!(r.field_names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(r.get("a"), Some(&Value::Text("x".to_string())));
        assert!(r.get("missing").is_none());
    }

    #[test]
    fn test_dataset_columns_from_first_record() {
        let ds: Dataset = vec![record! { "x" => 1.0, "y" => 2.0 }, record! { "x" => 3.0, "y" => 4.0 }]
            .into_iter()
            .collect();
        assert_eq!(ds.columns(), &["x".to_string(), "y".to_string()]);
        assert_eq!(ds.len(), 2);
        assert!(Dataset::default().is_empty());
    }
}
