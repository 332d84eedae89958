//! Normalized records and stored file entries.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Reserved key holding the synthetic row identifier.
pub const ID_KEY: &str = "id";

/// A row after normalization.
///
/// Serializes as one JSON object: `id` first, then the column keys in
/// schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    id: u64,
    fields: Vec<(String, CellValue)>,
}

impl NormalizedRecord {
    /// Creates a record. `id` is 1-based within its record set.
    pub fn new(id: u64, fields: Vec<(String, CellValue)>) -> Self {
        Self { id, fields }
    }

    /// The synthetic sequential identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Column values in schema order (without `id`).
    pub fn fields(&self) -> &[(String, CellValue)] {
        &self.fields
    }

    /// Column keys in schema order (without `id`).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Looks up a column value.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_KEY, &self.id)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = NormalizedRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a record object with an `id` key")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<NormalizedRecord, A::Error> {
        let mut id = None;
        let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_key::<String>()? {
            if key == ID_KEY {
                if id.is_some() {
                    return Err(de::Error::duplicate_field(ID_KEY));
                }
                id = Some(access.next_value::<u64>()?);
            } else {
                let value = access.next_value::<CellValue>()?;
                fields.push((key, value));
            }
        }
        let id = id.ok_or_else(|| de::Error::missing_field(ID_KEY))?;
        Ok(NormalizedRecord { id, fields })
    }
}

impl<'de> Deserialize<'de> for NormalizedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

/// A named, normalized record set.
///
/// Entries are replaced wholesale on reload and never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Source file name; unique key in the store.
    pub name: String,
    /// Normalized records in row order.
    pub records: Vec<NormalizedRecord>,
}

impl FileEntry {
    /// Creates a new entry.
    pub fn new(name: impl Into<String>, records: Vec<NormalizedRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Discovered columns, taken from the first record (empty when there are no records).
    pub fn columns(&self) -> Vec<&str> {
        self.records
            .first()
            .map(|record| record.keys().collect())
            .unwrap_or_default()
    }

    /// Table headers for display: `id` followed by the discovered columns.
    pub fn headers(&self) -> Vec<&str> {
        if self.records.is_empty() {
            return Vec::new();
        }
        std::iter::once(ID_KEY).chain(self.columns()).collect()
    }

    /// All values of one column, in record order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> {
        self.records.iter().filter_map(move |record| record.get(column))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the entry holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
