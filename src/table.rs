// src/table.rs

use csv::{ReaderBuilder, Trim};
use std::{
    collections::HashMap,
    fmt,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, warn};

use crate::{error::TableError, scalar::Scalar};

/// A lookup table for long-format reference data. Parsed from a delimited
/// file whose last column is the value and whose remaining columns form the
/// composite key:
///
/// ```text
/// key1,key2,key3,value
/// ```
///
/// Built once by [`MultiKeyTable::load`] and read-only from then on, so a
/// loaded table can be shared freely across threads.
#[derive(Debug)]
pub struct MultiKeyTable {
    /// Key column names from the header, in file order.
    field_names: Vec<String>,
    /// Name of the value column (the last header column).
    value_name: String,
    data: HashMap<Vec<Scalar>, Scalar>,
}

impl MultiKeyTable {
    /// Load a table from a comma-delimited file, coercing every cell with
    /// [`Scalar::infer`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        Self::load_with(path, true)
    }

    /// Load a table, choosing whether cells are type-inferred or kept as
    /// raw text.
    #[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_with<P: AsRef<Path>>(path: P, infer_types: bool) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), infer_types)
    }

    /// Parse a table from any reader. The first record is the header; every
    /// data row must have the same column count as the header or the whole
    /// load fails (no partial table is returned). When the source holds two
    /// rows with the same key tuple, the later row wins.
    pub fn from_reader<R: Read>(reader: R, infer_types: bool) -> Result<Self, TableError> {
        // The source format carries no quoting or escaping, so quote
        // handling is off and fields are whitespace-trimmed as-is.
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = rdr.records();
        let header = match records.next() {
            Some(record) => record?,
            None => return Err(TableError::MissingHeader),
        };
        if header.len() < 2 {
            return Err(TableError::MalformedHeader(header.len()));
        }

        let expected = header.len();
        let field_names: Vec<String> = header
            .iter()
            .take(expected - 1)
            .map(|s| s.to_string())
            .collect();
        let value_name = header[expected - 1].to_string();

        let coerce: fn(&str) -> Scalar = if infer_types {
            Scalar::infer
        } else {
            Scalar::text
        };

        let mut data: HashMap<Vec<Scalar>, Scalar> = HashMap::new();
        for result in records {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if record.len() != expected {
                return Err(TableError::MalformedRow {
                    line,
                    expected,
                    actual: record.len(),
                });
            }
            let key: Vec<Scalar> = record.iter().take(expected - 1).map(coerce).collect();
            let value = coerce(&record[expected - 1]);
            if data.insert(key, value).is_some() {
                warn!(line, "duplicate key tuple, later row overwrites earlier");
            }
        }

        debug!(
            entries = data.len(),
            fields = field_names.len(),
            "loaded table"
        );
        Ok(Self {
            field_names,
            value_name,
            data,
        })
    }

    /// Look up a value by named fields, in any order. The supplied names
    /// must match the table's key fields exactly; this is slower than
    /// [`MultiKeyTable::get_tuple`] but catches caller mistakes.
    pub fn get<'a, I>(&self, fields: I) -> Result<&Scalar, TableError>
    where
        I: IntoIterator<Item = (&'a str, Scalar)>,
    {
        let mut supplied: HashMap<&str, Scalar> = fields.into_iter().collect();

        let exact = supplied.len() == self.field_names.len()
            && self
                .field_names
                .iter()
                .all(|f| supplied.contains_key(f.as_str()));
        if !exact {
            let mut names: Vec<String> = supplied.keys().map(|s| (*s).to_string()).collect();
            names.sort();
            return Err(TableError::KeyMismatch {
                supplied: names,
                expected: self.field_names.clone(),
            });
        }

        let key: Vec<Scalar> = self
            .field_names
            .iter()
            .filter_map(|f| supplied.remove(f.as_str()))
            .collect();
        match self.data.get(key.as_slice()) {
            Some(value) => Ok(value),
            None => Err(TableError::LookupMiss { key }),
        }
    }

    /// Look up a value by a key tuple in field order. Fast path: no name or
    /// arity validation, a wrong-length tuple simply misses.
    pub fn get_tuple(&self, key: &[Scalar]) -> Result<&Scalar, TableError> {
        self.data
            .get(key)
            .ok_or_else(|| TableError::LookupMiss { key: key.to_vec() })
    }

    /// Number of key/value entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Key column names, in canonical order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Name of the value column.
    pub fn value_name(&self) -> &str {
        &self.value_name
    }
}

impl fmt::Display for MultiKeyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<MultiKeyTable fields:[{}] value:{} items:{}>",
            self.field_names.join(", "),
            self.value_name,
            self.data.len()
        )
    }
}
