use crate::{recommend::id_to_index, record::Record, Result, RecommenderError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Names of the source columns that feed each required record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub description: String,
    pub name: String,
    pub price: String,
    pub image_reference: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            description: "description".to_string(),
            name: "name".to_string(),
            price: "price".to_string(),
            image_reference: "picture_url".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Column names in record field order.
    pub fn required(&self) -> [&str; 4] {
        [
            self.description.as_str(),
            self.name.as_str(),
            self.price.as_str(),
            self.image_reference.as_str(),
        ]
    }
}

/// Immutable, ordered collection of records read once from a CSV source.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    /// Build a catalog from `(description, name, price, image_reference)` rows.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S, S)>,
        S: Into<String>,
    {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, (description, name, price, image))| {
                Record::new(index, description, name, price, image)
            })
            .collect();
        Self { records }
    }

    pub fn load<P: AsRef<Path>>(path: P, columns: &ColumnMapping) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open catalog {}", path.display()))
            .map_err(|e| RecommenderError::DataLoadError(format!("{e:#}")))?;

        let catalog = Self::from_reader(file, columns)?;
        info!(path = %path.display(), records = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R, columns: &ColumnMapping) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| RecommenderError::DataLoadError(format!("Failed to read headers: {e}")))?
            .clone();

        let positions: Vec<Option<usize>> = columns
            .required()
            .iter()
            .map(|column| headers.iter().position(|h| h.trim() == *column))
            .collect();

        let missing: Vec<&str> = columns
            .required()
            .iter()
            .zip(&positions)
            .filter(|(_, pos)| pos.is_none())
            .map(|(column, _)| *column)
            .collect();
        if !missing.is_empty() {
            return Err(RecommenderError::DataLoadError(format!(
                "Missing required columns {:?}; available columns: {:?}",
                missing,
                headers.iter().collect::<Vec<_>>()
            )));
        }

        let positions: Vec<usize> = positions.into_iter().flatten().collect();
        let (description, name, price, image) =
            (positions[0], positions[1], positions[2], positions[3]);

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            // Line 1 is the header.
            let row = row.map_err(|e| {
                RecommenderError::DataLoadError(format!("Failed to read row {}: {e}", index + 2))
            })?;
            let field = |pos: usize| row.get(pos).unwrap_or("").to_string();

            records.push(Record {
                index,
                description: field(description),
                name: field(name),
                price: field(price),
                image_reference: field(image),
            });
        }

        if records.is_empty() {
            warn!("catalog source contains no records");
        }

        Ok(Self { records })
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Look up a record by its 1-based external id.
    pub fn get_by_id(&self, id: i64) -> Result<&Record> {
        let index = id_to_index(id, self.len())?;
        Ok(&self.records[index])
    }

    /// The first `n` records, for previewing a freshly loaded source.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn descriptions(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.description.as_str()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read the listing catalog at `path` using the default column names.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    Catalog::load(path, &ColumnMapping::default()).map(|catalog| catalog.records)
}
