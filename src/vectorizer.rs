use crate::stopwords::is_stop_word;
use ndarray::{Array1, Array2};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// A sparse row of the term-vector matrix: column indices in ascending order
/// with their weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseRow {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseRow {
    /// Build a row from `(column, weight)` entries. Entries are sorted by
    /// column; zero weights are dropped.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(column, _)| *column);
        let (indices, values) = entries.into_iter().filter(|(_, w)| *w != 0.0).unzip();
        Self { indices, values }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, column: usize) -> f64 {
        match self.indices.binary_search(&column) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Dot product of two sparse rows, merging their sorted column lists.
    pub fn dot(&self, other: &SparseRow) -> f64 {
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            self.values.iter_mut().for_each(|v| *v /= norm);
        }
    }
}

/// TF-IDF weighted term vectors, one L2-normalized row per record and one
/// column per vocabulary term (sorted lexicographically).
#[derive(Debug, Clone, PartialEq)]
pub struct TermVectorMatrix {
    rows: Vec<SparseRow>,
    vocabulary: Vec<String>,
    idf: Array1<f64>,
}

impl TermVectorMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn row(&self, index: usize) -> Option<&SparseRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[SparseRow] {
        &self.rows
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|probe| probe.as_str().cmp(term))
            .ok()
    }

    pub fn idf(&self) -> &Array1<f64> {
        &self.idf
    }

    /// Indices of records whose description produced no informative terms.
    pub fn zero_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_zero())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.n_rows(), self.n_terms()));
        for (i, row) in self.rows.iter().enumerate() {
            for (j, weight) in row.iter() {
                dense[[i, j]] = weight;
            }
        }
        dense
    }
}

/// Lowercase `text` and split it into runs of two or more word characters,
/// dropping English stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().nth(1).is_some())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Smoothed inverse document frequency: `ln((1 + n) / (1 + df)) + 1`.
pub fn smooth_idf(n_documents: usize, document_frequency: usize) -> f64 {
    ((1.0 + n_documents as f64) / (1.0 + document_frequency as f64)).ln() + 1.0
}

/// Convert an ordered sequence of descriptions into a TF-IDF term-vector
/// matrix. Row `i` belongs to description `i`.
pub fn vectorize<S: AsRef<str>>(descriptions: &[S]) -> TermVectorMatrix {
    let documents: Vec<Vec<String>> = descriptions
        .iter()
        .map(|d| tokenize(d.as_ref()))
        .collect();

    let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for tokens in &documents {
        let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }

    // BTreeMap iteration is sorted, so columns follow lexicographic term order.
    let columns: BTreeMap<&str, usize> = document_frequency
        .keys()
        .enumerate()
        .map(|(column, term)| (*term, column))
        .collect();
    let idf: Array1<f64> = document_frequency
        .values()
        .map(|&df| smooth_idf(documents.len(), df))
        .collect();

    let rows: Vec<SparseRow> = documents
        .iter()
        .map(|tokens| {
            let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
            for token in tokens {
                if let Some(&column) = columns.get(token.as_str()) {
                    *counts.entry(column).or_insert(0.0) += 1.0;
                }
            }
            let mut row = SparseRow::from_entries(
                counts
                    .into_iter()
                    .map(|(column, tf)| (column, tf * idf[column]))
                    .collect(),
            );
            row.normalize();
            row
        })
        .collect();

    let vocabulary: Vec<String> = columns.keys().map(|term| term.to_string()).collect();

    let zero_rows = rows.iter().filter(|row| row.is_zero()).count();
    if zero_rows > 0 {
        warn!(
            zero_rows,
            "descriptions without informative terms produce all-zero term vectors"
        );
    }
    debug!(
        documents = rows.len(),
        vocabulary = vocabulary.len(),
        "vectorized descriptions"
    );

    TermVectorMatrix {
        rows,
        vocabulary,
        idf,
    }
}
