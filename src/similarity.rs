use crate::{
    record::Record,
    vectorizer::{vectorize, TermVectorMatrix},
    Result,
};
use anyhow::anyhow;
use ndarray::{Array2, ArrayView1};
use std::time::Instant;
use tracing::info;

/// Square matrix of pairwise cosine similarities between records.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    scores: Array2<f64>,
}

impl SimilarityMatrix {
    /// Wrap precomputed scores. The array must be square.
    pub fn from_array(scores: Array2<f64>) -> Result<Self> {
        let (rows, cols) = scores.dim();
        if rows != cols {
            return Err(anyhow!("similarity matrix must be square, got {rows}x{cols}").into());
        }
        Ok(Self { scores })
    }

    pub fn len(&self) -> usize {
        self.scores.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.scores.get([i, j]).copied()
    }

    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.len()).then(|| self.scores.row(index))
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.scores
    }
}

/// Cosine similarity for every pair of rows, computed as `M · Mᵗ`.
///
/// Rows of `M` are already L2-normalized, so the dot product is the cosine.
/// Products are accumulated per term over column postings, so only pairs that
/// share a term are ever touched. The upper triangle is mirrored into the lower
/// one, which keeps the result exactly symmetric. All-zero rows stay zero,
/// diagonal included.
pub fn similarity_matrix(m: &TermVectorMatrix) -> SimilarityMatrix {
    let n = m.n_rows();

    let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); m.n_terms()];
    for (i, row) in m.rows().iter().enumerate() {
        for (term, weight) in row.iter() {
            postings[term].push((i, weight));
        }
    }

    let mut scores = Array2::<f64>::zeros((n, n));
    for (i, row) in m.rows().iter().enumerate() {
        for (term, weight) in row.iter() {
            let column = &postings[term];
            let start = column.partition_point(|&(j, _)| j < i);
            for &(j, other) in &column[start..] {
                scores[[i, j]] += weight * other;
            }
        }
    }

    for i in 0..n {
        for j in i..n {
            let score = scores[[i, j]].clamp(-1.0, 1.0);
            scores[[i, j]] = score;
            scores[[j, i]] = score;
        }
    }

    SimilarityMatrix { scores }
}

/// Vectorize the records' descriptions and compute their similarity matrix.
pub fn build_similarity_index(records: &[Record]) -> (TermVectorMatrix, SimilarityMatrix) {
    let start = Instant::now();
    let descriptions: Vec<&str> = records.iter().map(|r| r.description.as_str()).collect();

    let term_vectors = vectorize(&descriptions);
    let similarity = similarity_matrix(&term_vectors);

    info!(
        records = records.len(),
        terms = term_vectors.n_terms(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "similarity index built"
    );
    (term_vectors, similarity)
}
