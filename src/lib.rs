pub mod catalog;
pub mod config;
pub mod context;
pub mod recommend;
pub mod record;
pub mod similarity;
pub mod stopwords;
pub mod vectorizer;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("Data Load Error: {0}")]
    DataLoadError(String),
    #[error("Index Out Of Range: index {index} is outside a catalog of {len} records")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid Id: {0} (record ids start at 1)")]
    InvalidId(i64),
    #[error("Config Error: {0}")]
    ConfigError(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RecommenderError>;

// Re-export main types for convenience
pub use catalog::{load_catalog, Catalog, ColumnMapping};
pub use config::{RecommenderConfig, DEFAULT_TOP_N};
pub use context::RecommenderContext;
pub use recommend::{id_to_index, index_to_id, recommend, recommend_listings, recommend_with_scores};
pub use record::Record;
pub use similarity::{build_similarity_index, similarity_matrix, SimilarityMatrix};
pub use vectorizer::{tokenize, vectorize, SparseRow, TermVectorMatrix};
