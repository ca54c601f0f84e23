use crate::{
    catalog::Catalog,
    config::RecommenderConfig,
    recommend::{id_to_index, recommend_listings, recommend_with_scores},
    record::Record,
    similarity::{build_similarity_index, SimilarityMatrix},
    vectorizer::TermVectorMatrix,
    Result,
};

/// Load-once, compute-once recommender state.
///
/// Owns the catalog and both derived matrices. Nothing is mutated after
/// construction, so a context can be shared by reference across threads and
/// every request is a read-only query.
#[derive(Debug, Clone)]
pub struct RecommenderContext {
    catalog: Catalog,
    term_vectors: TermVectorMatrix,
    similarity: SimilarityMatrix,
    top_n: usize,
}

impl RecommenderContext {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_top_n(catalog, RecommenderConfig::default().top_n)
    }

    pub fn with_top_n(catalog: Catalog, top_n: usize) -> Self {
        let (term_vectors, similarity) = build_similarity_index(catalog.records());
        Self {
            catalog,
            term_vectors,
            similarity,
            top_n,
        }
    }

    /// Read the catalog named by `config` and build its similarity index.
    pub fn from_config(config: &RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::load(&config.data_path, &config.columns)?;
        Ok(Self::with_top_n(catalog, config.top_n))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn term_vectors(&self) -> &TermVectorMatrix {
        &self.term_vectors
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn default_top_n(&self) -> usize {
        self.top_n
    }

    /// The listing with 1-based id `id`.
    pub fn listing(&self, id: i64) -> Result<&Record> {
        self.catalog.get_by_id(id)
    }

    /// Names of the `top_n` listings most similar to listing `id`.
    pub fn recommend(&self, id: i64, top_n: usize) -> Result<Vec<String>> {
        recommend_listings(&self.similarity, self.catalog.records(), id, top_n)
    }

    /// Like [`recommend`](Self::recommend) with the configured count.
    pub fn recommend_default(&self, id: i64) -> Result<Vec<String>> {
        self.recommend(id, self.top_n)
    }

    /// Recommended records for listing `id`, each with its similarity score.
    pub fn recommend_records(&self, id: i64, top_n: usize) -> Result<Vec<(&Record, f64)>> {
        let query_index = id_to_index(id, self.catalog.len())?;
        let ranked = recommend_with_scores(&self.similarity, query_index, top_n)?;

        Ok(ranked
            .into_iter()
            .filter_map(|(index, score)| self.catalog.get(index).map(|record| (record, score)))
            .collect())
    }
}
