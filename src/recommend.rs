use crate::{record::Record, similarity::SimilarityMatrix, Result, RecommenderError};

/// Resolve a 1-based external id to a 0-based catalog index.
///
/// Ids below 1 are rejected with `InvalidId` before any bounds check; ids past
/// the end of the catalog fail with `IndexOutOfRange`.
pub fn id_to_index(id: i64, catalog_len: usize) -> Result<usize> {
    if id < 1 {
        return Err(RecommenderError::InvalidId(id));
    }
    let index = usize::try_from(id - 1).map_err(|_| RecommenderError::InvalidId(id))?;
    if index >= catalog_len {
        return Err(RecommenderError::IndexOutOfRange {
            index,
            len: catalog_len,
        });
    }
    Ok(index)
}

/// The 1-based external id of a 0-based catalog index.
pub fn index_to_id(index: usize) -> i64 {
    index as i64 + 1
}

/// The `n` records most similar to `query_index`, paired with their scores.
///
/// The query itself is never returned. Results are ordered by descending
/// score, equal scores by ascending index. Asking for more than the catalog
/// holds returns every other record.
pub fn recommend_with_scores(
    sim: &SimilarityMatrix,
    query_index: usize,
    n: usize,
) -> Result<Vec<(usize, f64)>> {
    let row = sim.row(query_index).ok_or(RecommenderError::IndexOutOfRange {
        index: query_index,
        len: sim.len(),
    })?;

    let mut ranked: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|(index, _)| *index != query_index)
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    Ok(ranked)
}

/// Indices of the `n` records most similar to `query_index`.
pub fn recommend(sim: &SimilarityMatrix, query_index: usize, n: usize) -> Result<Vec<usize>> {
    Ok(recommend_with_scores(sim, query_index, n)?
        .into_iter()
        .map(|(index, _)| index)
        .collect())
}

/// Display names of the `top_n` listings most similar to the listing with
/// 1-based id `id`.
pub fn recommend_listings(
    sim: &SimilarityMatrix,
    records: &[Record],
    id: i64,
    top_n: usize,
) -> Result<Vec<String>> {
    let query_index = id_to_index(id, records.len())?;
    recommend(sim, query_index, top_n)?
        .into_iter()
        .map(|index| {
            records
                .get(index)
                .map(|record| record.name.clone())
                .ok_or(RecommenderError::IndexOutOfRange {
                    index,
                    len: records.len(),
                })
        })
        .collect()
}
