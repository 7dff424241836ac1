use crate::{CorpusRecord, RankedResult};

/// Keep scores at or above `threshold`, best first, at most `limit` of them.
///
/// Equal scores keep corpus order. `scores` and `metadata` are matched by
/// position; a limit of 0 is treated as 1.
pub fn rank(scores: &[f64], metadata: &[CorpusRecord], limit: usize, threshold: f64) -> Vec<RankedResult> {
    debug_assert_eq!(scores.len(), metadata.len(), "scores and metadata must align");
    let mut hits: Vec<(f64, &CorpusRecord)> = scores
        .iter()
        .copied()
        .zip(metadata)
        .filter(|(score, _)| *score >= threshold)
        .collect();
    // sort_by is stable, so ties stay in corpus order
    hits.sort_by(|a, b| b.0.total_cmp(&a.0));
    hits.into_iter()
        .take(limit.max(1))
        .map(|(score, record)| RankedResult {
            score,
            title: record.title.clone(),
            sentence: record.original_sentence.clone(),
            source: record.source.clone(),
        })
        .collect()
}
