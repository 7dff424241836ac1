use crate::index::{SparseVector, TermMatrix};

/// Cosine similarity of two vectors, 0 when either has zero norm.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    // Non-negative weights keep this in [0, 1]; the clamp only absorbs rounding.
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// One similarity score per matrix row, in row order.
pub fn cosine_scores(query: &SparseVector, matrix: &TermMatrix) -> Vec<f64> {
    if query.is_zero() {
        return vec![0.0; matrix.n_rows()];
    }
    matrix.rows().iter().map(|row| cosine(query, row)).collect()
}
