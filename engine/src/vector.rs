use crate::document::Document;
use std::collections::{BTreeSet, HashMap};

/// TF-IDF weight matrix over the corpus vocabulary: one row per distinct
/// term, one column per document. Owns its vocabulary and weights as
/// first-class state; fitted once, immutable afterwards.
///
/// Weighting is the smoothed scheme
/// `tf * (ln((1 + N) / (1 + df)) + 1)`, applied identically to document
/// columns and query vectors, so a term occurring in every document still
/// carries positive weight.
#[derive(Debug)]
pub struct VectorSpaceModel {
    term_rows: HashMap<String, usize>,
    idf: Vec<f64>,
    columns: Vec<Vec<f64>>,
    column_norms: Vec<f64>,
}

impl VectorSpaceModel {
    /// Fit the vocabulary and the per-document weight columns from the
    /// normalized text of every document.
    pub fn build(documents: &[Document]) -> Self {
        // Lexicographic row order keeps the matrix deterministic across runs.
        let vocabulary: BTreeSet<&str> = documents.iter().flat_map(|d| d.terms()).collect();
        let term_rows: HashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(row, term)| (term.to_string(), row))
            .collect();

        let mut df = vec![0usize; term_rows.len()];
        for doc in documents {
            let distinct: BTreeSet<&str> = doc.terms().collect();
            for term in distinct {
                df[term_rows[term]] += 1;
            }
        }
        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&df_t| ((1.0 + n) / (1.0 + df_t as f64)).ln() + 1.0)
            .collect();

        let mut columns = Vec::with_capacity(documents.len());
        for doc in documents {
            let mut column = vec![0.0; term_rows.len()];
            for term in doc.terms() {
                column[term_rows[term]] += 1.0;
            }
            for (row, weight) in column.iter_mut().enumerate() {
                *weight *= idf[row];
            }
            columns.push(column);
        }
        let column_norms = columns.iter().map(|c| norm(c)).collect();

        Self {
            term_rows,
            idf,
            columns,
            column_norms,
        }
    }

    /// Project a normalized token sequence into the fitted vocabulary
    /// space. Out-of-vocabulary tokens contribute zero weight; never fails.
    pub fn vectorize(&self, tokens: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.term_rows.len()];
        for token in tokens {
            if let Some(&row) = self.term_rows.get(token) {
                vector[row] += 1.0;
            }
        }
        for (row, weight) in vector.iter_mut().enumerate() {
            *weight *= self.idf[row];
        }
        vector
    }

    /// Cosine similarity of the query vector against every document
    /// column, indexed by document position. A zero-magnitude vector on
    /// either side scores 0, never NaN.
    pub fn score(&self, query_vector: &[f64]) -> Vec<f64> {
        let query_norm = norm(query_vector);
        self.columns
            .iter()
            .zip(&self.column_norms)
            .map(|(column, &column_norm)| {
                if column_norm == 0.0 || query_norm == 0.0 {
                    return 0.0;
                }
                let dot: f64 = column.iter().zip(query_vector).map(|(a, b)| a * b).sum();
                dot / (column_norm * query_norm)
            })
            .collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.term_rows.len()
    }
}

fn norm(vector: &[f64]) -> f64 {
    vector.iter().map(|w| w * w).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use time::macros::datetime;

    fn doc(id: &str, terms: &[&str]) -> Document {
        let mut term_frequencies = HashMap::new();
        for term in terms {
            *term_frequencies.entry(term.to_string()).or_insert(0) += 1;
        }
        Document {
            id: id.to_string(),
            term_frequencies,
            normalized_text: terms.join(" "),
            taken_at: datetime!(2023-05-01 12:00 UTC),
            comment_count: 0,
            like_count: 0,
        }
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn fits_vocabulary_from_corpus() {
        let model = VectorSpaceModel::build(&[
            doc("p1", &["pizza", "crust", "pizza"]),
            doc("p2", &["sushi"]),
        ]);
        assert_eq!(model.vocabulary_size(), 3);
    }

    #[test]
    fn out_of_vocabulary_terms_vectorize_to_zero() {
        let model = VectorSpaceModel::build(&[doc("p1", &["pizza"])]);
        let v = model.vectorize(&tokens(&["ramen"]));
        assert!(v.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn zero_vector_scores_zero_not_nan() {
        let model = VectorSpaceModel::build(&[doc("p1", &["pizza"]), doc("empty", &[])]);
        let scores = model.score(&model.vectorize(&tokens(&["ramen"])));
        assert_eq!(scores, vec![0.0, 0.0]);

        // The zero-terms document also scores 0 against a real query.
        let scores = model.score(&model.vectorize(&tokens(&["pizza"])));
        assert!(scores[0] > 0.0);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn exact_match_scores_highest() {
        let model = VectorSpaceModel::build(&[
            doc("p1", &["pizza", "good"]),
            doc("p2", &["pizza"]),
        ]);
        let scores = model.score(&model.vectorize(&tokens(&["pizza"])));
        assert!(scores[1] > scores[0]);
        assert!((scores[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn corpus_wide_term_keeps_positive_weight() {
        // With unsmoothed IDF a term in every document would score 0.
        let model = VectorSpaceModel::build(&[
            doc("p1", &["pizza", "good"]),
            doc("p2", &["pizza"]),
        ]);
        let scores = model.score(&model.vectorize(&tokens(&["pizza"])));
        assert!(scores.iter().all(|&s| s > 0.0));
    }
}
