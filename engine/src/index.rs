use crate::document::Document;
use crate::error::{EngineError, Result};
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref NO_POSTINGS: HashSet<String> = HashSet::new();
}

/// Term -> set of ids of the documents containing that term at least once.
/// Built once from the full corpus and read-only afterwards.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, HashSet<String>>,
    doc_count: usize,
}

impl InvertedIndex {
    pub fn build(documents: &[Document]) -> Self {
        let mut index = Self {
            postings: HashMap::new(),
            doc_count: documents.len(),
        };
        for doc in documents {
            index.insert(doc);
        }
        index
    }

    // Set semantics make re-insertion of the same document a no-op.
    fn insert(&mut self, doc: &Document) {
        for term in doc.term_frequencies.keys() {
            self.postings
                .entry(term.clone())
                .or_default()
                .insert(doc.id.clone());
        }
    }

    /// Posting set for `term`; empty for a term the corpus never saw.
    pub fn postings(&self, term: &str) -> &HashSet<String> {
        self.postings.get(term).unwrap_or(&NO_POSTINGS)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings(term).len()
    }

    /// log10(N / df). Fails for a term with no postings; callers guard via
    /// [`document_frequency`](Self::document_frequency) or treat the term
    /// as weight 0.
    pub fn inverse_document_frequency(&self, term: &str) -> Result<f64> {
        let df = self.document_frequency(term);
        if df == 0 {
            return Err(EngineError::UndefinedIdf {
                term: term.to_string(),
            });
        }
        Ok((self.doc_count as f64 / df as f64).log10())
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }
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

    #[test]
    fn postings_and_document_frequency_agree() {
        let docs = vec![doc("p1", &["pizza", "crust"]), doc("p2", &["pizza"])];
        let index = InvertedIndex::build(&docs);
        assert_eq!(index.postings("pizza").len(), 2);
        assert_eq!(index.document_frequency("pizza"), 2);
        assert_eq!(index.document_frequency("crust"), 1);
        assert!(index.postings("sushi").is_empty());
        assert_eq!(index.document_frequency("sushi"), 0);
    }

    #[test]
    fn reinsertion_is_idempotent() {
        let d = doc("p1", &["pizza"]);
        let mut index = InvertedIndex::build(&[d.clone()]);
        index.insert(&d);
        assert_eq!(index.postings("pizza").len(), 1);
    }

    #[test]
    fn idf_of_known_term() {
        let docs = vec![doc("p1", &["pizza"]), doc("p2", &["pizza", "crust"])];
        let index = InvertedIndex::build(&docs);
        assert_eq!(index.inverse_document_frequency("pizza").unwrap(), 0.0);
        let idf = index.inverse_document_frequency("crust").unwrap();
        assert!((idf - 2f64.log10()).abs() < 1e-12);
    }

    #[test]
    fn idf_of_unknown_term_is_undefined() {
        let index = InvertedIndex::build(&[doc("p1", &["pizza"])]);
        let err = index.inverse_document_frequency("nonexistent_term").unwrap_err();
        assert_eq!(
            err,
            EngineError::UndefinedIdf {
                term: "nonexistent_term".to_string()
            }
        );
    }
}
