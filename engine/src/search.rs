use crate::document::{Document, MatchMode, RankBy};
use crate::error::{EngineError, Result};
use crate::index::InvertedIndex;
use crate::normalize::{compute_term_frequencies, normalize};
use crate::vector::VectorSpaceModel;
use std::collections::{HashMap, HashSet};

/// Search engine over an immutable corpus snapshot. Built once from the
/// materialized document list; every search is read-only, so concurrent
/// queries need no locking.
#[derive(Debug)]
pub struct SearchEngine {
    documents: Vec<Document>,
    id_to_index: HashMap<String, usize>,
    index: InvertedIndex,
    model: VectorSpaceModel,
}

/// Count plus ordered ids of one search. Reported for display and
/// diagnostics; carries no engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSummary {
    pub total: usize,
    pub ids: Vec<String>,
}

impl SearchEngine {
    /// Derive the inverted index and the vector space model from the
    /// corpus. A malformed document — duplicate id, or a term-frequency
    /// table that disagrees with its normalized text — aborts the whole
    /// build; both structures must stay corpus-consistent, so nothing is
    /// silently skipped.
    pub fn build(documents: Vec<Document>) -> Result<Self> {
        let mut id_to_index = HashMap::with_capacity(documents.len());
        for (i, doc) in documents.iter().enumerate() {
            if id_to_index.insert(doc.id.clone(), i).is_some() {
                return Err(EngineError::DuplicateDocument { id: doc.id.clone() });
            }
            let tokens: Vec<String> = doc.terms().map(str::to_string).collect();
            if compute_term_frequencies(&tokens) != doc.term_frequencies {
                return Err(EngineError::InconsistentDocument { id: doc.id.clone() });
            }
        }

        let index = InvertedIndex::build(&documents);
        let model = VectorSpaceModel::build(&documents);
        tracing::info!(
            num_docs = documents.len(),
            vocabulary = model.vocabulary_size(),
            "search engine built"
        );
        Ok(Self {
            documents,
            id_to_index,
            index,
            model,
        })
    }

    /// Normalize the query through the corpus pipeline, score every
    /// document by cosine similarity, filter by the boolean condition over
    /// the inverted index, and order by the requested criterion. An empty
    /// query yields an empty result, not an error.
    pub fn search(&self, query: &str, mode: MatchMode, rank: RankBy) -> Vec<String> {
        let terms = normalize(query);

        // Candidate pool: positive-similarity documents, best first.
        // Vec::sort_by is stable, so equal scores keep corpus order.
        let query_vector = self.model.vectorize(&terms);
        let scores = self.model.score(&query_vector);
        let mut candidates: Vec<(usize, f64)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, score)| score > 0.0)
            .collect();
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        // Boolean occurrence sets per query term. A zero-term query has an
        // empty intersection by definition, never an intersection over an
        // empty collection of sets.
        let posting_sets: Vec<&HashSet<String>> =
            terms.iter().map(|t| self.index.postings(t)).collect();
        let intersection: HashSet<&String> = match posting_sets.split_first() {
            None => HashSet::new(),
            Some((first, rest)) => first
                .iter()
                .filter(|id| rest.iter().all(|set| set.contains(*id)))
                .collect(),
        };

        let mut matched: Vec<usize> = match mode {
            MatchMode::And => candidates
                .iter()
                .map(|&(i, _)| i)
                .filter(|&i| intersection.contains(&self.documents[i].id))
                .collect(),
            MatchMode::Or => {
                let union: HashSet<&String> =
                    posting_sets.iter().flat_map(|set| set.iter()).collect();

                // All-terms matches first, then the remaining scored
                // candidates (a positive score implies at least one shared
                // term), then union matches that produced no similarity
                // signal, in corpus order.
                let mut ordered: Vec<usize> = candidates
                    .iter()
                    .map(|&(i, _)| i)
                    .filter(|&i| intersection.contains(&self.documents[i].id))
                    .collect();
                ordered.extend(
                    candidates
                        .iter()
                        .map(|&(i, _)| i)
                        .filter(|&i| !intersection.contains(&self.documents[i].id)),
                );
                let listed: HashSet<usize> = ordered.iter().copied().collect();
                ordered.extend((0..self.documents.len()).filter(|&i| {
                    !listed.contains(&i) && union.contains(&self.documents[i].id)
                }));
                ordered
            }
        };

        match rank {
            RankBy::Similarity | RankBy::None => {}
            RankBy::LikeCount => matched
                .sort_by(|&a, &b| self.documents[b].like_count.cmp(&self.documents[a].like_count)),
            RankBy::CommentCount => matched.sort_by(|&a, &b| {
                self.documents[b]
                    .comment_count
                    .cmp(&self.documents[a].comment_count)
            }),
            RankBy::Recency => matched
                .sort_by(|&a, &b| self.documents[b].taken_at.cmp(&self.documents[a].taken_at)),
        }

        let ids: Vec<String> = matched.iter().map(|&i| self.documents[i].id.clone()).collect();
        tracing::debug!(query, total = ids.len(), "search complete");
        ids
    }

    /// Pure observer over a finished search: the hit count and the ordered
    /// ids. Touches no engine state.
    pub fn summarize(&self, ids: &[String]) -> SearchSummary {
        SearchSummary {
            total: ids.len(),
            ids: ids.to_vec(),
        }
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.id_to_index.get(id).map(|&i| &self.documents[i])
    }

    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn model(&self) -> &VectorSpaceModel {
        &self.model
    }
}
