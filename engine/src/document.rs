use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;

/// A processed post: stable id, the normalized text artifacts produced at
/// ingest time, and the metadata used for ranking. Never mutated after
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// External identifier, unique across the corpus.
    pub id: String,
    /// Raw occurrence count per normalized term.
    pub term_frequencies: HashMap<String, u64>,
    /// Space-joined normalized term sequence, original order preserved.
    pub normalized_text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub taken_at: OffsetDateTime,
    pub comment_count: u64,
    pub like_count: u64,
}

impl Document {
    /// Occurrences of `term` in this document, 0 when absent.
    pub fn term_frequency(&self, term: &str) -> u64 {
        self.term_frequencies.get(term).copied().unwrap_or(0)
    }

    /// The normalized terms in order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.normalized_text.split_whitespace()
    }
}

/// Boolean combination applied to the query terms: all must match, or at
/// least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    And,
    Or,
}

/// Final ordering criterion for the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    /// Cosine score against the query, descending.
    Similarity,
    LikeCount,
    CommentCount,
    /// Descending by `taken_at`.
    Recency,
    /// Leave the match order untouched.
    None,
}
