use thiserror::Error;

/// Failures surfaced by engine construction and the IDF lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// IDF is log10(N / df) and is undefined when df is 0. Callers must
    /// check document frequency first or treat absent terms as weight 0.
    #[error("inverse document frequency undefined: term {term:?} has no postings")]
    UndefinedIdf { term: String },

    #[error("duplicate document id {id:?} in corpus")]
    DuplicateDocument { id: String },

    #[error("document {id:?}: term frequencies disagree with normalized text")]
    InconsistentDocument { id: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
