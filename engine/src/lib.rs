pub mod corpus;
pub mod document;
pub mod error;
pub mod index;
pub mod normalize;
pub mod search;
pub mod vector;

pub use document::{Document, MatchMode, RankBy};
pub use error::{EngineError, Result};
pub use index::InvertedIndex;
pub use search::{SearchEngine, SearchSummary};
pub use vector::VectorSpaceModel;
