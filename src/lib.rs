//! Record-deduplication utilities for tabular person-name data: an
//! exact-match grouper over literal `(given name, surname)` pairs and a
//! pairwise fuzzy matcher scoring concatenated full names with a token-sort
//! similarity ratio. Both are pure functions of a [`RecordTable`] and a
//! config; rendering and reporting of the results live elsewhere.

pub mod error;
pub mod exact;
pub mod fuzzy;
pub mod profile;
pub mod record;
pub mod similarity;
pub mod util;

pub use error::{DedupError, DedupResult};
pub use exact::{find_exact_duplicates, ExactConfig, ExactDuplicateGroup};
pub use fuzzy::{
    find_fuzzy_duplicates, find_fuzzy_duplicates_with, find_fuzzy_duplicates_with_cancel,
    FuzzyConfig, FuzzyMatchPair,
};
pub use profile::{profile_missing, FieldProfile};
pub use record::{FieldKind, FieldValue, RecordTable};
pub use similarity::{SimilarityScorer, TokenSortJaroWinkler, TokenSortRatio};
