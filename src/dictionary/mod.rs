// Dictionary module - composite fingerprint index and match resolution

pub mod index;
pub mod mode;
pub mod record;
pub mod resolver;

pub use index::{CompositeIndex, Ja4PlusDatabase};
pub use mode::{KeyComponents, MatchMode};
pub use record::{DatabaseRow, FingerprintQuery, FingerprintRecord};
pub use resolver::{rank_candidates, MatchResult, RankedCandidate};
