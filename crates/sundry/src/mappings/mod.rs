//! Small map- and list-like helper containers
//!
//! Each container adds one twist to a plain map: answering lookups with
//! the key itself, caching a function, pairing two maps bidirectionally,
//! protecting entries from being overwritten, and so on.

pub mod bimap;
pub mod memo;
pub mod mirror;
pub mod ordered_sets;
pub mod unique_stack;
pub mod write_once;

pub use bimap::BiMap;
pub use memo::Memo;
pub use mirror::{Mirror, Once, RecursiveMap};
pub use ordered_sets::{OrderedSets, RootsMap};
pub use unique_stack::UniqueStack;
pub use write_once::WriteOnce;
