//! # Tidepool CRDT
//!
//! An implementation of a Last-Writer-Wins Element Set, the conflict-free
//! replicated data type at the heart of tidepool's replicated set store.
//!
//! Each replica appends its operations to a pair of journals together with a
//! [WallTimestamp] of when the operation happened locally. Membership is then
//! a pure function of the journals: the latest addition wins unless a removal
//! is at least as recent. Because merging two sets is a commutative,
//! associative and idempotent union, replicas can exchange snapshots in any
//! order and still converge on identical content.
//!
//! ### Basic Example
//! ```rust
//! use tidepool_crdt::LwwSet;
//!
//! let mut replica_a = LwwSet::default();
//! let mut replica_b = LwwSet::default();
//!
//! // Each replica records an operation locally, without coordination.
//! replica_a.add("apple").unwrap();
//! replica_b.add("pear").unwrap();
//!
//! // Exchanging snapshots in both directions aligns the replicas.
//! replica_a.merge(replica_b.clone());
//! replica_b.merge(replica_a.clone());
//!
//! assert!(replica_a.lookup("apple").unwrap());
//! assert!(replica_a.lookup("pear").unwrap());
//! assert!(replica_b.lookup("apple").unwrap());
//! assert!(replica_b.lookup("pear").unwrap());
//! ```
//!
//! ### Inspirations
//! - [A comprehensive study of Convergent and Commutative Replicated Data Types](https://hal.inria.fr/inria-00555588)
//! - ["CRDTs Illustrated" by Arnout Engelen](https://www.youtube.com/watch?v=9xFfOhasiOE)

mod lwwset;
mod timestamp;

pub use lwwset::{EmptyValue, Entry, LwwSet};
pub use timestamp::{get_unix_timestamp_nanos, InvalidFormat, WallTimestamp};
