//! # Tidepool
//! A small replicated set store: every node owns a last-writer-wins element
//! set and repairs divergence by pulling full snapshots from its peers.
//!
//! This is a convenience package which includes the sub-projects within
//! tidepool, realistically you probably only want some of these projects:
//!
//! ### Features
//! - `tidepool_crdt` - The LWW element set itself and its wall-clock timestamp.
//! - `tidepool_sync` - The pull-based, full-state anti-entropy coordinator.
//!
//! The runnable HTTP node lives in the separate `tidepool-node` binary crate.

#[cfg(feature = "tidepool-crdt")]
pub use tidepool_crdt as crdt;
#[cfg(feature = "tidepool-sync")]
pub use tidepool_sync as sync;
