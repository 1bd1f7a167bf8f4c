//! # Tidepool Sync
//!
//! Pull-based, full-state anti-entropy for the tidepool replicated set.
//!
//! Each round the [Coordinator] asks its [PeerDirectory] who the peers are,
//! fetches every peer's complete snapshot through the [Transport] and folds
//! each one into the local [LwwSet](tidepool_crdt::LwwSet) via its merge
//! operator. Peer failures are isolated: an unreachable or misbehaving peer
//! is skipped with a warning and the round carries on, so one bad peer never
//! blocks local read or write availability.
//!
//! Peer discovery and request routing live outside this crate; the directory
//! and transport traits are the seams they plug into.

#[macro_use]
extern crate tracing;

mod coordinator;
mod directory;
mod error;
mod transport;

pub use coordinator::{Coordinator, SyncOutcome};
pub use directory::{PeerDirectory, StaticPeerDirectory};
pub use error::{NoPeersConfigured, PeerUnavailable, TransportError};
pub use transport::{HttpTransport, Transport};
