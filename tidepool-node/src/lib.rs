//! # Tidepool Node
//!
//! The runnable tidepool node: an axum HTTP server owning one
//! [LwwSet](tidepool_crdt::LwwSet) and keeping it aligned with its peers
//! through pull-based anti-entropy.
//!
//! The set lives in a single shared state cell injected into every handler;
//! read routes optionally run a sync round first, write routes mutate the
//! local set only and rely on peers pulling the change on their next round.

#[macro_use]
extern crate tracing;

pub mod routes;
