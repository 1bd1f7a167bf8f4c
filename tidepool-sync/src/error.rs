use thiserror::Error;

#[derive(Debug, Error)]
#[error("No peers are configured for this node.")]
/// Sync was invoked with an empty peer list.
///
/// This is a non-fatal condition: the caller keeps serving its local state.
pub struct NoPeersConfigured;

#[derive(Debug, Error)]
#[error("failed to fetch snapshot from peer {peer}: {source}")]
/// A single peer could not contribute its snapshot during a sync round.
///
/// The round carries on without the peer; the failure is reported in the
/// [SyncOutcome](crate::SyncOutcome) so callers can observe the skip.
pub struct PeerUnavailable {
    pub peer: String,
    #[source]
    pub source: TransportError,
}

#[derive(Debug, Error)]
/// An error produced while fetching or decoding one peer's snapshot.
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("received invalid http response status: {0}")]
    BadStatus(u16),

    #[error("received a malformed snapshot payload: {0}")]
    Encoding(#[from] serde_json::Error),
}
