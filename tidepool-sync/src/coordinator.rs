use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tidepool_crdt::LwwSet;

use crate::directory::PeerDirectory;
use crate::error::{NoPeersConfigured, PeerUnavailable};
use crate::transport::Transport;

/// The result of one anti-entropy round across the configured peers.
#[derive(Debug)]
pub struct SyncOutcome {
    /// The local set with every reachable peer's snapshot folded in.
    pub set: LwwSet,
    /// Peers whose snapshots could not be fetched this round.
    pub skipped: Vec<PeerUnavailable>,
}

/// Pulls full snapshots from every configured peer and folds them into the
/// local set.
///
/// This is deliberately the simplest correct anti-entropy design: no deltas
/// and no digests, at a cost of O(peers x state size) per round. Because the
/// set's merge is commutative and associative, the concurrent fetches can be
/// folded in whatever order they complete.
pub struct Coordinator<D, T> {
    directory: D,
    transport: T,
}

impl<D, T> Coordinator<D, T>
where
    D: PeerDirectory,
    T: Transport,
{
    pub fn new(directory: D, transport: T) -> Self {
        Self {
            directory,
            transport,
        }
    }

    /// Whether this node has any peers to sync with.
    pub fn has_peers(&self) -> bool {
        !self.directory.peer_list().is_empty()
    }

    /// Runs one sync round, returning the folded set.
    ///
    /// A peer that is unreachable, answers with a non-success status or
    /// serves a malformed snapshot is logged, reported in the outcome and
    /// skipped; one bad peer never fails the round. The caller is
    /// responsible for installing the returned set as the new authoritative
    /// local state.
    pub async fn sync(&self, local: LwwSet) -> Result<SyncOutcome, NoPeersConfigured> {
        let peers = self.directory.peer_list();
        if peers.is_empty() {
            return Err(NoPeersConfigured);
        }

        let network = self.directory.network_suffix();
        let transport = &self.transport;

        let mut fetches = peers
            .into_iter()
            .map(|peer| {
                let url = peer_url(&peer, &network);
                async move {
                    let result = transport.fetch_snapshot(&url).await;
                    (peer, result)
                }
            })
            .collect::<FuturesUnordered<_>>();

        let mut merged = local;
        let mut skipped = Vec::new();

        while let Some((peer, result)) = fetches.next().await {
            match result {
                Ok(snapshot) => {
                    debug!(peer = %peer, "merging peer snapshot");
                    merged.merge(snapshot);
                },
                Err(source) => {
                    let failure = PeerUnavailable { peer, source };
                    warn!(error = %failure, "skipping peer for this round");
                    skipped.push(failure);
                },
            }
        }

        Ok(SyncOutcome {
            set: merged,
            skipped,
        })
    }
}

/// Resolves a peer identifier into the URL its snapshot is served at.
fn peer_url(peer: &str, network: &str) -> String {
    if network.is_empty() {
        format!("http://{peer}/set/values")
    } else {
        format!("http://{peer}.{network}/set/values")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_url_with_network_suffix() {
        assert_eq!(
            peer_url("node-1", "cluster.local"),
            "http://node-1.cluster.local/set/values"
        );
    }

    #[test]
    fn test_peer_url_without_network_suffix() {
        assert_eq!(
            peer_url("127.0.0.1:8080", ""),
            "http://127.0.0.1:8080/set/values"
        );
    }
}
