/// A read-only source of peer identities and their addressing domain.
///
/// Discovery itself is out of scope for the sync layer; the directory is
/// whatever the process was configured with.
pub trait PeerDirectory: Send + Sync + 'static {
    /// The identifiers of the peers this node replicates with.
    ///
    /// May be empty, in which case sync is a no-op.
    fn peer_list(&self) -> Vec<String>;

    /// The addressing domain used to resolve a peer identifier into a
    /// fetchable address.
    ///
    /// An empty suffix means peer identifiers are already full `host:port`
    /// authorities.
    fn network_suffix(&self) -> String;
}

#[derive(Debug, Clone, Default)]
/// A [PeerDirectory] over a fixed peer list, typically built from CLI flags.
pub struct StaticPeerDirectory {
    peers: Vec<String>,
    network: String,
}

impl StaticPeerDirectory {
    pub fn new(peers: Vec<String>, network: String) -> Self {
        Self { peers, network }
    }
}

impl PeerDirectory for StaticPeerDirectory {
    fn peer_list(&self) -> Vec<String> {
        self.peers.clone()
    }

    fn network_suffix(&self) -> String {
        self.network.clone()
    }
}
