#[macro_use]
extern crate tracing;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tidepool_node::routes::{router, AppState};
use tidepool_sync::{Coordinator, HttpTransport, StaticPeerDirectory};

/// How long a single peer snapshot fetch may take before the peer is
/// skipped for the round.
const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args: Args = Args::parse();

    let directory = StaticPeerDirectory::new(args.peers, args.network);
    let transport = HttpTransport::new(FETCH_TIMEOUT)?;
    let state = AppState::new(Coordinator::new(directory, transport));

    let app = router(state);

    info!("listening on {}", args.listen_addr);
    axum::Server::bind(&args.listen_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "127.0.0.1:8080")]
    /// The address for the node's HTTP server to listen on.
    listen_addr: SocketAddr,

    #[arg(long = "peer")]
    /// A peer node to pull snapshots from during sync. Repeatable.
    peers: Vec<String>,

    #[arg(long, default_value = "")]
    /// The addressing domain appended to a peer identifier when resolving
    /// its address.
    ///
    /// Leave empty when peers are already full `host:port` authorities.
    network: String,
}
