use std::net::SocketAddr;
use std::time::Duration;

use tidepool_crdt::LwwSet;
use tidepool_node::routes::{router, AppState};
use tidepool_sync::{Coordinator, HttpTransport, StaticPeerDirectory};

const FETCH_TIMEOUT: Duration = Duration::from_secs(1);

/// Spins up a node on an OS-allocated port and returns its address.
fn spawn_node(peers: Vec<String>) -> SocketAddr {
    let addr = test_helper::get_unused_addr();

    let directory = StaticPeerDirectory::new(peers, String::new());
    let transport = HttpTransport::new(FETCH_TIMEOUT).expect("Build transport.");
    let state = AppState::new(Coordinator::new(directory, transport));

    let server = axum::Server::bind(&addr).serve(router(state).into_make_service());
    tokio::spawn(server);

    addr
}

async fn add_value(client: &reqwest::Client, addr: SocketAddr, value: &str) {
    let response = client
        .post(format!("http://{addr}/set/add/{value}"))
        .send()
        .await
        .expect("Send add request.");
    assert!(response.status().is_success(), "Add should succeed.");
}

async fn remove_value(client: &reqwest::Client, addr: SocketAddr, value: &str) {
    let response = client
        .post(format!("http://{addr}/set/remove/{value}"))
        .send()
        .await
        .expect("Send remove request.");
    assert!(response.status().is_success(), "Remove should succeed.");
}

async fn list_values(client: &reqwest::Client, addr: SocketAddr) -> Vec<String> {
    client
        .get(format!("http://{addr}/set/list"))
        .send()
        .await
        .expect("Send list request.")
        .json()
        .await
        .expect("Decode list response.")
}

async fn lookup_value(client: &reqwest::Client, addr: SocketAddr, value: &str) -> bool {
    let body: serde_json::Value = client
        .get(format!("http://{addr}/set/lookup/{value}"))
        .send()
        .await
        .expect("Send lookup request.")
        .json()
        .await
        .expect("Decode lookup response.");

    body["present"].as_bool().expect("Lookup payload has a present flag.")
}

#[tokio::test]
async fn test_single_node_end_to_end() {
    let addr = spawn_node(Vec::new());
    let client = reqwest::Client::new();

    assert!(list_values(&client, addr).await.is_empty());

    add_value(&client, addr, "a").await;
    assert_eq!(list_values(&client, addr).await, vec!["a".to_string()]);

    add_value(&client, addr, "b").await;
    assert_eq!(
        list_values(&client, addr).await,
        vec!["a".to_string(), "b".to_string()]
    );

    remove_value(&client, addr, "a").await;
    assert_eq!(list_values(&client, addr).await, vec!["b".to_string()]);

    assert!(!lookup_value(&client, addr, "a").await);
    assert!(lookup_value(&client, addr, "b").await);
}

#[tokio::test]
async fn test_values_returns_local_snapshot() {
    let addr = spawn_node(Vec::new());
    let client = reqwest::Client::new();

    add_value(&client, addr, "apple").await;
    add_value(&client, addr, "pear").await;
    remove_value(&client, addr, "pear").await;

    let mut snapshot: LwwSet = client
        .get(format!("http://{addr}/set/values"))
        .send()
        .await
        .expect("Send values request.")
        .json()
        .await
        .expect("Decode snapshot payload.");

    assert_eq!(snapshot.list(), vec!["apple".to_string()]);
}

#[tokio::test]
async fn test_two_nodes_converge_through_sync() {
    let node_a = spawn_node(Vec::new());
    // Node B pulls from node A on every read.
    let node_b = spawn_node(vec![node_a.to_string()]);

    let client = reqwest::Client::new();

    add_value(&client, node_a, "shared").await;
    assert_eq!(
        list_values(&client, node_b).await,
        vec!["shared".to_string()],
        "Node B should observe node A's addition after a sync."
    );
    assert!(lookup_value(&client, node_b, "shared").await);

    remove_value(&client, node_a, "shared").await;
    assert!(
        list_values(&client, node_b).await.is_empty(),
        "Node B should observe node A's removal after a sync."
    );
    assert!(!lookup_value(&client, node_b, "shared").await);
}

#[tokio::test]
async fn test_node_serves_local_state_when_peer_is_down() {
    // The configured peer is allocated but never served.
    let dead_peer = test_helper::get_unused_addr();
    let addr = spawn_node(vec![dead_peer.to_string()]);

    let client = reqwest::Client::new();

    add_value(&client, addr, "apple").await;
    assert_eq!(
        list_values(&client, addr).await,
        vec!["apple".to_string()],
        "A down peer must not block local reads."
    );
}

#[tokio::test]
async fn test_index_banner() {
    let addr = spawn_node(Vec::new());

    let body = reqwest::get(format!("http://{addr}/"))
        .await
        .expect("Send index request.")
        .text()
        .await
        .expect("Read index body.");

    assert!(body.contains("Tidepool"));
}
