use std::net::{SocketAddr, TcpListener};

/// Gets a loopback socket address freshly allocated by the OS, for tests
/// that need to spin up a node on a free port.
pub fn get_unused_addr() -> SocketAddr {
    let socket = TcpListener::bind("127.0.0.1:0").unwrap();
    socket.local_addr().unwrap()
}
