use std::io;
use std::net::SocketAddr;

/// Failures of the capture source and the HTTP server. Table operations
/// themselves cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("pcap error: {0}")]
    Pcap(#[from] pcap::Error),

    #[error("no capture device found")]
    NoDevice,

    #[error("unsupported link type {0}, only Ethernet is decoded")]
    LinkType(i32),

    #[error("failed to listen on {addr}: {source}")]
    HttpBind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
