use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "lan_device_monitor")]
#[command(about = "Passively list the devices on the local network segment")]
pub struct Cli {
    /// Capture device (defaults to the first one pcap reports)
    #[arg(short, long, conflicts_with = "file")]
    pub interface: Option<String>,

    /// Replay a pcap file instead of capturing live
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// BPF filter expression
    #[arg(long)]
    pub filter: Option<String>,

    /// Put the capture device into promiscuous mode
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub promisc: bool,

    /// Snapshot length in bytes
    #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(i32).range(1..))]
    pub snaplen: i32,

    /// Capture read timeout in seconds
    #[arg(long, default_value_t = 1)]
    pub timeout: u64,

    /// Log every recognised protocol message
    #[arg(short, long)]
    pub debug: bool,

    /// Record the MAC and IP destinations of each device
    #[arg(long)]
    pub peers: bool,

    /// Serve the table over HTTP on this address, e.g. 127.0.0.1:8000
    #[arg(long)]
    pub http: Option<SocketAddr>,

    /// Console print interval in seconds, 0 disables printing
    #[arg(long, default_value_t = 5)]
    pub interval: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureSource {
    Live {
        interface: Option<String>,
        promisc: bool,
        snaplen: i32,
        timeout: Duration,
    },
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: CaptureSource,
    pub filter: Option<String>,
    pub debug: bool,
    pub peers: bool,
    pub http: Option<SocketAddr>,
    /// `None` disables the console printer
    pub interval: Option<Duration>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let source = match cli.file {
            Some(path) => CaptureSource::File(path),
            None => CaptureSource::Live {
                interface: cli.interface,
                promisc: cli.promisc,
                snaplen: cli.snaplen,
                timeout: Duration::from_secs(cli.timeout),
            },
        };

        Config {
            source,
            filter: cli.filter,
            debug: cli.debug,
            peers: cli.peers,
            http: cli.http,
            interval: (cli.interval > 0).then(|| Duration::from_secs(cli.interval)),
        }
    }
}

impl Config {
    pub fn from_args() -> Self {
        Cli::parse().into()
    }
}
