mod capture;
mod config;
mod device;
mod error;
mod logging;
mod packet;
mod parser;
mod report;
mod web;

#[cfg(test)]
mod test_utils;

use std::net::TcpListener;

use tokio::task;
use tracing::{debug, info};

use config::{CaptureSource, Config};
use device::DeviceTable;
use error::Error;
use parser::Parser;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_args();
    logging::init(config.debug);
    debug!("Starting with {:?}", config);

    let table = DeviceTable::new();
    let parser = Parser::new(config.peers);

    // Open the capture source before starting any reader
    let mut cap = capture::open(&config.source, config.filter.as_deref())?;

    let server = match config.http {
        Some(addr) => {
            let listener =
                TcpListener::bind(addr).map_err(|source| Error::HttpBind { addr, source })?;
            Some(web::start(table.clone(), listener))
        }
        None => None,
    };

    if let Some(period) = config.interval {
        report::start(table.clone(), period);
    }

    let capture_table = table.clone();
    let stats =
        task::spawn_blocking(move || capture::run(&mut cap, &capture_table, &parser)).await??;

    if let CaptureSource::File(path) = &config.source {
        info!("Replayed {} packets from {}", stats.packets, path.display());
        print!("{}", table.render());
    }

    // After a replay the server keeps running until the process is stopped
    if let Some(server) = server {
        server.await??;
    }
    Ok(())
}
