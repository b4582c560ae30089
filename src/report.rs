use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::warn;

use crate::device::DeviceTable;

/// Prints the table to stdout every `period`
pub fn start(table: DeviceTable, period: Duration) -> JoinHandle<()> {
    tokio::spawn(run(table, period, std::io::stdout()))
}

async fn run(table: DeviceTable, period: Duration, mut out: impl Write) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let text = table.render();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!("Failed to print device table: {}", e);
            return;
        }
    }
}
