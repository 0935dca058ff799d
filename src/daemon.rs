//! Attribute daemon: D-Bus server until Ctrl-C.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mx5_keyleds::SyncLeds;
use tracing::info;

use crate::config::BusKind;
use crate::dbus;

/// Run the daemon (blocking until interrupted).
///
/// The caller is responsible for probing the firmware and applying the
/// startup palette; see [`crate::host::start`].
pub async fn run(leds: SyncLeds, bus: BusKind) -> Result<(), Box<dyn std::error::Error>> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .ok();

    let conn = dbus::serve(leds, bus).await?;

    println!("D-Bus: {} on {bus} bus", dbus::BUS_NAME);
    println!("Ready. Ctrl+C to stop.");

    while running.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    info!("Shutting down");
    drop(conn);
    println!("Done.");
    Ok(())
}
