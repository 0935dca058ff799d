//! D-Bus interface for the attribute daemon.
//!
//! Bus name: `org.mx5kbleds.KeyLeds1`
//! Object path: `/org/mx5kbleds/KeyLeds1`

use mx5_keyleds::{Attribute, SyncLeds};
use zbus::interface;

use crate::config::BusKind;
use crate::host;

pub const BUS_NAME: &str = "org.mx5kbleds.KeyLeds1";
pub const OBJECT_PATH: &str = "/org/mx5kbleds/KeyLeds1";
pub const INTERFACE_NAME: &str = "org.mx5kbleds.KeyLeds1";

fn parse_attribute(name: &str) -> zbus::fdo::Result<Attribute> {
    name.parse()
        .map_err(|_| zbus::fdo::Error::InvalidArgs(format!("unknown attribute: {name}")))
}

/// D-Bus interface implementation.
pub struct KeyLedsInterface {
    leds: SyncLeds,
}

impl KeyLedsInterface {
    pub fn new(leds: SyncLeds) -> Self {
        Self { leds }
    }
}

#[interface(name = "org.mx5kbleds.KeyLeds1")]
impl KeyLedsInterface {
    /// Current value of an attribute, newline terminated.
    async fn read(&self, attr: &str) -> zbus::fdo::Result<String> {
        let attr = parse_attribute(attr)?;
        let leds = self.leds.clone();
        blocking(move || leds.show(attr)).await
    }

    /// Write an attribute. Returns `applied`, `rejected` or `hardware-failed`.
    async fn write(&self, attr: &str, value: &str) -> zbus::fdo::Result<String> {
        let attr = parse_attribute(attr)?;
        let leds = self.leds.clone();
        let value = value.to_string();
        let label = blocking(move || host::write_attribute(&leds, attr, &value)).await?;
        Ok(label.to_string())
    }

    /// All attributes: Vec<(name, value)>.
    async fn status(&self) -> zbus::fdo::Result<Vec<(String, String)>> {
        let leds = self.leds.clone();
        blocking(move || host::status(&leds)).await
    }
}

/// Run `f` off the executor.
///
/// The state lock can be held across a firmware call, which blocks on file I/O.
async fn blocking<T, F>(f: F) -> zbus::fdo::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| zbus::fdo::Error::Failed(e.to_string()))
}

/// Connect to the configured bus, claim the name and serve the interface.
pub async fn serve(leds: SyncLeds, bus: BusKind) -> zbus::Result<zbus::Connection> {
    let builder = match bus {
        BusKind::Session => zbus::connection::Builder::session()?,
        BusKind::System => zbus::connection::Builder::system()?,
    };
    builder
        .name(BUS_NAME)?
        .serve_at(OBJECT_PATH, KeyLedsInterface::new(leds))?
        .build()
        .await
}

/// Client-side proxy for a running daemon.
pub async fn proxy(bus: BusKind) -> zbus::Result<zbus::Proxy<'static>> {
    let conn = match bus {
        BusKind::Session => zbus::Connection::session().await?,
        BusKind::System => zbus::Connection::system().await?,
    };
    zbus::Proxy::new_owned(conn, BUS_NAME, OBJECT_PATH, INTERFACE_NAME).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mx5_keyleds::KeyboardLeds;
    use mx5_wmi::{RecordingInterface, WmiChannel};

    use super::*;

    fn interface() -> (KeyLedsInterface, SyncLeds) {
        let recorder = Arc::new(RecordingInterface::new());
        let leds = SyncLeds::new(KeyboardLeds::open(WmiChannel::mx5r2(recorder)).unwrap());
        (KeyLedsInterface::new(leds.clone()), leds)
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_calls_do_not_stall_while_state_is_locked() {
        let (iface, leds) = interface();

        // A writer holding the lock must not block the only executor thread
        let guard = leds.lock();
        let read = tokio::spawn(async move {
            let value = iface.read("brightness").await.unwrap();
            let status = iface.status().await.unwrap();
            (value, status)
        });
        tokio::task::yield_now().await;
        assert!(!read.is_finished());
        drop(guard);

        let (value, status) = read.await.unwrap();
        assert_eq!(value, "255\n");
        assert_eq!(status.len(), Attribute::ALL.len());
    }

    #[tokio::test]
    async fn test_write_and_read_back() {
        let (iface, _) = interface();
        assert_eq!(iface.write("left", "1 2 3").await.unwrap(), "applied");
        assert_eq!(iface.write("left", "1 2").await.unwrap(), "rejected");
        assert_eq!(iface.read("left").await.unwrap(), "1 2 3\n");
        assert!(iface.read("colour").await.is_err());
    }
}
