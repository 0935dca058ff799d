// Eurocom MX5-R2 keyboard backlight host - shared library
// Config, backend selection, attribute requests and the D-Bus daemon

pub mod config;
#[cfg(feature = "dbus")]
pub mod daemon;
#[cfg(feature = "dbus")]
pub mod dbus;
pub mod host;

pub use config::{BusKind, DriverConfig, StartupConfig};
pub use host::{BackendOptions, Request};
