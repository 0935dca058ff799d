//! Query (read-only) command handlers.

use super::{CommandResult, Context};
use crossterm::style::Stylize;
use mx5_keyleds::Mode;
use mx5kbleds::host;

/// Check for the WMI interface
///
/// Exits with status 1 when the interface is missing.
pub fn probe(ctx: &Context) -> CommandResult {
    let backend = host::open_backend(&ctx.config, &ctx.backend);
    let info = backend.info();
    println!("Backend: {} ({:?})", info.description, info.backend);

    if backend.has_interface(&ctx.config.guid) {
        println!("WMI interface {}: {}", ctx.config.guid, "present".green());
        Ok(())
    } else {
        println!("WMI interface {}: {}", ctx.config.guid, "not found".red());
        std::process::exit(1);
    }
}

/// List lighting modes
pub fn modes() -> CommandResult {
    println!("Lighting modes:");
    for mode in Mode::ALL {
        let marker = if mode == Mode::Custom { " (default)" } else { "" };
        println!("  {} {}{}", mode.as_u8(), mode.name(), marker);
    }
    Ok(())
}

/// Read an attribute via D-Bus
#[cfg(feature = "dbus")]
pub async fn get(ctx: &Context, attr: &str) -> CommandResult {
    let proxy = mx5kbleds::dbus::proxy(ctx.config.bus).await?;
    let reply = proxy.call_method("Read", &(attr,)).await?;
    let value: String = reply.body().deserialize()?;
    print!("{value}");
    Ok(())
}

/// Show all attributes via D-Bus
#[cfg(feature = "dbus")]
pub async fn status(ctx: &Context) -> CommandResult {
    let proxy = mx5kbleds::dbus::proxy(ctx.config.bus).await?;
    let reply = proxy.call_method("Status", &()).await?;
    let items: Vec<(String, String)> = reply.body().deserialize()?;

    println!("{:<11} {}", "Attribute", "Value");
    println!("{}", "-".repeat(24));
    for (name, value) in &items {
        println!("{name:<11} {value}");
    }
    Ok(())
}
