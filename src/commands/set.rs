//! Attribute writes through the daemon.

use super::{CommandResult, Context};
use crossterm::style::Stylize;

/// Write an attribute via D-Bus and report the outcome
pub async fn set(ctx: &Context, attr: &str, value: &[String]) -> CommandResult {
    let value = value.join(" ");
    let proxy = mx5kbleds::dbus::proxy(ctx.config.bus).await?;
    let reply = proxy.call_method("Write", &(attr, value.as_str())).await?;
    let outcome: String = reply.body().deserialize()?;

    match outcome.as_str() {
        "applied" => println!("{attr} <- {value}: {}", outcome.as_str().green()),
        "rejected" => println!("{attr} <- {value}: {} (value ignored)", outcome.as_str().yellow()),
        _ => println!("{attr} <- {value}: {}", outcome.as_str().red()),
    }
    Ok(())
}
