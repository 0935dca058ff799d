//! Host command handlers.

use std::io::{self, BufRead, Write};
use std::path::Path;

use super::{CommandResult, Context};
use mx5kbleds::host::{self, Request};

/// Run the D-Bus attribute daemon
#[cfg(feature = "dbus")]
pub async fn serve(ctx: &Context) -> CommandResult {
    let leds = host::start(&ctx.config, &ctx.backend)?;
    mx5kbleds::daemon::run(leds, ctx.config.bus).await
}

/// Write the loaded config (defaults for a missing file) to `path`
pub fn init_config(ctx: &Context, path: &Path, force: bool) -> CommandResult {
    ctx.config.create(path, force)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Run the attribute shell on stdin
pub fn shell(ctx: &Context) -> CommandResult {
    let leds = host::start(&ctx.config, &ctx.backend)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        match host::parse_request(&line) {
            Ok(None) => {}
            Ok(Some(Request::Quit)) => break,
            Ok(Some(request)) => {
                writeln!(stdout, "{}", host::execute(&leds, &request))?;
            }
            Err(e) => eprintln!("{e}"),
        }
        stdout.flush()?;
    }
    Ok(())
}
