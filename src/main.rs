//! Keyboard Ping - Send echo requests to the keyboard.

use anyhow::{Context, Result};
use std::io::{self, Write};

use keyboard_ping::{
    help,
    keyboard::VirtualKeySender,
    launcher::ProcessLauncher,
    parse_args,
    pinger::InterruptibleSleep,
    Action, Pinger,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Console failures are logged; the exit code stays 0 on every path.
    if let Err(e) = run() {
        log::error!("{:#}", e);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout();
    let stderr = io::stderr();

    let action = parse_args(args.as_slice(), &mut stderr.lock())
        .context("failed to write option diagnostics")?;

    let config = match action {
        Action::Run(config) => config,
        Action::Help => {
            stdout
                .lock()
                .write_all(help::help_text().as_bytes())
                .context("failed to print help")?;
            return Ok(());
        }
        Action::ListKeys => {
            stdout
                .lock()
                .write_all(help::catalog_text().as_bytes())
                .context("failed to print key list")?;
            return Ok(());
        }
    };

    log::debug!("{:?}", config);
    if !VirtualKeySender::is_available() {
        log::warn!("built without the virtual-send feature; every ping will fail");
    }

    let mut pinger = Pinger::new(
        &config,
        VirtualKeySender::new(),
        ProcessLauncher,
        InterruptibleSleep::with_ctrlc(),
        stdout.lock(),
        stderr.lock(),
    );
    pinger.run().context("failed to write status output")?;

    Ok(())
}
