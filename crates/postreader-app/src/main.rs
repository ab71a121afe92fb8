//! Prints POST codes from a serial POST reader.
//!
//! Opens the first serial port on the host, starts the SMC and then polls the
//! reader's POST buffer forever. Codes go to stdout as `XX `; a new line
//! starts whenever codes resume after the idle value `FF`. Diagnostics go to
//! stderr through `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use postreader_core::{start_smc, Poller, SerialConfig, SerialService};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SerialConfig::default();
    let (info, mut port) = SerialService::initialize(&config).context("failed to open POST reader")?;
    log::info!("using {info}");

    start_smc(&mut port).context("failed to start SMC")?;

    let stdout = std::io::stdout();
    let mut poller = Poller::new(port, stdout.lock());
    match poller.run().context("lost connection to POST reader")? {}
}
