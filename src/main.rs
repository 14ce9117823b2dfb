use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing_subscriber::EnvFilter;

use hostsnap::report;
use hostsnap::system::collector::Collector;
use hostsnap::system::probe::{SysinfoProbe, platform_supported};

#[derive(Parser)]
#[command(
    name = "hostsnap",
    about = "One-shot host metrics snapshot: memory, disk, CPU, boot time",
    version
)]
struct Cli {
    /// Mount point the disk group reports on
    #[arg(default_value = "/")]
    mount_point: PathBuf,

    /// CPU sampling window in milliseconds (0 takes an instantaneous reading)
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u64).range(0..=5000))]
    cpu_sample_ms: u64,

    /// Emit the snapshot as pretty-printed JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log collection diagnostics at debug level (RUST_LOG overrides)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if !platform_supported() {
        return Err(eyre!("this platform exposes no OS metrics interface"));
    }

    let probe = SysinfoProbe::new(Duration::from_millis(cli.cpu_sample_ms));
    let mut collector = Collector::new(probe, cli.mount_point);
    let snapshot = collector.collect();

    let output = if cli.json {
        let mut json = report::render_json(&snapshot)?;
        json.push('\n');
        json
    } else {
        report::render(&snapshot)
    };
    std::io::stdout().write_all(output.as_bytes())?;

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_directive = if verbose {
        "hostsnap=debug"
    } else {
        "hostsnap=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}
