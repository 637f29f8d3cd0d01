//! Command-line entry point for the plotter feeder.

use anyhow::Context;
use clap::Parser;
use plotfeed::dump;
use plotfeed_communication::{list_ports, Connection, ConnectionParams, SerialConnection, Transmitter};
use plotfeed_core::DEVICE_BOUNDS;
use plotfeed_images::{available_keys, image_from_svg, predefined};
use plotfeed_planner::compile_image;
use std::path::PathBuf;

/// Compile a figure into plotter steps and send it over serial.
#[derive(Parser, Debug)]
#[command(name = "plotfeed", version, about)]
struct Cli {
    /// Key of a predefined figure (run with --list to see them).
    image: Option<String>,

    /// Extract the figure from an SVG file instead of the catalog.
    #[arg(long, value_name = "FILE", conflicts_with = "image")]
    svg: Option<PathBuf>,

    /// Serial port to use instead of USB descriptor detection.
    #[arg(long, value_name = "PORT")]
    port: Option<String>,

    /// Print the compiled steps as JSON instead of transmitting.
    #[arg(long)]
    dump: bool,

    /// List the predefined figure keys and exit.
    #[arg(long)]
    list: bool,

    /// List candidate serial ports and exit.
    #[arg(long)]
    list_ports: bool,
}

fn main() -> anyhow::Result<()> {
    plotfeed::init_logging();
    let cli = Cli::parse();

    if cli.list {
        for key in available_keys() {
            println!("{key}");
        }
        return Ok(());
    }

    if cli.list_ports {
        let ports = list_ports().context("could not enumerate serial ports")?;
        if ports.is_empty() {
            println!("no candidate ports found");
        }
        for port in ports {
            println!("{}\t{}", port.port_name, port.description);
        }
        return Ok(());
    }

    let image = match (&cli.svg, &cli.image) {
        (Some(path), _) => {
            let markup = std::fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            image_from_svg(&markup)
                .with_context(|| format!("could not extract paths from {}", path.display()))?
        }
        (None, Some(key)) => predefined(key)?,
        (None, None) => {
            anyhow::bail!(
                "no figure given; pass a catalog key ({}) or --svg <FILE>",
                available_keys().join(", ")
            );
        }
    };

    let compiled = compile_image(&image, &DEVICE_BOUNDS)?;

    if cli.dump {
        println!("{}", dump::render_json(&compiled)?);
        return Ok(());
    }

    let mut params = ConnectionParams::default();
    if let Some(port) = cli.port {
        params = params.with_port(port);
    }

    let mut connection =
        SerialConnection::open(&params).context("could not open the plotter connection")?;

    let result = {
        let mut tx = Transmitter::new(&mut connection);
        tx.begin_session()
            .and_then(|()| tx.send_image(&compiled))
    };
    connection.close()?;
    result.context("transmission failed")?;

    tracing::info!(paths = compiled.len(), "image sent");
    Ok(())
}
