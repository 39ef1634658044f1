//! `debug-shapes`: turn a JSON-lines batch of shape operations into the binary
//! payload the debug renderer expects.

use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand, ValueEnum};
use debug_shapes_protocol::{
    shape::{LineType, SplineType},
    Layer,
};
use debug_shapes_transport::{send_to, Delivery, DeliveryConfig, RecordingRecipient};
use eyre::{bail, Result, WrapErr};
use log::info;

mod batch;
mod util;

#[derive(Parser)]
#[command(name = "debug-shapes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a batch file into a debug message payload
    Encode {
        /// JSON-lines input, one operation per line. `-` reads stdin
        input: String,

        /// Output file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,

        /// Channel to address, overrides DEBUG_SHAPES_CHANNEL
        #[arg(long)]
        channel: Option<String>,
    },

    /// Print a sample batch in the input format
    Sample {
        /// Put every shape on this layer (inline, top, mixed)
        #[arg(long)]
        layer: Option<Layer>,

        /// Join style of the sample line (single, strip, loop)
        #[arg(long, default_value = "strip")]
        line_type: LineType,

        /// Curve family of the sample spline (catmull_rom, bezier)
        #[arg(long, default_value = "catmull_rom")]
        spline_type: SplineType,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Raw bytes
    Raw,
    /// Lowercase hex on a single line
    Hex,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    util::initialise(cli.verbose)?;

    match cli.command {
        Commands::Encode {
            input,
            output,
            format,
            channel,
        } => encode(&input, output, format, channel),
        Commands::Sample {
            layer,
            line_type,
            spline_type,
        } => {
            let sample = batch::sample_batch(batch::SampleStyle {
                layer,
                line_type,
                spline_type,
            })?;
            print!("{}", batch::to_json_lines(&sample)?);
            Ok(())
        }
    }
}

fn encode(
    input: &str,
    output: Option<PathBuf>,
    format: OutputFormat,
    channel: Option<String>,
) -> Result<()> {
    let reader: Box<dyn Read> = if input == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(File::open(input).wrap_err_with(|| format!("failed to open {input}"))?)
    };
    let message = batch::load_batch(BufReader::new(reader))?;

    let config = match channel {
        Some(channel) => DeliveryConfig::from_channel(Some(channel)),
        None => DeliveryConfig::from_env(),
    };
    let recipient = RecordingRecipient::new("output");
    if let Delivery::Skipped = send_to(&message, &recipient, &config)? {
        bail!("output recipient did not accept the message");
    }
    let Some((channel, payload)) = recipient.take().pop() else {
        bail!("nothing was delivered");
    };
    info!(
        "Encoded {} operations into {} bytes for channel {}",
        message.len(),
        payload.len(),
        channel
    );

    let bytes = util::render_payload(payload, matches!(format, OutputFormat::Hex));

    match output {
        Some(path) => std::fs::write(&path, &bytes)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
