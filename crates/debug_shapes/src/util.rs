use eyre::Result;
use tracing_subscriber::EnvFilter;

/// Install error reporting and logging. `RUST_LOG` wins over `verbose`.
pub fn initialise(verbose: bool) -> Result<()> {
    color_eyre::install()?;

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Hex output is a single lowercase line.
pub fn render_payload(payload: Vec<u8>, as_hex: bool) -> Vec<u8> {
    if !as_hex {
        return payload;
    }
    let mut out = hex::encode(payload);
    out.push('\n');
    out.into_bytes()
}
