//! Colors
//!
//! Reads stdin and writes it to stdout with every word colored by its hash.

use std::io::{self, ErrorKind, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use colors::{CliArgs, Config, Error, Pipeline};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Configuration diagnostics are only interesting with --verbose
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    let config = Config::from_args(&args);
    if let Ok(json) = serde_json::to_string(&config) {
        tracing::debug!("effective configuration: {}", json);
    }

    let result = if args.list_colors {
        list_colors(&config)
    } else {
        run(&config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // The reader went away, nothing left to do
        Err(Error::Io(e)) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(config: &Config) -> colors::Result<()> {
    let mut pipeline = Pipeline::new(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();

    let state = pipeline.run(stdin.lock(), &mut stdout.lock(), &mut stderr.lock())?;
    tracing::debug!("finished in {:?} state", state);
    Ok(())
}

fn list_colors(config: &Config) -> colors::Result<()> {
    let palette = config.palette()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "Buffer sizes: input={} output={}",
        config.buffer_size,
        config.effective_output_size(&palette)
    )?;
    writeln!(out, "Available color format strings (in that color each):")?;
    palette.write_listing(&mut out)?;
    out.flush()?;
    Ok(())
}
