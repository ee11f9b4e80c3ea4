//! huffdec: decode a chunk-framed Huffman stream to a file.

mod config;

use std::process::ExitCode;

use config::{Config, Parsed};
use huffdec_core::bitio::BitCursor;
use huffdec_core::{decompress_file_with_options, files_identical, PrefixTree};
use tracing::{error, info};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(Parsed::Run(config)) => config,
        Ok(Parsed::Help) => {
            config::print_help();
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(if config.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(config.verbose)
        .with_writer(std::io::stderr)
        .init();

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns false when the output does not match `--expect`.
fn run(config: &Config) -> huffdec_core::Result<bool> {
    if config.print_config {
        config.print();
    }

    if config.print_table {
        print_table(config)?;
    }

    let metrics =
        decompress_file_with_options(&config.input_file, &config.output_file, config.decoder)?;

    if let Some(expect) = &config.expect_file {
        if !files_identical(&config.output_file, expect)? {
            error!(expect = %expect.display(), "output differs from reference");
            return Ok(false);
        }
        info!(expect = %expect.display(), "output matches reference");
    }

    if let Some(path) = &config.metrics_file {
        std::fs::write(path, metrics.export_text()).map_err(|source| {
            huffdec_core::Error::SinkUnavailable {
                path: path.clone(),
                source,
            }
        })?;
    }

    if config.print_metrics {
        metrics.print_summary();
    }
    Ok(true)
}

/// Print the decoding table only; the rest of the stream is not validated here.
fn print_table(config: &Config) -> huffdec_core::Result<()> {
    let data = std::fs::read(&config.input_file).map_err(|source| {
        huffdec_core::Error::SourceUnavailable {
            path: config.input_file.clone(),
            source,
        }
    })?;
    let tree = PrefixTree::read_with_max_depth(
        &mut BitCursor::new(&data),
        config.decoder.max_tree_depth,
    )?;

    println!("=== Decoding Table ===");
    println!("{} leaves, depth {}", tree.leaf_count(), tree.depth());
    for entry in tree.code_table() {
        let bytes: Vec<String> = entry
            .symbol
            .as_bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        println!("{:<12} {:<24} {:?}", bytes.join(" "), entry.code_string(), entry.symbol);
    }
    println!();
    Ok(())
}
