//! Configuration for the huffdec application.
//!
//! Handles parsing command-line arguments. Only the input path is required;
//! everything else has a default that is shown by `--print-config`.

use huffdec_core::DecoderOptions;
use std::path::{Path, PathBuf};

/// Complete configuration for a decode run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Files ===
    /// Compressed input file
    pub input_file: PathBuf,

    /// Decoded output file
    pub output_file: PathBuf,

    /// Reference file the output must match, if any
    pub expect_file: Option<PathBuf>,

    /// Where to write `key=value` metrics, if anywhere
    pub metrics_file: Option<PathBuf>,

    // === Decoder ===
    pub decoder: DecoderOptions,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the decoding table
    pub print_table: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,

    /// Debug-level logging
    pub verbose: bool,
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum Parsed {
    Run(Config),
    Help,
}

impl Config {
    /// Parse configuration from command-line arguments (without the program name).
    pub fn from_args(args: &[String]) -> Result<Parsed, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut expect_file: Option<PathBuf> = None;
        let mut metrics_file: Option<PathBuf> = None;
        let mut decoder = DecoderOptions::default();
        let mut print_config = false;
        let mut print_table = false;
        let mut print_metrics = true;
        let mut verbose = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--expect" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--expect requires a path".to_string());
                    }
                    expect_file = Some(PathBuf::from(&args[i]));
                }
                "--metrics-out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--metrics-out requires a path".to_string());
                    }
                    metrics_file = Some(PathBuf::from(&args[i]));
                }
                "--max-tree-depth" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--max-tree-depth requires a number".to_string());
                    }
                    decoder.max_tree_depth =
                        args[i].parse().map_err(|_| "invalid max-tree-depth")?;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--print-table" => {
                    print_table = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    return Ok(Parsed::Help);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let input_file = input_file.ok_or("--in is required")?;
        let output_file = output_file.unwrap_or_else(|| default_output(&input_file));
        if output_file == input_file {
            return Err("--out must differ from --in".to_string());
        }

        Ok(Parsed::Run(Config {
            input_file,
            output_file,
            expect_file,
            metrics_file,
            decoder,
            print_config,
            print_table,
            print_metrics,
            verbose,
        }))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Input file:  {}", self.input_file.display());
        println!("Output file: {}", self.output_file.display());
        match &self.expect_file {
            Some(path) => println!("Expect file: {}", path.display()),
            None => println!("Expect file: (none)"),
        }
        if let Some(path) = &self.metrics_file {
            println!("Metrics file: {}", path.display());
        }
        println!();
        println!("Max tree depth: {}", self.decoder.max_tree_depth);
        println!();
    }
}

/// `data.huf` -> `data.out`
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("out")
}

pub fn print_help() {
    println!("huffdec: Decoder for chunk-framed Huffman streams");
    println!();
    println!("USAGE:");
    println!("    huffdec --in <PATH> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Compressed input file (required)");
    println!("    --out <PATH>            Output file (default: input with .out extension)");
    println!("    --expect <PATH>         Fail unless output matches this file byte for byte");
    println!("    --metrics-out <PATH>    Write metrics as key=value lines to this file");
    println!();
    println!("    --max-tree-depth <N>    Deepest decoding table accepted (default: 1024)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --print-table           Print the decoding table");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --verbose, -v           Debug logging");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffdec --in test0.huf                         # Writes test0.out");
    println!("    huffdec --in test0.huf --expect test0.orig     # Decode and verify");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn parse(list: &[&str]) -> Config {
        match Config::from_args(&args(list)).unwrap() {
            Parsed::Run(config) => config,
            Parsed::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--in", "tests/test0.huf"]);
        assert_eq!(config.output_file, PathBuf::from("tests/test0.out"));
        assert!(config.expect_file.is_none());
        assert!(config.metrics_file.is_none());
        assert_eq!(config.decoder, DecoderOptions::default());
        assert!(config.print_metrics);
        assert!(!config.verbose);
    }

    #[test]
    fn test_all_flags() {
        let config = parse(&[
            "--in",
            "a.huf",
            "--out",
            "b.bin",
            "--expect",
            "a.orig",
            "--metrics-out",
            "a.metrics",
            "--max-tree-depth",
            "64",
            "--print-config",
            "--print-table",
            "--no-metrics",
            "-v",
        ]);
        assert_eq!(config.output_file, PathBuf::from("b.bin"));
        assert_eq!(config.expect_file, Some(PathBuf::from("a.orig")));
        assert_eq!(config.metrics_file, Some(PathBuf::from("a.metrics")));
        assert_eq!(config.decoder.max_tree_depth, 64);
        assert!(config.print_config && config.print_table && config.verbose);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_errors() {
        assert!(Config::from_args(&args(&[])).is_err());
        assert!(Config::from_args(&args(&["--in"])).is_err());
        assert!(Config::from_args(&args(&["--in", "a", "--bogus"])).is_err());
        assert!(Config::from_args(&args(&["--in", "a", "--max-tree-depth", "x"])).is_err());
        assert!(Config::from_args(&args(&["--in", "a", "--metrics-out"])).is_err());
        assert!(Config::from_args(&args(&["--in", "a.out"])).is_err());
    }

    #[test]
    fn test_help() {
        assert!(matches!(
            Config::from_args(&args(&["--help"])),
            Ok(Parsed::Help)
        ));
    }
}
