//! dumpxml CLI - Command-line tool for JSON data dump conversion
//!
//! This binary provides command-line interfaces for:
//! - convert: JSON data dump → XML document
//! - validate: sample records and compare them against a converted document

use clap::{ArgAction, Parser, Subcommand};
use dumpxml_format::constants::{DEFAULT_INDENT, DEFAULT_SAMPLE_COUNT};
use dumpxml_io::{
    execute_convert, execute_validate, ConvertOptions, ConvertRequest, ConvertSummary, FieldRules,
    JsonInput, SampleOutcome, ValidateOptions, ValidateRequest, ValidationRun, XmlInput,
    XmlOutput,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dumpxml")]
#[command(about = "Convert JSON data dumps to XML and validate the result")]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON data dump to XML
    ///
    /// Examples:
    ///   dumpxml convert -i dump.json -o dump.xml
    ///   dumpxml convert -i dump.json -o dump.xml --array-field aliases
    Convert {
        /// Input JSON file
        #[arg(short = 'i', long = "input_json", alias = "input-json")]
        input_json: PathBuf,
        /// Output XML file
        #[arg(short = 'o', long = "output_xml", alias = "output-xml")]
        output_xml: PathBuf,
        /// Spaces per nesting level
        #[arg(long, default_value_t = DEFAULT_INDENT)]
        indent: usize,
        /// Additional key whose array gets a container element
        #[arg(long = "array-field", value_name = "KEY")]
        array_fields: Vec<String>,
        /// Show progress spinner while converting
        #[arg(long)]
        progress: bool,
    },
    /// Validate a converted XML document against its JSON source
    ///
    /// Examples:
    ///   dumpxml validate -i dump.json -o dump.xml
    ///   dumpxml validate -i dump.json -o dump.xml -n 50 --seed 7 --fail-on-mismatch
    Validate {
        /// Original JSON file
        #[arg(short = 'i', long = "input_json", alias = "input-json")]
        input_json: PathBuf,
        /// Converted XML file
        #[arg(short = 'o', long = "output_xml", alias = "output-xml")]
        output_xml: PathBuf,
        /// Number of records to sample (with replacement)
        #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_COUNT)]
        samples: usize,
        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,
        /// Additional key whose array was given a container element
        #[arg(long = "array-field", value_name = "KEY")]
        array_fields: Vec<String>,
        /// Field every record must carry (replaces the default set)
        #[arg(long = "required-field", value_name = "FIELD")]
        required_fields: Vec<String>,
        /// Exit with an error unless every sample matched
        #[arg(long)]
        fail_on_mismatch: bool,
        /// Show progress spinner while validating
        #[arg(long)]
        progress: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            input_json,
            output_xml,
            indent,
            array_fields,
            progress,
        } => {
            handle_convert(input_json, output_xml, indent, array_fields, progress)?;
        }
        Commands::Validate {
            input_json,
            output_xml,
            samples,
            seed,
            array_fields,
            required_fields,
            fail_on_mismatch,
            progress,
        } => {
            let options = ValidateOptions {
                rules: build_rules(array_fields),
                samples,
                seed,
                required_fields: if required_fields.is_empty() {
                    ValidateOptions::default().required_fields
                } else {
                    required_fields
                },
            };
            handle_validate(input_json, output_xml, options, fail_on_mismatch, progress)?;
        }
    }

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_rules(array_fields: Vec<String>) -> FieldRules {
    array_fields
        .into_iter()
        .fold(FieldRules::default(), |rules, key| rules.with_array_field(key))
}

fn handle_convert(
    input: PathBuf,
    output: PathBuf,
    indent: usize,
    array_fields: Vec<String>,
    show_progress: bool,
) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let request = ConvertRequest {
        input: JsonInput::Path(input),
        output: XmlOutput::Path(output.clone()),
        options: ConvertOptions {
            rules: build_rules(array_fields),
            indent,
        },
    };

    let mut progress_bar = show_progress.then(|| create_spinner("Converting records"));
    let result = execute_convert(request);
    let elapsed = start.elapsed();
    if let Some(pb) = progress_bar.take() {
        match &result {
            Ok(summary) => pb.finish_with_message(format!(
                "Converted {} records in {:.2?}",
                summary.shape.record_count(),
                elapsed
            )),
            Err(_) => pb.abandon_with_message("Conversion failed"),
        }
    }
    let summary = result.map_err(|err| err.to_string())?;

    println!(
        "Successfully converted JSON to XML. Output saved to: {}",
        output.display()
    );
    report_convert_summary(&summary, &output, elapsed)?;
    Ok(())
}

fn report_convert_summary(
    summary: &ConvertSummary,
    output: &Path,
    elapsed: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut stderr = std::io::stderr().lock();
    writeln!(
        &mut stderr,
        "Converted to {} (records: {}, elements: {}, bytes written: {}, elapsed: {:.2?})",
        output.display(),
        summary.shape.record_count(),
        summary.elements_written,
        summary.bytes_written,
        elapsed
    )?;
    Ok(())
}

fn handle_validate(
    input: PathBuf,
    xml: PathBuf,
    options: ValidateOptions,
    fail_on_mismatch: bool,
    show_progress: bool,
) -> Result<(), Box<dyn Error>> {
    tracing::debug!(samples = options.samples, seed = ?options.seed, "starting validation");
    let request = ValidateRequest {
        json: JsonInput::Path(input),
        xml: XmlInput::Path(xml),
        options,
    };

    let mut progress_bar = show_progress.then(|| create_spinner("Sampling records"));
    let result = execute_validate(request);
    if let Some(pb) = progress_bar.take() {
        pb.finish_and_clear();
    }
    let run = result.map_err(|err| err.to_string())?;

    let mut stdout = std::io::stdout().lock();
    match &run {
        ValidationRun::Aborted(reason) => {
            writeln!(&mut stdout, "XML validation failed: {}", reason)?;
        }
        ValidationRun::Completed(report) => {
            for outcome in &report.outcomes {
                if let SampleOutcome::Mismatched { mismatch, .. } = outcome {
                    writeln!(&mut stdout, "{}", mismatch)?;
                }
                writeln!(&mut stdout, "{}", outcome)?;
            }
            writeln!(&mut stdout, "{}", report)?;
        }
    }
    drop(stdout);

    if fail_on_mismatch && !run.is_clean() {
        return Err("validation did not pass".into());
    }
    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
