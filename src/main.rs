use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, error, info};

use css_class_scanner::class::scanner::{FileCollector, ScanOutcome};
use css_class_scanner::config::{CommandPreset, ConfigStorage, Overrides, ScannerConfig};
use css_class_scanner::output::{self, CLIPBOARD_CONFIRMATION};
use css_class_scanner::{AttributeMode, ClassProcessor, ClassScanner, Destination, ParserKind};

/// Generate CSS selector skeletons from the class names used in markup
#[derive(Debug, Parser)]
#[command(name = "css-class-scanner", version, about)]
struct Cli {
    /// Markup files or directories; reads stdin when omitted
    inputs: Vec<PathBuf>,

    /// Config file (.toml, .json, .yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Command variant
    #[arg(short, long, value_enum, default_value_t = PresetArg::Run)]
    preset: PresetArg,

    /// Where to send the stylesheet
    #[arg(short, long, value_enum)]
    destination: Option<DestinationArg>,

    /// File for the new document; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Attributes that hold class names
    #[arg(short, long, value_enum)]
    attribute: Option<AttributeArg>,

    /// Markup parser
    #[arg(long, value_enum)]
    parser: Option<ParserArg>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Run,
    Bem,
    BemComments,
    Flat,
}

impl From<PresetArg> for CommandPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Run => CommandPreset::Run,
            PresetArg::Bem => CommandPreset::RunWithBem,
            PresetArg::BemComments => CommandPreset::RunWithBemAndComments,
            PresetArg::Flat => CommandPreset::RunWithoutBem,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DestinationArg {
    Clipboard,
    NewDocument,
}

impl From<DestinationArg> for Destination {
    fn from(arg: DestinationArg) -> Self {
        match arg {
            DestinationArg::Clipboard => Destination::Clipboard,
            DestinationArg::NewDocument => Destination::NewDocument,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AttributeArg {
    Class,
    Classname,
    Both,
}

impl From<AttributeArg> for AttributeMode {
    fn from(arg: AttributeArg) -> Self {
        match arg {
            AttributeArg::Class => AttributeMode::Class,
            AttributeArg::Classname => AttributeMode::ClassName,
            AttributeArg::Both => AttributeMode::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParserArg {
    Html5,
    Simple,
}

impl From<ParserArg> for ParserKind {
    fn from(arg: ParserArg) -> Self {
        match arg {
            ParserArg::Html5 => ParserKind::Html5,
            ParserArg::Simple => ParserKind::Simple,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ScannerConfig> {
    match path {
        Some(path) => ConfigStorage::new(path).load(),
        None => Ok(ScannerConfig::default()),
    }
}

fn scan_inputs(scanner: &ClassScanner, inputs: &[PathBuf], mode: AttributeMode) -> Result<ScanOutcome> {
    if inputs.is_empty() {
        let mut markup = String::new();
        std::io::stdin()
            .read_to_string(&mut markup)
            .context("Failed to read markup from stdin")?;
        return Ok(scanner.scan(&markup, mode));
    }

    let collector = FileCollector::new();
    let mut files = Vec::new();
    for input in inputs {
        files.extend(collector.collect_files(input)?);
    }
    info!("Scanning {} markup files", files.len());

    scanner.scan_files(&files, mode)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;

    let cli_overrides = Overrides {
        destination: cli.destination.map(Destination::from),
        attribute_mode: cli.attribute.map(AttributeMode::from),
        ..Overrides::default()
    };
    let overrides = CommandPreset::from(cli.preset).overrides().merge(cli_overrides);
    let options = config.resolve(&overrides);

    let parser = cli.parser.map(ParserKind::from).unwrap_or(config.parser);
    let processor = ClassProcessor::new(ClassScanner::for_kind(parser));

    let outcome = scan_inputs(processor.scanner(), &cli.inputs, options.attribute_mode)?;
    let (stylesheet, stats) = processor.render_outcome(&outcome, &options);
    debug!("Processing stats: {:?}", stats);

    let sink = output::sink_for(options.destination, cli.output.clone());
    let delivered = output::deliver(sink.as_ref(), &stylesheet)?;

    if delivered && options.destination == Destination::Clipboard {
        eprintln!("{}", CLIPBOARD_CONFIRMATION);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
