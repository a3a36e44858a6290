use clap::Parser;
use doc_conv_rs::cli::run_conversion;
use doc_conv_rs::converter::{Converter, FormatRegistry, NoProgress, ProgressObserver};
use doc_conv_rs::format::{self, TextFormat};
use doc_conv_rs::generator::xml::{XmlGenerator, XmlGeneratorOptions};
use doc_conv_rs::{get_source_types, get_target_types};
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::{self, Write};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source format extension (e.g., csv, json). Defaults to the input file's extension.
    #[arg(short = 'f', long, value_name = "EXT")]
    from: Option<String>,

    /// Target format extension (e.g., json, yaml, md, png, wav)
    #[arg(short = 't', long, value_name = "EXT")]
    to: Option<String>,

    /// Name of the document element for XML output.
    #[arg(long = "to-xml-root", default_value = "root")]
    xml_root: String,

    /// Print progress checkpoints to stderr.
    #[arg(long, default_value_t = false)]
    progress: bool,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short = 'v', long, default_value_t = false)]
    verbose: bool,

    /// Input file (default: stdin)
    input: Option<String>,

    /// Output file (default: stdout)
    output: Option<String>,

    /// List available input/output types, or the targets offered for INPUT
    #[arg(short = 'l', long)]
    list_type: bool,
}

/// Writes each checkpoint to stderr.
struct StderrProgress;

impl ProgressObserver for StderrProgress {
    fn report(&mut self, percent: u8) {
        if percent < 100 {
            eprintln!("Converting... {}%", percent);
        } else {
            eprintln!("Conversion complete!");
        }
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut registry = FormatRegistry::standard();
    registry.register_generator(
        TextFormat::Xml,
        Box::new(XmlGenerator::new(XmlGeneratorOptions {
            root_name: cli.xml_root.clone(),
        })),
    );
    let converter = Converter::new(registry);

    if cli.list_type {
        match cli.input.as_deref().filter(|path| *path != "-") {
            Some(path) => {
                let name = match cli.from.as_deref() {
                    Some(ext) => format::output_file_name(path, ext),
                    None => path.to_string(),
                };
                println!("targets for {}:", path);
                println!("{}", converter.target_options(&name).join(" "));
            }
            None => {
                println!("type of input:");
                println!("{}", get_source_types().join(" "));
                println!();
                println!("type of output:");
                println!("{}", get_target_types().join(" "));
                println!();
            }
        }
        return Ok(());
    }

    let Some(to_type) = cli.to.as_deref() else {
        anyhow::bail!(
            "Missing --to. Supported types are: {}",
            get_target_types().join(", ")
        );
    };

    let mut progress: Box<dyn ProgressObserver> = if cli.progress {
        Box::new(StderrProgress)
    } else {
        Box::new(NoProgress)
    };

    // The output file is only created once the conversion has succeeded.
    let mut buffer = Vec::new();
    run_conversion(
        &converter,
        &cli.input,
        cli.from.as_deref(),
        to_type,
        &mut buffer,
        progress.as_mut(),
    )?;

    let mut output_writer: Box<dyn Write> = match cli.output.as_deref() {
        Some(path) if path != "-" => Box::new(File::create(path)?),
        _ => Box::new(io::stdout()),
    };
    output_writer.write_all(&buffer)?;
    output_writer.flush()?;

    Ok(())
}
