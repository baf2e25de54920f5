use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use impdec::ImportEntry;
use log::info;
use patharg::InputArg;
use std::io::{self, Read, Write};
use std::process::exit;

mod report;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The module to inspect. If not provided or is '-', read from
    /// standard input.
    #[arg(default_value_t)]
    pub input: InputArg,

    /// Only report imports whose module name is NAME, e.g. `env`.
    #[arg(long, value_name = "NAME")]
    pub module: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Also list every section with its id and byte range.
    #[arg(long, default_value_t = false)]
    pub sections: bool,

    /// Log at debug level unless RUST_LOG is set, and include a debug
    /// representation of errors.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        abort(&cli, err);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut input = Vec::new();
    cli.input
        .open()
        .and_then(|mut reader| reader.read_to_end(&mut input))
        .with_context(|| format!("failed to read `{}`", cli.input))?;

    let scan = impdec::scan_module(&input).context("failed to scan module")?;
    info!(
        "scanned {} section(s), {} import(s)",
        scan.sections.len(),
        scan.imports.len()
    );

    let imports: Vec<&ImportEntry> = match &cli.module {
        Some(module) => scan.imports_from(module).collect(),
        None => scan.imports.iter().collect(),
    };

    let mut out = io::stdout().lock();
    match cli.format {
        Format::Text => {
            if cli.sections {
                report::write_sections(&mut out, &scan.sections)?;
            }
            report::write_imports(
                &mut out,
                scan.imports.len(),
                &imports,
                cli.module.as_deref(),
            )?;
        }
        Format::Json => {
            let value = if cli.sections {
                serde_json::json!({
                    "version": scan.version,
                    "sections": scan.sections,
                    "imports": imports,
                })
            } else {
                serde_json::to_value(&imports)?
            };
            serde_json::to_writer_pretty(&mut out, &value)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn abort(cli: &Cli, err: anyhow::Error) -> ! {
    eprintln!("ERROR: {err}");

    let sources: Vec<_> = err.chain().skip(1).collect();
    if !sources.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in sources.iter().enumerate() {
            eprintln!("    {i}: {cause}");
        }
    }

    if cli.verbose {
        eprintln!("\nDEBUG OUTPUT:\n{err:#?}");
    }

    exit(1)
}
