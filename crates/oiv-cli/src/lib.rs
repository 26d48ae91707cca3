use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use oiv_assembly::{write_assembly, Assembly, AssemblyError, WriteOptions};
use oiv_manifest::{LoadOptions, Manifest, ManifestError};
use serde_json::json;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    InvalidArguments = 3,
    Io = 4,
    Parse = 5,
    Validation = 6,
}

impl From<&ManifestError> for ExitCode {
    fn from(err: &ManifestError) -> Self {
        match err {
            ManifestError::NotFound { .. } | ManifestError::WorkingDirectory { .. } => {
                ExitCode::InvalidArguments
            }
            ManifestError::Io { .. } => ExitCode::Io,
            ManifestError::Parse { .. } => ExitCode::Parse,
            ManifestError::Validation { .. } => ExitCode::Validation,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "oiv-package",
    author,
    version,
    about = "Build OpenIV package assembly documents from a TOML manifest",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rendered <content> element
    Render(RenderArgs),
    /// Render the full assembly.xml document
    Assemble(AssembleArgs),
    /// Validate the manifest and report every problem
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct ManifestArgs {
    /// Manifest path (defaults to ./oiv.toml)
    #[arg(short = 'm', long = "manifest", value_name = "PATH")]
    manifest: Option<PathBuf>,
}

impl ManifestArgs {
    fn load(&self) -> Result<Manifest, ManifestError> {
        let mut options = LoadOptions::default();
        if let Some(path) = &self.manifest {
            options = options.with_manifest_path(path);
        }
        Manifest::load(options)
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    manifest: ManifestArgs,
}

#[derive(Args, Debug)]
struct AssembleArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Package directory receiving assembly.xml; prints to stdout when omitted
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    output: Option<PathBuf>,

    /// Fixed package id instead of a random one
    #[arg(long = "id", value_name = "UUID")]
    id: Option<Uuid>,

    /// Print diff without writing changes
    #[arg(long = "dry-run", requires = "output")]
    dry_run: bool,

    /// Do not keep assembly.xml.bak when overwriting
    #[arg(long = "no-backup")]
    no_backup: bool,

    /// Suppress informational output (diffs, success messages)
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Report format
    #[arg(long = "format", value_enum, default_value_t = CheckFormat::Plain)]
    format: CheckFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CheckFormat {
    Plain,
    Json,
}

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render(args) => handle_render(args),
        Command::Assemble(args) => handle_assemble(args),
        Command::Check(args) => handle_check(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_render(args: RenderArgs) -> Result<ExitCode> {
    let manifest = match args.manifest.load() {
        Ok(manifest) => manifest,
        Err(err) => return Ok(report_manifest_error(&err)),
    };

    emit(manifest.content.result())?;
    Ok(ExitCode::Success)
}

fn handle_assemble(args: AssembleArgs) -> Result<ExitCode> {
    let manifest = match args.manifest.load() {
        Ok(manifest) => manifest,
        Err(err) => return Ok(report_manifest_error(&err)),
    };

    let assembly = match args.id {
        Some(id) => Assembly::with_id(
            id,
            manifest.metadata.clone(),
            manifest.colors,
            manifest.content.clone(),
        ),
        None => manifest.assembly(),
    };
    debug!(id = %assembly.id(), "assembling package");
    let document = assembly.render();

    let Some(dir) = args.output else {
        print!("{document}");
        io::stdout().flush()?;
        return Ok(ExitCode::Success);
    };

    let options = WriteOptions {
        dry_run: args.dry_run,
        backup: !args.no_backup,
    };
    let outcome = match write_assembly(&dir, &document, &options) {
        Ok(outcome) => outcome,
        Err(AssemblyError::Io { path, source }) => {
            eprintln!("I/O error on {}: {source}", path.display());
            return Ok(ExitCode::Io);
        }
        Err(err) => return Err(err.into()),
    };

    if args.quiet {
        return Ok(ExitCode::Success);
    }

    if let Some(diff) = &outcome.diff {
        print!("{diff}");
    }
    if args.dry_run {
        println!("No changes written (dry run)");
    } else if outcome.changed {
        println!("Wrote {}", outcome.path.display());
    } else {
        println!("No changes to {}", outcome.path.display());
    }
    io::stdout().flush()?;
    Ok(ExitCode::Success)
}

fn handle_check(args: CheckArgs) -> Result<ExitCode> {
    let result = args.manifest.load();

    match args.format {
        CheckFormat::Plain => match result {
            Ok(manifest) => {
                println!(
                    "{}: ok ({} top-level operations)",
                    manifest.path.display(),
                    manifest.content.operations().len()
                );
                Ok(ExitCode::Success)
            }
            Err(ManifestError::Validation { path, errors }) => {
                println!("{}: {} problem(s)", path.display(), errors.len());
                println!("{errors}");
                Ok(ExitCode::Validation)
            }
            Err(err) => Ok(report_manifest_error(&err)),
        },
        CheckFormat::Json => {
            let (payload, code) = match result {
                Ok(manifest) => (
                    json!({
                        "manifest": manifest.path,
                        "valid": true,
                        "operations": manifest.content.operations().len(),
                        "errors": [],
                    }),
                    ExitCode::Success,
                ),
                Err(ManifestError::Validation { path, errors }) => (
                    json!({
                        "manifest": path,
                        "valid": false,
                        "errors": errors
                            .iter()
                            .map(|e| {
                                json!({
                                    "context": e.context,
                                    "operation": e.operation,
                                    "field": e.field,
                                    "message": e.message,
                                    "suggestion": e.suggestion,
                                })
                            })
                            .collect::<Vec<_>>(),
                    }),
                    ExitCode::Validation,
                ),
                Err(err) => return Ok(report_manifest_error(&err)),
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(code)
        }
    }
}

fn report_manifest_error(err: &ManifestError) -> ExitCode {
    let code = ExitCode::from(err);
    warn!(code = code as u8, "manifest rejected");
    eprintln!("{err}");
    code
}

fn emit(output: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_errors_map_to_exit_codes() {
        let not_found = ManifestError::NotFound {
            path: PathBuf::from("oiv.toml"),
        };
        assert_eq!(ExitCode::from(&not_found) as u8, 3);

        let parse = Manifest::from_toml("[metadata", "oiv.toml").unwrap_err();
        assert_eq!(ExitCode::from(&parse), ExitCode::Parse);
    }

    #[test]
    fn dry_run_requires_output() {
        let err = Cli::try_parse_from(["oiv-package", "assemble", "--dry-run"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_fixed_package_id() {
        let cli = Cli::try_parse_from([
            "oiv-package",
            "assemble",
            "--id",
            "0f8fad5b-d9cb-469f-a165-70867728950e",
        ])
        .unwrap();
        let Command::Assemble(args) = cli.command else {
            panic!("expected assemble");
        };
        assert_eq!(
            args.id.map(|id| id.to_string()).as_deref(),
            Some("0f8fad5b-d9cb-469f-a165-70867728950e")
        );
    }
}
