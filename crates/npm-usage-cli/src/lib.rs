use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use npm_usage_core::{
    generate, DiagnosticSink, GenerateOptions, OutputTarget, Placeholder, SilentSink,
    TracingSink, WriteMode, WriteOutcome, DEFAULT_ROOT_HEADER_LEVEL,
};

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    execute(Cli::parse())
}

fn execute(cli: Cli) -> Result<i32> {
    let sink: &dyn DiagnosticSink = if cli.verbose {
        init_tracing()?;
        &TracingSink
    } else {
        &SilentSink
    };

    let options = build_options(&cli)?;
    let outcome = generate(options, sink)?;

    emit(&outcome.markdown)?;
    if let Some(write) = &outcome.write {
        report_write(&cli, write);
    }

    Ok(0)
}

/// Diagnostics go to stderr so stdout only ever carries the markdown.
fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize tracing subscriber: {err}"))
}

fn build_options(cli: &Cli) -> Result<GenerateOptions> {
    let mut options = GenerateOptions::default().with_root_header_level(cli.root_header_level);
    options.package_name = cli.package_name.clone();
    options.cli_utility_names = cli.cli_utility_names.clone();
    options.output = build_output(cli)?;
    Ok(options)
}

fn build_output(cli: &Cli) -> Result<Option<OutputTarget>> {
    let Some(path) = &cli.output else {
        return Ok(None);
    };

    let mode = match cli.write_mode.unwrap_or(WriteModeArg::Overwrite) {
        WriteModeArg::Overwrite => WriteMode::Overwrite,
        WriteModeArg::Append => WriteMode::Append,
        WriteModeArg::ReplacePlaceholder => {
            match (&cli.placeholder_start, &cli.placeholder_end) {
                (Some(start), Some(end)) => {
                    WriteMode::ReplacePlaceholder(Placeholder::new(start, end))
                }
                _ => bail!(
                    "--write-mode replace-placeholder requires --placeholder-start and --placeholder-end"
                ),
            }
        }
    };

    if !matches!(mode, WriteMode::ReplacePlaceholder(_))
        && (cli.placeholder_start.is_some() || cli.placeholder_end.is_some())
    {
        bail!("--placeholder-start / --placeholder-end only apply to --write-mode replace-placeholder");
    }

    Ok(Some(
        OutputTarget::new(path.clone(), mode).with_dry_run(cli.dry_run),
    ))
}

fn emit(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match writeln!(handle, "{content}").and_then(|_| handle.flush()) {
        Ok(()) => Ok(()),
        Err(err) if should_ignore_pipe_error(&err) => Ok(()),
        Err(err) => Err(err).context("Failed to write markdown to stdout"),
    }
}

fn should_ignore_pipe_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::WouldBlock
    )
}

fn report_write(cli: &Cli, outcome: &WriteOutcome) {
    if cli.dry_run {
        match &outcome.diff {
            Some(diff) => eprint!("{diff}"),
            None => eprintln!("No changes (dry run)"),
        }
        return;
    }

    if cli.verbose {
        if outcome.changed {
            eprintln!("Updated {}", outcome.path.display());
        } else {
            eprintln!("No changes applied to {}", outcome.path.display());
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate install-and-run instructions for npm CLI packages in markdown",
    long_about = None
)]
struct Cli {
    /// Name of the package [default: `name` from ./package.json]
    #[arg(long = "package-name", value_name = "NAME")]
    package_name: Option<String>,

    /// Names of the CLI utilities [default: keys of `bin` in ./package.json]
    #[arg(
        long = "cli-utility-names",
        value_name = "NAME",
        num_args = 1..,
        action = ArgAction::Append
    )]
    cli_utility_names: Option<Vec<String>>,

    /// Heading level of the top-level sections; subsections get one more `#`
    #[arg(
        long = "root-header-level",
        value_name = "N",
        default_value_t = DEFAULT_ROOT_HEADER_LEVEL,
        value_parser = clap::value_parser!(u8).range(1..)
    )]
    root_header_level: u8,

    /// Also write the markdown to this file
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// How to write to --output [default: overwrite]
    #[arg(long = "write-mode", value_enum, requires = "output")]
    write_mode: Option<WriteModeArg>,

    /// Marker opening the region replaced in replace-placeholder mode
    #[arg(
        long = "placeholder-start",
        value_name = "TEXT",
        allow_hyphen_values = true,
        requires = "output"
    )]
    placeholder_start: Option<String>,

    /// Marker closing the region replaced in replace-placeholder mode
    #[arg(
        long = "placeholder-end",
        value_name = "TEXT",
        allow_hyphen_values = true,
        requires = "output"
    )]
    placeholder_end: Option<String>,

    /// Print the diff for --output to stderr without writing
    #[arg(long = "dry-run", requires = "output")]
    dry_run: bool,

    /// Emit diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WriteModeArg {
    Overwrite,
    Append,
    ReplacePlaceholder,
}
