use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

use crate::config::{Config, EngineKind};
use crate::interpreter::{self, FileSource, InteractiveSource, Machine};

#[derive(Parser)]
#[command(name = "tapir")]
#[command(version, about = "Tapir - an interpreter for the eight-instruction tape machine", long_about = None)]
pub struct Cli {
    /// Program file to run (starts the interactive loop when omitted)
    pub path: Option<PathBuf>,

    /// Further arguments are accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<ExitCode> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with pre-parsed arguments
pub fn run_cli_with_args(cli: Cli) -> Result<ExitCode> {
    let config = Config::load()?;
    debug!(?config, "configuration loaded");

    if !cli.ignored.is_empty() {
        debug!(ignored = ?cli.ignored, "ignoring extra arguments");
    }

    match cli.path {
        Some(path) => Ok(run_file(&path, &config)),
        None => {
            // Program text and `,` input share standard input
            run_interactive(
                &config,
                io::stdin(),
                io::stdin(),
                io::stdout(),
                &mut io::stderr(),
            )
            .context("Interactive session failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// File mode: run one program file against stdin/stdout
///
/// Failures are reported on stderr; the exit status depends on `strict_exit`.
pub fn run_file(path: &Path, config: &Config) -> ExitCode {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to open program file");
            eprintln!("can't open file {}", path.display());
            return config.failure_code();
        }
    };

    info!(path = %path.display(), engine = config.engine.as_str(), "running program file");

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_program(config, BufReader::new(file), stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            config.failure_code()
        }
    }
}

/// Run a complete program from `program` using the configured engine
///
/// Errors are [`interpreter::ExecError`] or, for the tree engine,
/// [`interpreter::ParseError`] and a failed program read.
pub fn run_program<P, R, W>(config: &Config, mut program: P, input: R, output: W) -> Result<()>
where
    P: Read,
    R: Read,
    W: Write,
{
    let mut machine = Machine::new(input, output)
        .with_tape(config.new_tape())
        .with_settings(config.settings());

    match config.engine {
        EngineKind::Stream => {
            machine.run(&mut FileSource::new(program))?;
        }
        EngineKind::Tree => {
            let mut source = Vec::new();
            program
                .read_to_end(&mut source)
                .map_err(interpreter::ExecError::Source)?;
            let parsed = interpreter::parse(&source, config.noise_threshold)?;
            debug!(ops = parsed.body.len(), loops = parsed.loop_count(), "program parsed");
            machine.execute(&parsed)?;
        }
    }

    Ok(())
}

/// Interactive mode: the read-eval loop
///
/// Program bytes come from `source`; every failed run-through is reported on
/// `diagnostics` and the loop resumes on the same tape, so cell values and the
/// cursor persist across errors. Returns the machine once `source` is
/// exhausted.
pub fn run_interactive<S, R, W, D>(
    config: &Config,
    source: S,
    input: R,
    output: W,
    diagnostics: &mut D,
) -> io::Result<Machine<R, W>>
where
    S: Read,
    R: Read,
    W: Write,
    D: Write + ?Sized,
{
    let mut source = InteractiveSource::new(source);
    let mut machine = Machine::new(input, output)
        .with_tape(config.new_tape())
        .with_settings(config.settings());

    loop {
        write!(diagnostics, "{}", config.prompt)?;
        diagnostics.flush()?;

        match machine.run(&mut source) {
            Ok(()) => break,
            Err(err) => {
                debug!(error = %err, cursor = machine.tape().cursor(), "run-through failed");
                writeln!(diagnostics, "Error: {err}")?;
            }
        }
    }

    Ok(machine)
}
