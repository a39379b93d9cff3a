//! Configuration loading
//!
//! Settings are layered, later sources winning:
//! 1. Built-in defaults
//! 2. A TOML file: `TAPIR_CONFIG_PATH` if set, otherwise `tapir.toml` in the
//!    working directory (optional)
//! 3. `TAPIR_*` environment variables, e.g. `TAPIR_TAPE_LENGTH=1000`
//! 4. Programmatic overrides from [`ConfigBuilder`]
//!
//! ```toml
//! tape_length = 30000
//! noise_threshold = 20
//! input = "byte"       # or "decimal"
//! output = "byte"      # or "char"
//! engine = "stream"    # or "tree"
//! strict_exit = false
//! prompt = ">> "
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::interpreter::types::{DEFAULT_NOISE_THRESHOLD, DEFAULT_TAPE_LENGTH};
use crate::interpreter::{InputMode, OutputMode, Settings, Tape};

const ENV_PREFIX: &str = "TAPIR";
const CONFIG_PATH_VAR: &str = "TAPIR_CONFIG_PATH";
const DEFAULT_CONFIG_NAME: &str = "tapir";

/// Which execution path runs program files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Execute bytes as they are read
    #[default]
    Stream,
    /// Parse and validate the whole program, then execute the tree
    Tree,
}

impl EngineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Stream => "stream",
            EngineKind::Tree => "tree",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of cells on the tape
    pub tape_length: usize,

    /// Unrecognized bytes above this value abort the run; lower ones are skipped
    pub noise_threshold: u8,

    pub input: InputMode,

    pub output: OutputMode,

    pub engine: EngineKind,

    /// Exit with a failure status when a file can't be opened or its run fails
    pub strict_exit: bool,

    /// Printed to stderr before each interactive run-through
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tape_length: DEFAULT_TAPE_LENGTH,
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            input: InputMode::default(),
            output: OutputMode::default(),
            engine: EngineKind::default(),
            strict_exit: false,
            prompt: ">> ".to_string(),
        }
    }
}

impl Config {
    /// Load from the default file location and the environment
    pub fn load() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn settings(&self) -> Settings {
        Settings {
            noise_threshold: self.noise_threshold,
            input: self.input,
            output: self.output,
        }
    }

    pub fn new_tape(&self) -> Tape {
        Tape::new(self.tape_length)
    }

    /// Exit status for a failed file run
    pub fn failure_code(&self) -> ExitCode {
        if self.strict_exit {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    fn validate(&self) -> Result<()> {
        if self.tape_length == 0 {
            bail!("tape_length must be at least 1");
        }
        Ok(())
    }
}

/// Builder for loading a [`Config`] with explicit overrides
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    use_env: Option<bool>,
    tape_length: Option<usize>,
    noise_threshold: Option<u8>,
    input: Option<InputMode>,
    output: Option<OutputMode>,
    engine: Option<EngineKind>,
    strict_exit: Option<bool>,
    prompt: Option<String>,
}

impl ConfigBuilder {
    /// Config file to read instead of the default search; the file must exist
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Whether `TAPIR_*` environment variables are consulted (default: true)
    pub fn use_env(mut self, enabled: bool) -> Self {
        self.use_env = Some(enabled);
        self
    }

    pub fn tape_length(mut self, len: usize) -> Self {
        self.tape_length = Some(len);
        self
    }

    pub fn noise_threshold(mut self, threshold: u8) -> Self {
        self.noise_threshold = Some(threshold);
        self
    }

    pub fn input(mut self, mode: InputMode) -> Self {
        self.input = Some(mode);
        self
    }

    pub fn output(mut self, mode: OutputMode) -> Self {
        self.output = Some(mode);
        self
    }

    pub fn engine(mut self, engine: EngineKind) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn strict_exit(mut self, strict: bool) -> Self {
        self.strict_exit = Some(strict);
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();
        let use_env = self.use_env.unwrap_or(true);

        let mut builder = config::Config::builder()
            .set_default("tape_length", defaults.tape_length as u64)?
            .set_default("noise_threshold", u64::from(defaults.noise_threshold))?
            .set_default("input", defaults.input.as_str())?
            .set_default("output", defaults.output.as_str())?
            .set_default("engine", defaults.engine.as_str())?
            .set_default("strict_exit", defaults.strict_exit)?
            .set_default("prompt", defaults.prompt)?;

        let explicit_path = self.config_path.or_else(|| {
            use_env
                .then(|| std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from))
                .flatten()
        });

        builder = match &explicit_path {
            Some(path) => builder.add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(true),
            ),
            None => builder.add_source(
                config::File::with_name(DEFAULT_CONFIG_NAME)
                    .format(config::FileFormat::Toml)
                    .required(false),
            ),
        };

        if use_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
            );
        }

        builder = builder
            .set_override_option("tape_length", self.tape_length.map(|n| n as u64))?
            .set_override_option("noise_threshold", self.noise_threshold.map(u64::from))?
            .set_override_option("input", self.input.map(InputMode::as_str))?
            .set_override_option("output", self.output.map(OutputMode::as_str))?
            .set_override_option("engine", self.engine.map(EngineKind::as_str))?
            .set_override_option("strict_exit", self.strict_exit)?
            .set_override_option("prompt", self.prompt)?;

        let config: Config = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| match &explicit_path {
                Some(path) => format!("Failed to load configuration from {}", path.display()),
                None => "Failed to load configuration".to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }
}
