use std::{env, fmt, iter::Peekable, path::Path};

use log::LevelFilter;

use crate::{Error, Result};

const DEFAULT_CITIES: usize = 8;
const DEFAULT_INPUT: &str = "worldcities.csv";

/// Runtime options for the route search.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// How many of the most populous cities to route through.
    pub cities: usize,
    /// City data file (worldcities CSV export).
    pub input: String,
    /// Output file for the route report. Empty means stdout.
    pub output: String,
    /// Search strategy: `single` or `parallel`.
    pub solver_mode: SolverMode,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-level: {value}"
            ))),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Off => "off",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-format: {value}"
            ))),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolverMode {
    Single,
    Parallel,
}

impl SolverMode {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "single" => Ok(Self::Single),
            "parallel" => Ok(Self::Parallel),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --solver-mode: {value}"
            ))),
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Parallel => "parallel",
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            cities: DEFAULT_CITIES,
            input: DEFAULT_INPUT.to_string(),
            output: String::new(),
            solver_mode: SolverMode::Parallel,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };
            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);
            options.apply_option(&name, value)?;
        }

        if options.cities == 0 {
            return Err(Error::invalid_input("--cities must be at least 1"));
        }
        Ok(options)
    }

    fn apply_option(&mut self, name: &str, value: Option<String>) -> Result<()> {
        match name {
            "cities" => {
                let raw = require_value(name, value)?;
                self.cities = raw.parse().map_err(|_| {
                    Error::invalid_input(format!("Invalid value for --cities: {raw}"))
                })?;
            }
            "input" => self.input = require_value(name, value)?,
            "output" => self.output = require_value(name, value)?,
            "solver-mode" => self.solver_mode = SolverMode::parse(&require_value(name, value)?)?,
            "log-level" => self.log_level = LogLevel::parse(&require_value(name, value)?)?,
            "log-format" => self.log_format = LogFormat::parse(&require_value(name, value)?)?,
            "log-output" => self.log_output = require_value(name, value)?,
            "log-timestamp" => {
                self.log_timestamp = match value {
                    Some(v) => parse_bool(name, &v)?,
                    None => true,
                };
            }
            "no-log-timestamp" => {
                if value.is_some() {
                    return Err(Error::invalid_input(format!(
                        "Flag --{name} does not take a value"
                    )));
                }
                self.log_timestamp = false;
            }
            _ => {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }
        Ok(())
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tsp-exact [options]\n\n",
            "Options:\n",
            "  --cities <usize>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --solver-mode <single|parallel>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  tsp-exact --cities 8 --input worldcities.csv\n",
            "  tsp-exact --cities 10 --solver-mode=parallel --log-level=info\n",
            "  tsp-exact --cities 6 --output route.txt --log-output run.log\n",
        )
    }

    pub fn input_path(&self) -> &Path {
        Path::new(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        optional_path(&self.output)
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        optional_path(&self.log_output)
    }
}

impl fmt::Display for SolverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cities={} input={} output={} solver_mode={} log_level={} log_format={} log_timestamp={} log_output={}",
            self.cities,
            display_path(&self.input),
            display_path(&self.output),
            self.solver_mode.as_str(),
            self.log_level.as_str(),
            self.log_format.as_str(),
            self.log_timestamp,
            display_path(&self.log_output),
        )
    }
}

fn display_path(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn optional_path(value: &str) -> Option<&Path> {
    let value = value.trim();
    if value.is_empty() || value == "-" {
        None
    } else {
        Some(Path::new(value))
    }
}

fn split_arg(
    raw_name: &str,
    args: &mut Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((name, value)) = raw_name.split_once('=') {
        return (name.to_string(), Some(value.to_string()));
    }

    let value = match args.peek() {
        Some(next) if !next.starts_with("--") => args.next(),
        _ => None,
    };
    (raw_name.to_string(), value)
}

fn require_value(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}
