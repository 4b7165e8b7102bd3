use std::path::{Path, MAIN_SEPARATOR};

use thiserror::Error;

use super::conversion_config::{ConfigBuilder, ConversionConfig};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("malformed argument '{0}': expected -flag=value")]
    MalformedArgument(String),
    #[error("destination must not end with separator: {0}")]
    TrailingSeparator(String),
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("{flag} expects a non-negative integer, got '{value}'")]
    InvalidNumber { flag: String, value: String },
    #[error("{flag} must be greater than zero")]
    NotPositive { flag: String },
}

/// Whether usage text was requested, and what happens after it is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Help {
    None,
    /// Print usage, then convert with the resolved configuration.
    ThenRun,
    /// Print usage and stop.
    ThenExit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub config: ConversionConfig,
    pub help: Help,
}

const HELP_FLAG: &str = "--help";

const USAGE: &str = "
option usage: [-flag=value]

Options:
  -p  prefix for name (default 'video')
  -i  starting index for prefix (default 0)
  -h  video height (default 180)
  -k  kbps (default 150)
  -f  fps (default 15)
  -d  output destination (default <root>/dest)
  -r  working root holding the video/ folder (default current directory)
  --help  show this message
";

pub fn usage() -> &'static str {
    USAGE
}

/// Resolves `-flag=value` tokens against the defaults rooted at `cwd`.
///
/// Later occurrences of a flag overwrite earlier ones. Unknown flags are
/// skipped. An empty token list resolves to the defaults with
/// [`Help::ThenRun`].
pub fn resolve<S: AsRef<str>>(tokens: &[S], cwd: &Path) -> Result<Resolution, ConfigError> {
    let mut builder = ConfigBuilder::new(cwd);
    let mut help = if tokens.is_empty() {
        Help::ThenRun
    } else {
        Help::None
    };

    for token in tokens {
        let token = token.as_ref();
        if token == HELP_FLAG {
            help = Help::ThenExit;
            continue;
        }

        let parts: Vec<&str> = token.split('=').collect();
        let &[key, value] = parts.as_slice() else {
            return Err(ConfigError::MalformedArgument(token.to_string()));
        };

        match key {
            "-p" => {
                builder.prefix(value);
            }
            "-i" => {
                builder.start_index(parse_number(key, value)?);
            }
            "-h" => {
                builder.height(parse_positive(key, value)?);
            }
            "-k" => {
                builder.kbps(parse_positive(key, value)?);
            }
            "-f" => {
                builder.fps(parse_positive(key, value)?);
            }
            "-d" => {
                if value.is_empty() {
                    return Err(ConfigError::EmptyDestination);
                }
                if value.ends_with('/') || value.ends_with(MAIN_SEPARATOR) {
                    return Err(ConfigError::TrailingSeparator(value.to_string()));
                }
                builder.output_dir(value);
            }
            "-r" => {
                builder.root(value);
            }
            HELP_FLAG => {
                if help == Help::None {
                    help = Help::ThenRun;
                }
            }
            other => log::debug!("Ignoring unrecognized flag {other}"),
        }
    }

    let config = builder.build();
    log::debug!("Resolved configuration: {config:?}");
    Ok(Resolution { config, help })
}

fn parse_number(flag: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

fn parse_positive(flag: &str, value: &str) -> Result<u32, ConfigError> {
    match parse_number(flag, value)? {
        0 => Err(ConfigError::NotPositive {
            flag: flag.to_string(),
        }),
        n => Ok(n),
    }
}
