#![forbid(unsafe_code)]

//! Command-line surface of the `gmip` binary.
//!
//! Flags override the `GMIP_COLORS` and `GMIP_MAX_WIDTH` environment
//! variables. `-h`/`--help` wins over `-v`/`--version`, and a missing file
//! argument behaves like `--help`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use gmip_core::geometry::{DEFAULT_MAX_WIDTH, ViewportLimits};
use gmip_runtime::ViewerConfig;
use gmip_style::Palette;

use crate::Error;

const KEYS: &str = "\
Keys:
  j, l, space, enter, down, right   next part or slide
  k, h, backspace, up, left         previous part or slide
  [N]g                              go to slide N (default 1)
  G                                 go to the last slide
  0-9                               count for the next key
  escape                            clear the count
  q, ctrl+c                         quit";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "gmip",
    about = "Present a gemtext-style slide deck in the terminal",
    disable_help_flag = true,
    disable_version_flag = true,
    after_help = KEYS
)]
pub struct Cli {
    /// Presentation file to show.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Color palette.
    #[arg(long, env = "GMIP_COLORS", value_name = "256|8", default_value_t = Palette::Ansi256)]
    pub colors: Palette,

    /// Maximum width of the text column.
    #[arg(
        long,
        env = "GMIP_MAX_WIDTH",
        value_name = "N",
        default_value_t = DEFAULT_MAX_WIDTH,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub max_width: u16,

    /// Print help.
    #[arg(short = 'h', long)]
    pub help: bool,

    /// Print version.
    #[arg(short = 'v', long)]
    pub version: bool,
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the help text.
    Help,
    /// Print the version.
    Version,
    /// Show a deck.
    Present {
        /// Deck path as given on the command line.
        path: PathBuf,
        /// Viewer settings derived from flags and environment.
        config: ViewerConfig,
    },
}

impl Cli {
    /// Parse `args` (program name first).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] with clap's rendered message for unknown
    /// flags and invalid values.
    pub fn parse_args<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|err| Error::Usage(err.render().to_string()))
    }

    /// Resolve the parsed flags into a [`Command`].
    #[must_use]
    pub fn into_command(self) -> Command {
        if self.help {
            return Command::Help;
        }
        if self.version {
            return Command::Version;
        }
        let Some(path) = self.file else {
            return Command::Help;
        };

        let config = ViewerConfig {
            limits: ViewportLimits::default().max_width(self.max_width),
            palette: self.colors,
            default_title: path.display().to_string(),
        };
        Command::Present { path, config }
    }
}

/// Rendered help text.
#[must_use]
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

/// Version line.
#[must_use]
pub fn version_text() -> String {
    format!("gmip {}", env!("CARGO_PKG_VERSION"))
}
