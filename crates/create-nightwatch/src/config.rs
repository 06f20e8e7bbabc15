//! CLI configuration

use nightwatch_init::{Browser, LaunchFlags};
use serde::{Deserialize, Serialize};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Default `tracing` filter for this level, used when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Skip the questions and use the defaults table
    pub non_interactive: bool,
    /// Only write the config file
    pub config_only: bool,
    /// Target mobile browsers
    pub mobile: bool,
    /// Target native apps
    pub native: bool,
    /// Browsers given on the command line
    pub browsers: Vec<Browser>,
    /// Skip the version check and metrics
    pub offline: bool,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set non-interactive mode
    #[must_use]
    pub const fn with_non_interactive(mut self, non_interactive: bool) -> Self {
        self.non_interactive = non_interactive;
        self
    }

    /// Set config-only mode
    #[must_use]
    pub const fn with_config_only(mut self, config_only: bool) -> Self {
        self.config_only = config_only;
        self
    }

    /// Set mobile targeting
    #[must_use]
    pub const fn with_mobile(mut self, mobile: bool) -> Self {
        self.mobile = mobile;
        self
    }

    /// Set native app targeting
    #[must_use]
    pub const fn with_native(mut self, native: bool) -> Self {
        self.native = native;
        self
    }

    /// Set the browser list
    #[must_use]
    pub fn with_browsers(mut self, browsers: Vec<Browser>) -> Self {
        self.browsers = browsers;
        self
    }

    /// Set offline mode
    #[must_use]
    pub const fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Flags handed to the answer pipeline
    #[must_use]
    pub fn launch_flags(&self) -> LaunchFlags {
        LaunchFlags::new()
            .with_non_interactive(self.non_interactive)
            .with_config_only(self.config_only)
            .with_mobile(self.mobile)
            .with_native(self.native)
            .with_browsers(self.browsers.clone())
    }
}
