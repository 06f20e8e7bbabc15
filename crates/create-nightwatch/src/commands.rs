//! CLI command definitions using clap

use clap::{Parser, ValueEnum};
use nightwatch_init::Browser;
use std::path::PathBuf;

/// create-nightwatch: set up Nightwatch browser and mobile tests in a project
#[derive(Parser, Debug)]
#[command(name = "create-nightwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory (created if missing)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Skip the questions and use the default answers
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Browsers to set up (chrome, firefox, edge, safari), comma separated or repeated
    #[arg(short, long = "browser", value_delimiter = ',')]
    pub browsers: Vec<Browser>,

    /// Only write nightwatch.conf.js; no examples, no packages
    #[arg(long)]
    pub generate_config: bool,

    /// Set up testing on mobile browsers as well
    #[arg(long)]
    pub mobile: bool,

    /// Set up testing of native mobile apps
    #[arg(long)]
    pub native: bool,

    /// Skip the version check and anonymous metrics
    #[arg(long, env = "CREATE_NIGHTWATCH_OFFLINE", hide = true)]
    pub offline: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorArg,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_defaults() {
            let cli = Cli::parse_from(["create-nightwatch"]);
            assert_eq!(cli.path, PathBuf::from("."));
            assert!(!cli.yes);
            assert!(cli.browsers.is_empty());
            assert!(!cli.generate_config);
            assert_eq!(cli.verbose, 0);
        }

        #[test]
        fn test_parse_path() {
            let cli = Cli::parse_from(["create-nightwatch", "my-app"]);
            assert_eq!(cli.path, PathBuf::from("my-app"));
        }

        #[test]
        fn test_parse_yes() {
            let cli = Cli::parse_from(["create-nightwatch", "-y"]);
            assert!(cli.yes);
        }

        #[test]
        fn test_parse_browser_list() {
            let cli = Cli::parse_from(["create-nightwatch", "--browser", "chrome,firefox"]);
            assert_eq!(cli.browsers, vec![Browser::Chrome, Browser::Firefox]);
        }

        #[test]
        fn test_parse_repeated_browser() {
            let cli = Cli::parse_from(["create-nightwatch", "-b", "edge", "-b", "safari"]);
            assert_eq!(cli.browsers, vec![Browser::Edge, Browser::Safari]);
        }

        #[test]
        fn test_parse_unknown_browser() {
            let result = Cli::try_parse_from(["create-nightwatch", "--browser", "opera"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_mode_flags() {
            let cli = Cli::parse_from([
                "create-nightwatch",
                "--generate-config",
                "--mobile",
                "--native",
            ]);
            assert!(cli.generate_config);
            assert!(cli.mobile);
            assert!(cli.native);
        }

        #[test]
        fn test_parse_verbosity() {
            let cli = Cli::parse_from(["create-nightwatch", "-vv"]);
            assert_eq!(cli.verbose, 2);
            let cli = Cli::parse_from(["create-nightwatch", "-q"]);
            assert!(cli.quiet);
        }

        #[test]
        fn test_unknown_flag_rejected() {
            let err = Cli::try_parse_from(["create-nightwatch", "--mobil"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
        }
    }

    mod color_arg_tests {
        use super::*;

        #[test]
        fn test_color_conversion() {
            assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        }

        #[test]
        fn test_parse_color() {
            let cli = Cli::parse_from(["create-nightwatch", "--color", "never"]);
            assert!(matches!(cli.color, ColorArg::Never));
        }
    }
}
