//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// AppFW: locator-driven mobile UI test automation against Appium
#[derive(Parser, Debug)]
#[command(name = "appfw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the locator an element name resolves to
    Locate(LocateArgs),

    /// Build an element map from a saved page source
    Parse(ParseArgs),

    /// Dump the current screen of a live session
    Dump(DumpArgs),

    /// Run the login flow with a named test-data entry
    Login(LoginArgs),
}

/// Arguments for the locate command
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Page whose `<page>_locators.json` is read
    #[arg(short, long)]
    pub page: String,

    /// Element name
    #[arg(short, long)]
    pub name: String,

    /// Directory holding the locator files
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Device config selecting the platform
    #[arg(short, long, default_value = appfw::CONFIG_FILE)]
    pub config: PathBuf,

    /// Platform override (skips the config file)
    #[arg(long)]
    pub platform: Option<String>,
}

/// Arguments for the parse command
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Saved page-source XML
    #[arg(short, long)]
    pub source: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = appfw::DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Emit `{element_name, class_name, bounds, xpath}` records
    #[arg(long)]
    pub bounds: bool,
}

/// Session options shared by commands that talk to a live server
#[derive(Parser, Debug)]
pub struct SessionArgs {
    /// Device config
    #[arg(short, long, default_value = appfw::CONFIG_FILE)]
    pub config: PathBuf,

    /// Appium server URL (overrides the config)
    #[arg(long, env = "APPIUM_SERVER_URL")]
    pub server: Option<String>,

    /// App package to install for the session
    #[arg(long)]
    pub app: Option<String>,
}

/// Arguments for the dump command
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Output JSON file
    #[arg(short, long, default_value = appfw::DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Where the fetched page source is saved
    #[arg(long, default_value = appfw::DEFAULT_PAGE_SOURCE_FILE)]
    pub source_file: PathBuf,

    /// Emit `{element_name, class_name, bounds, xpath}` records
    #[arg(long)]
    pub bounds: bool,

    /// Session options
    #[command(flatten)]
    pub session: SessionArgs,
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Test-data entry holding the credentials
    #[arg(short, long)]
    pub test: String,

    /// Test-data file
    #[arg(long, default_value = appfw::TEST_DATA_FILE)]
    pub data: PathBuf,

    /// Directory holding the locator files
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Element wait timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Session options
    #[command(flatten)]
    pub session: SessionArgs,
}

/// Color argument
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
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_locate() {
        let cli = Cli::parse_from(["appfw", "locate", "--page", "login", "--name", "login_button"]);
        match cli.command {
            Commands::Locate(args) => {
                assert_eq!(args.page, "login");
                assert_eq!(args.name, "login_button");
                assert_eq!(args.dir, PathBuf::from("."));
                assert_eq!(args.config, PathBuf::from("config.json"));
                assert!(args.platform.is_none());
            }
            other => panic!("expected locate, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["appfw", "parse", "--source", "s.xml", "-vv", "--bounds"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Parse(args) => {
                assert!(args.bounds);
                assert_eq!(args.output, PathBuf::from("screen_elements.json"));
            }
            other => panic!("expected parse, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_login_defaults() {
        let cli = Cli::parse_from(["appfw", "login", "--test", "test_login_valid_user"]);
        match cli.command {
            Commands::Login(args) => {
                assert_eq!(args.data, PathBuf::from("test_data.json"));
                assert_eq!(args.timeout, 10);
                assert!(args.session.app.is_none());
            }
            other => panic!("expected login, got {other:?}"),
        }
    }

    #[test]
    fn test_color_arg_conversion() {
        use crate::config::ColorChoice;
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
    }
}
