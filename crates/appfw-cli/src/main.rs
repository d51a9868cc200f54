//! AppFW CLI: locator lookup and screen dumps for Appium-driven tests
//!
//! ## Usage
//!
//! ```bash
//! appfw locate --page login --name login_button   # Print the resolved locator
//! appfw parse --source screen_source.xml          # Offline element map
//! appfw dump --bounds                             # Live dump via Appium
//! appfw login --test test_login_valid_user        # Run the login flow
//! ```

use appfw_cli::{handlers, logging, Cli, CliConfig, CliResult, Commands, Reporter, Verbosity};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(&config);
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match run(cli.command, &reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.failure(&format!("Error: {e}"));
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.clone().into())
        .with_json_logs(cli.log_json)
}

fn run(command: Commands, reporter: &Reporter) -> CliResult<()> {
    match command {
        Commands::Locate(args) => {
            let def = handlers::execute_locate(&args)?;
            println!("{}", serde_json::to_string(&def)?);
            Ok(())
        }
        Commands::Parse(args) => {
            let count = handlers::execute_parse(&args)?;
            reporter.success(&format!(
                "{count} elements written to {}",
                args.output.display()
            ));
            Ok(())
        }
        #[cfg(feature = "appium")]
        Commands::Dump(args) => {
            let count = handlers::session::execute_dump(&args)?;
            reporter.success(&format!(
                "{count} elements written to {}",
                args.output.display()
            ));
            Ok(())
        }
        #[cfg(feature = "appium")]
        Commands::Login(args) => {
            handlers::session::execute_login(&args)?;
            reporter.success(&format!("logged in as '{}'", args.test));
            Ok(())
        }
        #[cfg(not(feature = "appium"))]
        Commands::Dump(_) | Commands::Login(_) => Err(appfw_cli::CliError::config(
            "Appium support not enabled. Rebuild with --features appium",
        )),
    }
}
