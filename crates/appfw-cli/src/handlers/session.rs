//! Live Appium sessions for `dump` and `login`

use appfw::{AppiumDriver, DeviceConfig, MobileDriver};

use crate::commands::{DumpArgs, LoginArgs, SessionArgs};
use crate::error::CliResult;
use crate::handlers::{dump_with, load_credentials, login_with};

/// Load the device config, applying `--server`
pub fn device_config(session: &SessionArgs) -> CliResult<DeviceConfig> {
    let config = DeviceConfig::from_file(&session.config)?;
    Ok(match &session.server {
        Some(url) => config.with_server_url(url.clone()),
        None => config,
    })
}

fn with_session<T>(
    config: &DeviceConfig,
    app: Option<&str>,
    body: impl FnOnce(&mut AppiumDriver) -> CliResult<T>,
) -> CliResult<T> {
    let mut driver = AppiumDriver::start(config, app)?;
    let result = body(&mut driver);
    if let Err(e) = driver.quit() {
        tracing::warn!(error = %e, "failed to close session");
    }
    result
}

/// Dump the screen of a fresh session
pub fn execute_dump(args: &DumpArgs) -> CliResult<usize> {
    let config = device_config(&args.session)?;
    with_session(&config, args.session.app.as_deref(), |driver| {
        dump_with(&*driver, args)
    })
}

/// Log in on a fresh session
pub fn execute_login(args: &LoginArgs) -> CliResult<()> {
    let data = load_credentials(args)?;
    let config = device_config(&args.session)?;
    with_session(&config, args.session.app.as_deref(), |driver| {
        login_with(driver, config.platform(), args, &data)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn session(dir: &TempDir, server: Option<&str>) -> SessionArgs {
        SessionArgs {
            config: dir.path().join("config.json"),
            server: server.map(str::to_string),
            app: None,
        }
    }

    #[test]
    fn test_server_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"device_type":"android","server_url":"http://grid:4444"}"#,
        )
        .unwrap();
        let config = device_config(&session(&dir, None)).unwrap();
        assert_eq!(config.server_url(), "http://grid:4444");
        let config = device_config(&session(&dir, Some("http://127.0.0.1:4723"))).unwrap();
        assert_eq!(config.server_url(), "http://127.0.0.1:4723");
    }

    #[test]
    fn test_missing_config_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(device_config(&session(&dir, None)).is_err());
    }
}
