//! Login command handler

use std::time::Duration;

use appfw::{ActionConfig, LoginPage, MobileDriver, TestData, TestDataLoader};

use crate::commands::LoginArgs;
use crate::error::CliResult;

/// Credentials for `--test` from `--data`, checked before a session opens
pub fn load_credentials(args: &LoginArgs) -> CliResult<TestData> {
    let loader = TestDataLoader::from_file(&args.data)?;
    let data = loader.get_test_data(&args.test)?;
    let _ = data.username()?;
    let _ = data.password()?;
    Ok(data.clone())
}

/// Run the login flow on an open session
pub fn login_with<D: MobileDriver + ?Sized>(
    driver: &mut D,
    platform: &str,
    args: &LoginArgs,
    data: &TestData,
) -> CliResult<()> {
    let config = ActionConfig::new().with_default_timeout(Duration::from_secs(args.timeout));
    LoginPage::open(driver, &args.dir, platform, config)?.login_with(data)?;
    Ok(())
}
