//! Page objects.
//!
//! A page object wraps an [`Actions`] layer bound to one page's locator file
//! and exposes business-level flows. It holds no state of its own and adds
//! no error handling on top of the action layer.

use std::path::Path;

use crate::actions::{ActionConfig, Actions};
use crate::driver::MobileDriver;
use crate::locator_store::LocatorStore;
use crate::result::AppResult;
use crate::test_data::TestData;

/// A page or screen of the app under test
pub trait PageObject {
    /// Page name; selects `<page>_locators.json`
    fn page_name(&self) -> &str;
}

/// Login screen
#[derive(Debug)]
pub struct LoginPage<'d, D: MobileDriver + ?Sized> {
    actions: Actions<'d, D>,
}

impl<'d, D: MobileDriver + ?Sized> LoginPage<'d, D> {
    /// Page name of the login screen
    pub const PAGE: &'static str = "login";

    /// Element name of the user name field
    pub const USERNAME_FIELD: &'static str = "username_field";

    /// Element name of the password field
    pub const PASSWORD_FIELD: &'static str = "password_field";

    /// Element name of the login button
    pub const LOGIN_BUTTON: &'static str = "login_button";

    /// Wrap an existing action layer
    pub fn new(actions: Actions<'d, D>) -> Self {
        Self { actions }
    }

    /// Load `login_locators.json` from `locator_dir` and bind it to `driver`
    pub fn open(
        driver: &'d mut D,
        locator_dir: impl AsRef<Path>,
        platform: &str,
        config: ActionConfig,
    ) -> AppResult<Self> {
        let store = LocatorStore::for_page(locator_dir, Self::PAGE, platform)?;
        Ok(Self::new(Actions::new(driver, store).with_config(config)))
    }

    /// Type the credentials and press login
    pub fn login(&mut self, username: &str, password: &str) -> AppResult<()> {
        self.actions.input_text(Self::USERNAME_FIELD, username)?;
        self.actions.input_text(Self::PASSWORD_FIELD, password)?;
        self.actions.click(Self::LOGIN_BUTTON)
    }

    /// [`LoginPage::login`] with the `username` and `password` of a
    /// test-data entry; fails before touching the screen when either is
    /// missing
    pub fn login_with(&mut self, data: &TestData) -> AppResult<()> {
        self.login(data.username()?, data.password()?)
    }

    /// Underlying action layer
    pub fn actions(&self) -> &Actions<'d, D> {
        &self.actions
    }

    /// Mutable access to the action layer
    pub fn actions_mut(&mut self) -> &mut Actions<'d, D> {
        &mut self.actions
    }
}

impl<D: MobileDriver + ?Sized> PageObject for LoginPage<'_, D> {
    fn page_name(&self) -> &str {
        Self::PAGE
    }
}
