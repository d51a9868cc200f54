//! Appium session adapter.
//!
//! [`AppiumDriver`] wraps a [`fantoccini::Client`] and drives it from a
//! private current-thread `tokio` runtime, so the rest of the framework stays
//! synchronous. Lookups fantoccini has a [`Locator`] for go through
//! [`Client::find`]. Resource ids, Appium-only strategies and the context
//! endpoints are issued as [`SessionCommand`]s.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use fantoccini::actions::{InputSource, PointerAction, TouchActions, MOUSE_BUTTON_LEFT};
use fantoccini::elements::{Element, ElementRef};
use fantoccini::error::CmdError;
use fantoccini::wd::WebDriverCompatibleCommand;
use fantoccini::{Client, ClientBuilder, Locator};
use http::Method;
use serde_json::{json, Map, Value};
use tokio::runtime::Runtime;
use url::Url;
use webdriver::common::WebElement;

use crate::config::DeviceConfig;
use crate::driver::{ElementId, MobileDriver, Point, WindowSize};
use crate::locator::{LocatorStrategy, Selector};
use crate::result::{AppError, AppResult};

fn driver_error(e: impl fmt::Display) -> AppError {
    AppError::driver(e.to_string())
}

/// Command against `/session/{id}/<path>` that fantoccini has no method for
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCommand {
    method: Method,
    path: String,
    body: Option<Value>,
}

impl SessionCommand {
    /// Element lookup with the strategy's wire name
    #[must_use]
    pub fn find(selector: &Selector) -> Self {
        Self {
            method: Method::POST,
            path: "element".to_string(),
            body: Some(json!({ "using": selector.strategy.wire_name(), "value": selector.value })),
        }
    }

    /// `GET contexts`
    #[must_use]
    pub fn contexts() -> Self {
        Self {
            method: Method::GET,
            path: "contexts".to_string(),
            body: None,
        }
    }

    /// `POST context`
    #[must_use]
    pub fn set_context(name: &str) -> Self {
        Self {
            method: Method::POST,
            path: "context".to_string(),
            body: Some(json!({ "name": name })),
        }
    }
}

impl WebDriverCompatibleCommand for SessionCommand {
    fn endpoint(&self, base_url: &Url, session_id: Option<&str>) -> Result<Url, url::ParseError> {
        let session = session_id.unwrap_or_default();
        base_url.join(&format!("session/{session}/{}", self.path))
    }

    fn method_and_body(&self, _request_url: &Url) -> (Method, Option<String>) {
        (self.method.clone(), self.body.as_ref().map(Value::to_string))
    }
}

/// fantoccini locator for strategies that keep their W3C meaning in Appium.
///
/// `id` is excluded: fantoccini rewrites it to an `@id` XPath, while Appium
/// matches it against the native resource id.
#[must_use]
pub fn w3c_locator(selector: &Selector) -> Option<Locator<'_>> {
    match selector.strategy {
        LocatorStrategy::XPath => Some(Locator::XPath(&selector.value)),
        LocatorStrategy::CssSelector => Some(Locator::Css(&selector.value)),
        LocatorStrategy::LinkText => Some(Locator::LinkText(&selector.value)),
        _ => None,
    }
}

/// One-finger press, move and release
#[must_use]
pub fn swipe_gesture(start: Point, end: Point, duration: Duration) -> TouchActions {
    TouchActions::new("finger1".to_string())
        .then(PointerAction::MoveTo {
            duration: None,
            x: start.x.into(),
            y: start.y.into(),
        })
        .then(PointerAction::Down {
            button: MOUSE_BUTTON_LEFT,
        })
        .then(PointerAction::MoveTo {
            duration: Some(duration),
            x: end.x.into(),
            y: end.y.into(),
        })
        .then(PointerAction::Up {
            button: MOUSE_BUTTON_LEFT,
        })
}

/// Live session on an Appium server.
///
/// [`MobileDriver::quit`] ends the session; a driver dropped without it
/// quits on a best-effort basis.
pub struct AppiumDriver {
    client: Client,
    runtime: Runtime,
    server_url: String,
    session_id: String,
    closed: bool,
}

impl fmt::Debug for AppiumDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppiumDriver")
            .field("server_url", &self.server_url)
            .field("session_id", &self.session_id)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl AppiumDriver {
    /// Open a session with the active platform's capabilities.
    ///
    /// `app_path` is added as the `app` capability when given.
    pub fn start(config: &DeviceConfig, app_path: Option<&str>) -> AppResult<Self> {
        Self::connect(config.server_url(), config.session_capabilities(app_path))
    }

    /// Open a session on `server_url` with explicit capabilities
    pub fn connect(server_url: &str, capabilities: Map<String, Value>) -> AppResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let client = runtime
            .block_on(
                ClientBuilder::native()
                    .capabilities(capabilities)
                    .connect(server_url),
            )
            .map_err(driver_error)?;
        let session_id = runtime
            .block_on(client.session_id())
            .map_err(driver_error)?
            .unwrap_or_default();

        tracing::info!(server = %server_url, session = %session_id, "session started");
        Ok(Self {
            client,
            runtime,
            server_url: server_url.to_string(),
            session_id,
            closed: false,
        })
    }

    /// Server-assigned session id
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// URL of the server
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }

    fn issue(&self, command: SessionCommand) -> Result<Value, CmdError> {
        tracing::debug!(?command, "appium command");
        self.block_on(self.client.issue_cmd(command))
    }

    fn element(&self, id: &ElementId) -> Element {
        Element::from_element_id(self.client.clone(), ElementRef::from(id.as_str().to_string()))
    }

    fn lookup(&self, selector: &Selector) -> Result<String, CmdError> {
        match w3c_locator(selector) {
            Some(locator) => self
                .block_on(self.client.find(locator))
                .map(|element| element.element_id().to_string()),
            None => {
                let value = self.issue(SessionCommand::find(selector))?;
                let element: WebElement = serde_json::from_value(value).map_err(CmdError::Json)?;
                Ok(element.0)
            }
        }
    }
}

impl MobileDriver for AppiumDriver {
    fn find_element(&self, selector: &Selector) -> AppResult<Option<ElementId>> {
        match self.lookup(selector) {
            Ok(id) => Ok(Some(ElementId::new(id))),
            Err(e) if e.is_miss() => Ok(None),
            Err(e) => Err(driver_error(e)),
        }
    }

    fn click(&mut self, element: &ElementId) -> AppResult<()> {
        self.block_on(self.element(element).click())
            .map_err(driver_error)
    }

    fn clear(&mut self, element: &ElementId) -> AppResult<()> {
        self.block_on(self.element(element).clear())
            .map_err(driver_error)
    }

    fn send_keys(&mut self, element: &ElementId, text: &str) -> AppResult<()> {
        self.block_on(self.element(element).send_keys(text))
            .map_err(driver_error)
    }

    fn text(&self, element: &ElementId) -> AppResult<String> {
        self.block_on(self.element(element).text())
            .map_err(driver_error)
    }

    fn window_size(&self) -> AppResult<WindowSize> {
        let (width, height) = self
            .block_on(self.client.get_window_size())
            .map_err(driver_error)?;
        Ok(WindowSize::new(width as u32, height as u32))
    }

    fn swipe(&mut self, start: Point, end: Point, duration: Duration) -> AppResult<()> {
        let gesture = swipe_gesture(start, end, duration);
        self.block_on(async {
            self.client.perform_actions(gesture).await?;
            self.client.release_actions().await
        })
        .map_err(driver_error)
    }

    fn screenshot_png(&self) -> AppResult<Vec<u8>> {
        self.block_on(self.client.screenshot())
            .map_err(driver_error)
    }

    fn contexts(&self) -> AppResult<Vec<String>> {
        let value = self.issue(SessionCommand::contexts()).map_err(driver_error)?;
        Ok(serde_json::from_value(value)?)
    }

    fn set_context(&mut self, name: &str) -> AppResult<()> {
        self.issue(SessionCommand::set_context(name))
            .map(drop)
            .map_err(driver_error)
    }

    fn page_source(&self) -> AppResult<String> {
        self.block_on(self.client.source()).map_err(driver_error)
    }

    fn quit(&mut self) -> AppResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.block_on(self.client.clone().close())
            .map_err(driver_error)?;
        tracing::info!(session = %self.session_id, "session closed");
        Ok(())
    }
}

impl Drop for AppiumDriver {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.quit() {
            tracing::warn!(session = %self.session_id, error = %e, "failed to close session on drop");
        }
    }
}
