//! MobileDriver - the automation-driver boundary
//!
//! Everything that touches a device goes through [`MobileDriver`]. The action
//! layer, page objects and the hierarchy extractor are generic over it, so the
//! same flows run against a live Appium session ([`crate::AppiumDriver`]) or
//! the scripted [`MockDriver`] used in tests.
//!
//! The driver only performs single, immediate operations. Waiting, retrying
//! and locator resolution live above it.

use std::cell::Cell;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::locator::Selector;
use crate::result::{AppError, AppResult};

/// Name of the native (non-webview) context
pub const NATIVE_CONTEXT: &str = "NATIVE_APP";

/// Opaque element reference handed out by the driver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl ElementId {
    /// Create an element reference
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw reference string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Device window dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl WindowSize {
    /// Create a window size
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Window center, rounded down
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

/// Screen coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Device automation operations the framework relies on
pub trait MobileDriver {
    /// Look up the first element matching `selector`, without waiting
    fn find_element(&self, selector: &Selector) -> AppResult<Option<ElementId>>;

    /// Tap an element
    fn click(&mut self, element: &ElementId) -> AppResult<()>;

    /// Clear an editable element
    fn clear(&mut self, element: &ElementId) -> AppResult<()>;

    /// Type into an element
    fn send_keys(&mut self, element: &ElementId, text: &str) -> AppResult<()>;

    /// Visible text of an element
    fn text(&self, element: &ElementId) -> AppResult<String>;

    /// Current window size
    fn window_size(&self) -> AppResult<WindowSize>;

    /// Press at `start`, move to `end` over `duration`, release
    fn swipe(&mut self, start: Point, end: Point, duration: Duration) -> AppResult<()>;

    /// PNG screenshot of the screen
    fn screenshot_png(&self) -> AppResult<Vec<u8>>;

    /// Available contexts (`NATIVE_APP`, `WEBVIEW_*`)
    fn contexts(&self) -> AppResult<Vec<String>>;

    /// Switch the active context
    fn set_context(&mut self, name: &str) -> AppResult<()>;

    /// Serialized UI hierarchy of the current screen
    fn page_source(&self) -> AppResult<String>;

    /// End the session
    fn quit(&mut self) -> AppResult<()>;
}

/// Element scripted into a [`MockDriver`]
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Reference handed out on lookup
    pub id: ElementId,
    /// Selector that finds this element
    pub selector: Selector,
    /// Current text
    pub text: String,
    /// Number of swipes before the element scrolls into view
    pub appears_after_swipes: u32,
}

impl MockElement {
    /// Create an element found by `selector`
    #[must_use]
    pub fn new(id: impl Into<String>, selector: Selector) -> Self {
        Self {
            id: ElementId::new(id),
            selector,
            text: String::new(),
            appears_after_swipes: 0,
        }
    }

    /// Set the initial text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Keep the element off-screen until `swipes` swipes happened
    #[must_use]
    pub const fn appearing_after(mut self, swipes: u32) -> Self {
        self.appears_after_swipes = swipes;
        self
    }
}

/// Recorded swipe gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeRecord {
    /// Press point
    pub start: Point,
    /// Release point
    pub end: Point,
    /// Gesture duration
    pub duration: Duration,
}

/// Mock driver for unit testing
#[derive(Debug)]
pub struct MockDriver {
    /// Scripted elements
    pub elements: Vec<MockElement>,
    /// Window size reported to gestures
    pub window: WindowSize,
    /// Available contexts
    pub contexts: Vec<String>,
    /// Active context
    pub context: String,
    /// Page source returned verbatim
    pub page_source: String,
    /// Screenshot bytes
    pub screenshot: Vec<u8>,
    /// Swipes performed so far
    pub swipes: Vec<SwipeRecord>,
    /// Call history for verification
    pub call_history: Vec<String>,
    /// Set once `quit` ran
    pub closed: bool,
    find_attempts: Cell<u32>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            window: WindowSize::new(1080, 1920),
            contexts: vec![NATIVE_CONTEXT.to_string()],
            context: NATIVE_CONTEXT.to_string(),
            page_source: String::new(),
            screenshot: Vec::new(),
            swipes: Vec::new(),
            call_history: Vec::new(),
            closed: false,
            find_attempts: Cell::new(0),
        }
    }
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scripted element
    pub fn add_element(&mut self, element: MockElement) {
        self.elements.push(element);
    }

    /// Builder form of [`MockDriver::add_element`]
    #[must_use]
    pub fn with_element(mut self, element: MockElement) -> Self {
        self.add_element(element);
        self
    }

    /// Set the available contexts
    #[must_use]
    pub fn with_contexts(mut self, contexts: &[&str]) -> Self {
        self.contexts = contexts.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Set the page source
    #[must_use]
    pub fn with_page_source(mut self, xml: impl Into<String>) -> Self {
        self.page_source = xml.into();
        self
    }

    /// Set the screenshot bytes
    #[must_use]
    pub fn with_screenshot(mut self, png: Vec<u8>) -> Self {
        self.screenshot = png;
        self
    }

    /// Number of element lookups so far
    #[must_use]
    pub fn find_attempts(&self) -> u32 {
        self.find_attempts.get()
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    /// Text currently held by an element
    #[must_use]
    pub fn element_text(&self, id: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.id.as_str() == id)
            .map(|e| e.text.as_str())
    }

    fn on_screen(&self) -> impl Iterator<Item = &MockElement> {
        let swiped = self.swipes.len() as u32;
        self.elements
            .iter()
            .filter(move |e| e.appears_after_swipes <= swiped)
    }

    fn element_mut(&mut self, id: &ElementId) -> AppResult<&mut MockElement> {
        self.elements
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| AppError::driver(format!("stale element reference: {}", id.as_str())))
    }

    fn element(&self, id: &ElementId) -> AppResult<&MockElement> {
        self.elements
            .iter()
            .find(|e| &e.id == id)
            .ok_or_else(|| AppError::driver(format!("stale element reference: {}", id.as_str())))
    }
}

impl MobileDriver for MockDriver {
    fn find_element(&self, selector: &Selector) -> AppResult<Option<ElementId>> {
        self.find_attempts.set(self.find_attempts.get() + 1);
        Ok(self
            .on_screen()
            .find(|e| &e.selector == selector)
            .map(|e| e.id.clone()))
    }

    fn click(&mut self, element: &ElementId) -> AppResult<()> {
        let _ = self.element(element)?;
        self.call_history.push(format!("click:{}", element.as_str()));
        Ok(())
    }

    fn clear(&mut self, element: &ElementId) -> AppResult<()> {
        self.element_mut(element)?.text.clear();
        self.call_history.push(format!("clear:{}", element.as_str()));
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementId, text: &str) -> AppResult<()> {
        self.element_mut(element)?.text.push_str(text);
        self.call_history
            .push(format!("send_keys:{}:{text}", element.as_str()));
        Ok(())
    }

    fn text(&self, element: &ElementId) -> AppResult<String> {
        Ok(self.element(element)?.text.clone())
    }

    fn window_size(&self) -> AppResult<WindowSize> {
        Ok(self.window)
    }

    fn swipe(&mut self, start: Point, end: Point, duration: Duration) -> AppResult<()> {
        self.swipes.push(SwipeRecord {
            start,
            end,
            duration,
        });
        self.call_history.push(format!(
            "swipe:{},{}->{},{}",
            start.x, start.y, end.x, end.y
        ));
        Ok(())
    }

    fn screenshot_png(&self) -> AppResult<Vec<u8>> {
        if self.screenshot.is_empty() {
            return Err(AppError::driver("No mock screenshot set"));
        }
        Ok(self.screenshot.clone())
    }

    fn contexts(&self) -> AppResult<Vec<String>> {
        Ok(self.contexts.clone())
    }

    fn set_context(&mut self, name: &str) -> AppResult<()> {
        self.context = name.to_string();
        self.call_history.push(format!("set_context:{name}"));
        Ok(())
    }

    fn page_source(&self) -> AppResult<String> {
        Ok(self.page_source.clone())
    }

    fn quit(&mut self) -> AppResult<()> {
        self.closed = true;
        self.call_history.push("quit".to_string());
        Ok(())
    }
}
