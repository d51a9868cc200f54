//! Action layer: named-element interactions with explicit waits.
//!
//! Every operation resolves a logical element name through the
//! [`LocatorStore`], waits for the element to be present, then performs one
//! driver call. [`Actions::scroll_to_element`] adds the only retry in the
//! framework: probe briefly, swipe down on a miss, repeat up to a bound.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::driver::{ElementId, MobileDriver, Point, WindowSize};
use crate::locator_store::LocatorStore;
use crate::result::{AppError, AppResult};
use crate::wait::{
    poll_until, WaitOptions, WaitOutcome, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};

/// Probe timeout used by each scroll attempt (3 seconds)
pub const SCROLL_PROBE_TIMEOUT_MS: u64 = 3_000;

/// Default bound on scroll attempts
pub const DEFAULT_MAX_SWIPES: u32 = 5;

/// Default swipe distance as a fraction of the half-screen
pub const DEFAULT_SWIPE_DISTANCE: f64 = 0.5;

/// Default swipe duration (1 second)
pub const DEFAULT_SWIPE_DURATION_MS: u64 = 1_000;

/// Swipe gesture direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeDirection {
    /// Finger moves toward the top of the screen
    #[default]
    Up,
    /// Finger moves toward the bottom of the screen
    Down,
    /// Finger moves toward the left edge
    Left,
    /// Finger moves toward the right edge
    Right,
}

impl SwipeDirection {
    /// Parse a direction name, ignoring case
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Lower-case name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Start and end points of a swipe over a window of `size`.
    ///
    /// The gesture is centered on the window and spans `distance` of the
    /// half-width (or half-height) on either side of the center.
    #[must_use]
    pub fn coordinates(&self, size: WindowSize, distance: f64) -> (Point, Point) {
        let center = size.center();
        let (x, y) = (f64::from(center.x), f64::from(center.y));
        let near = 1.0 - distance;
        let far = 1.0 + distance;
        match self {
            Self::Up => (
                Point::new(center.x, (y * far) as i32),
                Point::new(center.x, (y * near) as i32),
            ),
            Self::Down => (
                Point::new(center.x, (y * near) as i32),
                Point::new(center.x, (y * far) as i32),
            ),
            Self::Left => (
                Point::new((x * far) as i32, center.y),
                Point::new((x * near) as i32, center.y),
            ),
            Self::Right => (
                Point::new((x * near) as i32, center.y),
                Point::new((x * far) as i32, center.y),
            ),
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timing knobs for the action layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionConfig {
    /// Timeout for `click`, `input_text` and `get_text`
    pub default_timeout: Duration,
    /// Timeout of each probe inside `scroll_to_element`
    pub scroll_probe_timeout: Duration,
    /// Poll interval while waiting for presence
    pub poll_interval: Duration,
    /// Swipe distance used by `scroll_to_element`
    pub swipe_distance: f64,
    /// Swipe duration used by `scroll_to_element`
    pub swipe_duration: Duration,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            scroll_probe_timeout: Duration::from_millis(SCROLL_PROBE_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            swipe_distance: DEFAULT_SWIPE_DISTANCE,
            swipe_duration: Duration::from_millis(DEFAULT_SWIPE_DURATION_MS),
        }
    }
}

impl ActionConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default element timeout
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set the scroll probe timeout
    #[must_use]
    pub const fn with_scroll_probe_timeout(mut self, timeout: Duration) -> Self {
        self.scroll_probe_timeout = timeout;
        self
    }

    /// Set the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Named-element actions over a driver
pub struct Actions<'d, D: MobileDriver + ?Sized> {
    driver: &'d mut D,
    store: LocatorStore,
    config: ActionConfig,
}

impl<D: MobileDriver + ?Sized> fmt::Debug for Actions<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actions")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'d, D: MobileDriver + ?Sized> Actions<'d, D> {
    /// Create actions with default timing
    pub fn new(driver: &'d mut D, store: LocatorStore) -> Self {
        Self {
            driver,
            store,
            config: ActionConfig::default(),
        }
    }

    /// Replace the timing config
    #[must_use]
    pub fn with_config(mut self, config: ActionConfig) -> Self {
        self.config = config;
        self
    }

    /// Locator store in use
    pub fn store(&self) -> &LocatorStore {
        &self.store
    }

    /// Timing config in use
    pub fn config(&self) -> &ActionConfig {
        &self.config
    }

    /// Underlying driver
    pub fn driver(&self) -> &D {
        &*self.driver
    }

    /// Underlying driver, mutably
    pub fn driver_mut(&mut self) -> &mut D {
        &mut *self.driver
    }

    /// Wait up to `timeout` for `name` to be present.
    pub fn find(&self, name: &str, timeout: Duration) -> AppResult<ElementId> {
        let selector = self.store.get_locator(name)?.to_selector()?;
        let options = WaitOptions::new()
            .with_timeout(timeout)
            .with_poll_interval(self.config.poll_interval);

        let driver: &D = &*self.driver;
        match poll_until(&options, || driver.find_element(&selector))? {
            WaitOutcome::Ready { value, attempts } => {
                debug!(element = name, %selector, attempts, "element present");
                Ok(value)
            }
            WaitOutcome::TimedOut { attempts } => {
                debug!(element = name, %selector, attempts, "element wait timed out");
                Err(AppError::ElementNotFound {
                    name: name.to_string(),
                    ms: options.timeout_ms,
                })
            }
        }
    }

    /// Tap `name`
    pub fn click(&mut self, name: &str) -> AppResult<()> {
        self.click_within(name, self.config.default_timeout)
    }

    /// Tap `name`, waiting up to `timeout`
    pub fn click_within(&mut self, name: &str, timeout: Duration) -> AppResult<()> {
        let element = self.find(name, timeout)?;
        self.driver.click(&element)?;
        info!("Clicked on element '{name}'");
        Ok(())
    }

    /// Replace the content of `name` with `text`
    pub fn input_text(&mut self, name: &str, text: &str) -> AppResult<()> {
        self.input_text_within(name, text, self.config.default_timeout)
    }

    /// Replace the content of `name` with `text`, waiting up to `timeout`
    pub fn input_text_within(&mut self, name: &str, text: &str, timeout: Duration) -> AppResult<()> {
        let element = self.find(name, timeout)?;
        self.driver.clear(&element)?;
        self.driver.send_keys(&element, text)?;
        info!("Entered text '{text}' into element '{name}'");
        Ok(())
    }

    /// Visible text of `name`
    pub fn get_text(&self, name: &str) -> AppResult<String> {
        self.get_text_within(name, self.config.default_timeout)
    }

    /// Visible text of `name`, waiting up to `timeout`
    pub fn get_text_within(&self, name: &str, timeout: Duration) -> AppResult<String> {
        let element = self.find(name, timeout)?;
        let text = self.driver.text(&element)?;
        info!("Retrieved text '{text}' from element '{name}'");
        Ok(text)
    }

    /// Swipe down until `name` is present, at most `max_swipes` attempts.
    ///
    /// Each attempt probes for `scroll_probe_timeout`; a timed-out probe is
    /// followed by one downward swipe. Any other failure ends the loop.
    pub fn scroll_to_element(&mut self, name: &str, max_swipes: u32) -> AppResult<ElementId> {
        for attempt in 1..=max_swipes {
            match self.find(name, self.config.scroll_probe_timeout) {
                Ok(element) => return Ok(element),
                Err(e) if e.is_timeout() => {
                    debug!(element = name, attempt, max_swipes, "not visible yet, swiping");
                    self.swipe_toward(
                        SwipeDirection::Down,
                        self.config.swipe_distance,
                        self.config.swipe_duration,
                    )?;
                }
                Err(e) => return Err(e),
            }
        }
        Err(AppError::ScrollExhausted {
            name: name.to_string(),
            swipes: max_swipes,
        })
    }

    /// Swipe by direction name.
    ///
    /// Unknown direction names perform no gesture and succeed.
    pub fn swipe(&mut self, direction: &str, distance: f64, duration: Duration) -> AppResult<()> {
        match SwipeDirection::from_name(direction) {
            Some(dir) => self.swipe_toward(dir, distance, duration),
            None => {
                warn!(direction, "ignoring swipe with unrecognized direction");
                Ok(())
            }
        }
    }

    /// Swipe in a typed direction
    pub fn swipe_toward(
        &mut self,
        direction: SwipeDirection,
        distance: f64,
        duration: Duration,
    ) -> AppResult<()> {
        let size = self.driver.window_size()?;
        let (start, end) = direction.coordinates(size, distance);
        debug!(%direction, ?start, ?end, "swipe");
        self.driver.swipe(start, end, duration)
    }

    /// Switch to `context_name` if the session offers it
    pub fn switch_to_context(&mut self, context_name: &str) -> AppResult<()> {
        let available = self.driver.contexts()?;
        if !available.iter().any(|c| c == context_name) {
            return Err(AppError::ContextNotFound {
                name: context_name.to_string(),
                available,
            });
        }
        self.driver.set_context(context_name)?;
        info!("Switched to context: {context_name}");
        Ok(())
    }

    /// Write a PNG screenshot to `path`
    pub fn capture_screenshot(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        let png = self.driver.screenshot_png()?;
        std::fs::write(path, png)?;
        info!("Screenshot saved to {}", path.display());
        Ok(())
    }
}
