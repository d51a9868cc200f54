//! AppFW: Locator-Driven Mobile UI Test Automation
//!
//! AppFW keeps element locators out of test code. Tests name elements
//! (`"login_button"`), a per-page JSON locator file maps each name to a
//! per-platform `{type, value}` pair, and an action layer resolves, waits for
//! and drives the element through an Appium session.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        APPFW Architecture                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  config.json ──► LocatorStore ──► Actions ──► PageObject ──► Test │
//! │                  (<page>_locators.json)  │                       │
//! │                                          ▼                       │
//! │                                   MobileDriver                   │
//! │                          (AppiumDriver | MockDriver)             │
//! │                                                                  │
//! │  page source ──► hierarchy ──► extractor ──► screen_elements.json│
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use appfw::prelude::*;
//!
//! let mut platforms = PlatformLocators::new();
//! let _ = platforms.insert(platform_key("android"), LocatorDef::new("id", "btn_login"));
//! let mut map = LocatorMap::new();
//! let _ = map.insert("login_button".to_string(), platforms);
//!
//! let store = LocatorStore::from_map(map, "android");
//! let locator = store.get_locator("login_button").unwrap();
//! assert_eq!(locator.value, "btn_login");
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

/// Explicit poll-until-timeout waits
pub mod wait;

/// Device configuration and JSON file loading
pub mod config;

/// Element driver boundary and the in-memory mock
pub mod driver;

/// Locator strategies and selectors
pub mod locator;

/// Per-page locator files
pub mod locator_store;

/// Keyed test data
pub mod test_data;

/// Name-based element actions
pub mod actions;

/// Page objects composing actions into flows
pub mod page_object;

/// UI hierarchy snapshots
pub mod hierarchy;

/// Screen element extraction to JSON
pub mod extractor;

/// Appium session driver on fantoccini
#[cfg(feature = "appium")]
pub mod appium;

mod result;

pub use actions::{
    ActionConfig, Actions, SwipeDirection, DEFAULT_MAX_SWIPES, DEFAULT_SWIPE_DISTANCE,
    DEFAULT_SWIPE_DURATION_MS, SCROLL_PROBE_TIMEOUT_MS,
};
#[cfg(feature = "appium")]
pub use appium::AppiumDriver;
pub use config::{
    load_json_file, resolve_platform, DeviceConfig, CONFIG_FILE, DEFAULT_PLATFORM,
    DEFAULT_SERVER_URL,
};
pub use driver::{
    ElementId, MobileDriver, MockDriver, MockElement, Point, SwipeRecord, WindowSize,
    NATIVE_CONTEXT,
};
pub use extractor::{
    bounds_from_xml, elements_from_xml, read_page_source, write_json, ScreenElementExtractor,
    DEFAULT_OUTPUT_FILE, DEFAULT_PAGE_SOURCE_FILE,
};
pub use hierarchy::{bounds_elements, element_map, BoundsElement, ElementMap, UiNode, XpathEntry};
pub use locator::{LocatorDef, LocatorStrategy, Selector};
pub use locator_store::{
    locator_file_for, platform_key, LocatorMap, LocatorStore, PlatformLocators,
    LOCATOR_FILE_SUFFIX,
};
pub use page_object::{LoginPage, PageObject};
pub use result::{AppError, AppResult};
pub use test_data::{TestData, TestDataLoader, TEST_DATA_FILE};
pub use wait::{poll_until, WaitOptions, WaitOutcome};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::actions::*;
    #[cfg(feature = "appium")]
    pub use super::appium::AppiumDriver;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::extractor::*;
    pub use super::hierarchy::{
        bounds_elements, element_map, BoundsElement, ElementMap, UiNode, XpathEntry,
    };
    pub use super::locator::*;
    pub use super::locator_store::*;
    pub use super::page_object::*;
    pub use super::result::*;
    pub use super::test_data::*;
    pub use super::wait::*;
}
