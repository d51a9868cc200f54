//! Locator definitions and the closed set of selector strategies.
//!
//! A locator file stores `{"type": "...", "value": "..."}` pairs. The `type`
//! string is parsed into [`LocatorStrategy`], which fails closed: anything not
//! listed here is rejected with [`AppError::InvalidLocatorType`] before the
//! driver is ever called.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::result::{AppError, AppResult};

/// Selector strategies understood by the automation server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocatorStrategy {
    /// Native resource id (`resource-id` on Android, `name` on iOS)
    Id,
    /// XPath over the page-source hierarchy
    XPath,
    /// Accessibility id (`content-desc` on Android, `accessibilityIdentifier` on iOS)
    AccessibilityId,
    /// Widget class name
    ClassName,
    /// Element name
    Name,
    /// Tag name
    TagName,
    /// CSS selector (webview contexts)
    CssSelector,
    /// Exact link text (webview contexts)
    LinkText,
    /// Partial link text (webview contexts)
    PartialLinkText,
    /// `UiSelector` expression
    AndroidUiAutomator,
    /// Espresso view tag
    AndroidViewTag,
    /// Espresso data matcher
    AndroidDataMatcher,
    /// `NSPredicate` string
    IosPredicate,
    /// XCUITest class chain
    IosClassChain,
    /// Template image match
    Image,
}

impl LocatorStrategy {
    /// All supported strategies
    pub const ALL: [Self; 15] = [
        Self::Id,
        Self::XPath,
        Self::AccessibilityId,
        Self::ClassName,
        Self::Name,
        Self::TagName,
        Self::CssSelector,
        Self::LinkText,
        Self::PartialLinkText,
        Self::AndroidUiAutomator,
        Self::AndroidViewTag,
        Self::AndroidDataMatcher,
        Self::IosPredicate,
        Self::IosClassChain,
        Self::Image,
    ];

    /// Canonical name as written in locator files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::XPath => "xpath",
            Self::AccessibilityId => "accessibility_id",
            Self::ClassName => "class_name",
            Self::Name => "name",
            Self::TagName => "tag_name",
            Self::CssSelector => "css_selector",
            Self::LinkText => "link_text",
            Self::PartialLinkText => "partial_link_text",
            Self::AndroidUiAutomator => "android_uiautomator",
            Self::AndroidViewTag => "android_viewtag",
            Self::AndroidDataMatcher => "android_data_matcher",
            Self::IosPredicate => "ios_predicate",
            Self::IosClassChain => "ios_class_chain",
            Self::Image => "image",
        }
    }

    /// The `using` value sent in a find-element request
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::XPath => "xpath",
            Self::AccessibilityId => "accessibility id",
            Self::ClassName => "class name",
            Self::Name => "name",
            Self::TagName => "tag name",
            Self::CssSelector => "css selector",
            Self::LinkText => "link text",
            Self::PartialLinkText => "partial link text",
            Self::AndroidUiAutomator => "-android uiautomator",
            Self::AndroidViewTag => "-android viewtag",
            Self::AndroidDataMatcher => "-android datamatcher",
            Self::IosPredicate => "-ios predicate string",
            Self::IosClassChain => "-ios class chain",
            Self::Image => "-image",
        }
    }
}

impl FromStr for LocatorStrategy {
    type Err = AppError;

    /// Case-insensitive; accepts the canonical names only.
    fn from_str(s: &str) -> AppResult<Self> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == lowered)
            .ok_or_else(|| AppError::InvalidLocatorType {
                locator_type: s.to_string(),
            })
    }
}

impl fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored `{type, value}` locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorDef {
    /// Strategy name as written in the file
    #[serde(rename = "type")]
    pub locator_type: String,
    /// Selector value
    pub value: String,
}

impl LocatorDef {
    /// Create a locator definition
    #[must_use]
    pub fn new(locator_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            locator_type: locator_type.into(),
            value: value.into(),
        }
    }

    /// Translate into a driver selector
    pub fn to_selector(&self) -> AppResult<Selector> {
        Ok(Selector {
            strategy: self.locator_type.parse()?,
            value: self.value.clone(),
        })
    }
}

/// A validated (strategy, value) pair ready for the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Lookup strategy
    pub strategy: LocatorStrategy,
    /// Selector value
    pub value: String,
}

impl Selector {
    /// Create a selector
    #[must_use]
    pub fn new(strategy: LocatorStrategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    /// XPath selector
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::XPath, value)
    }

    /// Resource id selector
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::Id, value)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.strategy, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod strategy_tests {
        use super::*;

        #[test]
        fn test_parse_is_case_insensitive() {
            assert_eq!("ID".parse::<LocatorStrategy>().unwrap(), LocatorStrategy::Id);
            assert_eq!(
                "Accessibility_Id".parse::<LocatorStrategy>().unwrap(),
                LocatorStrategy::AccessibilityId
            );
            assert_eq!(
                "XPATH".parse::<LocatorStrategy>().unwrap(),
                LocatorStrategy::XPath
            );
        }

        #[test]
        fn test_unknown_type_fails_closed() {
            let err = "by_magic".parse::<LocatorStrategy>().unwrap_err();
            assert!(matches!(
                err,
                AppError::InvalidLocatorType { ref locator_type } if locator_type == "by_magic"
            ));
        }

        #[test]
        fn test_every_canonical_name_round_trips() {
            for strategy in LocatorStrategy::ALL {
                assert_eq!(strategy.as_str().parse::<LocatorStrategy>().unwrap(), strategy);
            }
        }

        #[test]
        fn test_wire_names() {
            assert_eq!(LocatorStrategy::AccessibilityId.wire_name(), "accessibility id");
            assert_eq!(
                LocatorStrategy::AndroidUiAutomator.wire_name(),
                "-android uiautomator"
            );
            assert_eq!(LocatorStrategy::IosPredicate.wire_name(), "-ios predicate string");
        }
    }

    mod locator_def_tests {
        use super::*;

        #[test]
        fn test_serde_uses_type_key() {
            let def: LocatorDef =
                serde_json::from_str(r#"{"type": "id", "value": "btn_login"}"#).unwrap();
            assert_eq!(def, LocatorDef::new("id", "btn_login"));
            let back = serde_json::to_value(&def).unwrap();
            assert_eq!(back["type"], "id");
        }

        #[test]
        fn test_to_selector() {
            let selector = LocatorDef::new("xpath", "//*[@text='Go']")
                .to_selector()
                .unwrap();
            assert_eq!(selector, Selector::xpath("//*[@text='Go']"));
            assert_eq!(selector.to_string(), "xpath: //*[@text='Go']");
        }

        #[test]
        fn test_to_selector_rejects_unknown() {
            assert!(LocatorDef::new("selector", "x").to_selector().is_err());
        }
    }
}
