//! Locator store: logical element names → per-platform locators.
//!
//! Each page has a `<page>_locators.json` file:
//!
//! ```json
//! {
//!   "login_button": {
//!     "android_locator": { "type": "id", "value": "btn_login" },
//!     "ios_locator": { "type": "accessibility_id", "value": "Login" }
//!   }
//! }
//! ```
//!
//! The file is read once when the store is built; lookups never touch disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::load_json_file;
use crate::locator::LocatorDef;
use crate::result::{AppError, AppResult};

/// Platform definitions for one element, keyed by `<platform>_locator`
pub type PlatformLocators = BTreeMap<String, LocatorDef>;

/// Whole locator file contents
pub type LocatorMap = BTreeMap<String, PlatformLocators>;

/// Suffix joining a page name to its locator file
pub const LOCATOR_FILE_SUFFIX: &str = "_locators.json";

/// Locator file path for a page inside `dir`
#[must_use]
pub fn locator_file_for(dir: impl AsRef<Path>, page: &str) -> PathBuf {
    dir.as_ref().join(format!("{page}{LOCATOR_FILE_SUFFIX}"))
}

/// Key under which an element stores its locator for `platform`
#[must_use]
pub fn platform_key(platform: &str) -> String {
    format!("{platform}_locator")
}

/// Loaded locator file bound to one platform
#[derive(Debug, Clone)]
pub struct LocatorStore {
    locators: LocatorMap,
    platform: String,
    source: String,
}

impl LocatorStore {
    /// Load `<dir>/<page>_locators.json`
    pub fn for_page(dir: impl AsRef<Path>, page: &str, platform: &str) -> AppResult<Self> {
        Self::from_file(locator_file_for(dir, page), platform)
    }

    /// Load an explicit locator file
    pub fn from_file(path: impl AsRef<Path>, platform: &str) -> AppResult<Self> {
        let path = path.as_ref();
        let locators: LocatorMap = load_json_file(path)?;
        tracing::debug!(
            file = %path.display(),
            elements = locators.len(),
            platform,
            "loaded locators"
        );
        Ok(Self {
            locators,
            platform: platform.to_lowercase(),
            source: path.display().to_string(),
        })
    }

    /// Build from an in-memory map
    #[must_use]
    pub fn from_map(locators: LocatorMap, platform: &str) -> Self {
        Self {
            locators,
            platform: platform.to_lowercase(),
            source: "<memory>".to_string(),
        }
    }

    /// Active platform
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Label of the backing file, used in error messages
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Known element names
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.locators.keys().map(String::as_str).collect()
    }

    /// Resolve `name` for the active platform.
    ///
    /// An element present in the file but lacking the platform key is
    /// reported separately from an element that is absent altogether.
    pub fn get_locator(&self, name: &str) -> AppResult<&LocatorDef> {
        let platforms = self
            .locators
            .get(name)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::LocatorNotFound {
                name: name.to_string(),
                source_name: self.source.clone(),
            })?;

        platforms
            .get(&platform_key(&self.platform))
            .ok_or_else(|| AppError::PlatformLocatorMissing {
                name: name.to_string(),
                platform: self.platform.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    const LOGIN_LOCATORS: &str = r#"{
        "login_button": {
            "android_locator": {"type": "id", "value": "btn_login"},
            "ios_locator": {"type": "accessibility_id", "value": "Login"}
        },
        "username_field": {
            "android_locator": {"type": "xpath", "value": "//*[@resource-id='user']"}
        }
    }"#;

    fn login_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("login_locators.json"), LOGIN_LOCATORS).unwrap();
        dir
    }

    mod lookup_tests {
        use super::*;

        #[test]
        fn test_android_lookup_returns_stored_pair() {
            let dir = login_dir();
            let store = LocatorStore::for_page(dir.path(), "login", "android").unwrap();
            let locator = store.get_locator("login_button").unwrap();
            assert_eq!(locator, &LocatorDef::new("id", "btn_login"));
        }

        #[test]
        fn test_ios_lookup() {
            let dir = login_dir();
            let store = LocatorStore::for_page(dir.path(), "login", "iOS").unwrap();
            assert_eq!(store.platform(), "ios");
            let locator = store.get_locator("login_button").unwrap();
            assert_eq!(locator.locator_type, "accessibility_id");
        }

        #[test]
        fn test_absent_name_fails() {
            let dir = login_dir();
            let store = LocatorStore::for_page(dir.path(), "login", "android").unwrap();
            let err = store.get_locator("logout_button").unwrap_err();
            assert!(matches!(err, AppError::LocatorNotFound { .. }));
            assert!(err.to_string().contains("login_locators.json"));
        }

        #[test]
        fn test_missing_platform_fails() {
            let dir = login_dir();
            let store = LocatorStore::for_page(dir.path(), "login", "ios").unwrap();
            let err = store.get_locator("username_field").unwrap_err();
            assert!(matches!(
                err,
                AppError::PlatformLocatorMissing { ref platform, .. } if platform == "ios"
            ));
        }

        #[test]
        fn test_empty_entry_counts_as_absent() {
            let mut map = LocatorMap::new();
            let _ = map.insert("ghost".to_string(), PlatformLocators::new());
            let store = LocatorStore::from_map(map, "android");
            assert!(matches!(
                store.get_locator("ghost").unwrap_err(),
                AppError::LocatorNotFound { .. }
            ));
        }

        #[test]
        fn test_names_sorted() {
            let dir = login_dir();
            let store = LocatorStore::for_page(dir.path(), "login", "android").unwrap();
            assert_eq!(store.names(), vec!["login_button", "username_field"]);
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_missing_file_is_config_error() {
            let dir = TempDir::new().unwrap();
            let err = LocatorStore::for_page(dir.path(), "home", "android").unwrap_err();
            assert!(err.is_config());
            assert!(err.to_string().contains("home_locators.json"));
        }

        #[test]
        fn test_malformed_file_is_config_error() {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("home_locators.json"), "{\"a\": [1, 2]}").unwrap();
            let err = LocatorStore::for_page(dir.path(), "home", "android").unwrap_err();
            assert!(matches!(err, AppError::ConfigParse { .. }));
        }

        #[test]
        fn test_locator_file_for() {
            let path = locator_file_for("/tmp/pages", "checkout");
            assert_eq!(path, PathBuf::from("/tmp/pages/checkout_locators.json"));
        }
    }

    mod property_tests {
        use super::*;

        proptest! {
            #[test]
            fn prop_stored_locator_is_returned_verbatim(
                name in "[a-z_]{1,16}",
                kind in "[a-z_]{1,12}",
                value in ".{0,40}",
            ) {
                let mut platforms = PlatformLocators::new();
                let _ = platforms.insert(platform_key("android"), LocatorDef::new(&kind, &value));
                let mut map = LocatorMap::new();
                let _ = map.insert(name.clone(), platforms);

                let store = LocatorStore::from_map(map, "android");
                let found = store.get_locator(&name).unwrap();
                prop_assert_eq!(&found.locator_type, &kind);
                prop_assert_eq!(&found.value, &value);
            }

            #[test]
            fn prop_written_locator_file_reads_back_identically(
                entries in proptest::collection::btree_map(
                    "[a-z_]{1,16}",
                    (("[a-z_]{1,12}", ".{0,40}"), ("[a-z_]{1,12}", ".{0,40}")),
                    1..8,
                ),
            ) {
                let mut map = LocatorMap::new();
                for (name, ((a_kind, a_value), (i_kind, i_value))) in &entries {
                    let mut platforms = PlatformLocators::new();
                    let _ = platforms.insert(platform_key("android"), LocatorDef::new(a_kind, a_value));
                    let _ = platforms.insert(platform_key("ios"), LocatorDef::new(i_kind, i_value));
                    let _ = map.insert(name.clone(), platforms);
                }

                let dir = TempDir::new().unwrap();
                fs::write(
                    locator_file_for(dir.path(), "profile"),
                    serde_json::to_string_pretty(&map).unwrap(),
                )
                .unwrap();

                for platform in ["android", "ios"] {
                    let store = LocatorStore::for_page(dir.path(), "profile", platform).unwrap();
                    prop_assert_eq!(store.names().len(), map.len());
                    for (name, platforms) in &map {
                        prop_assert_eq!(
                            store.get_locator(name).unwrap(),
                            &platforms[&platform_key(platform)]
                        );
                    }
                }
            }
        }
    }
}
