//! Keyed test data (`test_data.json`).
//!
//! Entries are kept as raw JSON objects. Flows pick the fields they need and
//! only fail when those are missing, so one odd entry never hides the others.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::load_json_file;
use crate::result::{AppError, AppResult};

/// Default test data file name
pub const TEST_DATA_FILE: &str = "test_data.json";

/// Field names read by the login flow
pub mod field {
    /// Login user name
    pub const USERNAME: &str = "username";
    /// Login password
    pub const PASSWORD: &str = "password";
}

/// Fields of one test-data entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestData(pub Map<String, Value>);

impl TestData {
    /// Entry holding just a user name and password
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::default()
            .with_field(field::USERNAME, username.into())
            .with_field(field::PASSWORD, password.into())
    }

    /// Set a field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let _ = self.0.insert(name.into(), value.into());
        self
    }

    /// Raw field value
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// String field, failing when absent or of another type
    pub fn str_field(&self, name: &str) -> AppResult<&str> {
        self.get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::TestDataField {
                field: name.to_string(),
            })
    }

    /// `username` field
    pub fn username(&self) -> AppResult<&str> {
        self.str_field(field::USERNAME)
    }

    /// `password` field
    pub fn password(&self) -> AppResult<&str> {
        self.str_field(field::PASSWORD)
    }

    /// All fields
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Loaded test data file
#[derive(Debug, Clone)]
pub struct TestDataLoader {
    entries: BTreeMap<String, TestData>,
    source: String,
}

impl TestDataLoader {
    /// Load a test data file
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        Ok(Self {
            entries: load_json_file(path)?,
            source: path.display().to_string(),
        })
    }

    /// Build from in-memory entries
    #[must_use]
    pub fn from_entries(entries: BTreeMap<String, TestData>) -> Self {
        Self {
            entries,
            source: "<memory>".to_string(),
        }
    }

    /// Entry for `test_name`
    pub fn get_test_data(&self, test_name: &str) -> AppResult<&TestData> {
        self.entries
            .get(test_name)
            .ok_or_else(|| AppError::TestDataNotFound {
                test_name: test_name.to_string(),
                source_name: self.source.clone(),
            })
    }

    /// Known test names
    #[must_use]
    pub fn test_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}
