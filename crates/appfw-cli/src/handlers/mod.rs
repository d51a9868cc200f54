//! Command handlers - extracted from main.rs for testability
//!
//! Each handler takes its parsed arguments and returns the value `main`
//! prints. Handlers that need a live server are split into a driver-generic
//! core (exercised with `MockDriver`) and a thin session wrapper.

pub mod dump;
pub mod locate;
pub mod login;
pub mod parse;
#[cfg(feature = "appium")]
pub mod session;

pub use dump::dump_with;
pub use locate::execute_locate;
pub use login::{load_credentials, login_with};
pub use parse::execute_parse;
