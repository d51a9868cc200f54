//! Locate command handler

use appfw::{resolve_platform, LocatorDef, LocatorStore};

use crate::commands::LocateArgs;
use crate::error::CliResult;

/// Platform from `--platform`, else from the device config
#[must_use]
pub fn platform_for(args: &LocateArgs) -> String {
    args.platform
        .as_deref()
        .map_or_else(|| resolve_platform(&args.config), str::to_lowercase)
}

/// Resolve the element name to its stored locator
pub fn execute_locate(args: &LocateArgs) -> CliResult<LocatorDef> {
    let platform = platform_for(args);
    let store = LocatorStore::for_page(&args.dir, &args.page, &platform)?;
    Ok(store.get_locator(&args.name)?.clone())
}
