//! Screen element extraction.
//!
//! Fetches a page source from a live driver (or reads a saved one), flattens
//! it with [`crate::hierarchy`], and writes the result as JSON for authoring
//! locator files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::driver::MobileDriver;
use crate::hierarchy::{bounds_elements, collect_elements, BoundsElement, ElementMap, UiNode};
use crate::result::{AppError, AppResult};

/// Default file the live page source is saved to
pub const DEFAULT_PAGE_SOURCE_FILE: &str = "screen_source.xml";

/// Default element map output file
pub const DEFAULT_OUTPUT_FILE: &str = "screen_elements.json";

/// Read a saved page source
pub fn read_page_source(path: impl AsRef<Path>) -> AppResult<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AppError::PageSourceMissing {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Parse a snapshot, logging and returning `None` when it is malformed
#[must_use]
pub fn parse_or_log(xml: &str) -> Option<UiNode> {
    match UiNode::parse(xml) {
        Ok(root) => Some(root),
        Err(e) => {
            tracing::error!(error = %e, "skipping malformed screen source");
            None
        }
    }
}

/// Name → XPath map of an XML snapshot; empty when malformed
#[must_use]
pub fn elements_from_xml(xml: &str) -> ElementMap {
    let mut map = ElementMap::new();
    if let Some(root) = parse_or_log(xml) {
        collect_elements(&root, &mut map);
    }
    map
}

/// Bounds records of an XML snapshot; empty when malformed
#[must_use]
pub fn bounds_from_xml(xml: &str) -> Vec<BoundsElement> {
    parse_or_log(xml)
        .map(|root| bounds_elements(&root))
        .unwrap_or_default()
}

/// Write `value` as JSON with 4-space indentation, replacing `path`
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> AppResult<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    let mut file = fs::File::create(path)?;
    file.write_all(&buf)?;
    Ok(())
}

/// Dumps the current screen of a live session into an element map
#[derive(Debug)]
pub struct ScreenElementExtractor<'d, D: MobileDriver + ?Sized> {
    driver: &'d D,
    page_source_file: PathBuf,
    output_file: PathBuf,
    elements: ElementMap,
}

impl<'d, D: MobileDriver + ?Sized> ScreenElementExtractor<'d, D> {
    /// Create an extractor writing to `output_file`
    pub fn new(driver: &'d D, output_file: impl Into<PathBuf>) -> Self {
        Self {
            driver,
            page_source_file: PathBuf::from(DEFAULT_PAGE_SOURCE_FILE),
            output_file: output_file.into(),
            elements: ElementMap::new(),
        }
    }

    /// Set where the page source is saved
    #[must_use]
    pub fn with_page_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.page_source_file = path.into();
        self
    }

    /// Elements collected so far
    pub fn elements(&self) -> &ElementMap {
        &self.elements
    }

    /// Fetch the page source and save it
    pub fn save_page_source(&self) -> AppResult<&Path> {
        let xml = self.driver.page_source()?;
        fs::write(&self.page_source_file, xml)?;
        tracing::info!(file = %self.page_source_file.display(), "page source saved");
        Ok(&self.page_source_file)
    }

    /// Parse the saved page source into the element map
    pub fn parse_screen_source(&mut self) -> AppResult<&ElementMap> {
        let xml = read_page_source(&self.page_source_file)?;
        if let Some(root) = parse_or_log(&xml) {
            collect_elements(&root, &mut self.elements);
        }
        tracing::debug!(elements = self.elements.len(), "screen source parsed");
        Ok(&self.elements)
    }

    /// Write the element map to the output file
    pub fn save_to_json(&self) -> AppResult<()> {
        write_json(&self.output_file, &self.elements)?;
        tracing::info!(
            file = %self.output_file.display(),
            elements = self.elements.len(),
            "elements saved"
        );
        Ok(())
    }

    /// Save, parse and write in one go
    pub fn extract(&mut self) -> AppResult<&ElementMap> {
        let _ = self.save_page_source()?;
        let _ = self.parse_screen_source()?;
        self.save_to_json()?;
        Ok(&self.elements)
    }

    /// Bounds-aware dump of the live screen, written to the output file
    pub fn extract_bounds(&self) -> AppResult<Vec<BoundsElement>> {
        let xml = self.driver.page_source()?;
        let elements = bounds_from_xml(&xml);
        write_json(&self.output_file, &elements)?;
        tracing::info!(
            file = %self.output_file.display(),
            elements = elements.len(),
            "bounds elements saved"
        );
        Ok(elements)
    }
}
