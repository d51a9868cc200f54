//! Parse command handler

use appfw::{bounds_from_xml, elements_from_xml, read_page_source, write_json};

use crate::commands::ParseArgs;
use crate::error::CliResult;

/// Flatten a saved page source and write the JSON; returns the entry count
pub fn execute_parse(args: &ParseArgs) -> CliResult<usize> {
    let xml = read_page_source(&args.source)?;
    if args.bounds {
        let elements = bounds_from_xml(&xml);
        write_json(&args.output, &elements)?;
        Ok(elements.len())
    } else {
        let elements = elements_from_xml(&xml);
        write_json(&args.output, &elements)?;
        Ok(elements.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;
    use tempfile::TempDir;

    const SOURCE: &str = r#"<hierarchy>
  <android.widget.Button class="android.widget.Button" text="LOGIN" resource-id="app:id/login" bounds="[0,0][100,50]"/>
  <android.widget.TextView class="android.widget.TextView" text="LOGIN" bounds="[0,0][100,50]"/>
</hierarchy>"#;

    fn args(dir: &TempDir, bounds: bool) -> ParseArgs {
        let source = dir.path().join("source.xml");
        fs::write(&source, SOURCE).unwrap();
        ParseArgs {
            source,
            output: dir.path().join("out.json"),
            bounds,
        }
    }

    #[test]
    fn test_name_map() {
        let dir = TempDir::new().unwrap();
        let count = execute_parse(&args(&dir, false)).unwrap();
        assert_eq!(count, 1);
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("out.json")).unwrap())
                .unwrap();
        assert_eq!(written["LOGIN"]["xpath"], "//*[contains(@text,'LOGIN')]");
    }

    #[test]
    fn test_bounds_records() {
        let dir = TempDir::new().unwrap();
        let count = execute_parse(&args(&dir, true)).unwrap();
        assert_eq!(count, 1);
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("out.json")).unwrap())
                .unwrap();
        assert_eq!(written[0]["class_name"], "android.widget.Button");
        assert_eq!(written[0]["xpath"], "//android.widget.Button[@bounds='[0,0][100,50]']");
    }

    #[test]
    fn test_missing_source() {
        let dir = TempDir::new().unwrap();
        let args = ParseArgs {
            source: dir.path().join("absent.xml"),
            output: dir.path().join("out.json"),
            bounds: false,
        };
        let err = execute_parse(&args).unwrap_err();
        assert!(matches!(err, CliError::App(appfw::AppError::PageSourceMissing { .. })));
        assert!(!dir.path().join("out.json").exists());
    }
}
