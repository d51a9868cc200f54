//! Dump command handler

use appfw::{MobileDriver, ScreenElementExtractor};

use crate::commands::DumpArgs;
use crate::error::CliResult;

/// Dump the driver's current screen; returns the entry count
pub fn dump_with<D: MobileDriver + ?Sized>(driver: &D, args: &DumpArgs) -> CliResult<usize> {
    let mut extractor = ScreenElementExtractor::new(driver, args.output.clone())
        .with_page_source_file(args.source_file.clone());
    if args.bounds {
        Ok(extractor.extract_bounds()?.len())
    } else {
        Ok(extractor.extract()?.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::SessionArgs;
    use appfw::MockDriver;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SOURCE: &str = r#"<hierarchy>
  <android.widget.EditText class="android.widget.EditText" content-desc="test-Username" bounds="[0,0][10,10]"/>
  <android.widget.EditText class="android.widget.EditText" content-desc="test-Password" bounds="[0,20][10,30]"/>
</hierarchy>"#;

    fn args(dir: &TempDir, bounds: bool) -> DumpArgs {
        DumpArgs {
            output: dir.path().join("out.json"),
            source_file: dir.path().join("source.xml"),
            bounds,
            session: SessionArgs {
                config: PathBuf::from("config.json"),
                server: None,
                app: None,
            },
        }
    }

    #[test]
    fn test_dump_saves_source_and_map() {
        let dir = TempDir::new().unwrap();
        let driver = MockDriver::new().with_page_source(SOURCE);
        assert_eq!(dump_with(&driver, &args(&dir, false)).unwrap(), 2);
        assert_eq!(fs::read_to_string(dir.path().join("source.xml")).unwrap(), SOURCE);
        let text = fs::read_to_string(dir.path().join("out.json")).unwrap();
        assert!(text.contains("//*[@content-desc='test-Password']"));
    }

    #[test]
    fn test_dump_bounds() {
        let dir = TempDir::new().unwrap();
        let driver = MockDriver::new().with_page_source(SOURCE);
        assert_eq!(dump_with(&driver, &args(&dir, true)).unwrap(), 2);
        let text = fs::read_to_string(dir.path().join("out.json")).unwrap();
        assert!(text.contains("[0,20][10,30]"));
    }
}
