//! Terminal status lines

use console::{style, Term};

/// Writes status lines to stderr, leaving stdout for command results
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Success line, e.g. `✓ 12 elements written to out.json`
    #[must_use]
    pub fn success_line(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        format!("{prefix} {message}")
    }

    /// Failure line
    #[must_use]
    pub fn failure_line(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };
        format!("{prefix} {message}")
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self.term.write_line(&self.success_line(message));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let _ = self.term.write_line(&self.failure_line(message));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reporter() {
        let reporter = Reporter::new(true, false);
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_plain_prefixes() {
        let reporter = Reporter::new(false, false);
        assert_eq!(reporter.success_line("done"), "OK done");
        assert_eq!(reporter.failure_line("broke"), "FAIL broke");
    }

    #[test]
    fn test_colored_success_keeps_message() {
        let reporter = Reporter::new(true, false);
        assert!(reporter.success_line("3 elements").ends_with("3 elements"));
    }

    #[test]
    fn test_quiet_reporter_does_not_panic() {
        let reporter = Reporter::new(false, true);
        reporter.success("hidden");
        reporter.failure("shown");
    }
}
