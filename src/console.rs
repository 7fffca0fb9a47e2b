//! Operator-facing output
//!
//! The banner, startup lines, heartbeat and shutdown messages are part of the
//! service's observable contract, so they are written verbatim to stdout
//! rather than through the tracing subscriber.

use std::io::Write;

/// Sink for whole lines of operator output
pub trait Console: Send + Sync {
    fn line(&self, text: &str);
}

/// Writes each line to stdout under the stdout lock
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn line(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // Nothing sensible to do if stdout is gone
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }
}

/// Console that records lines for assertions
#[cfg(test)]
#[allow(clippy::expect_used)]
#[derive(Default)]
pub struct CapturedConsole {
    lines: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl CapturedConsole {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("console lock poisoned").clone()
    }

    pub fn count_starting_with(&self, prefix: &str) -> usize {
        self.lines()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl Console for CapturedConsole {
    fn line(&self, text: &str) {
        self.lines
            .lock()
            .expect("console lock poisoned")
            .push(text.to_string());
    }
}
