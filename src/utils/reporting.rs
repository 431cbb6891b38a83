//! Failure counting and timing for test drivers.
//!
//! Both types report through the `log` facade when they go out of scope.

use std::time::{Duration, Instant};

use log::{info, warn};

/// Counts failed checks inside a scope and logs a summary on drop.
#[derive(Debug)]
pub struct FailCounter {
    name: String,
    checks: usize,
    failures: Vec<String>,
}

impl FailCounter {
    pub fn new(name: impl Into<String>) -> FailCounter {
        FailCounter {
            name: name.into(),
            checks: 0,
            failures: Vec::new(),
        }
    }

    /// Record a check; `message` is kept only if it failed.
    pub fn check(&mut self, passed: bool, message: impl Into<String>) -> bool {
        self.checks += 1;
        if !passed {
            self.failures.push(message.into());
        }
        passed
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.check(false, message);
    }

    pub fn checks(&self) -> usize {
        self.checks
    }

    pub fn fail_count(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Human-readable summary line.
    pub fn summary(&self) -> String {
        if self.failures.is_empty() {
            format!("{}: all {} checks passed", self.name, self.checks)
        } else {
            format!(
                "{}: {} of {} checks failed: {}",
                self.name,
                self.failures.len(),
                self.checks,
                self.failures.join("; ")
            )
        }
    }
}

impl Drop for FailCounter {
    fn drop(&mut self) {
        if self.failures.is_empty() {
            info!("{}", self.summary());
        } else {
            warn!("{}", self.summary());
        }
    }
}

/// Logs the time spent in a scope when dropped.
#[derive(Debug)]
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    pub fn new(name: impl Into<String>) -> Timer {
        Timer {
            name: name.into(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!("{}: {:.6} s", self.name, self.elapsed().as_secs_f64());
    }
}
