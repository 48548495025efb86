//! Log Section Scoping
//!
//! Farm logs are segmented into named sections so the web UI can fold
//! them. A `Scope` logs a bracketed header when entered and a closing
//! line with the elapsed wall time when dropped.

use std::time::Instant;

/// Guard that brackets a named section of the farm log
pub struct Scope {
    kind: &'static str,
    name: String,
    started: Instant,
}

impl Scope {
    /// Open a new section; the header is logged immediately
    pub fn new(kind: &'static str, name: impl Into<String>) -> Self {
        let name = name.into();
        info!("# BEGIN {}: {}", kind, name);
        Self {
            kind,
            name,
            started: Instant::now(),
        }
    }

    /// Open a subsection (the common case)
    pub fn subsection(name: impl Into<String>) -> Self {
        Self::new("SUBSECTION", name)
    }

    /// Elapsed wall time since the section was opened
    pub fn elapsed(&self) -> std::time::Duration {
        self.started.elapsed()
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        info!(
            "# END {}: {} ({:.3}s)",
            self.kind,
            self.name,
            self.started.elapsed().as_secs_f64()
        );
    }
}
