//! Wall-clock timing of dispatch calls
//!
//! A [`ProfilerScope`] lives for the duration of one call and emits a single
//! debug event when it goes out of scope, including on early error returns.

use std::time::Instant;

use tracing::debug;

/// Times one labelled unit of dispatch work until dropped
#[derive(Debug)]
pub struct ProfilerScope {
    label: &'static str,
    started: Instant,
    rows: Option<usize>,
}

impl ProfilerScope {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            started: Instant::now(),
            rows: None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Attach the number of rows the call covers to the drop event
    pub fn record_rows(&mut self, rows: usize) {
        self.rows = Some(rows);
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        debug!(
            scope = self.label,
            rows = self.rows,
            elapsed_ms = self.elapsed_ms(),
            "scope finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_debug(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_drop_logs_label_and_rows() {
        let output = capture_debug(|| {
            let mut scope = ProfilerScope::new("dispatch");
            scope.record_rows(10);
            assert_eq!(scope.label(), "dispatch");
            assert!(scope.elapsed_ms() >= 0.0);
        });
        assert!(output.contains("scope finished"), "{output}");
        assert!(output.contains("dispatch"), "{output}");
        assert!(output.contains("rows=10"), "{output}");
        assert!(output.contains("elapsed_ms="), "{output}");
    }

    #[test]
    fn test_nothing_logged_while_alive() {
        let output = capture_debug(|| {
            let scope = ProfilerScope::new("gather");
            assert!(scope.elapsed_ms() >= 0.0);
            std::mem::forget(scope);
        });
        assert!(output.is_empty(), "{output}");
    }
}
