// ABOUTME: Timing guards for bridge lifecycle work such as bootstrap waits and flushes
// ABOUTME: Records elapsed time on a span and warns when an operation overruns its budget

use std::time::{Duration, Instant};
use tracing::{Level, Span, field, span, warn};

/// Timer guard that records elapsed time when dropped
#[derive(Debug)]
pub struct PerfTimer {
    span: Span,
    start: Instant,
    operation: String,
    warn_threshold: Option<Duration>,
    abandoned: bool,
}

impl PerfTimer {
    pub fn new(operation: &str) -> Self {
        let span = span!(
            Level::DEBUG,
            "perf_timer",
            operation = %operation,
            elapsed_ms = field::Empty,
            abandoned = field::Empty
        );

        Self {
            span,
            start: Instant::now(),
            operation: operation.to_string(),
            warn_threshold: None,
            abandoned: false,
        }
    }

    /// Warn if the operation is still running past `threshold` when the timer ends
    pub fn with_warn_threshold(mut self, threshold: Duration) -> Self {
        self.warn_threshold = Some(threshold);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn finish(self) {}

    /// End the timer for work that was superseded; no slow-operation warning
    pub fn abandon(mut self) {
        self.abandoned = true;
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        #[allow(clippy::cast_precision_loss)]
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;

        self.span.record("elapsed_ms", elapsed_ms);
        if self.abandoned {
            self.span.record("abandoned", true);
            return;
        }

        if let Some(threshold) = self.warn_threshold
            && elapsed > threshold
        {
            warn!(
                operation = %self.operation,
                elapsed_ms,
                threshold_ms = threshold.as_millis() as u64,
                "Slow operation detected"
            );
        }
    }
}

/// Time a block of code
#[macro_export]
macro_rules! timed {
    ($name:expr, $code:block) => {{
        let _timer = $crate::performance::PerfTimer::new($name);
        $code
    }};
    ($name:expr, warn_threshold: $threshold:expr, $code:block) => {{
        let _timer = $crate::performance::PerfTimer::new($name).with_warn_threshold($threshold);
        $code
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tracing_mock::{expect, subscriber};

    #[test]
    fn test_perf_timer_elapsed() {
        let timer = PerfTimer::new("bootstrap");
        thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed() >= Duration::from_millis(10));
        assert_eq!(timer.operation(), "bootstrap");
    }

    #[test]
    fn test_timed_macro() {
        let result = timed!("flush", {
            thread::sleep(Duration::from_millis(1));
            42
        });
        assert_eq!(result, 42);
    }

    #[test]
    fn test_perf_timer_span_creation() {
        let (subscriber, handle) = subscriber::mock()
            .new_span(expect::span().named("perf_timer"))
            .drop_span(expect::span().named("perf_timer"))
            .only()
            .run_with_handle();

        tracing::subscriber::with_default(subscriber, || {
            drop(PerfTimer::new("flush"));
        });

        handle.assert_finished();
    }

    #[test]
    fn test_perf_timer_with_warn_threshold() {
        let (subscriber, handle) = subscriber::mock()
            .new_span(expect::span().named("perf_timer"))
            .event(expect::event().with_fields(expect::msg("Slow operation detected")))
            .drop_span(expect::span().named("perf_timer"))
            .only()
            .run_with_handle();

        tracing::subscriber::with_default(subscriber, || {
            let timer = PerfTimer::new("bootstrap").with_warn_threshold(Duration::from_millis(1));
            thread::sleep(Duration::from_millis(10));
            timer.finish();
        });

        handle.assert_finished();
    }

    #[test]
    fn test_abandoned_timer_does_not_warn() {
        let (subscriber, handle) = subscriber::mock()
            .new_span(expect::span().named("perf_timer"))
            .drop_span(expect::span().named("perf_timer"))
            .only()
            .run_with_handle();

        tracing::subscriber::with_default(subscriber, || {
            let timer = PerfTimer::new("bootstrap").with_warn_threshold(Duration::from_millis(1));
            thread::sleep(Duration::from_millis(5));
            timer.abandon();
        });

        handle.assert_finished();
    }
}
