use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Lower bound used for elapsed time and throughput so the ETA never
/// divides by zero.
const MIN_DIVISOR: f64 = 1e-9;

/// What happened to the row that triggered a status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Skipped,
    InvalidCoordinates,
    LookedUp { last_postal_code: String },
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowStatus::Skipped => f.write_str("skip (já tinha CEP)"),
            RowStatus::InvalidCoordinates => f.write_str("inválido (lat/lon)"),
            RowStatus::LookedUp { last_postal_code } => {
                write!(f, "last_CEP='{}'", last_postal_code)
            }
        }
    }
}

/// Estimated seconds remaining at the current throughput.
pub fn eta_seconds(processed: usize, total: usize, elapsed: Duration) -> f64 {
    let elapsed = elapsed.as_secs_f64().max(MIN_DIVISOR);
    let rate = processed as f64 / elapsed;
    total.saturating_sub(processed) as f64 / rate.max(MIN_DIVISOR)
}

/// Format one status line.
pub fn format_status_line(
    processed: usize,
    total: usize,
    filled: usize,
    status: &RowStatus,
    elapsed: Duration,
) -> String {
    format!(
        "[{}/{}] {} | filled={} | elapsed={:.0}s | ETA≈{:.0}s",
        processed,
        total,
        status,
        filled,
        elapsed.as_secs_f64(),
        eta_seconds(processed, total, elapsed)
    )
}

/// Periodic row-level progress for a fill run.
///
/// Status lines go to stdout (or the writer given to
/// [`ProgressReporter::with_output`]) whether or not the bar is drawn; a
/// visible bar is suspended while a line is written. Silent reporters keep
/// counting but never print.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    output: Mutex<Box<dyn Write + Send>>,
    interval: usize,
    total: usize,
    started: Instant,
}

impl ProgressReporter {
    pub fn new(total: usize, interval: usize, silent: bool) -> Self {
        let target = if silent {
            None
        } else {
            Some(ProgressDrawTarget::stderr())
        };
        Self::with_output(total, interval, target, Box::new(io::stdout()))
    }

    /// Reporter drawing its bar on `target` (`None` for silent) and writing
    /// status lines to `output`.
    pub fn with_output(
        total: usize,
        interval: usize,
        target: Option<ProgressDrawTarget>,
        output: Box<dyn Write + Send>,
    ) -> Self {
        let progress_bar = target.map(|target| {
            let pb = ProgressBar::with_draw_target(Some(total as u64), target);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            if !pb.is_hidden() {
                pb.enable_steady_tick(Duration::from_millis(100));
            }
            pb
        });

        Self {
            progress_bar,
            output: Mutex::new(output),
            interval: interval.max(1),
            total,
            started: Instant::now(),
        }
    }

    /// A status line is due every `interval` rows and after the last row.
    pub fn is_due(&self, processed: usize) -> bool {
        processed % self.interval == 0 || processed == self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Advance to `processed` rows and print a status line when due.
    /// Returns the line that was (or would have been) printed.
    pub fn report(&self, processed: usize, filled: usize, status: &RowStatus) -> Option<String> {
        if let Some(ref pb) = self.progress_bar {
            pb.set_position(processed as u64);
        }

        if !self.is_due(processed) {
            return None;
        }

        let line = format_status_line(processed, self.total, filled, status, self.elapsed());
        self.println(&line);
        Some(line)
    }

    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    pub fn println(&self, message: &str) {
        let Some(ref pb) = self.progress_bar else {
            return;
        };

        pb.suspend(|| {
            if let Ok(mut out) = self.output.lock() {
                // A closed stdout must not abort the run.
                let _ = writeln!(out, "{}", message).and_then(|_| out.flush());
            }
        });
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Cloneable in-memory writer.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_eta() {
        let eta = eta_seconds(25, 100, Duration::from_secs(50));
        assert!((eta - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_eta_with_zero_elapsed() {
        let eta = eta_seconds(1, 3, Duration::ZERO);
        assert!(eta.is_finite());
        assert!(eta >= 0.0);
    }

    #[test]
    fn test_eta_when_nothing_processed() {
        assert!(eta_seconds(0, 10, Duration::from_secs(1)).is_finite());
        assert_eq!(eta_seconds(10, 10, Duration::from_secs(1)), 0.0);
    }

    #[test]
    fn test_status_line_format() {
        let line = format_status_line(
            50,
            100,
            12,
            &RowStatus::LookedUp {
                last_postal_code: "05651-000".to_string(),
            },
            Duration::from_secs(100),
        );
        assert_eq!(
            line,
            "[50/100] last_CEP='05651-000' | filled=12 | elapsed=100s | ETA≈100s"
        );
    }

    #[test]
    fn test_report_interval_and_final_row() {
        let reporter = ProgressReporter::new(7, 3, true);
        assert!(reporter.report(1, 0, &RowStatus::Skipped).is_none());
        assert!(reporter.report(3, 0, &RowStatus::Skipped).is_some());
        assert!(reporter.report(5, 0, &RowStatus::InvalidCoordinates).is_none());
        assert!(reporter.report(6, 0, &RowStatus::Skipped).is_some());
        assert!(reporter.report(7, 0, &RowStatus::Skipped).is_some());
    }

    #[test]
    fn test_lines_are_written_when_bar_is_hidden() {
        let buffer = SharedBuffer::default();
        let reporter = ProgressReporter::with_output(
            2,
            1,
            Some(ProgressDrawTarget::hidden()),
            Box::new(buffer.clone()),
        );

        reporter.report(1, 0, &RowStatus::Skipped);
        reporter.report(
            2,
            1,
            &RowStatus::LookedUp {
                last_postal_code: "01001-000".to_string(),
            },
        );
        reporter.finish();

        let lines: Vec<String> = buffer.contents().lines().map(String::from).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[1/2] skip (já tinha CEP) | filled=0"));
        assert!(lines[1].starts_with("[2/2] last_CEP='01001-000' | filled=1"));
    }

    #[test]
    fn test_silent_reporter_writes_nothing() {
        let buffer = SharedBuffer::default();
        let reporter = ProgressReporter::with_output(1, 1, None, Box::new(buffer.clone()));

        assert!(reporter.report(1, 0, &RowStatus::Skipped).is_some());
        assert_eq!(buffer.contents(), "");
    }
}
