//! Phase timing. With the `profile` feature phases are printed as a colored,
//! indented tree on stdout; otherwise elapsed times go to `tracing` at debug
//! level.
#[cfg(feature = "profile")]
use colored::Colorize;
#[cfg(feature = "profile")]
use core::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
#[cfg(not(feature = "profile"))]
use tracing::debug;

#[cfg(feature = "profile")]
pub static CALL_DEPTH: AtomicUsize = AtomicUsize::new(0);

pub struct Timer {
  label: String,
  start: Instant,
}

impl Timer {
  #[inline(always)]
  pub fn new(label: &str) -> Self {
    #[cfg(feature = "profile")]
    {
      let depth = CALL_DEPTH.fetch_add(1, Ordering::Relaxed) + 1;
      println!("{:indent$}* {}", "", label.yellow().bold(), indent = 2 * depth);
    }
    Timer {
      label: label.to_string(),
      start: Instant::now(),
    }
  }

  pub fn elapsed(&self) -> Duration {
    self.start.elapsed()
  }

  #[inline(always)]
  pub fn stop(&self) -> Duration {
    let elapsed = self.elapsed();
    #[cfg(feature = "profile")]
    {
      let depth = CALL_DEPTH.load(Ordering::Relaxed);
      println!(
        "{:indent$}* {} {:?}",
        "",
        self.label.blue().bold(),
        elapsed,
        indent = 2 * depth
      );
      CALL_DEPTH.fetch_sub(1, Ordering::Relaxed);
    }
    #[cfg(not(feature = "profile"))]
    debug!(phase = %self.label, ?elapsed, "done");
    elapsed
  }

  #[inline(always)]
  pub fn print(msg: &str) {
    #[cfg(feature = "profile")]
    {
      let depth = CALL_DEPTH.load(Ordering::Relaxed) + 1;
      println!("{:indent$}* {}", "", msg.green().bold(), indent = 2 * depth);
    }
    #[cfg(not(feature = "profile"))]
    debug!("{}", msg);
  }
}

#[cfg(test)]
mod tests {
  use super::Timer;

  #[test]
  fn test_stop_reports_elapsed() {
    let timer = Timer::new("phase");
    let elapsed = timer.stop();
    assert!(elapsed <= timer.elapsed());
  }
}
