//! CPU stress benchmark
//!
//! Counts primes by trial division for a fixed wall-clock duration,
//! working in short slices so progress events keep flowing to the UI.
//! Runs on a worker thread that reports over an mpsc channel; the
//! headless `bench` command drives the same loop with a callback.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Benchmark parameters
#[derive(Debug, Clone, Copy)]
pub struct BenchOptions {
    /// Total wall-clock duration of the stress loop
    pub duration: Duration,
    /// Work budget per slice before checking the clock and yielding
    pub slice: Duration,
}

impl BenchOptions {
    pub fn new(duration_secs: u64, slice_ms: u64) -> Self {
        BenchOptions {
            duration: Duration::from_secs(duration_secs.max(1)),
            slice: Duration::from_millis(slice_ms.clamp(1, 1000)),
        }
    }
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self::new(5, 16)
    }
}

/// Progress event emitted once per work slice
#[derive(Debug, Clone, Copy)]
pub struct BenchProgress {
    pub elapsed: Duration,
    pub total: Duration,
    pub iterations: u64,
}

impl BenchProgress {
    /// Completion ratio, 0.0 to 1.0
    pub fn ratio(&self) -> f64 {
        if self.total.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.total.as_secs_f64()).min(1.0)
    }
}

/// Final benchmark outcome
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BenchResult {
    /// Candidate numbers tested for primality
    pub iterations: u64,
    /// Primes found along the way
    pub primes_found: u64,
    /// Actual wall-clock duration
    pub duration_secs: f64,
    /// Headline score, iterations / 100
    pub score: u64,
}

/// Worker-to-UI messages
#[derive(Debug, Clone, Copy)]
pub enum BenchEvent {
    Progress(BenchProgress),
    Done(BenchResult),
}

/// Spawn the stress loop on a worker thread.
///
/// The receiver sees a stream of `Progress` events followed by exactly
/// one `Done`. If the worker dies the channel disconnects, which the
/// UI treats as an error state.
pub fn spawn(options: BenchOptions) -> mpsc::Receiver<BenchEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = run(options, |progress| {
            // Receiver gone means the screen was abandoned; stop early
            tx.send(BenchEvent::Progress(progress)).is_ok()
        });
        let _ = tx.send(BenchEvent::Done(result));
    });

    rx
}

/// Run the stress loop on the current thread, reporting progress after
/// each slice. The callback returning false aborts the run.
pub fn run<F>(options: BenchOptions, mut on_progress: F) -> BenchResult
where
    F: FnMut(BenchProgress) -> bool,
{
    let start = Instant::now();
    let mut iterations: u64 = 0;
    let mut primes_found: u64 = 0;
    let mut candidate: u64 = 2;

    loop {
        let slice_start = Instant::now();
        while slice_start.elapsed() < options.slice {
            if is_prime(candidate) {
                primes_found += 1;
            }
            iterations += 1;
            candidate += 1;
        }

        let elapsed = start.elapsed();
        let keep_going = on_progress(BenchProgress {
            elapsed,
            total: options.duration,
            iterations,
        });

        if elapsed >= options.duration || !keep_going {
            break;
        }

        thread::yield_now();
    }

    let duration_secs = start.elapsed().as_secs_f64();
    BenchResult {
        iterations,
        primes_found,
        duration_secs,
        score: score_for(iterations),
    }
}

/// Headline score from raw iteration count
pub fn score_for(iterations: u64) -> u64 {
    iterations / 100
}

/// Trial-division primality check
fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        let primes = [2u64, 3, 5, 7, 11, 13, 97, 7919];
        for p in primes {
            assert!(is_prime(p), "{p} should be prime");
        }
        let composites = [0u64, 1, 4, 9, 15, 100, 7917];
        for c in composites {
            assert!(!is_prime(c), "{c} should not be prime");
        }
    }

    #[test]
    fn test_score_is_iterations_over_100() {
        assert_eq!(score_for(0), 0);
        assert_eq!(score_for(99), 0);
        assert_eq!(score_for(100), 1);
        assert_eq!(score_for(123_456), 1_234);
    }

    #[test]
    fn test_short_run_produces_work() {
        let options = BenchOptions {
            duration: Duration::from_millis(50),
            slice: Duration::from_millis(5),
        };

        let mut progress_events = 0;
        let result = run(options, |p| {
            assert!(p.iterations > 0);
            assert!(p.ratio() <= 1.0);
            progress_events += 1;
            true
        });

        assert!(progress_events > 0);
        assert!(result.iterations > 0);
        assert!(result.duration_secs >= 0.05);
        assert_eq!(result.score, result.iterations / 100);
    }

    #[test]
    fn test_callback_false_aborts() {
        let options = BenchOptions {
            duration: Duration::from_secs(30),
            slice: Duration::from_millis(5),
        };

        let start = Instant::now();
        let _ = run(options, |_| false);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_spawn_sends_done_last() {
        let options = BenchOptions {
            duration: Duration::from_millis(40),
            slice: Duration::from_millis(5),
        };

        let rx = spawn(options);
        let mut saw_done = false;
        while let Ok(event) = rx.recv() {
            assert!(!saw_done, "no events may follow Done");
            if let BenchEvent::Done(result) = event {
                assert!(result.iterations > 0);
                saw_done = true;
            }
        }
        assert!(saw_done);
    }
}
