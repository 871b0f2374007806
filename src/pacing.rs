//! Fixed-rate polling: sleep, then ask the predicate whether to go on.

use std::{thread::sleep, time::Duration};

use tracing::trace;

/// Roughly 60 polls per second.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(16);

/// One delay-then-poll cycle. Returns what the predicate returned.
pub fn step<F>(delay: Duration, predicate: F) -> bool
where
    F: FnOnce() -> bool,
{
    sleep(delay);
    predicate()
}

/// Repeats [`step`] until the predicate returns `false`. Returns the number of
/// cycles run, including the last one.
pub fn run<F>(delay: Duration, mut predicate: F) -> usize
where
    F: FnMut() -> bool,
{
    let mut cycles = 0;
    loop {
        cycles += 1;
        if !step(delay, &mut predicate) {
            trace!("Loop stopped after {cycles} cycles");
            return cycles;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn stop_on_first_poll_runs_one_cycle() {
        let mut calls = 0;
        let start = Instant::now();
        let cycles = run(Duration::from_millis(5), || {
            calls += 1;
            false
        });
        assert_eq!(cycles, 1);
        assert_eq!(calls, 1);
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn delay_comes_before_the_poll() {
        let start = Instant::now();
        let mut waited = Duration::ZERO;
        let keep_going = step(Duration::from_millis(10), || {
            waited = start.elapsed();
            true
        });
        assert!(keep_going);
        assert!(waited >= Duration::from_millis(10));
    }

    #[test]
    fn runs_until_predicate_stops() {
        let mut remaining = 3;
        let cycles = run(Duration::ZERO, || {
            remaining -= 1;
            remaining > 0
        });
        assert_eq!(cycles, 3);
        assert_eq!(remaining, 0);
    }
}
