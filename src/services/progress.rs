use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// First visible jump so the bar registers immediately.
pub const KICKOFF_PCT: u32 = 12;
/// Tick cadence while work is in flight.
pub const STEP_MS: u64 = 80;
/// Creep ceiling until the work actually finishes.
pub const MAX_BEFORE_FINISH: u32 = 90;
/// The bar stays visible at least this long, however fast the work was.
pub const MIN_VISIBLE_MS: u64 = 650;

/// Eased loading-bar model. Pure over injected instants so the step
/// sequence and the minimum-visibility wait are unit-testable.
#[derive(Debug)]
pub struct LoadingBar {
    started: Instant,
    progress: u32,
}

impl LoadingBar {
    pub fn start(now: Instant) -> Self {
        Self {
            started: now,
            progress: KICKOFF_PCT,
        }
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Advance by 12% of the remaining distance (at least one point),
    /// capped at `MAX_BEFORE_FINISH`.
    pub fn tick(&mut self) -> u32 {
        let remaining = MAX_BEFORE_FINISH.saturating_sub(self.progress);
        let step = ((remaining as f64) * 0.12).ceil() as u32;
        self.progress = (self.progress + step.max(1)).min(MAX_BEFORE_FINISH);
        self.progress
    }

    /// How much longer the bar must stay up before finishing at 100%.
    pub fn finish_wait(&self, now: Instant) -> Duration {
        Duration::from_millis(MIN_VISIBLE_MS).saturating_sub(now.duration_since(self.started))
    }
}

fn draw(pct: u32) {
    let filled = (pct as usize).min(100) / 5;
    eprint!("\r[{}{}] {:>3}%", "#".repeat(filled), "-".repeat(20 - filled), pct);
    let _ = std::io::stderr().flush();
}

/// Run `work` while a ticker animates the bar on stderr. Disabled (e.g.
/// for `--json` runs) this is a plain call with no output and no delay;
/// enabled, the call does not return before the minimum visible duration
/// has elapsed.
pub fn with_progress<T>(enabled: bool, work: impl FnOnce() -> T) -> T {
    if !enabled {
        return work();
    }

    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    let ticker = thread::spawn(move || {
        let mut bar = LoadingBar::start(Instant::now());
        draw(bar.progress());
        while !flag.load(Ordering::Relaxed) {
            thread::sleep(Duration::from_millis(STEP_MS));
            draw(bar.tick());
        }
        thread::sleep(bar.finish_wait(Instant::now()));
        draw(100);
        eprintln!();
    });

    let out = work();
    stop.store(true, Ordering::Relaxed);
    let _ = ticker.join();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_a_visible_kick() {
        let bar = LoadingBar::start(Instant::now());
        assert_eq!(bar.progress(), KICKOFF_PCT);
    }

    #[test]
    fn creeps_monotonically_and_caps_at_ninety() {
        let mut bar = LoadingBar::start(Instant::now());
        let mut last = bar.progress();
        for _ in 0..100 {
            let next = bar.tick();
            assert!(next >= last);
            assert!(next <= MAX_BEFORE_FINISH);
            last = next;
        }
        assert_eq!(last, MAX_BEFORE_FINISH);
    }

    #[test]
    fn early_steps_are_larger_than_late_steps() {
        let mut bar = LoadingBar::start(Instant::now());
        let first_step = bar.tick() - KICKOFF_PCT;
        for _ in 0..30 {
            bar.tick();
        }
        let before = bar.progress();
        let late_step = bar.tick() - before;
        assert!(first_step >= late_step);
    }

    #[test]
    fn finish_waits_out_the_minimum_visible_duration() {
        let start = Instant::now();
        let bar = LoadingBar::start(start);
        let wait = bar.finish_wait(start + Duration::from_millis(100));
        assert_eq!(wait, Duration::from_millis(MIN_VISIBLE_MS - 100));
        let none = bar.finish_wait(start + Duration::from_millis(MIN_VISIBLE_MS + 1));
        assert_eq!(none, Duration::ZERO);
    }

    #[test]
    fn disabled_progress_runs_work_directly() {
        assert_eq!(with_progress(false, || 7), 7);
    }
}
