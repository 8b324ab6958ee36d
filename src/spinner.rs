//! Spinner runner: animate a status line while an action runs.
//!
//! The action runs on a scoped worker thread. The calling thread redraws the
//! spinner on every tick and waits for whichever comes first, the next tick
//! or the worker's completion signal. The worker is always joined before
//! [`Spinner::run`] returns, so nothing keeps writing after control returns
//! to the caller.
//!
//! There is no cancellation: once started the action runs to completion.

use std::panic;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

use crate::style::Context;

/// Braille animation frames.
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Default interval between frames.
pub const DEFAULT_TICK: Duration = Duration::from_millis(80);

/// A titled spinner, configured then consumed by [`Spinner::run`].
pub struct Spinner {
    ctx: Context,
    title: String,
    tick: Duration,
    target: ProgressDrawTarget,
}

impl Spinner {
    pub fn new(ctx: &Context, title: impl Into<String>) -> Self {
        Spinner {
            ctx: *ctx,
            title: title.into(),
            tick: DEFAULT_TICK,
            target: ProgressDrawTarget::stdout(),
        }
    }

    /// Interval between animation frames.
    pub fn tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Where the status line is drawn. Defaults to stdout.
    pub fn draw_target(mut self, target: ProgressDrawTarget) -> Self {
        self.target = target;
        self
    }

    /// Run `action` to completion while animating, and return its result
    /// untouched.
    ///
    /// The final line reads `✓ title` on `Ok` and `✗ title` on `Err`. A
    /// panic in `action` is re-raised on the calling thread after the
    /// worker has been joined.
    pub fn run<T, E, F>(self, action: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E> + Send,
        T: Send,
        E: Send,
    {
        let started = Instant::now();
        let bar = ProgressBar::with_draw_target(None, self.target);
        bar.set_style(
            ProgressStyle::with_template("{prefix} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(self.ctx.text(&self.title));

        let result = thread::scope(|scope| {
            let (done, finished) = mpsc::channel::<()>();
            let worker = scope.spawn(move || {
                let result = action();
                let _ = done.send(());
                result
            });

            let mut frame = 0;
            loop {
                bar.set_prefix(self.ctx.highlight(FRAMES[frame]));
                bar.tick();
                match finished.recv_timeout(self.tick) {
                    // Disconnected: the worker panicked before signalling
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => frame = (frame + 1) % FRAMES.len(),
                }
            }

            match worker.join() {
                Ok(result) => result,
                Err(payload) => {
                    bar.abandon();
                    panic::resume_unwind(payload)
                }
            }
        });

        let mark = match &result {
            Ok(_) => self.ctx.success("✓"),
            Err(_) => self.ctx.error("✗"),
        };
        bar.set_prefix(mark);
        bar.finish();

        debug!(
            title = %self.title,
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "spinner finished"
        );
        result
    }
}

/// Run `action` under a spinner titled `title`, drawn on stdout.
pub fn run<T, E, F>(ctx: &Context, title: &str, action: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send,
    T: Send,
    E: Send,
{
    Spinner::new(ctx, title).run(action)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::AssertUnwindSafe;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    enum Failure {
        Disk(u32),
    }

    fn quiet(title: &str) -> Spinner {
        Spinner::new(&Context::plain(), title)
            .tick(Duration::from_millis(2))
            .draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn success_value_is_returned() {
        let result: Result<u32, Failure> = quiet("counting").run(|| Ok(42));
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn error_is_returned_unchanged() {
        let result: Result<(), Failure> = quiet("writing").run(|| Err(Failure::Disk(7)));
        assert_eq!(result, Err(Failure::Disk(7)));
    }

    #[test]
    fn slow_action_outlives_several_ticks() {
        let result: Result<&str, Failure> = quiet("sleeping").run(|| {
            thread::sleep(Duration::from_millis(30));
            Ok("awake")
        });
        assert_eq!(result, Ok("awake"));
    }

    #[test]
    fn action_runs_exactly_once() {
        let calls = AtomicUsize::new(0);
        let _: Result<(), Failure> = quiet("once").run(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn action_may_borrow_caller_state() {
        let mut collected = Vec::new();
        let _: Result<(), Failure> = quiet("collecting").run(|| {
            collected.extend([1, 2, 3]);
            Ok(())
        });
        // The worker has been joined, so the borrow is over
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn worker_panic_reaches_the_caller() {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _: Result<(), Failure> = quiet("exploding").run(|| panic!("boom"));
        }));
        assert!(outcome.is_err());
    }

    #[test]
    fn frames_cycle_through_braille() {
        assert_eq!(FRAMES.len(), 10);
        assert!(FRAMES.iter().all(|f| f.chars().count() == 1));
    }
}
