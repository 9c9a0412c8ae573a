use crate::facts::Progress;
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::task::JoinHandle;

type ProgressCallback = Box<dyn Fn() -> (u64, u64, String) + Send + Sync>;

/// Refresh rate for progress updates (10 Hz).
const REFRESH_INTERVAL_MS: u64 = 100;

const DETERMINATE_TEMPLATE: &str = "{prefix:>10.bold.cyan} [{bar:25}] {msg}";
const DETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>10} [{bar:25}] {msg}";
const INDETERMINATE_TEMPLATE: &str = "{prefix:>10.bold.cyan} {spinner} {msg}";
const INDETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>10} {spinner} {msg}";

const SPINNER_FRAMES: &[&str] = &["-", "\\", "|", "/"];

#[derive(Debug)]
struct VisibilityState {
    visible_after: Instant,
    visible: AtomicBool,
}

/// Terminal progress bar on stderr that stays hidden for short runs.
///
/// The pipeline only hands over callbacks; a background task polls them and
/// redraws the bar once the initial delay has passed.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    state: Arc<VisibilityState>,
    callback: Arc<Mutex<ProgressCallback>>,
    refresh_task: Arc<JoinHandle<()>>,
    use_colors: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter; must be called from within a tokio runtime.
    ///
    /// The bar becomes visible only if work is still going on after `delay`.
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();

        let state = Arc::new(VisibilityState {
            visible_after: Instant::now() + delay,
            visible: AtomicBool::new(false),
        });

        let callback = Arc::new(Mutex::new(Box::new(|| (0u64, 0u64, String::new())) as ProgressCallback));

        Self {
            refresh_task: Arc::new(tokio::spawn(refresh_task(bar.clone(), Arc::clone(&state), Arc::clone(&callback)))),
            bar,
            state,
            callback,
            use_colors,
        }
    }

    fn replace_callback(&self, callback: ProgressCallback) {
        if let Ok(mut guard) = self.callback.lock() {
            *guard = callback;
        }
    }

    fn style(&self, colored: &str, plain: &str, spinner: bool) -> Option<ProgressStyle> {
        let template = if self.use_colors { colored } else { plain };
        let style = if spinner { ProgressStyle::default_spinner() } else { ProgressStyle::default_bar() };
        style.template(template).ok()
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
    }

    fn set_determinate(&self, callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>) {
        self.replace_callback(callback);
        self.bar.disable_steady_tick();
        self.bar.set_length(0);
        self.bar.set_position(0);
        if let Some(style) = self.style(DETERMINATE_TEMPLATE, DETERMINATE_TEMPLATE_NO_COLOR, false) {
            self.bar.set_style(style.progress_chars("=> "));
        }
    }

    fn set_indeterminate(&self, callback: Box<dyn Fn() -> String + Send + Sync + 'static>) {
        self.replace_callback(Box::new(move || (0, 0, callback())));
        self.bar.enable_steady_tick(Duration::from_millis(REFRESH_INTERVAL_MS));
        if let Some(style) = self.style(INDETERMINATE_TEMPLATE, INDETERMINATE_TEMPLATE_NO_COLOR, true) {
            self.bar.set_style(style.tick_strings(SPINNER_FRAMES));
        }
    }

    fn done(&self) {
        self.refresh_task.abort();
        if self.state.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bar", &self.bar)
            .field("state", &self.state)
            .field("callback", &"<callback>")
            .field("use_colors", &self.use_colors)
            .finish_non_exhaustive()
    }
}

/// Background refresh task that periodically updates the progress bar.
async fn refresh_task(bar: ProgressBar, state: Arc<VisibilityState>, callback: Arc<Mutex<ProgressCallback>>) {
    let mut interval = tokio::time::interval(Duration::from_millis(REFRESH_INTERVAL_MS));
    #[expect(clippy::infinite_loop, reason = "task runs until aborted")]
    loop {
        let _ = interval.tick().await;

        if !state.visible.load(Ordering::Relaxed) && Instant::now() >= state.visible_after {
            state.visible.store(true, Ordering::Relaxed);
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }

        if !state.visible.load(Ordering::Relaxed) {
            continue;
        }

        let Ok((length, position, message)) = callback.lock().map(|cb| cb()) else {
            continue;
        };

        if length > 0 {
            bar.set_length(length);
            bar.set_position(position);
        }
        bar.set_message(message);
    }
}
