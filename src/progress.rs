//! Coarse progress reporting, decoupled from the transform itself.
//!
//! A worker thread runs the transform and emits ordered (percent, label)
//! milestones over a channel; the driver renders them as they arrive. The
//! terminal event is appended by the driver's worker wrapper only after the
//! work closure has returned, so "complete" can never be shown while the
//! external tool is still running.

use std::thread;

use anyhow::{Result, anyhow};
use flume::Sender;

use crate::ui::progress::Bar;

/// One coarse progress milestone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 0..=100; 100 is the terminal event.
    pub percent: u8,
    pub label: String,
}

impl ProgressEvent {
    pub fn new(percent: u8, label: impl Into<String>) -> Self {
        Self { percent: percent.min(100), label: label.into() }
    }

    /// The final milestone, emitted strictly after the work has finished.
    pub fn finished() -> Self {
        Self::new(100, "Done")
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.percent >= 100
    }
}

/// Runs `work` on a worker thread while observing its progress events.
///
/// `work` receives a sender for intermediate milestones. Once it returns,
/// the terminal event is emitted and the channel closes, which ends the
/// observation loop. There is no cancellation: once started, the work runs
/// to completion or failure and the observer reflects the terminal state.
pub fn run<T, F>(work: F, mut observe: impl FnMut(&ProgressEvent)) -> Result<T>
where
    T: Send,
    F: FnOnce(&Sender<ProgressEvent>) -> Result<T> + Send,
{
    thread::scope(|scope| {
        let (tx, rx) = flume::unbounded::<ProgressEvent>();

        let worker = scope.spawn(move || {
            let outcome = work(&tx);
            // Terminal event only after the work (and with it the external
            // process) has fully finished.
            let _ = tx.send(ProgressEvent::finished());
            outcome
        });

        for event in rx.iter() {
            observe(&event);
        }

        worker.join().map_err(|_| anyhow!("transform worker panicked"))?
    })
}

/// Renders progress with an indicatif bar while `work` runs.
pub fn drive<T, F>(label: &str, work: F) -> Result<T>
where
    T: Send,
    F: FnOnce(&Sender<ProgressEvent>) -> Result<T> + Send,
{
    let bar = Bar::new(label);
    let outcome = run(work, |event| bar.update(event));
    bar.finish();
    outcome
}
