//! Resend cooldown timer

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::domain::entities::countdown::Countdown;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic one-second countdown running on a tokio task
///
/// Remaining seconds are published on a watch channel. The task stops by
/// itself at zero and is aborted when the timer is restarted, stopped or
/// dropped, so no tick is ever delivered after teardown.
#[derive(Debug)]
pub struct CooldownTimer {
    start: u32,
    sender: Arc<watch::Sender<u32>>,
    task: Option<JoinHandle<()>>,
}

impl CooldownTimer {
    /// Create an idle timer (remaining = 0) that restarts from `start`
    pub fn new(start: u32) -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            start,
            sender: Arc::new(sender),
            task: None,
        }
    }

    /// Seconds the timer restarts from
    pub fn start_value(&self) -> u32 {
        self.start
    }

    /// Seconds remaining
    pub fn remaining(&self) -> u32 {
        *self.sender.borrow()
    }

    /// Whether the countdown is still ticking
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Receive every change of the remaining seconds
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.sender.subscribe()
    }

    /// Reset to the start value and begin ticking
    ///
    /// Must be called from within a tokio runtime.
    pub fn restart(&mut self) {
        self.cancel();
        self.sender.send_replace(self.start);
        if self.start == 0 {
            return;
        }
        let sender = Arc::clone(&self.sender);
        let first_tick = Instant::now() + TICK_PERIOD;
        self.task = Some(tokio::spawn(run(Countdown::new(self.start), first_tick, sender)));
    }

    /// Cancel the countdown and drop to zero
    pub fn stop(&mut self) {
        self.cancel();
        self.sender.send_replace(0);
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for CooldownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Tick from `first_tick`, which is anchored to the restart rather than to
/// the first poll of the task
async fn run(mut countdown: Countdown, first_tick: Instant, sender: Arc<watch::Sender<u32>>) {
    let mut interval = time::interval_at(first_tick, TICK_PERIOD);
    loop {
        interval.tick().await;
        let remaining = countdown.tick();
        sender.send_replace(remaining);
        if remaining == 0 {
            tracing::debug!(event = "cooldown_finished", "Resend cooldown finished");
            break;
        }
    }
}
