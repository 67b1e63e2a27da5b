//! Debounce model for the checkout quantity input.
//!
//! The browser script emitted on the checkout page implements this exact
//! state machine: every input event (re)arms a timer, and only when the timer
//! runs out without further input is a checkout refresh triggered.
//!
//! ```text
//! Idle --input--> Pending(deadline = now + delay)
//! Pending --input--> Pending(deadline = now + delay)
//! Pending --deadline reached--> Idle, emit one refresh trigger
//! ```
//!
//! This module is the executable model of that script. The server never
//! debounces anything itself; it only reads [`DEFAULT_DELAY`] to configure the
//! script. [`Debouncer`] is the pure state machine, and [`spawn`] drives it on
//! a tokio task so the timing rules can be checked against paused time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// Idle time after the last input before a refresh is triggered.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(350);

/// Debouncer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No input waiting.
    Idle,
    /// Input received; a trigger fires at `deadline` unless more input arrives.
    Pending { deadline: Instant },
}

/// Debounce state machine.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    state: DebounceState,
}

impl Debouncer {
    /// Create an idle debouncer.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: DebounceState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> DebounceState {
        self.state
    }

    /// When the pending trigger fires, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Idle => None,
            DebounceState::Pending { deadline } => Some(deadline),
        }
    }

    /// Record an input event, cancelling and re-arming any pending timer.
    pub fn input(&mut self, now: Instant) {
        self.state = DebounceState::Pending {
            deadline: now + self.delay,
        };
    }

    /// Check the timer. Returns `true` exactly once per settled burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            DebounceState::Pending { deadline } if now >= deadline => {
                self.state = DebounceState::Idle;
                true
            }
            _ => false,
        }
    }
}

/// Handle to a running debounce task.
#[derive(Debug)]
pub struct DebounceHandle {
    inputs: mpsc::UnboundedSender<()>,
    triggers: mpsc::UnboundedReceiver<()>,
    task: JoinHandle<()>,
}

impl DebounceHandle {
    /// Feed one input event. Returns `false` if the task has stopped.
    pub fn input(&self) -> bool {
        self.inputs.send(()).is_ok()
    }

    /// Wait for the next refresh trigger.
    ///
    /// Returns `None` once the task has stopped.
    pub async fn next_trigger(&mut self) -> Option<()> {
        self.triggers.recv().await
    }

    /// Stop the task. A pending trigger is dropped.
    pub fn abort(&self) {
        self.task.abort();
    }
}

/// Spawn a debounce task on the current tokio runtime.
#[must_use]
pub fn spawn(delay: Duration) -> DebounceHandle {
    let (inputs, mut input_rx) = mpsc::unbounded_channel();
    let (trigger_tx, triggers) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        let mut debouncer = Debouncer::new(delay);

        loop {
            let deadline = debouncer.deadline();

            tokio::select! {
                event = input_rx.recv() => match event {
                    Some(()) => debouncer.input(Instant::now()),
                    None => break,
                },
                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if debouncer.poll(Instant::now()) {
                        tracing::debug!("Quantity input settled, triggering checkout refresh");
                        if trigger_tx.send(()).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    DebounceHandle {
        inputs,
        triggers,
        task,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::time::{sleep, timeout};

    use super::*;

    #[test]
    fn test_state_machine_rearms() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DEFAULT_DELAY);
        assert_eq!(debouncer.state(), DebounceState::Idle);

        debouncer.input(start);
        debouncer.input(start + Duration::from_millis(100));
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(450))
        );

        // The first arming would have fired here, but it was re-armed.
        assert!(!debouncer.poll(start + Duration::from_millis(350)));
        assert!(debouncer.poll(start + Duration::from_millis(450)));
        assert_eq!(debouncer.state(), DebounceState::Idle);
        assert!(!debouncer.poll(start + Duration::from_millis(900)));
    }

    #[test]
    fn test_idle_never_fires() {
        let mut debouncer = Debouncer::new(DEFAULT_DELAY);
        assert!(!debouncer.poll(Instant::now() + Duration::from_secs(60)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_single_trigger_after_last_input() {
        let mut handle = spawn(DEFAULT_DELAY);

        for i in 0..5 {
            if i > 0 {
                sleep(Duration::from_millis(50)).await;
            }
            assert!(handle.input());
        }
        let last_input = Instant::now();

        handle.next_trigger().await.unwrap();
        let waited = last_input.elapsed();
        assert!(waited >= Duration::from_millis(350), "fired early: {waited:?}");
        assert!(waited < Duration::from_millis(360), "fired late: {waited:?}");

        let second = timeout(Duration::from_secs(5), handle.next_trigger()).await;
        assert!(second.is_err(), "burst produced more than one trigger");
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_trigger_separately() {
        let mut handle = spawn(DEFAULT_DELAY);

        handle.input();
        handle.next_trigger().await.unwrap();

        sleep(Duration::from_secs(1)).await;
        handle.input();
        handle.next_trigger().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_stops_task() {
        let mut handle = spawn(DEFAULT_DELAY);
        handle.abort();
        assert_eq!(handle.next_trigger().await, None);
    }
}
