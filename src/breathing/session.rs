//! Breathing session: owns the one live ticker task.
//!
//! The scheduled-task handle is owned here and is the only thing allowed to
//! cancel or replace itself. Starting while a ticker is active aborts the
//! prior one first, so there is never more than one decrement source;
//! stopping aborts any pending tick, so no callback mutates state after
//! stop.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::cycle::{BreathCycle, BreathPattern, BreathState};

/// Drives a [`BreathCycle`] with one tick per wall-clock second.
///
/// Must be used from within a tokio runtime: `start` spawns the ticker task.
#[derive(Debug)]
pub struct BreathingSession {
    cycle: Arc<Mutex<BreathCycle>>,
    ticker: Option<JoinHandle<()>>,
}

impl BreathingSession {
    pub fn new(pattern: BreathPattern) -> Self {
        Self {
            cycle: Arc::new(Mutex::new(BreathCycle::new(pattern))),
            ticker: None,
        }
    }

    pub fn state(&self) -> BreathState {
        self.cycle.lock().unwrap().snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.state().running
    }

    /// Start (or restart) the exercise from the initial configuration.
    ///
    /// Idempotent with respect to tick sources: any active ticker is
    /// aborted before the new one is spawned.
    pub fn start(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        self.cycle.lock().unwrap().start();

        let cycle = Arc::clone(&self.cycle);
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // Wall-clock cadence: never replay ticks missed while suspended.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a fresh interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut guard = cycle.lock().unwrap();
                if !guard.is_running() {
                    break;
                }
                guard.tick();
            }
        }));
    }

    /// Stop the exercise: abort the ticker and reset the cycle fully.
    pub fn stop(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        self.cycle.lock().unwrap().stop();
    }
}

impl Drop for BreathingSession {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breathing::cycle::BreathPhase;

    /// Advance the paused clock one second at a time so every interval tick
    /// is observed by the ticker task before the next advance.
    async fn advance_secs(n: u64) {
        for _ in 0..n {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_decrements_once_per_second() {
        let mut session = BreathingSession::new(BreathPattern::three_phase());
        session.start();
        tokio::task::yield_now().await;

        advance_secs(3).await;
        let state = session.state();
        assert!(state.running);
        assert_eq!(state.phase, BreathPhase::Inhale);
        assert_eq!(state.seconds_remaining, 1);

        advance_secs(1).await;
        let state = session.state();
        assert_eq!(state.phase, BreathPhase::Hold);
        assert_eq!(state.seconds_remaining, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_leaves_one_tick_source() {
        let mut session = BreathingSession::new(BreathPattern::three_phase());
        session.start();
        tokio::task::yield_now().await;
        advance_secs(2).await;

        // Restart: resets the cycle and replaces the ticker.
        session.start();
        tokio::task::yield_now().await;
        assert_eq!(session.state().seconds_remaining, 4);

        // One decrement per second; a leaked second ticker would double it.
        advance_secs(1).await;
        assert_eq!(session.state().seconds_remaining, 3);
        advance_secs(1).await;
        assert_eq!(session.state().seconds_remaining, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_resets_and_silences_ticks() {
        let mut session = BreathingSession::new(BreathPattern::three_phase());
        session.start();
        tokio::task::yield_now().await;
        advance_secs(5).await;

        session.stop();
        let state = session.state();
        assert!(!state.running);
        assert_eq!(state.phase, BreathPhase::Inhale);
        assert_eq!(state.seconds_remaining, 4);

        // No dangling callback may mutate state after stop.
        advance_secs(10).await;
        assert_eq!(session.state(), state);
    }
}
