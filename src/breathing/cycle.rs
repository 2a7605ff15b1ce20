//! Breathing cycle state machine.
//!
//! A caller-driven state machine with no internal clock: the owner calls
//! `tick()` once per second while the exercise runs. The ticker that does so
//! lives in [`super::session`].
//!
//! ## State transitions
//!
//! ```text
//! inhale -> hold -> exhale -> (rest) -> inhale
//! ```
//!
//! Each phase counts `phase_secs` down to 1; the tick that observes 1
//! advances to the next phase in strict cycle order and resets the counter.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
    /// Empty-lungs pause, present only in the four-phase pattern.
    Rest,
}

impl BreathPhase {
    /// User-facing label shown inside the breathing circle.
    pub fn label(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Inspire",
            BreathPhase::Hold => "Segure",
            BreathPhase::Exhale => "Expire",
            BreathPhase::Rest => "Descanse",
        }
    }
}

/// Phase order and per-phase duration for one exercise configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathPattern {
    pub phases: Vec<BreathPhase>,
    /// Seconds spent in each phase.
    pub phase_secs: u8,
}

impl BreathPattern {
    /// The classic 4-4-4 box-less pattern: inhale, hold, exhale.
    pub fn three_phase() -> Self {
        Self {
            phases: vec![BreathPhase::Inhale, BreathPhase::Hold, BreathPhase::Exhale],
            phase_secs: 4,
        }
    }

    /// Box breathing: inhale, hold, exhale, rest.
    pub fn four_phase() -> Self {
        Self {
            phases: vec![
                BreathPhase::Inhale,
                BreathPhase::Hold,
                BreathPhase::Exhale,
                BreathPhase::Rest,
            ],
            phase_secs: 4,
        }
    }

    /// Ticks in one full cycle through every phase.
    pub fn cycle_len(&self) -> u32 {
        self.phases.len() as u32 * self.phase_secs as u32
    }
}

impl Default for BreathPattern {
    fn default() -> Self {
        Self::three_phase()
    }
}

/// Snapshot of the cycle for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathState {
    pub phase: BreathPhase,
    pub seconds_remaining: u8,
    pub running: bool,
}

/// The breathing cycle state machine. Transient: owned by the active
/// breathing session and discarded when the exercise stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathCycle {
    pattern: BreathPattern,
    phase_index: usize,
    seconds_remaining: u8,
    running: bool,
}

impl BreathCycle {
    pub fn new(pattern: BreathPattern) -> Self {
        let seconds_remaining = pattern.phase_secs;
        Self {
            pattern,
            phase_index: 0,
            seconds_remaining,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> BreathPhase {
        self.pattern.phases[self.phase_index]
    }

    pub fn seconds_remaining(&self) -> u8 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pattern(&self) -> &BreathPattern {
        &self.pattern
    }

    pub fn snapshot(&self) -> BreathState {
        BreathState {
            phase: self.phase(),
            seconds_remaining: self.seconds_remaining,
            running: self.running,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin from the initial configuration: first phase, full counter.
    pub fn start(&mut self) {
        self.phase_index = 0;
        self.seconds_remaining = self.pattern.phase_secs;
        self.running = true;
    }

    /// Full reset. No position is preserved.
    pub fn stop(&mut self) {
        self.phase_index = 0;
        self.seconds_remaining = self.pattern.phase_secs;
        self.running = false;
    }

    /// One wall-clock second elapsed. Returns the newly entered phase when
    /// the tick crosses a phase boundary.
    pub fn tick(&mut self) -> Option<BreathPhase> {
        if !self.running {
            return None;
        }
        if self.seconds_remaining > 1 {
            self.seconds_remaining -= 1;
            None
        } else {
            self.phase_index = (self.phase_index + 1) % self.pattern.phases.len();
            self.seconds_remaining = self.pattern.phase_secs;
            Some(self.phase())
        }
    }
}

impl Default for BreathCycle {
    fn default() -> Self {
        Self::new(BreathPattern::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tick_is_noop_while_stopped() {
        let mut cycle = BreathCycle::default();
        assert_eq!(cycle.tick(), None);
        assert_eq!(cycle.seconds_remaining(), 4);
    }

    #[test]
    fn four_ticks_advance_one_phase() {
        let mut cycle = BreathCycle::default();
        cycle.start();
        assert_eq!(cycle.phase(), BreathPhase::Inhale);

        for _ in 0..3 {
            assert_eq!(cycle.tick(), None);
        }
        assert_eq!(cycle.seconds_remaining(), 1);
        assert_eq!(cycle.tick(), Some(BreathPhase::Hold));
        assert_eq!(cycle.seconds_remaining(), 4);
    }

    #[test]
    fn three_phase_order_is_strict() {
        let mut cycle = BreathCycle::default();
        cycle.start();
        let mut entered = Vec::new();
        for _ in 0..12 {
            if let Some(phase) = cycle.tick() {
                entered.push(phase);
            }
        }
        assert_eq!(
            entered,
            vec![BreathPhase::Hold, BreathPhase::Exhale, BreathPhase::Inhale]
        );
    }

    #[test]
    fn four_phase_includes_rest() {
        let mut cycle = BreathCycle::new(BreathPattern::four_phase());
        cycle.start();
        for _ in 0..12 {
            cycle.tick();
        }
        assert_eq!(cycle.phase(), BreathPhase::Rest);
    }

    #[test]
    fn stop_resets_fully() {
        let mut cycle = BreathCycle::default();
        cycle.start();
        for _ in 0..6 {
            cycle.tick();
        }
        cycle.stop();
        assert!(!cycle.is_running());
        assert_eq!(cycle.phase(), BreathPhase::Inhale);
        assert_eq!(cycle.seconds_remaining(), 4);
    }

    #[test]
    fn restart_discards_position() {
        let mut cycle = BreathCycle::default();
        cycle.start();
        for _ in 0..5 {
            cycle.tick();
        }
        cycle.start();
        assert_eq!(cycle.phase(), BreathPhase::Inhale);
        assert_eq!(cycle.seconds_remaining(), 4);
    }

    proptest! {
        /// Cycle closure: after any whole number of full cycles the machine
        /// is back at its starting phase with a full counter.
        #[test]
        fn full_cycles_return_to_start(cycles in 1u32..50) {
            let mut cycle = BreathCycle::default();
            cycle.start();
            let ticks = cycle.pattern().cycle_len() * cycles;
            for _ in 0..ticks {
                cycle.tick();
            }
            prop_assert_eq!(cycle.phase(), BreathPhase::Inhale);
            prop_assert_eq!(cycle.seconds_remaining(), 4);
        }

        /// The counter never leaves [1, phase_secs] while running.
        #[test]
        fn seconds_stay_in_range(ticks in 0u32..200) {
            let mut cycle = BreathCycle::new(BreathPattern::four_phase());
            cycle.start();
            for _ in 0..ticks {
                cycle.tick();
                let secs = cycle.seconds_remaining();
                prop_assert!((1..=4).contains(&secs));
            }
        }
    }
}
