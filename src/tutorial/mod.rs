//! Guided tutorial engine.
//!
//! Three cooperating parts, all synchronous and single-threaded:
//!
//! - [`ProgressionController`] owns the 1-based step index and gates
//!   navigation.
//! - [`InteractionObserver`] folds host state snapshots into a sticky
//!   per-step satisfaction signal.
//! - The guard ([`overlay_for`]) resolves the active step's target region
//!   and produces the declarative highlight/blocking overlay.
//!
//! [`Tutorial`] wires them together and enforces the ordering contract:
//! a step change fully resets interaction and hint state before any
//! snapshot is evaluated against the new step.

pub mod guard;
pub mod observer;
pub mod progression;
pub mod step;

pub use guard::{overlay_for, GuardOverlay, RegionId, RegionRegistry};
pub use observer::{InteractionObserver, ObservedState};
pub use progression::{NavOutcome, ProgressionController};
pub use step::{Position, Requirement, StepDefinition, TargetTag};

#[cfg(test)]
mod tests;

/// The tutorial engine: step sequence, progression state, and guard.
///
/// Created when the tutorial becomes visible and discarded on dismissal or
/// completion; restarting a lesson means building a fresh `Tutorial`.
#[derive(Debug)]
pub struct Tutorial {
    steps: Vec<StepDefinition>,
    progression: ProgressionController,
    observer: InteractionObserver,
    registry: RegionRegistry,
    last_state: ObservedState,
    visible: bool,
}

impl Tutorial {
    pub fn new(steps: Vec<StepDefinition>, registry: RegionRegistry) -> Self {
        let progression = ProgressionController::new(steps.len());
        let mut tutorial = Self {
            steps,
            progression,
            observer: InteractionObserver::new(),
            registry,
            last_state: ObservedState::default(),
            visible: true,
        };
        tutorial.reevaluate();
        tutorial
    }

    /// The active step, or `None` when there is nothing to display (hidden,
    /// completed, empty sequence, or an index past the end).
    pub fn current_step(&self) -> Option<&StepDefinition> {
        if !self.visible || self.progression.is_completed() {
            return None;
        }
        self.steps.get(self.progression.current_step().wrapping_sub(1))
    }

    /// 1-based index of the active step.
    pub fn step_index(&self) -> usize {
        self.progression.current_step()
    }

    pub fn step_count(&self) -> usize {
        self.progression.step_count()
    }

    pub fn is_completed(&self) -> bool {
        self.progression.is_completed()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hint_visible(&self) -> bool {
        self.progression.hint_visible()
    }

    /// Whether the active step's demanded interaction has happened. Used by
    /// the presentation layer for the "you can continue" confirmation.
    pub fn requirement_met(&self) -> bool {
        self.observer.is_satisfied()
    }

    /// Completion fraction in `0..=100`.
    pub fn progress_percent(&self) -> u16 {
        let total = self.step_count();
        if total == 0 {
            return 0;
        }
        ((self.step_index() * 100) / total) as u16
    }

    /// Feed a fresh host state snapshot to the observer.
    pub fn observe(&mut self, state: ObservedState) {
        self.last_state = state;
        self.reevaluate();
    }

    /// The sole gate for forward navigation.
    pub fn can_advance(&self) -> bool {
        match self.current_step() {
            Some(step) => {
                step.is_observation_only
                    || step.requirement.is_none()
                    || self.observer.is_satisfied()
            }
            None => false,
        }
    }

    /// Request one step forward. Refused requests are silent no-ops.
    pub fn advance(&mut self) -> NavOutcome {
        let outcome = self.progression.advance(self.can_advance());
        if matches!(outcome, NavOutcome::StepChanged(_)) {
            self.on_step_changed();
        }
        outcome
    }

    /// Request one step back. A no-op on the first step.
    pub fn retreat(&mut self) -> NavOutcome {
        let outcome = self.progression.retreat();
        if matches!(outcome, NavOutcome::StepChanged(_)) {
            self.on_step_changed();
        }
        outcome
    }

    pub fn toggle_hint(&mut self) {
        self.progression.toggle_hint();
    }

    /// Highlight/blocking overlay for the active step. Empty once the
    /// tutorial is hidden or completed.
    pub fn overlay(&self) -> GuardOverlay {
        match self.current_step() {
            Some(step) => overlay_for(step, &self.registry),
            None => GuardOverlay::clear(),
        }
    }

    /// Tear the tutorial down. All region markers are cleared because the
    /// overlay is recomputed as empty from here on.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Reset first, then evaluate the retained snapshot against the newly
    /// active step. The order matters: stale satisfaction must never leak
    /// across a step change.
    fn on_step_changed(&mut self) {
        self.observer.reset();
        self.reevaluate();
    }

    fn reevaluate(&mut self) {
        // Split borrow: current step lookup must not hold `self`.
        let index = self.progression.current_step().wrapping_sub(1);
        if !self.visible || self.progression.is_completed() {
            return;
        }
        if let Some(step) = self.steps.get(index) {
            self.observer.observe(step, &self.last_state);
        }
    }
}
