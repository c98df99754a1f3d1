//! Interaction observation: turning host state snapshots into a per-step
//! "requirement satisfied" signal.

use super::step::StepDefinition;

/// Read-only snapshot of the host application's state.
///
/// Every field is optional so a host that has not wired a value yet simply
/// leaves the corresponding requirement unsatisfied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservedState {
    pub partition_count: Option<u32>,
    pub left_bound: Option<f64>,
    pub right_bound: Option<f64>,
    pub selected_function: Option<String>,
    pub approximation_mode: Option<String>,
    pub is_animating: Option<bool>,
}

/// Tracks whether the active step's requirement has been met.
///
/// Satisfaction is sticky: once true it stays true until the step changes,
/// so a learner cannot lose credit by moving a control back to its baseline.
#[derive(Debug, Default)]
pub struct InteractionObserver {
    satisfied: bool,
}

impl InteractionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current satisfaction signal for the active step.
    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    /// Clear the signal. Must run on every step change, before any snapshot
    /// is evaluated against the new step.
    pub fn reset(&mut self) {
        self.satisfied = false;
    }

    /// Re-evaluate against a fresh snapshot.
    ///
    /// Observation-only steps and steps without a requirement are always
    /// satisfied; no state inspection happens for them.
    pub fn observe(&mut self, step: &StepDefinition, state: &ObservedState) {
        if step.is_observation_only {
            self.satisfied = true;
            return;
        }
        let Some(requirement) = &step.requirement else {
            self.satisfied = true;
            return;
        };
        if self.satisfied {
            // Sticky: nothing short of a step change reverts the signal.
            return;
        }
        if requirement.satisfied_by(state) {
            tracing::debug!(step = step.id, "step requirement satisfied");
            self.satisfied = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutorial::step::{Requirement, TargetTag};

    fn interactive_step() -> StepDefinition {
        StepDefinition {
            id: 4,
            title: "Refine the partition".to_string(),
            description: String::new(),
            fairy_message: None,
            hint: None,
            action: None,
            target: TargetTag::PartitionsSlider,
            position: None,
            requirement: Some(Requirement::PartitionsChanged { baseline: 8 }),
            is_observation_only: false,
        }
    }

    fn snapshot(count: u32) -> ObservedState {
        ObservedState {
            partition_count: Some(count),
            ..ObservedState::default()
        }
    }

    #[test]
    fn test_starts_unsatisfied() {
        let observer = InteractionObserver::new();
        assert!(!observer.is_satisfied());
    }

    #[test]
    fn test_baseline_snapshot_does_not_satisfy() {
        let mut observer = InteractionObserver::new();
        observer.observe(&interactive_step(), &snapshot(8));
        assert!(!observer.is_satisfied());
    }

    #[test]
    fn test_satisfaction_is_sticky() {
        let mut observer = InteractionObserver::new();
        let step = interactive_step();
        observer.observe(&step, &snapshot(12));
        assert!(observer.is_satisfied());
        // Moving the control back must not revoke credit.
        observer.observe(&step, &snapshot(8));
        assert!(observer.is_satisfied());
    }

    #[test]
    fn test_reset_clears_signal() {
        let mut observer = InteractionObserver::new();
        let step = interactive_step();
        observer.observe(&step, &snapshot(12));
        observer.reset();
        assert!(!observer.is_satisfied());
    }

    #[test]
    fn test_observation_only_always_satisfied() {
        let mut observer = InteractionObserver::new();
        let mut step = interactive_step();
        step.is_observation_only = true;
        observer.observe(&step, &ObservedState::default());
        assert!(observer.is_satisfied());
    }

    #[test]
    fn test_no_requirement_always_satisfied() {
        let mut observer = InteractionObserver::new();
        let mut step = interactive_step();
        step.requirement = None;
        observer.observe(&step, &ObservedState::default());
        assert!(observer.is_satisfied());
    }

    #[test]
    fn test_missing_field_blocks_until_data_arrives() {
        let mut observer = InteractionObserver::new();
        let step = interactive_step();
        observer.observe(&step, &ObservedState::default());
        assert!(!observer.is_satisfied());
        observer.observe(&step, &snapshot(16));
        assert!(observer.is_satisfied());
    }
}
