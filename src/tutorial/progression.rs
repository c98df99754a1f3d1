//! Step progression: current index, navigation gating, and the terminal
//! completion transition.

/// Outcome of a navigation request.
///
/// These are the only outward signals the engine produces. A request the
/// gate (or the bounds) disallows is a silent no-op, reported as `Stayed`,
/// so the UI can let a learner press a disabled key without consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Nothing changed.
    Stayed,
    /// Moved to the given 1-based step index.
    StepChanged(usize),
    /// The lesson finished. Emitted exactly once, by advancing past the
    /// last step; there is no transition back out of this state.
    Completed,
}

/// Owns the current step index and the hint flag.
///
/// The index is 1-based and stays within `1..=len` while the lesson is
/// active. The gate itself (whether the active step's requirement is met)
/// is the caller's input: the controller only enforces it.
#[derive(Debug)]
pub struct ProgressionController {
    current: usize,
    len: usize,
    hint_visible: bool,
    completed: bool,
}

impl ProgressionController {
    pub fn new(len: usize) -> Self {
        Self {
            current: 1,
            len,
            hint_visible: false,
            completed: false,
        }
    }

    /// 1-based index of the active step.
    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.len
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Flip hint visibility. Has no effect on gating.
    pub fn toggle_hint(&mut self) {
        self.hint_visible = !self.hint_visible;
    }

    /// Advance by exactly one step, or complete the lesson from the last
    /// step. `gate_open` is the satisfaction signal for the active step;
    /// when it is false the request is silently ignored.
    pub fn advance(&mut self, gate_open: bool) -> NavOutcome {
        if self.completed || self.len == 0 || !gate_open {
            return NavOutcome::Stayed;
        }
        if self.current < self.len {
            self.current += 1;
            self.hint_visible = false;
            tracing::debug!(step = self.current, "advanced to step");
            NavOutcome::StepChanged(self.current)
        } else {
            self.completed = true;
            tracing::info!(steps = self.len, "lesson completed");
            NavOutcome::Completed
        }
    }

    /// Retreat by exactly one step. A no-op on the first step and after
    /// completion.
    pub fn retreat(&mut self) -> NavOutcome {
        if self.completed || self.current <= 1 {
            return NavOutcome::Stayed;
        }
        self.current -= 1;
        self.hint_visible = false;
        tracing::debug!(step = self.current, "returned to step");
        NavOutcome::StepChanged(self.current)
    }
}
