//! The host application: an interactive Riemann-sum approximation explorer.
//!
//! The explorer owns all of the state the tutorial observes (partition
//! count, interval bounds, selected function, approximation rule, animation
//! flag). The tutorial only ever reads snapshots of it via
//! [`ExplorerState::observed`].

use crate::tutorial::ObservedState;

pub const MIN_PARTITIONS: u32 = 1;
pub const MAX_PARTITIONS: u32 = 200;

/// Smallest interval width the bounds controls will allow.
const MIN_INTERVAL: f64 = 0.5;
const BOUND_STEP: f64 = 0.25;

/// Functions the learner can plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFunction {
    Parabola,
    Sine,
    Cubic,
}

impl CurveFunction {
    pub fn all() -> &'static [CurveFunction] {
        &[
            CurveFunction::Parabola,
            CurveFunction::Sine,
            CurveFunction::Cubic,
        ]
    }

    /// Stable identifier, used in observed state and lesson predicates.
    pub fn key(&self) -> &'static str {
        match self {
            CurveFunction::Parabola => "parabola",
            CurveFunction::Sine => "sine",
            CurveFunction::Cubic => "cubic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CurveFunction::Parabola => "f(x) = x²/4 + 1",
            CurveFunction::Sine => "f(x) = sin(x) + 2",
            CurveFunction::Cubic => "f(x) = x³/16 + 2",
        }
    }

    /// Evaluate the function. All three are kept positive over sensible
    /// intervals so the rectangles render above the axis.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            CurveFunction::Parabola => x * x / 4.0 + 1.0,
            CurveFunction::Sine => x.sin() + 2.0,
            CurveFunction::Cubic => x * x * x / 16.0 + 2.0,
        }
    }

    fn next(self) -> Self {
        let all = Self::all();
        let index = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}

/// Rectangle-sum rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproximationRule {
    Left,
    Right,
    Midpoint,
    Trapezoid,
}

impl ApproximationRule {
    pub fn all() -> &'static [ApproximationRule] {
        &[
            ApproximationRule::Left,
            ApproximationRule::Right,
            ApproximationRule::Midpoint,
            ApproximationRule::Trapezoid,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            ApproximationRule::Left => "left",
            ApproximationRule::Right => "right",
            ApproximationRule::Midpoint => "midpoint",
            ApproximationRule::Trapezoid => "trapezoid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApproximationRule::Left => "Left endpoint",
            ApproximationRule::Right => "Right endpoint",
            ApproximationRule::Midpoint => "Midpoint",
            ApproximationRule::Trapezoid => "Trapezoid",
        }
    }

    fn next(self) -> Self {
        let all = Self::all();
        let index = all.iter().position(|r| *r == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}

/// One rectangle (or trapezoid) of the current approximation, in data
/// coordinates. Consumed by the plot renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumBar {
    pub x: f64,
    pub width: f64,
    /// Height at the left edge. Equal to `height_right` for the endpoint
    /// and midpoint rules.
    pub height_left: f64,
    pub height_right: f64,
}

/// Live state of the explorer. Defaults match the baselines of the built-in
/// lesson: 8 partitions over [-2, 4], parabola, left-endpoint rule.
#[derive(Debug, Clone)]
pub struct ExplorerState {
    pub partitions: u32,
    pub left_bound: f64,
    pub right_bound: f64,
    pub function: CurveFunction,
    pub rule: ApproximationRule,
    pub animating: bool,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            partitions: 8,
            left_bound: -2.0,
            right_bound: 4.0,
            function: CurveFunction::Parabola,
            rule: ApproximationRule::Left,
            animating: false,
        }
    }
}

impl ExplorerState {
    pub fn new(partitions: u32, left_bound: f64, right_bound: f64) -> Self {
        Self {
            partitions: partitions.clamp(MIN_PARTITIONS, MAX_PARTITIONS),
            left_bound,
            right_bound: right_bound.max(left_bound + MIN_INTERVAL),
            ..Self::default()
        }
    }

    /// Snapshot for the tutorial's interaction observer.
    pub fn observed(&self) -> ObservedState {
        ObservedState {
            partition_count: Some(self.partitions),
            left_bound: Some(self.left_bound),
            right_bound: Some(self.right_bound),
            selected_function: Some(self.function.key().to_string()),
            approximation_mode: Some(self.rule.key().to_string()),
            is_animating: Some(self.animating),
        }
    }

    pub fn increase_partitions(&mut self) {
        self.partitions = (self.partitions + 1).min(MAX_PARTITIONS);
    }

    pub fn decrease_partitions(&mut self) {
        self.partitions = self.partitions.saturating_sub(1).max(MIN_PARTITIONS);
    }

    pub fn nudge_left_bound(&mut self, delta_steps: i32) {
        let next = self.left_bound + f64::from(delta_steps) * BOUND_STEP;
        self.left_bound = next.min(self.right_bound - MIN_INTERVAL);
    }

    pub fn nudge_right_bound(&mut self, delta_steps: i32) {
        let next = self.right_bound + f64::from(delta_steps) * BOUND_STEP;
        self.right_bound = next.max(self.left_bound + MIN_INTERVAL);
    }

    pub fn cycle_function(&mut self) {
        self.function = self.function.next();
    }

    pub fn cycle_rule(&mut self) {
        self.rule = self.rule.next();
    }

    pub fn toggle_animation(&mut self) {
        self.animating = !self.animating;
    }

    /// One animation frame: grow the partition count until it saturates,
    /// then stop. Purely cosmetic; no tutorial semantics depend on it.
    pub fn animation_tick(&mut self) {
        if !self.animating {
            return;
        }
        if self.partitions >= MAX_PARTITIONS {
            self.animating = false;
        } else {
            self.increase_partitions();
        }
    }

    /// Width of one sub-interval.
    pub fn delta_x(&self) -> f64 {
        (self.right_bound - self.left_bound) / f64::from(self.partitions)
    }

    /// The bars of the current approximation, for rendering.
    pub fn bars(&self) -> Vec<SumBar> {
        let dx = self.delta_x();
        (0..self.partitions)
            .map(|i| {
                let x = self.left_bound + f64::from(i) * dx;
                let (height_left, height_right) = match self.rule {
                    ApproximationRule::Left => {
                        let h = self.function.eval(x);
                        (h, h)
                    }
                    ApproximationRule::Right => {
                        let h = self.function.eval(x + dx);
                        (h, h)
                    }
                    ApproximationRule::Midpoint => {
                        let h = self.function.eval(x + dx / 2.0);
                        (h, h)
                    }
                    ApproximationRule::Trapezoid => {
                        (self.function.eval(x), self.function.eval(x + dx))
                    }
                };
                SumBar {
                    x,
                    width: dx,
                    height_left,
                    height_right,
                }
            })
            .collect()
    }

    /// The approximate integral under the current rule.
    pub fn approximate_sum(&self) -> f64 {
        self.bars()
            .iter()
            .map(|bar| bar.width * (bar.height_left + bar.height_right) / 2.0)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_lesson_baselines() {
        let state = ExplorerState::default();
        assert_eq!(state.partitions, 8);
        assert_eq!(state.left_bound, -2.0);
        assert_eq!(state.right_bound, 4.0);
        assert_eq!(state.rule.key(), "left");
    }

    #[test]
    fn test_partitions_clamped_to_range() {
        let mut state = ExplorerState::default();
        state.partitions = MIN_PARTITIONS;
        state.decrease_partitions();
        assert_eq!(state.partitions, MIN_PARTITIONS);
        state.partitions = MAX_PARTITIONS;
        state.increase_partitions();
        assert_eq!(state.partitions, MAX_PARTITIONS);
    }

    #[test]
    fn test_bounds_keep_minimum_interval() {
        let mut state = ExplorerState::default();
        for _ in 0..100 {
            state.nudge_left_bound(1);
        }
        assert!(state.right_bound - state.left_bound >= MIN_INTERVAL);
        for _ in 0..100 {
            state.nudge_right_bound(-1);
        }
        assert!(state.right_bound - state.left_bound >= MIN_INTERVAL);
    }

    #[test]
    fn test_observed_snapshot_is_fully_populated() {
        let state = ExplorerState::default();
        let observed = state.observed();
        assert_eq!(observed.partition_count, Some(8));
        assert_eq!(observed.selected_function.as_deref(), Some("parabola"));
        assert_eq!(observed.approximation_mode.as_deref(), Some("left"));
        assert_eq!(observed.is_animating, Some(false));
    }

    #[test]
    fn test_bar_count_matches_partitions() {
        let state = ExplorerState::new(16, 0.0, 4.0);
        assert_eq!(state.bars().len(), 16);
    }

    #[test]
    fn test_midpoint_sum_converges_on_parabola() {
        // ∫ over [-2, 4] of x²/4 + 1 = (x³/12 + x) = (64/12 + 4) - (-8/12 - 2) = 12
        let coarse = ExplorerState::new(8, -2.0, 4.0);
        let mut fine = coarse.clone();
        fine.partitions = 200;
        let exact = 12.0;
        let coarse_err = (coarse_sum(&coarse) - exact).abs();
        let fine_err = (coarse_sum(&fine) - exact).abs();
        assert!(fine_err < coarse_err);
        assert!(fine_err < 0.05);
    }

    fn coarse_sum(state: &ExplorerState) -> f64 {
        let mut state = state.clone();
        state.rule = ApproximationRule::Midpoint;
        state.approximate_sum()
    }

    #[test]
    fn test_animation_saturates_and_stops() {
        let mut state = ExplorerState::default();
        state.partitions = MAX_PARTITIONS - 1;
        state.toggle_animation();
        state.animation_tick();
        assert_eq!(state.partitions, MAX_PARTITIONS);
        assert!(state.animating);
        state.animation_tick();
        assert!(!state.animating);
    }

    #[test]
    fn test_cycle_rule_round_trips() {
        let mut state = ExplorerState::default();
        let start = state.rule;
        for _ in 0..ApproximationRule::all().len() {
            state.cycle_rule();
        }
        assert_eq!(state.rule, start);
    }
}
