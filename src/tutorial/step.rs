//! Step definitions for guided lessons.
//!
//! A step is pure data: the engine never hard-codes per-step behavior. The
//! completion rule for a step travels with the step itself as a
//! [`Requirement`], so a lesson file fully determines what the learner must
//! do before the gate opens.

use serde::{Deserialize, Serialize};

use super::observer::ObservedState;

/// Symbolic reference to a UI region a step points at.
///
/// The set of known tags is closed; anything else is kept verbatim as a
/// direct region lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetTag {
    /// The plotted curve. Resolves to the drawing surface.
    FunctionCurve,
    /// The approximation rectangles. Also resolves to the drawing surface.
    Rectangles,
    /// The partition-count control.
    PartitionsSlider,
    /// The interval bounds control.
    Limits,
    /// The approximation-rule selector.
    ApproximationType,
    /// The tutorial guide itself. Resolves to no host region.
    Fairy,
    /// The completion screen. Resolves to no host region.
    Completion,
    /// Direct lookup by region name.
    Region(String),
}

impl From<String> for TargetTag {
    fn from(s: String) -> Self {
        match s.as_str() {
            "function-curve" => TargetTag::FunctionCurve,
            "rectangles" => TargetTag::Rectangles,
            "partitions-slider" => TargetTag::PartitionsSlider,
            "limits" => TargetTag::Limits,
            "approximation-type" => TargetTag::ApproximationType,
            "fairy" => TargetTag::Fairy,
            "completion" => TargetTag::Completion,
            _ => TargetTag::Region(s),
        }
    }
}

impl From<TargetTag> for String {
    fn from(tag: TargetTag) -> Self {
        match tag {
            TargetTag::FunctionCurve => "function-curve".to_string(),
            TargetTag::Rectangles => "rectangles".to_string(),
            TargetTag::PartitionsSlider => "partitions-slider".to_string(),
            TargetTag::Limits => "limits".to_string(),
            TargetTag::ApproximationType => "approximation-type".to_string(),
            TargetTag::Fairy => "fairy".to_string(),
            TargetTag::Completion => "completion".to_string(),
            TargetTag::Region(s) => s,
        }
    }
}

impl TargetTag {
    /// Tags that mark steps about the tutorial UI itself rather than the
    /// host application. They resolve to no region and suppress nothing.
    pub fn is_tutorial_ui(&self) -> bool {
        matches!(self, TargetTag::Fairy | TargetTag::Completion)
    }
}

/// Completion predicate for a step, evaluated against [`ObservedState`].
///
/// Each variant carries its own baseline: the value the learner is expected
/// to change away from. A field the host has not wired up yet reads as
/// "not satisfied", never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Requirement {
    /// Partition count moved off its baseline.
    PartitionsChanged { baseline: u32 },
    /// Partition count raised to at least `min`.
    PartitionsAtLeast { min: u32 },
    /// Either interval bound moved off its baseline.
    BoundsChanged { left: f64, right: f64 },
    /// A different function was selected.
    FunctionChanged { baseline: String },
    /// A different approximation rule was selected.
    ModeChanged { baseline: String },
    /// Animation/playback was started.
    AnimationStarted,
}

impl Requirement {
    /// Evaluate this predicate against a state snapshot.
    pub fn satisfied_by(&self, state: &ObservedState) -> bool {
        match self {
            Requirement::PartitionsChanged { baseline } => state
                .partition_count
                .is_some_and(|count| count != *baseline),
            Requirement::PartitionsAtLeast { min } => {
                state.partition_count.is_some_and(|count| count >= *min)
            }
            Requirement::BoundsChanged { left, right } => {
                match (state.left_bound, state.right_bound) {
                    (Some(lo), Some(hi)) => lo != *left || hi != *right,
                    _ => false,
                }
            }
            Requirement::FunctionChanged { baseline } => state
                .selected_function
                .as_deref()
                .is_some_and(|f| f != baseline),
            Requirement::ModeChanged { baseline } => state
                .approximation_mode
                .as_deref()
                .is_some_and(|m| m != baseline),
            Requirement::AnimationStarted => state.is_animating.unwrap_or(false),
        }
    }
}

/// Advisory card coordinates. Presentation-only; the engine ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

/// One unit of a guided lesson.
///
/// Immutable once loaded; referenced by 1-based index from the progression
/// controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Unique within the step sequence.
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Message shown in the guide's speech bubble.
    #[serde(default)]
    pub fairy_message: Option<String>,
    /// Optional hint revealed on request.
    #[serde(default)]
    pub hint: Option<String>,
    /// Short imperative describing what to do (or look at).
    #[serde(default)]
    pub action: Option<String>,
    /// Which UI region this step is about.
    pub target: TargetTag,
    #[serde(default)]
    pub position: Option<Position>,
    /// Completion predicate. Absent means the step never blocks navigation.
    #[serde(default)]
    pub requirement: Option<Requirement>,
    /// Observation steps demand no interaction and are always satisfied.
    #[serde(default)]
    pub is_observation_only: bool,
}

impl StepDefinition {
    /// Whether the learner must demonstrate an interaction before advancing.
    pub fn requires_interaction(&self) -> bool {
        !self.is_observation_only && self.requirement.is_some()
    }
}
