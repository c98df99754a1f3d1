//! Target resolution and interaction guarding.
//!
//! The guard never touches the UI. It resolves the active step's target
//! against the regions the host registered and produces a [`GuardOverlay`]
//! value; the presentation layer renders whatever the overlay says. Tearing
//! the tutorial down therefore clears every marker by construction: the
//! overlay becomes empty and the next draw has nothing to highlight or
//! block.

use std::collections::BTreeSet;
use std::fmt;

use super::step::{StepDefinition, TargetTag};

/// Name of an interactive UI region.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The host's declaration of its interactive regions.
///
/// The guard only ever sees this registry, never the UI tree itself. The
/// drawing surface is designated separately because two target tags
/// (`function-curve` and `rectangles`) alias it.
#[derive(Debug, Default, Clone)]
pub struct RegionRegistry {
    interactive: BTreeSet<RegionId>,
    drawing_surface: Option<RegionId>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interactive region. Registration is idempotent.
    pub fn register(&mut self, id: impl Into<RegionId>) -> &mut Self {
        self.interactive.insert(id.into());
        self
    }

    /// Designate the region both canvas-aliasing tags resolve to, and
    /// register it as interactive.
    pub fn set_drawing_surface(&mut self, id: impl Into<RegionId>) -> &mut Self {
        let id = id.into();
        self.interactive.insert(id.clone());
        self.drawing_surface = Some(id);
        self
    }

    /// All interactive regions, in stable order.
    pub fn interactive_regions(&self) -> impl Iterator<Item = &RegionId> {
        self.interactive.iter()
    }

    fn lookup(&self, name: &str) -> Option<RegionId> {
        self.interactive
            .iter()
            .find(|id| id.as_str() == name)
            .cloned()
    }

    /// Resolve a target tag to zero or one region.
    pub fn resolve(&self, target: &TargetTag) -> Option<RegionId> {
        match target {
            TargetTag::FunctionCurve | TargetTag::Rectangles => self.drawing_surface.clone(),
            TargetTag::PartitionsSlider => self.lookup("partitions-slider"),
            TargetTag::Limits => self.lookup("limits"),
            TargetTag::ApproximationType => self.lookup("approximation-type"),
            TargetTag::Fairy | TargetTag::Completion => None,
            TargetTag::Region(name) => self.lookup(name),
        }
    }
}

/// Declarative highlight/blocking state for the active step.
///
/// Recomputed from scratch on every step change, so markers never stack
/// across steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardOverlay {
    /// Region to visually emphasize, if the target resolved.
    pub highlighted: Option<RegionId>,
    /// Regions whose input must be suppressed.
    pub blocked: BTreeSet<RegionId>,
}

impl GuardOverlay {
    /// The empty overlay: nothing highlighted, nothing blocked.
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn is_highlighted(&self, id: &RegionId) -> bool {
        self.highlighted.as_ref() == Some(id)
    }

    pub fn is_blocked(&self, id: &RegionId) -> bool {
        self.blocked.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.highlighted.is_none() && self.blocked.is_empty()
    }
}

/// Compute the overlay for one step.
///
/// Highlighting fails open (an unresolved target just highlights nothing);
/// blocking fails closed (every other interactive region is still
/// suppressed). Observation-only steps and steps about the tutorial UI
/// itself suppress nothing, since the learner is only meant to look.
pub fn overlay_for(step: &StepDefinition, registry: &RegionRegistry) -> GuardOverlay {
    let highlighted = registry.resolve(&step.target);

    if step.is_observation_only || step.target.is_tutorial_ui() {
        return GuardOverlay {
            highlighted,
            blocked: BTreeSet::new(),
        };
    }

    let blocked = registry
        .interactive_regions()
        .filter(|id| Some(*id) != highlighted.as_ref())
        .cloned()
        .collect();

    GuardOverlay {
        highlighted,
        blocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutorial::step::Requirement;

    fn registry() -> RegionRegistry {
        let mut reg = RegionRegistry::new();
        reg.set_drawing_surface("canvas")
            .register("partitions-slider")
            .register("limits")
            .register("approximation-type");
        reg
    }

    fn step(target: TargetTag, observation_only: bool) -> StepDefinition {
        StepDefinition {
            id: 1,
            title: String::new(),
            description: String::new(),
            fairy_message: None,
            hint: None,
            action: None,
            target,
            position: None,
            requirement: Some(Requirement::PartitionsChanged { baseline: 8 }),
            is_observation_only: observation_only,
        }
    }

    #[test]
    fn test_canvas_tags_alias_drawing_surface() {
        let reg = registry();
        let surface = Some(RegionId::new("canvas"));
        assert_eq!(reg.resolve(&TargetTag::FunctionCurve), surface);
        assert_eq!(reg.resolve(&TargetTag::Rectangles), surface);
    }

    #[test]
    fn test_tutorial_ui_tags_resolve_to_nothing() {
        let reg = registry();
        assert_eq!(reg.resolve(&TargetTag::Fairy), None);
        assert_eq!(reg.resolve(&TargetTag::Completion), None);
    }

    #[test]
    fn test_blocks_everything_but_the_target() {
        let overlay = overlay_for(&step(TargetTag::PartitionsSlider, false), &registry());
        assert_eq!(overlay.highlighted, Some(RegionId::new("partitions-slider")));
        assert!(!overlay.is_blocked(&RegionId::new("partitions-slider")));
        assert!(overlay.is_blocked(&RegionId::new("canvas")));
        assert!(overlay.is_blocked(&RegionId::new("limits")));
        assert!(overlay.is_blocked(&RegionId::new("approximation-type")));
    }

    #[test]
    fn test_observation_only_blocks_nothing() {
        let overlay = overlay_for(&step(TargetTag::FunctionCurve, true), &registry());
        assert_eq!(overlay.highlighted, Some(RegionId::new("canvas")));
        assert!(overlay.blocked.is_empty());
    }

    #[test]
    fn test_fairy_step_blocks_nothing() {
        let overlay = overlay_for(&step(TargetTag::Fairy, false), &registry());
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_unresolved_target_fails_open_on_highlight_closed_on_blocking() {
        let overlay = overlay_for(
            &step(TargetTag::Region("no-such-region".to_string()), false),
            &registry(),
        );
        assert_eq!(overlay.highlighted, None);
        // Blocking still proceeds for every registered region.
        assert_eq!(overlay.blocked.len(), 4);
    }

    #[test]
    fn test_direct_region_lookup() {
        let mut reg = registry();
        reg.register("sum-readout");
        let overlay = overlay_for(&step(TargetTag::Region("sum-readout".to_string()), false), &reg);
        assert_eq!(overlay.highlighted, Some(RegionId::new("sum-readout")));
        assert!(!overlay.is_blocked(&RegionId::new("sum-readout")));
    }
}
