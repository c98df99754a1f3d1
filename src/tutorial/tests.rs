//! Engine-level tests for the tutorial façade.

use super::*;

fn step(id: u32, target: TargetTag, requirement: Option<Requirement>) -> StepDefinition {
    StepDefinition {
        id,
        title: format!("step {id}"),
        description: String::new(),
        fairy_message: None,
        hint: None,
        action: None,
        target,
        position: None,
        requirement,
        is_observation_only: false,
    }
}

fn observation_step(id: u32, target: TargetTag) -> StepDefinition {
    let mut s = step(id, target, None);
    s.is_observation_only = true;
    s
}

fn registry() -> RegionRegistry {
    let mut reg = RegionRegistry::new();
    reg.set_drawing_surface("canvas")
        .register("partitions-slider")
        .register("limits")
        .register("approximation-type");
    reg
}

fn three_step_tutorial() -> Tutorial {
    let steps = vec![
        observation_step(1, TargetTag::FunctionCurve),
        step(
            2,
            TargetTag::PartitionsSlider,
            Some(Requirement::PartitionsChanged { baseline: 8 }),
        ),
        step(3, TargetTag::Completion, None),
    ];
    Tutorial::new(steps, registry())
}

fn snapshot(count: u32) -> ObservedState {
    ObservedState {
        partition_count: Some(count),
        ..ObservedState::default()
    }
}

#[test]
fn test_new_tutorial_is_visible_on_first_step() {
    let tutorial = three_step_tutorial();
    assert!(tutorial.is_visible());
    assert_eq!(tutorial.step_index(), 1);
    assert_eq!(tutorial.current_step().map(|s| s.id), Some(1));
}

#[test]
fn test_observation_step_opens_gate_without_state() {
    let tutorial = three_step_tutorial();
    assert!(tutorial.can_advance());
}

#[test]
fn test_gate_closed_until_requirement_met() {
    let mut tutorial = three_step_tutorial();
    tutorial.observe(snapshot(8));
    tutorial.advance();
    assert_eq!(tutorial.step_index(), 2);
    assert!(!tutorial.can_advance());
    tutorial.observe(snapshot(12));
    assert!(tutorial.can_advance());
}

#[test]
fn test_step_change_resets_before_reevaluation() {
    let mut tutorial = three_step_tutorial();
    // Requirement already satisfied by the retained snapshot: entering the
    // step must evaluate it fresh, after the reset.
    tutorial.observe(snapshot(12));
    tutorial.advance();
    assert_eq!(tutorial.step_index(), 2);
    assert!(tutorial.can_advance());
}

#[test]
fn test_retreat_reenters_step_with_fresh_interaction_state() {
    let mut tutorial = three_step_tutorial();
    tutorial.observe(snapshot(8));
    tutorial.advance();
    tutorial.observe(snapshot(12));
    tutorial.advance();
    assert_eq!(tutorial.step_index(), 3);

    // Snapshot is back at the baseline before we return to step 2.
    tutorial.observe(snapshot(8));
    tutorial.retreat();
    assert_eq!(tutorial.step_index(), 2);
    assert!(!tutorial.requirement_met());
    assert!(!tutorial.can_advance());
}

#[test]
fn test_hint_resets_on_every_index_transition() {
    let mut tutorial = three_step_tutorial();
    tutorial.toggle_hint();
    assert!(tutorial.hint_visible());
    tutorial.advance();
    assert!(!tutorial.hint_visible());
}

#[test]
fn test_completion_is_terminal() {
    let mut tutorial = three_step_tutorial();
    tutorial.advance();
    tutorial.observe(snapshot(20));
    tutorial.advance();
    assert_eq!(tutorial.advance(), NavOutcome::Completed);
    assert!(tutorial.is_completed());
    assert!(tutorial.current_step().is_none());
    assert_eq!(tutorial.advance(), NavOutcome::Stayed);
    assert_eq!(tutorial.retreat(), NavOutcome::Stayed);
}

#[test]
fn test_overlay_follows_active_step() {
    let mut tutorial = three_step_tutorial();
    let overlay = tutorial.overlay();
    assert_eq!(overlay.highlighted, Some(RegionId::new("canvas")));
    assert!(overlay.blocked.is_empty()); // observation-only

    tutorial.advance();
    let overlay = tutorial.overlay();
    assert_eq!(overlay.highlighted, Some(RegionId::new("partitions-slider")));
    assert!(overlay.is_blocked(&RegionId::new("canvas")));
    // No stacking: the previous highlight is gone.
    assert!(!overlay.is_highlighted(&RegionId::new("canvas")));
}

#[test]
fn test_teardown_clears_all_markers() {
    let mut tutorial = three_step_tutorial();
    tutorial.advance(); // step 2 highlights and blocks
    assert!(!tutorial.overlay().is_empty());
    tutorial.hide();
    assert!(tutorial.overlay().is_empty());
}

#[test]
fn test_overlay_empty_after_completion() {
    let mut tutorial = three_step_tutorial();
    tutorial.advance();
    tutorial.observe(snapshot(12));
    tutorial.advance();
    tutorial.advance();
    assert!(tutorial.is_completed());
    assert!(tutorial.overlay().is_empty());
}

#[test]
fn test_empty_step_sequence_is_inert() {
    let mut tutorial = Tutorial::new(Vec::new(), registry());
    assert!(tutorial.current_step().is_none());
    assert!(!tutorial.can_advance());
    assert_eq!(tutorial.advance(), NavOutcome::Stayed);
    assert!(tutorial.overlay().is_empty());
}

#[test]
fn test_progress_percent() {
    let mut tutorial = three_step_tutorial();
    assert_eq!(tutorial.progress_percent(), 33);
    tutorial.advance();
    assert_eq!(tutorial.progress_percent(), 66);
}
