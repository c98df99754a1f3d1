//! Lesson loading: a lesson is an ordered step sequence authored in TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tutorial::StepDefinition;

/// Embedded default lesson for the Riemann-sum explorer.
const RIEMANN_LESSON: &str = include_str!("lessons/riemann.toml");

#[derive(Debug, Error)]
pub enum LessonError {
    #[error("failed to read lesson file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse lesson: {0}")]
    Parse(#[from] toml::de::Error),
}

/// An ordered step sequence. Read-only after loading; the engine never
/// mutates the step list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

impl Lesson {
    /// The built-in Riemann walkthrough.
    pub fn builtin() -> Result<Self, LessonError> {
        Self::from_toml_str(RIEMANN_LESSON)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, LessonError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LessonError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutorial::{Requirement, TargetTag};

    #[test]
    fn test_builtin_lesson_loads() {
        let lesson = Lesson::builtin().unwrap();
        assert_eq!(lesson.name, "Riemann sums, step by step");
        assert_eq!(lesson.len(), 7);
    }

    #[test]
    fn test_builtin_step_ids_are_sequential_and_unique() {
        let lesson = Lesson::builtin().unwrap();
        let ids: Vec<u32> = lesson.steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=7).collect::<Vec<u32>>());
    }

    #[test]
    fn test_builtin_partition_step_carries_baseline_predicate() {
        let lesson = Lesson::builtin().unwrap();
        let step = &lesson.steps[3];
        assert_eq!(step.target, TargetTag::PartitionsSlider);
        assert_eq!(
            step.requirement,
            Some(Requirement::PartitionsChanged { baseline: 8 })
        );
        assert!(!step.is_observation_only);
    }

    #[test]
    fn test_builtin_observation_steps_have_no_gate() {
        let lesson = Lesson::builtin().unwrap();
        for step in &lesson.steps[..3] {
            assert!(step.is_observation_only, "step {} should observe", step.id);
        }
    }

    #[test]
    fn test_lesson_from_toml_str_with_custom_region() {
        let source = r#"
            name = "tiny"

            [[steps]]
            id = 1
            title = "look here"
            description = "a direct region lookup"
            target = "sum-readout"
        "#;
        let lesson = Lesson::from_toml_str(source).unwrap();
        assert_eq!(
            lesson.steps[0].target,
            TargetTag::Region("sum-readout".to_string())
        );
        assert!(lesson.steps[0].requirement.is_none());
    }

    #[test]
    fn test_malformed_lesson_is_a_parse_error() {
        let err = Lesson::from_toml_str("steps = 3").unwrap_err();
        assert!(matches!(err, LessonError::Parse(_)));
    }

    #[test]
    fn test_lesson_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson.toml");
        std::fs::write(&path, RIEMANN_LESSON).unwrap();
        let lesson = Lesson::from_path(&path).unwrap();
        assert_eq!(lesson.len(), 7);
    }
}
