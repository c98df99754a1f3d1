//! Centralized keyboard shortcuts registry.
//!
//! Single source of truth for all keyboard shortcuts in the explorer TUI,
//! consumed by `HelpDialog` for displaying help text and by the footer
//! hints on the tutorial card.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., an arrow-key variant)
    pub alt_key: Option<KeyCode>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    /// Category for grouping in help
    pub category: ShortcutCategory,
    /// Context where this shortcut is active
    pub context: ShortcutContext,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Explorer,
    Tutorial,
}

/// Contexts where shortcuts are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Always active
    Global,
    /// Active while the tutorial overlay is shown
    TutorialCard,
}

impl ShortcutCategory {
    /// Display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Explorer => "Explorer",
            ShortcutCategory::Tutorial => "Tutorial",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::General,
            ShortcutCategory::Explorer,
            ShortcutCategory::Tutorial,
        ]
    }
}

impl ShortcutContext {
    /// Display name for this context
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::Global => "Explorer",
            ShortcutContext::TutorialCard => "Tutorial",
        }
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "n/→")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Format key for help dialog (left-padded to 7 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<7}", self.key_display())
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        _ => format!("{:?}", key),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // === Global Context ===
    // General
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: None,
        description: "Quit",
        category: ShortcutCategory::General,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('?'),
        alt_key: None,
        description: "Toggle help",
        category: ShortcutCategory::General,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('t'),
        alt_key: None,
        description: "Show / dismiss the tutorial",
        category: ShortcutCategory::General,
        context: ShortcutContext::Global,
    },
    // Explorer controls
    Shortcut {
        key: KeyCode::Char('+'),
        alt_key: Some(KeyCode::Char('=')),
        description: "More partitions",
        category: ShortcutCategory::Explorer,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('-'),
        alt_key: None,
        description: "Fewer partitions",
        category: ShortcutCategory::Explorer,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('['),
        alt_key: Some(KeyCode::Char(']')),
        description: "Move left bound",
        category: ShortcutCategory::Explorer,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('{'),
        alt_key: Some(KeyCode::Char('}')),
        description: "Move right bound",
        category: ShortcutCategory::Explorer,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('f'),
        alt_key: None,
        description: "Cycle function",
        category: ShortcutCategory::Explorer,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('m'),
        alt_key: None,
        description: "Cycle approximation rule",
        category: ShortcutCategory::Explorer,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char(' '),
        alt_key: None,
        description: "Animate partition refinement",
        category: ShortcutCategory::Explorer,
        context: ShortcutContext::Global,
    },
    // === Tutorial Card Context ===
    Shortcut {
        key: KeyCode::Char('n'),
        alt_key: Some(KeyCode::Right),
        description: "Next step (when unlocked)",
        category: ShortcutCategory::Tutorial,
        context: ShortcutContext::TutorialCard,
    },
    Shortcut {
        key: KeyCode::Char('p'),
        alt_key: Some(KeyCode::Left),
        description: "Previous step",
        category: ShortcutCategory::Tutorial,
        context: ShortcutContext::TutorialCard,
    },
    Shortcut {
        key: KeyCode::Char('h'),
        alt_key: None,
        description: "Toggle hint",
        category: ShortcutCategory::Tutorial,
        context: ShortcutContext::TutorialCard,
    },
];

/// Get all shortcuts for a given context
pub fn shortcuts_for_context(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// Get shortcuts grouped by category for a given context
pub fn shortcuts_by_category_for_context(
    context: ShortcutContext,
) -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.context == context && s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display_with_alt() {
        let shortcut = Shortcut {
            key: KeyCode::Char('n'),
            alt_key: Some(KeyCode::Right),
            description: "Next step",
            category: ShortcutCategory::Tutorial,
            context: ShortcutContext::TutorialCard,
        };
        assert_eq!(shortcut.key_display(), "n/→");
    }

    #[test]
    fn test_space_key_displays_as_word() {
        let shortcut = Shortcut {
            key: KeyCode::Char(' '),
            alt_key: None,
            description: "Animate",
            category: ShortcutCategory::Explorer,
            context: ShortcutContext::Global,
        };
        assert_eq!(shortcut.key_display(), "Space");
    }

    #[test]
    fn test_every_context_has_shortcuts() {
        assert!(shortcuts_for_context(ShortcutContext::Global).count() > 0);
        assert!(shortcuts_for_context(ShortcutContext::TutorialCard).count() > 0);
    }
}
