//! The tutorial card: progress, guide message, action, hint, and
//! navigation affordances for the active step.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tutorial::Tutorial;

const CARD_WIDTH: u16 = 46;

/// Render the card for the active step, pinned to the top-left corner of
/// the frame. `bounce` applies the short entry emphasis after a step
/// change.
pub fn render(frame: &mut Frame, tutorial: &Tutorial, bounce: bool) {
    let Some(step) = tutorial.current_step() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    // Progress
    lines.push(Line::from(vec![
        Span::styled(
            format!("Step {} of {}", tutorial.step_index(), tutorial.step_count()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{}%", tutorial.progress_percent()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(progress_bar(
        tutorial.step_index(),
        tutorial.step_count(),
        CARD_WIDTH.saturating_sub(4) as usize,
    ));
    lines.push(Line::from(""));

    // Title and description
    lines.push(Line::from(Span::styled(
        step.title.clone(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(step.description.clone()));

    // Guide speech bubble
    if let Some(message) = &step.fairy_message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("\u{201c}{message}\u{201d}"),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Action box
    if let Some(action) = &step.action {
        lines.push(Line::from(""));
        let label = if step.is_observation_only {
            "Observe: "
        } else {
            "Action required: "
        };
        lines.push(Line::from(vec![
            Span::styled(
                label,
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::styled(action.clone(), Style::default().fg(Color::Blue)),
        ]));
        if step.is_observation_only {
            lines.push(Line::from(Span::styled(
                "Just look at the highlighted area, then continue.",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::ITALIC),
            )));
        } else if tutorial.requirement_met() {
            lines.push(Line::from(Span::styled(
                "Done! You can continue now.",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }
    }

    // Hint
    lines.push(Line::from(""));
    if tutorial.hint_visible() {
        match &step.hint {
            Some(hint) => lines.push(Line::from(Span::styled(
                format!("Hint: {hint}"),
                Style::default().fg(Color::Green),
            ))),
            None => lines.push(Line::from(Span::styled(
                "No specific hint here. Experiment freely!",
                Style::default().fg(Color::Green),
            ))),
        }
        lines.push(Line::from(Span::styled(
            "[h] hide hint",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[h] need a hint?",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Navigation footer
    lines.push(Line::from(""));
    lines.push(nav_footer(tutorial));

    let border_style = if bounce {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Magenta)
    };

    let title = if bounce { " * Tutorial * " } else { " Tutorial " };
    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    let area = card_area(frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(card, area);
}

/// Unicode progress strip, drawn inline so it flows with the card text.
fn progress_bar(current: usize, total: usize, width: usize) -> Line<'static> {
    if total == 0 || width == 0 {
        return Line::from("");
    }
    let filled = (current * width) / total;
    let bar: String = "█".repeat(filled) + &"░".repeat(width.saturating_sub(filled));
    Line::from(Span::styled(bar, Style::default().fg(Color::Yellow)))
}

fn nav_footer(tutorial: &Tutorial) -> Line<'static> {
    let back_style = if tutorial.step_index() > 1 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let next_style = if tutorial.can_advance() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let next_label = if tutorial.step_index() == tutorial.step_count() {
        " finish"
    } else {
        " next"
    };

    Line::from(vec![
        Span::styled("p", back_style),
        Span::styled(" back", back_style),
        Span::raw("   "),
        Span::styled("n", next_style),
        Span::styled(next_label, next_style),
    ])
}

/// Fixed placement: top-left corner, clear of the sidebar controls.
fn card_area(frame_area: Rect) -> Rect {
    let width = CARD_WIDTH.min(frame_area.width);
    let height = frame_area.height.saturating_sub(2).min(22);
    Rect::new(frame_area.x + 1, frame_area.y + 1, width, height)
}
