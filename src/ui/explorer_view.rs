//! Explorer panels: the plot and its controls, styled according to the
//! tutorial's guard overlay.
//!
//! Highlighting and blocking are purely a matter of how each region is
//! drawn; the overlay value decides, and an empty overlay renders
//! everything in its normal style.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::explorer::{ApproximationRule, CurveFunction, ExplorerState};
use crate::tutorial::{GuardOverlay, RegionId};

/// Region names the explorer registers with the tutorial engine.
pub const REGION_CANVAS: &str = "canvas";
pub const REGION_PARTITIONS: &str = "partitions-slider";
pub const REGION_LIMITS: &str = "limits";
pub const REGION_APPROXIMATION: &str = "approximation-type";

pub fn render(
    frame: &mut Frame,
    explorer: &ExplorerState,
    overlay: &GuardOverlay,
    status: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Plot and sidebar
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Plot
            Constraint::Length(34), // Controls
        ])
        .split(chunks[0]);

    render_plot(frame, explorer, overlay, columns[0]);
    render_sidebar(frame, explorer, overlay, columns[1]);
    render_status_bar(frame, explorer, status, chunks[1]);
}

/// Border and title for a region, reflecting the overlay's verdict.
fn region_block(title: &str, region: &str, overlay: &GuardOverlay) -> Block<'static> {
    let id = RegionId::new(region);
    let block = Block::default().borders(Borders::ALL);
    if overlay.is_highlighted(&id) {
        block
            .title(format!(" ▸ {title} "))
            .border_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
    } else if overlay.is_blocked(&id) {
        block
            .title(format!(" {title} (locked) "))
            .border_style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
    } else {
        block
            .title(format!(" {title} "))
            .border_style(Style::default().fg(Color::Cyan))
    }
}

fn render_plot(frame: &mut Frame, explorer: &ExplorerState, overlay: &GuardOverlay, area: Rect) {
    let block = region_block("Plot", REGION_CANVAS, overlay);

    let lo = explorer.left_bound;
    let hi = explorer.right_bound;
    let margin = (hi - lo) * 0.1;
    let y_max = plot_y_max(explorer);
    let bars = explorer.bars();
    let function = explorer.function;

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds([lo - margin, hi + margin])
        .y_bounds([-0.5, y_max])
        .paint(move |ctx| {
            // Axis
            ctx.draw(&CanvasLine {
                x1: lo - margin,
                y1: 0.0,
                x2: hi + margin,
                y2: 0.0,
                color: Color::DarkGray,
            });

            // Approximation bars
            for bar in &bars {
                let right = bar.x + bar.width;
                ctx.draw(&CanvasLine {
                    x1: bar.x,
                    y1: 0.0,
                    x2: bar.x,
                    y2: bar.height_left,
                    color: Color::Green,
                });
                ctx.draw(&CanvasLine {
                    x1: right,
                    y1: 0.0,
                    x2: right,
                    y2: bar.height_right,
                    color: Color::Green,
                });
                ctx.draw(&CanvasLine {
                    x1: bar.x,
                    y1: bar.height_left,
                    x2: right,
                    y2: bar.height_right,
                    color: Color::Green,
                });
            }

            // Curve on top of the bars
            let samples = 120;
            let dx = (hi - lo) / f64::from(samples);
            for i in 0..samples {
                let x1 = lo + f64::from(i) * dx;
                let x2 = x1 + dx;
                ctx.draw(&CanvasLine {
                    x1,
                    y1: function.eval(x1),
                    x2,
                    y2: function.eval(x2),
                    color: Color::White,
                });
            }
        });

    frame.render_widget(canvas, area);
}

fn plot_y_max(explorer: &ExplorerState) -> f64 {
    let samples = 64;
    let dx = (explorer.right_bound - explorer.left_bound) / f64::from(samples);
    let mut max = 1.0_f64;
    for i in 0..=samples {
        let x = explorer.left_bound + f64::from(i) * dx;
        max = max.max(explorer.function.eval(x));
    }
    max + 0.5
}

fn render_sidebar(frame: &mut Frame, explorer: &ExplorerState, overlay: &GuardOverlay, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Partitions
            Constraint::Length(4), // Limits
            Constraint::Length(7), // Approximation rule
            Constraint::Length(4), // Function
            Constraint::Min(4),    // Sum readout
        ])
        .split(area);

    // Partitions
    let partitions = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("n = "),
            Span::styled(
                explorer.partitions.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "+/- to change",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(region_block("Partitions", REGION_PARTITIONS, overlay));
    frame.render_widget(partitions, chunks[0]);

    // Limits
    let limits = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("a = "),
            Span::styled(
                format!("{:.2}", explorer.left_bound),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  b = "),
            Span::styled(
                format!("{:.2}", explorer.right_bound),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(Span::styled(
            "[ ] and { } to move",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(region_block("Limits", REGION_LIMITS, overlay));
    frame.render_widget(limits, chunks[1]);

    // Approximation rule
    let mut rule_lines: Vec<Line> = ApproximationRule::all()
        .iter()
        .map(|rule| {
            if *rule == explorer.rule {
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(Color::Green)),
                    Span::styled(
                        rule.label(),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![
                    Span::styled("○ ", Style::default().fg(Color::DarkGray)),
                    Span::styled(rule.label(), Style::default().fg(Color::DarkGray)),
                ])
            }
        })
        .collect();
    rule_lines.push(Line::from(Span::styled(
        "m to cycle",
        Style::default().fg(Color::DarkGray),
    )));
    let rules = Paragraph::new(rule_lines).block(region_block(
        "Approximation",
        REGION_APPROXIMATION,
        overlay,
    ));
    frame.render_widget(rules, chunks[2]);

    // Function (part of the drawing surface's controls)
    let function = Paragraph::new(vec![
        Line::from(Span::styled(
            explorer.function.label(),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "f to cycle",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(region_block("Function", REGION_CANVAS, overlay));
    frame.render_widget(function, chunks[3]);

    // Sum readout (not interactive, never guarded)
    let sum = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Sum ≈ "),
            Span::styled(
                format!("{:.4}", explorer.approximate_sum()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("Δx = "),
            Span::styled(
                format!("{:.4}", explorer.delta_x()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ])
    .block(
        Block::default()
            .title(" Approximation ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(sum, chunks[4]);
}

fn render_status_bar(
    frame: &mut Frame,
    explorer: &ExplorerState,
    status: Option<&str>,
    area: Rect,
) {
    let mut spans = vec![
        Span::styled(" q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" help  "),
        Span::styled("t", Style::default().fg(Color::Yellow)),
        Span::raw(" tutorial  "),
    ];
    if explorer.animating {
        spans.push(Span::styled(
            "animating…",
            Style::default().fg(Color::Green),
        ));
    }
    if let Some(message) = status {
        spans.push(Span::styled(
            format!("  {message}"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
