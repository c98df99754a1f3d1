use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::explorer::ExplorerState;
use crate::lesson::Lesson;
use crate::tutorial::{GuardOverlay, NavOutcome, RegionRegistry, Tutorial};
use crate::ui::explorer_view::{
    self, REGION_APPROXIMATION, REGION_CANVAS, REGION_LIMITS, REGION_PARTITIONS,
};
use crate::ui::{tutorial_card, HelpDialog};

/// Cadence for the partition-refinement animation.
const ANIMATION_FRAME: Duration = Duration::from_millis(150);

pub struct App {
    config: Config,
    explorer: ExplorerState,
    /// Loaded step sequence, kept so the tutorial can be restarted with
    /// fresh progression state.
    lesson: Lesson,
    tutorial: Option<Tutorial>,
    help_dialog: HelpDialog,
    should_quit: bool,
    /// Card entry emphasis deadline; cleared whenever the tutorial goes away
    bounce_until: Option<Instant>,
    /// Message shown in the status bar (e.g., after completion)
    status_message: Option<String>,
    last_animation_frame: Instant,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let lesson = match &config.lesson.path {
            Some(path) => Lesson::from_path(path)
                .with_context(|| format!("Failed to load lesson from {path}"))?,
            None => Lesson::builtin().context("Failed to load built-in lesson")?,
        };
        tracing::info!(lesson = %lesson.name, steps = lesson.len(), "lesson loaded");

        let explorer = ExplorerState::new(
            config.explorer.partitions,
            config.explorer.left_bound,
            config.explorer.right_bound,
        );

        let mut app = Self {
            explorer,
            lesson,
            tutorial: None,
            help_dialog: HelpDialog::new(),
            should_quit: false,
            bounce_until: None,
            status_message: None,
            last_animation_frame: Instant::now(),
            config,
        };

        if app.config.lesson.autostart {
            app.start_tutorial();
        }

        Ok(app)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            let overlay = self.overlay();
            let bounce = self.bounce_active();

            terminal.draw(|f| {
                explorer_view::render(f, &self.explorer, &overlay, self.status_message.as_deref());
                if let Some(tutorial) = &self.tutorial {
                    tutorial_card::render(f, tutorial, bounce);
                }
                self.help_dialog.render(f);
            })?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            self.run_animation_frame();
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Current guard overlay; empty when no tutorial is active.
    fn overlay(&self) -> GuardOverlay {
        self.tutorial
            .as_ref()
            .map_or_else(GuardOverlay::clear, Tutorial::overlay)
    }

    fn bounce_active(&self) -> bool {
        self.bounce_until.is_some_and(|until| Instant::now() < until)
    }

    fn start_bounce(&mut self) {
        self.bounce_until =
            Some(Instant::now() + Duration::from_millis(self.config.ui.card_bounce_ms));
    }

    /// Build a fresh tutorial over the loaded lesson.
    fn start_tutorial(&mut self) {
        let mut registry = RegionRegistry::new();
        registry.set_drawing_surface(REGION_CANVAS);
        registry.register(REGION_PARTITIONS);
        registry.register(REGION_LIMITS);
        registry.register(REGION_APPROXIMATION);

        let mut tutorial = Tutorial::new(self.lesson.steps.clone(), registry);
        tutorial.observe(self.explorer.observed());
        self.tutorial = Some(tutorial);
        self.status_message = None;
        self.start_bounce();
        tracing::info!("tutorial started");
    }

    /// Dismiss the tutorial. Dropping it clears every highlight and blocked
    /// marker on the next draw and cancels any pending bounce.
    fn dismiss_tutorial(&mut self) {
        if let Some(tutorial) = &mut self.tutorial {
            tutorial.hide();
        }
        self.tutorial = None;
        self.bounce_until = None;
        tracing::info!("tutorial dismissed");
    }

    fn handle_key(&mut self, code: KeyCode) {
        // Help swallows everything except its own toggle
        if self.help_dialog.visible {
            if matches!(code, KeyCode::Char('?') | KeyCode::Esc) {
                self.help_dialog.toggle();
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_dialog.toggle(),
            KeyCode::Char('t') => {
                if self.tutorial.is_some() {
                    self.dismiss_tutorial();
                } else {
                    self.start_tutorial();
                }
            }

            // Tutorial navigation
            KeyCode::Char('n') | KeyCode::Right => self.tutorial_advance(),
            KeyCode::Char('p') | KeyCode::Left => self.tutorial_retreat(),
            KeyCode::Char('h') => {
                if let Some(tutorial) = &mut self.tutorial {
                    tutorial.toggle_hint();
                }
            }

            // Explorer controls, subject to the guard
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.with_region(REGION_PARTITIONS, ExplorerState::increase_partitions);
            }
            KeyCode::Char('-') => {
                self.with_region(REGION_PARTITIONS, ExplorerState::decrease_partitions);
            }
            KeyCode::Char('[') => {
                self.with_region(REGION_LIMITS, |explorer| explorer.nudge_left_bound(-1));
            }
            KeyCode::Char(']') => {
                self.with_region(REGION_LIMITS, |explorer| explorer.nudge_left_bound(1));
            }
            KeyCode::Char('{') => {
                self.with_region(REGION_LIMITS, |explorer| explorer.nudge_right_bound(-1));
            }
            KeyCode::Char('}') => {
                self.with_region(REGION_LIMITS, |explorer| explorer.nudge_right_bound(1));
            }
            KeyCode::Char('f') => {
                self.with_region(REGION_CANVAS, ExplorerState::cycle_function);
            }
            KeyCode::Char('m') => {
                self.with_region(REGION_APPROXIMATION, ExplorerState::cycle_rule);
            }
            KeyCode::Char(' ') => {
                self.with_region(REGION_CANVAS, ExplorerState::toggle_animation);
            }
            _ => {}
        }
    }

    fn tutorial_advance(&mut self) {
        let Some(tutorial) = &mut self.tutorial else {
            return;
        };
        match tutorial.advance() {
            NavOutcome::StepChanged(step) => {
                tracing::debug!(step, "tutorial step changed");
                self.start_bounce();
            }
            NavOutcome::Completed => {
                self.status_message = Some("Lesson complete! Explore freely.".to_string());
                self.tutorial = None;
                self.bounce_until = None;
                tracing::info!("tutorial completed");
            }
            NavOutcome::Stayed => {}
        }
    }

    fn tutorial_retreat(&mut self) {
        let Some(tutorial) = &mut self.tutorial else {
            return;
        };
        if let NavOutcome::StepChanged(step) = tutorial.retreat() {
            tracing::debug!(step, "tutorial step changed");
            self.start_bounce();
        }
    }

    /// Apply a host mutation unless the tutorial has blocked its region,
    /// then feed the new snapshot to the observer.
    fn with_region(&mut self, region: &str, mutate: impl FnOnce(&mut ExplorerState)) {
        if self.overlay().is_blocked(&region.into()) {
            tracing::debug!(region, "input blocked by tutorial");
            return;
        }
        mutate(&mut self.explorer);
        self.notify_tutorial();
    }

    fn notify_tutorial(&mut self) {
        if let Some(tutorial) = &mut self.tutorial {
            tutorial.observe(self.explorer.observed());
        }
    }

    fn run_animation_frame(&mut self) {
        if !self.explorer.animating {
            return;
        }
        if self.last_animation_frame.elapsed() < ANIMATION_FRAME {
            return;
        }
        self.last_animation_frame = Instant::now();
        self.explorer.animation_tick();
        self.notify_tutorial();
    }
}
