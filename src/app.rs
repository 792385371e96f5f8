use std::time::Instant;

use crossterm::event::{self, Event};
use log::{debug, info};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::config::{FRAME_INTERVAL, GameConfig, IDLE_POLL_INTERVAL, THEME};
use crate::error::AppError;
use crate::input::InputMapper;
use crate::renderer::RenderOptions;
use crate::session::{Control, LayerHandle, Phase, Session};
use crate::terminal_runtime::AppTerminal;
use crate::ui::hud::{PanelLayout, render_panel};
use crate::ui::menu::{IdleLayout, render_idle_screen};

/// Layouts for both screens at the current terminal size.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Layouts {
    idle: IdleLayout,
    panel: PanelLayout,
}

/// Event loop glue between the terminal, the input mapper and the session.
#[derive(Debug)]
pub struct App {
    config: GameConfig,
    session: Session,
    mapper: InputMapper,
    layouts: Layouts,
}

impl App {
    /// Creates an idle app laid out for a terminal of `size`.
    #[must_use]
    pub fn new(config: GameConfig, size: Rect) -> Self {
        Self {
            session: Session::new(&config),
            mapper: InputMapper::new(),
            layouts: compute_layouts(size, &config),
            config,
        }
    }

    /// Returns a handle that opens or closes the layer from outside the loop.
    #[must_use]
    pub fn handle(&self) -> LayerHandle {
        self.session.handle()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Recomputes cell size and control positions; the grid is unchanged.
    pub fn resize(&mut self, size: Rect) {
        if self.layouts.idle.area == size {
            return;
        }

        self.layouts = compute_layouts(size, &self.config);
        let viewport = self.layouts.panel.viewport;
        debug!(
            "resized to {}x{}, cell {}x{}",
            size.width, size.height, viewport.cell_cols, viewport.cell_rows
        );
    }

    /// Maps and applies one terminal event.
    pub fn handle_event(&mut self, event: Event, now: Instant) -> Control {
        let input = match event {
            Event::Key(key) => self.mapper.map_key(key),
            Event::Mouse(mouse) => {
                let target = match self.session.phase() {
                    Phase::Idle => self.layouts.idle.hit_test(mouse.column, mouse.row),
                    Phase::Running => Some(self.layouts.panel.hit_test(mouse.column, mouse.row)),
                };
                self.mapper.map_mouse(mouse, target)
            }
            Event::Resize(width, height) => {
                self.resize(Rect::new(0, 0, width, height));
                None
            }
            _ => None,
        };

        match input {
            Some(input) => self.session.handle_input(input, now),
            None => Control::Continue,
        }
    }

    /// Runs handle requests and the simulation for one display frame.
    pub fn frame(&mut self, now: Instant) -> usize {
        self.session.drain_commands(now);
        self.session.frame(now)
    }

    /// Draws the current screen.
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        self.resize(frame.area());

        match self.session.phase() {
            Phase::Idle => render_idle_screen(frame, &self.layouts.idle, &THEME),
            Phase::Running => render_panel(
                frame,
                &self.layouts.panel,
                self.session.grid(),
                RenderOptions {
                    grid_lines: self.config.grid_lines(),
                },
                &THEME,
            ),
        }
    }

    /// Runs the frame loop until the player quits.
    ///
    /// While the layer is visible the loop wakes every frame interval; while
    /// hidden it only wakes for input.
    pub fn run(&mut self, terminal: &mut AppTerminal) -> Result<(), AppError> {
        info!("event loop started");

        loop {
            self.frame(Instant::now());
            terminal.draw(|frame| self.draw(frame))?;

            let timeout = match self.session.phase() {
                Phase::Running => FRAME_INTERVAL,
                Phase::Idle => IDLE_POLL_INTERVAL,
            };

            if event::poll(timeout)? {
                let control = self.handle_event(event::read()?, Instant::now());
                if control == Control::Quit {
                    info!("quit requested");
                    return Ok(());
                }
            }
        }
    }
}

fn compute_layouts(size: Rect, config: &GameConfig) -> Layouts {
    Layouts {
        idle: IdleLayout::compute(size),
        panel: PanelLayout::compute(size, config.grid()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::apple::Apple;
    use crate::config::GameConfig;
    use crate::input::Direction;
    use crate::session::{Control, Phase};
    use crate::snake::Position;

    use super::App;

    const SIZE: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    fn app() -> App {
        let config = GameConfig::new(10, 8, true, Some(17)).expect("valid config");
        App::new(config, SIZE)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn reveal_button_click_opens_layer() {
        let mut app = app();
        let reveal = app.layouts.idle.reveal.area;

        app.handle_event(
            click(MouseEventKind::Down(MouseButton::Left), reveal.x, reveal.y),
            Instant::now(),
        );

        assert_eq!(app.session().phase(), Phase::Running);
    }

    #[test]
    fn backdrop_click_and_escape_close_layer() {
        let mut app = app();
        let now = Instant::now();

        app.handle_event(key(KeyCode::Enter), now);
        assert_eq!(app.session().phase(), Phase::Running);
        app.handle_event(click(MouseEventKind::Down(MouseButton::Left), 0, 0), now);
        assert_eq!(app.session().phase(), Phase::Idle);

        app.handle_event(key(KeyCode::Char(' ')), now);
        app.handle_event(key(KeyCode::Esc), now);
        assert_eq!(app.session().phase(), Phase::Idle);
    }

    #[test]
    fn direction_pad_and_swipe_steer_the_snake() {
        let mut app = app();
        let now = Instant::now();
        app.handle_event(key(KeyCode::Enter), now);
        app.session_mut().grid_mut().apple = Apple::at(Position { x: 0, y: 0 });

        let (_, down) = app.layouts.panel.pad[2];
        app.handle_event(
            click(MouseEventKind::Down(MouseButton::Left), down.area.x, down.area.y),
            now,
        );
        assert_eq!(
            app.session().grid().snake.pending_direction(),
            Some(Direction::Down)
        );

        app.frame(now + Duration::from_millis(125));
        assert_eq!(app.session().grid().snake.head(), Position { x: 5, y: 6 });

        let board = app.layouts.panel.viewport.board_rect();
        app.handle_event(
            click(MouseEventKind::Down(MouseButton::Left), board.x + 20, board.y + 5),
            now,
        );
        app.handle_event(
            click(MouseEventKind::Up(MouseButton::Left), board.x + 30, board.y + 6),
            now,
        );
        assert_eq!(
            app.session().grid().snake.pending_direction(),
            Some(Direction::Right)
        );
    }

    #[test]
    fn resize_keeps_logical_grid() {
        let mut app = app();

        app.handle_event(Event::Resize(40, 20), Instant::now());

        assert_eq!(app.layouts.panel.area, Rect::new(0, 0, 40, 20));
        assert_eq!(app.layouts.panel.viewport.cell_rows, 1);
        assert_eq!(app.session().grid().bounds().width, 10);
    }

    #[test]
    fn handle_requests_run_on_next_frame() {
        let mut app = app();
        let handle = app.handle();

        handle.open();
        assert_eq!(app.session().phase(), Phase::Idle);
        app.frame(Instant::now());
        assert_eq!(app.session().phase(), Phase::Running);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app();
        let now = Instant::now();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(app.handle_event(event.clone(), now), Control::Quit);
        app.handle_event(key(KeyCode::Enter), now);
        assert_eq!(app.handle_event(event, now), Control::Quit);
    }

    #[test]
    fn q_quits_only_from_idle_page() {
        let mut app = app();
        let now = Instant::now();

        app.handle_event(key(KeyCode::Enter), now);
        assert_eq!(app.handle_event(key(KeyCode::Char('q')), now), Control::Continue);
        assert_eq!(app.session().phase(), Phase::Running);

        app.handle_event(key(KeyCode::Esc), now);
        assert_eq!(app.handle_event(key(KeyCode::Char('q')), now), Control::Quit);
    }

    #[test]
    fn draw_shows_score_when_running() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("test terminal");

        app.handle_event(key(KeyCode::Enter), Instant::now());
        app.session_mut().grid_mut().score = 7;
        terminal
            .draw(|frame| app.draw(frame))
            .expect("draw succeeds");

        let status = app.layouts.panel.status;
        let buffer = terminal.backend().buffer();
        let row: String = (status.x..status.x + 8)
            .map(|x| buffer[(x, status.y)].symbol().to_owned())
            .collect();
        assert_eq!(row, "Score: 7");
    }
}
