use std::io;

use crossterm::event::KeyEvent;
use log::info;
use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::config::GameConfig;
use crate::event::{Event, EventSource};
use crate::game::{FrameBuffer, Session};
use crate::input::{map_key, Command};
use crate::ui;

pub struct App {
    pub should_quit: bool,
    pub session: Session,
    pub surface: FrameBuffer,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let surface = FrameBuffer::new(config.surface_width, config.surface_height);
        Self {
            should_quit: false,
            session: Session::new(config),
            surface,
        }
    }

    pub fn on_tick(&mut self) {
        if self.session.is_running() {
            self.session.advance_frame(&mut self.surface);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match map_key(key) {
            Some(Command::Quit) => self.should_quit = true,
            Some(Command::Start) => self.start(),
            Some(Command::Play(k)) => self.session.handle_key(k),
            None => {}
        }
    }

    /// Start control: begins a session and draws its first frame right away.
    pub fn start(&mut self) {
        if self.session.initialize() {
            self.session.advance_frame(&mut self.surface);
        }
    }

    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::Tick => self.on_tick(),
            Event::Key(key) => self.on_key(key),
        }
    }

    /// Draw, wait for the next event, dispatch; until quit is requested.
    pub fn run<B: Backend, E: EventSource>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, self))?;

            self.dispatch(events.next()?);

            if self.should_quit {
                info!("quit requested at score {}", self.session.score());
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crossterm::event::KeyCode;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::game::Phase;

    struct Scripted(VecDeque<Event>);

    impl Scripted {
        fn new(events: Vec<Event>) -> Self {
            Self(events.into())
        }
    }

    impl EventSource for Scripted {
        fn next(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script ended"))
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn ticks_do_nothing_before_start() {
        let mut app = App::new(GameConfig::default());
        app.dispatch(Event::Tick);
        app.dispatch(key(KeyCode::Char(' ')));
        assert_eq!(app.session.phase(), Phase::Idle);
        assert!(app.surface.ops().is_empty());
    }

    #[test]
    fn start_draws_the_first_frame() {
        let mut app = App::new(GameConfig::default());
        app.dispatch(key(KeyCode::Enter));
        assert_eq!(app.session.phase(), Phase::Running);
        assert_eq!(app.surface.rects().count(), 17);
        assert_eq!(app.session.aliens()[0].x, 52);

        // A second start while running is ignored.
        app.dispatch(key(KeyCode::Enter));
        assert_eq!(app.session.aliens()[0].x, 52);
    }

    #[test]
    fn keys_and_ticks_drive_the_session() {
        let mut app = App::new(GameConfig::default());
        app.dispatch(key(KeyCode::Enter));
        app.dispatch(key(KeyCode::Left));
        app.dispatch(key(KeyCode::Char(' ')));
        assert_eq!(app.session.player().x, 215);
        assert_eq!(app.session.bullets().len(), 1);

        app.dispatch(Event::Tick);
        assert_eq!(app.session.bullets()[0].y, 305);
    }

    #[test]
    fn run_renders_until_quit() {
        let mut app = App::new(GameConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut events = Scripted::new(vec![
            key(KeyCode::Enter),
            Event::Tick,
            Event::Tick,
            key(KeyCode::Char('q')),
        ]);

        app.run(&mut terminal, &mut events).unwrap();

        assert!(app.should_quit);
        assert_eq!(app.session.phase(), Phase::Running);
        let text = buffer_text(&terminal);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Lives: 3"));
    }

    #[test]
    fn run_surfaces_event_source_errors() {
        let mut app = App::new(GameConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut events = Scripted::new(vec![Event::Tick]);
        let err = app.run(&mut terminal, &mut events).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
