use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind};
use log::warn;

pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Anything that can feed the app loop. The app pulls one event at a time.
pub trait EventSource {
    fn next(&mut self) -> io::Result<Event>;
}

/// Raw terminal input the event thread reads from.
pub trait TerminalInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<crossterm::event::Event>;
}

pub struct Crossterm;

impl TerminalInput for Crossterm {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<crossterm::event::Event> {
        event::read()
    }
}

/// Terminal-backed source: key presses plus one `Tick` per `tick_rate`.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self::with_input(Crossterm, tick_rate)
    }

    pub fn with_input<I: TerminalInput + Send + 'static>(mut input: I, tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || pump(&mut input, &tx, tick_rate));
        Self { rx }
    }
}

/// Forward key presses and emit ticks until the receiver hangs up or input fails.
/// The tick deadline is checked after every event, so a steady stream of keys
/// still yields a `Tick` once `tick_rate` has elapsed.
fn pump<I: TerminalInput>(input: &mut I, tx: &mpsc::Sender<Event>, tick_rate: Duration) {
    let mut last_tick = Instant::now();
    loop {
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        match input.poll(timeout) {
            Ok(true) => match input.read() {
                Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(Event::Key(key)).is_err() {
                        return;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("terminal read failed: {}", err);
                    return;
                }
            },
            Ok(false) => {}
            Err(err) => {
                warn!("terminal poll failed: {}", err);
                return;
            }
        }
        if last_tick.elapsed() >= tick_rate {
            if tx.send(Event::Tick).is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }
}

impl EventSource for EventHandler {
    fn next(&mut self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;

    /// Always has a key press waiting.
    struct Mashing;

    impl TerminalInput for Mashing {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(true)
        }

        fn read(&mut self) -> io::Result<crossterm::event::Event> {
            thread::sleep(Duration::from_micros(200));
            Ok(crossterm::event::Event::Key(KeyEvent::from(KeyCode::Left)))
        }
    }

    struct Broken;

    impl TerminalInput for Broken {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "tty gone"))
        }

        fn read(&mut self) -> io::Result<crossterm::event::Event> {
            unreachable!("read after failed poll")
        }
    }

    #[test]
    fn steady_key_traffic_still_ticks() {
        let mut handler = EventHandler::with_input(Mashing, Duration::from_millis(10));
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut keys = 0;
        let mut ticked = false;
        while Instant::now() < deadline {
            match handler.next().unwrap() {
                Event::Key(_) => keys += 1,
                Event::Tick => {
                    ticked = true;
                    break;
                }
            }
        }
        assert!(ticked, "no tick after {} keys", keys);
        assert!(keys > 0);
    }

    #[test]
    fn poll_failure_ends_the_source() {
        let mut handler = EventHandler::with_input(Broken, Duration::from_millis(10));
        assert!(handler.next().is_err());
    }
}
