use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Anything the runner can wait on for terminal input
pub trait AppEventSource: Send + 'static {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Events delivered over a channel. The terminal reader thread feeds one in
/// the binary; tests keep the sender and push scripted keys.
pub struct ChannelEventSource {
    rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }

    /// Spawn a thread translating crossterm events. Call only after raw mode is on.
    pub fn terminal() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // windows reports releases too
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    Some(AppEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => Some(AppEvent::Resize),
                Ok(_) => None,
                Err(e) => {
                    tracing::error!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if let Some(ev) = forwarded {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self::new(rx)
    }
}

impl AppEventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Pulls one event per step and measures the wall time between steps.
///
/// Timers downstream are fed the measured time, never a tick count, so a
/// burst of keys cannot stall a countdown.
pub struct Runner<E: AppEventSource> {
    events: E,
    tick_rate: Duration,
    last_step: Instant,
}

impl<E: AppEventSource> Runner<E> {
    pub fn new(events: E, tick_rate: Duration) -> Self {
        Self {
            events,
            tick_rate,
            last_step: Instant::now(),
        }
    }

    /// Wait up to one tick for input; yields `Tick` on timeout and once the
    /// source hangs up. The duration is the time since the previous step.
    pub fn step(&mut self) -> (AppEvent, Duration) {
        let event = self
            .events
            .recv_timeout(self.tick_rate)
            .unwrap_or(AppEvent::Tick);
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_step);
        self.last_step = now;
        (event, elapsed)
    }
}
