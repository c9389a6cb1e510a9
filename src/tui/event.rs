use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::FetchError;
use crate::domain::HeadlinesResponse;
use crate::images::ImageLoaded;

/// Everything the UI loop reacts to. Background work reports back through
/// this type so that state is only ever mutated on the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    HeadlinesLoaded {
        generation: u64,
        result: Result<HeadlinesResponse, FetchError>,
    },
    ImageLoaded(ImageLoaded),
}

pub struct EventHandler {
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Start reading terminal input; a tick is emitted whenever `tick_rate`
    /// passes without input.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        spawn_input(tx.clone(), tick_rate);
        Self { tx, rx }
    }

    pub fn sender(&self) -> UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    /// An already queued event, without waiting.
    pub fn try_next(&mut self) -> Option<AppEvent> {
        self.rx.try_recv().ok()
    }
}

fn spawn_input(tx: UnboundedSender<AppEvent>, tick_rate: Duration) {
    thread::spawn(move || loop {
        let event = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(_) => AppEvent::Tick,
                Err(e) => {
                    tracing::error!("Terminal input error: {}", e);
                    return;
                }
            },
            Ok(false) => AppEvent::Tick,
            Err(e) => {
                tracing::error!("Terminal poll error: {}", e);
                return;
            }
        };

        if tx.send(event).is_err() {
            return;
        }
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    First,
    Last,
    OpenArticle,
    Refresh,
    Retry,
    None,
}
