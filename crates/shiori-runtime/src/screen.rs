//! Async screen actor.
//!
//! Owns a `HomeScreen` on a tokio task and exposes async methods that
//! communicate via channels. Page fetches and timers run in their own tasks
//! and report back through an internal channel, so the screen state is only
//! ever touched by the actor loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use shiori_api::CatalogSource;
use shiori_core::catalog::PageRequest;
use shiori_core::error::CatalogError;
use shiori_core::pagination::ScrollMetrics;
use shiori_core::screen::ScreenSettings;
use shiori_core::{CatalogEntry, Effect, EntryId, HomeScreen, Message, ScreenSnapshot};

use crate::RuntimeError;

/// Cloneable handle to a running screen actor.
#[derive(Clone)]
pub struct ScreenHandle {
    tx: mpsc::UnboundedSender<Command>,
    updates: watch::Receiver<ScreenSnapshot>,
}

/// Commands sent to the actor from outside.
enum Command {
    Dispatch(Message),
    Snapshot {
        reply: oneshot::Sender<ScreenSnapshot>,
    },
    FavoriteEntries {
        reply: oneshot::Sender<Vec<CatalogEntry>>,
    },
    Unmount {
        reply: oneshot::Sender<()>,
    },
}

impl ScreenHandle {
    /// Spawn a screen actor and start loading the first page.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S>(source: Arc<S>, settings: ScreenSettings) -> Self
    where
        S: CatalogSource + 'static,
    {
        let mut screen = HomeScreen::new(settings);
        let (tx, commands) = mpsc::unbounded_channel();
        let (internal_tx, internal) = mpsc::unbounded_channel();

        let effects = screen.update(Message::Mount);
        let (updates_tx, updates) = watch::channel(screen.snapshot());

        let mut actor = Actor {
            screen,
            source,
            page_size: settings.page_size,
            internal_tx,
            updates: updates_tx,
            search_timer: None,
            toast_timer: None,
        };
        actor.run_effects(effects);

        tokio::spawn(actor.run(commands, internal));
        Self { tx, updates }
    }

    fn dispatch(&self, message: Message) -> Result<(), RuntimeError> {
        self.tx
            .send(Command::Dispatch(message))
            .map_err(|_| RuntimeError::Closed)
    }

    pub fn set_query(&self, text: impl Into<String>) -> Result<(), RuntimeError> {
        self.dispatch(Message::QueryChanged(text.into()))
    }

    pub fn clear_query(&self) -> Result<(), RuntimeError> {
        self.dispatch(Message::ClearQuery)
    }

    pub fn toggle_favorite(&self, id: EntryId) -> Result<(), RuntimeError> {
        self.dispatch(Message::ToggleFavorite(id))
    }

    pub fn scrolled(&self, metrics: ScrollMetrics) -> Result<(), RuntimeError> {
        self.dispatch(Message::Scrolled(metrics))
    }

    pub fn retry(&self) -> Result<(), RuntimeError> {
        self.dispatch(Message::Retry)
    }

    /// Current state, after every command sent before this call.
    pub async fn snapshot(&self) -> Result<ScreenSnapshot, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Snapshot { reply })
            .map_err(|_| RuntimeError::Closed)?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }

    /// Loaded entries currently marked favorite.
    pub async fn favorite_entries(&self) -> Result<Vec<CatalogEntry>, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::FavoriteEntries { reply })
            .map_err(|_| RuntimeError::Closed)?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }

    /// Receiver that sees a new snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ScreenSnapshot> {
        self.updates.clone()
    }

    /// Wait for the first published state matching `predicate`.
    ///
    /// Only sees states published after the actor handled earlier commands
    /// if a [`ScreenHandle::snapshot`] call was awaited in between.
    pub async fn wait_until(
        &self,
        predicate: impl FnMut(&ScreenSnapshot) -> bool,
    ) -> Result<ScreenSnapshot, RuntimeError> {
        let mut rx = self.updates.clone();
        let snapshot = rx
            .wait_for(predicate)
            .await
            .map_err(|_| RuntimeError::Closed)?;
        Ok(snapshot.clone())
    }

    /// Wait until no page fetch is in flight and return that state.
    pub async fn wait_idle(&self) -> Result<ScreenSnapshot, RuntimeError> {
        self.wait_until(|s| !s.loading).await
    }

    /// Tear the screen down. Pending timers are cancelled and late
    /// responses are discarded.
    pub async fn unmount(&self) -> Result<(), RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Unmount { reply })
            .map_err(|_| RuntimeError::Closed)?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }
}

struct Actor<S> {
    screen: HomeScreen,
    source: Arc<S>,
    page_size: u32,
    internal_tx: mpsc::UnboundedSender<Message>,
    updates: watch::Sender<ScreenSnapshot>,
    search_timer: Option<JoinHandle<()>>,
    toast_timer: Option<JoinHandle<()>>,
}

impl<S> Actor<S>
where
    S: CatalogSource + 'static,
{
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut internal: mpsc::UnboundedReceiver<Message>,
    ) {
        loop {
            tokio::select! {
                biased;
                Some(message) = internal.recv() => self.dispatch(message),
                command = commands.recv() => match command {
                    Some(Command::Dispatch(message)) => self.dispatch(message),
                    Some(Command::Snapshot { reply }) => {
                        let _ = reply.send(self.screen.snapshot());
                    }
                    Some(Command::FavoriteEntries { reply }) => {
                        let _ = reply.send(self.screen.favorite_entries().cloned().collect());
                    }
                    Some(Command::Unmount { reply }) => {
                        self.shutdown();
                        let _ = reply.send(());
                        break;
                    }
                    None => {
                        self.shutdown();
                        break;
                    }
                },
            }
        }
        tracing::debug!("screen actor stopped");
    }

    fn dispatch(&mut self, message: Message) {
        let effects = self.screen.update(message);
        self.run_effects(effects);
        self.updates.send_replace(self.screen.snapshot());
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch(request) => self.spawn_fetch(request),
                Effect::ScheduleSearch { token, delay } => {
                    let task = self.spawn_timer(delay, Message::SearchTimerFired(token));
                    replace_timer(&mut self.search_timer, task);
                }
                Effect::ScheduleToastHide { id, delay } => {
                    let task = self.spawn_timer(delay, Message::ToastTimerFired(id));
                    replace_timer(&mut self.toast_timer, task);
                }
            }
        }
    }

    fn spawn_fetch(&self, request: PageRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.internal_tx.clone();
        let limit = self.page_size;
        tracing::info!(page = request.page, append = request.append, "loading catalog page");

        tokio::spawn(async move {
            let result = source
                .fetch_page(request.page, limit)
                .await
                .map_err(|e| CatalogError::Fetch(e.to_string()));
            if tx
                .send(Message::PageLoaded {
                    request_id: request.id,
                    result,
                })
                .is_err()
            {
                tracing::debug!(page = request.page, "screen gone, dropping page response");
            }
        });
    }

    fn spawn_timer(&self, delay: Duration, message: Message) -> JoinHandle<()> {
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(message);
        })
    }

    fn shutdown(&mut self) {
        self.screen.update(Message::Unmount);
        for timer in [self.search_timer.take(), self.toast_timer.take()]
            .into_iter()
            .flatten()
        {
            timer.abort();
        }
        self.updates.send_replace(self.screen.snapshot());
    }
}

fn replace_timer(slot: &mut Option<JoinHandle<()>>, task: JoinHandle<()>) {
    if let Some(old) = slot.replace(task) {
        old.abort();
    }
}
