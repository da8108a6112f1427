//! Latest-request-wins fetch sequencing.
//!
//! Every fetch takes a [`Ticket`]. Issuing a new ticket cancels the previous one, and
//! a result is only applied when its ticket is still the latest. An earlier request
//! that resolves after a later one is therefore discarded instead of overwriting
//! fresher data.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

use super::BookingConfirmation;
use crate::error::Result;
use crate::model::{CatalogEntry, Color, Event, Manufacturer, NewsArticle};

/// One issued fetch generation.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    token: CancellationToken,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug, Default)]
struct SequencerState {
    generation: u64,
    current: Option<CancellationToken>,
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    state: Mutex<SequencerState>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SequencerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a new ticket, cancelling whichever request was in flight.
    pub fn begin(&self) -> Ticket {
        let mut state = self.lock();
        if let Some(previous) = state.current.take() {
            previous.cancel();
        }
        state.generation += 1;
        let token = CancellationToken::new();
        state.current = Some(token.clone());
        tracing::debug!(generation = state.generation, "issued fetch ticket");
        Ticket {
            generation: state.generation,
            token,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.lock().generation == ticket.generation && !ticket.is_cancelled()
    }

    /// Cancel the in-flight request, if any, without issuing a new one.
    pub fn cancel(&self) {
        if let Some(current) = self.lock().current.take() {
            current.cancel();
        }
    }

    /// Drive `fut` until it completes or the ticket is cancelled.
    pub async fn run<F: Future>(ticket: &Ticket, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = ticket.token.cancelled() => None,
            out = fut => Some(out),
        }
    }
}

/// Observable state of one data source.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    /// The request failed. Nothing retries automatically.
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// A sequencer paired with the state it guards.
#[derive(Debug, Default)]
pub struct Feed<T> {
    sequencer: RequestSequencer,
    state: Mutex<FetchState<T>>,
}

impl<T: Clone> Feed<T> {
    pub fn new() -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            state: Mutex::new(FetchState::Idle),
        }
    }

    fn state_lock(&self) -> MutexGuard<'_, FetchState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> FetchState<T> {
        self.state_lock().clone()
    }

    /// Issue a ticket and mark the feed as loading.
    pub fn begin(&self) -> Ticket {
        let ticket = self.sequencer.begin();
        *self.state_lock() = FetchState::Loading;
        ticket
    }

    /// Apply a result if `ticket` is still the latest. Returns whether it was applied.
    pub fn commit(&self, ticket: &Ticket, result: Result<T>) -> bool {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(generation = ticket.generation(), "discarding stale response");
            return false;
        }
        *self.state_lock() = match result {
            Ok(data) => FetchState::Loaded(data),
            Err(e) => {
                tracing::warn!(error = %e, "fetch failed");
                FetchState::Failed(e.to_string())
            }
        };
        true
    }

    /// Begin, await and commit in one step.
    pub async fn load<F>(&self, fut: F) -> bool
    where
        F: Future<Output = Result<T>>,
    {
        let ticket = self.begin();
        match RequestSequencer::run(&ticket, fut).await {
            Some(result) => self.commit(&ticket, result),
            None => false,
        }
    }

    /// Abort the in-flight request, leaving the last state in place.
    pub fn cancel(&self) {
        self.sequencer.cancel();
    }
}

/// One [`Feed`] per catalog data source. Everything fetching through the same
/// context shares these, so a newer request for a source supersedes an older one.
#[derive(Debug, Default)]
pub struct CatalogFeeds {
    pub cars: Feed<Vec<CatalogEntry>>,
    pub colors: Feed<Vec<Color>>,
    pub manufacturers: Feed<Vec<Manufacturer>>,
    pub events: Feed<Vec<Event>>,
    pub news: Feed<Vec<NewsArticle>>,
    pub bookings: Feed<BookingConfirmation>,
}

impl CatalogFeeds {
    pub fn new() -> Self {
        Self::default()
    }
}
