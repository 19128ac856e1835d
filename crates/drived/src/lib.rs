//! Search session controller.
//!
//! One control starts a search and, while that search runs, cancels it. The controller
//! keeps that dual meaning out of the UI: [`SearchController::activate`] turns a press
//! into a [`Command`] based on the current [`SessionState`], and
//! [`SearchController::dispatch`] is the only place state changes on input.
//!
//! A session is split in two halves so the UI thread never blocks:
//! - [`SearchJob::run`] is the async half (resolve the drive, search, optional
//!   thumbnails) and owns nothing but a client handle and a [`CancellationToken`].
//! - [`SearchController::complete`] is the synchronous half that swaps in the new batch
//!   and always returns the session to `Idle`.

mod cancel;

use std::sync::Arc;

use drivecore_client::{DriveClient, DriveError, ThumbnailBytes, Thumbnails};
use drivecore_item::DriveItemResult;
use drivecore_results::{RenderedItem, ResultList};
use tracing::{debug, error, info};

pub use cancel::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlLabel {
    Search,
    Cancel,
}

impl ControlLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Cancel => "Cancel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Cancel,
}

pub enum Activation {
    Started(SearchJob),
    CancelRequested,
    Ignored,
}

#[derive(Debug)]
struct SearchSession {
    state: SessionState,
    generation: u64,
    query: String,
    cancel: CancellationToken,
}

impl SearchSession {
    fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.cancel = CancellationToken::new();
    }
}

/// The async half of one session.
///
/// Dropping a job without running it leaves the controller in `Searching`; feed whatever
/// `run` returns back into [`SearchController::complete`].
pub struct SearchJob {
    generation: u64,
    query: String,
    client: Arc<dyn DriveClient>,
    thumbnails: Thumbnails,
    cancel: CancellationToken,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    generation: u64,
    fetched: Fetched,
}

#[derive(Debug, Clone)]
enum Fetched {
    DriveUnavailable,
    Failed(DriveError),
    Results {
        items: Vec<DriveItemResult>,
        /// One entry per item whose thumbnail was requested before a cancel, in order.
        thumbnails: Option<Vec<Option<ThumbnailBytes>>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReport {
    Rendered {
        rendered: usize,
        total: usize,
        cancelled: bool,
    },
    NoResults,
    DriveUnavailable,
    Failed(DriveError),
    /// Outcome of a session that already ended; nothing was touched.
    Stale,
}

impl SearchJob {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub async fn run(self) -> SearchOutcome {
        let fetched = self.fetch().await;
        SearchOutcome {
            generation: self.generation,
            fetched,
        }
    }

    async fn fetch(&self) -> Fetched {
        let drive = match self.client.resolve_primary_drive().await {
            Ok(Some(drive)) => drive,
            Ok(None) => return Fetched::DriveUnavailable,
            Err(err) => return Fetched::Failed(err),
        };

        let items = match self.client.search(&drive, &self.query).await {
            Ok(items) => items.unwrap_or_default(),
            Err(err) => return Fetched::Failed(err),
        };

        if !self.thumbnails.is_enabled() || items.is_empty() {
            return Fetched::Results {
                items,
                thumbnails: None,
            };
        }

        let mut thumbnails = Vec::with_capacity(items.len());
        for item in &items {
            if self.cancel.is_cancelled() {
                break;
            }
            thumbnails.push(
                self.thumbnails
                    .fetch(self.client.as_ref(), &drive, &item.id)
                    .await,
            );
        }

        Fetched::Results {
            items,
            thumbnails: Some(thumbnails),
        }
    }
}

pub struct SearchController {
    client: Arc<dyn DriveClient>,
    thumbnails: Thumbnails,
    session: SearchSession,
    results: ResultList,
}

impl SearchController {
    pub fn new(client: Arc<dyn DriveClient>) -> Self {
        Self {
            client,
            thumbnails: Thumbnails::default(),
            session: SearchSession {
                state: SessionState::Idle,
                generation: 0,
                query: String::new(),
                cancel: CancellationToken::new(),
            },
            results: ResultList::new(),
        }
    }

    pub fn with_thumbnails(mut self, thumbnails: Thumbnails) -> Self {
        self.thumbnails = thumbnails;
        self
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn label(&self) -> ControlLabel {
        match self.session.state {
            SessionState::Idle => ControlLabel::Search,
            SessionState::Searching => ControlLabel::Cancel,
        }
    }

    pub fn cancel_requested(&self) -> bool {
        self.session.state == SessionState::Searching && self.session.cancel.is_cancelled()
    }

    /// Query of the current (or last) session.
    pub fn query(&self) -> &str {
        &self.session.query
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn clear_results(&mut self) -> usize {
        self.results.clear()
    }

    /// The search/cancel control was pressed with `query` in the text box.
    pub fn activate(&mut self, query: &str) -> Activation {
        let command = match self.session.state {
            SessionState::Searching => Command::Cancel,
            SessionState::Idle => Command::Submit(query.to_string()),
        };
        self.dispatch(command)
    }

    pub fn dispatch(&mut self, command: Command) -> Activation {
        match (self.session.state, command) {
            (SessionState::Searching, _) => {
                self.session.cancel.cancel();
                info!(query = %self.session.query, "search cancel requested");
                Activation::CancelRequested
            }
            (SessionState::Idle, Command::Cancel) => Activation::Ignored,
            (SessionState::Idle, Command::Submit(query)) => {
                if query.trim().is_empty() {
                    return Activation::Ignored;
                }
                Activation::Started(self.start(query))
            }
        }
    }

    fn start(&mut self, query: String) -> SearchJob {
        let session = &mut self.session;
        session.state = SessionState::Searching;
        session.generation = session.generation.wrapping_add(1);
        session.query = query.clone();
        session.cancel = CancellationToken::new();
        info!(generation = session.generation, query = %query, "search started");

        SearchJob {
            generation: session.generation,
            query,
            client: self.client.clone(),
            thumbnails: self.thumbnails,
            cancel: session.cancel.clone(),
        }
    }

    /// Applies a finished job. Every path except `Stale` leaves the session `Idle`.
    pub fn complete(&mut self, outcome: SearchOutcome) -> SessionReport {
        if self.session.state != SessionState::Searching
            || outcome.generation != self.session.generation
        {
            debug!(generation = outcome.generation, "dropping stale search outcome");
            return SessionReport::Stale;
        }

        let cancel = self.session.cancel.clone();
        let report = match outcome.fetched {
            Fetched::DriveUnavailable => {
                error!("can not resolve the primary drive, stopping search");
                SessionReport::DriveUnavailable
            }
            Fetched::Failed(err) => {
                error!(query = %self.session.query, "search failed: {err}");
                SessionReport::Failed(err)
            }
            Fetched::Results { items, .. } if items.is_empty() => SessionReport::NoResults,
            Fetched::Results { items, thumbnails } => {
                self.results.clear();
                let total = items.len();
                let rendered = match thumbnails {
                    // Items already went out for a thumbnail, so they count as shown
                    // even if the token was set afterwards.
                    Some(thumbnails) => {
                        let shown = thumbnails.len();
                        for (item, thumb) in items.iter().zip(thumbnails) {
                            self.results
                                .append(RenderedItem::with_thumbnail(item, thumb));
                        }
                        shown
                    }
                    None => populate(
                        &mut self.results,
                        items.iter().map(RenderedItem::from_result),
                        &cancel,
                    ),
                };
                SessionReport::Rendered {
                    rendered,
                    total,
                    cancelled: rendered < total && cancel.is_cancelled(),
                }
            }
        };

        info!(query = %self.session.query, ?report, "search finished");
        self.session.reset();
        report
    }

    /// Runs a whole session inline. Returns `None` when the query started nothing.
    pub async fn search_once(&mut self, query: &str) -> Option<SessionReport> {
        match self.dispatch(Command::Submit(query.to_string())) {
            Activation::Started(job) => {
                let outcome = job.run().await;
                Some(self.complete(outcome))
            }
            Activation::CancelRequested | Activation::Ignored => None,
        }
    }
}

/// Appends items in order, checking `cancel` before each one. Returns how many landed.
fn populate(
    list: &mut ResultList,
    items: impl IntoIterator<Item = RenderedItem>,
    cancel: &CancellationToken,
) -> usize {
    let mut appended = 0;
    for item in items {
        if cancel.is_cancelled() {
            break;
        }
        list.append(item);
        appended += 1;
    }
    appended
}
