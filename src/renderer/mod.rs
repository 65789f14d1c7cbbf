//! Page renderer: turns a route into a fetched, displayed content record
//!
//! Every navigation bumps a generation counter and aborts the previous fetch.
//! A fetch only writes its result if its generation is still current when it
//! resolves, so a late response for an old page can never replace the page
//! the user navigated to since.

pub mod routes;
pub mod source;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::models::ContentRecord;

pub use routes::{PageRoute, RouteTable};
pub use source::{ContentSource, FetchError, HttpContentSource};

/// Upper bound on a single fetch before the view gives up
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const LOADING_MESSAGE: &str = "Cargando información del servidor...";

/// What the renderer is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading {
        identifier: String,
    },
    Displaying {
        identifier: String,
        record: ContentRecord,
    },
    Failed {
        identifier: String,
        error: FetchError,
    },
}

impl ViewState {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            ViewState::Idle => None,
            ViewState::Loading { identifier }
            | ViewState::Displaying { identifier, .. }
            | ViewState::Failed { identifier, .. } => Some(identifier),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    pub fn record(&self) -> Option<&ContentRecord> {
        match self {
            ViewState::Displaying { record, .. } => Some(record),
            _ => None,
        }
    }

    /// User-visible text for this state
    pub fn render(&self) -> String {
        match self {
            ViewState::Idle => "Selecciona una página.".to_string(),
            ViewState::Loading { .. } => LOADING_MESSAGE.to_string(),
            ViewState::Displaying { record, .. } => {
                format!("{}  {}\n\n{}", record.icon, record.title, record.body)
            }
            ViewState::Failed { identifier, error } => {
                format!("⚠️  No se pudo cargar la página '{}'\n\n{}", identifier, error)
            }
        }
    }
}

/// Loads pages from a [`ContentSource`] and tracks what is on screen
///
/// Must be driven from inside a tokio runtime; each load spawns a task.
pub struct PageRenderer<S> {
    source: Arc<S>,
    routes: RouteTable,
    timeout: Duration,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<ViewState>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl<S: ContentSource> PageRenderer<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            source: Arc::new(source),
            routes: RouteTable::default(),
            timeout: DEFAULT_TIMEOUT,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
            in_flight: Mutex::new(None),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Load the page a route path points at
    ///
    /// A path with no route fails immediately with `NotFound`, without a
    /// request. Returns the generation of this navigation.
    pub fn navigate(&self, path: &str) -> u64 {
        match self.routes.resolve(path) {
            Some(identifier) => {
                let identifier = identifier.to_string();
                self.load(&identifier)
            }
            None => {
                tracing::warn!("No route for path: {}", path);
                let mut in_flight = self.lock_in_flight();
                if let Some(handle) = in_flight.take() {
                    handle.abort();
                }
                self.advance(ViewState::Failed {
                    identifier: path.to_string(),
                    error: FetchError::NotFound(path.to_string()),
                })
            }
        }
    }

    /// Show `identifier`: enter loading now, display or fail when the fetch
    /// settles
    ///
    /// Always issues a new request, even when revisiting a page. Returns the
    /// generation of this load.
    pub fn load(&self, identifier: &str) -> u64 {
        let mut in_flight = self.lock_in_flight();
        if let Some(handle) = in_flight.take() {
            handle.abort();
        }

        let generation = self.advance(ViewState::Loading {
            identifier: identifier.to_string(),
        });
        tracing::debug!("Loading '{}' (generation {})", identifier, generation);

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let timeout = self.timeout;
        let identifier = identifier.to_string();

        let handle = tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, source.fetch(&identifier)).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(timeout)),
            };

            let next = match outcome {
                Ok(record) => ViewState::Displaying {
                    identifier: identifier.clone(),
                    record,
                },
                Err(error) => {
                    tracing::warn!("Failed to load '{}': {}", identifier, error);
                    ViewState::Failed {
                        identifier: identifier.clone(),
                        error,
                    }
                }
            };

            let applied = state.send_if_modified(|view| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *view = next;
                true
            });

            if !applied {
                tracing::debug!(
                    "Discarded stale response for '{}' (generation {})",
                    identifier,
                    generation
                );
            }
        });

        *in_flight = Some(handle);
        generation
    }

    /// Snapshot of the current view
    pub fn current(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Generation of the most recent navigation
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Wait until the view leaves the loading state
    pub async fn settled(&self) -> ViewState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|view| !view.is_loading()).await {
            Ok(view) => view.clone(),
            Err(_) => self.current(),
        }
    }

    /// Navigation bar followed by the current view
    pub fn render(&self) -> String {
        let view = self.current();
        format!("{}\n\n{}", self.routes.render_nav(view.identifier()), view.render())
    }

    /// Replace the view and bump the generation in one step under the
    /// channel's write lock
    fn advance(&self, next: ViewState) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|view| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *view = next;
        });
        generation
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> Drop for PageRenderer<S> {
    fn drop(&mut self) {
        let in_flight = self
            .in_flight
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = in_flight.take() {
            handle.abort();
        }
    }
}
