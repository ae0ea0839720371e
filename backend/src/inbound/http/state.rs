//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without a running server.

use std::sync::Arc;

use crate::domain::ports::{PollCommand, PollQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub polls: Arc<dyn PollCommand>,
    pub polls_query: Arc<dyn PollQuery>,
    /// Deployment label reported by the health summary.
    pub environment: String,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use quickpoll::domain::PollStore;
    /// use quickpoll::inbound::http::state::HttpState;
    ///
    /// let store = Arc::new(PollStore::new(Arc::new(DefaultClock)));
    /// let state = HttpState::new(store.clone(), store, "development");
    /// assert_eq!(state.environment, "development");
    /// ```
    pub fn new(
        polls: Arc<dyn PollCommand>,
        polls_query: Arc<dyn PollQuery>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            polls,
            polls_query,
            environment: environment.into(),
        }
    }
}
