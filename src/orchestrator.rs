//! Display state orchestration
//!
//! Holds the query the user is looking at and keeps the published
//! `DisplayState` in step with it. Every query change starts exactly one
//! resolution; only the newest one is allowed to land.

use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::models::{Query, WindResult};
use crate::resolver::WindResolver;

/// What the display shows right now
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub query: Query,
    /// Latest landed result; kept while a newer one is loading
    pub result: WindResult,
    pub loading: bool,
    /// Bumped for every new query; results carry the one they were issued under
    pub generation: u64,
}

/// Drives resolutions from query changes, last request wins
pub struct WindOrchestrator {
    resolver: Arc<WindResolver>,
    state: Arc<watch::Sender<DisplayState>>,
    speed: Arc<watch::Sender<f64>>,
}

impl WindOrchestrator {
    /// Publish the initial state and start resolving `initial`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(resolver: Arc<WindResolver>, initial: Query) -> Self {
        let (state, _) = watch::channel(DisplayState {
            query: initial,
            result: WindResult::loading(),
            loading: false,
            generation: 0,
        });
        let (speed, _) = watch::channel(0.0);

        let orchestrator = Self {
            resolver,
            state: Arc::new(state),
            speed: Arc::new(speed),
        };
        orchestrator.issue(initial, true);
        orchestrator
    }

    /// Receiver for display updates
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    /// Receiver for the current wind speed, for the animator
    #[must_use]
    pub fn speed(&self) -> watch::Receiver<f64> {
        self.speed.subscribe()
    }

    #[must_use]
    pub fn latest(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn query(&self) -> Query {
        self.state.borrow().query
    }

    /// Switch to `query`. Returns whether a resolution was started.
    pub fn set_query(&self, query: Query) -> bool {
        self.issue(query, false)
    }

    pub fn set_location(&self, latitude: f64, longitude: f64) -> bool {
        self.set_query(self.query().with_location(latitude, longitude))
    }

    pub fn set_date(&self, date: NaiveDate) -> bool {
        self.set_query(self.query().with_date(date))
    }

    /// Jump the date by whole years
    pub fn shift_years(&self, delta: i32) -> bool {
        self.set_query(self.query().shift_years(delta))
    }

    fn issue(&self, query: Query, force: bool) -> bool {
        let mut generation = 0;
        let changed = self.state.send_if_modified(|state| {
            if !force && state.query == query {
                return false;
            }
            state.generation += 1;
            state.query = query;
            state.loading = true;
            generation = state.generation;
            true
        });
        if !changed {
            debug!("Query unchanged, nothing to resolve");
            return false;
        }

        let resolver = Arc::clone(&self.resolver);
        let state = Arc::clone(&self.state);
        let speed = Arc::clone(&self.speed);
        tokio::spawn(async move {
            let result = resolver.resolve_wind(&query).await;
            let landed = state.send_if_modified(|current| {
                if current.generation != generation {
                    return false;
                }
                // published under the state lock so a stale landing cannot reorder it
                speed.send_replace(result.speed_kmh);
                current.result = result;
                current.loading = false;
                true
            });
            if !landed {
                debug!("Discarding stale result for generation {}", generation);
            }
        });
        true
    }
}
