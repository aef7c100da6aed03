//! In-process client for the notes service.
//!
//! Front ends call [`NotesClient::invoke`] with the same `{command, payload}`
//! JSON they would send over the socket, or [`NotesClient::call`] with a
//! typed [`Command`]. [`NotesClient::subscribe`] yields revision bumps for
//! one tab, which is the signal to re-fetch.

use std::sync::Arc;

use nook_types::NotesEvent;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::warn;

use crate::{Command, EventFilter, NotesService, Response};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered `{ok: false}`.
    #[error("{0}")]
    Command(String),

    /// The result did not have the expected shape.
    #[error("unexpected result: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct NotesClient {
    service: Arc<NotesService>,
}

impl NotesClient {
    pub fn new(service: Arc<NotesService>) -> Self {
        Self { service }
    }

    /// Raw JSON request in, envelope out.
    pub async fn invoke(&self, request: serde_json::Value) -> Response {
        self.service.handle_request(request).await
    }

    pub async fn request(&self, command: Command) -> Response {
        self.service.dispatch(command).await
    }

    /// Typed request. Failures surface as [`ClientError::Command`].
    pub async fn call<T: DeserializeOwned>(&self, command: Command) -> Result<T, ClientError> {
        let response = self.request(command).await;
        if !response.ok {
            return Err(ClientError::Command(response.error.unwrap_or_default()));
        }
        let result = response.result.unwrap_or(serde_json::Value::Null);
        Ok(serde_json::from_value(result)?)
    }

    /// Revision bumps for one tab.
    pub fn subscribe(&self, tab_id: impl Into<String>) -> Subscription {
        self.subscribe_filtered(EventFilter::for_tab(tab_id))
    }

    pub fn subscribe_filtered(&self, filter: EventFilter) -> Subscription {
        Subscription {
            rx: self.service.events().subscribe(),
            filter,
        }
    }
}

/// Filtered view of the event bus.
pub struct Subscription {
    rx: broadcast::Receiver<NotesEvent>,
    filter: EventFilter,
}

impl Subscription {
    /// Next matching event. `None` once the service is gone.
    pub async fn recv(&mut self) -> Option<NotesEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "subscriber lagged, events dropped");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching event already buffered, if any.
    pub fn try_recv(&mut self) -> Option<NotesEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}
