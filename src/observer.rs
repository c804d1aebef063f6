//! Progress hook for a single lookup.
//!
//! The client reports each step to a [`LookupObserver`]. The default
//! [`NoopObserver`] drops them; [`TracingObserver`] logs them at debug level.

/// Steps of one publicity lookup, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupEvent {
    Started { target_id: String },
    Validated,
    EnvelopeBuilt { with_requester: bool },
    RequestSent { endpoint: String },
    ResponseReceived { status: u16, bytes: usize },
    Parsed { has_errors: bool },
    Finished,
}

pub trait LookupObserver: Send + Sync {
    fn on_event(&self, event: &LookupEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LookupObserver for NoopObserver {
    fn on_event(&self, _event: &LookupEvent) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LookupObserver for TracingObserver {
    fn on_event(&self, event: &LookupEvent) {
        match event {
            LookupEvent::Started { target_id } => {
                tracing::debug!(target: "aade_publicity", "Starting publicity search for {}", target_id)
            }
            LookupEvent::Validated => {
                tracing::debug!(target: "aade_publicity", "Validation check for all params passed")
            }
            LookupEvent::EnvelopeBuilt { with_requester } => {
                tracing::debug!(
                    target: "aade_publicity",
                    "Envelope built ({} afm_called_by)",
                    if *with_requester { "with" } else { "without" }
                )
            }
            LookupEvent::RequestSent { endpoint } => {
                tracing::debug!(target: "aade_publicity", "Request sent to {}", endpoint)
            }
            LookupEvent::ResponseReceived { status, bytes } => {
                tracing::debug!(
                    target: "aade_publicity",
                    "Response received: status {}, {} bytes",
                    status,
                    bytes
                )
            }
            LookupEvent::Parsed { has_errors } => {
                tracing::debug!(target: "aade_publicity", "Response parsed (has_errors={})", has_errors)
            }
            LookupEvent::Finished => tracing::debug!(target: "aade_publicity", "Done"),
        }
    }
}
