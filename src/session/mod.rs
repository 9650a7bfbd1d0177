//! Word sessions: the lifecycle of one tapped word from bubble to dismissal.
//!
//! - [`WordSessionController`]: the state machine, the only writer of session state
//! - [`WordSession`]: the single active session (read-only outside this module)
//! - [`SessionEvent`]: host notifications, delivered over a broadcast channel
//! - [`SessionMessage`]: enrichment completions travelling back to the event loop

pub mod controller;
pub mod events;
pub mod messages;
pub mod panel;
pub mod state;

pub use controller::WordSessionController;
pub use events::{CloseReason, SessionEvent, SessionEventReceiver, SessionEventSender};
pub use messages::{EnrichmentPayload, MessageOutcome, SessionMessage};
pub use panel::{PanelLayout, PanelRegion, PanelRelease, ReleasePolicy};
pub use state::{ContentState, RequestKind, SessionId, SessionPhase, WordSession};
