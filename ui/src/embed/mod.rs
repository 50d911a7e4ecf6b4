//! Embedded booking widget.
//!
//! The widget is a cross-origin `<iframe>` served by the booking provider.
//! [`Coordinator`] owns its lifecycle: URL construction, load detection, the
//! `salonify-*` postMessage handshake, theme push, height sync and the
//! `/widget` → root fallback before an error is shown. The handshake itself
//! is the pure state machine in [`machine`]; time comes in through a
//! [`Scheduler`] so tests drive it with [`ManualScheduler`].
//!
//! [`BookingWidget`] is the Dioxus component that hosts one coordinator.

mod browser;
mod config;
mod coordinator;
pub mod machine;
mod protocol;
mod scheduler;
mod target;
mod widget;

pub use browser::{BrowserFrame, TaskScheduler};
pub use config::{ConfigError, ConfigField, EmbedConfig, OriginPolicy, DEFAULT_WIDGET_DOMAIN};
pub use coordinator::{Coordinator, FrameHost, RenderDecision};
pub use machine::{ContentProbe, FailureCause, HandshakeState, TimerKind, DEFAULT_HEIGHT};
pub use protocol::{BookingEvent, Inbound, Outbound, Theme};
pub use scheduler::{ManualScheduler, Scheduler, TimerId};
pub use target::{EmbedUrl, PathVariant};
pub use widget::{BookingWidget, FRAME_ELEMENT_ID};
