//! Owns one booking-widget frame: configuration, URL, handshake state,
//! timers and the messages exchanged with the frame.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::config::{ConfigField, EmbedConfig};
use super::machine::{Command, ContentProbe, Event, FailureCause, HandshakeState, Machine, TimerKind};
use super::protocol::{BookingEvent, Inbound, Outbound, Theme};
use super::scheduler::{ManualScheduler, Scheduler, TimerId};
use super::target::{EmbedUrl, PathVariant};

/// The environment hosting the frame element.
pub trait FrameHost {
    /// Point the frame at `url`.
    fn load(&mut self, url: &EmbedUrl);

    /// Post a message into the frame's window.
    fn post(&mut self, message: &Outbound);

    /// Best-effort look at the frame document.
    fn inspect(&self) -> ContentProbe;

    fn telemetry(&mut self, event: &BookingEvent) {
        info!(target: "booking_widget", event = %event.event, data = %event.data, "widget event");
    }
}

/// What the widget area should show.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderDecision {
    /// Instructions naming each absent field; no frame is created.
    MissingConfiguration { missing: Vec<ConfigField> },
    /// Error panel with the cause and the last URL tried.
    Failed { cause: FailureCause, url: String },
    /// Live frame.
    Frame { url: String, height: f64 },
}

pub struct Coordinator<H, S> {
    host: H,
    scheduler: S,
    config: EmbedConfig,
    theme: Theme,
    machine: Machine,
    missing: Vec<ConfigField>,
    url: Option<EmbedUrl>,
    armed: BTreeMap<TimerKind, TimerId>,
}

impl<H: FrameHost, S: Scheduler> Coordinator<H, S> {
    /// A coordinator with no configuration yet; call [`Self::configure`].
    pub fn new(host: H, scheduler: S) -> Self {
        Self {
            host,
            scheduler,
            config: EmbedConfig::default(),
            theme: Theme::salon(),
            machine: Machine::default(),
            missing: ConfigField::ALL.to_vec(),
            url: None,
            armed: BTreeMap::new(),
        }
    }

    /// Palette pushed to the widget instead of [`Theme::salon`].
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    pub fn state(&self) -> HandshakeState {
        self.machine.state
    }

    pub fn height(&self) -> f64 {
        self.machine.height
    }

    pub fn variant(&self) -> PathVariant {
        self.machine.variant
    }

    pub fn fallback_tried(&self) -> bool {
        self.machine.fallback_tried
    }

    pub fn url(&self) -> Option<&EmbedUrl> {
        self.url.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn armed_timers(&self) -> Vec<TimerKind> {
        self.armed.keys().copied().collect()
    }

    /// Replace the configuration. Every timer is cancelled and the retry
    /// bookkeeping reset; a complete config is mounted right away.
    pub fn configure(&mut self, config: EmbedConfig) -> RenderDecision {
        self.cancel_all();
        self.machine = Machine::default();
        self.url = None;
        self.missing = config.missing_fields();
        self.config = config;

        if self.missing.is_empty() {
            self.mount();
        } else {
            warn!(missing = ?self.missing, "booking widget not configured");
        }
        self.render()
    }

    pub fn mount(&mut self) {
        if !self.missing.is_empty() {
            debug!("mount skipped: configuration incomplete");
            return;
        }
        self.dispatch(Event::Mount);
    }

    pub fn unmount(&mut self) {
        self.dispatch(Event::Unmount);
    }

    pub fn retry(&mut self) {
        if !self.missing.is_empty() {
            return;
        }
        info!("booking widget retry requested");
        self.dispatch(Event::Retry);
    }

    pub fn on_frame_load(&mut self) {
        self.dispatch(Event::FrameLoaded);
    }

    pub fn on_frame_error(&mut self) {
        self.dispatch(Event::FrameError);
    }

    /// Load event from a frame showing `src`. Events for a document other
    /// than the current URL were queued before a path switch and are dropped.
    pub fn on_frame_load_from(&mut self, src: &str) {
        if self.is_current(src) {
            self.on_frame_load();
        } else {
            debug!(%src, "load event for a replaced frame document ignored");
        }
    }

    pub fn on_frame_error_from(&mut self, src: &str) {
        if self.is_current(src) {
            self.on_frame_error();
        } else {
            debug!(%src, "error event for a replaced frame document ignored");
        }
    }

    pub fn on_message(&mut self, message: Inbound) {
        self.dispatch(Event::Message(message));
    }

    /// Parse and dispatch a raw JSON message; malformed ones are dropped.
    pub fn on_raw_message(&mut self, raw: &str) {
        match Inbound::from_json(raw) {
            Some(message) => self.on_message(message),
            None => debug!("ignoring unrecognised frame message"),
        }
    }

    pub fn on_handshake_timeout(&mut self) {
        self.dispatch(Event::TimerElapsed(TimerKind::Handshake));
    }

    /// Deliver a fired timer. Ids that are no longer armed are ignored.
    pub fn on_timer(&mut self, id: TimerId) {
        self.scheduler.complete(id);
        let Some(kind) = self
            .armed
            .iter()
            .find_map(|(kind, armed)| (*armed == id).then_some(*kind))
        else {
            debug!(?id, "stale timer ignored");
            return;
        };
        self.armed.remove(&kind);
        self.dispatch(Event::TimerElapsed(kind));
    }

    pub fn render(&self) -> RenderDecision {
        if !self.missing.is_empty() {
            return RenderDecision::MissingConfiguration {
                missing: self.missing.clone(),
            };
        }
        let url = self
            .url
            .clone()
            .unwrap_or_else(|| EmbedUrl::build(&self.config, self.machine.variant))
            .to_string();
        match self.machine.state {
            HandshakeState::Failed(cause) => RenderDecision::Failed { cause, url },
            _ => RenderDecision::Frame {
                url,
                height: self.machine.height,
            },
        }
    }

    fn is_current(&self, src: &str) -> bool {
        self.url.as_ref().map(EmbedUrl::as_str) == Some(src)
    }

    fn dispatch(&mut self, event: Event) {
        let before = self.machine.state;
        let transition = self.machine.transition(event);
        self.machine = transition.next;

        let after = self.machine.state;
        if before != after {
            debug!(?before, ?after, "widget handshake transition");
            match after {
                HandshakeState::Degraded => warn!(
                    "widget loaded but never sent a ready message; keeping the frame visible"
                ),
                HandshakeState::Failed(cause) => warn!(
                    ?cause,
                    url = %self.url.as_ref().map(EmbedUrl::as_str).unwrap_or_default(),
                    "booking widget failed to load"
                ),
                _ => {}
            }
        }

        for command in transition.commands {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::CancelTimers => self.cancel_all(),
            Command::Schedule(kind, after) => self.arm(kind, after),
            Command::Cancel(kind) => {
                if let Some(id) = self.armed.remove(&kind) {
                    self.scheduler.cancel(id);
                }
            }
            Command::LoadFrame(variant) => {
                let url = EmbedUrl::build(&self.config, variant);
                if variant == PathVariant::Fallback {
                    info!(url = %url, "trying widget fallback path");
                }
                self.host.load(&url);
                self.url = Some(url);
            }
            Command::SendTheme => {
                let message = Outbound::Theme {
                    theme: self.theme.clone(),
                };
                self.host.post(&message);
            }
            Command::RequestHeight => self.host.post(&Outbound::RequestHeight),
            Command::InspectContent => {
                let probe = self.host.inspect();
                if probe == ContentProbe::Inaccessible {
                    debug!("frame content not inspectable (cross-origin)");
                }
                self.dispatch(Event::ContentInspected(probe));
            }
            Command::Telemetry(event) => self.host.telemetry(&event),
        }
    }

    fn arm(&mut self, kind: TimerKind, after: Duration) {
        if let Some(previous) = self.armed.remove(&kind) {
            self.scheduler.cancel(previous);
        }
        let id = self.scheduler.schedule(kind, after);
        self.armed.insert(kind, id);
    }

    fn cancel_all(&mut self) {
        for (_, id) in std::mem::take(&mut self.armed) {
            self.scheduler.cancel(id);
        }
    }
}

impl<H: FrameHost> Coordinator<H, ManualScheduler> {
    /// Move the virtual clock forward, delivering every timer that falls due
    /// (including ones armed by earlier deliveries) in order.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(id) = self.scheduler.pop_due(until) {
            self.on_timer(id);
        }
        self.scheduler.set_now(until);
    }
}
