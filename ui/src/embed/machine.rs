//! Handshake state machine for the booking widget frame.
//!
//! [`Machine::transition`] is pure: it takes the current machine and one
//! [`Event`] and returns the next machine plus the [`Command`]s the
//! coordinator must carry out (arm or cancel timers, load a URL, post
//! messages). No clock or DOM is touched here, so every path can be driven
//! from a test.
//!
//! ```text
//!            Mount/Retry
//! Idle ─────────────────────▶ FrameLoading ──load──▶ FrameLoaded
//!                               │   ▲                   │   │
//!                timeout/error  │   │ fallback (once)   │   │ timeout, fallback used
//!                               ▼   │                   │   ▼
//!                             Failed ◀── error page ────┘  Degraded
//!
//! ready (any mounted state) ──▶ WidgetReady
//! ```

use std::time::Duration;

use super::protocol::{BookingEvent, Inbound};
use super::target::PathVariant;

/// Frame height used until the widget reports its own.
pub const DEFAULT_HEIGHT: f64 = 800.0;
/// Bound on the whole load + ready handshake.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(8);
/// Delay after the load event before the frame content is inspected.
pub const CONTENT_CHECK_DELAY: Duration = Duration::from_secs(2);
/// Delay after the load event before the theme is pushed without a ready signal.
pub const THEME_FALLBACK_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// No load event before the handshake bound.
    NeverLoaded,
    /// The frame reported a native load error.
    LoadError,
    /// The frame loaded, but its document is a "not found" page.
    ErrorPage,
}

impl FailureCause {
    /// Whether the frame document ever finished loading.
    pub fn frame_loaded(self) -> bool {
        matches!(self, FailureCause::ErrorPage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandshakeState {
    #[default]
    Idle,
    FrameLoading,
    FrameLoaded,
    WidgetReady,
    Degraded,
    Failed(FailureCause),
}

impl HandshakeState {
    pub fn is_failed(self) -> bool {
        matches!(self, HandshakeState::Failed(_))
    }

    /// The frame document has loaded (whether or not the widget spoke).
    fn has_document(self) -> bool {
        matches!(
            self,
            HandshakeState::FrameLoaded | HandshakeState::WidgetReady | HandshakeState::Degraded
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    Handshake,
    ContentCheck,
    ThemeFallback,
}

/// Result of looking inside the frame document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentProbe {
    /// Cross-origin (the normal case) or no document yet. Inconclusive.
    Inaccessible,
    /// Visible text of the frame body.
    Body(String),
}

impl ContentProbe {
    pub fn shows_not_found(&self) -> bool {
        match self {
            ContentProbe::Inaccessible => false,
            ContentProbe::Body(text) => text.contains("404") || text.contains("Not Found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Mount,
    Retry,
    Unmount,
    FrameLoaded,
    FrameError,
    Message(Inbound),
    TimerElapsed(TimerKind),
    ContentInspected(ContentProbe),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CancelTimers,
    /// Arm `kind`, replacing any armed timer of the same kind.
    Schedule(TimerKind, Duration),
    Cancel(TimerKind),
    LoadFrame(PathVariant),
    SendTheme,
    RequestHeight,
    InspectContent,
    Telemetry(BookingEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    pub state: HandshakeState,
    pub variant: PathVariant,
    pub fallback_tried: bool,
    pub height: f64,
}

impl Default for Machine {
    fn default() -> Self {
        Self {
            state: HandshakeState::Idle,
            variant: PathVariant::Primary,
            fallback_tried: false,
            height: DEFAULT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: Machine,
    pub commands: Vec<Command>,
}

impl Transition {
    fn stay(machine: &Machine) -> Self {
        Self {
            next: machine.clone(),
            commands: Vec::new(),
        }
    }
}

impl Machine {
    pub fn transition(&self, event: Event) -> Transition {
        use HandshakeState::*;

        match event {
            Event::Mount => self.start_loading(self.variant),
            Event::Retry => Machine::default().start_loading(PathVariant::Primary),
            Event::Unmount => Transition {
                next: Machine::default(),
                commands: vec![Command::CancelTimers],
            },

            Event::FrameLoaded => match self.state {
                Idle | Failed(_) => Transition::stay(self),
                FrameLoading | FrameLoaded | WidgetReady | Degraded => {
                    let state = if self.state == FrameLoading {
                        FrameLoaded
                    } else {
                        self.state
                    };
                    Transition {
                        next: Machine {
                            state,
                            ..self.clone()
                        },
                        commands: vec![
                            Command::Schedule(TimerKind::ContentCheck, CONTENT_CHECK_DELAY),
                            Command::Schedule(TimerKind::ThemeFallback, THEME_FALLBACK_DELAY),
                        ],
                    }
                }
            },

            Event::FrameError => match self.state {
                Idle | Failed(_) => Transition::stay(self),
                _ => self.fail_over(FailureCause::LoadError),
            },

            Event::Message(message) => self.on_message(message),

            Event::TimerElapsed(TimerKind::Handshake) => match self.state {
                // Loaded but silent: the widget may not speak the protocol.
                FrameLoaded if !self.fallback_tried => self.switch_to_fallback(),
                FrameLoaded => Transition {
                    next: Machine {
                        state: Degraded,
                        ..self.clone()
                    },
                    commands: Vec::new(),
                },
                FrameLoading => self.fail_over(FailureCause::NeverLoaded),
                Idle | WidgetReady | Degraded | Failed(_) => Transition::stay(self),
            },

            Event::TimerElapsed(TimerKind::ContentCheck) => {
                if self.state.has_document() {
                    Transition {
                        next: self.clone(),
                        commands: vec![Command::InspectContent],
                    }
                } else {
                    Transition::stay(self)
                }
            }

            Event::TimerElapsed(TimerKind::ThemeFallback) => {
                if self.state.has_document() {
                    Transition {
                        next: self.clone(),
                        commands: vec![Command::SendTheme, Command::RequestHeight],
                    }
                } else {
                    Transition::stay(self)
                }
            }

            Event::ContentInspected(probe) => {
                // A ready signal proves the widget works whatever its text says.
                let loaded_without_ready = matches!(self.state, FrameLoaded | Degraded);
                if loaded_without_ready && probe.shows_not_found() {
                    self.fail_over(FailureCause::ErrorPage)
                } else {
                    Transition::stay(self)
                }
            }
        }
    }

    fn on_message(&self, message: Inbound) -> Transition {
        if self.state == HandshakeState::Idle {
            return Transition::stay(self);
        }

        match message {
            Inbound::Ready => Transition {
                next: Machine {
                    state: HandshakeState::WidgetReady,
                    ..self.clone()
                },
                commands: vec![
                    Command::Cancel(TimerKind::Handshake),
                    Command::SendTheme,
                    Command::RequestHeight,
                ],
            },
            Inbound::Height { .. } => match message.valid_height() {
                Some(height) => Transition {
                    next: Machine {
                        height,
                        ..self.clone()
                    },
                    commands: Vec::new(),
                },
                None => Transition::stay(self),
            },
            Inbound::BookingEvent(event) => Transition {
                next: self.clone(),
                commands: vec![Command::Telemetry(event)],
            },
        }
    }

    fn start_loading(&self, variant: PathVariant) -> Transition {
        Transition {
            next: Machine {
                state: HandshakeState::FrameLoading,
                variant,
                ..self.clone()
            },
            commands: vec![
                Command::CancelTimers,
                Command::LoadFrame(variant),
                Command::Schedule(TimerKind::Handshake, HANDSHAKE_TIMEOUT),
            ],
        }
    }

    fn switch_to_fallback(&self) -> Transition {
        Machine {
            fallback_tried: true,
            ..self.clone()
        }
        .start_loading(PathVariant::Fallback)
    }

    /// Transport failure: try the fallback path once, then give up.
    fn fail_over(&self, cause: FailureCause) -> Transition {
        if !self.fallback_tried {
            return self.switch_to_fallback();
        }
        Transition {
            next: Machine {
                state: HandshakeState::Failed(cause),
                ..self.clone()
            },
            commands: vec![Command::CancelTimers],
        }
    }
}
