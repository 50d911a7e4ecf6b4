use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::debug;

use crate::core::platform;
use crate::t;

use super::browser::{BrowserFrame, SenderSlot, TaskScheduler};
use super::config::{EmbedConfig, OriginPolicy};
use super::coordinator::{Coordinator, RenderDecision};
use super::machine::{FailureCause, DEFAULT_HEIGHT};
use super::scheduler::TimerId;
use super::target::{EmbedUrl, PathVariant};

/// DOM id of the widget `<iframe>`; [`BrowserFrame`] looks it up by this id.
pub const FRAME_ELEMENT_ID: &str = "booking-widget-frame";

#[derive(Debug, Clone)]
pub(crate) enum WidgetEvent {
    Configure(EmbedConfig),
    /// `src` is the frame URL the event was raised for.
    FrameLoaded { src: String },
    FrameError { src: String },
    Message { origin: String, data: String },
    TimerFired(TimerId),
    Retry,
    Unmount,
}

#[component]
pub fn BookingWidget(config: EmbedConfig) -> Element {
    let decision = use_signal(|| initial_decision(&config));
    let sender_slot: SenderSlot = use_hook(|| Rc::new(RefCell::new(None)));
    let sender_slot_for_loop = sender_slot.clone();

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<WidgetEvent>| {
        let sender_slot = sender_slot_for_loop.clone();
        let mut decision_signal = decision;

        async move {
            let listener_slot = sender_slot.clone();
            let _listener = platform::listen_for_messages(move |origin, data| {
                if let Some(sender) = listener_slot.borrow().as_ref() {
                    let _ = sender.unbounded_send(WidgetEvent::Message { origin, data });
                }
            });

            let mut coordinator = Coordinator::new(
                BrowserFrame::new(FRAME_ELEMENT_ID, "*"),
                TaskScheduler::new(sender_slot.clone()),
            );

            while let Some(event) = rx.next().await {
                match event {
                    WidgetEvent::Configure(config) => {
                        *coordinator.host_mut() =
                            BrowserFrame::new(FRAME_ELEMENT_ID, post_origin(&config));
                        coordinator.configure(config);
                    }
                    WidgetEvent::FrameLoaded { src } => coordinator.on_frame_load_from(&src),
                    WidgetEvent::FrameError { src } => coordinator.on_frame_error_from(&src),
                    WidgetEvent::Message { origin, data } => {
                        if coordinator.config().accepts_origin(&origin) {
                            coordinator.on_raw_message(&data);
                        } else {
                            debug!(%origin, "message from foreign origin ignored");
                        }
                    }
                    WidgetEvent::TimerFired(id) => coordinator.on_timer(id),
                    WidgetEvent::Retry => coordinator.retry(),
                    WidgetEvent::Unmount => {
                        coordinator.unmount();
                        break;
                    }
                }
                decision_signal.set(coordinator.render());
            }
        }
    });

    sender_slot.borrow_mut().replace(coroutine.tx());

    {
        let slot = sender_slot.clone();
        use_drop(move || {
            if let Some(sender) = slot.borrow().as_ref() {
                let _ = sender.unbounded_send(WidgetEvent::Unmount);
            }
        });
    }

    use_effect(use_reactive((&config,), move |(config,)| {
        coroutine.send(WidgetEvent::Configure(config));
    }));

    match decision() {
        RenderDecision::MissingConfiguration { missing } => rsx! {
            div { class: "booking-widget booking-widget--unconfigured",
                h3 { {t!("widget-missing-title")} }
                p { {t!("widget-missing-intro")} }
                ul { class: "booking-widget__missing",
                    for field in missing {
                        li { code { "{field.env_var()}" } }
                    }
                }
            }
        },
        RenderDecision::Failed { cause, url } => {
            let cause_text = match cause {
                FailureCause::NeverLoaded => t!("widget-error-never-loaded"),
                FailureCause::LoadError => t!("widget-error-load-error"),
                FailureCause::ErrorPage => t!("widget-error-page"),
            };
            rsx! {
                div { class: "booking-widget booking-widget--failed", role: "alert",
                    h3 { {t!("widget-failed-title")} }
                    p { class: "booking-widget__cause", "{cause_text}" }
                    ul { class: "booking-widget__hints",
                        if !cause.frame_loaded() {
                            li { {t!("widget-hint-embedding")} }
                        }
                        li { {t!("widget-hint-domain")} }
                        li { {t!("widget-hint-paths")} }
                        li { {t!("widget-hint-console")} }
                    }
                    p { class: "booking-widget__url",
                        strong { {t!("widget-current-url")} }
                        " "
                        code { "{url}" }
                    }
                    div { class: "booking-widget__actions",
                        button {
                            r#type: "button",
                            class: "button button--primary",
                            onclick: move |_| coroutine.send(WidgetEvent::Retry),
                            {t!("widget-retry")}
                        }
                        a {
                            class: "button button--ghost",
                            href: "{url}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            {t!("widget-open-external")}
                        }
                    }
                }
            }
        }
        RenderDecision::Frame { url, height } => {
            let title = t!("widget-frame-title");
            let loaded_src = url.clone();
            let failed_src = url.clone();
            rsx! {
                div { class: "booking-widget",
                    iframe {
                        id: FRAME_ELEMENT_ID,
                        class: "booking-widget__frame",
                        src: "{url}",
                        title: "{title}",
                        width: "100%",
                        style: "height: {height}px;",
                        allow: "clipboard-read; clipboard-write",
                        onload: move |_| coroutine.send(WidgetEvent::FrameLoaded { src: loaded_src.clone() }),
                        onerror: move |_| coroutine.send(WidgetEvent::FrameError { src: failed_src.clone() }),
                    }
                }
            }
        }
    }
}

/// What the first render shows before the coordinator has run.
fn initial_decision(config: &EmbedConfig) -> RenderDecision {
    let missing = config.missing_fields();
    if missing.is_empty() {
        RenderDecision::Frame {
            url: EmbedUrl::build(config, PathVariant::Primary).to_string(),
            height: DEFAULT_HEIGHT,
        }
    } else {
        RenderDecision::MissingConfiguration { missing }
    }
}

/// `targetOrigin` for outgoing messages.
fn post_origin(config: &EmbedConfig) -> String {
    match config.origin_policy {
        OriginPolicy::Any => "*".to_string(),
        OriginPolicy::TargetDomain => config.widget_origin().unwrap_or_else(|_| "*".to_string()),
    }
}
