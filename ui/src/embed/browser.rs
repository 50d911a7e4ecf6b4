//! Runtime implementations of [`FrameHost`] and [`Scheduler`] for the
//! Dioxus widget component.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::{spawn, Task};
use futures_channel::mpsc::UnboundedSender;
use tracing::debug;

use crate::core::timing;

use super::coordinator::FrameHost;
use super::machine::{ContentProbe, TimerKind};
use super::protocol::Outbound;
use super::scheduler::{Scheduler, TimerId};
use super::target::EmbedUrl;
use super::widget::WidgetEvent;

pub(crate) type SenderSlot = Rc<RefCell<Option<UnboundedSender<WidgetEvent>>>>;

/// Talks to the `<iframe>` with the given element id.
pub struct BrowserFrame {
    element_id: String,
    target_origin: String,
}

impl BrowserFrame {
    /// `target_origin` restricts where posted messages may be delivered
    /// (`"*"` for anywhere).
    pub fn new(element_id: impl Into<String>, target_origin: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            target_origin: target_origin.into(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn element(&self) -> Option<web_sys::HtmlIFrameElement> {
        use wasm_bindgen::JsCast;

        web_sys::window()?
            .document()?
            .get_element_by_id(&self.element_id)?
            .dyn_into::<web_sys::HtmlIFrameElement>()
            .ok()
    }
}

impl FrameHost for BrowserFrame {
    fn load(&mut self, url: &EmbedUrl) {
        // The component renders `src` from the coordinator's decision.
        debug!(frame = %self.element_id, url = %url, "frame source updated");
    }

    #[cfg(target_arch = "wasm32")]
    fn post(&mut self, message: &Outbound) {
        let Some(window) = self.element().and_then(|frame| frame.content_window()) else {
            debug!(kind = message.type_name(), "frame window unavailable; message dropped");
            return;
        };
        let payload = match message.to_json() {
            Ok(json) => js_sys::JSON::parse(&json),
            Err(err) => {
                tracing::warn!(%err, "could not encode widget message");
                return;
            }
        };
        match payload {
            Ok(value) => {
                if window.post_message(&value, &self.target_origin).is_err() {
                    tracing::warn!(kind = message.type_name(), "postMessage rejected");
                } else {
                    debug!(kind = message.type_name(), "message sent to widget");
                }
            }
            Err(_) => tracing::warn!("could not build widget message"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn post(&mut self, message: &Outbound) {
        debug!(
            frame = %self.element_id,
            origin = %self.target_origin,
            kind = message.type_name(),
            "no frame window on this platform"
        );
    }

    #[cfg(target_arch = "wasm32")]
    fn inspect(&self) -> ContentProbe {
        // Cross-origin documents come back as `None`.
        self.element()
            .and_then(|frame| frame.content_document())
            .and_then(|doc| doc.body())
            .map(|body| ContentProbe::Body(body.inner_text()))
            .unwrap_or(ContentProbe::Inaccessible)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn inspect(&self) -> ContentProbe {
        ContentProbe::Inaccessible
    }
}

/// Spawns one sleeping task per timer on the current Dioxus scope; the task
/// posts [`WidgetEvent::TimerFired`] back into the widget coroutine.
pub struct TaskScheduler {
    sender_slot: SenderSlot,
    next_id: u64,
    tasks: HashMap<TimerId, Task>,
}

impl TaskScheduler {
    pub(crate) fn new(sender_slot: SenderSlot) -> Self {
        Self {
            sender_slot,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }
}

impl Scheduler for TaskScheduler {
    fn schedule(&mut self, kind: TimerKind, after: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let sender = self.sender_slot.borrow().as_ref().cloned();
        let task = spawn(async move {
            timing::sleep(after).await;
            if let Some(sender) = sender {
                let _ = sender.unbounded_send(WidgetEvent::TimerFired(id));
            }
        });
        debug!(?kind, ?after, ?id, "timer armed");
        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.cancel();
        }
    }

    fn complete(&mut self, id: TimerId) {
        self.tasks.remove(&id);
    }
}
