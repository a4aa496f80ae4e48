//! Transient notice (toast) queue.
//!
//! DESIGN
//! ======
//! Notices get a monotonically increasing id so a delayed dismissal never
//! removes a newer notice that reused a slot. The queue is capped; the oldest
//! entry drops first.

#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

use access::Notice;
use leptos::prelude::*;

/// Most notices shown at once.
pub const MAX_VISIBLE: usize = 4;

/// How long a notice stays up before it dismisses itself.
#[cfg(feature = "csr")]
const DISMISS_AFTER: std::time::Duration = std::time::Duration::from_secs(4);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeState {
    next_id: u64,
    items: Vec<(u64, Notice)>,
}

impl NoticeState {
    /// Queue a notice and return its id.
    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push((id, notice));
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    /// Remove a notice. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|(item_id, _)| *item_id != id);
    }

    pub fn items(&self) -> &[(u64, Notice)] {
        &self.items
    }
}

/// Show `notice` and schedule its dismissal.
pub fn push_notice(notices: RwSignal<NoticeState>, notice: Notice) {
    let mut id = 0;
    notices.update(|state| id = state.push(notice));

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(DISMISS_AFTER).await;
        notices.try_update(|state| state.dismiss(id));
    });
    #[cfg(not(feature = "csr"))]
    let _ = id;
}
