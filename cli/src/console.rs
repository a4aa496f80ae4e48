//! Session feedback for a terminal.
//!
//! Notices go to stderr so command output on stdout stays pipeable. State
//! changes are only traced.

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;

use access::{AuthState, Notice, NoticeLevel, SessionListener};

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleListener;

pub fn render_notice(notice: &Notice) -> String {
    let prefix = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "error",
        NoticeLevel::Info => "info",
    };
    format!("{prefix}: {}", notice.message)
}

impl SessionListener for ConsoleListener {
    fn state_changed(&self, state: &AuthState) {
        tracing::debug!(
            epoch = state.epoch(),
            loading = state.is_loading(),
            authenticated = state.is_authenticated(),
            "session state changed"
        );
    }

    fn notice(&self, notice: Notice) {
        eprintln!("{}", render_notice(&notice));
    }
}
