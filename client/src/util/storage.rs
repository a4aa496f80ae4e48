//! Persisted session credential in `localStorage`.
//!
//! The credential survives reloads under a single key. Non-browser builds
//! have nowhere to persist it, so they always load nothing and writes no-op.
//!
//! TRADE-OFFS
//! ==========
//! Storage access is best-effort: a blocked or missing `localStorage` behaves
//! like an empty slot, which sends the user to the login screen.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use access::CredentialStore;

#[cfg(feature = "csr")]
const TOKEN_KEY: &str = "token";

/// The browser's credential slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalCredentialStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl CredentialStore for LocalCredentialStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(TOKEN_KEY)
                .ok()
                .flatten()
                .filter(|token| !token.trim().is_empty())
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, credential: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(TOKEN_KEY, credential).is_err() {
                    log::warn!("storage: could not persist credential");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credential;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
    }
}
