#![cfg(not(feature = "csr"))]

use super::*;

#[test]
fn load_is_empty_outside_the_browser() {
    assert_eq!(LocalCredentialStore.load(), None);
}

#[test]
fn save_and_clear_are_noops_but_callable() {
    LocalCredentialStore.save("tok");
    assert_eq!(LocalCredentialStore.load(), None);
    LocalCredentialStore.clear();
}
