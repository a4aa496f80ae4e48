use super::*;

#[test]
fn url_joins_base_and_path() {
    let api = HttpApi::new("http://127.0.0.1:8001/api/");
    assert_eq!(api.url(endpoints::EXPENSES_PENDING), "http://127.0.0.1:8001/api/expenses/pending");
}

#[test]
fn set_bearer_replaces_and_clears() {
    let api = HttpApi::new("http://localhost/api");
    assert_eq!(api.bearer(), None);
    api.set_bearer(Some("tok"));
    assert_eq!(api.bearer().as_deref(), Some("tok"));
    api.set_bearer(None);
    assert_eq!(api.bearer(), None);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = HttpApi::new(format!("http://{addr}/api"));
    let err = api.current_user().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "{err:?}");
}
