use std::cell::RefCell;

use super::*;
use crate::net::fake_transport::FakeTransport;

struct Recorded {
    notices: RefCell<Vec<String>>,
    redirects: RefCell<Vec<String>>,
}

impl Recorded {
    fn new() -> Self {
        Self { notices: RefCell::new(Vec::new()), redirects: RefCell::new(Vec::new()) }
    }
}

async fn run_logout(transport: FakeTransport, recorded: &Recorded) -> Result<AuthOutcome, TransportError> {
    let client = AuthClient::new(transport);
    logout_then_redirect(
        &client,
        |msg| recorded.notices.borrow_mut().push(msg.to_owned()),
        |path| recorded.redirects.borrow_mut().push(path.to_owned()),
    )
    .await
}

#[tokio::test]
async fn successful_logout_redirects_without_notice() {
    let recorded = Recorded::new();
    let result = run_logout(FakeTransport::replying(204, ""), &recorded).await;
    assert_eq!(result, Ok(AuthOutcome { success: true, status: 204 }));
    assert!(recorded.notices.borrow().is_empty());
    assert_eq!(*recorded.redirects.borrow(), vec!["/auth/login?disableAutoRedirect=true".to_owned()]);
}

#[tokio::test]
async fn rejected_logout_notifies_and_still_redirects() {
    let recorded = Recorded::new();
    let result = run_logout(FakeTransport::replying(401, ""), &recorded).await;
    assert_eq!(result, Ok(AuthOutcome { success: false, status: 401 }));
    assert_eq!(*recorded.notices.borrow(), vec![LOGOUT_FAILED_NOTICE.to_owned()]);
    assert_eq!(*recorded.redirects.borrow(), vec!["/auth/login?disableAutoRedirect=true".to_owned()]);
}

#[tokio::test]
async fn unreachable_server_notifies_and_still_redirects() {
    let recorded = Recorded::new();
    let result = run_logout(FakeTransport::failing("connection refused"), &recorded).await;
    assert_eq!(result, Err(TransportError::Network("connection refused".to_owned())));
    assert_eq!(recorded.notices.borrow().len(), 1);
    assert_eq!(recorded.redirects.borrow().len(), 1);
}

#[tokio::test]
async fn server_error_on_logout_is_reported() {
    let recorded = Recorded::new();
    let result = run_logout(FakeTransport::replying(500, "boom"), &recorded).await;
    assert!(result.is_ok_and(|outcome| !outcome.success));
    assert_eq!(recorded.notices.borrow().len(), 1);
}

#[tokio::test]
async fn logout_posts_to_logout_endpoint_once() {
    let recorded = Recorded::new();
    let client = AuthClient::new(FakeTransport::replying(200, ""));
    logout_then_redirect(&client, |_| {}, |path| recorded.redirects.borrow_mut().push(path.to_owned()))
        .await
        .unwrap();
    let sent = client.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "/auth/logout");
}
