use super::*;
use crate::gateway::tests::MockGateway;
use openstall_shared::{Order, Product, User};
use std::cell::{Cell, RefCell};

// =========================================================
// Shared Mock Components
// =========================================================

struct MockShell {
    /// Notification log: (message, severity)
    notices: RefCell<Vec<(String, Severity)>>,
    /// Answer returned by confirm()
    confirm_answer: Cell<bool>,
    /// How many times confirm() was asked
    confirm_asked: Cell<u32>,
    /// Navigation log
    visited: RefCell<Vec<AppView>>,
}

impl MockShell {
    fn new() -> Self {
        Self {
            notices: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
            confirm_asked: Cell::new(0),
            visited: RefCell::new(Vec::new()),
        }
    }

    fn errors(&self) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|(_, severity)| *severity == Severity::Error)
            .map(|(message, _)| message.clone())
            .collect()
    }

    fn successes(&self) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|(_, severity)| *severity == Severity::Success)
            .map(|(message, _)| message.clone())
            .collect()
    }
}

impl Shell for MockShell {
    fn notify(&self, message: &str, severity: Severity) {
        self.notices.borrow_mut().push((message.into(), severity));
    }

    fn confirm(&self, _message: &str) -> bool {
        self.confirm_asked.set(self.confirm_asked.get() + 1);
        self.confirm_answer.get()
    }

    fn goto(&self, view: AppView) {
        self.visited.borrow_mut().push(view);
    }
}

fn alice() -> User {
    User {
        id: 7,
        name: "A".into(),
        email: "a@x.com".into(),
        wallet: 1000.0,
    }
}

fn widget() -> Product {
    Product {
        id: 5,
        name: "Widget".into(),
        price: 20.0,
        stock: 3,
    }
}

// =========================================================
// Login / Register / Logout
// =========================================================

#[tokio::test]
async fn login_replaces_session_and_lands_on_shop() {
    let gateway = MockGateway::new();
    gateway.seed_user(alice());
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(actions.login("a@x.com").await);

    // 会话与服务端记录完全一致（整体替换，无合并）
    assert_eq!(session.get().unwrap(), alice());
    assert_eq!(*shell.visited.borrow(), vec![AppView::Shop]);
    assert_eq!(shell.successes(), vec!["Login successful!".to_string()]);

    // Round-trip: 登录摘要的 id 驱动了二次拉取
    assert_eq!(
        *gateway.log.borrow(),
        vec!["login:a@x.com".to_string(), "users:get:7".to_string()]
    );
}

#[tokio::test]
async fn login_unknown_email_reports_single_failure() {
    let gateway = MockGateway::new();
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(!actions.login("ghost@x.com").await);

    assert!(session.get().is_none());
    assert!(shell.visited.borrow().is_empty());
    assert_eq!(shell.errors(), vec!["Login failed. User not found.".to_string()]);
}

#[tokio::test]
async fn login_transport_failure_reports_connection_error() {
    let gateway = MockGateway::new();
    gateway.offline.set(true);
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(!actions.login("a@x.com").await);
    assert_eq!(shell.errors(), vec!["Connection error".to_string()]);
}

#[tokio::test]
async fn register_takes_server_assigned_wallet() {
    let gateway = MockGateway::new();
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(actions.register("B", "b@x.com").await);

    // 起始余额来自服务端，而不是客户端合成
    assert_eq!(session.get().unwrap().wallet, 1000.0);
    assert_eq!(*shell.visited.borrow(), vec![AppView::Shop]);

    let successes = shell.successes();
    assert_eq!(successes.len(), 1);
    assert!(successes[0].contains("1000"), "got: {}", successes[0]);
}

#[tokio::test]
async fn register_failure_notifies() {
    let gateway = MockGateway::new();
    gateway.offline.set(true);
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(!actions.register("B", "b@x.com").await);
    assert!(session.get().is_none());
    assert_eq!(shell.errors(), vec!["Registration failed".to_string()]);
}

#[tokio::test]
async fn logout_clears_session_unconditionally() {
    let gateway = MockGateway::new();
    let session = SessionStore::new();
    session.replace(alice());
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    actions.logout();

    assert!(session.get().is_none());
    assert_eq!(shell.successes(), vec!["Logged out".to_string()]);
    assert_eq!(gateway.calls(), 0);
}

// =========================================================
// Purchase
// =========================================================

#[tokio::test]
async fn purchase_without_session_makes_no_network_call() {
    let gateway = MockGateway::new();
    gateway.seed_product(widget());
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(actions.purchase(5, 20.0).await.is_none());

    assert_eq!(gateway.calls(), 0);
    assert_eq!(
        shell.notices.borrow().len(),
        1,
        "exactly one error notification"
    );
    assert_eq!(shell.errors(), vec!["Please login first".to_string()]);
}

#[tokio::test]
async fn purchase_without_confirmation_makes_no_network_call() {
    let gateway = MockGateway::new();
    gateway.seed_user(alice());
    gateway.seed_product(widget());
    let session = SessionStore::new();
    session.replace(alice());
    let shell = MockShell::new();
    shell.confirm_answer.set(false);
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(actions.purchase(5, 20.0).await.is_none());

    assert_eq!(shell.confirm_asked.get(), 1);
    assert_eq!(gateway.calls(), 0);
    assert!(shell.notices.borrow().is_empty());
}

#[tokio::test]
async fn purchase_success_refreshes_session_then_products() {
    let gateway = MockGateway::new();
    gateway.seed_user(alice());
    gateway.seed_product(widget());
    let session = SessionStore::new();
    session.replace(alice());
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    let fresh = actions.purchase(5, 20.0).await.expect("purchase succeeds");

    // 成功通知恰好一条，且带上服务端分配的订单号
    assert_eq!(shell.successes(), vec!["Order #1 confirmed!".to_string()]);
    assert!(shell.errors().is_empty());

    // 下单 -> 会话刷新 -> 商品刷新，顺序固定
    assert_eq!(
        *gateway.log.borrow(),
        vec![
            "orders:create:5x1".to_string(),
            "users:get:7".to_string(),
            "products:list".to_string(),
        ]
    );

    // 刷新结果：余额已扣款，库存已减一
    assert_eq!(session.get().unwrap().wallet, 980.0);
    assert_eq!(fresh[0].stock, 2);
}

#[tokio::test]
async fn purchase_rejection_surfaces_server_detail() {
    let gateway = MockGateway::new();
    gateway.seed_user(alice());
    gateway.seed_product(widget());
    *gateway.reject_order.borrow_mut() = Some(GatewayError::Status {
        code: 400,
        detail: Some("Insufficient funds".into()),
    });
    let session = SessionStore::new();
    session.replace(alice());
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(actions.purchase(5, 20.0).await.is_none());

    assert_eq!(shell.errors(), vec!["Insufficient funds".to_string()]);
    // 会话未被触碰，也没有后续刷新调用
    assert_eq!(session.get().unwrap(), alice());
    assert_eq!(*gateway.log.borrow(), vec!["orders:create:5x1".to_string()]);
}

#[tokio::test]
async fn purchase_rejection_without_detail_uses_fallback() {
    let gateway = MockGateway::new();
    gateway.seed_user(alice());
    gateway.seed_product(widget());
    *gateway.reject_order.borrow_mut() = Some(GatewayError::Status {
        code: 500,
        detail: None,
    });
    let session = SessionStore::new();
    session.replace(alice());
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(actions.purchase(5, 20.0).await.is_none());
    assert_eq!(shell.errors(), vec!["Purchase failed".to_string()]);
}

#[tokio::test]
async fn purchase_transport_failure_uses_transaction_text() {
    let gateway = MockGateway::new();
    let session = SessionStore::new();
    session.replace(alice());
    gateway.offline.set(true);
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(actions.purchase(5, 20.0).await.is_none());
    assert_eq!(shell.errors(), vec!["Transaction failed".to_string()]);
}

// =========================================================
// Admin actions
// =========================================================

#[tokio::test]
async fn create_product_notifies_without_local_insert() {
    let gateway = MockGateway::new();
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    let ok = actions
        .create_product(CreateProductRequest {
            name: "Keyboard".into(),
            price: 49.5,
            stock: 8,
        })
        .await;

    assert!(ok);
    assert_eq!(
        shell.successes(),
        vec!["Product added successfully!".to_string()]
    );
    assert_eq!(
        *gateway.log.borrow(),
        vec!["products:create:Keyboard".to_string()]
    );
}

#[tokio::test]
async fn create_product_failure_notifies() {
    let gateway = MockGateway::new();
    gateway.offline.set(true);
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(
        !actions
            .create_product(CreateProductRequest {
                name: "Keyboard".into(),
                price: 49.5,
                stock: 8,
            })
            .await
    );
    assert_eq!(shell.errors(), vec!["Failed to add product".to_string()]);
}

#[tokio::test]
async fn status_probe_reports_online_with_substatus() {
    let gateway = MockGateway::new();
    assert_eq!(
        check_status(&gateway).await,
        SystemHealth::Online("up".to_string())
    );
}

#[tokio::test]
async fn status_probe_never_fails() {
    let gateway = MockGateway::new();
    gateway.offline.set(true);
    assert_eq!(check_status(&gateway).await, SystemHealth::Offline);
}

#[tokio::test]
async fn stress_trigger_notices_before_and_after() {
    let gateway = MockGateway::new();
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    actions.run_stress(15, 2).await;

    assert_eq!(
        *shell.notices.borrow(),
        vec![
            ("Triggering load for 15s...".to_string(), Severity::Info),
            ("Stress test active!".to_string(), Severity::Success),
        ]
    );
    assert_eq!(*gateway.log.borrow(), vec!["stress:15x2".to_string()]);
}

#[tokio::test]
async fn stress_trigger_failure_notifies() {
    let gateway = MockGateway::new();
    gateway.offline.set(true);
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    actions.run_stress(15, 2).await;
    assert_eq!(shell.errors(), vec!["Failed to trigger stress".to_string()]);
}

// =========================================================
// View loads
// =========================================================

#[tokio::test]
async fn load_products_returns_list() {
    let gateway = MockGateway::new();
    gateway.seed_product(widget());
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    let list = actions.load_products().await.unwrap();
    assert_eq!(list, vec![widget()]);
    assert!(shell.notices.borrow().is_empty());
}

#[tokio::test]
async fn load_products_failure_notifies_once() {
    let gateway = MockGateway::new();
    gateway.fail_products.set(true);
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(actions.load_products().await.is_none());
    assert_eq!(shell.errors(), vec!["Failed to load products".to_string()]);
}

#[tokio::test]
async fn load_orders_is_scoped_to_current_session() {
    let gateway = MockGateway::new();
    gateway.orders.borrow_mut().extend([
        Order {
            id: 1,
            user_id: 7,
            product_id: 5,
            quantity: 1,
            status: "confirmed".into(),
        },
        Order {
            id: 2,
            user_id: 8,
            product_id: 5,
            quantity: 1,
            status: "confirmed".into(),
        },
    ]);
    let session = SessionStore::new();
    session.replace(alice());
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    let list = actions.load_orders().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, 1);
    assert_eq!(*gateway.log.borrow(), vec!["orders:list:7".to_string()]);
}

#[tokio::test]
async fn load_orders_without_session_is_silent() {
    let gateway = MockGateway::new();
    let session = SessionStore::new();
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(actions.load_orders().await.is_none());
    assert_eq!(gateway.calls(), 0);
    assert!(shell.notices.borrow().is_empty());
}

#[tokio::test]
async fn load_orders_failure_notifies() {
    let gateway = MockGateway::new();
    let session = SessionStore::new();
    session.replace(alice());
    gateway.offline.set(true);
    let shell = MockShell::new();
    let actions = AppActions::new(&gateway, &session, &shell);

    assert!(actions.load_orders().await.is_none());
    assert_eq!(shell.errors(), vec!["Failed to load orders".to_string()]);
}
