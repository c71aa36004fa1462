//! End-to-end tests for the CLI screens against a stub API.

use serde_json::{Value, json};

use campus_wallet_cli::{CliError, commands};
use campus_wallet_core::{OrderId, Role, Rupees, SpendingCategory, UserId};
use campus_wallet_integration_tests::{StubApi, TestContext};

fn menu() -> Value {
    json!({"items": [
        {"id": 1, "name": "Masala Dosa", "price": 60, "category": "meals", "emoji": "🥞"},
        {"id": 2, "name": "Chai", "price": 10, "category": "drinks", "emoji": "☕"}
    ]})
}

fn spending(month: &str) -> Value {
    json!({
        "student_name": "asha",
        "month": month,
        "total_funded": 1000,
        "total_spent": 150,
        "balance": 850,
        "breakdown": {"food": 120, "events": 0, "stationery": 30}
    })
}

fn bill() -> Value {
    json!({
        "order_id": 12, "student_id": 3, "vendor": "Campus Canteen",
        "items": [
            {"name": "Masala Dosa", "emoji": "🥞", "qty": 1, "unit_price": 60, "line_total": 60},
            {"name": "Chai", "emoji": "☕", "qty": 2, "unit_price": 10, "line_total": 20}
        ],
        "total": 80, "txn_id": "TX1", "timestamp": "2026-02-14T12:00:00",
        "payment_method": "CampusToken (ASA)"
    })
}

// =============================================================================
// Session gating
// =============================================================================

#[tokio::test]
async fn test_dashboard_without_session_requires_login() {
    let stub = StubApi::builder().start().await;
    let ctx = TestContext::new(&stub);

    let err = commands::student::dashboard(ctx.app())
        .await
        .expect_err("no session");
    assert!(matches!(err, CliError::LoginRequired(Some(Role::Student))));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_wrong_role_is_sent_back_to_login() {
    let stub = StubApi::builder().start().await;
    let ctx = TestContext::new(&stub).logged_in("t1", 3, Role::Student);

    let err = commands::admin::dashboard(ctx.app())
        .await
        .expect_err("student on admin screen");
    assert!(err.needs_login());
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_unauthorized_response_clears_session() {
    let stub = StubApi::builder()
        .json("GET", "/student/summary", 401, json!({"msg": "Token has expired"}))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("stale", 3, Role::Student);

    let err = commands::student::dashboard(ctx.app())
        .await
        .expect_err("expired");
    assert!(matches!(err, CliError::SessionExpired));
    assert!(ctx.reopened_session().read_token().is_none());
    assert_eq!(ctx.reopened_session().read_user().expect("readable"), None);
}

#[tokio::test]
async fn test_forbidden_response_keeps_session() {
    let stub = StubApi::builder()
        .json("GET", "/admin/stats", 403, json!({"error": "Admin access only"}))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 1, Role::Admin);

    let err = commands::admin::dashboard(ctx.app())
        .await
        .expect_err("forbidden");
    assert_eq!(err.to_string(), "Admin access only");
    assert!(ctx.session().read_token().is_some());
}

#[tokio::test]
async fn test_corrupt_session_file_requires_login() {
    let stub = StubApi::builder().start().await;
    let ctx = TestContext::new(&stub);
    std::fs::write(&ctx.config().session_file, "{not json").expect("write corrupt file");

    let err = commands::parent::dashboard(ctx.app(), None, None)
        .await
        .expect_err("corrupt session");
    assert!(matches!(err, CliError::LoginRequired(Some(Role::Parent))));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_whoami_on_corrupt_session_file_is_logged_out() {
    let stub = StubApi::builder().start().await;
    let ctx = TestContext::new(&stub);
    std::fs::write(&ctx.config().session_file, "{not json").expect("write corrupt file");

    assert_eq!(commands::auth::whoami(ctx.app()).expect("whoami"), "Not logged in.");
    assert_eq!(ctx.session().read_user().expect("treated as absent"), None);
}

// =============================================================================
// Auth commands
// =============================================================================

#[tokio::test]
async fn test_login_logout_whoami() {
    let stub = StubApi::builder()
        .json(
            "POST",
            "/auth/login",
            200,
            json!({"token": "t1", "user_id": 7, "role": "parent"}),
        )
        .start()
        .await;
    let ctx = TestContext::new(&stub);

    assert_eq!(commands::auth::whoami(ctx.app()).expect("whoami"), "Not logged in.");

    let out = commands::auth::login(ctx.app(), "bob", "pw")
        .await
        .expect("login");
    assert!(out.contains("User ID: 7"));
    assert!(out.contains("campus-wallet parent show"));

    let who = commands::auth::whoami(ctx.app()).expect("whoami");
    assert!(who.contains("Role: Parent"));

    commands::auth::logout(ctx.app()).expect("logout");
    assert!(!ctx.config().session_file.exists());
    assert_eq!(commands::auth::whoami(ctx.app()).expect("whoami"), "Not logged in.");
}

#[tokio::test]
async fn test_register_parent_with_link() {
    let stub = StubApi::builder()
        .json(
            "POST",
            "/auth/register",
            201,
            json!({"message": "User registered", "user_id": 8, "role": "parent"}),
        )
        .start()
        .await;
    let ctx = TestContext::new(&stub);

    let out = commands::auth::register(ctx.app(), "bob", "pw", Role::Parent, Some(UserId::new(3)))
        .await
        .expect("register");
    assert_eq!(out, "Registered! User ID: 8. You can now login.");

    let request = stub.last_request_to("POST", "/auth/register").expect("sent");
    assert_eq!(
        request.body,
        Some(json!({"username": "bob", "password": "pw", "role": "parent", "linked_student_id": 3}))
    );
}

#[tokio::test]
async fn test_register_rejects_admin_and_student_links() {
    let stub = StubApi::builder().start().await;
    let ctx = TestContext::new(&stub);

    let admin = commands::auth::register(ctx.app(), "root", "pw", Role::Admin, None).await;
    assert!(matches!(admin, Err(CliError::InvalidInput(_))));

    let student =
        commands::auth::register(ctx.app(), "asha", "pw", Role::Student, Some(UserId::new(1)))
            .await;
    assert!(matches!(student, Err(CliError::InvalidInput(_))));
    assert!(stub.requests().is_empty());
}

// =============================================================================
// Student and canteen
// =============================================================================

#[tokio::test]
async fn test_student_dashboard() {
    let stub = StubApi::builder()
        .json(
            "GET",
            "/student/summary",
            200,
            json!({
                "user_id": 3, "username": "asha", "month": "2026-02",
                "total_spent": 150, "balance": 850,
                "breakdown": {"food": 120, "events": 0, "stationery": 30},
                "recent_transactions": [
                    {"amount": 120, "category": "food", "vendor": "Campus Canteen", "time": "2026-02-14T10:22:33"}
                ]
            }),
        )
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 3, Role::Student);

    let out = commands::student::dashboard(ctx.app()).await.expect("dashboard");
    assert!(out.contains("Student ID: 3"));
    assert!(out.contains("Balance: ₹850"));
    assert!(out.contains("Campus Canteen"));
}

#[tokio::test]
async fn test_canteen_order_places_merged_cart_and_prints_bill() {
    let stub = StubApi::builder()
        .json("GET", "/canteen/menu", 200, menu())
        .json("GET", "/student/balance", 200, json!({"balance": 500}))
        .json(
            "POST",
            "/canteen/order",
            201,
            json!({"message": "Order placed!", "order_id": 12, "txn_id": "TX1", "bill": bill()}),
        )
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 3, Role::Student);

    let items = vec!["1".to_string(), "2".to_string(), "2".to_string()];
    let out = commands::canteen::order(ctx.app(), &items)
        .await
        .expect("order");
    assert!(out.contains("Total: ₹80"));
    assert!(out.contains("Order placed!"));
    assert!(out.contains("Order #12"));
    assert!(out.contains("Grand Total: ₹80"));

    let request = stub.last_request_to("POST", "/canteen/order").expect("sent");
    assert_eq!(
        request.body,
        Some(json!({"items": [{"id": 1, "qty": 1}, {"id": 2, "qty": 2}]}))
    );
}

#[tokio::test]
async fn test_canteen_order_over_balance_is_refused_locally() {
    let stub = StubApi::builder()
        .json("GET", "/canteen/menu", 200, menu())
        .json("GET", "/student/balance", 200, json!({"balance": 50}))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 3, Role::Student);

    let items = vec!["1:2".to_string()];
    let err = commands::canteen::order(ctx.app(), &items)
        .await
        .expect_err("too expensive");
    assert!(err.to_string().contains("Insufficient balance! Need ₹70 more."));
    assert!(stub.requests_to("POST", "/canteen/order").is_empty());
}

#[tokio::test]
async fn test_canteen_order_unknown_item() {
    let stub = StubApi::builder()
        .json("GET", "/canteen/menu", 200, menu())
        .json("GET", "/student/balance", 200, json!({"balance": 500}))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 3, Role::Student);

    let err = commands::canteen::order(ctx.app(), &["99".to_string()])
        .await
        .expect_err("unknown item");
    assert_eq!(err.to_string(), "No menu item with ID 99");
}

#[tokio::test]
async fn test_canteen_menu_orders_and_bill() {
    let stub = StubApi::builder()
        .json("GET", "/canteen/menu", 200, menu())
        .json("GET", "/student/balance", 200, json!({"balance": 500}))
        .json(
            "GET",
            "/canteen/orders",
            200,
            json!({"orders": [{
                "id": 12, "total": 80, "txn_id": "TX1", "status": "paid",
                "time": "2026-02-14T12:00:00",
                "items": [{"name": "Chai", "emoji": "☕", "qty": 2, "price": 10}]
            }]}),
        )
        .json("GET", "/canteen/orders/12/bill", 200, json!({"bill": bill()}))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 3, Role::Student);

    let menu = commands::canteen::menu(ctx.app()).await.expect("menu");
    assert!(menu.contains("Balance: ₹500"));
    assert!(menu.contains("Meals"));
    assert!(menu.contains("Masala Dosa"));

    let orders = commands::canteen::orders(ctx.app()).await.expect("orders");
    assert!(orders.contains("Order #12"));
    assert!(orders.contains("☕ Chai ×2"));

    let bill = commands::canteen::bill(ctx.app(), OrderId::new(12))
        .await
        .expect("bill");
    assert!(bill.contains("TX1"));
    assert!(bill.contains("CampusToken (ASA)"));
}

// =============================================================================
// Parent
// =============================================================================

#[tokio::test]
async fn test_parent_dashboard_selects_first_student_and_current_month() {
    let month = commands::parent::current_month();
    let stub = StubApi::builder()
        .json(
            "GET",
            "/parent/students",
            200,
            json!({"students": [{"id": 5, "name": "asha"}, {"id": 6, "name": "ravi"}]}),
        )
        .json("GET", "/parent/spending", 200, spending(&month))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 7, Role::Parent);

    let out = commands::parent::dashboard(ctx.app(), None, None)
        .await
        .expect("dashboard");
    assert!(out.contains("> [5] asha"));
    assert!(out.contains("Funded This Month: ₹1000"));
    assert!(out.contains("not visible to parents"));

    let request = stub
        .last_request_to("GET", "/parent/spending")
        .expect("sent");
    assert_eq!(
        request.query,
        Some(format!("student_id=5&month={month}"))
    );
}

#[tokio::test]
async fn test_parent_dashboard_without_students_prompts_link() {
    let stub = StubApi::builder()
        .json("GET", "/parent/students", 200, json!({"students": []}))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 7, Role::Parent);

    let out = commands::parent::dashboard(ctx.app(), None, Some("2026-02"))
        .await
        .expect("dashboard");
    assert!(out.contains("Link a Student"));
    assert!(stub.requests_to("GET", "/parent/spending").is_empty());
}

#[tokio::test]
async fn test_parent_fund_refreshes_spending() {
    let stub = StubApi::builder()
        .json(
            "POST",
            "/parent/fund",
            200,
            json!({"message": "Sent ₹500 to asha", "tokens_sent": 500, "txn_id": "TX2"}),
        )
        .json("GET", "/parent/students", 200, json!({"students": [{"id": 5, "name": "asha"}]}))
        .json("GET", "/parent/spending", 200, spending("2026-02"))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 7, Role::Parent);

    let out = commands::parent::fund(ctx.app(), UserId::new(5), Rupees::new(500))
        .await
        .expect("fund");
    assert!(out.starts_with("Sent ₹500 to asha"));
    assert!(out.contains("Balance: ₹850"));
    assert_eq!(stub.requests_to("POST", "/parent/fund").len(), 1);
}

#[tokio::test]
async fn test_parent_fund_conflict_message() {
    let stub = StubApi::builder()
        .json("POST", "/parent/fund", 409, json!({"error": "insufficient link"}))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 7, Role::Parent);

    let err = commands::parent::fund(ctx.app(), UserId::new(5), Rupees::new(100))
        .await
        .expect_err("conflict");
    assert_eq!(err.to_string(), "insufficient link");
}

#[tokio::test]
async fn test_parent_fund_rejects_non_positive_amount() {
    let stub = StubApi::builder().start().await;
    let ctx = TestContext::new(&stub).logged_in("t1", 7, Role::Parent);

    let err = commands::parent::fund(ctx.app(), UserId::new(5), Rupees::new(0))
        .await
        .expect_err("zero");
    assert!(matches!(err, CliError::InvalidInput(_)));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_parent_link_uses_stored_parent_id() {
    let stub = StubApi::builder()
        .json("POST", "/auth/link-student", 200, json!({"message": "Linked"}))
        .json("GET", "/parent/students", 200, json!({"students": [{"id": 5, "name": "asha"}]}))
        .json("GET", "/parent/spending", 200, spending("2026-02"))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 7, Role::Parent);

    let out = commands::parent::link(ctx.app(), UserId::new(5))
        .await
        .expect("link");
    assert!(out.starts_with("Student linked successfully!"));

    let request = stub
        .last_request_to("POST", "/auth/link-student")
        .expect("sent");
    assert_eq!(request.body, Some(json!({"parent_id": 7, "student_id": 5})));
}

// =============================================================================
// Vendor and admin
// =============================================================================

#[tokio::test]
async fn test_unregistered_vendor_is_prompted_to_register() {
    let stub = StubApi::builder()
        .json("GET", "/vendor/qr", 404, json!({"error": "Vendor not registered"}))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 9, Role::Vendor);

    let out = commands::vendor::dashboard(ctx.app()).await.expect("dashboard");
    assert!(out.contains("Register Your Vendor"));
    assert!(stub.requests_to("GET", "/vendor/balance").is_empty());
}

#[tokio::test]
async fn test_vendor_pay_refreshes_balance() {
    let stub = StubApi::builder()
        .json(
            "GET",
            "/vendor/qr",
            200,
            json!({"qr_data": "{\"vendor_id\":2}", "display": {"vendor": "Print Hub", "category": "stationery"}}),
        )
        .json("GET", "/vendor/balance", 200, json!({"balance": 380}))
        .json("POST", "/vendor/pay", 200, json!({"message": "Payment received", "txn_id": "TX9"}))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 9, Role::Vendor);

    let out = commands::vendor::pay(
        ctx.app(),
        UserId::new(3),
        Rupees::new(40),
        SpendingCategory::Stationery,
    )
    .await
    .expect("pay");
    assert!(out.starts_with("Payment of ₹40 received (stationery)"));
    assert!(out.contains("Tokens Received: ₹380"));
}

#[tokio::test]
async fn test_vendor_dashboard_survives_missing_balance() {
    let stub = StubApi::builder()
        .json(
            "GET",
            "/vendor/qr",
            200,
            json!({"qr_data": "{}", "display": {"vendor": "Print Hub", "category": "stationery"}}),
        )
        .json("GET", "/vendor/balance", 500, json!({"error": "Indexer unavailable"}))
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 9, Role::Vendor);

    let out = commands::vendor::dashboard(ctx.app()).await.expect("dashboard");
    assert!(out.contains("Tokens Received: unavailable"));
    assert_eq!(stub.requests_to("GET", "/vendor/qr").len(), 1);
}

#[tokio::test]
async fn test_vendor_orders() {
    let stub = StubApi::builder()
        .json(
            "GET",
            "/vendor/orders",
            200,
            json!({"orders": [{"id": 5, "student_id": 3, "total": 40, "txn_id": "TX", "status": "paid", "time": "2026-02-14T12:00:00"}]}),
        )
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 9, Role::Vendor);

    let out = commands::vendor::orders(ctx.app()).await.expect("orders");
    assert!(out.contains("#5"));
}

#[tokio::test]
async fn test_admin_dashboard() {
    let stub = StubApi::builder()
        .json(
            "GET",
            "/admin/stats",
            200,
            json!({
                "users": {"students": 12, "parents": 8, "vendors": 3},
                "financials": {"total_funded": 5000, "total_spent": 1200, "total_transactions": 41},
                "spending_by_category": {"food": 1000, "events": 200}
            }),
        )
        .start()
        .await;
    let ctx = TestContext::new(&stub).logged_in("t1", 1, Role::Admin);

    let out = commands::admin::dashboard(ctx.app()).await.expect("dashboard");
    assert!(out.contains("Students: 12"));
    assert!(out.contains("Total Spent: ₹1200"));
    assert!(out.contains("📊 All-Time Spending by Category"));
}
