//! Canteen commands: menu, ordering, history and bills.

use askama::Template;
use tracing::{info, instrument};

use campus_wallet_core::{Cart, MenuItemId, OrderId, Role};

use crate::app::App;
use crate::error::CliError;
use crate::views::canteen::{BillTemplate, CartTemplate, MenuTemplate, OrdersTemplate};
use crate::views::shortfall;

/// Parse `id[:qty]` order items. A missing quantity means one.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for malformed IDs or zero quantities.
pub fn parse_order_items(items: &[String]) -> Result<Vec<(MenuItemId, u32)>, CliError> {
    items
        .iter()
        .map(|raw| {
            let (id, qty) = raw.split_once(':').unwrap_or((raw.as_str(), "1"));
            let id = id
                .parse::<MenuItemId>()
                .map_err(|_| CliError::InvalidInput(format!("Invalid menu item ID: {raw}")))?;
            let qty = qty
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|qty| *qty > 0)
                .ok_or_else(|| CliError::InvalidInput(format!("Invalid quantity: {raw}")))?;
            Ok((id, qty))
        })
        .collect()
}

/// Menu grouped by category, with the current balance.
///
/// # Errors
///
/// Returns error if the session is not a student's or an API call fails.
#[instrument(skip(app))]
pub async fn menu(app: &App) -> Result<String, CliError> {
    app.require_role(Role::Student)?;
    let (menu, balance) = tokio::join!(
        app.client().canteen_menu(),
        app.client().student_balance()
    );
    let menu = app.authorized(menu)?;
    let balance = app.authorized(balance)?;
    Ok(MenuTemplate::new(&menu, balance.balance).render()?)
}

/// Build a cart from `id[:qty]` items, show it, and pay for it.
///
/// The order is refused locally when the cart total exceeds the balance.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for unknown items or an unaffordable
/// cart, otherwise any API failure.
#[instrument(skip(app))]
pub async fn order(app: &App, items: &[String]) -> Result<String, CliError> {
    app.require_role(Role::Student)?;
    let wanted = parse_order_items(items)?;
    if wanted.is_empty() {
        return Err(CliError::InvalidInput(
            "Name at least one menu item to order".to_string(),
        ));
    }

    let (menu, balance) = tokio::join!(
        app.client().canteen_menu(),
        app.client().student_balance()
    );
    let menu = app.authorized(menu)?;
    let balance = app.authorized(balance)?.balance;

    let mut cart = Cart::new();
    for (id, qty) in wanted {
        let item = menu
            .find(id)
            .ok_or_else(|| CliError::InvalidInput(format!("No menu item with ID {id}")))?;
        cart.add(item.id, &format!("{} {}", item.emoji, item.name), item.price, qty);
    }

    let preview = CartTemplate::new(&cart, balance).render()?;
    if shortfall(cart.total(), balance).is_some() {
        return Err(CliError::InvalidInput(preview));
    }

    let placed = app.authorized(app.client().place_order(&cart).await)?;
    info!(order_id = %placed.order_id, total = %placed.bill.total, "Order placed");

    let message = if placed.message.is_empty() {
        "Order placed!".to_string()
    } else {
        placed.message
    };
    let bill = BillTemplate::from(&placed.bill).render()?;
    Ok(format!("{preview}\n\n{message}\n\n{bill}"))
}

/// Past orders.
///
/// # Errors
///
/// Returns error if the session is not a student's or the API call fails.
#[instrument(skip(app))]
pub async fn orders(app: &App) -> Result<String, CliError> {
    app.require_role(Role::Student)?;
    let history = app.authorized(app.client().canteen_orders().await)?;
    Ok(OrdersTemplate::from(&history).render()?)
}

/// Receipt for one order.
///
/// # Errors
///
/// Returns error if the session is not a student's or the API call fails.
#[instrument(skip(app))]
pub async fn bill(app: &App, order_id: OrderId) -> Result<String, CliError> {
    app.require_role(Role::Student)?;
    let response = app.authorized(app.client().order_bill(order_id).await)?;
    Ok(BillTemplate::from(&response.bill).render()?)
}
