//! `/canteen` endpoints.

use tracing::instrument;

use campus_wallet_core::{Cart, OrderId};

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{BillResponse, Menu, OrderHistory, OrderRequest, PlacedOrder};

impl ApiClient {
    /// Items currently on sale.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn canteen_menu(&self) -> Result<Menu, ApiError> {
        self.get("/canteen/menu").await
    }

    /// Pay for the cart's contents and get the bill back.
    ///
    /// The cart itself is left untouched; callers clear it on success.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Encode` for an empty cart without contacting the
    /// API, otherwise the API's message (for example insufficient balance).
    #[instrument(skip(self, cart), fields(lines = cart.lines().len(), total = %cart.total()))]
    pub async fn place_order(&self, cart: &Cart) -> Result<PlacedOrder, ApiError> {
        if cart.is_empty() {
            return Err(ApiError::Encode("cart is empty".to_string()));
        }
        self.post("/canteen/order", &OrderRequest::from(cart)).await
    }

    /// The calling student's past orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn canteen_orders(&self) -> Result<OrderHistory, ApiError> {
        self.get("/canteen/orders").await
    }

    /// Bill for one of the caller's orders.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` (404) if the order does not belong to the caller.
    #[instrument(skip(self))]
    pub async fn order_bill(&self, order_id: OrderId) -> Result<BillResponse, ApiError> {
        self.get(&format!("/canteen/orders/{order_id}/bill")).await
    }
}
