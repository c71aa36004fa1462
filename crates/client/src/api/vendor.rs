//! `/vendor` endpoints.

use tracing::{debug, instrument};

use campus_wallet_core::{Rupees, SpendingCategory, UserId};

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{
    Balance, PaymentReceipt, RegisteredVendor, VendorOrders, VendorPayment, VendorQr,
    VendorRegistration,
};

impl ApiClient {
    /// Register the calling vendor account as a shop.
    ///
    /// # Errors
    ///
    /// Returns the API's message if the vendor is already registered.
    #[instrument(skip(self))]
    pub async fn register_vendor(
        &self,
        name: &str,
        category: SpendingCategory,
    ) -> Result<RegisteredVendor, ApiError> {
        let body = VendorRegistration {
            name: name.to_string(),
            category,
        };
        self.post("/vendor/register", &body).await
    }

    /// Payment QR payload for the calling vendor.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` if the vendor has not registered a shop.
    #[instrument(skip(self))]
    pub async fn vendor_qr(&self) -> Result<VendorQr, ApiError> {
        self.get("/vendor/qr").await
    }

    /// Payment QR payload, or `None` if the vendor has not registered a shop.
    ///
    /// Any API error other than 401 from `/vendor/qr` means "not registered".
    ///
    /// # Errors
    ///
    /// Propagates 401s along with transport and decode failures, which say
    /// nothing about registration.
    #[instrument(skip(self))]
    pub async fn registered_vendor_qr(&self) -> Result<Option<VendorQr>, ApiError> {
        match self.vendor_qr().await {
            Ok(qr) => Ok(Some(qr)),
            Err(ApiError::Api { status, message }) if status != 401 => {
                debug!(status, message = %message, "Vendor not registered");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Whether the calling vendor has registered a shop.
    ///
    /// # Errors
    ///
    /// Same as [`Self::registered_vendor_qr`].
    #[instrument(skip(self))]
    pub async fn vendor_is_registered(&self) -> Result<bool, ApiError> {
        Ok(self.registered_vendor_qr().await?.is_some())
    }

    /// The vendor's wallet balance.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` (403) for non-vendor callers.
    #[instrument(skip(self))]
    pub async fn vendor_balance(&self) -> Result<Balance, ApiError> {
        self.get("/vendor/balance").await
    }

    /// Orders paid to the calling vendor.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` (403) for non-vendor callers.
    #[instrument(skip(self))]
    pub async fn vendor_orders(&self) -> Result<VendorOrders, ApiError> {
        self.get("/vendor/orders").await
    }

    /// Charge a student directly.
    ///
    /// Not idempotent: calling twice charges twice.
    ///
    /// # Errors
    ///
    /// Returns the API's message for unknown students or insufficient balance.
    #[instrument(skip(self))]
    pub async fn vendor_pay(
        &self,
        student_id: UserId,
        amount: Rupees,
        category: SpendingCategory,
    ) -> Result<PaymentReceipt, ApiError> {
        let body = VendorPayment {
            student_id,
            amount,
            category,
        };
        self.post("/vendor/pay", &body).await
    }
}
