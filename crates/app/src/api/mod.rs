//! Storefront REST API.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront::{
    cart::CartLine,
    checkout::OrderCreationRequest,
    orders::{Order, OrderId},
    pagination::Paginated,
    upload::ProofFile,
    users::UserProfile,
};

mod errors;
mod http;

pub use errors::{ApiError, FieldErrors};
pub use http::HttpStorefrontApi;

/// Server acknowledgement of an uploaded payment proof.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProofReceipt {
    /// Confirmation text to show the customer.
    #[serde(default)]
    pub message: Option<String>,

    /// Any further payload, usually the updated order.
    #[serde(default)]
    pub data: Option<Value>,
}

#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Profile of the signed-in customer.
    async fn current_user(&self) -> Result<UserProfile, ApiError>;

    /// Lines of the customer's cart.
    async fn cart(&self) -> Result<Vec<CartLine>, ApiError>;

    /// Place an order. Succeeds only when the response carries the new order's id.
    async fn create_order(&self, request: OrderCreationRequest) -> Result<Order, ApiError>;

    /// A single order.
    async fn order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// One page of the customer's orders.
    async fn orders(&self, page: u32) -> Result<Paginated<Order>, ApiError>;

    /// Upload a proof of payment for an order.
    async fn submit_payment_proof(
        &self,
        id: OrderId,
        file: ProofFile,
    ) -> Result<ProofReceipt, ApiError>;
}
