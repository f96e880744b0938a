//! HTTP client for the storefront REST API.

use async_trait::async_trait;
use reqwest::{
    Client, Method, RequestBuilder,
    header::ACCEPT,
    multipart::{Form, Part},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use storefront::{
    cart::CartLine,
    checkout::OrderCreationRequest,
    orders::{Order, OrderId},
    pagination::Paginated,
    upload::{PROOF_FIELD, ProofFile},
    users::UserProfile,
};
use tracing::{debug, warn};

use super::{ApiError, ProofReceipt, StorefrontApi};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// Decode each order of a listing on its own; rows that do not decode are logged and left out.
fn decode_orders(list: Paginated<Value>) -> Paginated<Order> {
    let data = list
        .data
        .into_iter()
        .filter_map(|row| {
            serde_json::from_value(row)
                .inspect_err(|error| warn!(%error, "skipping undecodable order row"))
                .ok()
        })
        .collect();

    Paginated {
        data,
        meta: list.meta,
        links: list.links,
    }
}

/// [`StorefrontApi`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl HttpStorefrontApi {
    /// Create a client for the API rooted at `base_url`, authenticating with `token` when
    /// one is given.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|token| !token.is_empty()),
            http: Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .header(ACCEPT, "application/json");

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(%url, %status, "request failed");

            return Err(ApiError::from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|error| {
            warn!(%url, %error, body = %body, "unexpected response payload");

            ApiError::MalformedResponse(error.to_string())
        })
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    #[tracing::instrument(name = "storefront.api.current_user", skip(self), err)]
    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.send(self.request(Method::GET, "/user")).await
    }

    #[tracing::instrument(name = "storefront.api.cart", skip(self), err)]
    async fn cart(&self) -> Result<Vec<CartLine>, ApiError> {
        let envelope: ListEnvelope<CartLine> = self.send(self.request(Method::GET, "/cart")).await?;

        Ok(envelope.data)
    }

    #[tracing::instrument(
        name = "storefront.api.create_order",
        skip(self, request),
        fields(items = request.items.len()),
        err
    )]
    async fn create_order(&self, request: OrderCreationRequest) -> Result<Order, ApiError> {
        let envelope: Envelope<Order> = self
            .send(self.request(Method::POST, "/orders").json(&request))
            .await?;

        Ok(envelope.data)
    }

    #[tracing::instrument(name = "storefront.api.order", skip(self), fields(order_id = %id), err)]
    async fn order(&self, id: OrderId) -> Result<Order, ApiError> {
        let envelope: Envelope<Order> = self
            .send(self.request(Method::GET, &format!("/orders/{id}")))
            .await?;

        Ok(envelope.data)
    }

    #[tracing::instrument(name = "storefront.api.orders", skip(self), err)]
    async fn orders(&self, page: u32) -> Result<Paginated<Order>, ApiError> {
        let list: Paginated<Value> = self
            .send(self.request(Method::GET, "/orders").query(&[("page", page)]))
            .await?;

        Ok(decode_orders(list))
    }

    #[tracing::instrument(
        name = "storefront.api.submit_payment_proof",
        skip(self, file),
        fields(order_id = %id, file_name = file.file_name(), bytes = file.len()),
        err
    )]
    async fn submit_payment_proof(
        &self,
        id: OrderId,
        file: ProofFile,
    ) -> Result<ProofReceipt, ApiError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.file_name().to_string())
            .mime_str(file.format().mime_type())?;

        let form = Form::new().part(PROOF_FIELD, part);

        self.send(
            self.request(Method::POST, &format!("/orders/{id}/submit-payment-proof"))
                .multipart(form),
        )
        .await
    }
}
