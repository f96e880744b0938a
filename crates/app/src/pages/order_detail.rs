//! Order detail page.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use jiff::tz::TimeZone;
use storefront::{
    dates::{DisplayTimestamp, format_timestamp},
    images::{DETAIL_THUMBNAIL, ImageSource, ImageUrls},
    money::format_rupiah,
    orders::{Order, OrderId, parse_order_id},
    status::{StatusBadge, order_status_badge, payment_status_badge},
};
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::{
    api::{ApiError, StorefrontApi},
    lifetime::ViewState,
    navigation::{Navigator, Route, schedule_login_redirect},
};

const INVALID_ID: &str = "Invalid order id.";
const NOT_FOUND: &str = "Order not found.";
const NOT_ALLOWED: &str = "You are not allowed to view this order. Please log in again.";
const NO_CONNECTION: &str = "Failed to load order details. Check your connection.";
const INVALID_DATA: &str = "Failed to load order details: invalid data format.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub loading: bool,

    pub order: Option<Order>,

    pub error: Option<String>,

    /// Proof of payment image, tracking its placeholder fallback.
    pub proof_image: Option<ImageSource>,

    /// Item thumbnails, in item order.
    pub item_images: Vec<ImageSource>,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            loading: true,
            order: None,
            error: None,
            proof_image: None,
            item_images: Vec::new(),
        }
    }
}

/// Render model of one ordered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub key: Option<u64>,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
    pub image: ImageSource,
    /// Product page, when the item still links to one.
    pub product: Option<Route>,
}

/// Render model of a loaded order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetailView {
    pub order_id: OrderId,
    pub reference: Option<String>,
    pub placed_at: DisplayTimestamp,
    pub status: StatusBadge,
    pub payment: StatusBadge,
    pub payment_method: String,
    pub transaction_id: Option<String>,
    pub recipient_name: String,
    pub phone_number: String,
    pub address: String,
    pub note: Option<String>,
    /// "name (email)" of the ordering account.
    pub account: Option<String>,
    pub proof_image: Option<ImageSource>,
    pub proof_url: Option<String>,
    pub items: Vec<ItemRow>,
    pub total: String,
}

impl OrderDetailView {
    fn new(state: &DetailState, order: &Order, zone: &TimeZone) -> Self {
        let items = order
            .items
            .iter()
            .zip(&state.item_images)
            .map(|(item, image)| ItemRow {
                key: item.key(),
                name: item
                    .name
                    .clone()
                    .unwrap_or_else(|| "Unnamed item".to_string()),
                quantity: item.quantity.unwrap_or_default(),
                unit_price: format_rupiah(Some(item.unit_price.unwrap_or_default())),
                subtotal: format_rupiah(Some(item.subtotal())),
                image: image.clone(),
                product: item
                    .slug
                    .clone()
                    .filter(|slug| !slug.is_empty())
                    .map(|slug| Route::Product { slug }),
            })
            .collect();

        Self {
            order_id: order.id,
            reference: order.midtrans_order_id.clone(),
            placed_at: format_timestamp(order.placed_at(), zone),
            status: order_status_badge(order.status.as_deref()),
            payment: payment_status_badge(order.payment_status.as_deref()),
            payment_method: display_or_dash(order.payment_method.as_deref()),
            transaction_id: order.midtrans_transaction_id.clone(),
            recipient_name: display_or_dash(order.recipient_name.as_deref()),
            phone_number: display_or_dash(order.phone_number.as_deref()),
            address: display_or_dash(order.address.as_deref()),
            note: order.note.clone().filter(|note| !note.trim().is_empty()),
            account: order.user.as_ref().map(|user| {
                format!(
                    "{} ({})",
                    user.name.as_deref().unwrap_or_default(),
                    user.email.as_deref().unwrap_or_default()
                )
            }),
            proof_image: state.proof_image.clone(),
            proof_url: order.payment_proof_url.clone(),
            items,
            total: format_rupiah(order.total_price),
        }
    }
}

fn display_or_dash(value: Option<&str>) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

/// User-facing message for a failed order read.
#[must_use]
pub fn detail_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::NotFound { .. } => NOT_FOUND.to_string(),
        ApiError::Unauthenticated { .. } | ApiError::Forbidden { .. } => NOT_ALLOWED.to_string(),
        ApiError::Server { status_text, .. } => format!(
            "Failed to load order details. Server: {}",
            status_text.as_deref().unwrap_or("Error")
        ),
        ApiError::Validation { .. } => "Failed to load order details. Server: Error".to_string(),
        ApiError::Transport(_) => NO_CONNECTION.to_string(),
        ApiError::MalformedResponse(_) => INVALID_DATA.to_string(),
    }
}

pub struct OrderDetailPage {
    api: Arc<dyn StorefrontApi>,
    navigator: Arc<dyn Navigator>,
    redirect_delay: Duration,
    images: ImageUrls,
    zone: TimeZone,
    order_id: Option<String>,
    state: ViewState<DetailState>,
    redirect: Mutex<Option<JoinHandle<()>>>,
}

impl OrderDetailPage {
    /// Page for the raw `id` route parameter.
    #[must_use]
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        navigator: Arc<dyn Navigator>,
        redirect_delay: Duration,
        images: ImageUrls,
        zone: TimeZone,
        order_id: Option<&str>,
    ) -> Self {
        Self {
            api,
            navigator,
            redirect_delay,
            images,
            zone,
            order_id: order_id.map(str::to_string),
            state: ViewState::new(DetailState::default()),
            redirect: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState<DetailState> {
        &self.state
    }

    /// Fetch the order. A missing or malformed id fails without a request.
    pub async fn load(&self) {
        let order_id = match parse_order_id(self.order_id.as_deref()) {
            Ok(order_id) => order_id,
            Err(error) => {
                warn!(%error, "order detail opened without a valid id");

                self.state.update(|state| {
                    state.error = Some(INVALID_ID.to_string());
                    state.loading = false;
                });

                return;
            }
        };

        self.state.update(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.api.order(order_id).await {
            Ok(order) => {
                let proof_image = order
                    .payment_proof_url
                    .as_deref()
                    .filter(|url| !url.is_empty())
                    .map(ImageSource::new);
                let item_images = order
                    .items
                    .iter()
                    .map(|item| {
                        self.images
                            .thumbnail_source(item.primary_image.as_deref(), DETAIL_THUMBNAIL)
                    })
                    .collect();

                self.state.update(|state| {
                    state.order = Some(order);
                    state.proof_image = proof_image;
                    state.item_images = item_images;
                    state.loading = false;
                });
            }
            Err(error) => {
                error!(%order_id, %error, "failed to load order detail");

                let message = detail_failure_message(&error);

                let applied = self.state.update(|state| {
                    state.order = None;
                    state.proof_image = None;
                    state.item_images.clear();
                    state.error = Some(message);
                    state.loading = false;
                });

                if applied && error.is_auth() {
                    let handle = schedule_login_redirect(
                        Arc::clone(&self.navigator),
                        self.state.lifetime(),
                        self.redirect_delay,
                        Route::OrderDetail { order_id }.path(),
                    );

                    if let Ok(mut redirect) = self.redirect.lock() {
                        *redirect = Some(handle);
                    }
                }
            }
        }
    }

    #[must_use]
    pub fn detail(&self) -> Option<OrderDetailView> {
        self.state.with(|state| {
            state
                .order
                .as_ref()
                .map(|order| OrderDetailView::new(state, order, &self.zone))
        })
    }

    /// The proof image failed to load; fall back once, then give up.
    pub fn proof_image_failed(&self) {
        self.state.update(|state| {
            if let Some(image) = state.proof_image.as_mut() {
                image.on_error();
            }
        });
    }

    /// An item thumbnail failed to load; fall back once, then give up.
    pub fn item_image_failed(&self, index: usize) {
        self.state.update(|state| {
            if let Some(image) = state.item_images.get_mut(index) {
                image.on_error();
            }
        });
    }

    /// Login redirect scheduled by the last load, if any. Awaiting it waits out the delay.
    pub fn take_redirect(&self) -> Option<JoinHandle<()>> {
        self.redirect.lock().ok().and_then(|mut redirect| redirect.take())
    }

    pub fn teardown(&self) {
        self.state.teardown();
    }
}
