//! Order history page.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use jiff::tz::TimeZone;
use storefront::{
    dates::{DisplayTimestamp, format_timestamp},
    money::format_rupiah,
    orders::{Order, OrderId},
    pagination::{PaginationControls, PaginationLinks, PaginationMeta, is_navigable},
    status::{StatusBadge, order_status_badge, payment_status_badge},
};
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::{
    api::{ApiError, StorefrontApi},
    lifetime::ViewState,
    navigation::{Navigator, Route, schedule_login_redirect},
};

const DEFAULT_SKELETON_ROWS: u32 = 5;
const SESSION_EXPIRED: &str =
    "Your session has expired. Please log in again to see your order history.";
const UNEXPECTED_FORMAT: &str = "The order data from the server has an unexpected format.";
const LOAD_FAILED: &str = "Failed to load your order history. Please try again in a moment.";

/// Page number from the `page` query parameter; anything but a positive integer is page 1.
#[must_use]
pub fn page_from_query(raw: Option<&str>) -> u32 {
    raw.and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    pub page: u32,

    pub loading: bool,

    pub orders: Vec<Order>,

    pub meta: Option<PaginationMeta>,

    pub links: Option<PaginationLinks>,

    pub error: Option<String>,

    /// Incremented per fetch; responses for older fetches are dropped.
    generation: u64,
}

impl HistoryState {
    fn new(page: u32) -> Self {
        Self {
            page,
            loading: true,
            orders: Vec::new(),
            meta: None,
            links: None,
            error: None,
            generation: 0,
        }
    }

    /// Placeholder rows while loading: the previous page size, or five.
    #[must_use]
    pub fn skeleton_rows(&self) -> u32 {
        self.meta
            .map(|meta| meta.per_page)
            .filter(|per_page| *per_page > 0)
            .unwrap_or(DEFAULT_SKELETON_ROWS)
    }

    /// The page loaded fine but holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.orders.is_empty()
    }

    #[must_use]
    pub fn pagination(&self) -> Option<PaginationControls> {
        self.meta
            .as_ref()
            .and_then(|meta| PaginationControls::new(meta, self.links.as_ref()))
    }

    #[must_use]
    pub fn rows(&self, zone: &TimeZone) -> Vec<OrderRow> {
        self.orders
            .iter()
            .map(|order| OrderRow::new(order, zone))
            .collect()
    }
}

/// One line of the order history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub order_id: OrderId,
    pub reference: String,
    pub placed_at: DisplayTimestamp,
    pub total: String,
    pub status: StatusBadge,
    pub payment: StatusBadge,
    pub detail: Route,
}

impl OrderRow {
    fn new(order: &Order, zone: &TimeZone) -> Self {
        Self {
            order_id: order.id,
            reference: order.reference(),
            placed_at: format_timestamp(
                order.created_at.as_deref().or(order.ordered_at.as_deref()),
                zone,
            ),
            total: format_rupiah(order.total_price),
            status: order_status_badge(order.status.as_deref()),
            payment: payment_status_badge(order.payment_status.as_deref()),
            detail: Route::OrderDetail { order_id: order.id },
        }
    }
}

pub struct OrderHistoryPage {
    api: Arc<dyn StorefrontApi>,
    navigator: Arc<dyn Navigator>,
    redirect_delay: Duration,
    state: ViewState<HistoryState>,
    redirect: Mutex<Option<JoinHandle<()>>>,
}

impl OrderHistoryPage {
    #[must_use]
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        navigator: Arc<dyn Navigator>,
        redirect_delay: Duration,
        page: u32,
    ) -> Self {
        Self {
            api,
            navigator,
            redirect_delay,
            state: ViewState::new(HistoryState::new(page.max(1))),
            redirect: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState<HistoryState> {
        &self.state
    }

    /// Fetch the current page.
    pub async fn load(&self) {
        let mut request = None;

        self.state.update(|state| {
            state.generation += 1;
            state.loading = true;
            state.error = None;
            request = Some((state.page, state.generation));
        });

        let Some((page, generation)) = request else {
            return;
        };

        match self.api.orders(page).await {
            Ok(list) => {
                self.state.update_if(|state| {
                    if state.generation != generation {
                        return false;
                    }

                    state.orders = list.data;
                    state.meta = list.meta;
                    state.links = list.links;
                    state.loading = false;

                    true
                });
            }
            Err(error) => {
                let message = match &error {
                    ApiError::Unauthenticated { .. } => SESSION_EXPIRED,
                    ApiError::MalformedResponse(detail) => {
                        warn!(%detail, "unexpected order history payload");
                        UNEXPECTED_FORMAT
                    }
                    _ => LOAD_FAILED,
                };

                error!(page, %error, "failed to load order history");

                let applied = self.state.update_if(|state| {
                    if state.generation != generation {
                        return false;
                    }

                    state.orders.clear();
                    state.meta = None;
                    state.links = None;
                    state.error = Some(message.to_string());
                    state.loading = false;

                    true
                });

                if applied && matches!(error, ApiError::Unauthenticated { .. }) {
                    let handle = schedule_login_redirect(
                        Arc::clone(&self.navigator),
                        self.state.lifetime(),
                        self.redirect_delay,
                        Route::OrderHistory { page }.path(),
                    );

                    if let Ok(mut redirect) = self.redirect.lock() {
                        *redirect = Some(handle);
                    }
                }
            }
        }
    }

    /// Switch to `target` and fetch it. Out-of-range targets and the current page are
    /// ignored.
    pub async fn go_to_page(&self, target: u32) -> bool {
        let (current, last) = self.state.with(|state| {
            (
                state.page,
                state.meta.map_or(state.page, |meta| meta.last_page),
            )
        });

        if !is_navigable(target, current, last) {
            return false;
        }

        if !self.state.update(|state| state.page = target) {
            return false;
        }

        self.navigator.navigate(Route::OrderHistory { page: target });
        self.navigator.scroll_to_top();

        self.load().await;

        true
    }

    /// Login redirect scheduled by the last load, if any. Awaiting it waits out the delay.
    pub fn take_redirect(&self) -> Option<JoinHandle<()>> {
        self.redirect.lock().ok().and_then(|mut redirect| redirect.take())
    }

    pub fn teardown(&self) {
        self.state.teardown();
    }
}
