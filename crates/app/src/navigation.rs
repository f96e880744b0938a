//! Navigation between storefront views.

use std::{sync::Arc, time::Duration};

use mockall::automock;
use storefront::orders::{Order, OrderId};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::lifetime::Lifetime;

/// Default wait before sending a signed-out customer to the login view.
pub const DEFAULT_LOGIN_REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Catalog,
    Checkout,
    /// Payment instructions, optionally carrying the order just created so it needn't be
    /// fetched again.
    PaymentInstructions {
        order_id: OrderId,
        order: Option<Box<Order>>,
    },
    OrderHistory {
        page: u32,
    },
    OrderDetail {
        order_id: OrderId,
    },
    Product {
        slug: String,
    },
    /// Login, returning to `return_to` afterwards.
    Login {
        return_to: String,
    },
}

impl Route {
    /// Path and query of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Catalog => "/catalog".to_string(),
            Self::Checkout => "/checkout".to_string(),
            Self::PaymentInstructions { order_id, .. } => format!("/payment/{order_id}"),
            Self::OrderHistory { page } => format!("/orders?page={page}"),
            Self::OrderDetail { order_id } => format!("/orders/{order_id}"),
            Self::Product { slug } => format!("/products/{slug}"),
            Self::Login { .. } => "/login".to_string(),
        }
    }
}

#[automock]
pub trait Navigator: Send + Sync {
    /// Show another view.
    fn navigate(&self, route: Route);

    /// Scroll the current view back to its top.
    fn scroll_to_top(&self);
}

/// Send the customer to login after `delay`, unless the requesting view is gone by then.
pub fn schedule_login_redirect(
    navigator: Arc<dyn Navigator>,
    lifetime: Lifetime,
    delay: Duration,
    return_to: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        if lifetime.is_alive() {
            info!(%return_to, "redirecting to login");

            navigator.navigate(Route::Login { return_to });
        } else {
            debug!(%return_to, "view closed before login redirect");
        }
    })
}
