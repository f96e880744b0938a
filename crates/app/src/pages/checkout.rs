//! Checkout page.

use std::sync::Arc;

use storefront::{
    cart::{CartLine, CartSummary},
    checkout::{CheckoutError, OrderCreationRequest, ShippingField, ShippingForm},
    images::ImageUrls,
    users::UserProfile,
};
use tracing::{error, info, warn};

use crate::{
    api::{ApiError, StorefrontApi},
    lifetime::ViewState,
    navigation::{Navigator, Route},
};

const SESSION_EXPIRED: &str = "Your session has ended. Please log in again.";
const CART_LOAD_FAILED: &str = "Failed to load your cart. Please reload the page.";
const ORDER_FAILED: &str = "Something went wrong while creating your order.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutState {
    /// Initial reads still outstanding.
    pub loading: bool,

    pub user: Option<UserProfile>,

    pub lines: Vec<CartLine>,

    pub form: ShippingForm,

    /// Cart could not be read; replaces the page with a retry prompt.
    pub load_error: Option<String>,

    /// Local precondition that blocked the last submission.
    pub validation: Option<CheckoutError>,

    /// Server rejection of the last submission.
    pub submit_error: Option<String>,

    /// Order creation in flight.
    pub submitting: bool,
}

impl Default for CheckoutState {
    fn default() -> Self {
        Self {
            loading: true,
            user: None,
            lines: Vec::new(),
            form: ShippingForm::default(),
            load_error: None,
            validation: None,
            submit_error: None,
            submitting: false,
        }
    }
}

impl CheckoutState {
    /// Nothing to check out once loading is done.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.loading && self.load_error.is_none() && self.lines.is_empty()
    }
}

pub struct CheckoutPage {
    api: Arc<dyn StorefrontApi>,
    navigator: Arc<dyn Navigator>,
    images: ImageUrls,
    state: ViewState<CheckoutState>,
}

impl CheckoutPage {
    #[must_use]
    pub fn new(api: Arc<dyn StorefrontApi>, navigator: Arc<dyn Navigator>, images: ImageUrls) -> Self {
        Self {
            api,
            navigator,
            images,
            state: ViewState::new(CheckoutState::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState<CheckoutState> {
        &self.state
    }

    /// Read the customer's profile and cart. A failed profile read only loses the prefill.
    pub async fn load(&self) {
        self.state.update(|state| *state = CheckoutState::default());

        let (user, cart) = tokio::join!(self.api.current_user(), self.api.cart());

        self.state.update(|state| {
            match user {
                Ok(user) => {
                    state.form.prefill(&user);
                    state.user = Some(user);
                }
                Err(error) => warn!(%error, "failed to load current user"),
            }

            match cart {
                Ok(lines) => state.lines = lines,
                Err(error) => {
                    error!(%error, "failed to load checkout cart");

                    let message = match error {
                        ApiError::Unauthenticated { .. } => SESSION_EXPIRED,
                        _ => CART_LOAD_FAILED,
                    };

                    state.load_error = Some(message.to_string());
                    state.lines.clear();
                }
            }

            state.loading = false;
        });
    }

    pub fn set_field(&self, field: ShippingField, value: impl Into<String>) {
        let value = value.into();

        self.state.update(|state| state.form.set(field, value));
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.state
            .with(|state| CartSummary::new(&state.lines, &self.images))
    }

    /// Place the order and hand over to the payment page. Blocked locally when the cart is
    /// empty or shipping details are missing, and ignored while a submission is in flight.
    pub async fn submit(&self) {
        let snapshot = self.state.snapshot();

        if snapshot.submitting {
            return;
        }

        let request = match OrderCreationRequest::build(
            snapshot.user.as_ref().map(|user| user.id),
            &snapshot.form,
            &snapshot.lines,
        ) {
            Ok(request) => request,
            Err(error) => {
                self.state.update(|state| {
                    state.validation = Some(error);
                    state.submit_error = None;
                });
                return;
            }
        };

        let claimed = self.state.update_if(|state| {
            if state.submitting {
                return false;
            }

            state.submitting = true;
            state.validation = None;
            state.submit_error = None;

            true
        });

        if !claimed {
            return;
        }

        match self.api.create_order(request).await {
            Ok(order) => {
                info!(order_id = %order.id, "order created");

                let applied = self.state.update(|state| {
                    state.lines.clear();
                    state.submitting = false;
                });

                if applied {
                    self.navigator.navigate(Route::PaymentInstructions {
                        order_id: order.id,
                        order: Some(Box::new(order)),
                    });
                }
            }
            Err(error) => {
                error!(%error, details = ?error.validation_details(), "failed to create order");

                let message = order_failure_message(&error);

                self.state.update(|state| {
                    state.submit_error = Some(message);
                    state.submitting = false;
                });
            }
        }
    }

    pub fn teardown(&self) {
        self.state.teardown();
    }
}

/// Server message, or a generic one, followed by any field-level validation messages.
#[must_use]
pub fn order_failure_message(error: &ApiError) -> String {
    let message = error.server_message().unwrap_or(ORDER_FAILED);
    let details = error.validation_details();

    if details.is_empty() {
        message.to_string()
    } else {
        format!("{message}\n\nDetails:\n{}", details.join("\n"))
    }
}
