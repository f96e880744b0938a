//! Payment instructions page.

use std::sync::Arc;

use storefront::{
    orders::{Order, OrderId},
    payment::{BankAccount, PaymentInstructions},
};
use tracing::{error, info, warn};

use crate::{
    api::StorefrontApi,
    lifetime::ViewState,
    navigation::{Navigator, Route},
    pages::proof_upload::{ProofUploadWidget, UploadOutcome},
};

const ORDER_UNAVAILABLE: &str = "Failed to load order details. Make sure the order id is valid.";
const PROOF_RECEIVED: &str = "Payment proof submitted. Admin will verify.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PaymentView {
    #[default]
    Loading,
    Ready(Box<Order>),
    /// Terminal; there is no automatic retry.
    NotFound(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentState {
    pub view: PaymentView,

    /// Confirmation shown once the proof has been accepted.
    pub notice: Option<String>,
}

pub struct PaymentPage {
    api: Arc<dyn StorefrontApi>,
    navigator: Arc<dyn Navigator>,
    order_id: OrderId,
    accounts: &'static [BankAccount],
    handoff: Option<Box<Order>>,
    state: ViewState<PaymentState>,
}

impl PaymentPage {
    /// Page for `order_id`, starting from the order handed over by checkout when there is
    /// one.
    #[must_use]
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        navigator: Arc<dyn Navigator>,
        order_id: OrderId,
        handoff: Option<Box<Order>>,
        accounts: &'static [BankAccount],
    ) -> Self {
        Self {
            api,
            navigator,
            order_id,
            accounts,
            handoff,
            state: ViewState::new(PaymentState::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState<PaymentState> {
        &self.state
    }

    /// Show the handed over order, or fetch it.
    pub async fn load(&self) {
        if let Some(order) = self.handoff.clone() {
            self.state.update(|state| state.view = PaymentView::Ready(order));
            return;
        }

        let view = match self.api.order(self.order_id).await {
            Ok(order) => PaymentView::Ready(Box::new(order)),
            Err(error) => {
                error!(order_id = %self.order_id, %error, "failed to load order for payment");

                PaymentView::NotFound(ORDER_UNAVAILABLE.to_string())
            }
        };

        self.state.update(|state| state.view = view);
    }

    #[must_use]
    pub fn instructions(&self) -> Option<PaymentInstructions> {
        self.state.with(|state| match &state.view {
            PaymentView::Ready(order) => Some(PaymentInstructions::new(order, self.accounts)),
            PaymentView::Loading | PaymentView::NotFound(_) => None,
        })
    }

    #[must_use]
    pub fn upload_widget(&self) -> ProofUploadWidget {
        ProofUploadWidget::new(Arc::clone(&self.api), self.order_id)
    }

    /// React to the widget finishing an upload. Failures are already shown by the widget.
    pub fn handle_upload(&self, outcome: &UploadOutcome) {
        match outcome {
            UploadOutcome::Succeeded(receipt) => {
                let notice = receipt
                    .message
                    .clone()
                    .unwrap_or_else(|| PROOF_RECEIVED.to_string());

                info!(order_id = %self.order_id, %notice, "payment proof accepted");

                if self.state.update(|state| state.notice = Some(notice)) {
                    self.navigator.navigate(Route::OrderHistory { page: 1 });
                }
            }
            UploadOutcome::Failed(message) => {
                warn!(order_id = %self.order_id, %message, "payment proof upload failed");
            }
        }
    }

    pub fn teardown(&self) {
        self.state.teardown();
    }
}
