//! Page controllers.
//!
//! Each page owns its state through a [`ViewState`](crate::lifetime::ViewState), talks to
//! the backend through [`StorefrontApi`](crate::api::StorefrontApi) and moves between views
//! through [`Navigator`](crate::navigation::Navigator). Failures always end up in page
//! state; nothing is returned past a page.

pub mod checkout;
pub mod order_detail;
pub mod order_history;
pub mod payment;
pub mod proof_upload;

pub use checkout::{CheckoutPage, CheckoutState};
pub use order_detail::{DetailState, ItemRow, OrderDetailPage, OrderDetailView};
pub use order_history::{HistoryState, OrderHistoryPage, OrderRow, page_from_query};
pub use payment::{PaymentPage, PaymentState, PaymentView};
pub use proof_upload::{ProofUploadWidget, UploadOutcome};
