//! Payment proof upload widget.

use std::sync::Arc;

use storefront::{
    orders::OrderId,
    upload::{PROOF_FIELD, ProofFile, UploadState},
};
use tracing::{error, info};

use crate::{
    api::{ApiError, ProofReceipt, StorefrontApi},
    lifetime::ViewState,
};

const UPLOAD_SUCCEEDED: &str = "Payment proof submitted successfully!";
const UPLOAD_FAILED: &str = "Something went wrong. Please try again.";

/// Result of an upload that reached the server, handed to the hosting page.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Succeeded(ProofReceipt),
    Failed(String),
}

/// Upload form scoped to one order for its whole lifetime.
pub struct ProofUploadWidget {
    api: Arc<dyn StorefrontApi>,
    order_id: OrderId,
    state: ViewState<UploadState>,
}

impl ProofUploadWidget {
    #[must_use]
    pub fn new(api: Arc<dyn StorefrontApi>, order_id: OrderId) -> Self {
        Self {
            api,
            order_id,
            state: ViewState::new(UploadState::default()),
        }
    }

    #[must_use]
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    #[must_use]
    pub fn state(&self) -> &ViewState<UploadState> {
        &self.state
    }

    /// Choose the file to upload, clearing any previous result. Ignored mid-upload.
    pub fn select_file(&self, file: ProofFile) -> bool {
        self.state.update_if(|state| {
            if state.is_uploading() {
                return false;
            }

            state.select(file);

            true
        })
    }

    /// Upload the selected file.
    ///
    /// Returns `None` when no request was made: nothing was selected (the state then holds
    /// the validation message), an upload is already running, or the widget is gone.
    pub async fn submit(&self) -> Option<UploadOutcome> {
        let mut claimed = None;

        self.state.update_if(|state| match state.begin() {
            Ok(Some(file)) => {
                claimed = Some(file);
                true
            }
            Ok(None) => false,
            Err(_) => true,
        });

        let file = claimed?;

        let outcome = match self.api.submit_payment_proof(self.order_id, file).await {
            Ok(receipt) => {
                info!(order_id = %self.order_id, "payment proof uploaded");

                let message = receipt
                    .message
                    .clone()
                    .unwrap_or_else(|| UPLOAD_SUCCEEDED.to_string());

                self.state.update(|state| {
                    state.succeed(message);
                });

                UploadOutcome::Succeeded(receipt)
            }
            Err(error) => {
                error!(order_id = %self.order_id, %error, "failed to upload payment proof");

                let message = upload_failure_message(&error);
                let shown = message.clone();

                self.state.update(|state| {
                    state.fail(shown);
                });

                UploadOutcome::Failed(message)
            }
        };

        Some(outcome)
    }

    pub fn teardown(&self) {
        self.state.teardown();
    }
}

/// Messages reported for the proof field, else the server's message, else a generic one.
#[must_use]
pub fn upload_failure_message(error: &ApiError) -> String {
    let field_errors = error.field_errors(PROOF_FIELD);

    if !field_errors.is_empty() {
        return field_errors.join(", ");
    }

    error
        .server_message()
        .unwrap_or(UPLOAD_FAILED)
        .to_string()
}
