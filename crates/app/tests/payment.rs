mod common;

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use storefront::{
    cart::CartLine,
    checkout::OrderCreationRequest,
    orders::{Order, OrderId},
    pagination::Paginated,
    payment::DEFAULT_BANK_ACCOUNTS,
    upload::{ProofFile, UploadState},
    users::UserProfile,
};
use storefront_app::{
    api::{ApiError, MockStorefrontApi, ProofReceipt, StorefrontApi},
    navigation::Route,
    pages::{PaymentPage, PaymentView, ProofUploadWidget, UploadOutcome},
};
use testresult::TestResult;

use common::{RecordingNavigator, order_from_json, order_id};

fn proof() -> TestResult<ProofFile> {
    Ok(ProofFile::new("transfer.png", vec![0x89, 0x50, 0x4e, 0x47])?)
}

#[tokio::test]
async fn test_handed_over_order_is_not_fetched() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_order().never();

    let order = order_from_json(r#"{"id":55,"total_harga":"200000"}"#);
    let navigator = Arc::new(RecordingNavigator::default());
    let page = PaymentPage::new(
        Arc::new(api),
        navigator.clone(),
        order_id(55),
        Some(Box::new(order.clone())),
        DEFAULT_BANK_ACCOUNTS,
    );

    page.load().await;

    assert_eq!(page.state().snapshot().view, PaymentView::Ready(Box::new(order)));

    let instructions = page.instructions().ok_or("instructions missing")?;

    assert_eq!(instructions.order_id, order_id(55));
    assert_eq!(instructions.accounts.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_missing_handoff_fetches_order() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_order()
        .once()
        .withf(|id: &OrderId| id.get() == 55)
        .return_once(|id| Ok(Order::with_id(id)));

    let navigator = Arc::new(RecordingNavigator::default());
    let page = PaymentPage::new(
        Arc::new(api),
        navigator.clone(),
        order_id(55),
        None,
        DEFAULT_BANK_ACCOUNTS,
    );

    page.load().await;

    assert!(page.instructions().is_some());

    Ok(())
}

#[tokio::test]
async fn test_failed_fetch_is_terminal_not_found() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_order()
        .once()
        .return_once(|_| Err(ApiError::NotFound { message: None }));

    let navigator = Arc::new(RecordingNavigator::default());
    let page = PaymentPage::new(
        Arc::new(api),
        navigator.clone(),
        order_id(404),
        None,
        DEFAULT_BANK_ACCOUNTS,
    );

    page.load().await;

    assert_eq!(
        page.state().snapshot().view,
        PaymentView::NotFound(
            "Failed to load order details. Make sure the order id is valid.".to_string()
        )
    );
    assert!(page.instructions().is_none());

    Ok(())
}

#[tokio::test]
async fn test_accepted_proof_moves_to_order_history() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_submit_payment_proof()
        .once()
        .withf(|id: &OrderId, file: &ProofFile| id.get() == 55 && file.file_name() == "transfer.png")
        .return_once(|_, _| Ok(ProofReceipt::default()));

    let navigator = Arc::new(RecordingNavigator::default());
    let page = PaymentPage::new(
        Arc::new(api),
        navigator.clone(),
        order_id(55),
        Some(Box::new(Order::with_id(order_id(55)))),
        DEFAULT_BANK_ACCOUNTS,
    );

    page.load().await;

    let widget = page.upload_widget();

    assert!(widget.select_file(proof()?));

    let outcome = widget.submit().await.ok_or("no request was made")?;

    page.handle_upload(&outcome);

    assert_eq!(
        widget.state().snapshot(),
        UploadState::Succeeded("Payment proof submitted successfully!".to_string())
    );
    assert_eq!(
        page.state().snapshot().notice.as_deref(),
        Some("Payment proof submitted. Admin will verify.")
    );
    assert_eq!(navigator.routes(), vec![Route::OrderHistory { page: 1 }]);

    Ok(())
}

#[tokio::test]
async fn test_proof_field_error_is_shown_verbatim() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_submit_payment_proof().once().return_once(|_, _| {
        Err(ApiError::from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors":{"payment_proof":["File too large"]}}"#,
        ))
    });

    let navigator = Arc::new(RecordingNavigator::default());
    let page = PaymentPage::new(
        Arc::new(api),
        navigator.clone(),
        order_id(55),
        Some(Box::new(Order::with_id(order_id(55)))),
        DEFAULT_BANK_ACCOUNTS,
    );

    let widget = page.upload_widget();

    widget.select_file(proof()?);

    let outcome = widget.submit().await;

    assert_eq!(outcome, Some(UploadOutcome::Failed("File too large".to_string())));
    assert_eq!(widget.state().snapshot().error(), Some("File too large"));

    if let Some(outcome) = &outcome {
        page.handle_upload(outcome);
    }

    assert_eq!(page.state().snapshot().notice, None);
    assert!(navigator.routes().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_submit_without_file_fails_locally() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_submit_payment_proof().never();

    let navigator = Arc::new(RecordingNavigator::default());
    let page = PaymentPage::new(
        Arc::new(api),
        navigator.clone(),
        order_id(55),
        None,
        DEFAULT_BANK_ACCOUNTS,
    );

    let widget = page.upload_widget();

    assert_eq!(widget.submit().await, None);
    assert_eq!(
        widget.state().snapshot().error(),
        Some("Please choose a payment proof file.")
    );

    Ok(())
}

#[tokio::test]
async fn test_reselecting_after_failure_resets_widget() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_submit_payment_proof()
        .once()
        .return_once(|_, _| Err(ApiError::MalformedResponse("eof".to_string())));

    let navigator = Arc::new(RecordingNavigator::default());
    let page = PaymentPage::new(
        Arc::new(api),
        navigator.clone(),
        order_id(55),
        None,
        DEFAULT_BANK_ACCOUNTS,
    );

    let widget = page.upload_widget();

    widget.select_file(proof()?);
    widget.submit().await;

    assert_eq!(
        widget.state().snapshot().error(),
        Some("Something went wrong. Please try again.")
    );

    widget.select_file(proof()?);

    let state = widget.state().snapshot();

    assert!(state.can_submit());
    assert_eq!(state.error(), None);

    Ok(())
}

/// Backend that takes a second to accept a proof and counts the uploads it received.
#[derive(Default)]
struct SlowUploads {
    uploads: AtomicUsize,
}

#[async_trait]
impl StorefrontApi for SlowUploads {
    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        Err(ApiError::Unauthenticated { message: None })
    }

    async fn cart(&self) -> Result<Vec<CartLine>, ApiError> {
        Ok(Vec::new())
    }

    async fn create_order(&self, _request: OrderCreationRequest) -> Result<Order, ApiError> {
        Err(ApiError::MalformedResponse("unused".to_string()))
    }

    async fn order(&self, id: OrderId) -> Result<Order, ApiError> {
        Ok(Order::with_id(id))
    }

    async fn orders(&self, _page: u32) -> Result<Paginated<Order>, ApiError> {
        Err(ApiError::NotFound { message: None })
    }

    async fn submit_payment_proof(
        &self,
        _id: OrderId,
        _file: ProofFile,
    ) -> Result<ProofReceipt, ApiError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(1)).await;

        Ok(ProofReceipt::default())
    }
}

#[tokio::test(start_paused = true)]
async fn test_second_submit_while_uploading_sends_nothing() -> TestResult {
    let api = Arc::new(SlowUploads::default());
    let widget = ProofUploadWidget::new(api.clone(), order_id(55));

    assert!(widget.select_file(proof()?));

    let (first, second) = tokio::join!(widget.submit(), widget.submit());

    assert!(matches!(first, Some(UploadOutcome::Succeeded(_))));
    assert_eq!(second, None);
    assert_eq!(api.uploads.load(Ordering::SeqCst), 1);

    Ok(())
}
