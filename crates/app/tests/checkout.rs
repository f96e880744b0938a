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
use rust_decimal::Decimal;
use storefront::{
    cart::CartLine,
    checkout::{CheckoutError, OrderCreationRequest, ShippingField},
    images::ImageUrls,
    orders::{Order, OrderId},
    pagination::Paginated,
    upload::ProofFile,
    users::UserProfile,
};
use storefront_app::{
    api::{ApiError, MockStorefrontApi, ProofReceipt, StorefrontApi},
    navigation::Route,
    pages::CheckoutPage,
};
use testresult::TestResult;

use common::{RecordingNavigator, customer, order_id, salmon_cart};

fn page(api: MockStorefrontApi, navigator: &Arc<RecordingNavigator>) -> CheckoutPage {
    CheckoutPage::new(Arc::new(api), navigator.clone(), ImageUrls::default())
}

fn fill_address(page: &CheckoutPage) {
    page.set_field(ShippingField::Address, "Jl. Pelabuhan No. 1, Makassar");
}

#[tokio::test]
async fn test_load_prefills_recipient_from_profile() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_current_user().once().return_once(|| Ok(customer()));
    api.expect_cart().once().return_once(|| Ok(salmon_cart()));
    api.expect_create_order().never();

    let navigator = Arc::new(RecordingNavigator::default());
    let page = page(api, &navigator);

    page.load().await;

    let state = page.state().snapshot();

    assert!(!state.loading);
    assert_eq!(state.form.recipient_name, "Budi");
    assert_eq!(state.form.phone_number, "081234567890");
    assert_eq!(state.lines.len(), 1);
    assert_eq!(page.summary().total_amount, Decimal::from(200_000));

    Ok(())
}

#[tokio::test]
async fn test_profile_failure_is_tolerated() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_current_user()
        .once()
        .return_once(|| Err(ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "")));
    api.expect_cart().once().return_once(|| Ok(salmon_cart()));

    let navigator = Arc::new(RecordingNavigator::default());
    let page = page(api, &navigator);

    page.load().await;

    let state = page.state().snapshot();

    assert_eq!(state.load_error, None);
    assert_eq!(state.user, None);
    assert!(state.form.recipient_name.is_empty());
    assert_eq!(state.lines.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_unauthenticated_cart_asks_to_log_in() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_current_user()
        .once()
        .return_once(|| Err(ApiError::Unauthenticated { message: None }));
    api.expect_cart()
        .once()
        .return_once(|| Err(ApiError::Unauthenticated { message: None }));

    let navigator = Arc::new(RecordingNavigator::default());
    let page = page(api, &navigator);

    page.load().await;

    let state = page.state().snapshot();

    assert_eq!(
        state.load_error.as_deref(),
        Some("Your session has ended. Please log in again.")
    );
    assert!(state.lines.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_other_cart_failures_offer_reload() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_current_user().once().return_once(|| Ok(customer()));
    api.expect_cart()
        .once()
        .return_once(|| Err(ApiError::from_response(StatusCode::BAD_GATEWAY, "")));

    let navigator = Arc::new(RecordingNavigator::default());
    let page = page(api, &navigator);

    page.load().await;

    assert_eq!(
        page.state().snapshot().load_error.as_deref(),
        Some("Failed to load your cart. Please reload the page.")
    );

    Ok(())
}

#[tokio::test]
async fn test_empty_cart_blocks_submission() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_current_user().once().return_once(|| Ok(customer()));
    api.expect_cart().once().return_once(|| Ok(Vec::new()));
    api.expect_create_order().never();

    let navigator = Arc::new(RecordingNavigator::default());
    let page = page(api, &navigator);

    page.load().await;
    fill_address(&page);
    page.submit().await;

    let state = page.state().snapshot();

    assert!(state.is_empty());
    assert_eq!(state.validation, Some(CheckoutError::EmptyCart));
    assert!(!state.submitting);
    assert!(navigator.routes().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_blank_shipping_fields_block_submission() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_current_user().once().return_once(|| Ok(customer()));
    api.expect_cart().once().return_once(|| Ok(salmon_cart()));
    api.expect_create_order().never();

    let navigator = Arc::new(RecordingNavigator::default());
    let page = page(api, &navigator);

    page.load().await;
    page.set_field(ShippingField::Address, "   ");
    page.submit().await;

    let state = page.state().snapshot();

    assert!(matches!(
        state.validation,
        Some(CheckoutError::MissingShippingDetails(ref fields)) if fields.as_slice() == [ShippingField::Address]
    ));
    assert!(navigator.routes().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_created_order_hands_over_to_payment() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_current_user().once().return_once(|| Ok(customer()));
    api.expect_cart().once().return_once(|| Ok(salmon_cart()));
    api.expect_create_order()
        .once()
        .withf(|request: &OrderCreationRequest| {
            request.total_price == Decimal::from(200_000)
                && request.user_id == Some(7)
                && request.items.len() == 1
                && request.items.iter().all(|item| {
                    item.product_id == 1
                        && item.quantity == 2
                        && item.price_at_order_time == Decimal::from(100_000)
                })
        })
        .return_once(|_| Ok(Order::with_id(order_id(55))));

    let navigator = Arc::new(RecordingNavigator::default());
    let page = page(api, &navigator);

    page.load().await;
    fill_address(&page);
    page.submit().await;

    let state = page.state().snapshot();

    assert!(state.lines.is_empty());
    assert!(!state.submitting);
    assert_eq!(state.submit_error, None);
    assert_eq!(
        navigator.routes(),
        vec![Route::PaymentInstructions {
            order_id: order_id(55),
            order: Some(Box::new(Order::with_id(order_id(55)))),
        }]
    );

    Ok(())
}

#[tokio::test]
async fn test_rejected_order_shows_validation_details() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_current_user().once().return_once(|| Ok(customer()));
    api.expect_cart().once().return_once(|| Ok(salmon_cart()));
    api.expect_create_order().once().return_once(|_| {
        Err(ApiError::from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"Stock is not sufficient.","errors":{"items.0.quantity":["Only 1 left."]}}"#,
        ))
    });

    let navigator = Arc::new(RecordingNavigator::default());
    let page = page(api, &navigator);

    page.load().await;
    fill_address(&page);
    page.submit().await;

    let state = page.state().snapshot();

    assert_eq!(
        state.submit_error.as_deref(),
        Some("Stock is not sufficient.\n\nDetails:\nOnly 1 left.")
    );
    assert_eq!(state.lines.len(), 1);
    assert!(navigator.routes().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_local_validation_replaces_earlier_rejection() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_current_user().once().return_once(|| Ok(customer()));
    api.expect_cart().once().return_once(|| Ok(salmon_cart()));
    api.expect_create_order().once().return_once(|_| {
        Err(ApiError::from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"Stock is not sufficient."}"#,
        ))
    });

    let navigator = Arc::new(RecordingNavigator::default());
    let page = page(api, &navigator);

    page.load().await;
    fill_address(&page);
    page.submit().await;

    assert!(page.state().snapshot().submit_error.is_some());

    page.set_field(ShippingField::Address, "");
    page.submit().await;

    let state = page.state().snapshot();

    assert_eq!(state.submit_error, None);
    assert!(matches!(
        state.validation,
        Some(CheckoutError::MissingShippingDetails(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_response_without_order_is_generic_failure() -> TestResult {
    let mut api = MockStorefrontApi::new();

    api.expect_current_user().once().return_once(|| Ok(customer()));
    api.expect_cart().once().return_once(|| Ok(salmon_cart()));
    api.expect_create_order()
        .once()
        .return_once(|_| Err(ApiError::MalformedResponse("missing field `id`".to_string())));

    let navigator = Arc::new(RecordingNavigator::default());
    let page = page(api, &navigator);

    page.load().await;
    fill_address(&page);
    page.submit().await;

    assert_eq!(
        page.state().snapshot().submit_error.as_deref(),
        Some("Something went wrong while creating your order.")
    );
    assert!(navigator.routes().is_empty());

    Ok(())
}

/// Backend whose cart read takes a second to answer.
struct SlowCart;

#[async_trait]
impl StorefrontApi for SlowCart {
    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        Ok(customer())
    }

    async fn cart(&self) -> Result<Vec<CartLine>, ApiError> {
        tokio::time::sleep(Duration::from_secs(1)).await;

        Ok(salmon_cart())
    }

    async fn create_order(&self, _request: OrderCreationRequest) -> Result<Order, ApiError> {
        Err(ApiError::MalformedResponse("unused".to_string()))
    }

    async fn order(&self, _id: OrderId) -> Result<Order, ApiError> {
        Err(ApiError::NotFound { message: None })
    }

    async fn orders(&self, _page: u32) -> Result<Paginated<Order>, ApiError> {
        Err(ApiError::NotFound { message: None })
    }

    async fn submit_payment_proof(
        &self,
        _id: OrderId,
        _file: ProofFile,
    ) -> Result<ProofReceipt, ApiError> {
        Err(ApiError::NotFound { message: None })
    }
}

#[tokio::test(start_paused = true)]
async fn test_results_after_teardown_are_discarded() -> TestResult {
    let navigator = Arc::new(RecordingNavigator::default());
    let page = CheckoutPage::new(Arc::new(SlowCart), navigator.clone(), ImageUrls::default());

    tokio::join!(page.load(), async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        page.teardown();
    });

    let state = page.state().snapshot();

    assert!(state.loading);
    assert!(state.lines.is_empty());
    assert!(state.form.recipient_name.is_empty());

    Ok(())
}

/// Backend that takes a second to create an order and counts how often it was asked to.
#[derive(Default)]
struct SlowOrders {
    creates: AtomicUsize,
}

#[async_trait]
impl StorefrontApi for SlowOrders {
    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        Ok(customer())
    }

    async fn cart(&self) -> Result<Vec<CartLine>, ApiError> {
        Ok(salmon_cart())
    }

    async fn create_order(&self, _request: OrderCreationRequest) -> Result<Order, ApiError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(1)).await;

        Ok(Order::with_id(order_id(55)))
    }

    async fn order(&self, _id: OrderId) -> Result<Order, ApiError> {
        Err(ApiError::NotFound { message: None })
    }

    async fn orders(&self, _page: u32) -> Result<Paginated<Order>, ApiError> {
        Err(ApiError::NotFound { message: None })
    }

    async fn submit_payment_proof(
        &self,
        _id: OrderId,
        _file: ProofFile,
    ) -> Result<ProofReceipt, ApiError> {
        Err(ApiError::NotFound { message: None })
    }
}

#[tokio::test(start_paused = true)]
async fn test_repeated_submit_places_one_order() -> TestResult {
    let api = Arc::new(SlowOrders::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let page = CheckoutPage::new(api.clone(), navigator.clone(), ImageUrls::default());

    page.load().await;
    fill_address(&page);

    tokio::join!(page.submit(), page.submit(), page.submit());

    assert_eq!(api.creates.load(Ordering::SeqCst), 1);
    assert_eq!(navigator.routes().len(), 1);
    assert!(!page.state().snapshot().submitting);

    Ok(())
}
