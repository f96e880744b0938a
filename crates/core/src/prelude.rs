//! Commonly used types

pub use crate::{
    cart::{CartLine, CartProduct, CartSummary, CartSummaryLine, cart_total},
    checkout::{
        CheckoutError, OrderCreationRequest, OrderLineRequest, ShippingField, ShippingForm,
        validate_checkout,
    },
    dates::{DisplayTimestamp, format_timestamp},
    images::{ImageSource, ImageStage, ImageUrls},
    money::format_rupiah,
    orders::{Order, OrderId, OrderIdError, OrderItem, OrderUser, parse_order_id},
    pagination::{PageControl, Paginated, PaginationControls, PaginationLinks, PaginationMeta},
    payment::{BankAccount, DEFAULT_BANK_ACCOUNTS, PaymentInstructions},
    status::{StatusBadge, StatusTier, order_status_badge, payment_status_badge},
    upload::{ProofFile, ProofFormat, UploadError, UploadState},
    users::UserProfile,
};
