//! Storefront
//!
//! View-model layer for the storefront's checkout, payment and order pages: wire models,
//! cart arithmetic, checkout validation, status badges, pagination and the proof upload
//! state machine. Nothing in here performs IO.

pub mod cart;
pub mod checkout;
pub mod dates;
pub mod images;
pub mod money;
pub mod orders;
pub mod pagination;
pub mod payment;
pub mod prelude;
pub mod status;
pub mod upload;
pub mod users;
