//! Storefront client: REST API access, navigation and the page controllers for checkout,
//! payment and order history.

pub mod api;
pub mod config;
pub mod lifetime;
pub mod navigation;
pub mod observability;
pub mod pages;
pub mod render;
