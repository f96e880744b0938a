#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use std::sync::Mutex;

use rust_decimal::Decimal;
use storefront::{
    cart::{CartLine, CartProduct},
    orders::{Order, OrderId},
    users::UserProfile,
};
use storefront_app::navigation::{Navigator, Route};

/// Navigator that remembers every request.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
    scrolls: Mutex<usize>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().map(|routes| routes.clone()).unwrap_or_default()
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.lock().map(|scrolls| *scrolls).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
    }

    fn scroll_to_top(&self) {
        if let Ok(mut scrolls) = self.scrolls.lock() {
            *scrolls += 1;
        }
    }
}

pub fn order_id(raw: u64) -> OrderId {
    OrderId::new(raw).unwrap_or_else(|| panic!("{raw} is not a valid order id"))
}

pub fn salmon_cart() -> Vec<CartLine> {
    vec![CartLine {
        id: 10,
        product: Some(CartProduct {
            id: 1,
            name: Some("Salmon".to_string()),
            unit_price: Some(Decimal::from(100_000)),
            primary_image: Some("products/salmon.jpg".to_string()),
        }),
        quantity: Some(2),
    }]
}

pub fn customer() -> UserProfile {
    UserProfile {
        id: 7,
        name: Some("Budi".to_string()),
        email: Some("budi@example.com".to_string()),
        phone: None,
        whatsapp_number: Some("081234567890".to_string()),
    }
}

pub fn order_from_json(json: &str) -> Order {
    serde_json::from_str(json).unwrap_or_else(|error| panic!("invalid order fixture: {error}"))
}
