//! Orders

use std::{
    fmt::{self, Display, Formatter},
    num::NonZeroU64,
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(NonZeroU64);

impl OrderId {
    /// Wrap a raw id, rejecting zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Raw numeric id.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Errors parsing an order id from a route parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderIdError {
    /// The parameter was absent or blank.
    #[error("order id is missing")]
    Missing,

    /// The parameter is not a positive integer.
    #[error("invalid order id: {0}")]
    Invalid(String),
}

impl FromStr for OrderId {
    type Err = OrderIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(OrderIdError::Missing);
        }

        trimmed
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| OrderIdError::Invalid(trimmed.to_string()))
    }
}

/// Parse an optional route parameter into an order id.
///
/// # Errors
///
/// Returns [`OrderIdError::Missing`] when no parameter was supplied and
/// [`OrderIdError::Invalid`] when it is not a positive integer.
pub fn parse_order_id(param: Option<&str>) -> Result<OrderId, OrderIdError> {
    param.ok_or(OrderIdError::Missing)?.parse()
}

/// Account that placed an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUser {
    /// Account id.
    #[serde(default)]
    pub id: Option<u64>,

    /// Account display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Line of a persisted order, priced at order time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Order line id.
    #[serde(default)]
    pub id: Option<u64>,

    /// Ordered product.
    #[serde(default, alias = "ikan_id")]
    pub product_id: Option<u64>,

    /// Product name at order time.
    #[serde(default, alias = "nama_ikan")]
    pub name: Option<String>,

    /// Stored reference of the product's main image.
    #[serde(default, alias = "gambar_utama")]
    pub primary_image: Option<String>,

    /// Unit price at order time.
    #[serde(default, alias = "harga_saat_pesan")]
    pub unit_price: Option<Decimal>,

    /// Ordered quantity.
    #[serde(default, alias = "jumlah")]
    pub quantity: Option<u32>,

    /// Line total as computed by the server.
    #[serde(default)]
    pub subtotal: Option<Decimal>,

    /// Product slug, for linking back to the product page.
    #[serde(default)]
    pub slug: Option<String>,
}

impl OrderItem {
    /// Stable key for the line: product id, then line id.
    pub fn key(&self) -> Option<u64> {
        self.product_id.or(self.id)
    }

    /// Line total: the server's subtotal when it supplied a non-zero one, otherwise unit
    /// price times quantity, otherwise zero.
    pub fn subtotal(&self) -> Decimal {
        if let Some(subtotal) = self.subtotal.filter(|subtotal| !subtotal.is_zero()) {
            return subtotal;
        }

        match (self.unit_price, self.quantity) {
            (Some(price), Some(quantity)) => price * Decimal::from(quantity),
            _ => Decimal::ZERO,
        }
    }
}

/// Order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order id.
    pub id: OrderId,

    /// Payment gateway order reference.
    #[serde(default)]
    pub midtrans_order_id: Option<String>,

    /// Payment gateway transaction reference.
    #[serde(default)]
    pub midtrans_transaction_id: Option<String>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Business "ordered at" timestamp, when distinct from the record's creation.
    #[serde(default, rename = "tanggal_pesan")]
    pub ordered_at: Option<String>,

    /// Fulfilment status.
    #[serde(default)]
    pub status: Option<String>,

    /// Payment status.
    #[serde(default, alias = "status_pembayaran")]
    pub payment_status: Option<String>,

    /// Payment method.
    #[serde(default, alias = "metode_pembayaran")]
    pub payment_method: Option<String>,

    /// Amount due.
    #[serde(default, alias = "total_harga")]
    pub total_price: Option<Decimal>,

    /// Name of the person receiving the order.
    #[serde(default, alias = "nama_pelanggan")]
    pub recipient_name: Option<String>,

    /// Contact phone (WhatsApp) number.
    #[serde(default, alias = "nomor_whatsapp")]
    pub phone_number: Option<String>,

    /// Full delivery address.
    #[serde(default, alias = "alamat_pengiriman")]
    pub address: Option<String>,

    /// Note left by the customer.
    #[serde(default, alias = "catatan")]
    pub note: Option<String>,

    /// Uploaded proof of payment.
    #[serde(default)]
    pub payment_proof_url: Option<String>,

    /// Ordered lines.
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// Ordering account.
    #[serde(default)]
    pub user: Option<OrderUser>,
}

impl Order {
    /// Minimal order carrying only an id; every other field is absent.
    pub fn with_id(id: OrderId) -> Self {
        Self {
            id,
            midtrans_order_id: None,
            midtrans_transaction_id: None,
            created_at: None,
            ordered_at: None,
            status: None,
            payment_status: None,
            payment_method: None,
            total_price: None,
            recipient_name: None,
            phone_number: None,
            address: None,
            note: None,
            payment_proof_url: None,
            items: Vec::new(),
            user: None,
        }
    }

    /// Customer-facing reference: the gateway order id, else `#<id>`.
    pub fn reference(&self) -> String {
        self.midtrans_order_id
            .clone()
            .filter(|reference| !reference.is_empty())
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    /// When the order was placed.
    pub fn placed_at(&self) -> Option<&str> {
        self.ordered_at.as_deref().or(self.created_at.as_deref())
    }

    /// Sum of item subtotals.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}
