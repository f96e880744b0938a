//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    images::{CHECKOUT_THUMBNAIL, ImageSource, ImageUrls},
    money::format_rupiah,
};

/// Product as embedded in a cart line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    /// Product id.
    pub id: u64,

    /// Product name.
    #[serde(default, alias = "nama_ikan")]
    pub name: Option<String>,

    /// Current unit price.
    #[serde(default, alias = "harga")]
    pub unit_price: Option<Decimal>,

    /// Stored reference of the product's main image.
    #[serde(default, alias = "gambar_utama")]
    pub primary_image: Option<String>,
}

/// One line of the customer's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart line id.
    pub id: u64,

    /// Product on this line.
    #[serde(default, alias = "ikan")]
    pub product: Option<CartProduct>,

    /// Ordered quantity.
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl CartLine {
    /// Unit price of the line's product, if known.
    pub fn unit_price(&self) -> Option<Decimal> {
        self.product.as_ref().and_then(|product| product.unit_price)
    }

    /// Unit price multiplied by quantity; zero when either is missing.
    pub fn subtotal(&self) -> Decimal {
        match (self.unit_price(), self.quantity) {
            (Some(price), Some(quantity)) => price * Decimal::from(quantity),
            _ => Decimal::ZERO,
        }
    }
}

/// Sum of all line subtotals.
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::subtotal).sum()
}

/// Render model for a single cart line on the checkout summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummaryLine {
    /// Cart line id.
    pub id: u64,

    /// Product name.
    pub name: String,

    /// Ordered quantity.
    pub quantity: u32,

    /// Display unit price.
    pub unit_price: String,

    /// Display line subtotal.
    pub subtotal: String,

    /// Thumbnail with placeholder fallback.
    pub image: ImageSource,
}

/// Render model for the checkout order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Summary lines.
    pub lines: Vec<CartSummaryLine>,

    /// Grand total as submitted with the order.
    pub total_amount: Decimal,

    /// Display subtotal.
    pub subtotal: String,

    /// Display total.
    pub total: String,
}

impl CartSummary {
    /// Build the summary for the given cart lines.
    pub fn new(lines: &[CartLine], images: &ImageUrls) -> Self {
        let total_amount = cart_total(lines);

        Self {
            lines: lines
                .iter()
                .map(|line| CartSummaryLine {
                    id: line.id,
                    name: line
                        .product
                        .as_ref()
                        .and_then(|product| product.name.clone())
                        .unwrap_or_else(|| "Item".to_string()),
                    quantity: line.quantity.unwrap_or_default(),
                    unit_price: format_rupiah(Some(line.unit_price().unwrap_or_default())),
                    subtotal: format_rupiah(Some(line.subtotal())),
                    image: images.thumbnail_source(
                        line.product
                            .as_ref()
                            .and_then(|product| product.primary_image.as_deref()),
                        CHECKOUT_THUMBNAIL,
                    ),
                })
                .collect(),
            total_amount,
            subtotal: format_rupiah(Some(total_amount)),
            total: format_rupiah(Some(total_amount)),
        }
    }

    /// Whether there is anything to check out.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
