//! Money

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Currency every storefront amount is denominated in.
pub const CURRENCY: &iso::Currency = iso::IDR;

/// Render an amount as Rupiah. Absent amounts render as zero.
pub fn format_rupiah(amount: Option<Decimal>) -> String {
    Money::from_decimal(amount.unwrap_or(Decimal::ZERO), CURRENCY).to_string()
}
