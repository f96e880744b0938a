//! Checkout

use std::fmt::{self, Display, Formatter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{CartLine, cart_total},
    users::UserProfile,
};

/// Fields of the shipping form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingField {
    /// Name of the person receiving the order.
    RecipientName,

    /// Contact phone (WhatsApp) number.
    PhoneNumber,

    /// Full delivery address.
    Address,

    /// Optional note for the seller.
    Note,
}

impl ShippingField {
    /// Fields that must be filled in before an order can be placed.
    pub const REQUIRED: [Self; 3] = [Self::RecipientName, Self::PhoneNumber, Self::Address];

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::RecipientName => "Recipient Name",
            Self::PhoneNumber => "Phone Number",
            Self::Address => "Shipping Address",
            Self::Note => "Note",
        }
    }
}

impl Display for ShippingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shipping details collected on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingForm {
    /// Name of the person receiving the order.
    pub recipient_name: String,

    /// Contact phone (WhatsApp) number.
    pub phone_number: String,

    /// Full delivery address.
    pub address: String,

    /// Optional note for the seller.
    pub note: String,
}

impl ShippingForm {
    /// Fill recipient name and phone number from the customer's profile.
    pub fn prefill(&mut self, user: &UserProfile) {
        self.recipient_name = user.name.clone().unwrap_or_default();
        self.phone_number = user.contact_number().unwrap_or_default().to_string();
    }

    /// Current value of a field.
    pub fn get(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::RecipientName => &self.recipient_name,
            ShippingField::PhoneNumber => &self.phone_number,
            ShippingField::Address => &self.address,
            ShippingField::Note => &self.note,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: ShippingField, value: impl Into<String>) {
        let value = value.into();

        match field {
            ShippingField::RecipientName => self.recipient_name = value,
            ShippingField::PhoneNumber => self.phone_number = value,
            ShippingField::Address => self.address = value,
            ShippingField::Note => self.note = value,
        }
    }

    /// Required fields that are empty or whitespace only.
    pub fn missing_fields(&self) -> SmallVec<[ShippingField; 3]> {
        ShippingField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }
}

/// Reasons an order cannot be submitted, detected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// One or more required shipping fields are blank.
    #[error("Please fill in Recipient Name, Phone Number and Shipping Address.")]
    MissingShippingDetails(SmallVec<[ShippingField; 3]>),

    /// A cart line has no product attached, so it cannot be ordered.
    #[error("Cart line {0} has no product.")]
    LineWithoutProduct(u64),
}

/// Check the local preconditions for placing an order.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: there is nothing to order.
/// - [`CheckoutError::MissingShippingDetails`]: a required field is blank after trimming.
pub fn validate_checkout(lines: &[CartLine], form: &ShippingForm) -> Result<(), CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let missing = form.missing_fields();

    if !missing.is_empty() {
        return Err(CheckoutError::MissingShippingDetails(missing));
    }

    Ok(())
}

/// Line of an order creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    /// Ordered product.
    pub product_id: u64,

    /// Ordered quantity.
    pub quantity: u32,

    /// Unit price seen by the customer when ordering.
    pub price_at_order_time: Decimal,
}

/// Payload sent to create an order from the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreationRequest {
    /// Ordering account, when known.
    pub user_id: Option<u64>,

    /// Name of the person receiving the order.
    pub recipient_name: String,

    /// Contact phone (WhatsApp) number.
    pub phone_number: String,

    /// Full delivery address.
    pub address: String,

    /// Optional note for the seller.
    pub note: String,

    /// Ordered lines.
    pub items: Vec<OrderLineRequest>,

    /// Grand total, computed the same way as the checkout summary.
    pub total_price: Decimal,
}

impl OrderCreationRequest {
    /// Snapshot the cart and shipping form into an order request.
    ///
    /// # Errors
    ///
    /// Returns the first failing precondition from [`validate_checkout`], or
    /// [`CheckoutError::LineWithoutProduct`] if a line has lost its product.
    pub fn build(
        user_id: Option<u64>,
        form: &ShippingForm,
        lines: &[CartLine],
    ) -> Result<Self, CheckoutError> {
        validate_checkout(lines, form)?;

        let items = lines
            .iter()
            .map(|line| {
                let product = line
                    .product
                    .as_ref()
                    .ok_or(CheckoutError::LineWithoutProduct(line.id))?;

                Ok(OrderLineRequest {
                    product_id: product.id,
                    quantity: line.quantity.unwrap_or_default(),
                    price_at_order_time: product.unit_price.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, CheckoutError>>()?;

        Ok(Self {
            user_id,
            recipient_name: form.recipient_name.clone(),
            phone_number: form.phone_number.clone(),
            address: form.address.clone(),
            note: form.note.clone(),
            items,
            total_price: cart_total(lines),
        })
    }
}
