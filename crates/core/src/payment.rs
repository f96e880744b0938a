//! Manual bank transfer instructions

use crate::{
    money::format_rupiah,
    orders::{Order, OrderId},
};

/// Hours the customer has to upload a proof after ordering.
pub const PROOF_DEADLINE_HOURS: u32 = 24;

/// Account customers transfer payment to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankAccount {
    /// Bank name.
    pub bank: &'static str,

    /// Account number.
    pub number: &'static str,

    /// Account holder.
    pub holder: &'static str,
}

/// Accounts listed on the payment page.
pub const DEFAULT_BANK_ACCOUNTS: &[BankAccount] = &[
    BankAccount {
        bank: "BCA",
        number: "1234567890",
        holder: "PT Pasifik Ikan Segar Anda",
    },
    BankAccount {
        bank: "Mandiri",
        number: "0987654321",
        holder: "PT Pasifik Ikan Segar Anda",
    },
];

/// Render model for the payment page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInstructions {
    /// Order being paid.
    pub order_id: OrderId,

    /// Display amount due.
    pub total: String,

    /// Accounts to transfer to.
    pub accounts: &'static [BankAccount],

    /// Reminder to transfer the exact amount.
    pub exact_amount_notice: &'static str,

    /// Reminder of the upload deadline.
    pub deadline_notice: String,
}

impl PaymentInstructions {
    /// Instructions for paying `order` into the given accounts.
    pub fn new(order: &Order, accounts: &'static [BankAccount]) -> Self {
        Self {
            order_id: order.id,
            total: format_rupiah(order.total_price),
            accounts,
            exact_amount_notice: "IMPORTANT: make sure you transfer exactly the total above.",
            deadline_notice: format!(
                "After transferring, please upload your proof of payment below within {PROOF_DEADLINE_HOURS} hours."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn instructions_carry_order_total_and_accounts() -> TestResult {
        let mut order = Order::with_id("55".parse()?);
        order.total_price = Some(Decimal::from(200_000));

        let instructions = PaymentInstructions::new(&order, DEFAULT_BANK_ACCOUNTS);

        assert_eq!(instructions.order_id, order.id);
        assert_eq!(instructions.total, format_rupiah(Some(Decimal::from(200_000))));
        assert_eq!(instructions.accounts.len(), 2);
        assert!(instructions.deadline_notice.contains("24 hours"));

        Ok(())
    }
}
