//! Order and payment status badges
//!
//! Raw status strings are matched case-insensitively against fixed tables. Every input,
//! including an absent one, resolves to a badge: unknown keys get the neutral
//! [`StatusBadge::UNKNOWN`].

/// Coarse visual classification of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTier {
    /// Neutral, in-progress information.
    Informational,

    /// Needs attention or is waiting on someone.
    Caution,

    /// Settled positively.
    Success,

    /// Failed or cancelled.
    Danger,

    /// Status not recognised.
    Unknown,
}

/// Variation within a tier, for statuses sharing a tier but displayed differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accent {
    /// Plain tier styling.
    Standard,

    /// Work is actively happening (rendered animated where supported).
    Active,

    /// Same tier, distinct hue.
    Distinct,

    /// Terminal state of the lifecycle.
    Final,

    /// Heightened attention.
    Elevated,
}

/// Display label and styling of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusBadge {
    /// Text shown in the badge.
    pub label: &'static str,

    /// Visual tier.
    pub tier: StatusTier,

    /// Variation within the tier.
    pub accent: Accent,
}

impl StatusBadge {
    /// Badge for unrecognised or absent statuses.
    pub const UNKNOWN: Self = Self::new("N/A", StatusTier::Unknown, Accent::Standard);

    const fn new(label: &'static str, tier: StatusTier, accent: Accent) -> Self {
        Self {
            label,
            tier,
            accent,
        }
    }
}

const NEW: StatusBadge = StatusBadge::new("New", StatusTier::Informational, Accent::Standard);
const AWAITING_CONFIRMATION: StatusBadge = StatusBadge::new(
    "Awaiting Payment Confirmation",
    StatusTier::Caution,
    Accent::Standard,
);
const ORDER_PAID: StatusBadge = StatusBadge::new("Paid", StatusTier::Success, Accent::Standard);
const PROCESSING: StatusBadge = StatusBadge::new("Processing", StatusTier::Caution, Accent::Active);
const SHIPPED: StatusBadge =
    StatusBadge::new("Shipped", StatusTier::Informational, Accent::Distinct);
const COMPLETED: StatusBadge = StatusBadge::new("Completed", StatusTier::Success, Accent::Final);
const CANCELLED: StatusBadge = StatusBadge::new("Cancelled", StatusTier::Danger, Accent::Standard);

const ORDER_STATUSES: &[(&str, StatusBadge)] = &[
    ("new", NEW),
    ("baru", NEW),
    ("pending", NEW),
    ("awaiting_payment_confirmation", AWAITING_CONFIRMATION),
    ("menunggu_konfirmasi_pembayaran", AWAITING_CONFIRMATION),
    ("paid", ORDER_PAID),
    ("lunas", ORDER_PAID),
    ("processing", PROCESSING),
    ("diproses", PROCESSING),
    ("shipped", SHIPPED),
    ("dikirim", SHIPPED),
    ("completed", COMPLETED),
    ("selesai", COMPLETED),
    ("cancelled", CANCELLED),
    ("dibatalkan", CANCELLED),
    ("batal", CANCELLED),
];

const PAYMENT_PENDING: StatusBadge =
    StatusBadge::new("Pending", StatusTier::Caution, Accent::Standard);
const AWAITING_PAYMENT: StatusBadge =
    StatusBadge::new("Awaiting Payment", StatusTier::Caution, Accent::Standard);
const PAYMENT_PAID: StatusBadge = StatusBadge::new("Paid", StatusTier::Success, Accent::Standard);
const CHALLENGE: StatusBadge = StatusBadge::new("Challenge", StatusTier::Caution, Accent::Elevated);
const FAILED: StatusBadge = StatusBadge::new("Failed", StatusTier::Danger, Accent::Standard);
const DENIED: StatusBadge = StatusBadge::new("Denied", StatusTier::Danger, Accent::Standard);
const PAYMENT_CANCELLED: StatusBadge =
    StatusBadge::new("Cancelled", StatusTier::Danger, Accent::Standard);
const EXPIRED: StatusBadge = StatusBadge::new("Expired", StatusTier::Danger, Accent::Standard);

const PAYMENT_STATUSES: &[(&str, StatusBadge)] = &[
    ("pending", PAYMENT_PENDING),
    ("awaiting_payment", AWAITING_PAYMENT),
    ("menunggu_pembayaran", AWAITING_PAYMENT),
    ("paid", PAYMENT_PAID),
    ("settlement", PAYMENT_PAID),
    ("capture", PAYMENT_PAID),
    ("lunas", PAYMENT_PAID),
    ("challenge", CHALLENGE),
    ("failed", FAILED),
    ("failure", FAILED),
    ("denied", DENIED),
    ("deny", DENIED),
    ("cancelled", PAYMENT_CANCELLED),
    ("cancel", PAYMENT_CANCELLED),
    ("expired", EXPIRED),
    ("expire", EXPIRED),
];

fn lookup(table: &[(&str, StatusBadge)], status: Option<&str>) -> StatusBadge {
    let Some(key) = status.map(|status| status.trim().to_lowercase()) else {
        return StatusBadge::UNKNOWN;
    };

    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map_or(StatusBadge::UNKNOWN, |(_, badge)| *badge)
}

/// Badge for an order's fulfilment status.
pub fn order_status_badge(status: Option<&str>) -> StatusBadge {
    lookup(ORDER_STATUSES, status)
}

/// Badge for an order's payment status.
pub fn payment_status_badge(status: Option<&str>) -> StatusBadge {
    lookup(PAYMENT_STATUSES, status)
}
