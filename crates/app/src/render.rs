//! Terminal rendering of page state.

use std::{
    io::{self, Write},
    ops::Range,
};

use storefront::{
    cart::CartSummary,
    pagination::{PageControl, PaginationControls},
    payment::PaymentInstructions,
    status::{StatusBadge, StatusTier},
    upload::UploadState,
};
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::pages::{CheckoutState, HistoryState, OrderDetailView, OrderRow};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write output")]
    Io(#[from] io::Error),
}

fn tier_color(tier: StatusTier) -> Color {
    match tier {
        StatusTier::Informational => Color::FG_BLUE,
        StatusTier::Caution => Color::FG_YELLOW,
        StatusTier::Success => Color::FG_GREEN,
        StatusTier::Danger => Color::FG_RED,
        StatusTier::Unknown => Color::new("\x1b[90m", "\x1b[0m"),
    }
}

fn badge(badge: StatusBadge) -> String {
    format!("[{}]", badge.label)
}

fn finish(mut table: Table, right_aligned: Columns<Range<usize>>) -> Table {
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(right_aligned, Alignment::right());

    table
}

pub fn render_checkout(
    out: &mut impl Write,
    state: &CheckoutState,
    summary: &CartSummary,
) -> Result<(), RenderError> {
    if let Some(error) = &state.load_error {
        writeln!(out, "{error}")?;
        return Ok(());
    }

    if state.is_empty() {
        writeln!(out, "Your cart is empty. Browse the catalog to add products.")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit price", "Subtotal"]);

    for line in &summary.lines {
        builder.push_record([
            line.name.clone(),
            line.quantity.to_string(),
            line.unit_price.clone(),
            line.subtotal.clone(),
        ]);
    }

    builder.push_record([String::new(), String::new(), "Subtotal".into(), summary.subtotal.clone()]);
    builder.push_record([String::new(), String::new(), "Total".into(), summary.total.clone()]);

    writeln!(out, "{}", finish(builder.build(), Columns::new(1..4)))?;

    writeln!(out, "Recipient: {}", state.form.recipient_name)?;
    writeln!(out, "Phone:     {}", state.form.phone_number)?;
    writeln!(out, "Address:   {}", state.form.address)?;

    if !state.form.note.is_empty() {
        writeln!(out, "Note:      {}", state.form.note)?;
    }

    if let Some(validation) = &state.validation {
        writeln!(out, "\n{validation}")?;
    }

    if let Some(error) = &state.submit_error {
        writeln!(out, "\n{error}")?;
    }

    Ok(())
}

pub fn render_payment(
    out: &mut impl Write,
    instructions: &PaymentInstructions,
) -> Result<(), RenderError> {
    writeln!(out, "Order #{} placed. Complete your payment.", instructions.order_id)?;
    writeln!(out, "Total due: {}", instructions.total)?;

    let mut builder = Builder::default();

    builder.push_record(["Bank", "Account number", "Account holder"]);

    for account in instructions.accounts {
        builder.push_record([account.bank, account.number, account.holder]);
    }

    writeln!(out, "{}", finish(builder.build(), Columns::new(1..2)))?;
    writeln!(out, "{}", instructions.exact_amount_notice)?;
    writeln!(out, "{}", instructions.deadline_notice)?;

    Ok(())
}

pub fn render_upload(out: &mut impl Write, state: &UploadState) -> Result<(), RenderError> {
    if let Some(message) = state.message() {
        writeln!(out, "{message}")?;
    }

    if let Some(error) = state.error() {
        writeln!(out, "{error}")?;
    }

    Ok(())
}

pub fn render_history(
    out: &mut impl Write,
    state: &HistoryState,
    rows: &[OrderRow],
) -> Result<(), RenderError> {
    if let Some(error) = &state.error {
        writeln!(out, "{error}")?;
        return Ok(());
    }

    if state.is_empty() {
        writeln!(out, "You have no orders yet. Start shopping from the catalog.")?;
        return Ok(());
    }

    let mut builder = Builder::default();
    let mut color_ops = Vec::with_capacity(rows.len() * 2);

    builder.push_record(["Order", "Date", "Total", "Status", "Payment"]);

    for (index, row) in rows.iter().enumerate() {
        builder.push_record([
            row.reference.clone(),
            format!("{} {}", row.placed_at.date, row.placed_at.time)
                .trim_end()
                .to_string(),
            row.total.clone(),
            row.status.label.to_string(),
            row.payment.label.to_string(),
        ]);

        color_ops.push((index + 1, 3, tier_color(row.status.tier)));
        color_ops.push((index + 1, 4, tier_color(row.payment.tier)));
    }

    let mut table = finish(builder.build(), Columns::new(2..3));

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    writeln!(out, "{table}")?;

    if let Some(pagination) = state.pagination() {
        render_pagination(out, &pagination)?;
    }

    Ok(())
}

fn render_pagination(
    out: &mut impl Write,
    pagination: &PaginationControls,
) -> Result<(), RenderError> {
    let controls = pagination
        .controls
        .iter()
        .map(|control| match control {
            PageControl::Page {
                number,
                current: true,
            } => format!("[{number}]"),
            PageControl::Page { number, .. } => number.to_string(),
            PageControl::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let previous = if pagination.previous_enabled { "<" } else { " " };
    let next = if pagination.next_enabled { ">" } else { " " };

    writeln!(out, "{previous} {controls} {next}")?;
    writeln!(out, "{}", pagination.summary)?;

    Ok(())
}

pub fn render_detail(out: &mut impl Write, detail: &OrderDetailView) -> Result<(), RenderError> {
    write!(out, "Order #{}", detail.order_id)?;

    if let Some(reference) = &detail.reference {
        write!(out, " / {reference}")?;
    }

    writeln!(out, "  {}", badge(detail.status))?;
    writeln!(
        out,
        "Placed:         {} {}",
        detail.placed_at.date, detail.placed_at.time
    )?;
    writeln!(out, "Payment status: {}", badge(detail.payment))?;
    writeln!(out, "Payment method: {}", detail.payment_method)?;

    if let Some(transaction_id) = &detail.transaction_id {
        writeln!(out, "Transaction ID: {transaction_id}")?;
    }

    if let Some(url) = &detail.proof_url {
        writeln!(out, "Payment proof:  {url}")?;
    }

    writeln!(out, "\nRecipient:      {}", detail.recipient_name)?;
    writeln!(out, "Phone:          {}", detail.phone_number)?;
    writeln!(out, "Address:        {}", detail.address)?;

    if let Some(note) = &detail.note {
        writeln!(out, "Note:           {note}")?;
    }

    if let Some(account) = &detail.account {
        writeln!(out, "Account:        {account}")?;
    }

    if detail.items.is_empty() {
        writeln!(out, "\nThis order has no items.")?;
    } else {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit price", "Subtotal", "Product"]);

        for item in &detail.items {
            builder.push_record([
                item.name.clone(),
                item.quantity.to_string(),
                item.unit_price.clone(),
                item.subtotal.clone(),
                item.product
                    .as_ref()
                    .map(|route| route.path())
                    .unwrap_or_default(),
            ]);
        }

        writeln!(out, "\n{}", finish(builder.build(), Columns::new(1..4)))?;
    }

    writeln!(out, "Order total: {}", detail.total)?;

    Ok(())
}
