use std::io;

use clap::Args;
use storefront::{checkout::ShippingField, payment::DEFAULT_BANK_ACCOUNTS};
use storefront_app::{
    navigation::Route,
    pages::{CheckoutPage, PaymentPage, PaymentView},
    render,
};

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Recipient name; defaults to the account name
    #[arg(long)]
    recipient_name: Option<String>,

    /// Contact phone number; defaults to the account's number
    #[arg(long)]
    phone_number: Option<String>,

    /// Full shipping address
    #[arg(long)]
    address: Option<String>,

    /// Note for the seller
    #[arg(long)]
    note: Option<String>,

    /// Place the order instead of only reviewing it
    #[arg(long)]
    place: bool,
}

pub(crate) async fn run(context: &Context, args: CheckoutArgs) -> Result<(), String> {
    let page = CheckoutPage::new(
        context.api.clone(),
        context.navigator(),
        context.images.clone(),
    );

    page.load().await;

    let fields = [
        (ShippingField::RecipientName, args.recipient_name),
        (ShippingField::PhoneNumber, args.phone_number),
        (ShippingField::Address, args.address),
        (ShippingField::Note, args.note),
    ];

    for (field, value) in fields {
        if let Some(value) = value {
            page.set_field(field, value);
        }
    }

    if args.place {
        page.submit().await;
    }

    let state = page.state().snapshot();
    let mut out = io::stdout().lock();

    render::render_checkout(&mut out, &state, &page.summary()).map_err(|error| error.to_string())?;

    if let Some(error) = state.load_error.or(state.submit_error) {
        return Err(error);
    }

    if let Some(validation) = state.validation {
        return Err(validation.to_string());
    }

    let Some(Route::PaymentInstructions { order_id, order }) = context.navigator.last_route()
    else {
        return Ok(());
    };

    let payment = PaymentPage::new(
        context.api.clone(),
        context.navigator(),
        order_id,
        order,
        DEFAULT_BANK_ACCOUNTS,
    );

    payment.load().await;

    match payment.instructions() {
        Some(instructions) => render::render_payment(&mut out, &instructions)
            .map_err(|error| error.to_string()),
        None => Err(payment.state().with(|state| match &state.view {
            PaymentView::NotFound(message) => message.clone(),
            PaymentView::Loading | PaymentView::Ready(_) => "order is unavailable".to_string(),
        })),
    }
}
