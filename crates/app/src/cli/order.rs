use std::io;

use clap::Args;
use storefront_app::{pages::OrderDetailPage, render};

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Order id
    order_id: String,
}

pub(crate) async fn run(context: &Context, args: OrderArgs) -> Result<(), String> {
    let page = OrderDetailPage::new(
        context.api.clone(),
        context.navigator(),
        context.redirect_delay,
        context.images.clone(),
        context.zone.clone(),
        Some(&args.order_id),
    );

    page.load().await;

    if let Some(error) = page.state().with(|state| state.error.clone()) {
        return Err(context.follow_redirect(page.take_redirect(), error).await);
    }

    let Some(detail) = page.detail() else {
        return Err("order not found".to_string());
    };

    render::render_detail(&mut io::stdout().lock(), &detail).map_err(|error| error.to_string())
}
