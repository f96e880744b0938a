use std::io;

use clap::Args;
use storefront_app::{
    pages::{OrderHistoryPage, page_from_query},
    render,
};

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct OrdersArgs {
    /// Page to show
    #[arg(long)]
    page: Option<String>,
}

pub(crate) async fn run(context: &Context, args: OrdersArgs) -> Result<(), String> {
    let page = OrderHistoryPage::new(
        context.api.clone(),
        context.navigator(),
        context.redirect_delay,
        page_from_query(args.page.as_deref()),
    );

    page.load().await;

    let state = page.state().snapshot();

    if let Some(error) = state.error {
        return Err(context.follow_redirect(page.take_redirect(), error).await);
    }

    render::render_history(&mut io::stdout().lock(), &state, &state.rows(&context.zone))
        .map_err(|error| error.to_string())
}
