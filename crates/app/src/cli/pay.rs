use std::{io, path::PathBuf};

use clap::Args;
use storefront::{orders::parse_order_id, payment::DEFAULT_BANK_ACCOUNTS, upload::ProofFile};
use storefront_app::{
    pages::{PaymentPage, PaymentView, UploadOutcome},
    render,
};
use tracing::warn;

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct PayArgs {
    /// Order id
    order_id: String,

    /// Proof of payment image to upload (JPG, PNG or GIF, max 2MB)
    #[arg(long)]
    proof: Option<PathBuf>,
}

pub(crate) async fn run(context: &Context, args: PayArgs) -> Result<(), String> {
    let order_id = parse_order_id(Some(&args.order_id)).map_err(|error| error.to_string())?;

    let page = PaymentPage::new(
        context.api.clone(),
        context.navigator(),
        order_id,
        None,
        DEFAULT_BANK_ACCOUNTS,
    );

    page.load().await;

    let Some(instructions) = page.instructions() else {
        return Err(page.state().with(|state| match &state.view {
            PaymentView::NotFound(message) => message.clone(),
            PaymentView::Loading | PaymentView::Ready(_) => "order is unavailable".to_string(),
        }));
    };

    let mut out = io::stdout().lock();

    render::render_payment(&mut out, &instructions).map_err(|error| error.to_string())?;

    let Some(path) = args.proof else {
        return Ok(());
    };

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|error| format!("failed to read {}: {error}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = ProofFile::new(file_name, bytes).map_err(|error| error.to_string())?;

    if file.exceeds_limit() {
        warn!(bytes = file.len(), "proof is larger than the server accepts");
    }

    let widget = page.upload_widget();

    widget.select_file(file);

    let outcome = widget.submit().await;

    render::render_upload(&mut out, &widget.state().snapshot())
        .map_err(|error| error.to_string())?;

    match outcome {
        Some(outcome @ UploadOutcome::Succeeded(_)) => {
            page.handle_upload(&outcome);
            Ok(())
        }
        Some(UploadOutcome::Failed(message)) => Err(message),
        None => Err("no proof was uploaded".to_string()),
    }
}
