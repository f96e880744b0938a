use std::io::Write;

use storefront::{orders::OrderId, upload::ProofFile};
use storefront_app::api::{ApiError, HttpStorefrontApi, StorefrontApi};
use testresult::TestResult;

// Nothing listens on the discard port in the test environment.
const UNREACHABLE: &str = "http://127.0.0.1:9/api";

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() -> TestResult {
    let api = HttpStorefrontApi::new(UNREACHABLE, Some("token".to_string()));

    let error = api.cart().await.err().ok_or("expected a failure")?;

    assert!(matches!(error, ApiError::Transport(_)), "got {error:?}");
    assert_eq!(error.server_message(), None);
    assert!(!error.is_auth());

    Ok(())
}

#[tokio::test]
async fn test_proof_read_from_disk_is_uploaded_as_multipart() -> TestResult {
    let mut file = tempfile::Builder::new().suffix(".jpg").tempfile()?;

    file.write_all(&[0xff, 0xd8, 0xff, 0xe0])?;

    let bytes = tokio::fs::read(file.path()).await?;
    let name = file
        .path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or("temp file has no name")?;

    let proof = ProofFile::new(name, bytes)?;

    assert_eq!(proof.format().mime_type(), "image/jpeg");
    assert_eq!(proof.len(), 4);

    let api = HttpStorefrontApi::new(UNREACHABLE, None);
    let id = OrderId::new(55).ok_or("invalid id")?;

    let error = api
        .submit_payment_proof(id, proof)
        .await
        .err()
        .ok_or("expected a failure")?;

    assert!(matches!(error, ApiError::Transport(_)), "got {error:?}");

    Ok(())
}
