use std::io::Write;

use chrono::Utc;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::ftp::FileTransfer;
use crate::services::{ServiceError, ServiceResult};

/// Upload ceiling enforced before anything touches the network.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Extension used when the original filename carries none.
const DEFAULT_EXTENSION: &str = "webp";

/// One image received by the upload relay.
#[derive(Debug)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// Original filename, used only for its extension.
    pub filename: Option<String>,
    pub content_type: Option<String>,
    /// Site section the image belongs to ("products", "blog", ...).
    pub section: Option<String>,
}

/// Public location of a stored image, returned to the admin UI.
#[derive(Debug, Serialize)]
pub struct StoredImage {
    pub url: String,
    pub filename: String,
}

/// Validate, convert and relay one image to the storage host.
///
/// The connection is opened only after the payload passes validation, and
/// closed on both the success and the failure path.
pub fn store_image(
    transfer: &mut dyn FileTransfer,
    public_base_url: &str,
    upload: ImageUpload,
) -> ServiceResult<StoredImage> {
    validate(&upload)?;

    let extension = extension_of(upload.filename.as_deref());
    let (bytes, extension) = convert_to_webp(upload.bytes, extension);
    let filename = remote_filename(upload.section.as_deref(), &extension);

    let mut spool = NamedTempFile::new()
        .map_err(|err| ServiceError::Upload(format!("failed to spool upload: {err}")))?;
    spool
        .write_all(&bytes)
        .map_err(|err| ServiceError::Upload(format!("failed to spool upload: {err}")))?;

    transfer
        .connect()
        .map_err(|err| ServiceError::Upload(err.to_string()))?;

    let uploaded = transfer.upload(spool.path(), &filename);
    transfer.close();
    uploaded.map_err(|err| ServiceError::Upload(err.to_string()))?;

    let url = format!("{}/{}", public_base_url.trim_end_matches('/'), filename);
    Ok(StoredImage { url, filename })
}

fn validate(upload: &ImageUpload) -> ServiceResult<()> {
    let is_image = upload
        .content_type
        .as_deref()
        .is_some_and(|kind| kind.starts_with("image/"));
    if !is_image {
        return Err(ServiceError::Upload(
            "only image uploads are accepted".to_string(),
        ));
    }

    if upload.bytes.is_empty() {
        return Err(ServiceError::Upload("the uploaded file is empty".to_string()));
    }

    if upload.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ServiceError::Upload(
            "the image exceeds the 5 MiB limit".to_string(),
        ));
    }

    Ok(())
}

/// WebP conversion placeholder. The bytes pass through unchanged until an
/// encoder is wired in; the extension is kept so the stored name stays
/// honest about the actual format.
fn convert_to_webp(bytes: Vec<u8>, extension: String) -> (Vec<u8>, String) {
    (bytes, extension)
}

fn extension_of(filename: Option<&str>) -> String {
    filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Storage name: `{section}_{unix-millis}.{ext}` with a sanitized section.
fn remote_filename(section: Option<&str>, extension: &str) -> String {
    let section: String = section
        .unwrap_or_default()
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    let section = if section.is_empty() {
        "image".to_string()
    } else {
        section
    };

    format!("{}_{}.{}", section, Utc::now().timestamp_millis(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ftp::MockFileTransfer;

    fn upload(bytes: Vec<u8>) -> ImageUpload {
        ImageUpload {
            bytes,
            filename: Some("photo.PNG".to_string()),
            content_type: Some("image/png".to_string()),
            section: Some("Products".to_string()),
        }
    }

    #[test]
    fn valid_upload_is_relayed_and_connection_closed() {
        let mut transfer = MockFileTransfer::new();
        transfer.expect_connect().times(1).returning(|| Ok(()));
        transfer
            .expect_upload()
            .times(1)
            .withf(|_, remote| remote.starts_with("products_") && remote.ends_with(".png"))
            .returning(|_, _| Ok(()));
        transfer.expect_close().times(1).return_const(());

        let stored = store_image(&mut transfer, "https://cdn.example.com/images/", upload(vec![1; 1024]))
            .expect("expected success");

        assert!(stored.url.starts_with("https://cdn.example.com/images/products_"));
        assert_eq!(stored.url, format!("https://cdn.example.com/images/{}", stored.filename));
    }

    #[test]
    fn oversized_upload_never_connects() {
        let mut transfer = MockFileTransfer::new();
        // No expectations: any call on the transport fails the test.

        let result = store_image(
            &mut transfer,
            "https://cdn.example.com",
            upload(vec![0; MAX_UPLOAD_BYTES + 1]),
        );

        assert!(matches!(result, Err(ServiceError::Upload(_))));
    }

    #[test]
    fn non_image_content_type_is_rejected() {
        let mut transfer = MockFileTransfer::new();

        let mut payload = upload(vec![1; 16]);
        payload.content_type = Some("application/pdf".to_string());

        let result = store_image(&mut transfer, "https://cdn.example.com", payload);
        assert!(matches!(result, Err(ServiceError::Upload(_))));
    }

    #[test]
    fn transfer_failure_still_closes_the_connection() {
        let mut transfer = MockFileTransfer::new();
        transfer.expect_connect().times(1).returning(|| Ok(()));
        transfer.expect_upload().times(1).returning(|_, remote| {
            Err(crate::ftp::FileTransferError::Transfer {
                remote: remote.to_string(),
                source: std::io::Error::other("broken pipe"),
            })
        });
        transfer.expect_close().times(1).return_const(());

        let result = store_image(&mut transfer, "https://cdn.example.com", upload(vec![1; 16]));
        assert!(matches!(result, Err(ServiceError::Upload(_))));
    }

    #[test]
    fn missing_extension_defaults_to_webp() {
        assert_eq!(extension_of(Some("photo")), "webp");
        assert_eq!(extension_of(Some("photo.jpeg")), "jpeg");
        assert_eq!(extension_of(None), "webp");
        // Suspicious extensions fall back rather than propagate.
        assert_eq!(extension_of(Some("photo.p/n?g")), "webp");
    }
}
