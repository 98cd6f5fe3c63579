use std::fs;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{HttpResponse, Responder, options, post, web};
use serde_json::json;

use crate::config::ServerConfig;
use crate::ftp::FtpClient;
use crate::services::{ServiceError, uploads as upload_service};
use crate::services::uploads::{ImageUpload, StoredImage};

/// Multipart payload of the upload relay. The multipart limit sits above
/// the service-level ceiling so oversized files get the JSON error instead
/// of a bare 400 from the extractor.
#[derive(MultipartForm)]
pub struct UploadImageForm {
    #[multipart(limit = "8MiB")]
    pub file: TempFile,
    pub section: Option<Text<String>>,
}

/// Relay success envelope. Callers key off the `success` flag, not the
/// HTTP status.
fn success_body(stored: &StoredImage) -> serde_json::Value {
    json!({"success": true, "url": stored.url, "filename": stored.filename})
}

fn error_body(message: &str) -> serde_json::Value {
    json!({"success": false, "error": message})
}

fn cors_headers(mut response: actix_web::HttpResponseBuilder) -> actix_web::HttpResponseBuilder {
    response
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"));
    response
}

#[options("/upload-image")]
pub async fn upload_image_preflight() -> impl Responder {
    cors_headers(HttpResponse::NoContent()).finish()
}

#[post("/upload-image")]
pub async fn upload_image(
    config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<UploadImageForm>,
) -> impl Responder {
    let bytes = match fs::read(form.file.file.path()) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::error!("Failed to read the uploaded file: {err}");
            return cors_headers(HttpResponse::InternalServerError())
                .json(error_body("failed to read the upload"));
        }
    };

    let upload = ImageUpload {
        bytes,
        filename: form.file.file_name.clone(),
        content_type: form.file.content_type.as_ref().map(|m| m.to_string()),
        section: form.section.map(|section| section.into_inner()),
    };

    let mut transfer = FtpClient::new(config.ftp.clone());
    match upload_service::store_image(&mut transfer, &config.public_base_url, upload) {
        Ok(stored) => cors_headers(HttpResponse::Ok()).json(success_body(&stored)),
        Err(ServiceError::Upload(message)) => {
            log::warn!("Rejected an image upload: {message}");
            cors_headers(HttpResponse::BadRequest()).json(error_body(&message))
        }
        Err(err) => {
            log::error!("Failed to relay an image upload: {err}");
            cors_headers(HttpResponse::InternalServerError()).json(error_body("upload failed"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_carries_the_success_flag() {
        let stored = StoredImage {
            url: "http://localhost:8080/images/upload/products_1700000000000.webp".to_string(),
            filename: "products_1700000000000.webp".to_string(),
        };

        let body = success_body(&stored);
        assert_eq!(body["success"], true);
        assert_eq!(body["filename"], "products_1700000000000.webp");
        assert_eq!(
            body["url"],
            "http://localhost:8080/images/upload/products_1700000000000.webp"
        );
    }

    #[test]
    fn error_body_carries_the_success_flag() {
        let body = error_body("only image uploads are accepted");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "only image uploads are accepted");
        assert!(body.get("url").is_none());
    }
}
