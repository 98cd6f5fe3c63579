use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::middleware::Next;
use actix_web::{Error, HttpResponse};

/// Turns 401 responses from protected scopes into a redirect to the login
/// page, so browser users see the form instead of a bare error.
pub async fn redirect_unauthorized(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let res = next.call(req).await;

    match res {
        Ok(res) if res.status() == StatusCode::UNAUTHORIZED => {
            let (req, _) = res.into_parts();
            let redirect = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/login"))
                .finish();
            Ok(ServiceResponse::new(req, redirect))
        }
        Ok(res) => Ok(res.map_into_boxed_body()),
        Err(err) => {
            let response = err.error_response();
            if response.status() == StatusCode::UNAUTHORIZED {
                Err(actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::SeeOther()
                        .insert_header((header::LOCATION, "/login"))
                        .finish(),
                )
                .into())
            } else {
                Err(err)
            }
        }
    }
}
