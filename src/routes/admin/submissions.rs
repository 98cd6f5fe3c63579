use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::realtime::ChangeBroker;
use crate::repository::DieselRepository;
use crate::routes::{PageParams, admin_context, redirect, render_template};
use crate::services::{ServiceError, contact as contact_service};

const LISTING: &str = "/admin/submissions";

#[get("/submissions")]
pub async fn list_submissions(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match contact_service::load_admin_submissions(repo.get_ref(), &user, params.page()) {
        Ok(submissions) => {
            let mut context = admin_context(&flash_messages, &user, "admin-submissions");
            context.insert("submissions", &submissions);
            render_template(&tera, "admin/submissions.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list submissions: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/submissions/export.csv")]
pub async fn export_submissions(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match contact_service::export_submissions_csv(repo.get_ref(), &user) {
        Ok(csv) => {
            let filename = format!(
                "contact-submissions-{}.csv",
                Local::now().format("%Y-%m-%d")
            );
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(csv)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to export submissions: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/submissions/{id}/delete")]
pub async fn delete_submission(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
) -> impl Responder {
    match contact_service::delete_submission(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        path.into_inner(),
    ) {
        Ok(()) => {
            FlashMessage::success("Submission deleted.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Submission not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to delete a submission: {err}");
            FlashMessage::error("Failed to delete the submission.").send();
            redirect(LISTING)
        }
    }
}
