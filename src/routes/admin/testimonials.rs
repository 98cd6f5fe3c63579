use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::testimonials::TestimonialForm;
use crate::realtime::ChangeBroker;
use crate::repository::DieselRepository;
use crate::routes::{admin_context, redirect, render_template};
use crate::services::{ServiceError, testimonials as testimonial_service};

const LISTING: &str = "/admin/testimonials";

#[get("/testimonials")]
pub async fn list_testimonials(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match testimonial_service::load_admin_testimonials(repo.get_ref(), &user) {
        Ok(testimonials) => {
            let mut context = admin_context(&flash_messages, &user, "admin-testimonials");
            context.insert("testimonials", &testimonials);
            render_template(&tera, "admin/testimonials.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list testimonials: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/testimonials/add")]
pub async fn add_testimonial(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<TestimonialForm>,
) -> impl Responder {
    let new_testimonial = match form.into_new_testimonial() {
        Ok(new_testimonial) => new_testimonial,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match testimonial_service::create_testimonial(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        &new_testimonial,
    ) {
        Ok(testimonial) => {
            FlashMessage::success(format!("Testimonial from {} added.", testimonial.name)).send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to add a testimonial: {err}");
            FlashMessage::error("Failed to add the testimonial.").send();
            redirect(LISTING)
        }
    }
}

#[post("/testimonials/{id}/update")]
pub async fn update_testimonial(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<TestimonialForm>,
) -> impl Responder {
    let updates = match form.into_update_testimonial() {
        Ok(updates) => updates,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match testimonial_service::update_testimonial(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        path.into_inner(),
        &updates,
    ) {
        Ok(_) => {
            FlashMessage::success("Testimonial updated.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Testimonial not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to update a testimonial: {err}");
            FlashMessage::error("Failed to update the testimonial.").send();
            redirect(LISTING)
        }
    }
}

#[post("/testimonials/{id}/delete")]
pub async fn delete_testimonial(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
) -> impl Responder {
    match testimonial_service::delete_testimonial(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        path.into_inner(),
    ) {
        Ok(()) => {
            FlashMessage::success("Testimonial deleted.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Testimonial not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to delete a testimonial: {err}");
            FlashMessage::error("Failed to delete the testimonial.").send();
            redirect(LISTING)
        }
    }
}
