use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::contact_info::ContactInfoForm;
use crate::realtime::ChangeBroker;
use crate::repository::DieselRepository;
use crate::routes::{admin_context, redirect, render_template};
use crate::services::{ServiceError, contact_info as contact_info_service};

const LISTING: &str = "/admin/contact-info";

#[get("/contact-info")]
pub async fn list_contact_info(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match contact_info_service::load_admin_contact_channels(repo.get_ref(), &user) {
        Ok(channels) => {
            let mut context = admin_context(&flash_messages, &user, "admin-contact-info");
            context.insert("channels", &channels);
            render_template(&tera, "admin/contact_info.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list contact channels: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/contact-info/add")]
pub async fn add_contact_info(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<ContactInfoForm>,
) -> impl Responder {
    let new_info = match form.into_new_contact_info() {
        Ok(new_info) => new_info,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match contact_info_service::create_contact_channel(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        &new_info,
    ) {
        Ok(_) => {
            FlashMessage::success("Contact channel added.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to add a contact channel: {err}");
            FlashMessage::error("Failed to add the contact channel.").send();
            redirect(LISTING)
        }
    }
}

#[post("/contact-info/{id}/update")]
pub async fn update_contact_info(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<ContactInfoForm>,
) -> impl Responder {
    let updates = match form.into_update_contact_info() {
        Ok(updates) => updates,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match contact_info_service::update_contact_channel(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        path.into_inner(),
        &updates,
    ) {
        Ok(_) => {
            FlashMessage::success("Contact channel updated.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Contact channel not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to update a contact channel: {err}");
            FlashMessage::error("Failed to update the contact channel.").send();
            redirect(LISTING)
        }
    }
}

#[post("/contact-info/{id}/delete")]
pub async fn delete_contact_info(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
) -> impl Responder {
    match contact_info_service::delete_contact_channel(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        path.into_inner(),
    ) {
        Ok(()) => {
            FlashMessage::success("Contact channel deleted.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Contact channel not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to delete a contact channel: {err}");
            FlashMessage::error("Failed to delete the contact channel.").send();
            redirect(LISTING)
        }
    }
}
