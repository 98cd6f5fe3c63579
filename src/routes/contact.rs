use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::cache::QueryCache;
use crate::forms::contact::ContactForm;
use crate::realtime::ChangeBroker;
use crate::repository::DieselRepository;
use crate::routes::{redirect, render_template, site_context};
use crate::services::{contact as contact_service, contact_info as contact_info_service};

#[get("/contact")]
pub async fn show_contact(
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let channels = match contact_info_service::load_contact_channels(repo.get_ref()) {
        Ok(channels) => channels,
        Err(err) => {
            log::error!("Failed to load the contact page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match site_context(&flash_messages, "contact", repo.get_ref(), cache.get_ref()) {
        Ok(mut context) => {
            context.insert("channels", &channels);
            render_template(&tera, "contact/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the site chrome: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/contact")]
pub async fn submit_contact(
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<ContactForm>,
) -> impl Responder {
    let new_submission = match form.into_new_submission() {
        Ok(new_submission) => new_submission,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/contact");
        }
    };

    match contact_service::submit_contact_form(repo.get_ref(), broker.get_ref(), &new_submission) {
        Ok(_) => {
            FlashMessage::success("Thanks for reaching out. We will reply soon.").send();
            redirect("/contact")
        }
        Err(err) => {
            log::error!("Failed to store a contact submission: {err}");
            FlashMessage::error("Something went wrong. Please try again.").send();
            redirect("/contact")
        }
    }
}
