use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::about_content::AboutContentForm;
use crate::realtime::ChangeBroker;
use crate::repository::DieselRepository;
use crate::routes::{admin_context, redirect, render_template};
use crate::services::{ServiceError, about as about_service};

const LISTING: &str = "/admin/about";

#[get("/about")]
pub async fn list_about_sections(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match about_service::load_admin_about_sections(repo.get_ref(), &user) {
        Ok(sections) => {
            let mut context = admin_context(&flash_messages, &user, "admin-about");
            context.insert("sections", &sections);
            render_template(&tera, "admin/about_content.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list about sections: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/about/add")]
pub async fn add_about_section(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<AboutContentForm>,
) -> impl Responder {
    let new_content = match form.into_new_about_content() {
        Ok(new_content) => new_content,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match about_service::create_about_section(repo.get_ref(), &user, broker.get_ref(), &new_content)
    {
        Ok(section) => {
            FlashMessage::success(format!("Section \"{}\" added.", section.section)).send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to add an about section: {err}");
            FlashMessage::error("Failed to add the section.").send();
            redirect(LISTING)
        }
    }
}

#[post("/about/{id}/update")]
pub async fn update_about_section(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<AboutContentForm>,
) -> impl Responder {
    let updates = match form.into_update_about_content() {
        Ok(updates) => updates,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match about_service::update_about_section(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        path.into_inner(),
        &updates,
    ) {
        Ok(_) => {
            FlashMessage::success("Section updated.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Section not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to update an about section: {err}");
            FlashMessage::error("Failed to update the section.").send();
            redirect(LISTING)
        }
    }
}

#[post("/about/{id}/delete")]
pub async fn delete_about_section(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
) -> impl Responder {
    match about_service::delete_about_section(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        path.into_inner(),
    ) {
        Ok(()) => {
            FlashMessage::success("Section deleted.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Section not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to delete an about section: {err}");
            FlashMessage::error("Failed to delete the section.").send();
            redirect(LISTING)
        }
    }
}
