use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::categories::CategoryForm;
use crate::realtime::ChangeBroker;
use crate::repository::DieselRepository;
use crate::routes::{admin_context, redirect, render_template};
use crate::services::{ServiceError, categories as category_service};

const LISTING: &str = "/admin/categories";

#[get("/categories")]
pub async fn list_categories(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match category_service::load_admin_categories(repo.get_ref(), &user) {
        Ok(categories) => {
            let mut context = admin_context(&flash_messages, &user, "admin-categories");
            context.insert("categories", &categories);
            render_template(&tera, "admin/categories.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories/add")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    let new_category = match form.into_new_category() {
        Ok(new_category) => new_category,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match category_service::create_category(repo.get_ref(), &user, broker.get_ref(), &new_category)
    {
        Ok(category) => {
            FlashMessage::success(format!("Category \"{}\" added.", category.name)).send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A category with that name already exists.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to add a category: {err}");
            FlashMessage::error("Failed to add the category.").send();
            redirect(LISTING)
        }
    }
}

#[post("/categories/{id}/update")]
pub async fn update_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    let updates = match form.into_update_category() {
        Ok(updates) => updates,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match category_service::update_category(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        path.into_inner(),
        &updates,
    ) {
        Ok(_) => {
            FlashMessage::success("Category updated.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to update a category: {err}");
            FlashMessage::error("Failed to update the category.").send();
            redirect(LISTING)
        }
    }
}

#[post("/categories/{id}/delete")]
pub async fn delete_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
) -> impl Responder {
    match category_service::delete_category(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        path.into_inner(),
    ) {
        Ok(()) => {
            FlashMessage::success("Category deleted.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to delete a category: {err}");
            FlashMessage::error("Failed to delete the category.").send();
            redirect(LISTING)
        }
    }
}
