use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::products::ProductForm;
use crate::realtime::ChangeBroker;
use crate::repository::DieselRepository;
use crate::routes::{PageParams, admin_context, redirect, render_template};
use crate::services::{ServiceError, products as product_service};

const LISTING: &str = "/admin/products";

#[get("/products")]
pub async fn list_products(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match product_service::load_admin_products(repo.get_ref(), &user, params.page()) {
        Ok(data) => {
            let mut context = admin_context(&flash_messages, &user, "admin-products");
            context.insert("products", &data.products);
            context.insert("categories", &data.categories);
            render_template(&tera, "admin/products.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<ProductForm>,
) -> impl Responder {
    let new_product = match form.into_new_product() {
        Ok(new_product) => new_product,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match product_service::create_product(repo.get_ref(), &user, broker.get_ref(), &new_product) {
        Ok(product) => {
            FlashMessage::success(format!("Product \"{}\" added.", product.name)).send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to add a product: {err}");
            FlashMessage::error("Failed to add the product.").send();
            redirect(LISTING)
        }
    }
}

#[post("/products/{id}/update")]
pub async fn update_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<ProductForm>,
) -> impl Responder {
    let updates = match form.into_update_product() {
        Ok(updates) => updates,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match product_service::update_product(
        repo.get_ref(),
        &user,
        broker.get_ref(),
        path.into_inner(),
        &updates,
    ) {
        Ok(_) => {
            FlashMessage::success("Product updated.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to update a product: {err}");
            FlashMessage::error("Failed to update the product.").send();
            redirect(LISTING)
        }
    }
}

#[post("/products/{id}/delete")]
pub async fn delete_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
) -> impl Responder {
    match product_service::delete_product(repo.get_ref(), &user, broker.get_ref(), path.into_inner())
    {
        Ok(()) => {
            FlashMessage::success("Product deleted.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to delete a product: {err}");
            FlashMessage::error("Failed to delete the product.").send();
            redirect(LISTING)
        }
    }
}
