use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::cache::QueryCache;
use crate::repository::DieselRepository;
use crate::routes::{render_template, site_context};
use crate::services::{about as about_service, main as main_service};

#[get("/")]
pub async fn show_home(
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match main_service::load_home_page(repo.get_ref()) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load the home page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match site_context(&flash_messages, "home", repo.get_ref(), cache.get_ref()) {
        Ok(mut context) => {
            context.insert("featured_products", &data.featured_products);
            context.insert("categories", &data.categories);
            context.insert("testimonials", &data.testimonials);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the site chrome: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Render one of the static information pages. They carry no data of
/// their own beyond the site chrome.
fn render_static_page(
    template: &str,
    page: &str,
    repo: &DieselRepository,
    cache: &QueryCache,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse {
    match site_context(flash_messages, page, repo, cache) {
        Ok(context) => render_template(tera, template, &context),
        Err(err) => {
            log::error!("Failed to load the site chrome: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/faq")]
pub async fn show_faq(
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_static_page("main/faq.html", "faq", repo.get_ref(), cache.get_ref(), &flash_messages, &tera)
}

#[get("/privacy-policy")]
pub async fn show_privacy_policy(
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_static_page(
        "main/privacy_policy.html",
        "privacy-policy",
        repo.get_ref(),
        cache.get_ref(),
        &flash_messages,
        &tera,
    )
}

#[get("/terms-of-service")]
pub async fn show_terms_of_service(
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_static_page(
        "main/terms_of_service.html",
        "terms-of-service",
        repo.get_ref(),
        cache.get_ref(),
        &flash_messages,
        &tera,
    )
}

#[get("/shipping-policy")]
pub async fn show_shipping_policy(
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_static_page(
        "main/shipping_policy.html",
        "shipping-policy",
        repo.get_ref(),
        cache.get_ref(),
        &flash_messages,
        &tera,
    )
}

#[get("/return-policy")]
pub async fn show_return_policy(
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_static_page(
        "main/return_policy.html",
        "return-policy",
        repo.get_ref(),
        cache.get_ref(),
        &flash_messages,
        &tera,
    )
}

#[get("/about")]
pub async fn show_about(
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let sections = match about_service::load_about_sections(repo.get_ref()) {
        Ok(sections) => sections,
        Err(err) => {
            log::error!("Failed to load the about page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match site_context(&flash_messages, "about", repo.get_ref(), cache.get_ref()) {
        Ok(mut context) => {
            context.insert("sections", &sections);
            render_template(&tera, "main/about.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the site chrome: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
