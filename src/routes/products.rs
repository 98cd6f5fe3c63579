use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::cache::QueryCache;
use crate::repository::DieselRepository;
use crate::routes::{render_template, site_context};
use crate::services::{ServiceError, products as product_service};

/// Query parameters of the public catalog. `filter_by` is the legacy alias
/// of `category`; both carry a slug or a plain category name.
#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub category: Option<String>,
    pub filter_by: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

impl CatalogParams {
    fn filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .or(self.filter_by.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[get("/products")]
pub async fn show_catalog(
    params: web::Query<CatalogParams>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = params.page.filter(|page| *page > 0).unwrap_or(1);
    let data = match product_service::load_catalog_page(
        repo.get_ref(),
        params.filter(),
        params.search.as_deref(),
        page,
    ) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load the catalog: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match site_context(&flash_messages, "products", repo.get_ref(), cache.get_ref()) {
        Ok(mut context) => {
            context.insert("products", &data.products);
            context.insert("categories", &data.categories);
            context.insert("active_category", &data.active_category);
            context.insert("search", &data.search);
            render_template(&tera, "products/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the site chrome: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{id}")]
pub async fn show_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product = match product_service::load_product_detail(repo.get_ref(), path.into_inner()) {
        Ok(product) => product,
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load the product page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match site_context(&flash_messages, "products", repo.get_ref(), cache.get_ref()) {
        Ok(mut context) => {
            context.insert("product", &product);
            render_template(&tera, "products/detail.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the site chrome: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
