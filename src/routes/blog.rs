use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::cache::QueryCache;
use crate::repository::DieselRepository;
use crate::routes::{render_template, site_context};
use crate::services::{ServiceError, blog as blog_service};

#[derive(Debug, Deserialize)]
pub struct BlogParams {
    pub search: Option<String>,
    pub page: Option<usize>,
}

#[get("/blog")]
pub async fn show_blog(
    params: web::Query<BlogParams>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = params.page.filter(|page| *page > 0).unwrap_or(1);
    let posts = match blog_service::load_blog_page(repo.get_ref(), params.search.as_deref(), page) {
        Ok(posts) => posts,
        Err(err) => {
            log::error!("Failed to load the blog: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match site_context(&flash_messages, "blog", repo.get_ref(), cache.get_ref()) {
        Ok(mut context) => {
            context.insert("posts", &posts);
            context.insert("search", &params.search);
            render_template(&tera, "blog/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the site chrome: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/blog/{id}")]
pub async fn show_blog_post(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let post = match blog_service::load_blog_post(repo.get_ref(), path.into_inner()) {
        Ok(post) => post,
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load the blog post: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match site_context(&flash_messages, "blog", repo.get_ref(), cache.get_ref()) {
        Ok(mut context) => {
            context.insert("post", &post);
            render_template(&tera, "blog/detail.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the site chrome: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
