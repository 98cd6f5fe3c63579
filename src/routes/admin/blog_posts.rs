use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::blog_posts::BlogPostForm;
use crate::realtime::ChangeBroker;
use crate::repository::DieselRepository;
use crate::routes::{PageParams, admin_context, redirect, render_template};
use crate::services::{ServiceError, blog as blog_service};

const LISTING: &str = "/admin/blog";

#[get("/blog")]
pub async fn list_blog_posts(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match blog_service::load_admin_blog_posts(repo.get_ref(), &user, params.page()) {
        Ok(posts) => {
            let mut context = admin_context(&flash_messages, &user, "admin-blog");
            context.insert("posts", &posts);
            render_template(&tera, "admin/blog_posts.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list blog posts: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/blog/add")]
pub async fn add_blog_post(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<BlogPostForm>,
) -> impl Responder {
    let new_post = match form.into_new_blog_post() {
        Ok(new_post) => new_post,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match blog_service::create_blog_post(repo.get_ref(), &user, broker.get_ref(), &new_post) {
        Ok(post) => {
            FlashMessage::success(format!("Post \"{}\" added.", post.title)).send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to add a blog post: {err}");
            FlashMessage::error("Failed to add the post.").send();
            redirect(LISTING)
        }
    }
}

#[post("/blog/{id}/update")]
pub async fn update_blog_post(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    web::Form(form): web::Form<BlogPostForm>,
) -> impl Responder {
    let post_id = path.into_inner();

    // The edit form never shows the publish date; keep the original when
    // the post stays published.
    let existing = match blog_service::load_admin_blog_post(repo.get_ref(), &user, post_id) {
        Ok(existing) => existing,
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Post not found.").send();
            return redirect(LISTING);
        }
        Err(err) => {
            log::error!("Failed to load a blog post: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let updates = match form.into_update_blog_post(existing.published_at) {
        Ok(updates) => updates,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match blog_service::update_blog_post(repo.get_ref(), &user, broker.get_ref(), post_id, &updates)
    {
        Ok(_) => {
            FlashMessage::success("Post updated.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Post not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to update a blog post: {err}");
            FlashMessage::error("Failed to update the post.").send();
            redirect(LISTING)
        }
    }
}

#[post("/blog/{id}/delete")]
pub async fn delete_blog_post(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
) -> impl Responder {
    match blog_service::delete_blog_post(repo.get_ref(), &user, broker.get_ref(), path.into_inner())
    {
        Ok(()) => {
            FlashMessage::success("Post deleted.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Post not found.").send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to delete a blog post: {err}");
            FlashMessage::error("Failed to delete the post.").send();
            redirect(LISTING)
        }
    }
}
