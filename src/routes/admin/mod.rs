use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::routes::{admin_context, render_template};

pub mod about_content;
pub mod blog_posts;
pub mod categories;
pub mod contact_info;
pub mod products;
pub mod settings;
pub mod submissions;
pub mod testimonials;

#[get("")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = admin_context(&flash_messages, &user, "admin-dashboard");
    render_template(&tera, "admin/dashboard.html", &context)
}
