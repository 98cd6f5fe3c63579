use actix_web::http::header;
use actix_web::HttpResponse;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::cache::QueryCache;
use crate::repository::SiteSettingReader;
use crate::services::settings as settings_service;

pub mod admin;
pub mod auth;
pub mod blog;
pub mod contact;
pub mod main;
pub mod products;
pub mod uploads;

/// Shared query parameter for paginated listings.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

impl PageParams {
    pub fn page(&self) -> usize {
        self.page.filter(|page| *page > 0).unwrap_or(1)
    }
}

/// 303 redirect used after form submissions.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Render a template or log the failure and return a 500.
pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render {name}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Success => "success",
        Level::Warning => "warning",
        Level::Error => "error",
    }
}

/// Context shared by every page: flash alerts and the active page marker.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts: Vec<(&'static str, &str)> = flash_messages
        .iter()
        .map(|message| (level_class(message.level()), message.content()))
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Public page context: base context plus the cached site chrome.
pub fn site_context<R>(
    flash_messages: &IncomingFlashMessages,
    current_page: &str,
    repo: &R,
    cache: &QueryCache,
) -> crate::services::ServiceResult<Context>
where
    R: SiteSettingReader + ?Sized,
{
    let chrome = settings_service::load_site_chrome(repo, cache)?;
    let mut context = base_context(flash_messages, current_page);
    context.insert("chrome", &chrome);
    Ok(context)
}

/// Admin page context: base context plus the signed-in user.
pub fn admin_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
) -> Context {
    let mut context = base_context(flash_messages, current_page);
    context.insert("user", user);
    context
}
