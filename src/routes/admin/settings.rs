use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::settings::UpdateSettingForm;
use crate::realtime::ChangeBroker;
use crate::repository::DieselRepository;
use crate::routes::{admin_context, redirect, render_template};
use crate::services::{ServiceError, settings as settings_service};

const LISTING: &str = "/admin/settings";

#[get("/settings")]
pub async fn list_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match settings_service::load_settings_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = admin_context(&flash_messages, &user, "admin-settings");
            context.insert("settings", &data.settings);
            render_template(&tera, "admin/settings.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list settings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Save one settings document. The body carries repeated `paths`/`values`
/// pairs, which `web::Form` cannot decode, so the raw body is parsed with
/// `serde_html_form`.
#[post("/settings/update")]
pub async fn update_setting(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    broker: web::Data<ChangeBroker>,
    body: String,
) -> impl Responder {
    let form: UpdateSettingForm = match serde_html_form::from_str(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(format!("Invalid settings form: {err}")).send();
            return redirect(LISTING);
        }
    };

    let (setting_id, edits) = match form.into_edits() {
        Ok(parts) => parts,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(LISTING);
        }
    };

    match settings_service::save_setting(repo.get_ref(), &user, broker.get_ref(), setting_id, edits)
    {
        Ok(setting) => {
            FlashMessage::success(format!("Setting \"{}\" saved.", setting.key)).send();
            redirect(LISTING)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Setting not found.").send();
            redirect(LISTING)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(LISTING)
        }
        Err(err) => {
            log::error!("Failed to save a setting: {err}");
            FlashMessage::error("Failed to save the setting.").send();
            redirect(LISTING)
        }
    }
}
