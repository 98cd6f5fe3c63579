use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use validator::Validate;

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::AuthenticatedUser;
use crate::config::ServerConfig;
use crate::forms::auth::LoginForm;
use crate::routes::{base_context, redirect, render_template};

#[get("/login")]
pub async fn show_login(
    identity: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if identity.is_some() {
        return redirect("/admin");
    }

    let context = base_context(&flash_messages, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    config: web::Data<ServerConfig>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    if form.validate().is_err() {
        FlashMessage::error("Enter a valid email address and password.").send();
        return redirect("/login");
    }

    let credentials_match = form.email.trim().eq_ignore_ascii_case(&config.admin_email)
        && form.password == config.admin_password;
    if !credentials_match {
        FlashMessage::error("Invalid email or password.").send();
        return redirect("/login");
    }

    let user = AuthenticatedUser::new(
        config.admin_email.clone(),
        "Administrator",
        vec![SERVICE_ACCESS_ROLE.to_string()],
    );
    let session = match user.to_session_string() {
        Ok(session) => session,
        Err(err) => {
            log::error!("Failed to serialize the session: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(err) = Identity::login(&req.extensions(), session) {
        log::error!("Failed to establish the session: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    redirect("/admin")
}

#[post("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/login")
}
