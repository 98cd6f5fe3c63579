use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use verdura_store::cache::{QueryCache, attach_invalidation};
use verdura_store::config::{FtpConfig, ServerConfig};
use verdura_store::db::establish_connection_pool;
use verdura_store::middleware::redirect_unauthorized;
use verdura_store::realtime::ChangeBroker;
use verdura_store::repository::DieselRepository;
use verdura_store::routes::admin;
use verdura_store::routes::auth::{login, logout, show_login};
use verdura_store::routes::blog::{show_blog, show_blog_post};
use verdura_store::routes::contact::{show_contact, submit_contact};
use verdura_store::routes::main::{
    show_about, show_faq, show_home, show_privacy_policy, show_return_policy,
    show_shipping_policy, show_terms_of_service,
};
use verdura_store::routes::products::{show_catalog, show_product};
use verdura_store::routes::uploads::{upload_image, upload_image_preflight};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let admin_email = match env::var("ADMIN_EMAIL") {
        Ok(admin_email) => admin_email,
        Err(_) => {
            log::error!("ADMIN_EMAIL environment variable not set");
            std::process::exit(1);
        }
    };
    let admin_password = match env::var("ADMIN_PASSWORD") {
        Ok(admin_password) => admin_password,
        Err(_) => {
            log::error!("ADMIN_PASSWORD environment variable not set");
            std::process::exit(1);
        }
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let config = ServerConfig {
        secret: secret.unwrap_or_default(),
        domain: domain.clone(),
        admin_email,
        admin_password,
        public_base_url: env::var("PUBLIC_BASE_URL")
            .unwrap_or("http://localhost:8080/images".to_string()),
        ftp: FtpConfig {
            host: env::var("FTP_HOST").unwrap_or("localhost".to_string()),
            username: env::var("FTP_USERNAME").unwrap_or_default(),
            password: env::var("FTP_PASSWORD").unwrap_or_default(),
        },
    };

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let broker = ChangeBroker::new();
    let cache = QueryCache::new();
    // Keep the invalidation listeners alive for the server's lifetime.
    let _invalidation_subs = attach_invalidation(&broker, &cache);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_home)
            .service(show_catalog)
            .service(show_product)
            .service(show_blog)
            .service(show_blog_post)
            .service(show_about)
            .service(show_faq)
            .service(show_privacy_policy)
            .service(show_terms_of_service)
            .service(show_shipping_policy)
            .service(show_return_policy)
            .service(show_contact)
            .service(submit_contact)
            .service(show_login)
            .service(login)
            .service(logout)
            .service(upload_image)
            .service(upload_image_preflight)
            .service(
                web::scope("/admin")
                    .wrap(middleware::from_fn(redirect_unauthorized))
                    .service(admin::show_dashboard)
                    .service(admin::products::list_products)
                    .service(admin::products::add_product)
                    .service(admin::products::update_product)
                    .service(admin::products::delete_product)
                    .service(admin::categories::list_categories)
                    .service(admin::categories::add_category)
                    .service(admin::categories::update_category)
                    .service(admin::categories::delete_category)
                    .service(admin::blog_posts::list_blog_posts)
                    .service(admin::blog_posts::add_blog_post)
                    .service(admin::blog_posts::update_blog_post)
                    .service(admin::blog_posts::delete_blog_post)
                    .service(admin::testimonials::list_testimonials)
                    .service(admin::testimonials::add_testimonial)
                    .service(admin::testimonials::update_testimonial)
                    .service(admin::testimonials::delete_testimonial)
                    .service(admin::contact_info::list_contact_info)
                    .service(admin::contact_info::add_contact_info)
                    .service(admin::contact_info::update_contact_info)
                    .service(admin::contact_info::delete_contact_info)
                    .service(admin::about_content::list_about_sections)
                    .service(admin::about_content::add_about_section)
                    .service(admin::about_content::update_about_section)
                    .service(admin::about_content::delete_about_section)
                    .service(admin::submissions::list_submissions)
                    .service(admin::submissions::export_submissions)
                    .service(admin::submissions::delete_submission)
                    .service(admin::settings::list_settings)
                    .service(admin::settings::update_setting),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(broker.clone()))
            .app_data(web::Data::new(cache.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
