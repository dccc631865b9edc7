#[macro_use]
extern crate rocket;

use std::path::PathBuf;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::fs::FileServer;
use rocket::http::Header;
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

mod audio;
mod auth;
mod boot;
mod config;
mod db;
mod editor;
mod loader;
mod models;
mod render;
mod routes;
mod site;
mod store;
mod theme;


use config::AppConfig;
use site::Site;
use store::SqliteStore;

/// Keeps browsers and proxies from caching anything under `/settings`.
pub struct NoCacheSettings;

#[rocket::async_trait]
impl Fairing for NoCacheSettings {
    fn info(&self) -> Info {
        Info { name: "No-Cache Settings Pages", kind: Kind::Response }
    }

    async fn on_response<'r>(&self, req: &'r rocket::Request<'_>, res: &mut rocket::Response<'r>) {
        if req.uri().path().starts_with("/settings") {
            res.set_header(Header::new("Cache-Control", "no-store, no-cache, must-revalidate, max-age=0"));
            res.set_header(Header::new("Pragma", "no-cache"));
        }
    }
}

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Assemble the application around an already constructed `Site`.
pub fn build(site: Site) -> Rocket<Build> {
    rocket::build()
        .manage(site)
        .attach(Template::fairing())
        .attach(NoCacheSettings)
        .mount("/static", FileServer::from("website/static"))
        .mount("/", routes::public::routes())
        .mount("/", routes::settings::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    // Boot check: create directories, validate critical files
    boot::run();

    let figment = rocket::Config::figment();
    let config: AppConfig = figment.extract().unwrap_or_else(|e| {
        log::warn!("Invalid application config, using defaults: {}", e);
        AppConfig::default()
    });

    let local = SqliteStore::open(&config.db_path).expect("Failed to open local store");
    let source = config.profile_source();
    log::info!("Canonical profile: {}", source.describe());

    let site = Site {
        local: Box::new(local),
        source,
        profile_path: PathBuf::from(&config.profile_path),
    };

    build(site)
}
