use rocket::http::CookieJar;
use rocket::response::content::{RawHtml, RawJson};
use rocket::State;

use crate::audio::AudioVolume;
use crate::render::{self, HtmlPage};
use crate::site::Site;
use crate::store::CookieStore;

// ── Profile page ───────────────────────────────────────

#[get("/")]
pub async fn profile_page(site: &State<Site>, cookies: &CookieJar<'_>) -> RawHtml<String> {
    let doc = site.loader().resolve().await;
    let volume = AudioVolume::load(&CookieStore::persistent(cookies));

    let mut page = HtmlPage::new();
    render::render_profile(&doc, volume, &mut page);
    RawHtml(page.into_html())
}

// ── Canonical document ─────────────────────────────────

/// Served verbatim; shape is not checked here.
#[get("/profile.json")]
pub async fn profile_json(site: &State<Site>) -> Option<RawJson<String>> {
    rocket::tokio::fs::read_to_string(&site.profile_path)
        .await
        .ok()
        .map(RawJson)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![profile_page, profile_json]
}
