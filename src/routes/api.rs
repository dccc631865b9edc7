use rocket::http::{CookieJar, Status};
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

use crate::audio::AudioVolume;
use crate::models::profile::ProfileDocument;
use crate::site::Site;
use crate::store::CookieStore;

// ── Profile ────────────────────────────────────────────

/// Same document the public page renders.
#[get("/profile")]
pub async fn profile(site: &State<Site>) -> Json<ProfileDocument> {
    Json(site.loader().resolve().await)
}

// ── Volume ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VolumeUpdate {
    pub volume: i64,
}

#[derive(Debug, Serialize)]
pub struct VolumeResponse {
    pub volume: u8,
}

#[get("/volume")]
pub fn volume_get(cookies: &CookieJar<'_>) -> Json<VolumeResponse> {
    let volume = AudioVolume::load(&CookieStore::persistent(cookies));
    Json(VolumeResponse { volume: volume.percent() })
}

fn store_volume(cookies: &CookieJar<'_>, volume: AudioVolume) -> Result<Json<VolumeResponse>, Status> {
    volume.persist(&CookieStore::persistent(cookies)).map_err(|e| {
        log::error!("Could not persist volume: {}", e);
        Status::InternalServerError
    })?;
    Ok(Json(VolumeResponse { volume: volume.percent() }))
}

/// Out-of-range values are clamped to 0–100. The value is kept per visitor.
#[post("/volume", format = "json", data = "<update>")]
pub fn volume_set(
    cookies: &CookieJar<'_>,
    update: Json<VolumeUpdate>,
) -> Result<Json<VolumeResponse>, Status> {
    store_volume(cookies, AudioVolume::new(update.volume))
}

#[post("/volume/up")]
pub fn volume_up(cookies: &CookieJar<'_>) -> Result<Json<VolumeResponse>, Status> {
    let volume = AudioVolume::load(&CookieStore::persistent(cookies));
    store_volume(cookies, volume.step_up())
}

#[post("/volume/down")]
pub fn volume_down(cookies: &CookieJar<'_>) -> Result<Json<VolumeResponse>, Status> {
    let volume = AudioVolume::load(&CookieStore::persistent(cookies));
    store_volume(cookies, volume.step_down())
}

pub fn routes() -> Vec<rocket::Route> {
    routes![profile, volume_get, volume_set, volume_up, volume_down]
}
