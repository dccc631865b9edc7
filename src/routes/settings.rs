use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::State;
use rocket_dyn_templates::Template;
use serde_json::{json, Value};

use crate::auth::{AccessGate, GateOutcome, SettingsUser};
use crate::editor::{self, FormState, SaveError, SaveReceipt, Section, UrlIssue};
use crate::render::html_escape;
use crate::site::Site;
use crate::store::CookieStore;

const SETTINGS: &str = "/settings";

#[derive(Debug, FromForm)]
pub struct LoginForm {
    pub password: String,
}

#[derive(Debug, FromForm)]
pub struct PasswordForm {
    pub password: String,
}

/// Template context for the editor. Each row carries per-field flags so
/// the template can mark the inputs that failed URL validation.
fn editor_context(
    form: &FormState,
    issues: &[UrlIssue],
    receipt: Option<&SaveReceipt>,
    error: Option<String>,
    flash: Option<(String, String)>,
) -> Value {
    let invalid = |section: Section, row: usize, field: &str| {
        issues
            .iter()
            .any(|i| i.section == section && i.row == row && i.field == field)
    };

    let links: Vec<Value> = form
        .links
        .iter()
        .enumerate()
        .map(|(i, r)| {
            json!({
                "image_url": r.image_url,
                "label": r.label,
                "url": r.url,
                "invalid": {
                    "image_url": invalid(Section::Links, i, "image_url"),
                    "label": invalid(Section::Links, i, "label"),
                    "url": invalid(Section::Links, i, "url"),
                },
            })
        })
        .collect();

    let projects: Vec<Value> = form
        .projects
        .iter()
        .enumerate()
        .map(|(i, r)| {
            json!({
                "icon": r.icon,
                "title": r.title,
                "description": r.description,
                "url": r.url,
                "invalid": {
                    "icon": invalid(Section::Projects, i, "icon"),
                    "title": invalid(Section::Projects, i, "title"),
                    "description": invalid(Section::Projects, i, "description"),
                    "url": invalid(Section::Projects, i, "url"),
                },
            })
        })
        .collect();

    let receipt = receipt.map(|r| {
        json!({
            "json_html": html_escape(&r.pretty_json),
            "saved_at": r.saved_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        })
    });

    let (flash_kind, flash_msg) = match flash {
        Some((kind, msg)) => (Some(kind), Some(msg)),
        None => (None, None),
    };

    json!({
        "form": form,
        "links": links,
        "projects": projects,
        "error": error,
        "receipt": receipt,
        "flash_kind": flash_kind,
        "flash_msg": flash_msg,
    })
}

fn login_template(error: Option<String>) -> Template {
    Template::render("settings/login", json!({ "error": error }))
}

// ── Gate ───────────────────────────────────────────────

#[get("/settings")]
pub async fn editor_page(
    _user: SettingsUser,
    site: &State<Site>,
    flash: Option<FlashMessage<'_>>,
) -> Template {
    let flash = flash.map(|f| (f.kind().to_string(), f.message().to_string()));
    let doc = site.settings_store().resolve().await;
    let form = editor::populate(&doc);
    Template::render("settings/editor", editor_context(&form, &[], None, None, flash))
}

#[get("/settings", rank = 2)]
pub fn login_page() -> Template {
    login_template(None)
}

#[post("/settings/login", data = "<form>")]
pub fn login_submit(
    form: Form<LoginForm>,
    site: &State<Site>,
    cookies: &CookieJar<'_>,
) -> Result<Redirect, Template> {
    let session = CookieStore::session(cookies);
    let gate = AccessGate::new(site.local.as_ref(), &session);

    match gate.attempt(&form.password) {
        GateOutcome::Authenticated => Ok(Redirect::to(SETTINGS)),
        GateOutcome::Rejected(reason) => Err(login_template(Some(reason.to_string()))),
    }
}

#[post("/settings/logout")]
pub fn logout(site: &State<Site>, cookies: &CookieJar<'_>) -> Redirect {
    let session = CookieStore::session(cookies);
    let gate = AccessGate::new(site.local.as_ref(), &session);
    if let Err(e) = gate.close() {
        log::warn!("Could not clear settings session: {}", e);
    }
    Redirect::to(SETTINGS)
}

// ── Editor ─────────────────────────────────────────────

#[post("/settings", data = "<form>")]
pub fn save(_user: SettingsUser, site: &State<Site>, form: Form<FormState>) -> Template {
    let form = form.into_inner();

    let context = match editor::save(&form, site.local.as_ref()) {
        Ok(receipt) => editor_context(&form, &[], Some(&receipt), None, None),
        Err(e) => {
            let message = e.to_string();
            match e {
                SaveError::InvalidUrls(issues) => {
                    editor_context(&form, &issues, None, Some(message), None)
                }
                SaveError::Storage(_) => {
                    log::error!("{}", message);
                    editor_context(&form, &[], None, Some(message), None)
                }
            }
        }
    };

    Template::render("settings/editor", context)
}

#[post("/settings/password", data = "<form>")]
pub fn change_password(
    _user: SettingsUser,
    site: &State<Site>,
    cookies: &CookieJar<'_>,
    form: Form<PasswordForm>,
) -> Flash<Redirect> {
    let session = CookieStore::session(cookies);
    let gate = AccessGate::new(site.local.as_ref(), &session);

    match gate.change_secret(&form.password) {
        Ok(()) => Flash::success(Redirect::to(SETTINGS), "Password updated."),
        Err(e) => Flash::error(Redirect::to(SETTINGS), e),
    }
}

/// Editor posts without a session land back on the gate.
#[post("/settings", rank = 2)]
pub fn save_unauthorized() -> Redirect {
    Redirect::to(SETTINGS)
}

#[post("/settings/password", rank = 2)]
pub fn change_password_unauthorized() -> Redirect {
    Redirect::to(SETTINGS)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        editor_page,
        login_page,
        login_submit,
        logout,
        save,
        change_password,
        save_unauthorized,
        change_password_unauthorized,
    ]
}
