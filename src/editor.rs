use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::models::profile::{
    Link, ProfileDocument, Project, DEFAULT_NAME, DEFAULT_PROJECT_ICON, DEFAULT_PROJECT_TITLE,
    NO_DESTINATION,
};
use crate::store::{KeyValueStore, PROFILE_KEY};
use crate::theme::{is_hex_color, DEFAULT_ACCENT};

const DEFAULT_EDITOR_LOCATION: &str = "📍 Location";
const DEFAULT_PROJECT_DESCRIPTION: &str = "Brief description of your project here.";

/// Editor form controls. Field names match the form inputs, rows are
/// submitted as `links[<n>].label`, `projects[<n>].title` and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm, Serialize)]
pub struct FormState {
    pub name: String,
    pub bio: String,
    pub location: String,
    pub avatar: String,
    pub audio_url: String,
    pub accent_color: String,
    pub links: Vec<LinkRow>,
    pub projects: Vec<ProjectRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm, Serialize)]
pub struct LinkRow {
    pub image_url: String,
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm, Serialize)]
pub struct ProjectRow {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

impl LinkRow {
    fn new(label: &str, url: &str, image_url: &str) -> Self {
        LinkRow {
            image_url: image_url.to_string(),
            label: label.to_string(),
            url: url.to_string(),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 3] {
        [("image_url", &self.image_url), ("label", &self.label), ("url", &self.url)]
    }
}

impl ProjectRow {
    fn new(title: &str, description: &str, icon: &str, url: &str) -> Self {
        ProjectRow {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            url: url.to_string(),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("icon", &self.icon),
            ("title", &self.title),
            ("description", &self.description),
            ("url", &self.url),
        ]
    }
}

fn default_link_rows() -> Vec<LinkRow> {
    vec![
        LinkRow::new("GitHub", "https://github.com/", ""),
        LinkRow::new("Discord", NO_DESTINATION, ""),
        LinkRow::new("Roblox", NO_DESTINATION, ""),
    ]
}

fn default_project_rows() -> Vec<ProjectRow> {
    vec![
        ProjectRow::new("Project One", DEFAULT_PROJECT_DESCRIPTION, "🚀", NO_DESTINATION),
        ProjectRow::new("Project Two", DEFAULT_PROJECT_DESCRIPTION, "💡", NO_DESTINATION),
        ProjectRow::new("Project Three", DEFAULT_PROJECT_DESCRIPTION, "🎨", NO_DESTINATION),
    ]
}

/// Fill the editor from a document. Empty lists get placeholder rows.
pub fn populate(doc: &ProfileDocument) -> FormState {
    let text = |value: &Option<String>, default: &str| -> String {
        match value.as_deref() {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => default.to_string(),
        }
    };

    let links = doc.links.as_deref().unwrap_or_default();
    let links = if links.is_empty() {
        default_link_rows()
    } else {
        links
            .iter()
            .map(|l| LinkRow::new(&l.label, &l.url, l.image_url.as_deref().unwrap_or("")))
            .collect()
    };

    let projects = doc.projects.as_deref().unwrap_or_default();
    let projects = if projects.is_empty() {
        default_project_rows()
    } else {
        projects
            .iter()
            .map(|p| ProjectRow::new(&p.title, &p.description, &p.icon, &p.url))
            .collect()
    };

    FormState {
        name: text(&doc.name, DEFAULT_NAME),
        bio: text(&doc.bio, ""),
        location: text(&doc.location, DEFAULT_EDITOR_LOCATION),
        avatar: text(&doc.avatar, ""),
        audio_url: text(&doc.audio_url, ""),
        accent_color: text(&doc.accent_color, DEFAULT_ACCENT),
        links,
        projects,
    }
}

/// Read the form back into a full document.
///
/// Link rows without a label are dropped; project rows are kept when any
/// field has content.
pub fn collect(form: &FormState) -> ProfileDocument {
    let or = |value: &str, default: &str| -> String {
        if value.is_empty() { default.to_string() } else { value.to_string() }
    };

    let links = form
        .links
        .iter()
        .filter(|row| !row.label.trim().is_empty())
        .map(|row| {
            let image_url = row.image_url.trim();
            Link {
                label: row.label.trim().to_string(),
                url: or(row.url.trim(), NO_DESTINATION),
                image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
            }
        })
        .collect();

    let projects = form
        .projects
        .iter()
        .filter(|row| row.fields().iter().any(|(_, v)| !v.trim().is_empty()))
        .map(|row| Project {
            icon: or(row.icon.trim(), DEFAULT_PROJECT_ICON),
            title: or(row.title.trim(), DEFAULT_PROJECT_TITLE),
            description: row.description.trim().to_string(),
            url: or(row.url.trim(), NO_DESTINATION),
        })
        .collect();

    ProfileDocument {
        name: Some(form.name.trim().to_string()),
        bio: Some(form.bio.trim().to_string()),
        location: Some(form.location.trim().to_string()),
        avatar: Some(form.avatar.trim().to_string()),
        audio_url: Some(form.audio_url.trim().to_string()),
        accent_color: Some(accent_from(&form.accent_color)),
        links: Some(links),
        projects: Some(projects),
        ..Default::default()
    }
}

/// The typed accent is only taken when it is a proper `#RRGGBB`.
fn accent_from(value: &str) -> String {
    let value = value.trim();
    if is_hex_color(value) {
        value.to_string()
    } else {
        DEFAULT_ACCENT.to_string()
    }
}

/// Only absolute http(s) URLs are checked. Empty values, `#`, relative
/// paths, `mailto:` and bare domains all pass.
pub fn validate_url(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value == NO_DESTINATION {
        return true;
    }
    if value.starts_with("http://") || value.starts_with("https://") {
        return url::Url::parse(value).is_ok();
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Links,
    Projects,
}

/// A row input that failed `validate_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlIssue {
    pub section: Section,
    pub row: usize,
    pub field: &'static str,
    pub value: String,
}

/// Every row input is checked, including rows `collect` would drop.
pub fn url_issues(form: &FormState) -> Vec<UrlIssue> {
    let links = form.links.iter().enumerate().flat_map(|(row, r)| {
        r.fields()
            .into_iter()
            .filter(|(_, v)| !validate_url(v))
            .map(move |(field, v)| UrlIssue {
                section: Section::Links,
                row,
                field,
                value: v.trim().to_string(),
            })
            .collect::<Vec<_>>()
    });
    let projects = form.projects.iter().enumerate().flat_map(|(row, r)| {
        r.fields()
            .into_iter()
            .filter(|(_, v)| !validate_url(v))
            .map(move |(field, v)| UrlIssue {
                section: Section::Projects,
                row,
                field,
                value: v.trim().to_string(),
            })
            .collect::<Vec<_>>()
    });
    links.chain(projects).collect()
}

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("Please fix URL errors before saving.")]
    InvalidUrls(Vec<UrlIssue>),
    #[error("Could not store settings: {0}")]
    Storage(String),
}

/// Outcome of a successful save, shown to the user for manual sync.
#[derive(Debug, Clone, Serialize)]
pub struct SaveReceipt {
    pub document: ProfileDocument,
    pub pretty_json: String,
    pub saved_at: DateTime<Utc>,
}

/// Validate, then write the whole document to local persistence.
/// Nothing is written when any URL is invalid.
pub fn save(form: &FormState, local: &dyn KeyValueStore) -> Result<SaveReceipt, SaveError> {
    let issues = url_issues(form);
    if !issues.is_empty() {
        warn!("Settings not saved: {} invalid URL(s)", issues.len());
        return Err(SaveError::InvalidUrls(issues));
    }

    let document = collect(form);
    local
        .set(PROFILE_KEY, &document.to_json())
        .map_err(SaveError::Storage)?;
    info!(
        "Saved profile locally ({} link(s), {} project(s))",
        document.links.as_ref().map_or(0, Vec::len),
        document.projects.as_ref().map_or(0, Vec::len)
    );

    Ok(SaveReceipt {
        pretty_json: document.to_json_pretty(),
        document,
        saved_at: Utc::now(),
    })
}
