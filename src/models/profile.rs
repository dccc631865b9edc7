use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Destination placeholder meaning "no link".
pub const NO_DESTINATION: &str = "#";

pub const DEFAULT_NAME: &str = "Your Name";
pub const DEFAULT_BIO: &str = "Your bio or tagline goes here. Keep it short and impactful.";
pub const DEFAULT_LOCATION: &str = "Location";
pub const DEFAULT_PROJECT_ICON: &str = "🚀";
pub const DEFAULT_PROJECT_TITLE: &str = "Untitled Project";

/// The profile record shared by the public page and the editor.
///
/// Every field is optional and parsing never rejects a well-formed JSON
/// value: off-shape fields read as absent, unusable list items are skipped.
/// Keys this type does not know about are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<IconEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entry of the icon row. Older documents store a bare image URL,
/// newer ones an object with the image and its destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IconEntry {
    Url(String),
    Linked {
        image: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

/// Normalized icon: both legacy and linked entries end up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub image: String,
    pub url: String,
}

impl IconEntry {
    pub fn normalize(&self) -> Icon {
        match self {
            IconEntry::Url(image) => Icon {
                image: image.clone(),
                url: NO_DESTINATION.to_string(),
            },
            IconEntry::Linked { image, url } => Icon {
                image: image.clone(),
                url: url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .unwrap_or(NO_DESTINATION)
                    .to_string(),
            },
        }
    }

    /// `None` for entries with no usable image.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(image) => Some(IconEntry::Url(image.clone())),
            Value::Object(obj) => Some(IconEntry::Linked {
                image: text(obj.get("image"))?,
                url: text(obj.get("url")),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub label: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Link {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Link {
            label: text(obj.get("label")).unwrap_or_default(),
            url: text(obj.get("url")).unwrap_or_else(|| NO_DESTINATION.to_string()),
            image_url: text(obj.get("imageUrl")),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

impl Project {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Project {
            icon: text(obj.get("icon")).unwrap_or_else(|| DEFAULT_PROJECT_ICON.to_string()),
            title: text(obj.get("title")).unwrap_or_default(),
            description: text(obj.get("description")).unwrap_or_default(),
            url: text(obj.get("url")).unwrap_or_else(|| NO_DESTINATION.to_string()),
        })
    }
}

/// Scalars read as text; `null`, arrays and objects read as absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A list of items; items `item` cannot read are dropped.
fn list<T>(value: Option<&Value>, item: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    match value? {
        Value::Array(items) => Some(items.iter().filter_map(item).collect()),
        _ => None,
    }
}

/// `Some` only when the value has visible content.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// `Some` for any non-empty value, whitespace included.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Shallow merge of raw documents: every key present in `overrides`,
/// `null` included, replaces the one in `base`. Lists are replaced whole.
/// A non-object on either side counts as an empty object.
pub fn merge_raw(base: Value, overrides: Value) -> Value {
    let mut merged = match base {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Value::Object(overrides) = overrides {
        merged.extend(overrides);
    }
    Value::Object(merged)
}

impl ProfileDocument {
    /// Type a raw document. A non-object value yields the empty document.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut obj) = value else {
            return ProfileDocument::default();
        };

        const KNOWN: [&str; 9] = [
            "name", "bio", "location", "avatar", "audioUrl", "accentColor", "icons", "links",
            "projects",
        ];
        let doc = ProfileDocument {
            name: text(obj.get("name")),
            bio: text(obj.get("bio")),
            location: text(obj.get("location")),
            avatar: text(obj.get("avatar")),
            audio_url: text(obj.get("audioUrl")),
            accent_color: text(obj.get("accentColor")),
            icons: list(obj.get("icons"), IconEntry::from_value),
            links: list(obj.get("links"), Link::from_value),
            projects: list(obj.get("projects"), Project::from_value),
            extra: Map::new(),
        };
        for key in KNOWN {
            obj.remove(key);
        }
        ProfileDocument { extra: obj, ..doc }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Normalized icon row; empty when the document has none.
    pub fn icon_row(&self) -> Vec<Icon> {
        self.icons
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(IconEntry::normalize)
            .collect()
    }
}

impl<'de> Deserialize<'de> for ProfileDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ProfileDocument::from_value)
    }
}
