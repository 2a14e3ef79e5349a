//! Content collection domain models.
//!
//! One document per content domain, mirroring the persisted layout:
//! `{ <collectionField>: <array or scalar>, lastUpdated: ISO-8601 }`.
//! Items carry a unique key within their collection (lower-cased name or id);
//! uniqueness is enforced by the mutation handlers before any add or rename.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Bubble size bounds, enforced on every write.
pub const BUBBLE_MIN_SIZE: f64 = 40.0;
pub const BUBBLE_MAX_SIZE: f64 = 120.0;

/// Bubble position bounds (percent of the contact canvas).
pub const BUBBLE_MIN_POS: f64 = 0.0;
pub const BUBBLE_MAX_POS: f64 = 100.0;

/// The five content domains, each persisted under its own document key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionKey {
    HomepageData,
    DocumentsData,
    ProjectsData,
    AboutData,
    ContactsData,
}

impl CollectionKey {
    /// All keys, in page order.
    pub const ALL: [CollectionKey; 5] = [
        CollectionKey::HomepageData,
        CollectionKey::DocumentsData,
        CollectionKey::ProjectsData,
        CollectionKey::AboutData,
        CollectionKey::ContactsData,
    ];

    /// The document key as stored remotely (also the file stem on disk).
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::HomepageData => "homepage-data",
            CollectionKey::DocumentsData => "documents-data",
            CollectionKey::ProjectsData => "projects-data",
            CollectionKey::AboutData => "about-data",
            CollectionKey::ContactsData => "contacts-data",
        }
    }
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A social link shown on the homepage. Key: lower-cased name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Document media type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentType {
    Video,
    Image,
    Pdf,
    Text,
    Ppt,
}

/// A document gallery item. Key: lower-cased name.
///
/// `preview_url` is derived deterministically from `url` and is always
/// recomputed on write, never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub url: String,
    pub preview_url: String,
    pub description: String,
    /// ISO `YYYY-MM-DD`; preserved across edits.
    pub date_added: String,
}

/// Project category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProjectType {
    Web,
    Mobile,
    Desktop,
    Ai,
    Blockchain,
}

/// A project gallery item. Key: lower-cased name.
///
/// Invariant: at least one of `repo_url` / `live_url` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    pub description: String,
    pub date_added: String,
}

/// A floating contact bubble. Key: id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBubble {
    pub id: String,
    pub url: String,
    /// Diameter in px, clamped to `[40, 120]`.
    pub size: f64,
    /// Hex color (`#rgb` or `#rrggbb`).
    pub color: String,
    /// Position in percent of the canvas, clamped to `[0, 100]`.
    pub x: f64,
    pub y: f64,
}

impl ContactBubble {
    /// Clamps size and position into their legal ranges.
    pub fn clamp(&mut self) {
        self.size = self.size.clamp(BUBBLE_MIN_SIZE, BUBBLE_MAX_SIZE);
        self.x = self.x.clamp(BUBBLE_MIN_POS, BUBBLE_MAX_POS);
        self.y = self.y.clamp(BUBBLE_MIN_POS, BUBBLE_MAX_POS);
    }
}

/// About-page repository settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSettings {
    pub owner: String,
    pub name: String,
}

/// Homepage collection: social links plus author scalars.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageData {
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub author_description: String,
    #[serde(default)]
    pub author_skills: Vec<String>,
    #[serde(default)]
    pub last_updated: String,
}

impl HomepageData {
    /// Case-insensitive lookup by link name.
    pub fn find_link(&self, name: &str) -> Option<&SocialLink> {
        let needle = name.to_lowercase();
        self.social_links
            .iter()
            .find(|l| l.name.to_lowercase() == needle)
    }

    /// Case-insensitive skill membership check.
    pub fn has_skill(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.author_skills
            .iter()
            .any(|s| s.to_lowercase() == needle)
    }
}

/// Documents collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsData {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub last_updated: String,
}

impl DocumentsData {
    /// Case-insensitive lookup by document name.
    pub fn find_document(&self, name: &str) -> Option<&Document> {
        let needle = name.to_lowercase();
        self.documents
            .iter()
            .find(|d| d.name.to_lowercase() == needle)
    }
}

/// Projects collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsData {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub last_updated: String,
}

impl ProjectsData {
    /// Case-insensitive lookup by project name.
    pub fn find_project(&self, name: &str) -> Option<&Project> {
        let needle = name.to_lowercase();
        self.projects
            .iter()
            .find(|p| p.name.to_lowercase() == needle)
    }
}

/// About collection: free-form scalars only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutData {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub repo: RepoSettings,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub last_updated: String,
}

/// Contacts collection: bubbles plus a description scalar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsData {
    #[serde(default)]
    pub bubbles: Vec<ContactBubble>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub last_updated: String,
}

impl ContactsData {
    pub fn find_bubble(&self, id: &str) -> Option<&ContactBubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }
}

/// The full value of one collection key, as stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentValue {
    Homepage(HomepageData),
    Documents(DocumentsData),
    Projects(ProjectsData),
    About(AboutData),
    Contacts(ContactsData),
}

impl ContentValue {
    /// The key this value is stored under.
    pub fn key(&self) -> CollectionKey {
        match self {
            ContentValue::Homepage(_) => CollectionKey::HomepageData,
            ContentValue::Documents(_) => CollectionKey::DocumentsData,
            ContentValue::Projects(_) => CollectionKey::ProjectsData,
            ContentValue::About(_) => CollectionKey::AboutData,
            ContentValue::Contacts(_) => CollectionKey::ContactsData,
        }
    }

    /// The documented default snapshot for a key, used when the store finds
    /// no existing value on first load.
    pub fn default_for(key: CollectionKey) -> Self {
        match key {
            CollectionKey::HomepageData => ContentValue::Homepage(HomepageData::default()),
            CollectionKey::DocumentsData => ContentValue::Documents(DocumentsData::default()),
            CollectionKey::ProjectsData => ContentValue::Projects(ProjectsData::default()),
            CollectionKey::AboutData => ContentValue::About(AboutData::default()),
            CollectionKey::ContactsData => ContentValue::Contacts(ContactsData::default()),
        }
    }

    /// Deserializes a snapshot for a known key.
    pub fn from_json(key: CollectionKey, raw: &str) -> crate::error::Result<Self> {
        let value = match key {
            CollectionKey::HomepageData => ContentValue::Homepage(serde_json::from_str(raw)?),
            CollectionKey::DocumentsData => ContentValue::Documents(serde_json::from_str(raw)?),
            CollectionKey::ProjectsData => ContentValue::Projects(serde_json::from_str(raw)?),
            CollectionKey::AboutData => ContentValue::About(serde_json::from_str(raw)?),
            CollectionKey::ContactsData => ContentValue::Contacts(serde_json::from_str(raw)?),
        };
        Ok(value)
    }

    /// Stamps the `lastUpdated` field with an ISO-8601 timestamp.
    pub fn touch(&mut self, timestamp: impl Into<String>) {
        let ts = timestamp.into();
        match self {
            ContentValue::Homepage(d) => d.last_updated = ts,
            ContentValue::Documents(d) => d.last_updated = ts,
            ContentValue::Projects(d) => d.last_updated = ts,
            ContentValue::About(d) => d.last_updated = ts,
            ContentValue::Contacts(d) => d.last_updated = ts,
        }
    }
}
