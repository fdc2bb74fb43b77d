//! Credential, Category, and VaultPayload types stored in the vault.
//!
//! `VaultPayload` is the exact durable unit: it is what the codec turns
//! into the single secure-store blob and back. Field names serialize in
//! camelCase, matching the blob layout every released version has written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single stored login credential.
///
/// `id` is immutable after creation and `updated_at >= created_at` always;
/// both are enforced by the repository, which assigns them itself and
/// never takes them from callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: Uuid,

    /// Display title (e.g. "Gmail"). Non-empty.
    pub title: String,

    pub username: String,

    /// The secret itself. Opaque to the core — no length or charset rules.
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Owning category, or `None` for "uncategorized".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller-supplied part of a credential.
///
/// Ids and timestamps are deliberately absent: the repository assigns them
/// at add time, so stale or spoofed identity fields cannot sneak in.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub title: String,
    pub username: String,
    pub password: String,
    pub notes: Option<String>,
    pub category_id: Option<Uuid>,
}

/// A user-defined grouping for credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,

    /// Non-empty display name. Uniqueness is not enforced here.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Marks a category from the built-in seed set. Users may still
    /// delete these; the flag only records their origin.
    pub is_system: bool,
}

impl Category {
    pub fn new(name: impl Into<String>, description: Option<String>, is_system: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            created_at: Utc::now(),
            is_system,
        }
    }
}

/// The durable unit: every credential and category, encoded as one blob.
///
/// Credentials keep display order (most-recent-first on add); category
/// order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultPayload {
    #[serde(default)]
    pub credentials: Vec<Credential>,

    #[serde(default)]
    pub categories: Vec<Category>,
}

/// The fixed built-in category set, substituted whenever a load yields no
/// categories (first run, or an upgrade from the legacy format).
pub fn seed_categories() -> Vec<Category> {
    vec![
        Category::new("Personal", Some("Everyday accounts".to_string()), true),
        Category::new("Work", Some("Job and business logins".to_string()), true),
        Category::new("Finance", Some("Banking and payments".to_string()), true),
        Category::new("Social", Some("Social networks and messaging".to_string()), true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_set_is_fixed_and_system_flagged() {
        let seeds = seed_categories();
        let names: Vec<&str> = seeds.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, ["Personal", "Work", "Finance", "Social"]);
        assert!(seeds.iter().all(|c| c.is_system));
    }

    #[test]
    fn seed_ids_are_distinct() {
        let seeds = seed_categories();
        for (i, a) in seeds.iter().enumerate() {
            for b in seeds.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn credential_serializes_with_camel_case_keys() {
        let credential = Credential {
            id: Uuid::new_v4(),
            title: "Gmail".to_string(),
            username: "devin@example.com".to_string(),
            password: "hunter2".to_string(),
            notes: None,
            category_id: Some(Uuid::new_v4()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&credential).unwrap();
        assert!(json.contains("\"categoryId\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        // Absent notes are omitted entirely, not written as null.
        assert!(!json.contains("\"notes\""));
    }
}
