//! Controlled-access entity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel for a descriptor field that was left out.
pub const NOT_ALLOCATED: &str = "not_allocated";

/// Sentinel written in place of an identifier when the lookup misses.
pub const NOT_FOUND: &str = "not_found";

/// Provenance marker attached to every authority-controlled node.
pub const AUTHORITY_SOURCE: &str = "IAMS";

/// Schema category of a controlled-access heading.
///
/// The category comes from the column a descriptor was read from, never from
/// the entity itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Person,
    Family,
    CorporateBody,
    Place,
    Subject,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 5] = [
        Self::Person,
        Self::Family,
        Self::CorporateBody,
        Self::Place,
        Self::Subject,
    ];

    /// Element name used in the output document.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Person => "persname",
            Self::Family => "famname",
            Self::CorporateBody => "corpname",
            Self::Place => "geogname",
            Self::Subject => "subject",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Family => "Family",
            Self::CorporateBody => "Corporate body",
            Self::Place => "Place",
            Self::Subject => "Subject",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of looking an entity name up in the authority table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupId {
    Found(String),
    NotFound,
}

impl LookupId {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Found(id) => id,
            Self::NotFound => NOT_FOUND,
        }
    }
}

impl fmt::Display for LookupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed descriptor joined with its authority identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntity {
    pub subject: String,
    /// `None` when the descriptor did not allocate a role.
    pub role: Option<String>,
    /// `None` when the descriptor did not allocate a variant label.
    pub variant: Option<String>,
    pub lookup_id: LookupId,
}

impl ResolvedEntity {
    pub fn role_or_sentinel(&self) -> &str {
        self.role.as_deref().unwrap_or(NOT_ALLOCATED)
    }

    pub fn variant_or_sentinel(&self) -> &str {
        self.variant.as_deref().unwrap_or(NOT_ALLOCATED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_map_to_schema_tags() {
        let tags: Vec<&str> = EntityCategory::ALL.iter().map(|c| c.tag()).collect();
        assert_eq!(
            tags,
            vec!["persname", "famname", "corpname", "geogname", "subject"]
        );
    }

    #[test]
    fn missing_lookup_renders_sentinel() {
        assert_eq!(LookupId::NotFound.to_string(), "not_found");
        assert_eq!(LookupId::Found("A123".into()).as_str(), "A123");
    }

    #[test]
    fn unallocated_fields_render_sentinel() {
        let entity = ResolvedEntity {
            subject: "Jane Doe".into(),
            role: None,
            variant: Some("alt".into()),
            lookup_id: LookupId::NotFound,
        };
        assert_eq!(entity.role_or_sentinel(), "not_allocated");
        assert_eq!(entity.variant_or_sentinel(), "alt");
    }

    #[test]
    fn category_deserializes_from_snake_case() {
        let category: EntityCategory = serde_json::from_str("\"corporate_body\"").unwrap();
        assert_eq!(category, EntityCategory::CorporateBody);
    }
}
