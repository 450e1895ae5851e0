//! Entity resolution against the authority table.
//!
//! A controlled-access cell holds descriptors joined by `|`. Each descriptor
//! is up to three `>`-joined fields: name, role, variant label. Splitting is
//! positional. An empty or missing role or variant is not allocated and the
//! matching attribute is left off the node entirely.

use gather_model::{
    AUTHORITY_SOURCE, Element, EntityCategory, LookupTable, ResolvedEntity, Row,
};
use tracing::warn;

use crate::extract::content;
use crate::session::SheetSession;

const DESCRIPTOR_SEPARATOR: char = '|';
const FIELD_SEPARATOR: char = '>';

/// One parsed descriptor before lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor<'a> {
    pub name: &'a str,
    pub role: Option<&'a str>,
    pub variant: Option<&'a str>,
}

/// Parse a controlled-access cell into descriptors.
///
/// Descriptors with a blank name (for example the gap in `a||b`) are
/// skipped rather than producing an unnamed heading.
pub fn parse_descriptors(raw: &str) -> Vec<Descriptor<'_>> {
    raw.split(DESCRIPTOR_SEPARATOR)
        .filter_map(parse_descriptor)
        .collect()
}

fn parse_descriptor(raw: &str) -> Option<Descriptor<'_>> {
    let mut fields = raw.split(FIELD_SEPARATOR);
    let name = fields.next()?;
    if name.trim().is_empty() {
        return None;
    }
    let role = fields.next().filter(|role| !role.is_empty());
    let variant = fields.next().filter(|variant| !variant.is_empty());
    Some(Descriptor {
        name,
        role,
        variant,
    })
}

/// Look a descriptor up in the authority table.
pub fn resolve_descriptor(descriptor: &Descriptor<'_>, table: &LookupTable) -> ResolvedEntity {
    ResolvedEntity {
        subject: descriptor.name.to_string(),
        role: descriptor.role.map(str::to_string),
        variant: descriptor.variant.map(str::to_string),
        lookup_id: table.find(descriptor.name),
    }
}

/// Resolve every descriptor of a raw cell, in cell order.
pub fn resolve_all(raw: &str, table: &LookupTable) -> Vec<ResolvedEntity> {
    parse_descriptors(raw)
        .iter()
        .map(|descriptor| resolve_descriptor(descriptor, table))
        .collect()
}

/// Render a resolved entity as its category's element.
pub fn entity_element(
    entity: &ResolvedEntity,
    category: EntityCategory,
    token: Option<(&'static str, String)>,
) -> Element {
    Element::new(category.tag())
        .with_text(entity.subject.as_str())
        .with_attr("authfilenumber", entity.lookup_id.as_str())
        .with_attrs(entity.role.as_deref().map(|role| ("role", role)))
        .with_attr("source", AUTHORITY_SOURCE)
        .with_attrs(entity.variant.as_deref().map(|variant| ("altrender", variant)))
        .with_attrs(token)
}

/// Nodes for one controlled-access column, plus the entities behind them.
#[derive(Debug, Clone, Default)]
pub struct ResolvedColumn {
    pub nodes: Vec<Element>,
    pub entities: Vec<ResolvedEntity>,
}

impl ResolvedColumn {
    pub fn unresolved(&self) -> impl Iterator<Item = &ResolvedEntity> {
        self.entities
            .iter()
            .filter(|entity| !entity.lookup_id.is_found())
    }
}

/// Resolve the controlled-access cell at `column` into `category` nodes.
///
/// Each node gets a token minted after its lookup. Misses carry the
/// `not_found` sentinel and are logged for review.
pub fn resolve_column(
    session: &mut SheetSession,
    row: &Row,
    column: usize,
    category: EntityCategory,
    table: &LookupTable,
) -> ResolvedColumn {
    let raw = content(row, column);
    let mut resolved = ResolvedColumn::default();
    for descriptor in parse_descriptors(&raw) {
        let entity = resolve_descriptor(&descriptor, table);
        if !entity.lookup_id.is_found() {
            warn!(
                category = %category,
                column,
                entity = %entity.subject,
                record = %session.scope_key(),
                "authority not found"
            );
        }
        let token = session.token_attr(row, column);
        resolved
            .nodes
            .push(entity_element(&entity, category, token));
        resolved.entities.push(entity);
    }
    resolved
}
