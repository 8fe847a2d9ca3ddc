//! Field catalog
//!
//! Built-in organization attributes are addressed by their plain name. Custom
//! fields live under the `organization_fields` namespace and are addressed as
//! `organization_fields.<key>`.

/// Namespace prefix for custom organization fields
pub const CUSTOM_FIELD_PREFIX: &str = "organization_fields.";

/// One selectable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    /// Short identifier
    pub id: &'static str,
    /// Field path as sent to the payload builder
    pub path: &'static str,
    /// Label shown to the operator
    pub label: &'static str,
}

impl FieldOption {
    const fn new(id: &'static str, path: &'static str, label: &'static str) -> Self {
        Self { id, path, label }
    }

    pub fn is_custom(&self) -> bool {
        is_custom(self.path)
    }
}

/// Every field the operator can pick
pub const FIELD_OPTIONS: &[FieldOption] = &[
    FieldOption::new("name", "name", "Name"),
    FieldOption::new(
        "domain_names",
        "domain_names",
        "Domain Names (comma separated)",
    ),
    FieldOption::new("details", "details", "Details"),
    FieldOption::new("notes", "notes", "Notes"),
    FieldOption::new(
        "shared_tickets",
        "shared_tickets",
        "Shared Tickets (true/false)",
    ),
    FieldOption::new(
        "shared_comments",
        "shared_comments",
        "Shared Comments (true/false)",
    ),
    FieldOption::new("tags", "tags", "Tags (comma separated)"),
    FieldOption::new("external_id", "external_id", "External ID"),
    FieldOption::new(
        "department",
        "organization_fields.department",
        "Custom: Department",
    ),
    FieldOption::new("market", "organization_fields.market", "Custom: Market"),
    FieldOption::new("region", "organization_fields.region", "Custom: Region"),
    FieldOption::new(
        "account_type",
        "organization_fields.account_type",
        "Custom: Account Type",
    ),
    FieldOption::new(
        "customer_since",
        "organization_fields.customer_since",
        "Custom: Customer Since",
    ),
    FieldOption::new(
        "priority",
        "organization_fields.priority",
        "Custom: Priority",
    ),
];

/// Whether a field path addresses a custom field
pub fn is_custom(path: &str) -> bool {
    path.starts_with(CUSTOM_FIELD_PREFIX)
}

/// Key of a custom field inside `organization_fields`
pub fn custom_key(path: &str) -> Option<&str> {
    path.strip_prefix(CUSTOM_FIELD_PREFIX)
}

/// Look up a field by path or short identifier
pub fn find(name: &str) -> Option<&'static FieldOption> {
    FIELD_OPTIONS
        .iter()
        .find(|option| option.path == name)
        .or_else(|| FIELD_OPTIONS.iter().find(|option| option.id == name))
}

/// Whether a path has the shape the catalog uses: `name` or `organization_fields.<key>`
pub fn is_well_formed(path: &str) -> bool {
    match custom_key(path) {
        Some(key) => !key.is_empty() && !key.contains('.'),
        None => !path.is_empty() && !path.contains('.'),
    }
}
