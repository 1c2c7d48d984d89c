//! Field and action catalogs.
//!
//! The host page wires its own form to the widget by naming convention:
//! every domain field the remote API understands has a well-known DOM
//! element id (`kyc-hydrate-*`), and every UI action (`verify`, `close`)
//! has one too. Hosts whose markup cannot follow the convention override
//! individual ids through [`FieldCatalog::override_dom_id`] /
//! [`ActionCatalog::override_dom_id`].
//!
//! The semantic name and the remote API key of an entry are identity and
//! never change; only the DOM locator is mutable. Lookups resolve lazily
//! at use-time, so an override applied after `mount()` still takes
//! effect on the next verify attempt.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error type for catalog override operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The semantic field name does not exist in the catalog.
    #[error("field name '{0}' not found")]
    UnknownField(String),

    /// The action name does not exist in the catalog.
    #[error("action name '{0}' not found")]
    UnknownAction(String),

    /// An override was attempted with an empty DOM id.
    #[error("a non-empty DOM id is required")]
    EmptyId,
}

// ── Field catalog ─────────────────────────────────────────────────────────────

/// One entry of the field catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Semantic name the host uses in override calls (e.g. `"motherName"`).
    pub name: &'static str,
    /// Key the remote API expects for this field (e.g. `"nome_mae"`).
    pub api_key: &'static str,
    /// DOM element id the value is read from. Overridable.
    pub dom_id: String,
}

/// The ordered catalog mapping domain fields to DOM lookup ids.
///
/// Lifetime is the widget instance; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldCatalog {
    /// Builds the default catalog with conventional `kyc-hydrate-*` ids.
    pub fn new() -> Self {
        // (semantic name, remote API key, default DOM id)
        const TABLE: &[(&str, &str, &str)] = &[
            ("cpf", "cpf", "kyc-hydrate-cpf"),
            ("name", "nome", "kyc-hydrate-name"),
            ("motherName", "nome_mae", "kyc-hydrate-motherName"),
            ("email", "email", "kyc-hydrate-email"),
            ("phone", "celular", "kyc-hydrate-phone"),
            ("birthdate", "data_nascimento", "kyc-hydrate-birthdate"),
            ("age", "idade", "kyc-hydrate-age"),
            ("gender", "genero", "kyc-hydrate-gender"),
            ("nationality", "nacionalidade", "kyc-hydrate-nationality"),
            ("sign", "signo", "kyc-hydrate-sign"),
            // Location
            ("zipCode", "cep", "kyc-hydrate-zipCode"),
            ("address", "endereco", "kyc-hydrate-address"),
            ("addressNumber", "endereco_nro", "kyc-hydrate-addressNumber"),
            ("neighborhood", "bairro", "kyc-hydrate-neighborhood"),
            ("complement", "complemento", "kyc-hydrate-complement"),
            ("city", "cidade", "kyc-hydrate-city"),
            ("state", "estado", "kyc-hydrate-state"),
            // Others
            ("referenceId", "ref_id", "kyc-ref-id"),
        ];

        Self {
            fields: TABLE
                .iter()
                .map(|(name, api_key, dom_id)| FieldDescriptor {
                    name,
                    api_key,
                    dom_id: (*dom_id).to_string(),
                })
                .collect(),
        }
    }

    /// Resolves the current DOM id for a semantic field name.
    pub fn dom_id(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.dom_id.as_str())
    }

    /// Replaces the DOM id of the named field.
    ///
    /// # Errors
    ///
    /// [`CatalogError::EmptyId`] for an empty replacement id and
    /// [`CatalogError::UnknownField`] when no entry has that semantic name.
    pub fn override_dom_id(&mut self, name: &str, dom_id: &str) -> Result<(), CatalogError> {
        if dom_id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| CatalogError::UnknownField(name.to_string()))?;
        field.dom_id = dom_id.to_string();
        Ok(())
    }

    /// Iterates the catalog in its canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }
}

// ── Action catalog ────────────────────────────────────────────────────────────

/// The named UI actions the widget binds to host-page elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionName {
    /// Read the CPF field and start a verification session.
    Verify,
    /// Dismiss the overlay.
    Close,
}

impl ActionName {
    /// The conventional name used in override calls and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionName::Verify => "verify",
            ActionName::Close => "close",
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionName {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verify" => Ok(ActionName::Verify),
            "close" => Ok(ActionName::Close),
            other => Err(CatalogError::UnknownAction(other.to_string())),
        }
    }
}

/// One entry of the action catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    /// Which action this element triggers.
    pub name: ActionName,
    /// DOM element id the action binds to. Overridable.
    pub dom_id: String,
}

/// Catalog of the two UI actions, same override pattern as the fields.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    actions: Vec<ActionDescriptor>,
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionCatalog {
    /// Builds the default catalog with conventional `kyc-action-*` ids.
    pub fn new() -> Self {
        Self {
            actions: vec![
                ActionDescriptor {
                    name: ActionName::Verify,
                    dom_id: "kyc-action-verify".to_string(),
                },
                ActionDescriptor {
                    name: ActionName::Close,
                    dom_id: "kyc-action-close".to_string(),
                },
            ],
        }
    }

    /// Resolves the current DOM id for an action.
    pub fn dom_id(&self, name: ActionName) -> &str {
        // Both actions always exist; the catalog is never emptied.
        self.actions
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.dom_id.as_str())
            .unwrap_or_default()
    }

    /// Replaces the DOM id of the named action.
    ///
    /// # Errors
    ///
    /// [`CatalogError::EmptyId`] for an empty replacement id and
    /// [`CatalogError::UnknownAction`] when the name is not `verify` or
    /// `close`.
    pub fn override_dom_id(&mut self, name: &str, dom_id: &str) -> Result<(), CatalogError> {
        if dom_id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        let parsed: ActionName = name.parse()?;
        if let Some(action) = self.actions.iter_mut().find(|a| a.name == parsed) {
            action.dom_id = dom_id.to_string();
        }
        Ok(())
    }

    /// Iterates the catalog in its canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &ActionDescriptor> {
        self.actions.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_catalog_has_all_known_fields() {
        let catalog = FieldCatalog::new();
        assert_eq!(catalog.iter().count(), 18);
        assert_eq!(catalog.dom_id("cpf"), Some("kyc-hydrate-cpf"));
        assert_eq!(catalog.dom_id("referenceId"), Some("kyc-ref-id"));
        assert_eq!(catalog.dom_id("motherName"), Some("kyc-hydrate-motherName"));
    }

    #[test]
    fn test_field_lookup_unknown_name_is_none() {
        let catalog = FieldCatalog::new();
        assert_eq!(catalog.dom_id("passport"), None);
    }

    #[test]
    fn test_field_override_changes_lookup() {
        let mut catalog = FieldCatalog::new();
        catalog.override_dom_id("cpf", "my-cpf-input").unwrap();
        assert_eq!(catalog.dom_id("cpf"), Some("my-cpf-input"));
        // Identity keys are untouched.
        let entry = catalog.iter().find(|f| f.name == "cpf").unwrap();
        assert_eq!(entry.api_key, "cpf");
    }

    #[test]
    fn test_field_override_unknown_name_fails() {
        let mut catalog = FieldCatalog::new();
        let err = catalog.override_dom_id("passport", "x").unwrap_err();
        assert_eq!(err, CatalogError::UnknownField("passport".to_string()));
    }

    #[test]
    fn test_field_override_empty_id_fails() {
        let mut catalog = FieldCatalog::new();
        assert_eq!(catalog.override_dom_id("cpf", "  "), Err(CatalogError::EmptyId));
        // Lookup unchanged after the failed override.
        assert_eq!(catalog.dom_id("cpf"), Some("kyc-hydrate-cpf"));
    }

    #[test]
    fn test_api_keys_match_remote_contract() {
        let catalog = FieldCatalog::new();
        let keys: Vec<&str> = catalog.iter().map(|f| f.api_key).collect();
        assert!(keys.contains(&"nome_mae"));
        assert!(keys.contains(&"data_nascimento"));
        assert!(keys.contains(&"endereco_nro"));
        assert!(keys.contains(&"ref_id"));
    }

    #[test]
    fn test_action_catalog_defaults() {
        let catalog = ActionCatalog::new();
        assert_eq!(catalog.dom_id(ActionName::Verify), "kyc-action-verify");
        assert_eq!(catalog.dom_id(ActionName::Close), "kyc-action-close");
    }

    #[test]
    fn test_action_override_changes_lookup() {
        let mut catalog = ActionCatalog::new();
        catalog.override_dom_id("verify", "start-kyc-btn").unwrap();
        assert_eq!(catalog.dom_id(ActionName::Verify), "start-kyc-btn");
        assert_eq!(catalog.dom_id(ActionName::Close), "kyc-action-close");
    }

    #[test]
    fn test_action_override_unknown_name_fails() {
        let mut catalog = ActionCatalog::new();
        let err = catalog.override_dom_id("submit", "x").unwrap_err();
        assert_eq!(err, CatalogError::UnknownAction("submit".to_string()));
    }

    #[test]
    fn test_action_name_parses_conventional_names() {
        assert_eq!("verify".parse::<ActionName>().unwrap(), ActionName::Verify);
        assert_eq!("close".parse::<ActionName>().unwrap(), ActionName::Close);
        assert!("open".parse::<ActionName>().is_err());
    }
}
