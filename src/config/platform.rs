//! Host platform seed configuration
//!
//! Seeds the in-memory platform the binary runs against: the default role,
//! the role catalog and an initial membership-roles setting.

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::RoleId;
use crate::domain::role_map::NamedRole;

/// Platform configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    /// Role new users get and lapsed members revert to
    #[serde(default = "default_role")]
    pub default_role: String,

    /// Initial membership-roles setting (comma-separated role ids)
    pub membership_roles: Option<String>,

    /// Role catalog (comma-separated `id:Name` pairs)
    pub seed_catalog: Option<String>,
}

impl PlatformConfig {
    pub fn default_role_id(&self) -> Result<RoleId, ValidationError> {
        parse_role(&self.default_role)
    }

    /// Seeded membership roles; `None` leaves the setting unset.
    pub fn membership_roles_list(&self) -> Result<Option<Vec<RoleId>>, ValidationError> {
        self.membership_roles
            .as_deref()
            .map(|raw| split_list(raw).map(parse_role).collect())
            .transpose()
    }

    /// Role catalog entries. Without a seed the catalog holds only the
    /// default role, named after its id.
    pub fn catalog_roles(&self) -> Result<Vec<NamedRole>, ValidationError> {
        let Some(raw) = self.seed_catalog.as_deref() else {
            let id = self.default_role_id()?;
            let name = id.to_string();
            return Ok(vec![NamedRole::new(id, name)]);
        };

        split_list(raw)
            .map(|entry| {
                let (id, name) = entry
                    .split_once(':')
                    .ok_or_else(|| ValidationError::InvalidCatalogEntry(entry.to_string()))?;
                let name = name.trim();
                if name.is_empty() {
                    return Err(ValidationError::InvalidCatalogEntry(entry.to_string()));
                }
                Ok(NamedRole::new(parse_role(id)?, name))
            })
            .collect()
    }

    /// Validate platform configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_role.trim().is_empty() {
            return Err(ValidationError::MissingRequired("platform.default_role"));
        }
        self.default_role_id()?;
        self.membership_roles_list()?;
        self.catalog_roles()?;
        Ok(())
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            membership_roles: None,
            seed_catalog: None,
        }
    }
}

fn default_role() -> String {
    "subscriber".to_string()
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_role(raw: &str) -> Result<RoleId, ValidationError> {
    RoleId::new(raw).map_err(|_| ValidationError::InvalidRoleId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: &str) -> RoleId {
        RoleId::new(id).unwrap()
    }

    #[test]
    fn test_platform_config_defaults() {
        let config = PlatformConfig::default();
        assert_eq!(config.default_role_id().unwrap(), role("subscriber"));
        assert_eq!(config.membership_roles_list().unwrap(), None);
        assert_eq!(
            config.catalog_roles().unwrap(),
            vec![NamedRole::new(role("subscriber"), "subscriber")]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_membership_roles_parsing() {
        let config = PlatformConfig {
            membership_roles: Some("gold, silver,,bronze".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.membership_roles_list().unwrap(),
            Some(vec![role("gold"), role("silver"), role("bronze")])
        );
    }

    #[test]
    fn test_catalog_parsing() {
        let config = PlatformConfig {
            seed_catalog: Some("subscriber:Subscriber, gold:Gold Member".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.catalog_roles().unwrap(),
            vec![
                NamedRole::new(role("subscriber"), "Subscriber"),
                NamedRole::new(role("gold"), "Gold Member"),
            ]
        );
    }

    #[test]
    fn test_validation_malformed_catalog_entry() {
        let config = PlatformConfig {
            seed_catalog: Some("gold".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidCatalogEntry("gold".to_string()))
        );

        let config = PlatformConfig {
            seed_catalog: Some("gold:".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_default_role() {
        let config = PlatformConfig {
            default_role: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("platform.default_role"))
        );
    }

    #[test]
    fn test_validation_role_with_whitespace() {
        let config = PlatformConfig {
            membership_roles: Some("gold member".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidRoleId("gold member".to_string()))
        );
    }
}
