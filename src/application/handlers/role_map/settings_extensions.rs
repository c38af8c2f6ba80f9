//! SettingsContributor - Appends the membership-roles setting to the host's
//! extension settings list.

use std::sync::Arc;

use crate::domain::role_map::{RoleMapError, SettingDescriptor};
use crate::ports::RoleCatalogProvider;

pub struct SettingsContributor {
    catalog: Arc<dyn RoleCatalogProvider>,
}

impl SettingsContributor {
    pub fn new(catalog: Arc<dyn RoleCatalogProvider>) -> Self {
        Self { catalog }
    }

    /// Returns `settings` with the membership-roles multicheck appended.
    /// Existing entries keep their order.
    pub async fn contribute(
        &self,
        mut settings: Vec<SettingDescriptor>,
    ) -> Result<Vec<SettingDescriptor>, RoleMapError> {
        let catalog = self.catalog.role_catalog().await?;
        settings.push(SettingDescriptor::membership_roles(&catalog));
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::platform::InMemoryPlatform;
    use crate::domain::foundation::RoleId;
    use crate::domain::role_map::{SettingKind, MEMBERSHIP_ROLES_SETTING_ID};

    fn role(id: &str) -> RoleId {
        RoleId::new(id).unwrap()
    }

    fn contributor() -> SettingsContributor {
        let platform = InMemoryPlatform::builder()
            .role(role("subscriber"), "Subscriber")
            .role(role("gold"), "Gold")
            .role(role("administrator"), "Administrator")
            .build();
        SettingsContributor::new(Arc::new(platform))
    }

    #[tokio::test]
    async fn appends_after_existing_settings() {
        let existing = SettingDescriptor {
            id: "other_extension_header".to_string(),
            name: "Other".to_string(),
            desc: String::new(),
            kind: SettingKind::Header,
            options: vec![],
        };

        let settings = contributor().contribute(vec![existing.clone()]).await.unwrap();

        assert_eq!(settings.len(), 2);
        assert_eq!(settings[0], existing);
        assert_eq!(settings[1].id, MEMBERSHIP_ROLES_SETTING_ID);
        assert_eq!(settings[1].kind, SettingKind::Multicheck);
    }

    #[tokio::test]
    async fn offers_every_catalog_role_by_name() {
        let settings = contributor().contribute(vec![]).await.unwrap();

        let labels: Vec<_> = settings[0].options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Administrator", "Gold", "Subscriber"]);
    }
}
