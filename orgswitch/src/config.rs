use serde::{Deserialize, Serialize};

use crate::{GrantType, TenantDomain};

/// Configuration for the organization switch grant
///
/// Every field has a default, so a configuration may be deserialized from a
/// partial document.
///
/// ```
/// use orgswitch::OrganizationSwitchConfig;
///
/// let config = OrganizationSwitchConfig::default();
/// assert_eq!(config.grant_type.as_str(), "organization_switch");
/// assert_eq!(config.token_parameter, "token");
/// assert_eq!(config.organization_parameter, "switching_organization");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationSwitchConfig {
    /// The grant type identifier the grant is registered under
    pub grant_type: GrantType,

    /// The request parameter carrying the token being exchanged
    pub token_parameter: String,

    /// The request parameter carrying the organization to switch into
    pub organization_parameter: String,

    /// The token type presented to the token validator
    pub token_type: String,

    /// The tenant assumed for subject identifiers that do not name one
    pub default_tenant_domain: TenantDomain,
}

impl Default for OrganizationSwitchConfig {
    fn default() -> Self {
        Self {
            grant_type: GrantType::from_static("organization_switch"),
            token_parameter: "token".to_owned(),
            organization_parameter: "switching_organization".to_owned(),
            token_type: "bearer".to_owned(),
            default_tenant_domain: TenantDomain::from_static("carbon.super"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() -> color_eyre::Result<()> {
        let config: OrganizationSwitchConfig =
            serde_json::from_str(r#"{"organization_parameter":"org"}"#)?;

        assert_eq!(config.organization_parameter, "org");
        assert_eq!(config.token_parameter, "token");
        assert_eq!(config.token_type, "bearer");
        assert_eq!(config.default_tenant_domain.as_str(), "carbon.super");
        Ok(())
    }

    #[test]
    fn empty_document_is_default() -> color_eyre::Result<()> {
        let config: OrganizationSwitchConfig = serde_json::from_str("{}")?;
        assert_eq!(config, OrganizationSwitchConfig::default());
        Ok(())
    }
}
