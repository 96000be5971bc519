use orgswitch_traits::Policy;
use thiserror::Error;

use crate::{
    collaborators::{OrganizationManagementError, OrganizationResolver},
    GrantError, OrganizationId,
};

/// A requested move from one organization to another
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrganizationSwitch {
    /// The organization the presented token was issued for
    pub source: OrganizationId,

    /// The organization being switched into
    pub target: OrganizationId,
}

/// The reason an organization switch was refused
#[derive(Debug, Error)]
pub enum SwitchDenial {
    /// The token was already issued for the target organization
    #[error("token already issued for organization '{0}'")]
    AlreadyIssued(OrganizationId),

    /// The organizations are in different branches of the hierarchy
    #[error("organizations '{from}' and '{to}' are not in the same branch")]
    CrossBranch {
        /// The organization switched from
        from: OrganizationId,
        /// The organization switched to
        to: OrganizationId,
    },

    /// The hierarchy could not be queried
    #[error("unable to query the organization hierarchy")]
    Unresolved(#[from] OrganizationManagementError),
}

impl From<SwitchDenial> for GrantError {
    fn from(denial: SwitchDenial) -> Self {
        match denial {
            SwitchDenial::AlreadyIssued(organization_id) => {
                Self::AlreadyIssuedForOrganization { organization_id }
            }
            SwitchDenial::CrossBranch { from, to } => Self::CrossBranchSwitch {
                source_organization: from,
                target_organization: to,
            },
            SwitchDenial::Unresolved(err) => Self::SwitchEligibilityCheck(err),
        }
    }
}

/// Allows switches between distinct organizations in the same branch
///
/// A switch into the organization the token was already issued for is
/// refused outright, without consulting the hierarchy. Otherwise, the switch
/// is allowed whenever the resolver places the two organizations in the same
/// branch, regardless of whether the target is an ancestor or a descendant.
#[derive(Clone, Copy)]
pub struct SameBranchPolicy<'a> {
    resolver: &'a dyn OrganizationResolver,
}

impl<'a> SameBranchPolicy<'a> {
    /// Constructs a policy that consults the given resolver
    pub fn new(resolver: &'a dyn OrganizationResolver) -> Self {
        Self { resolver }
    }
}

impl std::fmt::Debug for SameBranchPolicy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SameBranchPolicy").finish()
    }
}

impl Policy for SameBranchPolicy<'_> {
    type Request = OrganizationSwitch;
    type Denial = SwitchDenial;

    fn evaluate(&self, switch: &OrganizationSwitch) -> Result<(), SwitchDenial> {
        if switch.source == switch.target {
            tracing::debug!(
                organization = %switch.target,
                "provided token was already issued for the requested organization"
            );
            return Err(SwitchDenial::AlreadyIssued(switch.target.clone()));
        }

        let depth = self
            .resolver
            .relative_depth_in_same_branch(&switch.source, &switch.target)?;

        tracing::trace!(
            source = %switch.source,
            target = %switch.target,
            depth,
            "evaluated relative organization depth"
        );

        if depth < 0 {
            Err(SwitchDenial::CrossBranch {
                from: switch.source.clone(),
                to: switch.target.clone(),
            })
        } else {
            Ok(())
        }
    }
}
