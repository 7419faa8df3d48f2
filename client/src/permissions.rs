//! Per-row [`Permissions`] derivation.

use crate::member::{self, Member, Role};

/// Organization-wide policy affecting per-row [`Permissions`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GlobalPolicy {
    /// Indicator whether impersonation is enabled in the organization.
    pub impersonation_enabled: bool,
}

/// Actions available to the viewer on a single [`Member`] row.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Permissions {
    /// Indicator whether the row's role may be changed.
    pub can_edit: bool,

    /// Indicator whether the row may be removed from the organization.
    pub can_remove: bool,

    /// Indicator whether the row's [`Member`] may be impersonated.
    pub can_impersonate: bool,
}

impl Permissions {
    /// Derives the [`Permissions`] of the viewer on the provided [`Member`]
    /// row.
    ///
    /// Pure function of its inputs: rendering may call it per row on every
    /// pass.
    #[must_use]
    pub fn derive(
        viewer_role: Role,
        viewer_id: member::Id,
        row: &Member,
        policy: GlobalPolicy,
    ) -> Self {
        let base = viewer_role.is_admin_or_owner()
            && row.accepted
            && row.id != viewer_id;

        Self {
            can_edit: base,
            can_remove: base,
            can_impersonate: base
                && !row.disable_impersonation
                && policy.impersonation_enabled,
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::member::{self, Member, Role};

    use super::{GlobalPolicy, Permissions};

    fn row(id: member::Id) -> Member {
        Member {
            id,
            username: None,
            email: "m@x.io".to_owned(),
            role: Role::Member,
            accepted: true,
            disable_impersonation: false,
            teams: Vec::new(),
        }
    }

    const POLICY: GlobalPolicy = GlobalPolicy { impersonation_enabled: true };

    #[test]
    fn admins_and_owners_manage_other_accepted_rows() {
        let viewer = member::Id::new();
        let perms = Permissions::derive(
            Role::Admin,
            viewer,
            &row(member::Id::new()),
            POLICY,
        );

        assert_eq!(
            perms,
            Permissions {
                can_edit: true,
                can_remove: true,
                can_impersonate: true,
            },
        );
    }

    #[test]
    fn plain_members_manage_nothing() {
        let viewer = member::Id::new();
        let perms = Permissions::derive(
            Role::Member,
            viewer,
            &row(member::Id::new()),
            POLICY,
        );

        assert_eq!(perms, Permissions::default());
    }

    #[test]
    fn own_row_is_never_manageable() {
        let viewer = member::Id::new();
        let perms =
            Permissions::derive(Role::Owner, viewer, &row(viewer), POLICY);

        assert_eq!(perms, Permissions::default());
    }

    #[test]
    fn pending_rows_are_not_manageable() {
        let viewer = member::Id::new();
        let mut pending = row(member::Id::new());
        pending.accepted = false;

        let perms = Permissions::derive(Role::Owner, viewer, &pending, POLICY);

        assert_eq!(perms, Permissions::default());
    }

    #[test]
    fn impersonation_respects_opt_out_and_policy() {
        let viewer = member::Id::new();

        let mut opted_out = row(member::Id::new());
        opted_out.disable_impersonation = true;
        let perms =
            Permissions::derive(Role::Owner, viewer, &opted_out, POLICY);
        assert!(perms.can_edit);
        assert!(!perms.can_impersonate);

        let disabled = GlobalPolicy {
            impersonation_enabled: false,
        };
        let perms = Permissions::derive(
            Role::Owner,
            viewer,
            &row(member::Id::new()),
            disabled,
        );
        assert!(perms.can_remove);
        assert!(!perms.can_impersonate);
    }
}
