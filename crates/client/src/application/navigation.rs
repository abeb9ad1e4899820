//! Permission-gated navigation.
//!
//! A pure computation from the profile's permission set to the set of
//! sections the chrome should offer. No network access: the permission
//! set is already loaded by the time navigation renders.

use std::collections::BTreeSet;

use deiquest_domain::PermissionSet;

/// Top-level sections of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Adventures,
    History,
    Leadership,
    Administration,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Adventures => "My Adventures",
            Section::History => "My History",
            Section::Leadership => "Guild Leadership",
            Section::Administration => "Guild Management",
        }
    }
}

/// Which sections a holder of `permissions` may see.
///
/// Adventures and History require Approved; Leadership requires
/// GuildLeaderEligible; Administration requires SuperUser.
pub fn visible_sections(permissions: &PermissionSet) -> BTreeSet<Section> {
    let mut sections = BTreeSet::new();
    if permissions.is_approved() {
        sections.insert(Section::Adventures);
        sections.insert(Section::History);
    }
    if permissions.is_guild_leader_eligible() {
        sections.insert(Section::Leadership);
    }
    if permissions.is_super_user() {
        sections.insert(Section::Administration);
    }
    sections
}

/// The navigation chrome's view of the current profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationView {
    /// True when the user lacks Approved: the standard links are
    /// replaced by a pending-approval notice.
    pub pending_approval: bool,
    pub sections: BTreeSet<Section>,
}

pub fn navigation_view(permissions: &PermissionSet) -> NavigationView {
    NavigationView {
        pending_approval: !permissions.is_approved(),
        sections: visible_sections(permissions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deiquest_domain::PermissionKind;

    fn subsets() -> impl Iterator<Item = PermissionSet> {
        // Every subset of the four kinds.
        (0u8..16).map(|bits| {
            PermissionSet::new(
                PermissionKind::ALL
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| bits & (1 << i) != 0)
                    .map(|(_, k)| *k),
            )
        })
    }

    #[test]
    fn administration_iff_super_user() {
        for set in subsets() {
            let visible = visible_sections(&set);
            assert_eq!(
                visible.contains(&Section::Administration),
                set.is_super_user(),
                "permission set {set:?}"
            );
        }
    }

    #[test]
    fn adventures_and_history_travel_together() {
        for set in subsets() {
            let visible = visible_sections(&set);
            assert_eq!(
                visible.contains(&Section::Adventures),
                set.is_approved(),
                "permission set {set:?}"
            );
            assert_eq!(
                visible.contains(&Section::Adventures),
                visible.contains(&Section::History)
            );
        }
    }

    #[test]
    fn leadership_iff_eligible() {
        for set in subsets() {
            assert_eq!(
                visible_sections(&set).contains(&Section::Leadership),
                set.is_guild_leader_eligible()
            );
        }
    }

    #[test]
    fn unapproved_user_sees_pending_notice() {
        let view = navigation_view(&PermissionSet::empty());
        assert!(view.pending_approval);
        assert!(view.sections.is_empty());

        // An unapproved super user still reaches Administration.
        let view = navigation_view(&PermissionSet::new([PermissionKind::SuperUser]));
        assert!(view.pending_approval);
        assert!(view.sections.contains(&Section::Administration));
    }

    #[test]
    fn fully_permitted_user_sees_everything() {
        let set = PermissionSet::new([
            PermissionKind::Approved,
            PermissionKind::GuildLeaderEligible,
            PermissionKind::SuperUser,
        ]);
        let view = navigation_view(&set);
        assert!(!view.pending_approval);
        assert_eq!(view.sections.len(), 4);
    }
}
