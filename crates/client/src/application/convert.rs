//! Wire-record to domain-entity conversions.
//!
//! Millisecond timestamps become `chrono` datetimes here; everything
//! downstream of the services works in domain terms.

use deiquest_domain::{
    entities::quest_action::datetime_from_millis, AcceptedQuestAction, AvailableQuestAction,
    CompletedQuestAction, Guild, PermissionSet, QuestAction, User, UserRole,
};
use deiquest_protocol::{
    AcceptedQuestActionRecord, AvailableQuestActionRecord, CompletedQuestActionRecord, GuildRecord,
    QuestActionRecord, UserSummaryRecord,
};

pub fn guild(record: GuildRecord) -> Guild {
    Guild {
        id: record.id,
        name: record.name,
        leader_id: record.leader_id,
        leader_name: record.leader_name,
    }
}

pub fn user(record: UserSummaryRecord) -> User {
    User {
        id: record.id,
        name: record.name,
        roles: record
            .roles
            .into_iter()
            .map(|r| UserRole {
                guild_id: r.guild_id,
                name: r.name,
            })
            .collect(),
        permissions: PermissionSet::new(record.permissions.into_iter().map(|p| p.kind)),
    }
}

pub fn quest_action(record: QuestActionRecord) -> QuestAction {
    QuestAction {
        id: record.id,
        description: record.description,
        name: record.name,
        adventurer_note: record.adventurer_note,
        xp: record.xp,
        repeatable: record.repeatable,
    }
}

pub fn available(record: AvailableQuestActionRecord) -> AvailableQuestAction {
    AvailableQuestAction {
        guild_id: record.guild_id,
        quest_id: record.quest_id,
        description: record.description,
        name: record.name,
        adventurer_note: record.adventurer_note,
        xp: record.xp,
        repeatable: record.repeatable,
    }
}

pub fn accepted(record: AcceptedQuestActionRecord) -> AcceptedQuestAction {
    AcceptedQuestAction {
        guild_id: record.guild_id,
        quest_id: record.quest_id,
        description: record.description,
        name: record.name,
        adventurer_note: record.adventurer_note,
        xp: record.xp,
        open_date: record.open_date.and_then(datetime_from_millis),
    }
}

pub fn completed(record: CompletedQuestActionRecord) -> Option<CompletedQuestAction> {
    // A completed row without a readable completion date is unusable;
    // skip it rather than invent one.
    let completed_date = datetime_from_millis(record.completed_date)?;
    Some(CompletedQuestAction {
        guild_id: record.guild_id,
        quest_id: record.quest_id,
        description: record.description,
        name: record.name,
        adventurer_note: record.adventurer_note,
        xp: record.xp,
        accepted_date: record.accepted_date.and_then(datetime_from_millis),
        completed_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use deiquest_domain::{GuildId, PermissionKind, QuestActionId, UserId};
    use deiquest_protocol::{PermissionRecord, RoleRecord};

    #[test]
    fn user_conversion_collects_permissions() {
        let record = UserSummaryRecord {
            id: UserId::new(3),
            name: "Ada".to_string(),
            roles: vec![RoleRecord {
                guild_id: GuildId::new(1),
                name: "leader".to_string(),
            }],
            permissions: vec![
                PermissionRecord {
                    kind: PermissionKind::Approved,
                },
                PermissionRecord {
                    kind: PermissionKind::Approved,
                },
            ],
        };
        let user = user(record);
        assert!(user.leads(GuildId::new(1)));
        assert!(user.permissions.is_approved());
        assert_eq!(user.permissions.iter().count(), 1);
    }

    #[test]
    fn completed_conversion_converts_millis() {
        let record = CompletedQuestActionRecord {
            guild_id: GuildId::new(1),
            quest_id: QuestActionId::new(2),
            description: "desc".to_string(),
            name: None,
            adventurer_note: None,
            xp: 10,
            accepted_date: Some(1_700_000_000_000),
            completed_date: 1_700_000_100_000,
        };
        let completed = completed(record).unwrap();
        assert_eq!(completed.completed_date.timestamp_millis(), 1_700_000_100_000);
        assert!(completed.accepted_date.is_some());
    }
}
