//! Keyed collections - the data-sync primitive behind every page store.
//!
//! Each page holds its server-derived lists in a `Collection`. Mutations
//! apply an optimistic local patch (`upsert`/`remove`) immediately after
//! the network call succeeds; a later `reconcile` replaces the contents
//! with the server's answer, so refetched data always wins. Responses
//! are merged by key, never by arrival order.

use deiquest_domain::{
    AcceptedQuestAction, AvailableQuestAction, CompletedQuestAction, Guild, GuildId, QuestAction,
    QuestActionId, User, UserId,
};

/// Anything addressable by a stable key inside a collection.
pub trait Keyed {
    type Key: Copy + Eq;
    fn key(&self) -> Self::Key;
}

/// An ordered list of keyed items mirroring one server collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed + Clone> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn contains(&self, key: T::Key) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace by key, preserving display order for
    /// replacements. Returns true when the collection changed.
    pub fn upsert(&mut self, item: T) -> bool
    where
        T: PartialEq,
    {
        match self.items.iter_mut().find(|i| i.key() == item.key()) {
            Some(existing) => {
                if *existing == item {
                    false
                } else {
                    *existing = item;
                    true
                }
            }
            None => {
                self.items.push(item);
                true
            }
        }
    }

    pub fn remove(&mut self, key: T::Key) -> Option<T> {
        let index = self.items.iter().position(|item| item.key() == key)?;
        Some(self.items.remove(index))
    }

    /// Replace the contents with the server's view of the collection.
    pub fn reconcile(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// A copy of the current contents, for pre-edit snapshots.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl Keyed for Guild {
    type Key = GuildId;
    fn key(&self) -> GuildId {
        self.id
    }
}

impl Keyed for User {
    type Key = UserId;
    fn key(&self) -> UserId {
        self.id
    }
}

impl Keyed for QuestAction {
    type Key = QuestActionId;
    fn key(&self) -> QuestActionId {
        self.id
    }
}

impl Keyed for AvailableQuestAction {
    type Key = QuestActionId;
    fn key(&self) -> QuestActionId {
        self.quest_id
    }
}

impl Keyed for AcceptedQuestAction {
    type Key = QuestActionId;
    fn key(&self) -> QuestActionId {
        self.quest_id
    }
}

impl Keyed for CompletedQuestAction {
    type Key = QuestActionId;
    fn key(&self) -> QuestActionId {
        self.quest_id
    }
}

/// Holds at most one background reconcile task; replacing or dropping
/// the guard aborts the previous task so nothing outlives its store.
#[derive(Default)]
pub struct TaskGuard {
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TaskGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new task, aborting any previous one.
    pub fn replace(&mut self, handle: tokio::task::JoinHandle<()>) {
        if let Some(previous) = self.handle.take() {
            previous.abort();
        }
        self.handle = Some(handle);
    }

    /// Wait for the current task to finish (test convenience).
    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guild(id: u32, name: &str) -> Guild {
        Guild::new(GuildId::new(id), name)
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut guilds = Collection::new();
        assert!(guilds.upsert(guild(1, "Warrior")));
        assert!(guilds.upsert(guild(2, "Scribe")));

        // Renaming guild 1 must not move it to the end.
        assert!(guilds.upsert(guild(1, "Warriors")));
        assert_eq!(guilds.items()[0].name, "Warriors");
        assert_eq!(guilds.len(), 2);
    }

    #[test]
    fn upsert_of_identical_item_reports_no_change() {
        let mut guilds = Collection::new();
        guilds.upsert(guild(1, "Warrior"));
        assert!(!guilds.upsert(guild(1, "Warrior")));
    }

    #[test]
    fn reconcile_is_authoritative() {
        let mut guilds = Collection::new();
        guilds.upsert(guild(1, "Warrior"));
        guilds.upsert(guild(2, "Scribe"));

        // Server dropped guild 2 and renamed guild 1.
        guilds.reconcile(vec![guild(1, "Fighter")]);
        assert_eq!(guilds.len(), 1);
        assert_eq!(guilds.items()[0].name, "Fighter");
    }

    #[test]
    fn snapshot_equals_contents() {
        let mut guilds = Collection::new();
        guilds.upsert(guild(1, "Warrior"));
        let snapshot = guilds.snapshot();
        guilds.remove(GuildId::new(1));
        guilds.reconcile(snapshot.clone());
        assert_eq!(guilds.snapshot(), snapshot);
    }

    #[tokio::test]
    async fn task_guard_joins_completed_work() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        let mut guard = TaskGuard::new();
        guard.replace(tokio::spawn(async move {
            flag.store(true, Ordering::SeqCst);
        }));
        guard.join().await;
        assert!(done.load(Ordering::SeqCst));
    }
}
