//! Adventure board - the signed-in user's available and accepted actions.
//!
//! Accepting, completing, and cancelling apply keyed local patches as
//! soon as the server call succeeds, so the page reflects the change
//! without waiting for a second round trip. `reconcile` (or the
//! background variant) refetches both lists; the server's answer wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use deiquest_domain::{
    entities::quest_action::datetime_from_millis, AcceptedQuestAction, AvailableQuestAction,
    QuestActionId, UserId,
};

use crate::application::error::ServiceError;
use crate::application::services::AdventureService;
use crate::application::sync::{Collection, TaskGuard};
use crate::ports::outbound::TimeProvider;

#[derive(Default)]
struct BoardState {
    available: Collection<AvailableQuestAction>,
    accepted: Collection<AcceptedQuestAction>,
    /// Catalog entry each accepted copy came from, so a cancel can
    /// restore it without a refetch.
    origins: HashMap<QuestActionId, AvailableQuestAction>,
}

pub struct AdventureBoard {
    service: AdventureService,
    time: Arc<dyn TimeProvider>,
    user: UserId,
    state: Arc<Mutex<BoardState>>,
    reconcile_task: TaskGuard,
}

impl AdventureBoard {
    pub fn new(service: AdventureService, time: Arc<dyn TimeProvider>, user: UserId) -> Self {
        Self {
            service,
            time,
            user,
            state: Arc::new(Mutex::new(BoardState::default())),
            reconcile_task: TaskGuard::new(),
        }
    }

    pub fn available(&self) -> Vec<AvailableQuestAction> {
        self.with_state(|s| s.available.snapshot())
    }

    pub fn accepted(&self) -> Vec<AcceptedQuestAction> {
        self.with_state(|s| s.accepted.snapshot())
    }

    /// Fetch both lists. The two GETs are independent; each response is
    /// merged by key when it arrives, whatever the arrival order.
    pub async fn load(&self) -> Result<(), ServiceError> {
        fetch_into(&self.service, self.user, &self.state).await
    }

    /// Synchronous refetch; server data wins.
    pub async fn reconcile(&self) -> Result<(), ServiceError> {
        self.load().await
    }

    /// Refetch in the background. Replaces (and aborts) any reconcile
    /// already in flight; the task itself dies with the board.
    pub fn spawn_reconcile(&mut self) {
        let service = self.service.clone();
        let user = self.user;
        let state = Arc::clone(&self.state);
        self.reconcile_task.replace(tokio::spawn(async move {
            if let Err(e) = fetch_into(&service, user, &state).await {
                tracing::warn!("background reconcile failed: {e}");
            }
        }));
    }

    /// Wait for an in-flight background reconcile to settle.
    pub async fn wait_reconcile(&mut self) {
        self.reconcile_task.join().await;
    }

    /// Accept an available action.
    ///
    /// Returns false without any network call when the action is not in
    /// the available list - notably when a double-click races a
    /// just-accepted entry. The server would happily record a duplicate
    /// acceptance, so the guard lives here.
    pub async fn accept(&self, quest: QuestActionId) -> Result<bool, ServiceError> {
        let Some(entry) = self.with_state(|s| s.available.get(quest).cloned()) else {
            return Ok(false);
        };

        let copy_id = self.service.accept(self.user, quest).await?;
        let open_date = datetime_from_millis(self.time.now_millis());
        self.with_state(|s| {
            if !entry.repeatable {
                s.available.remove(quest);
            }
            s.accepted
                .upsert(entry.clone().into_accepted(copy_id, open_date));
            s.origins.insert(copy_id, entry);
        });
        Ok(true)
    }

    /// Complete an accepted copy. Unknown ids are a no-op.
    pub async fn complete(&self, copy: QuestActionId) -> Result<bool, ServiceError> {
        if !self.with_state(|s| s.accepted.contains(copy)) {
            return Ok(false);
        }
        self.service.complete(self.user, copy).await?;
        self.with_state(|s| {
            s.accepted.remove(copy);
            s.origins.remove(&copy);
        });
        Ok(true)
    }

    /// Cancel an accepted copy, returning its catalog entry to the
    /// available list when we still remember it.
    pub async fn cancel(&self, copy: QuestActionId) -> Result<bool, ServiceError> {
        if !self.with_state(|s| s.accepted.contains(copy)) {
            return Ok(false);
        }
        self.service.cancel(self.user, copy).await?;
        self.with_state(|s| {
            s.accepted.remove(copy);
            if let Some(origin) = s.origins.remove(&copy) {
                s.available.upsert(origin);
            }
        });
        Ok(true)
    }

    /// Attach or replace the adventurer's note on an accepted copy.
    pub async fn edit_note(
        &self,
        copy: QuestActionId,
        note: Option<String>,
    ) -> Result<bool, ServiceError> {
        let Some(mut entry) = self.with_state(|s| s.accepted.get(copy).cloned()) else {
            return Ok(false);
        };
        self.service
            .edit_note(self.user, copy, note.clone())
            .await?;
        entry.adventurer_note = note;
        self.with_state(|s| s.accepted.upsert(entry));
        Ok(true)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut BoardState) -> T) -> T {
        match self.state.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

async fn fetch_into(
    service: &AdventureService,
    user: UserId,
    state: &Arc<Mutex<BoardState>>,
) -> Result<(), ServiceError> {
    let (available, accepted) = tokio::join!(service.available(user), service.accepted(user));

    // Apply whichever responses succeeded; a failure leaves that
    // collection exactly as it was.
    let mut first_error = None;
    {
        let mut guard = match state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match available {
            Ok(items) => guard.available.reconcile(items),
            Err(e) => first_error = Some(e),
        }
        match accepted {
            Ok(items) => guard.accepted.reconcile(items),
            Err(e) => first_error = first_error.or(Some(e)),
        }
    }
    match first_error {
        None => Ok(()),
        Some(e) => Err(e),
    }
}
