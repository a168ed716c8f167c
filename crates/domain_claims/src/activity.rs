//! Per-role activity log
//!
//! A small append-only record of what each actor did, keyed by actor id and
//! read newest-first by dashboards. Durable, unlike the per-browser-session
//! notes it replaces.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ActivityId, Role, UserId};
use infra_store::{JsonStore, Record, StoreError};

use crate::engine::Actor;

/// One recorded action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: ActivityId,
    pub actor_id: UserId,
    pub role: Role,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Record for ActivityEntry {
    type Id = ActivityId;
    const KIND: &'static str = "activity entry";

    fn id(&self) -> ActivityId {
        self.id
    }
}

/// Append-only activity log over the record store
pub struct ActivityLog {
    entries: Arc<JsonStore<ActivityEntry>>,
}

impl ActivityLog {
    pub fn new(entries: Arc<JsonStore<ActivityEntry>>) -> Self {
        Self { entries }
    }

    /// Appends an entry for the acting user
    pub async fn record(
        &self,
        actor: &Actor,
        message: impl Into<String>,
    ) -> Result<ActivityEntry, StoreError> {
        let entry = ActivityEntry {
            id: ActivityId::new_v7(),
            actor_id: actor.id,
            role: actor.role,
            message: message.into(),
            at: Utc::now(),
        };
        self.entries.upsert(entry.clone()).await?;
        Ok(entry)
    }

    /// The actor's most recent entries, newest first
    pub async fn recent_for(&self, actor_id: UserId, limit: usize) -> Vec<ActivityEntry> {
        let mut entries: Vec<ActivityEntry> = self
            .entries
            .all()
            .await
            .into_iter()
            .filter(|entry| entry.actor_id == actor_id)
            .collect();
        entries.sort_by(|a, b| b.at.cmp(&a.at));
        entries.truncate(limit);
        entries
    }
}
