//! Test fixtures and mock implementations for integration testing

use async_trait::async_trait;
use club_ladder::config::LadderSettings;
use club_ladder::error::{LadderError, Result};
use club_ladder::service::LadderService;
use club_ladder::store::{LadderState, MemoryLadderStore, NullSnapshot, SnapshotStore};
use club_ladder::types::{SeasonId, SeedList};
use std::sync::{Arc, Mutex};

/// Mock snapshot store that captures persisted states for testing
#[derive(Debug, Default)]
pub struct MockSnapshotStore {
    persisted_states: Arc<Mutex<Vec<LadderState>>>,
    fail_persist: Arc<Mutex<bool>>,
}

impl MockSnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all persisted states so far (for testing)
    pub fn persisted_states(&self) -> Vec<LadderState> {
        self.persisted_states
            .lock()
            .map(|states| states.clone())
            .unwrap_or_default()
    }

    /// Number of successful persist calls
    pub fn persist_count(&self) -> usize {
        self.persisted_states
            .lock()
            .map(|states| states.len())
            .unwrap_or(0)
    }

    /// Make every following persist call fail until switched back
    pub fn set_fail_persist(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_persist.lock() {
            *flag = fail;
        }
    }
}

#[async_trait]
impl SnapshotStore for MockSnapshotStore {
    async fn load(&self) -> Result<Option<LadderState>> {
        Ok(None)
    }

    async fn persist(&self, state: &LadderState) -> Result<()> {
        let failing = self.fail_persist.lock().map(|flag| *flag).unwrap_or(false);
        if failing {
            return Err(LadderError::storage("injected persist failure").into());
        }

        if let Ok(mut states) = self.persisted_states.lock() {
            states.push(state.clone());
        }
        Ok(())
    }
}

/// Create a service over the given mock snapshot store
pub fn create_mock_service(snapshot: Arc<MockSnapshotStore>) -> LadderService {
    LadderService::new(
        Arc::new(MemoryLadderStore::new(snapshot)),
        LadderSettings::default(),
    )
}

/// Create an ephemeral service with one season seeded in the given order
pub async fn create_seeded_service(year: i32, names: &[&str]) -> (LadderService, SeasonId) {
    let service = LadderService::new(
        Arc::new(MemoryLadderStore::new(Arc::new(NullSnapshot))),
        LadderSettings::default(),
    );

    let seeds = SeedList::Ordered {
        names: names.iter().map(|name| name.to_string()).collect(),
    };
    let season_id = service
        .init_season(year, seeds)
        .await
        .expect("seeding a fresh season should succeed");

    (service, season_id)
}

/// Ranks of the given season keyed off the ladder read, in ladder order
pub async fn ladder_names_and_ranks(
    service: &LadderService,
    season_id: SeasonId,
) -> Vec<(String, u32)> {
    service
        .get_ladder(season_id)
        .await
        .expect("ladder read should succeed")
        .into_iter()
        .map(|row| (row.name, row.rank))
        .collect()
}
