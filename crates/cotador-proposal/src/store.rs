//! Proposal persistence contract and an in-memory implementation

use crate::proposal::{Proposal, ProposalId};
use async_trait::async_trait;
use chrono::Utc;
use cotador_common::{CotadorError, UserIdentity};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

/// Storage backend for proposals
///
/// Each call is a single request/response. Concurrent saves of the same
/// proposal are last-write-wins.
#[async_trait]
pub trait ProposalStore: Send + Sync {
    /// Persist a new proposal and return its assigned id
    async fn create(&self, proposal: Proposal) -> Result<ProposalId, StoreError>;

    /// Overwrite an existing proposal
    async fn update(&self, id: &ProposalId, proposal: Proposal) -> Result<(), StoreError>;

    async fn get(&self, id: &ProposalId) -> Result<Proposal, StoreError>;

    async fn delete(&self, id: &ProposalId) -> Result<(), StoreError>;

    /// Proposals visible to `viewer`, newest first
    async fn list(&self, viewer: &UserIdentity) -> Result<Vec<Proposal>, StoreError>;
}

/// Errors from proposal store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Proposal not found: {0}")]
    NotFound(ProposalId),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<StoreError> for CotadorError {
    fn from(err: StoreError) -> Self {
        CotadorError::Store(err.to_string())
    }
}

/// In-memory store
///
/// Uses DashMap for concurrent access.
#[derive(Debug, Default)]
pub struct InMemoryProposalStore {
    proposals: DashMap<ProposalId, Proposal>,
}

impl InMemoryProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

#[async_trait]
impl ProposalStore for InMemoryProposalStore {
    async fn create(&self, mut proposal: Proposal) -> Result<ProposalId, StoreError> {
        let id = ProposalId::new(Uuid::now_v7().to_string());
        proposal.id = Some(id.clone());
        self.proposals.insert(id.clone(), proposal);

        debug!(%id, "Proposal created");
        Ok(id)
    }

    async fn update(&self, id: &ProposalId, mut proposal: Proposal) -> Result<(), StoreError> {
        let mut entry = self
            .proposals
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        proposal.id = Some(id.clone());
        proposal.updated_at = Utc::now();
        *entry = proposal;

        debug!(%id, "Proposal updated");
        Ok(())
    }

    async fn get(&self, id: &ProposalId) -> Result<Proposal, StoreError> {
        self.proposals
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn delete(&self, id: &ProposalId) -> Result<(), StoreError> {
        self.proposals
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        debug!(%id, "Proposal deleted");
        Ok(())
    }

    async fn list(&self, viewer: &UserIdentity) -> Result<Vec<Proposal>, StoreError> {
        let see_all = viewer.role.can_view_all_proposals();

        let mut proposals: Vec<Proposal> = self
            .proposals
            .iter()
            .filter(|entry| see_all || entry.value().owner == viewer.user_id)
            .map(|entry| entry.value().clone())
            .collect();
        proposals.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(proposals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use cotador_common::{ContactInfo, UserRole};
    use rust_decimal::Decimal;

    fn proposal(owner: &str, age_minutes: i64) -> Proposal {
        let created_at = Utc::now() - Duration::minutes(age_minutes);
        Proposal {
            id: None,
            client: ContactInfo::new("Cliente", "cliente@example.com"),
            account_manager: ContactInfo::new("Gerente", "gerente@example.com"),
            items: Vec::new(),
            total_setup: Decimal::ZERO,
            total_monthly: Decimal::ZERO,
            created_at,
            updated_at: created_at,
            owner: owner.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = InMemoryProposalStore::new();
        let id = store.create(proposal("ana", 0)).await.unwrap();

        let stored = store.get(&id).await.unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = InMemoryProposalStore::new();
        let id = ProposalId::new("missing");
        let err = store.update(&id, proposal("ana", 0)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryProposalStore::new();
        let id = store.create(proposal("ana", 0)).await.unwrap();

        store.delete(&id).await.unwrap();
        assert!(store.get(&id).await.is_err());
        assert!(store.delete(&id).await.is_err());
    }

    #[tokio::test]
    async fn test_list_is_role_gated_and_newest_first() {
        let store = InMemoryProposalStore::new();
        store.create(proposal("ana", 30)).await.unwrap();
        store.create(proposal("bruno", 20)).await.unwrap();
        store.create(proposal("ana", 10)).await.unwrap();

        let ana = UserIdentity::new("ana", "ana@example.com", UserRole::User);
        let own = store.list(&ana).await.unwrap();
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|p| p.owner == "ana"));
        assert!(own[0].created_at > own[1].created_at);

        for role in [UserRole::Admin, UserRole::Diretor] {
            let viewer = UserIdentity::new("carla", "carla@example.com", role);
            let all = store.list(&viewer).await.unwrap();
            assert_eq!(all.len(), 3);
            assert_eq!(all[1].owner, "bruno");
        }
    }

    #[test]
    fn test_store_error_converts() {
        let err: CotadorError = StoreError::NotFound(ProposalId::new("p1")).into();
        assert!(matches!(err, CotadorError::Store(msg) if msg.contains("p1")));
    }
}
