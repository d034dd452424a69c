//! GetClientPlanningsHandler - Query handler for a client's plannings.

use std::sync::Arc;

use crate::domain::foundation::ClientId;
use crate::domain::planning::{Planning, PlanningError};
use crate::ports::PlanningReader;

/// Query for every planning owned by one client.
#[derive(Debug, Clone)]
pub struct GetClientPlanningsQuery {
    pub client_id: ClientId,
}

impl GetClientPlanningsQuery {
    pub fn new(client_id: ClientId) -> Self {
        Self { client_id }
    }

    /// Build the query from a raw, possibly absent identifier.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the identifier is missing or blank
    pub fn from_raw(client_id: Option<&str>) -> Result<Self, PlanningError> {
        let raw = client_id
            .ok_or_else(|| PlanningError::invalid_input("client_id", "client_id is required"))?;
        Ok(Self::new(ClientId::new(raw)?))
    }
}

/// Handler for fetching a client's plannings.
pub struct GetClientPlanningsHandler {
    reader: Arc<dyn PlanningReader>,
}

impl GetClientPlanningsHandler {
    pub fn new(reader: Arc<dyn PlanningReader>) -> Self {
        Self { reader }
    }

    /// Returns plannings in creation order, each with its sessions in
    /// scheduled order. An unknown client yields an empty vector.
    pub async fn handle(&self, query: GetClientPlanningsQuery) -> Result<Vec<Planning>, PlanningError> {
        let plannings = self.reader.list_by_client(&query.client_id).await?;
        tracing::debug!(
            client_id = %query.client_id,
            plannings = plannings.len(),
            "Fetched client plannings"
        );
        Ok(plannings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, PlanningId, Timestamp};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockPlanningReader {
        plannings: Vec<Planning>,
        calls: AtomicUsize,
    }

    impl MockPlanningReader {
        fn with_plannings(plannings: Vec<Planning>) -> Self {
            Self {
                plannings,
                calls: AtomicUsize::new(0),
            }
        }

        fn empty() -> Self {
            Self::with_plannings(Vec::new())
        }
    }

    #[async_trait]
    impl PlanningReader for MockPlanningReader {
        async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Planning>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .plannings
                .iter()
                .filter(|p| p.client_id() == client_id)
                .cloned()
                .collect())
        }
    }

    struct FailingPlanningReader;

    #[async_trait]
    impl PlanningReader for FailingPlanningReader {
        async fn list_by_client(&self, _client_id: &ClientId) -> Result<Vec<Planning>, DomainError> {
            Err(DomainError::database("list plannings", "connection refused"))
        }
    }

    fn planning_for(client: &str, name: &str) -> Planning {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Planning::new(
            PlanningId::new(),
            ClientId::new(client).unwrap(),
            name,
            day,
            day,
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_only_the_clients_plannings() {
        let reader = Arc::new(MockPlanningReader::with_plannings(vec![
            planning_for("c-1", "Mine"),
            planning_for("c-2", "Theirs"),
        ]));
        let handler = GetClientPlanningsHandler::new(reader);

        let query = GetClientPlanningsQuery::new(ClientId::new("c-1").unwrap());
        let result = handler.handle(query).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name(), "Mine");
    }

    #[tokio::test]
    async fn unknown_client_gets_empty_list() {
        let handler = GetClientPlanningsHandler::new(Arc::new(MockPlanningReader::empty()));

        let query = GetClientPlanningsQuery::new(ClientId::new("nobody").unwrap());
        let result = handler.handle(query).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_store_unavailable() {
        let handler = GetClientPlanningsHandler::new(Arc::new(FailingPlanningReader));

        let query = GetClientPlanningsQuery::new(ClientId::new("c-1").unwrap());
        let result = handler.handle(query).await;

        assert!(matches!(result, Err(PlanningError::StoreUnavailable(_))));
    }

    #[test]
    fn missing_client_id_is_invalid_input() {
        let result = GetClientPlanningsQuery::from_raw(None);
        assert!(matches!(
            result,
            Err(PlanningError::InvalidInput { ref field, .. }) if field == "client_id"
        ));
    }

    #[test]
    fn blank_client_id_is_invalid_input() {
        let result = GetClientPlanningsQuery::from_raw(Some("   "));
        assert!(matches!(result, Err(PlanningError::InvalidInput { .. })));
    }

    #[test]
    fn present_client_id_builds_query() {
        let query = GetClientPlanningsQuery::from_raw(Some("c-1")).unwrap();
        assert_eq!(query.client_id.as_str(), "c-1");
    }

    #[tokio::test]
    async fn reader_is_called_once_per_query() {
        let reader = Arc::new(MockPlanningReader::empty());
        let handler = GetClientPlanningsHandler::new(reader.clone());

        handler
            .handle(GetClientPlanningsQuery::new(ClientId::new("c-1").unwrap()))
            .await
            .unwrap();

        assert_eq!(reader.calls.load(Ordering::SeqCst), 1);
    }
}
