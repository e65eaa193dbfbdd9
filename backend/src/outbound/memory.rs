//! In-memory `UserStore` adapter.
//!
//! Holds a fixed list of records in insertion order. Used by the HTTP tests
//! and by the `memory` store mode for running the service without MongoDB.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{GroupCount, UserField, UserRecord};

/// Immutable in-memory user collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    records: Vec<UserRecord>,
}

impl InMemoryUserStore {
    /// Store serving `records` in the given order.
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn count_all(&self) -> Result<u64, UserStoreError> {
        u64::try_from(self.records.len()).map_err(|err| UserStoreError::query(err.to_string()))
    }

    async fn find_page(&self, skip: u64, limit: u32) -> Result<Vec<UserRecord>, UserStoreError> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .records
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_by_field(&self, field: UserField) -> Result<Vec<GroupCount>, UserStoreError> {
        // Keys keep first-seen order so output is deterministic for tests.
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, u64> = HashMap::new();
        for record in &self.records {
            let key = record.group_key(field);
            let count = counts.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                0
            });
            *count += 1;
        }
        Ok(order
            .into_iter()
            .map(|value| {
                let count = counts.get(&value).copied().unwrap_or_default();
                GroupCount::new(value, count)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use rstest::{fixture, rstest};

    fn user(id: usize, gender: Option<&str>) -> UserRecord {
        let mut record = UserRecord::new(UserId::new(format!("user-{id}")).expect("id"));
        record.number = i64::try_from(id).ok();
        record.gender = gender.map(str::to_owned);
        record
    }

    #[fixture]
    fn store() -> InMemoryUserStore {
        InMemoryUserStore::new(vec![
            user(1, Some("Male")),
            user(2, Some("male")),
            user(3, Some("Female")),
            user(4, None),
        ])
    }

    #[rstest]
    #[tokio::test]
    async fn count_all_reports_every_record(store: InMemoryUserStore) {
        assert_eq!(store.count_all().await.expect("count"), 4);
    }

    #[rstest]
    #[case(0, 2, vec!["user-1", "user-2"])]
    #[case(2, 10, vec!["user-3", "user-4"])]
    #[case(4, 10, vec![])]
    #[case(u64::MAX, 10, vec![])]
    #[tokio::test]
    async fn find_page_respects_window(
        store: InMemoryUserStore,
        #[case] skip: u64,
        #[case] limit: u32,
        #[case] expected: Vec<&str>,
    ) {
        let page = store.find_page(skip, limit).await.expect("page");
        let ids: Vec<String> = page.iter().map(|user| user.id.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn count_by_field_merges_case_variants(store: InMemoryUserStore) {
        let groups = store
            .count_by_field(UserField::Gender)
            .await
            .expect("groups");
        assert_eq!(
            groups,
            vec![
                GroupCount::new("male", 2),
                GroupCount::new("female", 1),
                GroupCount::new("", 1),
            ]
        );
    }
}
