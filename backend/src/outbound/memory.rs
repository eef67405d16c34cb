//! In-memory `ParcelRepository` adapter.
//!
//! Parcels live in a `Vec` in insertion order behind a `tokio::sync::RwLock`.
//! Each operation takes the lock exactly once, so every call is atomic with
//! respect to the others. Lookups are linear scans.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ParcelRepository, ParcelRepositoryError};
use crate::domain::{PageRequest, Parcel, ParcelFilter, ParcelId, ParcelStats, ParcelTally};

/// Ordered, process-local parcel store.
#[derive(Debug, Default)]
pub struct InMemoryParcelRepository {
    parcels: RwLock<Vec<Parcel>>,
}

impl InMemoryParcelRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `parcels`, in the given order.
    ///
    /// Later duplicates of an id are dropped.
    #[must_use]
    pub fn with_parcels(parcels: impl IntoIterator<Item = Parcel>) -> Self {
        let mut stored: Vec<Parcel> = Vec::new();
        for parcel in parcels {
            if !stored.iter().any(|existing| existing.id() == parcel.id()) {
                stored.push(parcel);
            }
        }
        Self {
            parcels: RwLock::new(stored),
        }
    }
}

fn position(parcels: &[Parcel], id: &ParcelId) -> Option<usize> {
    parcels.iter().position(|parcel| parcel.id() == id)
}

#[async_trait]
impl ParcelRepository for InMemoryParcelRepository {
    async fn list(&self, page: PageRequest) -> Result<Vec<Parcel>, ParcelRepositoryError> {
        let parcels = self.parcels.read().await;
        Ok(page.apply(parcels.iter().cloned()))
    }

    async fn find_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, ParcelRepositoryError> {
        let parcels = self.parcels.read().await;
        Ok(parcels.iter().find(|parcel| parcel.id() == id).cloned())
    }

    async fn search(&self, filter: &ParcelFilter) -> Result<Vec<Parcel>, ParcelRepositoryError> {
        let parcels = self.parcels.read().await;
        Ok(parcels
            .iter()
            .filter(|parcel| filter.matches(parcel))
            .cloned()
            .collect())
    }

    async fn stats(&self) -> Result<ParcelStats, ParcelRepositoryError> {
        let parcels = self.parcels.read().await;
        let tally = parcels.iter().fold(ParcelTally::default(), |mut tally, parcel| {
            tally.total += 1;
            if parcel.is_buildable() {
                tally.buildable += 1;
            }
            tally.total_area_m2 += parcel.area_m2();
            tally
        });
        Ok(ParcelStats::from_tally(tally))
    }

    async fn create(&self, parcel: &Parcel) -> Result<Parcel, ParcelRepositoryError> {
        let mut parcels = self.parcels.write().await;
        if position(&parcels, parcel.id()).is_some() {
            return Err(ParcelRepositoryError::duplicate_id(parcel.id().to_string()));
        }
        parcels.push(parcel.clone());
        Ok(parcel.clone())
    }

    async fn update(
        &self,
        id: &ParcelId,
        parcel: &Parcel,
    ) -> Result<Parcel, ParcelRepositoryError> {
        let mut parcels = self.parcels.write().await;
        let slot = position(&parcels, id)
            .and_then(|index| parcels.get_mut(index))
            .ok_or_else(|| ParcelRepositoryError::not_found(id.to_string()))?;
        *slot = parcel.clone().with_id(id.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &ParcelId) -> Result<(), ParcelRepositoryError> {
        let mut parcels = self.parcels.write().await;
        let index =
            position(&parcels, id).ok_or_else(|| ParcelRepositoryError::not_found(id.to_string()))?;
        parcels.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParcelInput;
    use rstest::{fixture, rstest};

    fn parcel(id: &str, canton: &str, area_m2: f64, is_buildable: bool) -> Parcel {
        Parcel::try_new(ParcelInput {
            id: id.to_owned(),
            canton: canton.to_owned(),
            municipality: None,
            area_m2,
            zoning: if is_buildable { "buildable" } else { "agricultural" }.to_owned(),
            is_buildable,
            estimated_value_chf: None,
        })
        .expect("valid parcel")
    }

    fn parcel_id(raw: &str) -> ParcelId {
        ParcelId::new(raw).expect("valid id")
    }

    fn ids(parcels: &[Parcel]) -> Vec<String> {
        parcels.iter().map(|p| p.id().to_string()).collect()
    }

    #[fixture]
    fn repo() -> InMemoryParcelRepository {
        InMemoryParcelRepository::with_parcels([
            parcel("12345", "FR", 1200.0, true),
            parcel("67890", "FR", 800.0, false),
            parcel("2222-A", "ZH", 500.5, true),
        ])
    }

    #[rstest]
    #[case(0, 10, vec!["12345", "67890", "2222-A"])]
    #[case(1, 1, vec!["67890"])]
    #[case(2, 10, vec!["2222-A"])]
    #[case(10, 10, vec![])]
    #[tokio::test]
    async fn list_returns_a_contiguous_window(
        repo: InMemoryParcelRepository,
        #[case] skip: usize,
        #[case] limit: usize,
        #[case] expected: Vec<&str>,
    ) {
        let page = PageRequest::new(Some(skip), Some(limit));
        let parcels = repo.list(page).await.expect("list succeeds");
        assert_eq!(ids(&parcels), expected);
    }

    #[rstest]
    #[case(Some("fr"), None, vec!["12345", "67890"])]
    #[case(Some("FR"), Some(true), vec!["12345"])]
    #[case(None, Some(true), vec!["12345", "2222-A"])]
    #[case(Some("BE"), None, vec![])]
    #[case(None, None, vec!["12345", "67890", "2222-A"])]
    #[tokio::test]
    async fn search_ands_filters_in_natural_order(
        repo: InMemoryParcelRepository,
        #[case] canton: Option<&str>,
        #[case] buildable: Option<bool>,
        #[case] expected: Vec<&str>,
    ) {
        let filter = ParcelFilter {
            canton: canton.map(str::to_owned),
            buildable,
        };
        let parcels = repo.search(&filter).await.expect("search succeeds");
        assert_eq!(ids(&parcels), expected);
    }

    #[tokio::test]
    async fn stats_cover_the_whole_collection() {
        let repo = InMemoryParcelRepository::with_parcels([
            parcel("12345", "FR", 1200.0, true),
            parcel("67890", "FR", 800.0, false),
        ]);
        let stats = repo.stats().await.expect("stats succeed");
        assert_eq!(stats.total_parcels, 2);
        assert_eq!(stats.buildable_percentage, "50.00%");
        assert_eq!(stats.average_area_m2, "1000.00");
    }

    #[tokio::test]
    async fn stats_of_an_empty_store_are_zero() {
        let stats = InMemoryParcelRepository::new()
            .stats()
            .await
            .expect("stats succeed");
        assert_eq!(stats, ParcelStats::empty());
    }

    #[rstest]
    #[tokio::test]
    async fn create_appends_and_rejects_duplicates(repo: InMemoryParcelRepository) {
        let fresh = parcel("2222-B", "ZH", 10.0, true);
        repo.create(&fresh).await.expect("create succeeds");
        let listed = repo.list(PageRequest::default()).await.expect("list");
        assert_eq!(listed.last(), Some(&fresh));

        let duplicate = parcel("12345", "BE", 1.0, false);
        let error = repo.create(&duplicate).await.expect_err("duplicate id");
        assert_eq!(error, ParcelRepositoryError::duplicate_id("12345"));
        let original = repo
            .find_by_id(&parcel_id("12345"))
            .await
            .expect("lookup")
            .expect("still present");
        assert_eq!(original.canton(), "FR");
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_fields_but_keeps_id_and_position(repo: InMemoryParcelRepository) {
        let replacement = parcel("ignored", "BE", 42.0, false);
        let updated = repo
            .update(&parcel_id("67890"), &replacement)
            .await
            .expect("update succeeds");
        assert_eq!(updated.id().as_str(), "67890");
        assert_eq!(updated.canton(), "BE");

        let listed = repo.list(PageRequest::default()).await.expect("list");
        assert_eq!(ids(&listed), ["12345", "67890", "2222-A"]);
    }

    #[rstest]
    #[tokio::test]
    async fn mutations_of_missing_parcels_leave_the_store_untouched(
        repo: InMemoryParcelRepository,
    ) {
        let missing = parcel_id("00000");
        let replacement = parcel("00000", "BE", 1.0, true);
        assert_eq!(
            repo.update(&missing, &replacement).await,
            Err(ParcelRepositoryError::not_found("00000"))
        );
        assert_eq!(
            repo.delete(&missing).await,
            Err(ParcelRepositoryError::not_found("00000"))
        );
        let stats = repo.stats().await.expect("stats");
        assert_eq!(stats.total_parcels, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_exactly_one_parcel(repo: InMemoryParcelRepository) {
        let before = repo.stats().await.expect("stats").total_parcels;
        let id = parcel_id("12345");
        repo.delete(&id).await.expect("delete succeeds");

        let after = repo.stats().await.expect("stats").total_parcels;
        assert_eq!(after, before - 1);
        assert_eq!(repo.find_by_id(&id).await, Ok(None));
        let listed = repo.list(PageRequest::default()).await.expect("list");
        assert_eq!(ids(&listed), ["67890", "2222-A"]);
        assert_eq!(
            repo.delete(&id).await,
            Err(ParcelRepositoryError::not_found("12345"))
        );
    }

    #[tokio::test]
    async fn list_honours_limits_beyond_one_hundred() {
        let repo = InMemoryParcelRepository::with_parcels(
            (0..150).map(|n| parcel(&format!("P-{n}"), "FR", 10.0, true)),
        );
        let page = PageRequest::new(Some(0), Some(150));
        let parcels = repo.list(page).await.expect("list succeeds");
        assert_eq!(parcels.len(), 150);
    }

    #[tokio::test]
    async fn search_folds_non_ascii_cantons() {
        let repo = InMemoryParcelRepository::with_parcels([
            parcel("1", "ÄR", 10.0, true),
            parcel("2", "AR", 10.0, true),
        ]);
        let filter = ParcelFilter {
            canton: Some("är".to_owned()),
            buildable: None,
        };
        let parcels = repo.search(&filter).await.expect("search succeeds");
        assert_eq!(ids(&parcels), ["1"]);
    }

    #[rstest]
    fn with_parcels_drops_later_duplicates() {
        let repo = InMemoryParcelRepository::with_parcels([
            parcel("1", "FR", 1.0, true),
            parcel("1", "ZH", 2.0, true),
        ]);
        let stored = repo.parcels.try_read().expect("uncontended lock");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.first().map(Parcel::canton), Some("FR"));
    }
}
