//! Directory service
//!
//! Sole entry point for directory mutations and queries. The filtered read
//! path goes through the query cache; every mutation that can change a
//! filtered result clears the whole cache after committing to the store.
//! Commit and clear are two independent steps: a reader racing a mutation
//! can repopulate the cache with pre-mutation data, and that entry survives
//! only until the next invalidating mutation. Order mutations never touch
//! the cache since orders are not filter attributes.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::domain::DomainError;
use crate::domain::freelancer::{Freelancer, FreelancerId, FreelancerRepository};
use crate::domain::order::{Order, OrderId, OrderRepository};
use crate::domain::skill::{Skill, SkillId, SkillRepository};
use crate::infrastructure::cache::QueryCache;

/// Request for creating a freelancer
///
/// Order and skill collections always start empty; they are grown through
/// the dedicated relationship operations.
#[derive(Debug, Clone)]
pub struct CreateFreelancerRequest {
    pub name: String,
    pub category: String,
    pub rating: f64,
    pub hourly_rate: f64,
}

/// Request for updating a freelancer's own fields
///
/// All four fields are overwritten. Order and skill collections are left
/// untouched.
#[derive(Debug, Clone)]
pub struct UpdateFreelancerRequest {
    pub name: String,
    pub category: String,
    pub rating: f64,
    pub hourly_rate: f64,
}

/// Directory service over a store and a query cache
#[derive(Debug)]
pub struct DirectoryService<F, O, S>
where
    F: FreelancerRepository,
    O: OrderRepository,
    S: SkillRepository,
{
    freelancers: Arc<F>,
    orders: Arc<O>,
    skills: Arc<S>,
    cache: Arc<QueryCache>,
}

impl<F, O, S> DirectoryService<F, O, S>
where
    F: FreelancerRepository,
    O: OrderRepository,
    S: SkillRepository,
{
    /// Creates a directory service
    pub fn new(
        freelancers: Arc<F>,
        orders: Arc<O>,
        skills: Arc<S>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            freelancers,
            orders,
            skills,
            cache,
        }
    }

    /// The query cache this service invalidates
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Creates a freelancer with empty order and skill collections
    pub async fn create(&self, request: CreateFreelancerRequest) -> Result<Freelancer, DomainError> {
        let freelancer = Freelancer::new(
            request.name,
            request.category,
            request.rating,
            request.hourly_rate,
        );
        let saved = self.freelancers.save(freelancer).await?;
        self.cache.clear().await;
        info!(id = %saved.id(), "Freelancer created");
        Ok(saved)
    }

    /// Fetches a freelancer by id
    pub async fn get_by_id(&self, id: FreelancerId) -> Result<Freelancer, DomainError> {
        self.freelancers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Freelancer with ID {} not found", id)))
    }

    /// The full, uncached listing
    pub async fn get_all(&self) -> Result<Vec<Freelancer>, DomainError> {
        self.freelancers.find_all().await
    }

    /// Direct category listing, uncached
    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Freelancer>, DomainError> {
        self.freelancers.find_by_category(category).await
    }

    /// The cached read path: freelancers matching the optional category and
    /// skill filters, ascending by id
    ///
    /// Both branches re-sort, so ordering never depends on how the cache or
    /// the store ordered entries internally.
    pub async fn get_freelancers(
        &self,
        category: Option<&str>,
        skill_name: Option<&str>,
    ) -> Result<Vec<Freelancer>, DomainError> {
        let started = Instant::now();

        if let Some(mut freelancers) = self.cache.get(category, skill_name).await {
            freelancers.sort_by_key(|f| f.id());
            info!(
                ?category,
                ?skill_name,
                elapsed_us = started.elapsed().as_micros() as u64,
                "Filtered listing served from cache"
            );
            return Ok(freelancers);
        }

        let mut freelancers = self
            .freelancers
            .find_by_category_and_skill(category, skill_name)
            .await?;
        freelancers.sort_by_key(|f| f.id());

        self.cache
            .put(category, skill_name, freelancers.clone())
            .await;
        info!(
            ?category,
            ?skill_name,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Filtered listing served from store"
        );
        Ok(freelancers)
    }

    /// Overwrites a freelancer's name, category, rating and hourly rate
    pub async fn update(
        &self,
        id: FreelancerId,
        request: UpdateFreelancerRequest,
    ) -> Result<Freelancer, DomainError> {
        let mut freelancer = self.get_by_id(id).await?;
        freelancer.set_name(request.name);
        freelancer.set_category(request.category);
        freelancer.set_rating(request.rating);
        freelancer.set_hourly_rate(request.hourly_rate);

        let saved = self.freelancers.save(freelancer).await?;
        self.cache.clear().await;
        info!(id = %id, "Freelancer updated");
        Ok(saved)
    }

    /// Deletes a freelancer
    pub async fn delete(&self, id: FreelancerId) -> Result<(), DomainError> {
        let freelancer = self.get_by_id(id).await?;
        self.freelancers.delete(freelancer.id()).await?;
        self.cache.clear().await;
        info!(id = %id, "Freelancer deleted");
        Ok(())
    }

    /// Appends a new order to a freelancer's history
    ///
    /// Orders are not filter attributes, so the cache stays valid.
    pub async fn add_order(
        &self,
        freelancer_id: FreelancerId,
        description: &str,
        price: f64,
    ) -> Result<Freelancer, DomainError> {
        let mut freelancer = self.get_by_id(freelancer_id).await?;

        let order = self
            .orders
            .save(Order::new(description, price, freelancer_id))
            .await?;
        let order_id = order.id();
        freelancer.add_order(order);

        let saved = self.freelancers.save(freelancer).await?;
        info!(id = %freelancer_id, order_id = %order_id, "Order added");
        Ok(saved)
    }

    /// Associates a skill with a freelancer, reusing the skill row when the
    /// name already exists anywhere in the system
    pub async fn add_skill(
        &self,
        freelancer_id: FreelancerId,
        skill_name: &str,
    ) -> Result<Freelancer, DomainError> {
        let mut freelancer = self.get_by_id(freelancer_id).await?;

        let skill = match self.skills.find_by_name(skill_name).await? {
            Some(existing) => existing,
            None => self.skills.save(Skill::new(skill_name)).await?,
        };
        let skill_id = skill.id();

        if !freelancer.add_skill(skill) {
            return Err(DomainError::validation(format!(
                "Skill '{}' is already associated with freelancer with ID {}",
                skill_name, freelancer_id
            )));
        }

        let saved = self.freelancers.save(freelancer).await?;
        self.cache.clear().await;
        info!(id = %freelancer_id, skill_id = %skill_id, skill = skill_name, "Skill added");
        Ok(saved)
    }

    /// Deletes an order after verifying it belongs to the given freelancer
    pub async fn delete_order(
        &self,
        freelancer_id: FreelancerId,
        order_id: OrderId,
    ) -> Result<(), DomainError> {
        let mut freelancer = self.get_by_id(freelancer_id).await?;
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Order with ID {} not found", order_id)))?;

        if order.freelancer_id() != freelancer_id {
            return Err(DomainError::validation(format!(
                "Order with ID {} does not belong to freelancer with ID {}",
                order_id, freelancer_id
            )));
        }

        freelancer.remove_order(order_id);
        self.orders.delete(order_id).await?;
        self.freelancers.save(freelancer).await?;
        info!(id = %freelancer_id, order_id = %order_id, "Order deleted");
        Ok(())
    }

    /// Drops a skill association; the skill row itself survives
    pub async fn delete_skill(
        &self,
        freelancer_id: FreelancerId,
        skill_id: SkillId,
    ) -> Result<(), DomainError> {
        let mut freelancer = self.get_by_id(freelancer_id).await?;
        let skill = self
            .skills
            .find_by_id(skill_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Skill with ID {} not found", skill_id)))?;

        if !freelancer.remove_skill(skill.id()) {
            return Err(DomainError::validation(format!(
                "Skill with ID {} is not associated with freelancer with ID {}",
                skill_id, freelancer_id
            )));
        }

        self.freelancers.save(freelancer).await?;
        self.cache.clear().await;
        info!(id = %freelancer_id, skill_id = %skill_id, "Skill removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::infrastructure::storage::{
        InMemoryFreelancerRepository, InMemoryOrderRepository, InMemorySkillRepository,
    };

    type InMemoryService = DirectoryService<
        InMemoryFreelancerRepository,
        InMemoryOrderRepository,
        InMemorySkillRepository,
    >;

    fn setup() -> (InMemoryService, Arc<InMemoryFreelancerRepository>, Arc<QueryCache>) {
        let freelancers = Arc::new(InMemoryFreelancerRepository::new());
        let orders = Arc::new(InMemoryOrderRepository::new());
        let skills = Arc::new(InMemorySkillRepository::new());
        let cache = Arc::new(QueryCache::new());

        let service = DirectoryService::new(
            freelancers.clone(),
            orders,
            skills,
            cache.clone(),
        );
        (service, freelancers, cache)
    }

    fn create_request(name: &str, category: &str) -> CreateFreelancerRequest {
        CreateFreelancerRequest {
            name: name.to_string(),
            category: category.to_string(),
            rating: 4.5,
            hourly_rate: 50.0,
        }
    }

    fn ids(freelancers: &[Freelancer]) -> Vec<i64> {
        freelancers.iter().map(|f| f.id().as_i64()).collect()
    }

    #[tokio::test]
    async fn test_create_starts_with_empty_collections() {
        let (service, _, _) = setup();

        let created = service.create(create_request("Ada", "engineering")).await.unwrap();

        assert!(created.id().is_assigned());
        assert!(created.orders().is_empty());
        assert!(created.skills().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let (service, _, _) = setup();

        let err = service.get_by_id(FreelancerId::new(42)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_and_keeps_collections() {
        let (service, _, _) = setup();

        let created = service.create(create_request("Ada", "engineering")).await.unwrap();
        service.add_skill(created.id(), "rust").await.unwrap();
        service.add_order(created.id(), "api work", 300.0).await.unwrap();

        let updated = service
            .update(
                created.id(),
                UpdateFreelancerRequest {
                    name: "Ada L.".to_string(),
                    category: "consulting".to_string(),
                    rating: 5.0,
                    hourly_rate: 120.0,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "Ada L.");
        assert_eq!(updated.category(), "consulting");
        assert_eq!(updated.rating(), 5.0);
        assert_eq!(updated.hourly_rate(), 120.0);
        assert_eq!(updated.skills().len(), 1);
        assert_eq!(updated.orders().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_freelancer() {
        let (service, _, _) = setup();

        let err = service
            .update(
                FreelancerId::new(9),
                UpdateFreelancerRequest {
                    name: "x".to_string(),
                    category: "y".to_string(),
                    rating: 1.0,
                    hourly_rate: 1.0,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_cached_listing_matches_direct_store_query() {
        let (service, freelancers, cache) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        let b = service.create(create_request("Mina", "design")).await.unwrap();
        service.create(create_request("Noor", "engineering")).await.unwrap();
        service.add_skill(a.id(), "illustration").await.unwrap();
        service.add_skill(b.id(), "illustration").await.unwrap();

        let cached = service
            .get_freelancers(Some("design"), Some("illustration"))
            .await
            .unwrap();
        assert!(cache.contains_key(Some("design"), Some("illustration")));

        let mut direct = freelancers
            .find_by_category_and_skill(Some("design"), Some("illustration"))
            .await
            .unwrap();
        direct.sort_by_key(|f| f.id());

        assert_eq!(ids(&cached), ids(&direct));
        assert_eq!(ids(&cached), vec![a.id().as_i64(), b.id().as_i64()]);
    }

    #[tokio::test]
    async fn test_cache_hit_is_resorted() {
        let (service, _, cache) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        let b = service.create(create_request("Mina", "design")).await.unwrap();

        // Entry populated out of order, as a racing writer might leave it.
        cache
            .put(Some("design"), None, vec![b.clone(), a.clone()])
            .await;

        let listed = service.get_freelancers(Some("design"), None).await.unwrap();
        assert_eq!(ids(&listed), vec![a.id().as_i64(), b.id().as_i64()]);
    }

    #[tokio::test]
    async fn test_filter_mutations_clear_the_cache() {
        let (service, _, cache) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        let skill_id = {
            let with_skill = service.add_skill(a.id(), "illustration").await.unwrap();
            with_skill.skills()[0].id()
        };

        // create
        service.get_freelancers(None, None).await.unwrap();
        assert!(cache.contains_key(None, None));
        service.create(create_request("Mina", "design")).await.unwrap();
        assert_eq!(cache.entry_count().await, 0);

        // update
        service.get_freelancers(None, None).await.unwrap();
        service
            .update(
                a.id(),
                UpdateFreelancerRequest {
                    name: "Ada".to_string(),
                    category: "design".to_string(),
                    rating: 4.8,
                    hourly_rate: 55.0,
                },
            )
            .await
            .unwrap();
        assert_eq!(cache.entry_count().await, 0);

        // add_skill
        service.get_freelancers(None, None).await.unwrap();
        service.add_skill(a.id(), "branding").await.unwrap();
        assert_eq!(cache.entry_count().await, 0);

        // delete_skill
        service.get_freelancers(None, None).await.unwrap();
        service.delete_skill(a.id(), skill_id).await.unwrap();
        assert_eq!(cache.entry_count().await, 0);

        // delete
        service.get_freelancers(None, None).await.unwrap();
        service.delete(a.id()).await.unwrap();
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_order_mutations_leave_the_cache_alone() {
        let (service, _, cache) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        let before = service.get_freelancers(Some("design"), None).await.unwrap();
        assert!(cache.contains_key(Some("design"), None));

        let with_order = service.add_order(a.id(), "poster", 80.0).await.unwrap();
        assert!(cache.contains_key(Some("design"), None));

        // The surviving entry still carries the pre-order snapshot.
        let cached = cache.get(Some("design"), None).await.unwrap();
        assert_eq!(ids(&cached), ids(&before));
        assert!(cached[0].orders().is_empty());

        service
            .delete_order(a.id(), with_order.orders()[0].id())
            .await
            .unwrap();
        assert!(cache.contains_key(Some("design"), None));
    }

    #[tokio::test]
    async fn test_add_skill_twice_is_a_validation_error() {
        let (service, _, _) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();

        let first = service.add_skill(a.id(), "illustration").await.unwrap();
        assert_eq!(first.skills().len(), 1);
        assert_eq!(first.skills()[0].name(), "illustration");

        let err = service.add_skill(a.id(), "illustration").await.unwrap_err();
        assert!(err.is_validation());

        let reloaded = service.get_by_id(a.id()).await.unwrap();
        assert_eq!(reloaded.skills().len(), 1);
    }

    #[tokio::test]
    async fn test_add_skill_reuses_existing_row() {
        let (service, _, _) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        let b = service.create(create_request("Mina", "design")).await.unwrap();

        let a_with_skill = service.add_skill(a.id(), "illustration").await.unwrap();
        let b_with_skill = service.add_skill(b.id(), "illustration").await.unwrap();

        assert_eq!(
            a_with_skill.skills()[0].id(),
            b_with_skill.skills()[0].id()
        );
    }

    #[tokio::test]
    async fn test_add_skill_missing_freelancer() {
        let (service, _, _) = setup();

        let err = service
            .add_skill(FreelancerId::new(7), "illustration")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_order_checks_ownership() {
        let (service, _, _) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        let b = service.create(create_request("Mina", "design")).await.unwrap();
        let b_with_order = service.add_order(b.id(), "poster", 80.0).await.unwrap();
        let foreign_order = b_with_order.orders()[0].id();

        let err = service.delete_order(a.id(), foreign_order).await.unwrap_err();
        assert!(err.is_validation());

        let err = service
            .delete_order(a.id(), OrderId::new(999))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        // The rightful owner can delete it.
        service.delete_order(b.id(), foreign_order).await.unwrap();
        let reloaded = service.get_by_id(b.id()).await.unwrap();
        assert!(reloaded.orders().is_empty());
    }

    #[tokio::test]
    async fn test_delete_skill_distinguishes_missing_from_unassociated() {
        let (service, _, _) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        let b = service.create(create_request("Mina", "design")).await.unwrap();
        let b_with_skill = service.add_skill(b.id(), "illustration").await.unwrap();
        let skill_id = b_with_skill.skills()[0].id();

        let err = service
            .delete_skill(a.id(), SkillId::new(999))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service.delete_skill(a.id(), skill_id).await.unwrap_err();
        assert!(err.is_validation());

        service.delete_skill(b.id(), skill_id).await.unwrap();
        let reloaded = service.get_by_id(b.id()).await.unwrap();
        assert!(reloaded.skills().is_empty());
    }

    #[tokio::test]
    async fn test_delete_skill_keeps_the_skill_row() {
        let (service, _, _) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        let with_skill = service.add_skill(a.id(), "illustration").await.unwrap();
        let skill_id = with_skill.skills()[0].id();

        service.delete_skill(a.id(), skill_id).await.unwrap();

        // Re-adding the name picks the surviving row back up.
        let re_added = service.add_skill(a.id(), "illustration").await.unwrap();
        assert_eq!(re_added.skills()[0].id(), skill_id);
    }

    #[tokio::test]
    async fn test_design_scenario() {
        let (service, _, cache) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        let with_skill = service.add_skill(a.id(), "illustration").await.unwrap();
        let skill_id = with_skill.skills()[0].id();

        let miss = service
            .get_freelancers(Some("design"), Some("illustration"))
            .await
            .unwrap();
        assert_eq!(ids(&miss), vec![a.id().as_i64()]);
        assert!(cache.contains_key(Some("design"), Some("illustration")));

        let hit = service
            .get_freelancers(Some("design"), Some("illustration"))
            .await
            .unwrap();
        assert_eq!(ids(&hit), vec![a.id().as_i64()]);

        service.delete_skill(a.id(), skill_id).await.unwrap();
        assert!(!cache.contains_key(Some("design"), Some("illustration")));

        let fresh = service
            .get_freelancers(Some("design"), Some("illustration"))
            .await
            .unwrap();
        assert!(fresh.is_empty());
    }

    #[tokio::test]
    async fn test_staleness_window_heals_on_next_invalidation() {
        let (service, freelancers, cache) = setup();

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        service.get_freelancers(Some("design"), None).await.unwrap();

        // A store-side change lands without going through the service,
        // standing in for the gap between a mutation's commit and its
        // clear() call.
        let mut stale_copy = a.clone();
        stale_copy.set_category("engineering");
        freelancers.save(stale_copy).await.unwrap();

        // The pre-mutation entry is still served.
        let stale = service.get_freelancers(Some("design"), None).await.unwrap();
        assert_eq!(ids(&stale), vec![a.id().as_i64()]);

        // Any invalidating mutation heals the window.
        service.create(create_request("Mina", "writing")).await.unwrap();
        let fresh = service.get_freelancers(Some("design"), None).await.unwrap();
        assert!(fresh.is_empty());
        assert!(cache.contains_key(Some("design"), None));
    }

    #[derive(Debug, Default)]
    struct FailingSaveRepository {
        inner: InMemoryFreelancerRepository,
        fail_saves: AtomicBool,
    }

    impl FailingSaveRepository {
        fn fail_next_saves(&self) {
            self.fail_saves.store(true, Ordering::Relaxed);
        }
    }

    #[async_trait]
    impl FreelancerRepository for FailingSaveRepository {
        async fn save(&self, freelancer: Freelancer) -> Result<Freelancer, DomainError> {
            if self.fail_saves.load(Ordering::Relaxed) {
                return Err(DomainError::storage("injected save failure"));
            }
            self.inner.save(freelancer).await
        }

        async fn find_by_id(&self, id: FreelancerId) -> Result<Option<Freelancer>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn delete(&self, id: FreelancerId) -> Result<bool, DomainError> {
            self.inner.delete(id).await
        }

        async fn find_all(&self) -> Result<Vec<Freelancer>, DomainError> {
            self.inner.find_all().await
        }

        async fn find_by_category(&self, category: &str) -> Result<Vec<Freelancer>, DomainError> {
            self.inner.find_by_category(category).await
        }

        async fn find_by_category_and_skill(
            &self,
            category: Option<&str>,
            skill_name: Option<&str>,
        ) -> Result<Vec<Freelancer>, DomainError> {
            self.inner.find_by_category_and_skill(category, skill_name).await
        }
    }

    #[tokio::test]
    async fn test_rejected_mutation_leaves_the_cache_intact() {
        let freelancers = Arc::new(FailingSaveRepository::default());
        let cache = Arc::new(QueryCache::new());
        let service = DirectoryService::new(
            freelancers.clone(),
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(InMemorySkillRepository::new()),
            cache.clone(),
        );

        let a = service.create(create_request("Ada", "design")).await.unwrap();
        service.get_freelancers(Some("design"), None).await.unwrap();
        assert!(cache.contains_key(Some("design"), None));

        freelancers.fail_next_saves();
        let err = service
            .update(
                a.id(),
                UpdateFreelancerRequest {
                    name: "Ada".to_string(),
                    category: "engineering".to_string(),
                    rating: 4.5,
                    hourly_rate: 50.0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));

        // Nothing changed in the store, so nothing was invalidated.
        assert!(cache.contains_key(Some("design"), None));
    }
}
