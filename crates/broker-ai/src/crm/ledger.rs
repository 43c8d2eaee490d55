use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::engagement::ActivityType;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub String);

/// Storage for running engagement totals.
///
/// `increment` must apply the delta atomically with respect to other callers
/// (a single "add N" operation, never a separate read and write).
pub trait EngagementStore: Send + Sync {
    fn increment(&self, customer: &CustomerId, delta: u32) -> Result<u64, StoreError>;
    fn score(&self, customer: &CustomerId) -> Result<Option<u64>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("engagement store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryEngagementStore {
    scores: Arc<Mutex<HashMap<CustomerId, u64>>>,
}

impl EngagementStore for InMemoryEngagementStore {
    fn increment(&self, customer: &CustomerId, delta: u32) -> Result<u64, StoreError> {
        let mut guard = self
            .scores
            .lock()
            .map_err(|_| StoreError::Unavailable("engagement mutex poisoned".to_string()))?;
        let total = guard.entry(customer.clone()).or_insert(0);
        *total = total.saturating_add(u64::from(delta));
        Ok(*total)
    }

    fn score(&self, customer: &CustomerId) -> Result<Option<u64>, StoreError> {
        let guard = self
            .scores
            .lock()
            .map_err(|_| StoreError::Unavailable("engagement mutex poisoned".to_string()))?;
        Ok(guard.get(customer).copied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityOutcome {
    pub customer_id: CustomerId,
    pub activity_type: String,
    pub recognized: bool,
    pub increment: u32,
    pub total: u64,
}

/// Applies activity points to customer totals through an [`EngagementStore`].
pub struct EngagementService<S> {
    store: Arc<S>,
}

impl<S> EngagementService<S>
where
    S: EngagementStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn record_activity(
        &self,
        customer: &CustomerId,
        activity_type: &str,
    ) -> Result<ActivityOutcome, StoreError> {
        let Some(activity) = ActivityType::from_label(activity_type) else {
            warn!(customer = %customer.0, activity_type, "ignoring unrecognized activity type");
            let total = self.store.score(customer)?.unwrap_or(0);
            return Ok(ActivityOutcome {
                customer_id: customer.clone(),
                activity_type: activity_type.to_string(),
                recognized: false,
                increment: 0,
                total,
            });
        };

        let increment = activity.points();
        let total = self.store.increment(customer, increment)?;
        debug!(customer = %customer.0, activity = activity.label(), increment, total, "engagement recorded");

        Ok(ActivityOutcome {
            customer_id: customer.clone(),
            activity_type: activity.label().to_string(),
            recognized: true,
            increment,
            total,
        })
    }

    pub fn score(&self, customer: &CustomerId) -> Result<u64, StoreError> {
        Ok(self.store.score(customer)?.unwrap_or(0))
    }
}
