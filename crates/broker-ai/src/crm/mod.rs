//! Customer engagement scoring.

mod engagement;
pub mod ledger;
pub mod router;

pub use engagement::{score_increment, ActivityType};
pub use ledger::{
    ActivityOutcome, CustomerId, EngagementService, EngagementStore, InMemoryEngagementStore,
    StoreError,
};
pub use router::engagement_router;
