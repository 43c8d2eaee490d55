//! Quick-search cards: declarative condition maps resolved into query
//! filters, display tags, and client-side predicates.

pub mod catalog;
mod conditions;
mod property;
pub mod router;
mod tags;

pub use catalog::{
    CardRepository, InMemoryCardRepository, QuickSearchCard, QuickSearchService, RepositoryError,
};
pub use conditions::{
    resolve_conditions, ClientPredicate, ConditionMap, ConditionResolver, PropertyFilters,
    ResolvedConditions,
};
pub use property::{CategoryGroup, PropertyCategory, PropertyRecord};
pub use router::quick_search_router;
pub use tags::{find_tag_condition, tag_conditions, TagCondition};
