use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::conditions::{ConditionMap, ConditionResolver, ResolvedConditions};
use crate::cache::Memo;

/// Admin-configured shortcut shown on the search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickSearchCard {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub conditions: ConditionMap,
    #[serde(default)]
    pub is_custom: bool,
}

impl QuickSearchCard {
    pub fn resolve(&self, resolver: &ConditionResolver) -> ResolvedConditions {
        resolver.resolve(&self.conditions, &self.label, self.is_custom)
    }
}

pub trait CardRepository: Send + Sync {
    fn list_cards(&self) -> Result<Vec<QuickSearchCard>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("quick-search card {0} not found")]
    NotFound(String),
    #[error("card repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
pub struct InMemoryCardRepository {
    cards: RwLock<Vec<QuickSearchCard>>,
    loads: AtomicUsize,
}

impl InMemoryCardRepository {
    pub fn new(cards: Vec<QuickSearchCard>) -> Self {
        Self {
            cards: RwLock::new(cards),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn standard() -> Self {
        Self::new(standard_cards())
    }

    pub fn replace(&self, cards: Vec<QuickSearchCard>) {
        *self
            .cards
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = cards;
    }

    /// Number of times `list_cards` has been served.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl CardRepository for InMemoryCardRepository {
    fn list_cards(&self) -> Result<Vec<QuickSearchCard>, RepositoryError> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        let guard = self
            .cards
            .read()
            .map_err(|_| RepositoryError::Unavailable("card lock poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

/// Card lookup and resolution. The card list is memoized per service
/// instance; call [`QuickSearchService::invalidate_cards`] after edits.
pub struct QuickSearchService<R> {
    repository: Arc<R>,
    resolver: ConditionResolver,
    cards: Memo<Vec<QuickSearchCard>>,
}

impl<R> QuickSearchService<R>
where
    R: CardRepository + 'static,
{
    pub fn new(repository: Arc<R>, resolver: ConditionResolver) -> Self {
        Self {
            repository,
            resolver,
            cards: Memo::new(),
        }
    }

    pub fn resolver(&self) -> &ConditionResolver {
        &self.resolver
    }

    pub fn cards(&self) -> Result<Vec<QuickSearchCard>, RepositoryError> {
        self.cards.get_or_try_init(|| self.repository.list_cards())
    }

    pub fn card(&self, id: &str) -> Result<QuickSearchCard, RepositoryError> {
        self.cards()?
            .into_iter()
            .find(|card| card.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    pub fn resolve_card(
        &self,
        id: &str,
    ) -> Result<(QuickSearchCard, ResolvedConditions), RepositoryError> {
        let card = self.card(id)?;
        let resolved = card.resolve(&self.resolver);
        Ok((card, resolved))
    }

    pub fn resolve(
        &self,
        conditions: &ConditionMap,
        label: &str,
        is_custom: bool,
    ) -> ResolvedConditions {
        self.resolver.resolve(conditions, label, is_custom)
    }

    pub fn invalidate_cards(&self) {
        self.cards.invalidate();
    }
}

fn card(id: &str, label: &str, conditions: Value, is_custom: bool) -> QuickSearchCard {
    QuickSearchCard {
        id: id.to_string(),
        label: label.to_string(),
        conditions: match conditions {
            Value::Object(map) => map,
            _ => ConditionMap::new(),
        },
        is_custom,
    }
}

fn standard_cards() -> Vec<QuickSearchCard> {
    vec![
        card("station-area", "역세권 매물", json!({ "walk_minutes": 10 }), false),
        card("pet-friendly", "반려동물 가능", json!({ "pets_allowed": true }), false),
        card("new-build", "신축 5년 이내", json!({ "built_within_years": 5 }), false),
        card(
            "top-floor",
            "탑층",
            json!({ "is_top_floor": true, "has_elevator": true }),
            false,
        ),
        card("urgent-sale", "급매", json!({ "is_urgent": true }), false),
        card(
            "logistics",
            "물류 창고",
            json!({ "truck_access": true, "loading_dock": true, "good_road_access": true }),
            false,
        ),
        card("river-view", "한강뷰", json!({}), true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ClientPredicate, PropertyRecord};

    fn service() -> (Arc<InMemoryCardRepository>, QuickSearchService<InMemoryCardRepository>) {
        let repository = Arc::new(InMemoryCardRepository::standard());
        let service = QuickSearchService::new(repository.clone(), ConditionResolver::new(2026));
        (repository, service)
    }

    #[test]
    fn card_list_is_cached_until_invalidated() {
        let (repository, service) = service();

        assert_eq!(service.cards().expect("cards").len(), 7);
        service.card("pet-friendly").expect("known card");
        assert_eq!(repository.load_count(), 1);

        repository.replace(vec![card("only", "단일", json!({}), true)]);
        assert_eq!(service.cards().expect("cards").len(), 7);

        service.invalidate_cards();
        assert_eq!(service.cards().expect("cards").len(), 1);
        assert_eq!(repository.load_count(), 2);
    }

    #[test]
    fn resolves_seeded_cards() {
        let (_, service) = service();

        let (card, resolved) = service.resolve_card("top-floor").expect("known card");
        assert_eq!(card.label, "탑층");
        assert_eq!(resolved.client_filters, vec![ClientPredicate::TopFloor]);
        assert_eq!(resolved.filters.has_elevator, Some(true));
        assert!(resolved.matches_client(&PropertyRecord::on_floor(Some(12), Some(12))));

        let (_, custom) = service.resolve_card("river-view").expect("known card");
        assert_eq!(custom.tags, vec!["한강뷰".to_string()]);

        let (_, logistics) = service.resolve_card("logistics").expect("known card");
        assert_eq!(logistics.tags, vec!["화물차 진입", "하역장", "도로 접근성 양호"]);
    }

    #[test]
    fn unknown_cards_are_not_found() {
        let (_, service) = service();
        assert!(matches!(
            service.resolve_card("missing"),
            Err(RepositoryError::NotFound(id)) if id == "missing"
        ));
    }
}
