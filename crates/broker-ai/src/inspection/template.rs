use super::domain::ChecklistItem;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub items: Vec<&'static str>,
}

/// Fixed category layout used when an inspection is opened.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistTemplate {
    categories: Vec<ChecklistCategory>,
}

impl ChecklistTemplate {
    pub fn standard() -> Self {
        Self {
            categories: standard_categories(),
        }
    }

    pub fn categories(&self) -> &[ChecklistCategory] {
        &self.categories
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|category| category.items.len()).sum()
    }

    /// Item ids are `<category key>-<1-based position>`, stable across runs.
    pub fn instantiate(&self) -> Vec<ChecklistItem> {
        self.categories
            .iter()
            .flat_map(|category| {
                category.items.iter().enumerate().map(move |(index, label)| {
                    ChecklistItem::new(
                        format!("{}-{:02}", category.key, index + 1),
                        category.label,
                        *label,
                    )
                })
            })
            .collect()
    }
}

fn standard_categories() -> Vec<ChecklistCategory> {
    vec![
        ChecklistCategory {
            key: "exterior",
            label: "외부",
            items: vec!["외벽 균열", "지붕 및 방수", "창호 및 새시", "현관문"],
        },
        ChecklistCategory {
            key: "interior",
            label: "내부",
            items: vec![
                "벽지 및 도배",
                "바닥재",
                "천장 누수 흔적",
                "곰팡이 및 결로",
                "붙박이장 및 수납",
            ],
        },
        ChecklistCategory {
            key: "plumbing",
            label: "수도 및 배관",
            items: vec!["수압", "배수 상태", "온수 공급", "욕실 및 주방 누수"],
        },
        ChecklistCategory {
            key: "systems",
            label: "전기 및 설비",
            items: vec!["전기 콘센트 및 차단기", "조명", "보일러 및 난방", "에어컨"],
        },
        ChecklistCategory {
            key: "safety",
            label: "안전",
            items: vec!["화재감지기", "소화기", "가스 밸브", "방범 설비"],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantiation_assigns_stable_ids_per_category() {
        let template = ChecklistTemplate::standard();
        let items = template.instantiate();

        assert_eq!(items.len(), template.item_count());
        assert_eq!(items[0].id.0, "exterior-01");
        assert_eq!(items[0].category, "외부");
        assert!(items.iter().any(|item| item.id.0 == "safety-04"));

        let again = template.instantiate();
        assert_eq!(items, again);
    }

    #[test]
    fn ids_are_unique() {
        let items = ChecklistTemplate::standard().instantiate();
        let mut ids: Vec<&str> = items.iter().map(|item| item.id.0.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }
}
