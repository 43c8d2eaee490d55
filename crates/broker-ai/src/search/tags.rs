use super::property::PropertyCategory::{self, *};
use serde::Serialize;

/// A search condition with no queryable column behind it; it only ever
/// contributes a display tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagCondition {
    pub key: &'static str,
    pub label: &'static str,
    pub categories: &'static [PropertyCategory],
}

const RESIDENTIAL: &[PropertyCategory] = &[Apartment, Officetel, Villa, House];
const RESIDENTIAL_AND_COMMERCIAL: &[PropertyCategory] =
    &[Apartment, Officetel, Villa, House, Store, Office, Building];
const INDUSTRIAL: &[PropertyCategory] = &[Factory, Warehouse];
const LAND: &[PropertyCategory] = &[Land];
const LAND_AND_INDUSTRIAL: &[PropertyCategory] = &[Land, Factory, Warehouse];
const MOVE_IN: &[PropertyCategory] = &[
    Apartment, Officetel, Villa, House, Store, Office, Building, Factory, Warehouse,
];

const TAG_CONDITIONS: [TagCondition; 13] = [
    TagCondition {
        key: "walk_minutes",
        label: "역세권",
        categories: RESIDENTIAL_AND_COMMERCIAL,
    },
    TagCondition {
        key: "school_walk_minutes",
        label: "학세권",
        categories: RESIDENTIAL,
    },
    TagCondition {
        key: "park_walk_minutes",
        label: "숲세권",
        categories: RESIDENTIAL,
    },
    TagCondition {
        key: "truck_access",
        label: "화물차 진입",
        categories: INDUSTRIAL,
    },
    TagCondition {
        key: "loading_dock",
        label: "하역장",
        categories: INDUSTRIAL,
    },
    TagCondition {
        key: "cold_storage",
        label: "냉장·냉동 창고",
        categories: INDUSTRIAL,
    },
    TagCondition {
        key: "min_ceiling_height",
        label: "높은 층고",
        categories: INDUSTRIAL,
    },
    TagCondition {
        key: "min_power_kw",
        label: "대용량 전력",
        categories: INDUSTRIAL,
    },
    TagCondition {
        key: "developable",
        label: "개발 가능",
        categories: LAND,
    },
    TagCondition {
        key: "min_road_frontage",
        label: "도로 접면",
        categories: LAND,
    },
    TagCondition {
        key: "max_slope",
        label: "완경사",
        categories: LAND,
    },
    TagCondition {
        key: "good_road_access",
        label: "도로 접근성 양호",
        categories: LAND_AND_INDUSTRIAL,
    },
    TagCondition {
        key: "immediate_move_in",
        label: "즉시 입주",
        categories: MOVE_IN,
    },
];

/// Every tag-only condition with the property categories it applies to.
pub fn tag_conditions() -> &'static [TagCondition] {
    &TAG_CONDITIONS
}

pub fn find_tag_condition(key: &str) -> Option<&'static TagCondition> {
    TAG_CONDITIONS.iter().find(|condition| condition.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CategoryGroup;

    #[test]
    fn catalog_has_thirteen_unique_keys() {
        let mut keys: Vec<&str> = tag_conditions().iter().map(|c| c.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 13);
    }

    #[test]
    fn every_condition_applies_somewhere() {
        assert!(tag_conditions().iter().all(|c| !c.categories.is_empty()));
    }

    #[test]
    fn land_conditions_only_target_land() {
        let slope = find_tag_condition("max_slope").expect("known key");
        assert!(slope
            .categories
            .iter()
            .all(|category| category.group() == CategoryGroup::Land));
        assert_eq!(find_tag_condition("walk_minutes").map(|c| c.label), Some("역세권"));
        assert!(find_tag_condition("pets_allowed").is_none());
    }
}
