use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::property::PropertyRecord;
use super::tags::find_tag_condition;

/// Condition key → value, in the order the card author wrote them.
pub type ConditionMap = Map<String, Value>;

/// Structured query criteria. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_built_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pets_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_parking_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_elevator: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_urgent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_maintenance_fee: Option<f64>,
}

impl PropertyFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Checks that run against fetched listings because no column expresses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientPredicate {
    /// Floor equals the building's total floor count; both must be known.
    TopFloor,
}

impl ClientPredicate {
    pub fn matches(&self, property: &PropertyRecord) -> bool {
        match self {
            Self::TopFloor => match (property.floor, property.total_floors) {
                (Some(floor), Some(total)) => floor == total,
                _ => false,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedConditions {
    pub filters: PropertyFilters,
    pub tags: Vec<String>,
    pub client_filters: Vec<ClientPredicate>,
    /// Keys that matched no known condition.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_keys: Vec<String>,
}

impl ResolvedConditions {
    /// True when every client-side predicate accepts `property`.
    pub fn matches_client(&self, property: &PropertyRecord) -> bool {
        self.client_filters
            .iter()
            .all(|predicate| predicate.matches(property))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AutoCondition {
    BuiltWithinYears,
    PetsAllowed,
    MinParkingRatio,
    Direction,
    HasElevator,
    Urgent,
    MaxMaintenanceFee,
    TopFloor,
}

impl AutoCondition {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "built_within_years" => Some(Self::BuiltWithinYears),
            "pets_allowed" => Some(Self::PetsAllowed),
            "min_parking_ratio" => Some(Self::MinParkingRatio),
            "direction" => Some(Self::Direction),
            "has_elevator" => Some(Self::HasElevator),
            "is_urgent" => Some(Self::Urgent),
            "max_maintenance_fee" => Some(Self::MaxMaintenanceFee),
            "is_top_floor" => Some(Self::TopFloor),
            _ => None,
        }
    }

    /// Applies the condition; `false` when the value has the wrong shape.
    fn apply(self, value: &Value, current_year: i32, out: &mut ResolvedConditions) -> bool {
        let filters = &mut out.filters;
        match self {
            Self::BuiltWithinYears => match as_number(value) {
                Some(years) if years >= 0.0 => {
                    filters.min_built_year = Some(current_year - years.trunc() as i32);
                    true
                }
                _ => false,
            },
            Self::PetsAllowed => apply_flag(value, &mut filters.pets_allowed),
            Self::HasElevator => apply_flag(value, &mut filters.has_elevator),
            Self::Urgent => apply_flag(value, &mut filters.is_urgent),
            Self::MinParkingRatio => apply_number(value, &mut filters.min_parking_ratio),
            Self::MaxMaintenanceFee => apply_number(value, &mut filters.max_maintenance_fee),
            Self::Direction => match value.as_str().map(str::trim) {
                Some(direction) if !direction.is_empty() => {
                    filters.direction = Some(direction.to_string());
                    true
                }
                _ => false,
            },
            Self::TopFloor => match as_flag(value) {
                Some(true) => {
                    out.client_filters.push(ClientPredicate::TopFloor);
                    true
                }
                Some(false) => true,
                None => false,
            },
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Boolean filters match the listing field against the given value, so
/// `false` selects listings where the field is false.
fn apply_flag(value: &Value, slot: &mut Option<bool>) -> bool {
    match as_flag(value) {
        Some(flag) => {
            *slot = Some(flag);
            true
        }
        None => false,
    }
}

fn apply_number(value: &Value, slot: &mut Option<f64>) -> bool {
    match as_number(value) {
        Some(number) => {
            *slot = Some(number);
            true
        }
        None => false,
    }
}

/// Turns quick-search condition maps into filters, tags, and predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionResolver {
    current_year: i32,
}

impl ConditionResolver {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn for_today() -> Self {
        Self::new(Local::now().year())
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn resolve(
        &self,
        conditions: &ConditionMap,
        label: &str,
        is_custom: bool,
    ) -> ResolvedConditions {
        let mut resolved = ResolvedConditions::default();

        if is_custom {
            resolved.tags.push(label.to_string());
            return resolved;
        }

        for (key, value) in conditions {
            if let Some(condition) = AutoCondition::from_key(key) {
                if !condition.apply(value, self.current_year, &mut resolved) {
                    warn!(card = label, key = %key, value = %value, "condition value has unexpected type");
                }
            } else if let Some(tag) = find_tag_condition(key) {
                resolved.tags.push(tag.label.to_string());
            } else {
                warn!(card = label, key = %key, "ignoring unrecognized quick-search condition");
                resolved.ignored_keys.push(key.clone());
            }
        }

        resolved
    }
}

/// Resolves against the current calendar year.
pub fn resolve_conditions(
    conditions: &ConditionMap,
    label: &str,
    is_custom: bool,
) -> ResolvedConditions {
    ConditionResolver::for_today().resolve(conditions, label, is_custom)
}
