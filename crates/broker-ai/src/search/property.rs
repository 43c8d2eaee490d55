use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    Residential,
    Commercial,
    Land,
    Industrial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    Apartment,
    Officetel,
    Villa,
    House,
    Store,
    Office,
    Building,
    Land,
    Factory,
    Warehouse,
}

impl PropertyCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Apartment => "아파트",
            Self::Officetel => "오피스텔",
            Self::Villa => "빌라",
            Self::House => "단독주택",
            Self::Store => "상가",
            Self::Office => "사무실",
            Self::Building => "건물",
            Self::Land => "토지",
            Self::Factory => "공장",
            Self::Warehouse => "창고",
        }
    }

    pub const fn group(self) -> CategoryGroup {
        match self {
            Self::Apartment | Self::Officetel | Self::Villa | Self::House => {
                CategoryGroup::Residential
            }
            Self::Store | Self::Office | Self::Building => CategoryGroup::Commercial,
            Self::Land => CategoryGroup::Land,
            Self::Factory | Self::Warehouse => CategoryGroup::Industrial,
        }
    }
}

/// Listing fields client-side predicates can inspect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub total_floors: Option<i32>,
}

impl PropertyRecord {
    pub fn on_floor(floor: Option<i32>, total_floors: Option<i32>) -> Self {
        Self {
            floor,
            total_floors,
        }
    }
}
