use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    View,
    Favorite,
    Inquiry,
    Appointment,
    ContractView,
}

impl ActivityType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::View,
            Self::Favorite,
            Self::Inquiry,
            Self::Appointment,
            Self::ContractView,
        ]
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "view" => Some(Self::View),
            "favorite" => Some(Self::Favorite),
            "inquiry" => Some(Self::Inquiry),
            "appointment" => Some(Self::Appointment),
            "contract_view" => Some(Self::ContractView),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Favorite => "favorite",
            Self::Inquiry => "inquiry",
            Self::Appointment => "appointment",
            Self::ContractView => "contract_view",
        }
    }

    pub const fn points(self) -> u32 {
        match self {
            Self::View => 5,
            Self::Favorite => 10,
            Self::Inquiry => 20,
            Self::Appointment => 30,
            Self::ContractView => 40,
        }
    }
}

/// Score delta for an activity label; unknown labels earn nothing.
pub fn score_increment(activity_type: &str) -> u32 {
    ActivityType::from_label(activity_type).map_or(0, ActivityType::points)
}
