use super::grading::{self, GradeBreakdown};
use super::template::ChecklistTemplate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistItemId(pub String);

impl std::fmt::Display for ChecklistItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Good,
    Fair,
    Bad,
}

impl ItemStatus {
    /// Accepts the stored English value or the Korean display label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "good" | "양호" => Some(Self::Good),
            "fair" | "normal" | "보통" => Some(Self::Fair),
            "bad" | "poor" | "불량" => Some(Self::Bad),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::A => "최상",
            Self::B => "양호",
            Self::C => "보통",
            Self::D => "미흡",
            Self::F => "불량",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub category: String,
    pub label: String,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, category: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: ChecklistItemId(id.into()),
            category: category.into(),
            label: label.into(),
            status: None,
            note: None,
            photo_url: None,
        }
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_rated(&self) -> bool {
        self.status.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    InProgress,
    Completed,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InspectionError {
    #[error("checklist item {0} does not exist")]
    UnknownItem(ChecklistItemId),
    #[error("inspection was completed on {0} and can no longer be edited")]
    Completed(NaiveDate),
}

/// A checklist under evaluation. The grade is always derived from the items
/// and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub property_id: String,
    items: Vec<ChecklistItem>,
    completed_on: Option<NaiveDate>,
}

impl Inspection {
    /// Opens an inspection with one unrated item per template entry.
    pub fn open(property_id: impl Into<String>, template: &ChecklistTemplate) -> Self {
        Self::from_items(property_id, template.instantiate())
    }

    pub fn from_items(property_id: impl Into<String>, items: Vec<ChecklistItem>) -> Self {
        Self {
            property_id: property_id.into(),
            items,
            completed_on: None,
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn status(&self) -> InspectionStatus {
        match self.completed_on {
            Some(_) => InspectionStatus::Completed,
            None => InspectionStatus::InProgress,
        }
    }

    pub fn completed_on(&self) -> Option<NaiveDate> {
        self.completed_on
    }

    pub fn set_status(
        &mut self,
        id: &str,
        status: Option<ItemStatus>,
    ) -> Result<(), InspectionError> {
        self.item_mut(id)?.status = status;
        Ok(())
    }

    pub fn set_note(&mut self, id: &str, note: Option<String>) -> Result<(), InspectionError> {
        self.item_mut(id)?.note = note.filter(|text| !text.trim().is_empty());
        Ok(())
    }

    pub fn set_photo(&mut self, id: &str, photo_url: Option<String>) -> Result<(), InspectionError> {
        self.item_mut(id)?.photo_url = photo_url;
        Ok(())
    }

    pub fn grade(&self) -> Grade {
        grading::grade(&self.items)
    }

    pub fn breakdown(&self) -> GradeBreakdown {
        grading::breakdown(&self.items)
    }

    /// Freezes the checklist and returns its final grade.
    pub fn complete(&mut self, on: NaiveDate) -> Result<Grade, InspectionError> {
        if let Some(completed) = self.completed_on {
            return Err(InspectionError::Completed(completed));
        }
        self.completed_on = Some(on);
        Ok(self.grade())
    }

    fn item_mut(&mut self, id: &str) -> Result<&mut ChecklistItem, InspectionError> {
        if let Some(completed) = self.completed_on {
            return Err(InspectionError::Completed(completed));
        }
        self.items
            .iter_mut()
            .find(|item| item.id.0 == id)
            .ok_or_else(|| InspectionError::UnknownItem(ChecklistItemId(id.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> Inspection {
        Inspection::open("listing-17", &ChecklistTemplate::standard())
    }

    #[test]
    fn opening_creates_unrated_items_from_template() {
        let inspection = opened();
        assert_eq!(
            inspection.items().len(),
            ChecklistTemplate::standard().item_count()
        );
        assert!(inspection.items().iter().all(|item| !item.is_rated()));
        assert_eq!(inspection.status(), InspectionStatus::InProgress);
        assert_eq!(inspection.grade(), Grade::C);
    }

    #[test]
    fn grade_follows_edits_until_completion() {
        let mut inspection = opened();
        let ids: Vec<String> = inspection.items().iter().map(|i| i.id.0.clone()).collect();
        for id in &ids {
            inspection.set_status(id, Some(ItemStatus::Good)).expect("editable");
        }
        assert_eq!(inspection.grade(), Grade::A);

        let half = ids.len() / 2;
        for id in &ids[..half] {
            inspection.set_status(id, Some(ItemStatus::Bad)).expect("editable");
        }
        assert_eq!(inspection.grade(), Grade::F);

        let completed_on = NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date");
        assert_eq!(inspection.complete(completed_on), Ok(Grade::F));
        assert_eq!(inspection.status(), InspectionStatus::Completed);
    }

    #[test]
    fn completed_inspections_reject_edits() {
        let mut inspection = opened();
        let id = inspection.items()[0].id.0.clone();
        let completed_on = NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date");
        inspection.complete(completed_on).expect("completes");

        assert_eq!(
            inspection.set_status(&id, Some(ItemStatus::Bad)),
            Err(InspectionError::Completed(completed_on))
        );
        assert_eq!(
            inspection.set_note(&id, Some("누수 흔적".to_string())),
            Err(InspectionError::Completed(completed_on))
        );
        assert_eq!(
            inspection.complete(completed_on),
            Err(InspectionError::Completed(completed_on))
        );
    }

    #[test]
    fn unknown_items_are_reported() {
        let mut inspection = opened();
        assert_eq!(
            inspection.set_photo("missing", Some("photos/1.jpg".to_string())),
            Err(InspectionError::UnknownItem(ChecklistItemId(
                "missing".to_string()
            )))
        );
    }

    #[test]
    fn blank_notes_are_cleared() {
        let mut inspection = opened();
        let id = inspection.items()[0].id.0.clone();
        inspection
            .set_note(&id, Some("   ".to_string()))
            .expect("editable");
        assert_eq!(inspection.items()[0].note, None);
    }

    #[test]
    fn statuses_parse_from_either_language() {
        assert_eq!(ItemStatus::parse("GOOD"), Some(ItemStatus::Good));
        assert_eq!(ItemStatus::parse(" 불량 "), Some(ItemStatus::Bad));
        assert_eq!(ItemStatus::parse("보통"), Some(ItemStatus::Fair));
        assert_eq!(ItemStatus::parse("excellent"), None);
    }
}
