use super::domain::{ChecklistItem, ChecklistItemId, ItemStatus};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ChecklistImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownStatus { row: usize, value: String },
}

impl std::fmt::Display for ChecklistImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecklistImportError::Io(err) => write!(f, "failed to read checklist export: {}", err),
            ChecklistImportError::Csv(err) => write!(f, "invalid checklist CSV data: {}", err),
            ChecklistImportError::UnknownStatus { row, value } => {
                write!(f, "row {}: unrecognized status '{}'", row, value)
            }
        }
    }
}

impl std::error::Error for ChecklistImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChecklistImportError::Io(err) => Some(err),
            ChecklistImportError::Csv(err) => Some(err),
            ChecklistImportError::UnknownStatus { .. } => None,
        }
    }
}

impl From<std::io::Error> for ChecklistImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ChecklistImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads checklist exports (`ID,Category,Item,Status,Note,Photo`).
pub struct ChecklistImporter;

impl ChecklistImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ChecklistItem>, ChecklistImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ChecklistItem>, ChecklistImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut items = Vec::new();

        for (index, record) in csv_reader.deserialize::<ChecklistRow>().enumerate() {
            let row = record?;
            // Header is line 1.
            let line = index + 2;

            let status = match row.status.as_deref() {
                None => None,
                Some(raw) => Some(ItemStatus::parse(raw).ok_or_else(|| {
                    ChecklistImportError::UnknownStatus {
                        row: line,
                        value: raw.to_string(),
                    }
                })?),
            };

            items.push(ChecklistItem {
                id: ChecklistItemId(row.id.unwrap_or_else(|| format!("row-{line}"))),
                category: row.category,
                label: row.item,
                status,
                note: row.note,
                photo_url: row.photo,
            });
        }

        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct ChecklistRow {
    #[serde(rename = "ID", default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "Note", default, deserialize_with = "empty_string_as_none")]
    note: Option<String>,
    #[serde(rename = "Photo", default, deserialize_with = "empty_string_as_none")]
    photo: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
