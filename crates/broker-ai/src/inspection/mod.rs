//! Property inspection checklists and their letter grades.

pub mod domain;
mod grading;
mod import;
pub mod router;
mod template;

pub use domain::{
    ChecklistItem, ChecklistItemId, Grade, Inspection, InspectionError, InspectionStatus,
    ItemStatus,
};
pub use grading::{breakdown, grade, GradeBreakdown};
pub use import::{ChecklistImportError, ChecklistImporter};
pub use router::inspection_router;
pub use template::{ChecklistCategory, ChecklistTemplate};
