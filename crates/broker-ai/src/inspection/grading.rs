use super::domain::{ChecklistItem, Grade, ItemStatus};
use serde::Serialize;

const FAIL_BAD_RATIO: f64 = 0.40;
const POOR_BAD_RATIO: f64 = 0.25;
const EXCELLENT_GOOD_RATIO: f64 = 0.80;
const GOOD_GOOD_RATIO: f64 = 0.60;

/// Counts behind a grade. Only rated items contribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeBreakdown {
    pub rated: usize,
    pub good: usize,
    pub fair: usize,
    pub bad: usize,
    pub good_ratio: f64,
    pub bad_ratio: f64,
    pub grade: Grade,
}

pub fn breakdown(items: &[ChecklistItem]) -> GradeBreakdown {
    let (mut good, mut fair, mut bad) = (0, 0, 0);
    for status in items.iter().filter_map(|item| item.status) {
        match status {
            ItemStatus::Good => good += 1,
            ItemStatus::Fair => fair += 1,
            ItemStatus::Bad => bad += 1,
        }
    }

    let rated = good + fair + bad;
    if rated == 0 {
        return GradeBreakdown {
            rated,
            good,
            fair,
            bad,
            good_ratio: 0.0,
            bad_ratio: 0.0,
            grade: Grade::C,
        };
    }

    let good_ratio = good as f64 / rated as f64;
    let bad_ratio = bad as f64 / rated as f64;

    // First match wins; bad ratios outrank good ones.
    let grade = if bad_ratio >= FAIL_BAD_RATIO {
        Grade::F
    } else if bad_ratio >= POOR_BAD_RATIO {
        Grade::D
    } else if good_ratio >= EXCELLENT_GOOD_RATIO {
        Grade::A
    } else if good_ratio >= GOOD_GOOD_RATIO {
        Grade::B
    } else {
        Grade::C
    };

    GradeBreakdown {
        rated,
        good,
        fair,
        bad,
        good_ratio,
        bad_ratio,
        grade,
    }
}

pub fn grade(items: &[ChecklistItem]) -> Grade {
    breakdown(items).grade
}
