//! Derived milestone aggregates.

use crate::collections::Milestone;

/// Overall writing progress as a 0–100 percentage.
///
/// Completed milestones count as 1 whole unit; incomplete milestones
/// contribute their own `progress` as a fraction. The result is
/// `round((completed + Σ progress/100) / total × 100)`, clamped to 100.
/// An empty slice is 0.
///
/// This figure is always derived at read time, never stored.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn overall_progress(milestones: &[Milestone]) -> u8 {
    if milestones.is_empty() {
        return 0;
    }

    let mut units = 0.0_f64;
    for m in milestones {
        if m.completed {
            units += 1.0;
        } else {
            // Stored progress is validated upstream; clamp anyway so a bad
            // row cannot push the aggregate outside 0-100.
            units += m.progress.clamp(0, 100) as f64 / 100.0;
        }
    }

    let percent = (units / milestones.len() as f64 * 100.0).round() as i64;
    percent.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milestone(progress: i64, completed: bool) -> Milestone {
        Milestone {
            id: String::new(),
            title: String::new(),
            description: None,
            progress,
            completed,
            order_index: 0,
        }
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(overall_progress(&[]), 0);
    }

    #[test]
    fn test_one_completed_one_half_done() {
        let milestones = [milestone(0, true), milestone(50, false)];

        // (1 + 0.5) / 2 = 75%
        assert_eq!(overall_progress(&milestones), 75);
    }

    #[test]
    fn test_all_completed_is_hundred() {
        let milestones = [milestone(100, true), milestone(0, true)];

        assert_eq!(overall_progress(&milestones), 100);
    }

    #[test]
    fn test_completed_ignores_progress_field() {
        // A completed milestone counts as a full unit even if its stored
        // progress was never bumped to 100.
        let milestones = [milestone(10, true)];

        assert_eq!(overall_progress(&milestones), 100);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        let milestones = [milestone(250, false), milestone(-40, false)];

        // Clamped to 100 and 0: (1.0 + 0.0) / 2 = 50%
        assert_eq!(overall_progress(&milestones), 50);
    }

    #[test]
    fn test_rounding() {
        let milestones = [
            milestone(0, true),
            milestone(0, false),
            milestone(0, false),
        ];

        // 1/3 = 33.33...% rounds to 33
        assert_eq!(overall_progress(&milestones), 33);
    }
}
