use std::collections::HashMap;

use crate::error::InvalidGradeError;
use crate::models::{AcademicYear, CourseRecord, GpaSnapshot};

/// Grade-point scale, highest threshold first. A grade earns the value of
/// the first threshold it meets or exceeds; anything below 60 is 0.0.
const GRADE_SCALE: &[(i64, f64)] = &[
    (94, 4.0),
    (90, 3.7),
    (87, 3.3),
    (84, 3.0),
    (80, 2.7),
    (77, 2.3),
    (74, 2.0),
    (70, 1.7),
    (67, 1.3),
    (64, 1.0),
    (60, 0.7),
    (0, 0.0),
];

/// Converts a percentage grade (0-100) into its grade-point value.
///
/// | Grade    | Points |
/// |----------|--------|
/// | >= 94    | 4.0    |
/// | >= 90    | 3.7    |
/// | >= 87    | 3.3    |
/// | >= 84    | 3.0    |
/// | >= 80    | 2.7    |
/// | >= 77    | 2.3    |
/// | >= 74    | 2.0    |
/// | >= 70    | 1.7    |
/// | >= 67    | 1.3    |
/// | >= 64    | 1.0    |
/// | >= 60    | 0.7    |
/// | < 60     | 0.0    |
pub fn grade_points(grade: i64) -> Result<f64, InvalidGradeError> {
    if !(0..=100).contains(&grade) {
        return Err(InvalidGradeError(grade));
    }

    for &(threshold, points) in GRADE_SCALE {
        if grade >= threshold {
            return Ok(points);
        }
    }

    Ok(0.0)
}

#[derive(Debug, Default)]
struct YearTotals {
    quality_points: f64,
    credits: f64,
}

impl YearTotals {
    fn gpa(&self) -> f64 {
        if self.credits > 0.0 {
            self.quality_points / self.credits
        } else {
            0.0
        }
    }
}

/// Recomputes the five GPA figures from the full record set.
///
/// Records are bucketed by academic year; each bucket's GPA is the sum of
/// quality points (grade points x credits) over the sum of credits, and the
/// overall figure is the same ratio taken across the buckets that have any
/// credits. Empty buckets report 0.0. The caller replaces its previous
/// snapshot with the returned value as a whole.
pub fn compute_snapshot(records: &[CourseRecord]) -> Result<GpaSnapshot, InvalidGradeError> {
    let mut buckets: HashMap<AcademicYear, YearTotals> = HashMap::new();

    for record in records {
        let points = grade_points(record.grade)?;
        let totals = buckets.entry(record.year).or_default();
        totals.quality_points += points * record.credits;
        totals.credits += record.credits;
    }

    let mut overall_points = 0.0;
    let mut overall_credits = 0.0;
    for totals in buckets.values() {
        if totals.credits > 0.0 {
            overall_points += totals.quality_points;
            overall_credits += totals.credits;
        }
    }

    let year_gpa = |year: AcademicYear| buckets.get(&year).map_or(0.0, YearTotals::gpa);

    Ok(GpaSnapshot {
        overall: if overall_credits > 0.0 {
            overall_points / overall_credits
        } else {
            0.0
        },
        freshman: year_gpa(AcademicYear::Freshman),
        sophomore: year_gpa(AcademicYear::Sophomore),
        junior: year_gpa(AcademicYear::Junior),
        senior: year_gpa(AcademicYear::Senior),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record(course: &str, credits: f64, grade: i64, year: AcademicYear) -> CourseRecord {
        CourseRecord {
            id: Uuid::new_v4(),
            course: course.to_string(),
            credits,
            grade,
            year,
        }
    }

    #[test]
    fn scale_boundaries_match_the_table() {
        assert_eq!(grade_points(100).unwrap(), 4.0);
        assert_eq!(grade_points(94).unwrap(), 4.0);
        assert_eq!(grade_points(93).unwrap(), 3.7);
        assert_eq!(grade_points(90).unwrap(), 3.7);
        assert_eq!(grade_points(89).unwrap(), 3.3);
        assert_eq!(grade_points(87).unwrap(), 3.3);
        assert_eq!(grade_points(84).unwrap(), 3.0);
        assert_eq!(grade_points(80).unwrap(), 2.7);
        assert_eq!(grade_points(77).unwrap(), 2.3);
        assert_eq!(grade_points(74).unwrap(), 2.0);
        assert_eq!(grade_points(70).unwrap(), 1.7);
        assert_eq!(grade_points(67).unwrap(), 1.3);
        assert_eq!(grade_points(64).unwrap(), 1.0);
        assert_eq!(grade_points(60).unwrap(), 0.7);
        assert_eq!(grade_points(59).unwrap(), 0.0);
        assert_eq!(grade_points(0).unwrap(), 0.0);
    }

    #[test]
    fn points_never_increase_as_the_grade_drops() {
        for grade in 1..=100 {
            let higher = grade_points(grade).unwrap();
            let lower = grade_points(grade - 1).unwrap();
            assert!(lower <= higher, "points rose between {} and {}", grade - 1, grade);
        }
    }

    #[test]
    fn out_of_range_grades_are_rejected() {
        assert_eq!(grade_points(-1).unwrap_err(), InvalidGradeError(-1));
        assert_eq!(grade_points(101).unwrap_err(), InvalidGradeError(101));
    }

    #[test]
    fn empty_record_set_yields_all_zeros() {
        let snapshot = compute_snapshot(&[]).unwrap();
        assert_eq!(snapshot, GpaSnapshot::default());
    }

    #[test]
    fn single_course_sets_its_year_and_overall() {
        let records = vec![record("CSC 101", 3.0, 97, AcademicYear::Freshman)];
        let snapshot = compute_snapshot(&records).unwrap();
        assert_eq!(snapshot.freshman, 4.0);
        assert_eq!(snapshot.overall, 4.0);
        assert_eq!(snapshot.sophomore, 0.0);
        assert_eq!(snapshot.junior, 0.0);
        assert_eq!(snapshot.senior, 0.0);
    }

    #[test]
    fn overall_weights_years_by_credits() {
        let records = vec![
            record("CSC 101", 3.0, 97, AcademicYear::Freshman),
            record("MAT 201", 4.0, 70, AcademicYear::Junior),
        ];
        let snapshot = compute_snapshot(&records).unwrap();
        assert_eq!(snapshot.freshman, 4.0);
        assert_eq!(snapshot.junior, 1.7);
        let expected = (3.0 * 4.0 + 4.0 * 1.7) / 7.0;
        assert!((snapshot.overall - expected).abs() < 0.001);
    }

    #[test]
    fn courses_in_the_same_year_average_together() {
        let records = vec![
            record("ENG 110", 3.0, 94, AcademicYear::Sophomore),
            record("HIS 120", 3.0, 84, AcademicYear::Sophomore),
        ];
        let snapshot = compute_snapshot(&records).unwrap();
        assert!((snapshot.sophomore - 3.5).abs() < 0.001);
        assert!((snapshot.overall - 3.5).abs() < 0.001);
    }
}
