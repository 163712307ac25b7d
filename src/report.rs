use std::fmt::Write;

use chrono::Utc;

use crate::gpa;
use crate::models::{AcademicYear, CourseRecord, GpaSnapshot};

/// Renders a markdown report: the five GPA figures, then the courses
/// grouped by academic year with per-course grade points.
pub fn build_report(
    records: &[CourseRecord],
    snapshot: &GpaSnapshot,
) -> anyhow::Result<String> {
    let mut output = String::new();

    let _ = writeln!(output, "# Grade Report");
    let _ = writeln!(output, "Generated on {}", Utc::now().date_naive());
    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Point Averages");
    let _ = writeln!(output, "- Overall: {:.2}", snapshot.overall);
    for year in AcademicYear::ALL {
        let _ = writeln!(output, "- {}: {:.2}", year, snapshot.for_year(year));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Courses");

    if records.is_empty() {
        let _ = writeln!(output, "No courses recorded.");
        return Ok(output);
    }

    for year in AcademicYear::ALL {
        let courses: Vec<&CourseRecord> =
            records.iter().filter(|r| r.year == year).collect();
        if courses.is_empty() {
            continue;
        }

        let _ = writeln!(output);
        let _ = writeln!(output, "### {}", year);
        for course in courses {
            let points = gpa::grade_points(course.grade)?;
            let _ = writeln!(
                output,
                "- {}: {} credits, grade {} ({:.1} points)",
                course.course, course.credits, course.grade, points
            );
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpa::compute_snapshot;
    use uuid::Uuid;

    #[test]
    fn report_lists_figures_and_groups_courses_by_year() {
        let records = vec![
            CourseRecord {
                id: Uuid::new_v4(),
                course: "CSC 101".to_string(),
                credits: 3.0,
                grade: 97,
                year: AcademicYear::Freshman,
            },
            CourseRecord {
                id: Uuid::new_v4(),
                course: "MAT 201".to_string(),
                credits: 4.0,
                grade: 70,
                year: AcademicYear::Junior,
            },
        ];
        let snapshot = compute_snapshot(&records).unwrap();

        let report = build_report(&records, &snapshot).unwrap();

        assert!(report.contains("- Freshman: 4.00"));
        assert!(report.contains("- Junior: 1.70"));
        assert!(report.contains("### Freshman"));
        assert!(report.contains("- CSC 101: 3 credits, grade 97 (4.0 points)"));
        assert!(report.contains("### Junior"));
        assert!(!report.contains("### Sophomore"));
    }

    #[test]
    fn empty_store_still_renders_the_summary() {
        let report = build_report(&[], &GpaSnapshot::default()).unwrap();
        assert!(report.contains("- Overall: 0.00"));
        assert!(report.contains("No courses recorded."));
    }
}
