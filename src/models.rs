use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

use crate::error::ValidationError;

/// The four academic years a course can be credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AcademicYear {
    Freshman,
    Sophomore,
    Junior,
    Senior,
}

impl AcademicYear {
    pub const ALL: [AcademicYear; 4] = [
        AcademicYear::Freshman,
        AcademicYear::Sophomore,
        AcademicYear::Junior,
        AcademicYear::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AcademicYear::Freshman => "Freshman",
            AcademicYear::Sophomore => "Sophomore",
            AcademicYear::Junior => "Junior",
            AcademicYear::Senior => "Senior",
        }
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcademicYear {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freshman" => Ok(AcademicYear::Freshman),
            "sophomore" => Ok(AcademicYear::Sophomore),
            "junior" => Ok(AcademicYear::Junior),
            "senior" => Ok(AcademicYear::Senior),
            _ => Err(ValidationError::InvalidYear(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseRecord {
    pub id: Uuid,
    pub course: String,
    pub credits: f64,
    pub grade: i64,
    pub year: AcademicYear,
}

/// Credit-weighted GPA figures derived from the full record set.
/// 0.0 means "no data" for that bucket, not a failing average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GpaSnapshot {
    pub overall: f64,
    pub freshman: f64,
    pub sophomore: f64,
    pub junior: f64,
    pub senior: f64,
}

impl GpaSnapshot {
    pub fn for_year(&self, year: AcademicYear) -> f64 {
        match year {
            AcademicYear::Freshman => self.freshman,
            AcademicYear::Sophomore => self.sophomore,
            AcademicYear::Junior => self.junior,
            AcademicYear::Senior => self.senior,
        }
    }
}
