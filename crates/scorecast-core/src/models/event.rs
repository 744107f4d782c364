use chrono::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    Individual,
    Group,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Individual => write!(f, "Individual"),
            EventCategory::Group => write!(f, "Group"),
        }
    }
}

impl EventCategory {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("individual") {
            Some(EventCategory::Individual)
        } else if s.eq_ignore_ascii_case("group") {
            Some(EventCategory::Group)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeLevel {
    Junior,
    Middle,
    Senior,
}

impl std::fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeLevel::Junior => write!(f, "Junior"),
            GradeLevel::Middle => write!(f, "Middle"),
            GradeLevel::Senior => write!(f, "Senior"),
        }
    }
}

impl GradeLevel {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("junior") {
            Some(GradeLevel::Junior)
        } else if s.eq_ignore_ascii_case("middle") {
            Some(GradeLevel::Middle)
        } else if s.eq_ignore_ascii_case("senior") {
            Some(GradeLevel::Senior)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "gradeLevel", default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub winners: Vec<WinnerEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerEntry {
    /// 1-3 are podium places, 4 is the "A+" merit tier
    #[serde(default)]
    pub position: i64,
    // Older feed payloads name this field "house"
    #[serde(alias = "house")]
    pub school: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
}

impl WinnerEntry {
    /// Placement label: "1st", "2nd", "3rd", "A+", then ordinals
    pub fn placement_label(&self) -> String {
        match self.position {
            1 => "1st".to_string(),
            2 => "2nd".to_string(),
            3 => "3rd".to_string(),
            4 => "A+".to_string(),
            n => format!("{}th", n),
        }
    }

    /// A parsed position below 1 means the entry carried no usable placement
    pub fn has_placement(&self) -> bool {
        self.position >= 1
    }
}

impl EventRecord {
    pub fn formatted_date(&self) -> String {
        match &self.date {
            Some(date) => {
                // Try to parse and format the date nicely
                if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
                    dt.format("%b %d, %Y").to_string()
                } else {
                    // Fall back to raw date string, truncate if too long
                    date.chars().take(10).collect()
                }
            }
            None => "TBD".to_string(),
        }
    }

    pub fn category_parsed(&self) -> Option<EventCategory> {
        self.category.as_deref().and_then(EventCategory::parse)
    }

    pub fn grade_parsed(&self) -> Option<GradeLevel> {
        self.grade_level.as_deref().and_then(GradeLevel::parse)
    }

    pub fn winner_count(&self) -> usize {
        self.winners.len()
    }

    /// Winners in placement order, for result listings
    pub fn winners_by_position(&self) -> Vec<&WinnerEntry> {
        let mut winners: Vec<&WinnerEntry> = self.winners.iter().collect();
        winners.sort_by_key(|w| w.position);
        winners
    }

}

// Sorting options for the events table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSortColumn {
    Name,
    #[default]
    Date,
    Category,
    Grade,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn winner(position: i64, school: &str, points: i64) -> WinnerEntry {
        WinnerEntry {
            position,
            school: school.to_string(),
            points,
            name: "Test Student".to_string(),
            photo: None,
        }
    }

    #[test]
    fn test_placement_labels() {
        assert_eq!(winner(1, "X", 10).placement_label(), "1st");
        assert_eq!(winner(2, "X", 5).placement_label(), "2nd");
        assert_eq!(winner(3, "X", 3).placement_label(), "3rd");
        assert_eq!(winner(4, "X", 1).placement_label(), "A+");
        assert_eq!(winner(5, "X", 0).placement_label(), "5th");
    }

    #[test]
    fn test_has_placement() {
        assert!(winner(1, "X", 10).has_placement());
        assert!(winner(4, "X", 1).has_placement());
        // Serde default for a missing position is 0
        assert!(!winner(0, "X", 10).has_placement());
    }

    #[test]
    fn test_winner_school_alias() {
        // Older payloads use "house" for the school key
        let json = r#"{"position": 1, "house": "VIDYA VIKAS SCHOOL", "points": 10, "name": "A"}"#;
        let parsed: WinnerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.school, "VIDYA VIKAS SCHOOL");
    }

    #[test]
    fn test_event_missing_fields_default() {
        let json = r#"{"name": "Quiz"}"#;
        let parsed: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name, "Quiz");
        assert!(parsed.id.is_empty());
        assert!(parsed.winners.is_empty());
        assert_eq!(parsed.formatted_date(), "TBD");
    }

    #[test]
    fn test_formatted_date() {
        let event = EventRecord {
            id: "e1".to_string(),
            name: "Elocution".to_string(),
            category: Some("Individual".to_string()),
            grade_level: Some("Senior".to_string()),
            date: Some("2026-01-26T09:30:00+05:30".to_string()),
            winners: vec![],
        };
        assert_eq!(event.formatted_date(), "Jan 26, 2026");

        let raw = EventRecord {
            date: Some("2026-01-26 morning session".to_string()),
            ..event.clone()
        };
        assert_eq!(raw.formatted_date(), "2026-01-26");
    }

    #[test]
    fn test_category_and_grade_parse() {
        assert_eq!(EventCategory::parse("Individual"), Some(EventCategory::Individual));
        assert_eq!(EventCategory::parse("group"), Some(EventCategory::Group));
        assert_eq!(EventCategory::parse("Team"), None);
        assert_eq!(GradeLevel::parse("SENIOR"), Some(GradeLevel::Senior));
        assert_eq!(GradeLevel::parse("middle"), Some(GradeLevel::Middle));
        assert_eq!(GradeLevel::parse(""), None);
    }

    #[test]
    fn test_winners_by_position() {
        let event = EventRecord {
            id: "e1".to_string(),
            name: "Group Dance".to_string(),
            category: Some("Group".to_string()),
            grade_level: Some("Middle".to_string()),
            date: None,
            winners: vec![winner(3, "A", 3), winner(1, "B", 10), winner(2, "C", 5)],
        };
        let by_position: Vec<i64> = event.winners_by_position().iter().map(|w| w.position).collect();
        assert_eq!(by_position, vec![1, 2, 3]);
    }
}
