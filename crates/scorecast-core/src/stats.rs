//! Derived competition statistics.
//!
//! Small pure functions over the event list, independent of ranking.
//! The two average accessors differ only in their denominator; the
//! caller picks which population it is averaging over.

use std::collections::HashSet;

use crate::models::EventRecord;
use crate::standings::Standings;

pub fn event_count(events: &[EventRecord]) -> usize {
    events.len()
}

/// Distinct winner names across all events. Names are the only identity
/// the feed carries, so two students sharing a name count once.
pub fn participant_count(events: &[EventRecord]) -> usize {
    let names: HashSet<&str> = events
        .iter()
        .flat_map(|e| e.winners.iter().map(|w| w.name.as_str()))
        .collect();
    names.len()
}

/// Total winner entries, the "awards given" figure.
pub fn award_count(events: &[EventRecord]) -> usize {
    events.iter().map(|e| e.winners.len()).sum()
}

/// Average score over schools with points on the board, rounded to the
/// nearest integer. Zero when nobody has scored yet.
pub fn average_score_scoring(standings: &Standings) -> i64 {
    let scoring = standings.scoring_rows();
    if scoring.is_empty() {
        return 0;
    }
    let sum: i64 = scoring.iter().map(|r| r.score).sum();
    (sum as f64 / scoring.len() as f64).round() as i64
}

/// Average score over the full roster, rounded to the nearest integer.
pub fn average_score_roster(standings: &Standings) -> i64 {
    if standings.is_empty() {
        return 0;
    }
    let sum: i64 = standings.rows().iter().map(|r| r.score).sum();
    (sum as f64 / standings.len() as f64).round() as i64
}

/// Snapshot of every derived figure, for dashboard surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub event_count: usize,
    pub participant_count: usize,
    pub award_count: usize,
    pub average_score_scoring: i64,
    pub average_score_roster: i64,
}

impl StatsSummary {
    pub fn collect(events: &[EventRecord], standings: &Standings) -> Self {
        Self {
            event_count: event_count(events),
            participant_count: participant_count(events),
            award_count: award_count(events),
            average_score_scoring: average_score_scoring(standings),
            average_score_roster: average_score_roster(standings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WinnerEntry;
    use crate::roster::{Roster, School};

    fn roster_of(names: &[&str]) -> Roster {
        Roster::new(
            names
                .iter()
                .map(|n| School {
                    name: n.to_string(),
                    color: "red".to_string(),
                })
                .collect(),
        )
    }

    fn winner(school: &str, points: i64, name: &str) -> WinnerEntry {
        WinnerEntry {
            position: 1,
            school: school.to_string(),
            points,
            name: name.to_string(),
            photo: None,
        }
    }

    fn event(name: &str, winners: Vec<WinnerEntry>) -> EventRecord {
        EventRecord {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            category: None,
            grade_level: None,
            date: None,
            winners,
        }
    }

    #[test]
    fn test_counts() {
        let events = vec![
            event("Quiz", vec![winner("X", 10, "Anu"), winner("Y", 5, "Biju")]),
            event("Dance", vec![winner("X", 10, "Anu")]),
        ];
        assert_eq!(event_count(&events), 2);
        assert_eq!(award_count(&events), 3);
        // "Anu" appears twice but counts once
        assert_eq!(participant_count(&events), 2);
    }

    #[test]
    fn test_average_denominators_differ() {
        let roster = roster_of(&["X", "Y", "Z"]);
        let events = vec![event("Quiz", vec![winner("X", 10, "Anu"), winner("Y", 5, "Biju")])];
        let standings = Standings::compute(&roster, &events);
        // 15 points over 2 scoring schools rounds to 8
        assert_eq!(average_score_scoring(&standings), 8);
        // 15 points over all 3 roster schools
        assert_eq!(average_score_roster(&standings), 5);
    }

    #[test]
    fn test_averages_on_empty_board() {
        let roster = roster_of(&["X", "Y"]);
        let standings = Standings::compute(&roster, &[]);
        assert_eq!(average_score_scoring(&standings), 0);
        assert_eq!(average_score_roster(&standings), 0);
    }

    #[test]
    fn test_summary_collects_everything() {
        let roster = roster_of(&["X", "Y"]);
        let events = vec![event("Quiz", vec![winner("X", 10, "Anu")])];
        let standings = Standings::compute(&roster, &events);
        let summary = StatsSummary::collect(&events, &standings);
        assert_eq!(summary.event_count, 1);
        assert_eq!(summary.participant_count, 1);
        assert_eq!(summary.award_count, 1);
        assert_eq!(summary.average_score_scoring, 10);
        assert_eq!(summary.average_score_roster, 5);
    }
}
