//! Standings aggregation.
//!
//! Scores are never stored: every standings table is recomputed from
//! scratch from the roster and the current event list. One row per
//! roster school, always, with dense ranks (equal scores share a rank,
//! the next distinct score takes the previous rank plus one).

use std::collections::HashMap;

use tracing::debug;

use crate::models::EventRecord;
use crate::roster::Roster;

/// One school's place in the standings. Derived and ephemeral, rebuilt
/// on every recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingRow {
    pub name: String,
    pub color: String,
    pub score: i64,
    pub rank: usize,
}

/// A fully computed standings table.
#[derive(Debug, Clone, Default)]
pub struct Standings {
    rows: Vec<StandingRow>,
}

impl Standings {
    /// Aggregate event winners into a ranked table.
    ///
    /// Malformed winner entries never abort the computation: entries
    /// without a placement or naming a school outside the roster are
    /// skipped, and missing points count as zero.
    pub fn compute(roster: &Roster, events: &[EventRecord]) -> Self {
        let mut scores: HashMap<&str, i64> = HashMap::new();
        for event in events {
            for winner in &event.winners {
                if !winner.has_placement() {
                    debug!(event = %event.name, "skipping winner entry without placement");
                    continue;
                }
                if !roster.contains(&winner.school) {
                    debug!(school = %winner.school, "skipping winner entry for unlisted school");
                    continue;
                }
                *scores.entry(winner.school.as_str()).or_insert(0) += winner.points;
            }
        }

        let mut rows: Vec<StandingRow> = roster
            .iter()
            .map(|school| StandingRow {
                name: school.name.clone(),
                color: school.color.clone(),
                score: scores.get(school.name.as_str()).copied().unwrap_or(0),
                rank: 0,
            })
            .collect();

        // Highest score first; equal scores sort alphabetically so ties
        // come out identically on every recompute
        rows.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));

        let mut last_score: Option<i64> = None;
        let mut last_rank = 0;
        for row in &mut rows {
            if last_score != Some(row.score) {
                last_rank += 1;
                last_score = Some(row.score);
            }
            row.rank = last_rank;
        }

        Self { rows }
    }

    /// Every roster school in rank order.
    pub fn rows(&self) -> &[StandingRow] {
        &self.rows
    }

    /// Only schools with points on the board, for leaderboard surfaces
    /// that suppress zero scores.
    pub fn scoring_rows(&self) -> Vec<&StandingRow> {
        self.rows.iter().filter(|r| r.score > 0).collect()
    }

    /// The highest-ranked rows, carrying the ranks from the full
    /// computation. Ties can make `top(3)` span fewer than 3 distinct
    /// ranks.
    pub fn top(&self, count: usize) -> &[StandingRow] {
        &self.rows[..count.min(self.rows.len())]
    }

    pub fn leader(&self) -> Option<&StandingRow> {
        self.rows.first()
    }

    pub fn row(&self, name: &str) -> Option<&StandingRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Highest score on the board, floored at 1 so bar widths scale
    /// without dividing by zero.
    pub fn max_score(&self) -> i64 {
        self.rows.iter().map(|r| r.score).max().unwrap_or(0).max(1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WinnerEntry;
    use crate::roster::School;

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

    fn winner(position: i64, school: &str, points: i64) -> WinnerEntry {
        WinnerEntry {
            position,
            school: school.to_string(),
            points,
            name: "Student".to_string(),
            photo: None,
        }
    }

    fn event(name: &str, winners: Vec<WinnerEntry>) -> EventRecord {
        EventRecord {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            category: Some("Individual".to_string()),
            grade_level: Some("Senior".to_string()),
            date: Some("2026-01-26T09:00:00+05:30".to_string()),
            winners,
        }
    }

    // ----- Aggregation -----

    #[test]
    fn test_single_event_ranking() {
        let roster = roster_of(&["X", "Y", "Z"]);
        let events = vec![event("Quiz", vec![winner(1, "X", 10), winner(2, "Y", 5)])];
        let standings = Standings::compute(&roster, &events);

        let rows = standings.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].name.as_str(), rows[0].score, rows[0].rank), ("X", 10, 1));
        assert_eq!((rows[1].name.as_str(), rows[1].score, rows[1].rank), ("Y", 5, 2));
        assert_eq!((rows[2].name.as_str(), rows[2].score, rows[2].rank), ("Z", 0, 3));
    }

    #[test]
    fn test_scores_accumulate_across_events() {
        let roster = roster_of(&["X", "Y"]);
        let events = vec![
            event("Quiz", vec![winner(1, "X", 10), winner(2, "Y", 5)]),
            event("Elocution", vec![winner(1, "Y", 10), winner(4, "X", 1)]),
        ];
        let standings = Standings::compute(&roster, &events);
        assert_eq!(standings.row("X").unwrap().score, 11);
        assert_eq!(standings.row("Y").unwrap().score, 15);
        assert_eq!(standings.leader().unwrap().name, "Y");
    }

    #[test]
    fn test_unlisted_school_ignored() {
        let roster = roster_of(&["X", "Y"]);
        let events = vec![event(
            "Quiz",
            vec![winner(1, "Unlisted School", 10), winner(2, "X", 5)],
        )];
        let standings = Standings::compute(&roster, &events);
        assert_eq!(standings.rows().len(), 2);
        assert_eq!(standings.row("X").unwrap().score, 5);
        assert_eq!(standings.row("Y").unwrap().score, 0);
        assert!(standings.row("Unlisted School").is_none());
    }

    #[test]
    fn test_entry_without_placement_contributes_nothing() {
        let roster = roster_of(&["X"]);
        let events = vec![event("Quiz", vec![winner(0, "X", 10), winner(1, "X", 3)])];
        let standings = Standings::compute(&roster, &events);
        assert_eq!(standings.row("X").unwrap().score, 3);
    }

    #[test]
    fn test_zero_point_entry_is_counted_quietly() {
        let roster = roster_of(&["X", "Y"]);
        let events = vec![event("Quiz", vec![winner(4, "X", 0), winner(1, "Y", 10)])];
        let standings = Standings::compute(&roster, &events);
        assert_eq!(standings.row("X").unwrap().score, 0);
        assert_eq!(standings.row("X").unwrap().rank, 2);
    }

    // ----- Ranking -----

    #[test]
    fn test_dense_ranking_shares_and_advances_by_one() {
        let roster = roster_of(&["A", "B", "C", "D"]);
        let events = vec![event(
            "Quiz",
            vec![
                winner(1, "A", 100),
                winner(1, "B", 100),
                winner(2, "C", 90),
                winner(3, "D", 80),
            ],
        )];
        let standings = Standings::compute(&roster, &events);
        let ranks: Vec<usize> = standings.rows().iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 1, 2, 3]);
    }

    #[test]
    fn test_tie_at_top_with_zero_tail() {
        let roster = roster_of(&["X", "Y", "Z"]);
        let events = vec![event("Quiz", vec![winner(1, "X", 15), winner(1, "Y", 15)])];
        let standings = Standings::compute(&roster, &events);
        let rows = standings.rows();
        assert_eq!((rows[0].score, rows[0].rank), (15, 1));
        assert_eq!((rows[1].score, rows[1].rank), (15, 1));
        assert_eq!((rows[2].score, rows[2].rank), (0, 2));
    }

    #[test]
    fn test_tied_scores_order_alphabetically() {
        let roster = roster_of(&["ZEBRA", "ALPHA", "MIKE"]);
        let events = vec![event(
            "Quiz",
            vec![
                winner(1, "ZEBRA", 10),
                winner(1, "ALPHA", 10),
                winner(1, "MIKE", 10),
            ],
        )];
        let standings = Standings::compute(&roster, &events);
        let names: Vec<&str> = standings.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ALPHA", "MIKE", "ZEBRA"]);
        assert!(standings.rows().iter().all(|r| r.rank == 1));
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let roster = roster_of(&["X", "Y", "Z"]);
        let events = vec![event("Quiz", vec![winner(1, "Z", 10), winner(1, "X", 10)])];
        let first = Standings::compute(&roster, &events);
        let second = Standings::compute(&roster, &events);
        assert_eq!(first.rows(), second.rows());
    }

    // ----- Empty input -----

    #[test]
    fn test_no_events_all_tied_at_rank_one() {
        let roster = roster_of(&["X", "Y", "Z"]);
        let standings = Standings::compute(&roster, &[]);
        assert_eq!(standings.rows().len(), 3);
        assert!(standings.rows().iter().all(|r| r.score == 0 && r.rank == 1));
        assert!(standings.scoring_rows().is_empty());
        assert_eq!(standings.max_score(), 1);
    }

    // ----- Accessors -----

    #[test]
    fn test_scoring_rows_filter() {
        let roster = roster_of(&["X", "Y", "Z"]);
        let events = vec![event("Quiz", vec![winner(1, "X", 10), winner(2, "Y", 5)])];
        let standings = Standings::compute(&roster, &events);
        let scoring: Vec<&str> = standings.scoring_rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(scoring, vec!["X", "Y"]);
    }

    #[test]
    fn test_top_three_reflects_ties() {
        let roster = Roster::builtin();
        let events = vec![event(
            "Quiz",
            vec![
                winner(1, "VIDYA VIKAS SCHOOL", 20),
                winner(1, "ST. PATRICKS ACADEMY", 20),
                winner(2, "MARY WARD ENGLISH MEDIUM SCHOOL", 10),
            ],
        )];
        let standings = Standings::compute(&roster, &events);
        let top = standings.top(3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[1].rank, 1);
        assert_eq!(top[2].rank, 2);
    }

    #[test]
    fn test_top_clamps_to_roster_size() {
        let roster = roster_of(&["X", "Y"]);
        let standings = Standings::compute(&roster, &[]);
        assert_eq!(standings.top(5).len(), 2);
    }

    #[test]
    fn test_max_score_tracks_leader() {
        let roster = roster_of(&["X", "Y"]);
        let events = vec![event("Quiz", vec![winner(1, "X", 42)])];
        let standings = Standings::compute(&roster, &events);
        assert_eq!(standings.max_score(), 42);
    }
}
