//! Leaderboard CSV export.

use csv::WriterBuilder;
use serde::Serialize;

use crate::dto::ranking::RankingEntry;
use crate::error::{Result, StorageError};

/// One CSV line; field renames produce the header row.
#[derive(Debug, Serialize)]
struct CsvRankingRow {
    #[serde(rename = "Rank")]
    rank: String,
    #[serde(rename = "Club")]
    club: String,
    #[serde(rename = "CPS")]
    cps: String,
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Events")]
    events: i32,
    #[serde(rename = "Avg Planning")]
    avg_planning: String,
    #[serde(rename = "Avg Execution")]
    avg_execution: String,
    #[serde(rename = "Avg Doc")]
    avg_documentation: String,
    #[serde(rename = "Avg Innovation")]
    avg_innovation: String,
    #[serde(rename = "Avg Turnout")]
    avg_turnout: String,
}

fn two_places(value: f64) -> String {
    format!("{value:.2}")
}

impl From<&RankingEntry> for CsvRankingRow {
    fn from(entry: &RankingEntry) -> Self {
        Self {
            rank: entry
                .rank
                .map(|rank| rank.to_string())
                .unwrap_or_else(|| "Pending".to_string()),
            club: entry.club_name.clone(),
            cps: two_places(entry.cps),
            tier: entry.tier.code().to_string(),
            events: entry.event_count,
            avg_planning: two_places(entry.avg_planning),
            avg_execution: two_places(entry.avg_execution),
            avg_documentation: two_places(entry.avg_documentation),
            avg_innovation: two_places(entry.avg_innovation),
            avg_turnout: two_places(entry.avg_turnout),
        }
    }
}

/// Renders `entries` in the order given, which callers take from the
/// leaderboard listing.
pub fn rankings_csv(entries: &[RankingEntry]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    if entries.is_empty() {
        writer.write_record([
            "Rank",
            "Club",
            "CPS",
            "Tier",
            "Events",
            "Avg Planning",
            "Avg Execution",
            "Avg Doc",
            "Avg Innovation",
            "Avg Turnout",
        ])?;
    }

    for entry in entries {
        writer.serialize(CsvRankingRow::from(entry))?;
    }

    writer
        .into_inner()
        .map_err(|e| StorageError::Export(csv::Error::from(e.into_error())))
}

/// `rankings_<semester name>.csv`, anything but ASCII alphanumerics and `-` mapped to `_`.
pub fn export_filename(semester_name: &str) -> String {
    let safe: String = semester_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("rankings_{safe}.csv")
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::models::Tier;

    fn entry(rank: Option<i32>, name: &str, code: &str, cps: f64, tier: Tier) -> RankingEntry {
        RankingEntry {
            rank,
            club_id: Uuid::new_v4(),
            club_name: name.to_string(),
            short_code: code.to_string(),
            cps,
            tier,
            event_count: 2,
            avg_planning: cps / 5.0,
            avg_execution: cps / 5.0,
            avg_documentation: cps / 5.0,
            avg_innovation: cps / 5.0,
            avg_turnout: cps / 5.0,
        }
    }

    #[test]
    fn test_header_and_rows() {
        let entries = vec![
            entry(Some(1), "Coding Club", "CODE", 90.0, Tier::A),
            entry(None, "Chess Club", "CHESS", 100.0 / 3.0, Tier::Pending),
        ];

        let csv = String::from_utf8(rankings_csv(&entries).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Rank,Club,CPS,Tier,Events,Avg Planning,Avg Execution,Avg Doc,Avg Innovation,Avg Turnout"
        );
        assert_eq!(
            lines[1],
            "1,Coding Club,90.00,A,2,18.00,18.00,18.00,18.00,18.00"
        );
        assert_eq!(lines[2], "Pending,Chess Club,33.33,P,2,6.67,6.67,6.67,6.67,6.67");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let csv = String::from_utf8(rankings_csv(&[]).unwrap()).unwrap();
        assert_eq!(
            csv,
            "Rank,Club,CPS,Tier,Events,Avg Planning,Avg Execution,Avg Doc,Avg Innovation,Avg Turnout\n"
        );
    }

    #[test]
    fn test_club_names_with_commas_are_quoted() {
        let entries = vec![entry(Some(1), "Arts, Crafts", "ART", 60.0, Tier::C)];
        let csv = String::from_utf8(rankings_csv(&entries).unwrap()).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("1,\"Arts, Crafts\",60.00"));
    }

    #[test]
    fn test_filename_is_header_safe() {
        assert_eq!(export_filename("Fall 2023"), "rankings_Fall_2023.csv");
        assert_eq!(export_filename("Spring \"24\""), "rankings_Spring__24_.csv");
    }
}
