//! Score leaderboard records
//!
//! Wire types shared by the browser client and the API server, plus the
//! validation and ranking rules both sides agree on. Ranks by score
//! descending, earliest submission first on ties, top 10 only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub use crate::consts::{LEADERBOARD_SIZE, MAX_PLAYER_NAME_CHARS};

/// A stored score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub player_name: String,
    pub score: u64,
    pub created_at: DateTime<Utc>,
}

/// Why a score submission was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("playerName is required")]
    MissingName,
    #[error("playerName must be a string")]
    NameNotString,
    #[error("playerName must not be empty")]
    BlankName,
    #[error("playerName must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("score is required")]
    MissingScore,
    #[error("score must be an integer")]
    ScoreNotInteger,
    #[error("score must not be negative")]
    NegativeScore,
    #[error("score is too large")]
    ScoreTooLarge,
}

/// Largest score the stores accept (fits a signed 64-bit column)
pub const MAX_SCORE: u64 = i64::MAX as u64;

/// A validated score submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScore {
    pub player_name: String,
    pub score: u64,
}

impl NewScore {
    /// Trim and validate a player name
    pub fn new(player_name: &str, score: u64) -> Result<Self, ValidationError> {
        if score > MAX_SCORE {
            return Err(ValidationError::ScoreTooLarge);
        }
        Ok(Self {
            player_name: validate_name(player_name)?,
            score,
        })
    }

    /// Validate an untyped JSON body (`{playerName, score}`)
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = body.as_object().ok_or(ValidationError::NotAnObject)?;

        let name = match obj.get("playerName") {
            None | Some(Value::Null) => return Err(ValidationError::MissingName),
            Some(Value::String(s)) => s,
            Some(_) => return Err(ValidationError::NameNotString),
        };

        let score = match obj.get("score") {
            None | Some(Value::Null) => return Err(ValidationError::MissingScore),
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_u64() {
                    v
                } else if n.as_i64().is_some() {
                    return Err(ValidationError::NegativeScore);
                } else {
                    whole_score(n.as_f64())?
                }
            }
            Some(_) => return Err(ValidationError::ScoreNotInteger),
        };

        Self::new(name, score)
    }
}

/// `42.0` counts as an integer score, `42.5` does not
fn whole_score(value: Option<f64>) -> Result<u64, ValidationError> {
    match value {
        Some(f) if f.is_finite() && f.fract() == 0.0 => {
            if f < 0.0 {
                Err(ValidationError::NegativeScore)
            } else if f >= MAX_SCORE as f64 {
                // i64::MAX rounds up to 2^63 as f64
                Err(ValidationError::ScoreTooLarge)
            } else {
                Ok(f as u64)
            }
        }
        _ => Err(ValidationError::ScoreNotInteger),
    }
}

fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankName);
    }
    if name.chars().count() > MAX_PLAYER_NAME_CHARS {
        return Err(ValidationError::NameTooLong {
            max: MAX_PLAYER_NAME_CHARS,
        });
    }
    Ok(name.to_string())
}

/// Sort entries into leaderboard order
///
/// Stable, so entries with equal score and timestamp keep insertion order.
pub fn rank(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

/// Rank and keep the first `limit` entries
pub fn top(mut entries: Vec<LeaderboardEntry>, limit: usize) -> Vec<LeaderboardEntry> {
    rank(&mut entries);
    entries.truncate(limit);
    entries
}

/// Format an entry's age relative to `now`
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let days = elapsed.num_days();
    let hours = elapsed.num_hours();
    let mins = elapsed.num_minutes();

    if days >= 1 {
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else {
            created_at.format("%-m/%-d/%y").to_string()
        }
    } else if hours >= 1 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if mins >= 1 {
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn entry(name: &str, score: u64, secs: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            id: Uuid::nil(),
            player_name: name.to_string(),
            score,
            created_at: at(secs),
        }
    }

    #[test]
    fn test_valid_body() {
        let score = NewScore::from_json(&json!({"playerName": "  Ada ", "score": 42})).unwrap();
        assert_eq!(score.player_name, "Ada");
        assert_eq!(score.score, 42);
    }

    #[test]
    fn test_invalid_bodies() {
        let cases = [
            (json!([1, 2]), ValidationError::NotAnObject),
            (json!({"score": 1}), ValidationError::MissingName),
            (json!({"playerName": 7, "score": 1}), ValidationError::NameNotString),
            (json!({"playerName": "   ", "score": 1}), ValidationError::BlankName),
            (json!({"playerName": "Ada"}), ValidationError::MissingScore),
            (json!({"playerName": "Ada", "score": 1.5}), ValidationError::ScoreNotInteger),
            (json!({"playerName": "Ada", "score": "10"}), ValidationError::ScoreNotInteger),
            (json!({"playerName": "Ada", "score": -3}), ValidationError::NegativeScore),
            (
                json!({"playerName": "abcdefghijklmnopqrstu", "score": 1}),
                ValidationError::NameTooLong { max: 20 },
            ),
        ];
        for (body, expected) in cases {
            assert_eq!(NewScore::from_json(&body), Err(expected), "body {body}");
        }
    }

    #[test]
    fn test_whole_float_scores_count_as_integers() {
        let score = NewScore::from_json(&json!({"playerName": "Ada", "score": 42.0})).unwrap();
        assert_eq!(score.score, 42);

        let cases = [
            (json!(-3.0), ValidationError::NegativeScore),
            (json!(0.25), ValidationError::ScoreNotInteger),
            (json!(1e300), ValidationError::ScoreTooLarge),
        ];
        for (value, expected) in cases {
            let body = json!({"playerName": "Ada", "score": value});
            assert_eq!(NewScore::from_json(&body), Err(expected), "body {body}");
        }
    }

    #[test]
    fn test_score_must_fit_store() {
        assert_eq!(
            NewScore::from_json(&json!({"playerName": "Ada", "score": u64::MAX})),
            Err(ValidationError::ScoreTooLarge)
        );
        assert!(NewScore::new("Ada", MAX_SCORE).is_ok());
    }

    #[test]
    fn test_name_limit_counts_chars_not_bytes() {
        let name = "é".repeat(20);
        assert!(NewScore::new(&name, 1).is_ok());
    }

    #[test]
    fn test_entry_wire_format() {
        let value = serde_json::to_value(entry("Ada", 42, 0)).unwrap();
        assert_eq!(value["playerName"], "Ada");
        assert_eq!(value["score"], 42);
        assert!(value["createdAt"].as_str().unwrap().starts_with("2023-11-14T"));
        assert!(value.get("id").is_some());
    }

    #[test]
    fn test_rank_breaks_ties_by_earliest() {
        let ranked = top(
            vec![
                entry("late", 100, 50),
                entry("low", 10, 0),
                entry("early", 100, 5),
                entry("high", 500, 99),
            ],
            3,
        );
        let names: Vec<_> = ranked.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, ["high", "early", "late"]);
    }

    #[test]
    fn test_format_age() {
        let now = at(0);
        assert_eq!(format_age(now, now), "Just now");
        assert_eq!(format_age(now - Duration::minutes(1), now), "1 min ago");
        assert_eq!(format_age(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(format_age(now - Duration::days(1), now), "Yesterday");
        assert_eq!(format_age(now - Duration::days(4), now), "4 days ago");
        assert_eq!(format_age(at(-30 * 86_400), now), "10/15/23");
    }
}
