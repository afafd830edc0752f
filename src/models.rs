// Data shapes returned by the Veo API. The server controls the schema and
// only part of it is known, so every field is lenient: absent or null
// values fall back to defaults, and the loosely-typed parts (`team`,
// `info`, `permissions`) are kept as dynamic JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Treat an explicit `null` the same as a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `team` field comes back as a plain name, an embedded object, or
/// occasionally something else entirely depending on the endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Team {
    Name(String),
    Object(Map<String, Value>),
    Other(Value),
}

impl Team {
    /// Best-effort display name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Team::Name(name) => Some(name.as_str()),
            Team::Object(obj) => obj
                .get("name")
                .or_else(|| obj.get("slug"))
                .and_then(Value::as_str),
            Team::Other(_) => None,
        }
    }
}

/// A recording as returned by the club listing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Recording {
    #[serde(default, deserialize_with = "null_default")]
    pub identifier: String,
    #[serde(default, deserialize_with = "null_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// Length in seconds.
    #[serde(default, deserialize_with = "null_default")]
    pub duration: u64,
    #[serde(default)]
    pub camera: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub reel_url: Option<String>,
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default)]
    pub privacy: Option<String>,
    #[serde(default)]
    pub permissions: Value,
    #[serde(default, deserialize_with = "null_default")]
    pub is_accessible: bool,
}

/// Full match record from `/matches/{identifier}/`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RecordingDetails {
    #[serde(default, deserialize_with = "null_default")]
    pub identifier: String,
    #[serde(default, deserialize_with = "null_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_default")]
    pub duration: u64,
    #[serde(default)]
    pub camera: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub reel_url: Option<String>,
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default)]
    pub privacy: Option<String>,
    #[serde(default)]
    pub permissions: Value,
    #[serde(default, deserialize_with = "null_default")]
    pub is_accessible: bool,

    #[serde(default)]
    pub own_team_home_or_away: Option<String>,
    #[serde(default)]
    pub own_team_color: Option<String>,
    #[serde(default)]
    pub own_team_formation: Option<String>,
    #[serde(default)]
    pub opponent_team_name: Option<String>,
    #[serde(default)]
    pub opponent_club_name: Option<String>,
    #[serde(default)]
    pub opponent_short_name: Option<String>,
    #[serde(default)]
    pub opponent_team_color: Option<String>,
    #[serde(default)]
    pub opponent_team_formation: Option<String>,

    /// Free-form match info; holds `stats.score`, `stats.score_aggregated`
    /// and `age_group` among others.
    #[serde(default)]
    pub info: Value,
}

/// Final score as reported in the match info.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub own: Option<f64>,
    pub opponent: Option<f64>,
}

impl Score {
    fn from_value(value: &Value) -> Option<Score> {
        let obj = value.as_object()?;
        let score = Score {
            own: obj.get("own").and_then(Value::as_f64),
            opponent: obj.get("opponent").and_then(Value::as_f64),
        };
        if score.own.is_none() && score.opponent.is_none() {
            None
        } else {
            Some(score)
        }
    }
}

impl RecordingDetails {
    /// Score from `info.stats`, preferring the aggregated score (the actual
    /// final result) over the plain one.
    pub fn score(&self) -> Option<Score> {
        let stats = self.info.get("stats")?;
        match stats.get("score_aggregated") {
            Some(agg) if agg.is_object() => Score::from_value(agg),
            _ => stats.get("score").and_then(Score::from_value),
        }
    }

    pub fn age_group(&self) -> Option<&str> {
        self.info
            .get("age_group")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team.as_ref().and_then(Team::name)
    }
}

/// A timed segment of a match. `timeframe` is `[start, end]` in seconds
/// from the beginning of the recording.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Period {
    #[serde(default, deserialize_with = "null_default")]
    pub timeframe: Vec<f64>,
}

impl Period {
    pub fn start_offset(&self) -> Option<u64> {
        self.timeframe
            .first()
            .filter(|secs| secs.is_finite() && **secs >= 0.0)
            .map(|secs| secs.floor() as u64)
    }
}

/// Recordings gathered by a list call plus the server-reported total.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ListRecordingsResult {
    pub recordings: Vec<Recording>,
    /// From the first page's `x-veo-total-count` header; 0 when missing.
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn team_decodes_from_any_shape() {
        let cases = [
            json!({"identifier": "a", "team": null}),
            json!({"identifier": "a", "team": "u12-boys"}),
            json!({"identifier": "a", "team": {"name": "U12 Boys", "slug": "u12-boys"}}),
            json!({"identifier": "a", "team": 42}),
            json!({"identifier": "a"}),
        ];
        for case in cases {
            let details: RecordingDetails = serde_json::from_value(case.clone())
                .unwrap_or_else(|e| panic!("{case} failed: {e}"));
            assert_eq!(details.identifier, "a");
        }
    }

    #[test]
    fn team_name_reads_string_and_object() {
        let named: RecordingDetails =
            serde_json::from_value(json!({"team": "Rovers"})).unwrap();
        assert_eq!(named.team_name(), Some("Rovers"));

        let object: RecordingDetails =
            serde_json::from_value(json!({"team": {"name": "Rovers U10"}})).unwrap();
        assert_eq!(object.team_name(), Some("Rovers U10"));

        let absent: RecordingDetails = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.team_name(), None);
    }

    #[test]
    fn null_scalars_fall_back_to_defaults() {
        let rec: Recording = serde_json::from_value(json!({
            "identifier": "id1",
            "title": null,
            "duration": null,
            "is_accessible": null,
            "permissions": ["view"],
            "created": "2024-03-02T10:15:00Z"
        }))
        .unwrap();
        assert_eq!(rec.title, "");
        assert_eq!(rec.duration, 0);
        assert!(!rec.is_accessible);
        assert!(rec.permissions.is_array());
        assert!(rec.created.is_some());
    }

    #[test]
    fn score_prefers_aggregated() {
        let details: RecordingDetails = serde_json::from_value(json!({
            "info": {
                "stats": {
                    "score": {"own": 1, "opponent": 1},
                    "score_aggregated": {"own": 3, "opponent": 2}
                },
                "age_group": "U12"
            }
        }))
        .unwrap();
        assert_eq!(
            details.score(),
            Some(Score { own: Some(3.0), opponent: Some(2.0) })
        );
        assert_eq!(details.age_group(), Some("U12"));
    }

    #[test]
    fn score_falls_back_to_plain_score() {
        let details: RecordingDetails = serde_json::from_value(json!({
            "info": {"stats": {"score": {"own": 0, "opponent": 4}}}
        }))
        .unwrap();
        assert_eq!(
            details.score(),
            Some(Score { own: Some(0.0), opponent: Some(4.0) })
        );
    }

    #[test]
    fn unexpected_info_shapes_yield_nothing() {
        for info in [json!("n/a"), json!([1, 2]), json!({"stats": "none"}), json!(null)] {
            let details: RecordingDetails =
                serde_json::from_value(json!({ "info": info })).unwrap();
            assert_eq!(details.score(), None);
            assert_eq!(details.age_group(), None);
        }
    }

    #[test]
    fn period_start_offset() {
        let period: Period = serde_json::from_value(json!({"timeframe": [125.7, 2800]})).unwrap();
        assert_eq!(period.start_offset(), Some(125));

        let empty: Period = serde_json::from_value(json!({"timeframe": []})).unwrap();
        assert_eq!(empty.start_offset(), None);

        let missing: Period = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.start_offset(), None);
    }
}
