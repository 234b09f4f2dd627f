use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::macros::string_enum;

string_enum! {
    /// Persisted timer state. Only READY is produced by recreation; the
    /// begin/pause/continue/stop transitions keep their values as opaque
    /// persisted fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum TimerState {
        Ready => "READY",
        Running => "RUNNING",
        Paused => "PAUSED",
        Stopped => "STOPPED",
    }
}

impl TimerState {
    pub fn caption(&self) -> &'static str {
        match self {
            TimerState::Ready => "Ready",
            TimerState::Running => "Running",
            TimerState::Paused => "Paused",
            TimerState::Stopped => "Stopped",
        }
    }
}

/// Timer row joined with its team caption.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SqrTimerRow {
    pub id: i64,
    pub square_id: i64,
    pub team_id: i64,
    pub team_caption: String,
    pub caption: String,
    pub state: TimerState,
    pub count: i64,
    pub begin_time: Option<DateTime<Utc>>,
    pub pause_time: Option<DateTime<Utc>>,
    pub continue_time: Option<DateTime<Utc>>,
    pub stop_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStateView {
    pub key: TimerState,
    pub caption: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqrTimer {
    pub id: i64,
    pub square_id: i64,
    pub team_id: i64,
    pub team_caption: String,
    pub caption: String,
    pub state: TimerStateView,
    pub count: i64,
    /// Remaining time in seconds. Not yet derived from the transition
    /// timestamps; reported as a constant placeholder.
    pub count_left: i64,
    pub begin_time: Option<DateTime<Utc>>,
    pub pause_time: Option<DateTime<Utc>>,
    pub continue_time: Option<DateTime<Utc>>,
    pub stop_time: Option<DateTime<Utc>>,
}

impl From<SqrTimerRow> for SqrTimer {
    fn from(row: SqrTimerRow) -> Self {
        SqrTimer {
            id: row.id,
            square_id: row.square_id,
            team_id: row.team_id,
            team_caption: row.team_caption,
            caption: row.caption,
            state: TimerStateView {
                key: row.state,
                caption: row.state.caption().to_string(),
            },
            count: row.count,
            count_left: 0,
            begin_time: row.begin_time,
            pause_time: row.pause_time,
            continue_time: row.continue_time,
            stop_time: row.stop_time,
        }
    }
}

/// Append-only history row recorded at every timer state transition.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SqrTimerDetail {
    pub id: i64,
    pub timer_id: i64,
    pub state: TimerState,
    pub time: DateTime<Utc>,
    pub description: Option<String>,
}
