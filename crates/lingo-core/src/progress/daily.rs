use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::{SessionClient, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGain {
    /// Unix timestamp, seconds.
    pub time: i64,
    pub xp: u32,
}

/// Fields selected by the daily-progress lookup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyProgressData {
    pub xp_goal: Option<u32>,
    pub xp_gains: Option<Vec<XpGain>>,
    pub streak_data: Option<StreakData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreakData {
    pub updated_timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyXp {
    pub xp_goal: u32,
    pub xp_today: u32,
    pub lessons_today: Vec<XpGain>,
}

/// Start of "today" for XP purposes, as a Unix timestamp.
///
/// `xpGains` lists the lessons of the last day the user practised, and the
/// streak's update timestamp marks that day's midnight. The reported time is
/// sometimes in the future relative to the local clock; in that case the
/// cutoff falls back to local midnight. It is never moved later than the
/// reported value.
pub fn update_cutoff<Tz: TimeZone>(streak_update_epoch: i64, now: &DateTime<Tz>) -> Result<i64> {
    let tz = now.timezone();
    let local_midnight = start_of_day(now);

    let reported_midnight = tz.timestamp_opt(streak_update_epoch, 0).single().ok_or_else(|| {
        Error::MissingField(format!(
            "streakData.updatedTimestamp out of range: {}",
            streak_update_epoch
        ))
    })?;

    let discrepancy = (local_midnight - reported_midnight.clone()).min(TimeDelta::zero());
    let cutoff = reported_midnight + discrepancy;
    Ok(cutoff.timestamp())
}

/// First instant of `now`'s local day.
///
/// When a DST gap swallows midnight the day starts where the gap ends.
fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let naive_midnight = now.date_naive().and_time(NaiveTime::MIN);
    (0..24 * 60)
        .map(|minute| naive_midnight + TimeDelta::minutes(minute))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .unwrap_or_else(|| now.clone())
}

/// Today's XP measured against the local clock.
pub fn today(xp_goal: u32, xp_gains: &[XpGain], streak_update_epoch: i64) -> Result<DailyXp> {
    today_at(xp_goal, xp_gains, streak_update_epoch, &Local::now())
}

pub fn today_at<Tz: TimeZone>(
    xp_goal: u32,
    xp_gains: &[XpGain],
    streak_update_epoch: i64,
    now: &DateTime<Tz>,
) -> Result<DailyXp> {
    let cutoff = update_cutoff(streak_update_epoch, now)?;
    let lessons_today: Vec<XpGain> = xp_gains
        .iter()
        .filter(|gain| gain.time > cutoff)
        .copied()
        .collect();
    let xp_today = lessons_today.iter().map(|gain| gain.xp).sum();

    debug!(
        "Cutoff {}: {} of {} gains count for today",
        cutoff,
        lessons_today.len(),
        xp_gains.len()
    );

    Ok(DailyXp {
        xp_goal,
        xp_today,
        lessons_today,
    })
}

/// Fetch the XP goal, gains and streak data for the session's user.
pub fn fetch_daily_progress<T: Transport>(client: &SessionClient<T>) -> Result<DailyProgressData> {
    let user_id = client.user_id().to_string();
    let url = client
        .config()
        .user_by_id_url(&user_id, &["xpGoal", "xpGains", "streakData"]);
    client.get_json(&url)
}

impl DailyProgressData {
    pub fn today_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<DailyXp> {
        let xp_goal = self
            .xp_goal
            .ok_or_else(|| Error::MissingField("xpGoal".to_string()))?;
        let xp_gains = self
            .xp_gains
            .as_deref()
            .ok_or_else(|| Error::MissingField("xpGains".to_string()))?;
        let updated = self
            .streak_data
            .as_ref()
            .and_then(|s| s.updated_timestamp)
            .ok_or_else(|| Error::MissingField("streakData.updatedTimestamp".to_string()))?;

        today_at(xp_goal, xp_gains, updated, now)
    }
}
