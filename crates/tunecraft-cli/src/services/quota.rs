//! Daily generation quota and the demo profile.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use tunecraft_spec::{Plan, Profile, Quota};

use super::library::Library;

/// Start of the UTC day after `now`.
pub fn next_utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now.date_naive().succ_opt().unwrap_or(NaiveDate::MAX);
    Utc.from_utc_datetime(&tomorrow.and_time(NaiveTime::MIN))
}

/// Computes the free-plan quota at `now`.
///
/// # Arguments
/// * `library` - Tracks generated so far
/// * `limit` - Generations allowed per UTC day
/// * `now` - Current time
pub fn quota_at(library: &Library, limit: u32, now: DateTime<Utc>) -> Quota {
    let used = library.generated_on(now.date_naive());
    Quota::new(Plan::Free, limit, used, next_utc_midnight(now))
}

/// The single profile the demo service serves.
pub fn demo_profile(quota: Quota) -> Profile {
    Profile {
        id: "usr-demo".to_string(),
        name: "Demo Creator".to_string(),
        email: "demo@tunecraft.dev".to_string(),
        plan: quota.plan,
        quota,
    }
}
