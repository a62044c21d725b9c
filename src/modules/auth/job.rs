use super::repository;
use crate::types::Context;
use std::sync::Arc;

/// Every ten minutes, on the minute.
pub const SCHEDULE: &str = "0 */10 * * * *";

/// Drops expired sessions and any OTPs the store does not expire on its own.
pub async fn cleanup(ctx: Arc<Context>) -> Result<(), apalis::prelude::Error> {
    match repository::session::delete_expired(&ctx.db_conn.pool).await {
        Ok(count) if count > 0 => tracing::info!("Deleted {} expired sessions", count),
        Ok(_) => tracing::debug!("No expired sessions to delete"),
        Err(_) => tracing::warn!("Failed to delete expired sessions"),
    }

    match ctx.otp_store.purge_expired().await {
        Ok(count) if count > 0 => tracing::info!(
            "Purged {} expired OTPs from {} store",
            count,
            ctx.otp_store.backend()
        ),
        Ok(_) => (),
        Err(_) => tracing::warn!("Failed to purge expired OTPs"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apalis::cron::Schedule;
    use std::str::FromStr;

    #[test]
    fn schedule_fires_every_ten_minutes() {
        let schedule = Schedule::from_str(SCHEDULE).unwrap();
        let mut upcoming = schedule.upcoming(chrono::Utc);
        let first = upcoming.next().unwrap();
        let second = upcoming.next().unwrap();

        assert_eq!((second - first).num_minutes(), 10);
    }
}
