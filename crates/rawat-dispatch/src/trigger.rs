//! The once-per-day dispatch trigger.
//!
//! A recurring-timer abstraction rather than a cron expression: the next
//! fire time is computed directly from the current instant plus the fixed
//! timezone, then slept until with a plain tokio timer. The trigger is
//! either idle (sleeping until the next fire) or running one pipeline
//! pass. A failed run never retries and never blocks the next day.

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use chrono_tz::Tz;

use rawat_core::config::DispatchConfig;
use rawat_core::error::{RawatError, Result};

use crate::pipeline::Dispatcher;
use crate::plan::PlanOptions;
use crate::sender::CancelFlag;

/// Fires once per civil day at a fixed local wall-clock time.
#[derive(Debug, Clone)]
pub struct DailyTrigger {
    hour: u32,
    minute: u32,
    tz: Tz,
}

impl DailyTrigger {
    pub fn new(hour: u32, minute: u32, tz: Tz) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(RawatError::Config(format!(
                "invalid send time {hour:02}:{minute:02}"
            )));
        }
        Ok(Self { hour, minute, tz })
    }

    pub fn from_config(config: &DispatchConfig) -> Result<Self> {
        let tz: Tz = config.timezone.parse().map_err(|_| {
            RawatError::Config(format!("unknown timezone '{}'", config.timezone))
        })?;
        Self::new(config.send_hour, config.send_minute, tz)
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// The next instant the trigger fires, strictly after `now`.
    ///
    /// Today at HH:MM local if that is still ahead, otherwise the same
    /// time tomorrow.
    pub fn next_fire_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_now = now.with_timezone(&self.tz);
        let mut date = local_now.date_naive();
        loop {
            // hour/minute are range-checked at construction
            let Some(candidate) = date.and_hms_opt(self.hour, self.minute, 0) else {
                date += ChronoDuration::days(1);
                continue;
            };
            if let Some(fire) = self.tz.from_local_datetime(&candidate).earliest() {
                let fire = fire.with_timezone(&Utc);
                if fire > now {
                    return fire;
                }
            }
            date += ChronoDuration::days(1);
        }
    }

    /// Run the trigger loop forever. Each fire captures "today" in the
    /// fixed timezone and pushes one pass through the shared pipeline.
    pub async fn run(&self, dispatcher: Arc<Dispatcher>) {
        tracing::info!(
            "Daily dispatch scheduler initialized - messages go out every day at {:02}:{:02} ({})",
            self.hour,
            self.minute,
            self.tz
        );

        loop {
            let now = Utc::now();
            let next = self.next_fire_after(now);
            let wait = (next - now).to_std().unwrap_or_default();
            tracing::debug!("Next dispatch fire at {next} (in {}s)", wait.as_secs());
            tokio::time::sleep(wait).await;

            let today = Utc::now().with_timezone(&self.tz).date_naive();
            match dispatcher
                .dispatch_for_date(today, PlanOptions::default(), &CancelFlag::new())
                .await
            {
                Ok(outcome) => {
                    tracing::info!(
                        "Daily dispatch for {} complete: {} delivered, {} failed",
                        outcome.date,
                        outcome.results.individual_messages.len()
                            + usize::from(outcome.results.group_message.is_some()),
                        outcome.results.errors.len()
                    );
                }
                Err(RawatError::NoAssignment(_)) => {
                    tracing::info!("No assignments for today (weekend or holiday)");
                }
                Err(e) => {
                    // Configuration faults abort this day's run only.
                    tracing::error!("Daily dispatch for {today} aborted: {e}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn jakarta_trigger() -> DailyTrigger {
        DailyTrigger::new(7, 0, chrono_tz::Asia::Jakarta).unwrap()
    }

    #[test]
    fn test_fires_today_when_time_is_ahead() {
        // 2025-02-10 22:00 UTC = 2025-02-11 05:00 Jakarta (UTC+7); the
        // 07:00 slot that day is still ahead.
        let now = Utc.with_ymd_and_hms(2025, 2, 10, 22, 0, 0).unwrap();
        let fire = jakarta_trigger().next_fire_after(now);
        assert_eq!(fire, Utc.with_ymd_and_hms(2025, 2, 11, 0, 0, 0).unwrap());
        let local = fire.with_timezone(&chrono_tz::Asia::Jakarta);
        assert_eq!((local.hour(), local.minute()), (7, 0));
    }

    #[test]
    fn test_fires_tomorrow_when_time_has_passed() {
        // 08:00 Jakarta is past the 07:00 slot → tomorrow.
        let now = Utc.with_ymd_and_hms(2025, 2, 10, 1, 0, 0).unwrap();
        let fire = jakarta_trigger().next_fire_after(now);
        assert_eq!(fire, Utc.with_ymd_and_hms(2025, 2, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_fire_is_strictly_after_now() {
        // Exactly at fire time → next day, not an immediate double fire.
        let now = Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap();
        let fire = jakarta_trigger().next_fire_after(now);
        assert!(fire > now);
        assert_eq!(fire, Utc.with_ymd_and_hms(2025, 2, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_rejects_invalid_wall_clock_time() {
        assert!(DailyTrigger::new(24, 0, chrono_tz::Asia::Jakarta).is_err());
        assert!(DailyTrigger::new(7, 60, chrono_tz::Asia::Jakarta).is_err());
    }

    #[test]
    fn test_from_config_rejects_unknown_timezone() {
        let mut config = DispatchConfig::default();
        config.timezone = "Mars/Olympus".into();
        assert!(matches!(
            DailyTrigger::from_config(&config),
            Err(RawatError::Config(_))
        ));
        config.timezone = "Asia/Jakarta".into();
        assert!(DailyTrigger::from_config(&config).is_ok());
    }
}
