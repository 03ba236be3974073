use chrono::NaiveDate;

/// Source of "today" for calendar computations.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock evaluated in the church's configured time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: chrono_tz::Tz,
}

impl SystemClock {
    #[must_use]
    pub const fn new(tz: chrono_tz::Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
