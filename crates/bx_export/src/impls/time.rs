use std::time::{Duration, SystemTime};

use crate::{Export, ExportKind};

#[inline]
fn saturating_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Milliseconds since the Unix epoch, negative before it.
impl Export for SystemTime {
    fn export_kind(&self) -> ExportKind<'_> {
        let millis = match self.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(after) => saturating_millis(after),
            Err(before) => -saturating_millis(before.duration()),
        };
        ExportKind::Date(millis)
    }
}

#[cfg(feature = "chrono")]
mod chrono_impls {
    use chrono::{DateTime, NaiveDateTime, TimeZone};

    use crate::{Export, ExportKind};

    impl<Tz: TimeZone> Export for DateTime<Tz> {
        #[inline]
        fn export_kind(&self) -> ExportKind<'_> {
            ExportKind::Date(self.timestamp_millis())
        }
    }

    /// Interpreted as UTC.
    impl Export for NaiveDateTime {
        #[inline]
        fn export_kind(&self) -> ExportKind<'_> {
            ExportKind::Date(self.and_utc().timestamp_millis())
        }
    }
}
