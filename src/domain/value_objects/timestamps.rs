use time::{OffsetDateTime, UtcOffset};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub OffsetDateTime);

impl Timestamp {
    pub fn now_utc() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Current UTC time with the sub-second part dropped.
    ///
    /// Subscription created/modified stamps are stored at whole-second precision.
    pub fn now_utc_seconds() -> Self {
        Self::now_utc().truncate_to_seconds()
    }

    pub fn from(dt: OffsetDateTime) -> Self {
        Self(dt.to_offset(UtcOffset::UTC))
    }

    pub fn truncate_to_seconds(self) -> Self {
        // Zero is always a valid nanosecond value.
        Self(self.0.replace_nanosecond(0).unwrap_or(self.0))
    }

    /// Returns the inner UTC `OffsetDateTime` without consuming the wrapper.
    pub fn as_inner(&self) -> OffsetDateTime {
        self.0
    }

    /// Consumes the wrapper and returns the inner UTC `OffsetDateTime`.
    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::UtcOffset;
    use time::macros::datetime;

    #[test]
    fn given_now_utc_when_called_should_return_utc_offset() {
        let result = Timestamp::now_utc();
        assert_eq!(result.as_inner().offset(), UtcOffset::UTC);
    }

    #[test]
    fn given_from_with_non_utc_offset_when_called_should_store_same_instant_in_utc() {
        let offset = UtcOffset::from_hms(-5, 0, 0).expect("valid offset");
        let dt = OffsetDateTime::now_utc().to_offset(offset);
        let result = Timestamp::from(dt);
        assert_eq!(result.as_inner().offset(), UtcOffset::UTC);
        assert_eq!(result.as_inner().unix_timestamp(), dt.unix_timestamp());
    }

    #[test]
    fn given_fractional_seconds_when_truncated_should_drop_nanoseconds() {
        let ts = Timestamp::from(datetime!(2024-05-01 10:20:30.987654 UTC));
        let result = ts.truncate_to_seconds();
        assert_eq!(result.as_inner(), datetime!(2024-05-01 10:20:30 UTC));
    }

    #[test]
    fn given_now_utc_seconds_when_called_should_have_no_subsecond_part() {
        let result = Timestamp::now_utc_seconds();
        assert_eq!(result.as_inner().nanosecond(), 0);
    }
}
