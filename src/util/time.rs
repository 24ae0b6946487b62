use aws_smithy_types::date_time::{DateTime, Format};
use time::OffsetDateTime;

use crate::error::{Error, Result};

/// Formats an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`). Sub-second
/// precision is dropped.
pub(crate) fn http_date(at: OffsetDateTime) -> Result<String> {
    DateTime::from_secs(at.unix_timestamp())
        .fmt(Format::HttpDate)
        .map_err(|err| Error::invalid_input(format!("can't format {at} as an HTTP date: {err}")))
}

pub(crate) fn from_smithy(at: &DateTime) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(at.as_nanos()).ok()
}

pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
