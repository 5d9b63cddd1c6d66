use crate::clock::Clock;
use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire format of `currentDateTime`: ISO-8601 local date-time with milliseconds.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// # Service Status
///
/// The only value the producer ever reports is `"OK"`. Any other string is
/// rejected on deserialization so a consumer never prints a value it does
/// not understand.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Status Response
///
/// Body of `GET /status`.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "OK",
///   "currentDateTime": "2017-06-27T13:54:29.214"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct StatusResponse {
    pub status: Status,
    #[serde(rename = "currentDateTime", with = "iso_millis")]
    #[schema(value_type = String, example = "2017-06-27T13:54:29.214")]
    pub current_date_time: NaiveDateTime,
}

impl StatusResponse {
    /// Builds an `OK` response for `instant`, truncated to whole milliseconds.
    pub fn ok_at(instant: NaiveDateTime) -> Self {
        Self {
            status: Status::Ok,
            current_date_time: instant.trunc_subsecs(3),
        }
    }

    pub fn now(clock: &dyn Clock) -> Self {
        Self::ok_at(clock.now())
    }

    pub fn formatted_date_time(&self) -> String {
        self.current_date_time.format(DATE_TIME_FORMAT).to_string()
    }
}

mod iso_millis {
    use super::DATE_TIME_FORMAT;
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(DATE_TIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<NaiveDateTime>()
            .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.naive_utc()))
            .map_err(|_| D::Error::custom(format!("`{raw}` is not an ISO-8601 date-time")))
    }
}
