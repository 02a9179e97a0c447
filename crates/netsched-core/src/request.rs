use chrono_tz::Tz;
use netsched_shared::{
  Interval,
  ScheduleRequest
};

use crate::datetime;
use crate::draft::TaskKind;
use crate::error::RequestError;
use crate::form::{
  FIELD_ACTIVE,
  FIELD_CHART_TYPE,
  FIELD_DATETIME,
  FIELD_INTERVAL,
  FIELD_NAME,
  FIELD_RECENT_DAYS,
  FIELD_TEST_TYPE,
  FormSnapshot
};

/// Builds the JSON body for a create or
/// edit from what the form currently
/// holds.
pub fn build_request(
  snapshot: &FormSnapshot,
  tz: &Tz
) -> Result<ScheduleRequest, RequestError>
{
  let raw_datetime = snapshot
    .get(FIELD_DATETIME)
    .unwrap_or_default();
  let datetime =
    datetime::parse_input(raw_datetime)
      .and_then(|naive| {
        datetime::to_utc_iso(&naive, tz)
      })
      .ok_or_else(|| {
        RequestError::InvalidDatetime(
          raw_datetime.to_string()
        )
      })?;

  let interval = match snapshot
    .get(FIELD_INTERVAL)
    .map(str::trim)
  {
    | None | Some("") => Interval::Daily,
    | Some(raw) => {
      raw.parse::<Interval>().map_err(
        |_| {
          RequestError::InvalidInterval(
            raw.to_string()
          )
        }
      )?
    }
  };

  let mut request = ScheduleRequest {
    name: snapshot
      .get(FIELD_NAME)
      .unwrap_or_default()
      .to_string(),
    datetime,
    recurring: snapshot.recurring(),
    interval,
    active: snapshot
      .is_checked(FIELD_ACTIVE),
    test_type: None,
    chart_type: None,
    recent_days: None
  };

  match snapshot
    .kind()
    .unwrap_or(TaskKind::Chart)
  {
    | TaskKind::Test => {
      request.test_type = Some(
        snapshot
          .get(FIELD_TEST_TYPE)
          .unwrap_or_default()
          .to_string()
      );
    }
    | TaskKind::Chart => {
      request.chart_type = Some(
        snapshot
          .get(FIELD_CHART_TYPE)
          .unwrap_or_default()
          .to_string()
      );
      let days = snapshot
        .get(FIELD_RECENT_DAYS)
        .map(str::trim)
        .filter(|raw| !raw.is_empty());
      if snapshot.historic()
        && let Some(raw) = days
      {
        request.recent_days = Some(
          raw.parse::<u32>().map_err(
            |_| {
              RequestError::InvalidRecentDays(
                raw.to_string()
              )
            }
          )?
        );
      }
    }
  }

  Ok(request)
}
