use anyhow::{anyhow, Result};
use pixela::date_string;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

const ISO_DATE: &[time::format_description::FormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Turns a date argument into Pixela's `yyyyMMdd` key.
///
/// Accepts `today`, `yesterday`, `YYYY-MM-DD` or an already formatted
/// `yyyyMMdd` string. Anything else is passed through untouched and left for
/// the service to reject.
pub fn resolve_date(arg: Option<&str>) -> Result<String> {
    resolve_date_from(arg, today())
}

fn resolve_date_from(arg: Option<&str>, today: Date) -> Result<String> {
    match arg.map(str::trim) {
        None | Some("today") => Ok(date_string(today)),
        Some("yesterday") => {
            let yesterday = today
                .checked_sub(Duration::days(1))
                .ok_or_else(|| anyhow!("date out of range"))?;
            Ok(date_string(yesterday))
        }
        Some(value) if value.contains('-') => {
            let date = Date::parse(value, ISO_DATE)
                .map_err(|err| anyhow!("Invalid date '{value}': {err}"))?;
            Ok(date_string(date))
        }
        Some(value) => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_date_from;
    use time::macros::date;

    #[test]
    fn defaults_to_today() {
        let today = date!(2021 - 03 - 01);
        assert_eq!(resolve_date_from(None, today).unwrap(), "20210301");
        assert_eq!(resolve_date_from(Some("today"), today).unwrap(), "20210301");
    }

    #[test]
    fn yesterday_crosses_month_boundary() {
        let today = date!(2021 - 03 - 01);
        assert_eq!(
            resolve_date_from(Some("yesterday"), today).unwrap(),
            "20210228"
        );
    }

    #[test]
    fn converts_iso_dates() {
        let today = date!(2021 - 03 - 01);
        assert_eq!(
            resolve_date_from(Some("2020-12-31"), today).unwrap(),
            "20201231"
        );
        assert!(resolve_date_from(Some("2020-13-01"), today).is_err());
    }

    #[test]
    fn passes_compact_dates_through() {
        let today = date!(2021 - 03 - 01);
        assert_eq!(
            resolve_date_from(Some("20200101"), today).unwrap(),
            "20200101"
        );
    }
}
