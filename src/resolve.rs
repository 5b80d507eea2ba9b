//! Maps a year to its remote archive URL and local file name.

use chrono::{NaiveDateTime, Weekday};

use crate::error::FetchError;

/// Portal directory holding one `<year>.zip` archive per year.
pub const DEFAULT_BASE_URL: &str = "https://portal.inmet.gov.br/uploads/dadoshistoricos";

const LAST_MODIFIED_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
const LAST_MODIFIED_DATE_FORMAT: &str = "%d %b %Y %H:%M:%S GMT";

/// Returns the portal URL of the archive for `year`.
pub fn build_url(year: i32) -> String {
    build_url_with_base(DEFAULT_BASE_URL, year)
}

pub fn build_url_with_base(base: &str, year: i32) -> String {
    format!("{}/{}.zip", base.trim_end_matches('/'), year)
}

/// Parses an HTTP date such as `Wed, 21 Oct 2015 07:28:00 GMT`.
///
/// Only the RFC 1123 shape is accepted. The zone must read `GMT` or `UTC`;
/// the timestamp is returned without a zone attached. The weekday must be a
/// valid abbreviation but is not checked against the date.
pub fn parse_last_modified(value: &str) -> Result<NaiveDateTime, FetchError> {
    let normalised = match value.strip_suffix(" UTC") {
        Some(stem) => format!("{stem} GMT"),
        None => value.to_string(),
    };

    let parsed = match normalised.split_once(", ") {
        Some((weekday, date)) if weekday.len() == 3 && weekday.parse::<Weekday>().is_ok() => {
            NaiveDateTime::parse_from_str(date, LAST_MODIFIED_DATE_FORMAT)
        }
        _ => NaiveDateTime::parse_from_str(&normalised, LAST_MODIFIED_FORMAT),
    };

    parsed.map_err(|source| {
        FetchError::InvalidLastModified {
            value: value.to_string(),
            source,
        }
    })
}

pub fn build_local_filename(year: i32, last_modified: &NaiveDateTime) -> String {
    format!("inmet-bdmep_{}_{}.zip", year, last_modified.format("%Y%m%d"))
}

// -- Tests -------------------------------------------------------------------
