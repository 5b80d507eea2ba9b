//! Expands year tokens such as `2001` and `1990:1995` into years.

use crate::error::YearSpecError;

/// Expands each token in order. Ranges are inclusive; overlapping ranges are
/// not deduplicated and a range whose start exceeds its end yields nothing.
pub fn expand_years<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<i32>, YearSpecError> {
    let mut years = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        match token.split_once(':') {
            Some((start, end)) => {
                let invalid = || YearSpecError::InvalidRange(token.to_string());
                let start = parse_year(start).map_err(|_| invalid())?;
                let end = parse_year(end).map_err(|_| invalid())?;
                years.extend(start..=end);
            }
            None => years.push(parse_year(token)?),
        }
    }

    Ok(years)
}

fn parse_year(s: &str) -> Result<i32, YearSpecError> {
    s.trim()
        .parse()
        .map_err(|_| YearSpecError::InvalidYear(s.to_string()))
}

// -- Tests -------------------------------------------------------------------
