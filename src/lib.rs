//! Downloads yearly INMET BDMEP historical weather archives.
//!
//! Each archive is stored as `inmet-bdmep_<year>_<YYYYMMDD>.zip`, dated by the
//! portal's `Last-Modified` header, and is not fetched again while a file with
//! that name exists.

pub mod cli;
pub mod download;
pub mod error;
pub mod resolve;

#[cfg(test)]
mod test_support;
