//! Downloads each requested year in turn.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::download::{DownloadOutcome, Fetcher};

/// Downloads `years` one after another into `datadir`.
///
/// The first failure aborts the run; later years are not attempted.
pub async fn fetch(fetcher: &Fetcher, years: &[i32], datadir: &Path) -> Result<Vec<DownloadOutcome>> {
    let mut outcomes = Vec::with_capacity(years.len());

    for &year in years {
        let outcome = fetcher
            .download_year(year, datadir)
            .await
            .with_context(|| format!("Failed to download archive for {}", year))?;
        outcomes.push(outcome);
    }

    let downloaded = outcomes
        .iter()
        .filter(|o| matches!(o, DownloadOutcome::Downloaded { .. }))
        .count();
    info!(
        downloaded,
        skipped = outcomes.len() - downloaded,
        "finished"
    );

    Ok(outcomes)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::test_support::{spawn_portal, Portal};

    #[tokio::test]
    async fn should_stop_at_first_failure() {
        let portal = Arc::new(Portal::default());
        let base_url = spawn_portal(portal.clone()).await;
        let fetcher = Fetcher::new(base_url).with_progress(false);
        let tmp_dir = TempDir::new().unwrap();

        let err = fetch(&fetcher, &[2015, 1999, 2015], tmp_dir.path()).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to download archive for 1999");
        // The trailing 2015 is never requested.
        assert_eq!(portal.heads(), 2);
        assert_eq!(portal.gets(), 1);
    }

    #[tokio::test]
    async fn should_return_outcomes_in_order() {
        let portal = Arc::new(Portal::default());
        let base_url = spawn_portal(portal.clone()).await;
        let fetcher = Fetcher::new(base_url).with_progress(false);
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("inmet-bdmep_2015_20151021.zip");

        let outcomes = fetch(&fetcher, &[2015, 2015], tmp_dir.path()).await.unwrap();

        assert_eq!(
            outcomes,
            vec![
                DownloadOutcome::Downloaded {
                    path: path.clone(),
                    bytes: 4096
                },
                DownloadOutcome::AlreadyPresent(path),
            ]
        );
        assert_eq!(portal.heads(), 2);
        assert_eq!(portal.gets(), 1);
    }

    #[tokio::test]
    async fn should_do_nothing_without_years() {
        let fetcher = Fetcher::default().with_progress(false);
        let tmp_dir = TempDir::new().unwrap();

        let outcomes = fetch(&fetcher, &[], tmp_dir.path()).await.unwrap();

        assert!(outcomes.is_empty());
    }
}
