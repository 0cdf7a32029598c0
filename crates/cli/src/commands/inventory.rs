//! `bridge-cli sync-inventory`: run one reconciliation now.

use super::{CommandError, load_state};

pub async fn run() -> Result<(), CommandError> {
    let state = load_state()?;
    let report = state.reconciler().reconcile().await?;

    println!(
        "updated: {}  failed: {}  skipped: {}",
        report.updated, report.failed, report.skipped
    );
    if report.failed > 0 {
        tracing::warn!(
            failed = report.failed,
            "Some variants were not updated, see log above"
        );
    }

    Ok(())
}
