//! Extract command

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::ExtractArgs;
use crate::ui::TerminalReporter;

/// Identify every jar under the source and write the BOM.
///
/// Ctrl-C stops further checksum lookups; jars already seen and any
/// embedded metadata still make it into the written BOM.
pub async fn extract(args: ExtractArgs, quiet: bool) -> Result<()> {
    let config = args.into_config();
    let reporter = TerminalReporter::new(quiet);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted: skipping remaining checksum lookups");
            on_interrupt.cancel();
        }
    });

    let result = jarbom_core::run(&config, &reporter, &cancel).await;
    interrupt.abort();

    result.with_context(|| format!("Failed to extract from {}", config.source.display()))?;
    Ok(())
}
