use anyhow::Result;
use kulture_core::config::LayeredConfig;

use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{RegionRow, RegionsOutput};
use crate::storage::open_aggregator;

pub async fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let aggregator = open_aggregator(config).await?;
    let regions = aggregator.list_regions().await.map_err(errors::from_kulture)?;

    if output.is_json() {
        return output.result(RegionsOutput {
            backend: aggregator.backend_name().to_string(),
            regions,
        });
    }

    output.section(format!("States ({})", regions.len()));
    output.table(regions.iter().map(RegionRow::from).collect());
    Ok(())
}
