use anyhow::Result;
use kulture_core::config::LayeredConfig;
use kulture_core::models::DateRange;

use crate::cli::EventsArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{EventRow, EventsOutput};
use crate::storage::open_aggregator;

pub async fn execute(args: EventsArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    // Validate before touching the backend
    let range = DateRange::new(args.start, args.end).map_err(errors::from_kulture)?;

    let aggregator = open_aggregator(config).await?;
    let events = aggregator.list_events(&range).await.map_err(errors::from_kulture)?;

    if output.is_json() {
        return output.result(EventsOutput { range, events });
    }

    output.section(format!("Festivals from {}", range));
    if events.is_empty() {
        output.info("No festivals in this period");
    } else {
        output.table(events.iter().map(EventRow::from).collect());
    }
    Ok(())
}
