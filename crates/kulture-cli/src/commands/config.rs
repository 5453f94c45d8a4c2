use anyhow::Result;
use kulture_core::config::{ConfigSource, LayeredConfig};

use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut entries: Vec<ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigEntry {
            key,
            value,
            source: source_label(source).to_string(),
        })
        .collect();
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    if output.is_json() {
        return output.result(ConfigOutput { entries });
    }

    output.section("Configuration");
    output.table(entries);
    Ok(())
}

fn source_label(source: ConfigSource) -> &'static str {
    match source {
        ConfigSource::Default => "default",
        ConfigSource::File => "file",
        ConfigSource::Environment => "environment",
        ConfigSource::Cli => "command line",
    }
}
