use anyhow::Result;
use kulture_core::guide::GUIDE;

use crate::display;
use crate::output::OutputWriter;

pub fn execute(output: &OutputWriter) -> Result<()> {
    if output.is_json() {
        return output.result(GUIDE);
    }

    display::guide(output, &GUIDE);
    Ok(())
}
