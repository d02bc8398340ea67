//! Synthetic Input Generators
//!
//! Builders for well-formed report glyph dumps and a catalogue of malformed
//! dumps the loader must reject.

pub mod glyph_dumps;
pub mod report_builder;

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Write every generated fixture below `output_dir`
pub fn generate_all(output_dir: &Path) -> Result<usize> {
    let valid_dir = output_dir.join("valid");
    let invalid_dir = output_dir.join("invalid");
    fs::create_dir_all(&valid_dir)?;
    fs::create_dir_all(&invalid_dir)?;

    let mut count = 0;
    for (name, builder) in report_builder::sample_reports() {
        builder.write_to(valid_dir.join(format!("{name}.json")))?;
        let expected = builder.expected().to_json_pretty()?;
        fs::write(valid_dir.join(format!("{name}.expected.json")), expected)?;
        count += 1;
    }
    for dump in glyph_dumps::malformed_dumps() {
        fs::write(invalid_dir.join(format!("{}.json", dump.name)), dump.json)?;
        count += 1;
    }
    Ok(count)
}
