//! Generate Fixtures
//!
//! Writes the synthetic glyph dumps and their expected parse output.

use anyhow::Result;
use labgrid_test_suite::{generators, utils};

fn main() -> Result<()> {
    let fixtures_dir = utils::fixtures_dir();
    println!("Generating glyph dumps in {:?}...", fixtures_dir);

    let count = generators::generate_all(&fixtures_dir)?;

    println!("Wrote {count} fixtures");
    Ok(())
}
