//! Sample the gneiss and marl tables and store them as CSV.

use anyhow::Result;
use rockclass_datasets::generate::GeneratorParams;
use rockclass_datasets::{write_rock_csv, RockClass};

fn main() -> Result<()> {
    env_logger::init();

    let (gneiss, marl) = GeneratorParams::default().generate();
    write_rock_csv(RockClass::Gneiss.file_name(), &gneiss)?;
    write_rock_csv(RockClass::Marl.file_name(), &marl)?;

    println!(
        "{} gneiss and {} marl samples written",
        gneiss.nrows(),
        marl.nrows()
    );

    Ok(())
}
