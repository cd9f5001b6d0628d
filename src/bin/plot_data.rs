//! Draw every pair of properties of the generated rock tables.

use anyhow::Result;
use linfa::ParamGuard;
use rockclass::plot::plot_data;
use rockclass::PlotParams;
use rockclass_datasets::{read_rock_csv, RockClass};

fn main() -> Result<()> {
    env_logger::init();

    let gneiss = read_rock_csv(RockClass::Gneiss.file_name())?;
    let marl = read_rock_csv(RockClass::Marl.file_name())?;

    let params = PlotParams::default().check()?;
    let path = plot_data(&params, &gneiss, &marl)?;
    println!("saved {}", path.display());

    Ok(())
}
