//! Train the perceptron on the generated rock tables and report its test accuracy.

use anyhow::Result;
use linfa::ParamGuard;
use rockclass::{supervised, PlotParams, SupervisedParams};
use rockclass_datasets::{read_rock_csv, RockClass};

fn main() -> Result<()> {
    env_logger::init();

    let gneiss = read_rock_csv(RockClass::Gneiss.file_name())?;
    let marl = read_rock_csv(RockClass::Marl.file_name())?;

    let params = SupervisedParams::default().check()?;
    let plot = PlotParams::default().check()?;
    let outcome = supervised::run(&params, &plot, &gneiss, &marl)?;

    println!("perceptron accuracy: {:.1}%", outcome.accuracy);

    Ok(())
}
