//! Cluster the generated rock tables with every algorithm and report the accuracies.

use anyhow::Result;
use linfa::ParamGuard;
use rockclass::{unsupervised, PlotParams, UnsupervisedParams};
use rockclass_datasets::{read_rock_csv, RockClass};

fn main() -> Result<()> {
    env_logger::init();

    let gneiss = read_rock_csv(RockClass::Gneiss.file_name())?;
    let marl = read_rock_csv(RockClass::Marl.file_name())?;

    let params = UnsupervisedParams::default().check()?;
    let plot = PlotParams::default().check()?;

    for clustering in unsupervised::run(&params, &plot, &gneiss, &marl)? {
        println!("{}: {:.1}%", clustering.algorithm, clustering.accuracy);
    }

    Ok(())
}
