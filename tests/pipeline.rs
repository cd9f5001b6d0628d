use approx::assert_abs_diff_eq;
use linfa::dataset::Records;
use linfa::ParamGuard;
use rockclass::prelude::*;
use rockclass_datasets::generate::GeneratorParams;
use rockclass_datasets::{read_rock_csv, write_rock_csv, RockClass};

fn tables_through_csv() -> (ndarray::Array2<f64>, ndarray::Array2<f64>) {
    let dir = tempfile::tempdir().unwrap();
    let (gneiss, marl) = GeneratorParams::default().generate();

    let gneiss_path = dir.path().join(RockClass::Gneiss.file_name());
    let marl_path = dir.path().join(RockClass::Marl.file_name());
    write_rock_csv(&gneiss_path, &gneiss).unwrap();
    write_rock_csv(&marl_path, &marl).unwrap();

    let gneiss_read = read_rock_csv(&gneiss_path).unwrap();
    let marl_read = read_rock_csv(&marl_path).unwrap();
    assert_abs_diff_eq!(gneiss_read, gneiss, epsilon = 1e-12);
    assert_abs_diff_eq!(marl_read, marl, epsilon = 1e-12);

    (gneiss_read, marl_read)
}

#[test]
fn supervised_stage_on_stored_tables() {
    let (gneiss, marl) = tables_through_csv();
    let params = SupervisedParams::default().check().unwrap();

    let data = params.prepare(&gneiss, &marl).unwrap();
    assert_eq!(data.train.nsamples(), 420);
    assert_eq!(data.test.nsamples(), 105);

    let outcome = params.classify(&data).unwrap();
    assert_eq!(outcome.prediction.len(), 105);
    assert!(outcome.accuracy >= 0. && outcome.accuracy <= 100.);
    // one decimal of a percentage
    assert_abs_diff_eq!(
        outcome.accuracy * 10.,
        (outcome.accuracy * 10.).round(),
        epsilon = 1e-9
    );
}

#[test]
fn unsupervised_stage_on_stored_tables() {
    let (gneiss, marl) = tables_through_csv();
    let params = UnsupervisedParams::default().check().unwrap();
    let data = params.prepare(&gneiss, &marl).unwrap();

    for algorithm in Algorithm::ALL.iter().copied() {
        let clustering = params.score(algorithm, &data).unwrap();
        assert_eq!(clustering.labels.len(), 525);
        assert!(clustering.accuracy >= 0. && clustering.accuracy <= 100.);

        if algorithm != Algorithm::MeanShift {
            // two clusters are always oriented towards the majority match
            assert!(clustering.accuracy >= 50., "{}", algorithm);
            assert!(clustering.labels.iter().all(|l| *l < 2));
        }
    }
}

#[test]
fn invalid_parameters_are_reported() {
    let err = SupervisedParams::default().test_ratio(1.).check().unwrap_err();
    assert!(matches!(err, Error::SplitRatio(_)));

    let (gneiss, _) = GeneratorParams::default().generate();
    let params = UnsupervisedParams::default().check().unwrap();
    let short = gneiss.slice(ndarray::s![.., ..2]).to_owned();
    assert!(matches!(
        params.prepare(&short, &gneiss),
        Err(Error::MismatchedShapes(3, 2))
    ));
}
