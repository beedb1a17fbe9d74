use gasflow_core::models::*;
use proptest::prelude::*;

#[test]
fn identical_requires_all_four_fields() {
    let a = Observation::new(10.0, 1000.0, 50.0, 18.0);
    assert!(a.is_identical(&Observation::new(10.0, 1000.0, 50.0, 18.0)));
    assert!(!a.is_identical(&Observation::new(10.0, 1000.0, 50.0, 18.5)));
}

#[test]
fn correct_from_keeps_output() {
    let mut stored = Observation::new(10.0, 1000.0, 50.0, 18.0);
    stored.correct_from(&Observation::new(12.0, 1010.0, 50.0, 99.0));
    assert_eq!(stored, Observation::new(12.0, 1010.0, 50.0, 18.0));
}

#[test]
fn reading_builds_observation_and_context() {
    let reading = SensorReading {
        on: true,
        supply_pressure: 1000.0,
        air_aperture: 50.0,
        current_output: 18.0,
        required_output: 20.0,
    };
    assert_eq!(
        reading.observe(35.0),
        Observation::new(35.0, 1000.0, 50.0, 18.0)
    );
    let ctx = reading.context(35.0);
    assert_eq!(ctx.gas_aperture, 35.0);
    assert_eq!(ctx.current_output, 18.0);
}

#[test]
fn reading_validation_names_the_bad_field() {
    let good = SensorReading {
        on: true,
        supply_pressure: 1000.0,
        air_aperture: 50.0,
        current_output: 0.0,
        required_output: 20.0,
    };
    assert!(good.validate().is_ok());

    let cases = [
        (SensorReading { supply_pressure: 0.0, ..good }, "supply_pressure"),
        (SensorReading { air_aperture: -5.0, ..good }, "air_aperture"),
        (SensorReading { required_output: f64::INFINITY, ..good }, "required_output"),
        (SensorReading { current_output: f64::NAN, ..good }, "current_output"),
    ];
    for (reading, expected) in cases {
        match reading.validate() {
            Err(gasflow_core::ControlError::MalformedObservation { field, .. }) => {
                assert_eq!(field, expected)
            }
            other => panic!("{expected}: {other:?}"),
        }
    }
}

#[test]
fn control_state_tracks_target_changes_and_misses() {
    let mut state = ControlState::default();
    assert_eq!(state.gas_aperture, 0.0);
    state.advance_target(40.0);
    assert!(state.target_changed());
    state.advance_target(40.0);
    assert!(!state.target_changed());

    state.record_miss();
    state.record_miss();
    assert_eq!(state.miss_count, 2);
    state.record_hit();
    assert_eq!(state.miss_count, 0);
}

#[test]
fn linear_solve_rejects_zero_divisor() {
    let line = LinearCoefficients::new(0.0, 1.0);
    assert_eq!(line.solve_aperture(40.0, 1000.0, 50.0), None);
    let line = LinearCoefficients::new(1.3, 0.2);
    assert_eq!(line.solve_aperture(40.0, 0.0, 50.0), None);
}

#[test]
fn availability_masks_branches() {
    let all = ModelAvailability {
        linear: Some(LinearCoefficients::new(1.0, 0.0)),
        fallback: true,
    };
    assert_eq!(all.without(StrategyBranch::Linear).linear, None);
    assert!(!all.without(StrategyBranch::Fallback).fallback);
    assert_eq!(all.without(StrategyBranch::Memory), all);
}

#[test]
fn decision_branch_tags() {
    let fast = StrategyDecision::UseRegressionFast(LinearCoefficients::new(1.0, 0.0));
    assert_eq!(fast.branch(), StrategyBranch::Linear);
    assert_eq!(
        StrategyDecision::UseRegressionFallback.branch(),
        StrategyBranch::Fallback
    );
    assert_eq!(StrategyDecision::UseMemory.branch(), StrategyBranch::Memory);
}

proptest! {
    #[test]
    fn linear_solve_inverts_prediction(
        slope in 0.5f64..5.0,
        intercept in -5.0f64..5.0,
        pressure in 500.0f64..40_000.0,
        air in 5.0f64..100.0,
        aperture in 1.0f64..100.0,
    ) {
        let line = LinearCoefficients::new(slope, intercept);
        let output = line.predict_output(aperture, pressure, air);
        let solved = line.solve_aperture(output, pressure, air).unwrap();
        prop_assert!((solved - aperture).abs() < 1e-6);
    }
}
