use beavrs_core::common::config::AxialConfig;
use beavrs_core::control::control_bank_axials;
use beavrs_core::domain::BuildError;

#[test]
fn bank_length_is_constant_across_the_schedule() {
    let axial = AxialConfig::default();
    let length = axial.step_width * 228.0;

    for step in (0..=574).step_by(7) {
        let axials = control_bank_axials(step, &axial).expect("step should be in range");
        for (label, bank) in axials.banks() {
            assert!(
                (bank.top - bank.bottom - length).abs() < 1.0e-9,
                "bank {label} at step {step}"
            );
            assert!(bank.bottom >= axial.step0_height);
        }
    }
}

#[test]
fn lead_bank_reaches_the_bottom_first() {
    let axial = AxialConfig::default();

    let axials = control_bank_axials(228, &axial).expect("step 228 is valid");

    assert_eq!(axials.d.steps, 0);
    assert_eq!(axials.d.bottom, axial.step0_height);
    assert!(axials.c.steps > 0 && axials.c.steps < 228);
    assert_eq!(axials.b.steps, 228);
    assert_eq!(axials.a.steps, 228);
}

#[test]
fn elevations_serialize_per_bank() {
    let axials = control_bank_axials(0, &AxialConfig::default()).expect("step 0 is valid");

    let value = serde_json::to_value(axials).expect("axials should serialize");

    assert_eq!(value["step"], 0);
    assert_eq!(value["d"]["steps"], 228);
    assert!(value["a"]["top"].as_f64().expect("top is a number") > 700.0);
}

#[test]
fn invalid_steps_report_the_limit() {
    let error = control_bank_axials(1_000, &AxialConfig::default()).expect_err("out of range");

    assert_eq!(error, BuildError::InvalidStep { step: 1_000, max: 574 });
    assert_eq!(error.exit_code(), 2);
}
