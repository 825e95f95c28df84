use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MotionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MotionError::invariant("x")
            .to_string()
            .contains("invariant violated:")
    );
    assert!(MotionError::svg("x").to_string().contains("svg error:"));
    assert!(
        MotionError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn configuration_errors_name_the_offender() {
    let err = MotionError::unknown_entity("node9");
    assert!(err.is_configuration());
    assert!(err.to_string().contains("node9"));

    let err = MotionError::missing_order("sequence");
    assert!(err.is_configuration());
    assert!(err.to_string().contains("sequence"));

    assert!(!MotionError::validation("x").is_configuration());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MotionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
