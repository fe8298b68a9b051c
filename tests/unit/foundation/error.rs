use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrimError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ScrimError::plan("x").to_string().contains("plan error:"));
    assert!(
        ScrimError::compose("x")
            .to_string()
            .contains("compose error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrimError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
