use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RayburstError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(RayburstError::parse("x").to_string().contains("parse error:"));
    assert!(RayburstError::store("x").to_string().contains("store error:"));
    assert!(
        RayburstError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(RayburstError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RayburstError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
