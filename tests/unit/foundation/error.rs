use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::malformed("x")
            .to_string()
            .contains("malformed scene data:")
    );
    assert!(ReelError::encode("x").to_string().contains("encode error:"));
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ReelError::media("x").to_string().contains("media error:"));
}

#[test]
fn not_found_names_the_path() {
    let err = ReelError::not_found("scenes/scene_001.png");
    let msg = err.to_string();
    assert!(msg.contains("resource not found"));
    assert!(msg.contains("scenes/scene_001.png"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}
