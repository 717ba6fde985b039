use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CardError::external("x")
            .to_string()
            .contains("external service error:")
    );
    assert!(
        CardError::target_unavailable("x")
            .to_string()
            .contains("render target unavailable:")
    );
    assert!(CardError::render("x").to_string().contains("render error:"));
    assert!(
        CardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        CardError::RequestInFlight("translate")
            .to_string()
            .contains("request already in flight: translate")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_session_level_failures_are_recoverable() {
    assert!(CardError::external("down").is_recoverable());
    assert!(CardError::target_unavailable("not mounted").is_recoverable());
    assert!(CardError::RequestInFlight("palette").is_recoverable());
    assert!(!CardError::validation("bad hex").is_recoverable());
    assert!(!CardError::render("no font").is_recoverable());
}
