use tilescroll::audio::AudioContext;

#[test]
fn test_disabled_context_is_silent() {
    let mut audio = AudioContext::disabled();
    assert!(!audio.is_available());
    // Unknown names and a missing device are both ignored.
    audio.play("background");
}

#[test]
fn test_load_missing_sound_fails_with_context() {
    let mut audio = AudioContext::disabled();
    let err = audio.load_sound("background", "/nonexistent/streets.wav").unwrap_err();
    assert!(format!("{err:#}").contains("background"));
    assert!(!audio.has_sound("background"));
}
