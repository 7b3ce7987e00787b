//! Integration tests for the playback controller
//!
//! These drive [SoundEngine] through the public API with both the shipped
//! stub platform and a custom platform, checking that:
//! - every platform failure surfaces as a StatusError naming the call
//! - four-char-code statuses from a backend are rendered as such
//! - the toggle behaves like the play button

use std::path::Path;

use midi_file_sequence::engine::{
    MidiMessage, MusicPlatform, MusicPlayer, MusicSequence, MusicTrack, SoundEngine,
    StubPlatform,
};
use midi_file_sequence::status::{fourcc_status, ErrorCategory, OSStatus};
use midi_file_sequence::ErrorCode;

const SEQUENCE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/sequence.mid");

/// Platform whose every call fails with the same status.
struct BrokenPlatform {
    status: OSStatus,
}

impl MusicPlatform for BrokenPlatform {
    fn new_sequence(&mut self) -> Result<MusicSequence, OSStatus> {
        Err(self.status)
    }
    fn load_sequence_file(&mut self, _: MusicSequence, _: &Path) -> OSStatus {
        self.status
    }
    fn track_count(&self, _: MusicSequence) -> Result<u32, OSStatus> {
        Err(self.status)
    }
    fn track_at(&self, _: MusicSequence, _: u32) -> Result<MusicTrack, OSStatus> {
        Err(self.status)
    }
    fn dispose_sequence(&mut self, _: MusicSequence) -> OSStatus {
        self.status
    }
    fn new_player(&mut self) -> Result<MusicPlayer, OSStatus> {
        Err(self.status)
    }
    fn set_player_sequence(&mut self, _: MusicPlayer, _: MusicSequence) -> OSStatus {
        self.status
    }
    fn preroll(&mut self, _: MusicPlayer) -> OSStatus {
        self.status
    }
    fn start_player(&mut self, _: MusicPlayer) -> OSStatus {
        self.status
    }
    fn stop_player(&mut self, _: MusicPlayer) -> OSStatus {
        self.status
    }
    fn dispose_player(&mut self, _: MusicPlayer) -> OSStatus {
        self.status
    }
    fn send_midi_event(&mut self, _: MidiMessage) -> OSStatus {
        self.status
    }
}

#[test]
fn test_file_playback_lifecycle_with_stub() {
    let mut engine = SoundEngine::new(StubPlatform::new());
    assert!(!engine.is_playing());

    assert!(engine.toggle(SEQUENCE).expect("first tap starts"));
    assert!(engine.music_sequence().is_some());
    assert!(engine.music_track().is_some());

    assert!(!engine.toggle(SEQUENCE).expect("second tap stops"));
    assert!(engine.toggle(SEQUENCE).expect("third tap starts again"));
    assert_eq!(engine.platform().live_sequences(), 1);
}

#[test]
fn test_backend_four_char_code_is_rendered() {
    let status = fourcc_status(b"wht?");
    let mut engine = SoundEngine::new(BrokenPlatform { status });

    let err = engine.play_midi_file(SEQUENCE).unwrap_err();
    assert_eq!(err.operation(), "NewMusicSequence");
    assert_eq!(err.code(), status);
    assert!(matches!(err.category(), ErrorCategory::FourCharCode(_)));
    assert_eq!(err.message(), "Error: NewMusicSequence ('wht?')");
    assert!(!engine.is_playing());
}

#[test]
fn test_backend_catalog_code_is_named() {
    let mut engine = SoundEngine::new(BrokenPlatform { status: -10838 });
    let err = engine.play_note_on(60, 100).unwrap_err();
    assert_eq!(err.operation(), "MusicDeviceMIDIEvent");
    assert_eq!(err.report().symbolic_line(), Some("kMIDIMessageSendErr"));

    let mut out = Vec::new();
    err.report().emit(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Error: MusicDeviceMIDIEvent (-10838)\nkMIDIMessageSendErr\n"
    );
}

#[test]
fn test_preset_survives_only_on_success() {
    let mut engine = SoundEngine::new(BrokenPlatform { status: -10867 });
    assert!(engine.set_preset(9).is_err());
    assert_eq!(engine.preset_number(), 0);

    let mut engine = SoundEngine::new(StubPlatform::new());
    engine.set_preset(9).unwrap();
    assert_eq!(engine.preset_number(), 9);
}
