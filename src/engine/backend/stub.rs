use std::collections::HashMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::status::catalog::{
    fnfErr, ioErr, kAudioToolboxErr_InvalidEventType, kAudioToolboxErr_InvalidPlayerState,
    kAudioToolboxErr_InvalidSequenceType, kAudioToolboxErr_NoSequence,
    kAudioToolboxErr_TrackIndexError, kAudioUnitErr_InvalidParameter, noErr, paramErr,
};
use crate::status::OSStatus;

use super::{MidiMessage, MusicPlatform, MusicPlayer, MusicSequence, MusicTrack};

/// Header tag every standard MIDI file starts with.
const SMF_HEADER_TAG: &[u8; 4] = b"MThd";

#[derive(Debug, Default)]
struct StubSequence {
    track_count: u32,
}

#[derive(Debug, Default)]
struct StubPlayer {
    sequence: Option<MusicSequence>,
    running: bool,
}

/// Deterministic platform used for testing and CLI tooling.
///
/// Simulates the sequence/track/player lifecycle without real audio I/O and
/// answers misuse with the same status codes the platform would. A loaded
/// file is only checked for the `MThd` tag and exposes a single track.
#[derive(Debug, Default)]
pub struct StubPlatform {
    next_handle: u32,
    sequences: HashMap<MusicSequence, StubSequence>,
    players: HashMap<MusicPlayer, StubPlayer>,
    sent: Vec<MidiMessage>,
    injected: HashMap<&'static str, OSStatus>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call to `operation` (platform function name, e.g.
    /// `"MusicPlayerStart"`) fail with `status`.
    pub fn inject_failure(&mut self, operation: &'static str, status: OSStatus) {
        self.injected.insert(operation, status);
    }

    /// Every MIDI message accepted so far, oldest first.
    pub fn sent_messages(&self) -> &[MidiMessage] {
        &self.sent
    }

    pub fn is_running(&self, player: MusicPlayer) -> bool {
        self.players.get(&player).is_some_and(|p| p.running)
    }

    pub fn live_sequences(&self) -> usize {
        self.sequences.len()
    }

    pub fn live_players(&self) -> usize {
        self.players.len()
    }

    fn take_injected(&mut self, operation: &'static str) -> Option<OSStatus> {
        self.injected.remove(operation)
    }

    fn allocate(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    fn sniff_header(path: &Path) -> OSStatus {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return fnfErr,
            Err(_) => return ioErr,
        };
        let mut tag = [0u8; 4];
        match file.read_exact(&mut tag) {
            Ok(()) if &tag == SMF_HEADER_TAG => noErr,
            Ok(()) => kAudioToolboxErr_InvalidSequenceType,
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                kAudioToolboxErr_InvalidSequenceType
            }
            Err(_) => ioErr,
        }
    }
}

impl MusicPlatform for StubPlatform {
    fn new_sequence(&mut self) -> Result<MusicSequence, OSStatus> {
        if let Some(status) = self.take_injected("NewMusicSequence") {
            return Err(status);
        }
        let sequence = MusicSequence(self.allocate());
        self.sequences.insert(sequence, StubSequence::default());
        Ok(sequence)
    }

    fn load_sequence_file(&mut self, sequence: MusicSequence, path: &Path) -> OSStatus {
        if let Some(status) = self.take_injected("MusicSequenceFileLoad") {
            return status;
        }
        if !self.sequences.contains_key(&sequence) {
            return paramErr;
        }
        let status = Self::sniff_header(path);
        if status == noErr {
            if let Some(entry) = self.sequences.get_mut(&sequence) {
                entry.track_count = 1;
            }
        }
        status
    }

    fn track_count(&self, sequence: MusicSequence) -> Result<u32, OSStatus> {
        self.sequences
            .get(&sequence)
            .map(|s| s.track_count)
            .ok_or(paramErr)
    }

    fn track_at(&self, sequence: MusicSequence, index: u32) -> Result<MusicTrack, OSStatus> {
        let count = self.track_count(sequence)?;
        if index >= count {
            return Err(kAudioToolboxErr_TrackIndexError);
        }
        Ok(MusicTrack { sequence, index })
    }

    fn dispose_sequence(&mut self, sequence: MusicSequence) -> OSStatus {
        let in_use = self
            .players
            .values()
            .any(|p| p.running && p.sequence == Some(sequence));
        if in_use {
            return kAudioToolboxErr_InvalidPlayerState;
        }
        match self.sequences.remove(&sequence) {
            Some(_) => noErr,
            None => paramErr,
        }
    }

    fn new_player(&mut self) -> Result<MusicPlayer, OSStatus> {
        if let Some(status) = self.take_injected("NewMusicPlayer") {
            return Err(status);
        }
        let player = MusicPlayer(self.allocate());
        self.players.insert(player, StubPlayer::default());
        Ok(player)
    }

    fn set_player_sequence(&mut self, player: MusicPlayer, sequence: MusicSequence) -> OSStatus {
        if let Some(status) = self.take_injected("MusicPlayerSetSequence") {
            return status;
        }
        if !self.sequences.contains_key(&sequence) {
            return kAudioToolboxErr_NoSequence;
        }
        match self.players.get_mut(&player) {
            Some(entry) if entry.running => kAudioToolboxErr_InvalidPlayerState,
            Some(entry) => {
                entry.sequence = Some(sequence);
                noErr
            }
            None => paramErr,
        }
    }

    fn preroll(&mut self, player: MusicPlayer) -> OSStatus {
        if let Some(status) = self.take_injected("MusicPlayerPreroll") {
            return status;
        }
        match self.players.get(&player) {
            Some(StubPlayer { sequence: None, .. }) => kAudioToolboxErr_NoSequence,
            Some(_) => noErr,
            None => paramErr,
        }
    }

    fn start_player(&mut self, player: MusicPlayer) -> OSStatus {
        if let Some(status) = self.take_injected("MusicPlayerStart") {
            return status;
        }
        match self.players.get_mut(&player) {
            Some(StubPlayer { sequence: None, .. }) => kAudioToolboxErr_NoSequence,
            Some(StubPlayer { running: true, .. }) => kAudioToolboxErr_InvalidPlayerState,
            Some(entry) => {
                entry.running = true;
                noErr
            }
            None => paramErr,
        }
    }

    fn stop_player(&mut self, player: MusicPlayer) -> OSStatus {
        if let Some(status) = self.take_injected("MusicPlayerStop") {
            return status;
        }
        // Stopping an idle player is not an error.
        match self.players.get_mut(&player) {
            Some(entry) => {
                entry.running = false;
                noErr
            }
            None => paramErr,
        }
    }

    fn dispose_player(&mut self, player: MusicPlayer) -> OSStatus {
        match self.players.remove(&player) {
            Some(_) => noErr,
            None => paramErr,
        }
    }

    fn send_midi_event(&mut self, message: MidiMessage) -> OSStatus {
        if let Some(status) = self.take_injected("MusicDeviceMIDIEvent") {
            return status;
        }
        if !(0x80..=0xEF).contains(&message.status) {
            return kAudioToolboxErr_InvalidEventType;
        }
        if message.data1 > 127 || message.data2 > 127 {
            return kAudioUnitErr_InvalidParameter;
        }
        self.sent.push(message);
        noErr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "midiseq-stub-{}-{}",
            std::process::id(),
            name
        ));
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents).expect("write temp file");
        path
    }

    #[test]
    fn test_load_requires_header_tag() {
        let mut platform = StubPlatform::new();
        let sequence = platform.new_sequence().unwrap();

        let good = temp_file("good.mid", b"MThd\0\0\0\x06\0\0\0\x01\0\x60");
        let bad = temp_file("bad.mid", b"RIFF....");
        let short = temp_file("short.mid", b"MT");

        assert_eq!(
            platform.load_sequence_file(sequence, &bad),
            kAudioToolboxErr_InvalidSequenceType
        );
        assert_eq!(
            platform.load_sequence_file(sequence, &short),
            kAudioToolboxErr_InvalidSequenceType
        );
        assert_eq!(platform.track_count(sequence), Ok(0));
        assert_eq!(platform.load_sequence_file(sequence, &good), noErr);
        assert_eq!(platform.track_count(sequence), Ok(1));

        for path in [good, bad, short] {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn test_missing_file_is_fnf() {
        let mut platform = StubPlatform::new();
        let sequence = platform.new_sequence().unwrap();
        let status =
            platform.load_sequence_file(sequence, Path::new("/definitely/not/here.mid"));
        assert_eq!(status, fnfErr);
    }

    #[test]
    fn test_track_index_out_of_range() {
        let mut platform = StubPlatform::new();
        let sequence = platform.new_sequence().unwrap();
        assert_eq!(
            platform.track_at(sequence, 0),
            Err(kAudioToolboxErr_TrackIndexError)
        );
    }

    #[test]
    fn test_player_lifecycle() {
        let mut platform = StubPlatform::new();
        let player = platform.new_player().unwrap();
        assert_eq!(platform.start_player(player), kAudioToolboxErr_NoSequence);
        assert_eq!(platform.preroll(player), kAudioToolboxErr_NoSequence);

        let sequence = platform.new_sequence().unwrap();
        assert_eq!(platform.set_player_sequence(player, sequence), noErr);
        assert_eq!(platform.preroll(player), noErr);
        assert_eq!(platform.start_player(player), noErr);
        assert!(platform.is_running(player));
        assert_eq!(
            platform.start_player(player),
            kAudioToolboxErr_InvalidPlayerState
        );
        assert_eq!(
            platform.dispose_sequence(sequence),
            kAudioToolboxErr_InvalidPlayerState
        );
        assert_eq!(platform.stop_player(player), noErr);
        assert_eq!(platform.stop_player(player), noErr);
        assert_eq!(platform.dispose_player(player), noErr);
        assert_eq!(platform.dispose_sequence(sequence), noErr);
        assert_eq!(platform.live_players(), 0);
        assert_eq!(platform.live_sequences(), 0);
    }

    #[test]
    fn test_midi_event_validation() {
        let mut platform = StubPlatform::new();
        assert_eq!(platform.send_midi_event(MidiMessage::note_on(0, 60, 100)), noErr);
        assert_eq!(
            platform.send_midi_event(MidiMessage::note_on(0, 128, 100)),
            kAudioUnitErr_InvalidParameter
        );
        assert_eq!(
            platform.send_midi_event(MidiMessage {
                status: 0x40,
                data1: 0,
                data2: 0
            }),
            kAudioToolboxErr_InvalidEventType
        );
        assert_eq!(platform.sent_messages(), &[MidiMessage::note_on(0, 60, 100)]);
    }

    #[test]
    fn test_injected_failure_fires_once() {
        let mut platform = StubPlatform::new();
        platform.inject_failure("NewMusicPlayer", -10839);
        assert_eq!(platform.new_player(), Err(-10839));
        assert!(platform.new_player().is_ok());
    }
}
