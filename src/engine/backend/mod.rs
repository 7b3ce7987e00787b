//! Backend abstraction over the platform's music sequencing API.

use std::path::Path;

use crate::status::OSStatus;

/// Opaque handle to a sequence owned by a [MusicPlatform].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MusicSequence(pub u32);

/// Opaque handle to a track inside a [MusicSequence].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MusicTrack {
    pub sequence: MusicSequence,
    pub index: u32,
}

/// Opaque handle to a player owned by a [MusicPlatform].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MusicPlayer(pub u32);

/// A channel voice message as handed to the instrument unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiMessage {
    pub status: u32,
    pub data1: u32,
    pub data2: u32,
}

impl MidiMessage {
    pub const NOTE_OFF: u32 = 0x80;
    pub const NOTE_ON: u32 = 0x90;
    pub const PROGRAM_CHANGE: u32 = 0xC0;

    pub fn note_on(channel: u32, note: u32, velocity: u32) -> Self {
        Self {
            status: Self::NOTE_ON | (channel & 0x0F),
            data1: note,
            data2: velocity,
        }
    }

    pub fn note_off(channel: u32, note: u32) -> Self {
        Self {
            status: Self::NOTE_OFF | (channel & 0x0F),
            data1: note,
            data2: 0,
        }
    }

    pub fn program_change(channel: u32, program: u32) -> Self {
        Self {
            status: Self::PROGRAM_CHANGE | (channel & 0x0F),
            data1: program,
            data2: 0,
        }
    }
}

/// Trait implemented by platform music backends.
///
/// Methods mirror the platform calls one to one. Calls without out-values
/// return the raw status; calls that produce a handle return it or the
/// nonzero status that prevented it. Implementations never return `Err(0)`.
pub trait MusicPlatform {
    /// `NewMusicSequence`
    fn new_sequence(&mut self) -> Result<MusicSequence, OSStatus>;
    /// `MusicSequenceFileLoad`
    fn load_sequence_file(&mut self, sequence: MusicSequence, path: &Path) -> OSStatus;
    /// `MusicSequenceGetTrackCount`
    fn track_count(&self, sequence: MusicSequence) -> Result<u32, OSStatus>;
    /// `MusicSequenceGetIndTrack`
    fn track_at(&self, sequence: MusicSequence, index: u32) -> Result<MusicTrack, OSStatus>;
    /// `DisposeMusicSequence`
    fn dispose_sequence(&mut self, sequence: MusicSequence) -> OSStatus;

    /// `NewMusicPlayer`
    fn new_player(&mut self) -> Result<MusicPlayer, OSStatus>;
    /// `MusicPlayerSetSequence`
    fn set_player_sequence(&mut self, player: MusicPlayer, sequence: MusicSequence) -> OSStatus;
    /// `MusicPlayerPreroll`
    fn preroll(&mut self, player: MusicPlayer) -> OSStatus;
    /// `MusicPlayerStart`
    fn start_player(&mut self, player: MusicPlayer) -> OSStatus;
    /// `MusicPlayerStop`
    fn stop_player(&mut self, player: MusicPlayer) -> OSStatus;
    /// `DisposeMusicPlayer`
    fn dispose_player(&mut self, player: MusicPlayer) -> OSStatus;

    /// `MusicDeviceMIDIEvent` on the instrument unit
    fn send_midi_event(&mut self, message: MidiMessage) -> OSStatus;
}

mod stub;
pub use stub::StubPlatform;
