//! Playback controller.
//!
//! [SoundEngine] owns a sequence/track/player triple through a
//! [MusicPlatform] and pipes the status of every platform call through
//! [check_status](crate::status::check_status), so callers get a
//! [StatusError] naming the failing call.

use std::path::Path;

use crate::error::{log_status_error, StatusError};
use crate::status::{check_status, OSStatus};

pub mod backend;

pub use backend::{MidiMessage, MusicPlatform, MusicPlayer, MusicSequence, MusicTrack, StubPlatform};

/// Channel used for every note and program change.
const CHANNEL: u32 = 0;

/// Map a platform result carrying a handle to a [StatusError].
fn checked<T>(result: Result<T, OSStatus>, operation: &str) -> Result<T, StatusError> {
    result.map_err(|status| StatusError::new(status, operation))
}

/// Plays single notes and whole MIDI files.
///
/// # Example
/// ```ignore
/// let mut engine = SoundEngine::new(StubPlatform::new());
/// engine.play_note_on(60, 100)?;
/// engine.play_note_off(60)?;
/// engine.toggle("assets/sequence.mid")?; // starts
/// engine.toggle("assets/sequence.mid")?; // stops
/// ```
pub struct SoundEngine<P: MusicPlatform> {
    platform: P,
    playing: bool,
    preset_number: u8,
    music_player: Option<MusicPlayer>,
    music_sequence: Option<MusicSequence>,
    music_track: Option<MusicTrack>,
}

impl<P: MusicPlatform> SoundEngine<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            playing: false,
            preset_number: 0,
            music_player: None,
            music_sequence: None,
            music_track: None,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn preset_number(&self) -> u8 {
        self.preset_number
    }

    pub fn music_player(&self) -> Option<MusicPlayer> {
        self.music_player
    }

    pub fn music_sequence(&self) -> Option<MusicSequence> {
        self.music_sequence
    }

    pub fn music_track(&self) -> Option<MusicTrack> {
        self.music_track
    }

    /// Select the instrument preset with a program change.
    pub fn set_preset(&mut self, preset_number: u8) -> Result<(), StatusError> {
        let status = self.platform.send_midi_event(MidiMessage::program_change(
            CHANNEL,
            u32::from(preset_number),
        ));
        check_status(status, "MusicDeviceMIDIEvent").map_err(|err| {
            log_status_error(&err, "set_preset");
            err
        })?;
        self.preset_number = preset_number;
        tracing::debug!("[SoundEngine] Preset set to {}", preset_number);
        Ok(())
    }

    pub fn play_note_on(&mut self, note: u32, velocity: u32) -> Result<(), StatusError> {
        tracing::debug!("[SoundEngine] Note on {} velocity {}", note, velocity);
        let status = self
            .platform
            .send_midi_event(MidiMessage::note_on(CHANNEL, note, velocity));
        check_status(status, "MusicDeviceMIDIEvent").map_err(|err| {
            log_status_error(&err, "play_note_on");
            err
        })
    }

    pub fn play_note_off(&mut self, note: u32) -> Result<(), StatusError> {
        tracing::debug!("[SoundEngine] Note off {}", note);
        let status = self
            .platform
            .send_midi_event(MidiMessage::note_off(CHANNEL, note));
        check_status(status, "MusicDeviceMIDIEvent").map_err(|err| {
            log_status_error(&err, "play_note_off");
            err
        })
    }

    /// Load `path` into a fresh sequence and start playing it from the top.
    ///
    /// Any sequence that was loaded before is stopped and disposed first.
    pub fn play_midi_file(&mut self, path: impl AsRef<Path>) -> Result<(), StatusError> {
        let path = path.as_ref();
        self.release()?;

        self.load_and_start(path).map_err(|err| {
            log_status_error(&err, "play_midi_file");
            err
        })?;

        self.playing = true;
        tracing::info!("[SoundEngine] Playing {}", path.display());
        Ok(())
    }

    fn load_and_start(&mut self, path: &Path) -> Result<(), StatusError> {
        let sequence = checked(self.platform.new_sequence(), "NewMusicSequence")?;
        self.music_sequence = Some(sequence);

        check_status(
            self.platform.load_sequence_file(sequence, path),
            "MusicSequenceFileLoad",
        )?;

        let track_count = checked(
            self.platform.track_count(sequence),
            "MusicSequenceGetTrackCount",
        )?;
        tracing::debug!("[SoundEngine] Sequence has {} track(s)", track_count);
        let track = checked(
            self.platform.track_at(sequence, 0),
            "MusicSequenceGetIndTrack",
        )?;
        self.music_track = Some(track);

        let player = checked(self.platform.new_player(), "NewMusicPlayer")?;
        self.music_player = Some(player);

        check_status(
            self.platform.set_player_sequence(player, sequence),
            "MusicPlayerSetSequence",
        )?;
        check_status(self.platform.preroll(player), "MusicPlayerPreroll")?;
        check_status(self.platform.start_player(player), "MusicPlayerStart")
    }

    /// Stop the player if one exists. Stopping while idle is a no-op.
    pub fn stop_playing_midi_file(&mut self) -> Result<(), StatusError> {
        if let Some(player) = self.music_player {
            check_status(self.platform.stop_player(player), "MusicPlayerStop").map_err(
                |err| {
                    log_status_error(&err, "stop_playing_midi_file");
                    err
                },
            )?;
            tracing::info!("[SoundEngine] Stopped");
        }
        self.playing = false;
        Ok(())
    }

    /// The play button: starts `path` when idle, stops when playing.
    /// Returns whether the engine is playing afterwards.
    pub fn toggle(&mut self, path: impl AsRef<Path>) -> Result<bool, StatusError> {
        if self.playing {
            self.stop_playing_midi_file()?;
        } else {
            self.play_midi_file(path)?;
        }
        Ok(self.playing)
    }

    /// Stop and dispose the current player and sequence.
    fn release(&mut self) -> Result<(), StatusError> {
        self.stop_playing_midi_file()?;
        if let Some(player) = self.music_player.take() {
            check_status(self.platform.dispose_player(player), "DisposeMusicPlayer")?;
        }
        self.music_track = None;
        if let Some(sequence) = self.music_sequence.take() {
            check_status(
                self.platform.dispose_sequence(sequence),
                "DisposeMusicSequence",
            )?;
        }
        Ok(())
    }
}

impl<P: MusicPlatform> Drop for SoundEngine<P> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::warn!("[SoundEngine] Failed to release platform objects: {}", err);
        }
    }
}
