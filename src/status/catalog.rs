//! The fixed catalog of known Audio Toolbox / Core MIDI status codes.
//!
//! Every entry is listed exactly once in the `status_catalog!` invocation
//! below, which generates the `k...` constants, the [KnownStatus] enum and
//! its accessors. Lookup by code goes through a hash index built on first use.
//!
//! One code, -10863 ("cannot do in current context"), is defined by three
//! headers under three names. It is a single [KnownStatus] whose
//! [symbolic_names](KnownStatus::symbolic_names) lists every alias, since the
//! integer alone cannot say which API produced it.

#![allow(non_upper_case_globals)] // Lots of Apple constants begin with "k"

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::OSStatus;

/// Which header a known status comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorFamily {
    /// `AUGraph.h` (Audio Unit Processing Graph Services)
    AudioGraph,
    /// `MIDIServices.h` (client, port, connection, server and setup errors)
    Midi,
    /// `MusicPlayer.h` (sequence, track and event errors)
    Sequencing,
    /// `AUComponent.h` (property, parameter and initialization errors)
    AudioUnit,
}

impl ErrorFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorFamily::AudioGraph => "audio graph",
            ErrorFamily::Midi => "MIDI",
            ErrorFamily::Sequencing => "sequencing",
            ErrorFamily::AudioUnit => "audio unit",
        }
    }
}

impl fmt::Display for ErrorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Declares the catalog. Each line is
/// `Variant => Family, code, [kPrimaryName, kAlias...];`
macro_rules! status_catalog {
    ($(
        $(#[$meta:meta])*
        $variant:ident => $family:ident, $code:expr, [$first:ident $(, $alias:ident)* $(,)?];
    )+) => {
        $(
            pub const $first: OSStatus = $code;
            $(pub const $alias: OSStatus = $code;)*
        )+

        /// A status code present in the known catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum KnownStatus {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl KnownStatus {
            /// Every catalog entry, in declaration order.
            pub const ALL: &'static [KnownStatus] = &[$(KnownStatus::$variant),+];

            pub const fn code(&self) -> OSStatus {
                match self {
                    $(KnownStatus::$variant => $first,)+
                }
            }

            pub const fn family(&self) -> ErrorFamily {
                match self {
                    $(KnownStatus::$variant => ErrorFamily::$family,)+
                }
            }

            /// All header names for this code, primary name first.
            pub const fn symbolic_names(&self) -> &'static [&'static str] {
                match self {
                    $(KnownStatus::$variant => &[stringify!($first) $(, stringify!($alias))*],)+
                }
            }

            /// The names joined into the single line printed after a failure.
            pub const fn symbolic_name(&self) -> &'static str {
                match self {
                    $(KnownStatus::$variant => concat!(stringify!($first) $(, " / ", stringify!($alias))*),)+
                }
            }
        }
    };
}

status_catalog! {
    GraphNodeNotFound => AudioGraph, -10860, [kAUGraphErr_NodeNotFound];
    GraphInvalidConnection => AudioGraph, -10861, [kAUGraphErr_InvalidConnection];
    GraphOutputNodeErr => AudioGraph, -10862, [kAUGraphErr_OutputNodeErr];
    /// Shared by the graph, toolbox and audio unit headers.
    CannotDoInCurrentContext => AudioGraph, -10863, [
        kAUGraphErr_CannotDoInCurrentContext,
        kAudioToolboxErr_CannotDoInCurrentContext,
        kAudioUnitErr_CannotDoInCurrentContext,
    ];
    GraphInvalidAudioUnit => AudioGraph, -10864, [kAUGraphErr_InvalidAudioUnit];

    MidiInvalidClient => Midi, -10830, [kMIDIInvalidClient];
    MidiInvalidPort => Midi, -10831, [kMIDIInvalidPort];
    MidiWrongEndpointType => Midi, -10832, [kMIDIWrongEndpointType];
    MidiNoConnection => Midi, -10833, [kMIDINoConnection];
    MidiUnknownEndpoint => Midi, -10834, [kMIDIUnknownEndpoint];
    MidiUnknownProperty => Midi, -10835, [kMIDIUnknownProperty];
    MidiWrongPropertyType => Midi, -10836, [kMIDIWrongPropertyType];
    MidiNoCurrentSetup => Midi, -10837, [kMIDINoCurrentSetup];
    MidiMessageSendErr => Midi, -10838, [kMIDIMessageSendErr];
    MidiServerStartErr => Midi, -10839, [kMIDIServerStartErr];
    MidiSetupFormatErr => Midi, -10840, [kMIDISetupFormatErr];
    /// Core MIDI called off the thread that created the client.
    MidiWrongThread => Midi, -10841, [kMIDIWrongThread];
    MidiObjectNotFound => Midi, -10842, [kMIDIObjectNotFound];
    MidiIdNotUnique => Midi, -10843, [kMIDIIDNotUnique];

    ToolboxInvalidSequenceType => Sequencing, -10846, [kAudioToolboxErr_InvalidSequenceType];
    ToolboxTrackIndexError => Sequencing, -10859, [kAudioToolboxErr_TrackIndexError];
    ToolboxTrackNotFound => Sequencing, -10858, [kAudioToolboxErr_TrackNotFound];
    ToolboxEndOfTrack => Sequencing, -10857, [kAudioToolboxErr_EndOfTrack];
    ToolboxStartOfTrack => Sequencing, -10856, [kAudioToolboxErr_StartOfTrack];
    ToolboxIllegalTrackDestination => Sequencing, -10855, [kAudioToolboxErr_IllegalTrackDestination];
    /// A player was started or prerolled with no sequence attached.
    ToolboxNoSequence => Sequencing, -10854, [kAudioToolboxErr_NoSequence];
    ToolboxInvalidEventType => Sequencing, -10853, [kAudioToolboxErr_InvalidEventType];
    ToolboxInvalidPlayerState => Sequencing, -10852, [kAudioToolboxErr_InvalidPlayerState];

    UnitInvalidProperty => AudioUnit, -10879, [kAudioUnitErr_InvalidProperty];
    UnitInvalidParameter => AudioUnit, -10878, [kAudioUnitErr_InvalidParameter];
    UnitInvalidElement => AudioUnit, -10877, [kAudioUnitErr_InvalidElement];
    UnitNoConnection => AudioUnit, -10876, [kAudioUnitErr_NoConnection];
    UnitFailedInitialization => AudioUnit, -10875, [kAudioUnitErr_FailedInitialization];
    UnitTooManyFramesToProcess => AudioUnit, -10874, [kAudioUnitErr_TooManyFramesToProcess];
    UnitInvalidFile => AudioUnit, -10871, [kAudioUnitErr_InvalidFile];
    UnitFormatNotSupported => AudioUnit, -10868, [kAudioUnitErr_FormatNotSupported];
    UnitUninitialized => AudioUnit, -10867, [kAudioUnitErr_Uninitialized];
    UnitInvalidScope => AudioUnit, -10866, [kAudioUnitErr_InvalidScope];
    UnitPropertyNotWritable => AudioUnit, -10865, [kAudioUnitErr_PropertyNotWritable];
    UnitInvalidPropertyValue => AudioUnit, -10851, [kAudioUnitErr_InvalidPropertyValue];
    UnitPropertyNotInUse => AudioUnit, -10850, [kAudioUnitErr_PropertyNotInUse];
    UnitInitialized => AudioUnit, -10849, [kAudioUnitErr_Initialized];
    UnitInvalidOfflineRender => AudioUnit, -10848, [kAudioUnitErr_InvalidOfflineRender];
    UnitUnauthorized => AudioUnit, -10847, [kAudioUnitErr_Unauthorized];
}

/// Success.
pub const noErr: OSStatus = 0;

/// I/O error. From `MacErrors.h`; not part of the catalog.
pub const ioErr: OSStatus = -36;

/// File not found. From `MacErrors.h`; not part of the catalog.
pub const fnfErr: OSStatus = -43;

/// Status code meaning that a parameter supplied by the user was invalid.
/// From `MacErrors.h`; not part of the catalog.
pub const paramErr: OSStatus = -50;

static INDEX: Lazy<HashMap<OSStatus, KnownStatus>> = Lazy::new(|| {
    KnownStatus::ALL
        .iter()
        .map(|known| (known.code(), *known))
        .collect()
});

impl KnownStatus {
    /// O(1) catalog lookup.
    pub fn lookup(status: OSStatus) -> Option<KnownStatus> {
        INDEX.get(&status).copied()
    }
}

impl fmt::Display for KnownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbolic_name())
    }
}
