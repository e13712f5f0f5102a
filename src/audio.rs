//! Audio cues
//!
//! The simulation only raises [`SoundEffect`]s; an [`AudioManager`] applies
//! volume settings and hands them to whatever [`AudioSink`] the host provides.
//! Playback is fire-and-forget: nothing ever queries playback state.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Successful jump (ground, air or wall)
    Jump,
    /// Dash started
    Dash,
    /// Player hit by a soda
    SodaHit,
    /// Machine destroyed
    Machine,
    /// Bottle collected
    Water,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Jump,
        SoundEffect::Dash,
        SoundEffect::SodaHit,
        SoundEffect::Machine,
        SoundEffect::Water,
    ];

    /// Asset name of the effect
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Dash => "dash",
            SoundEffect::SodaHit => "sodahit",
            SoundEffect::Machine => "machine",
            SoundEffect::Water => "water",
        }
    }

    /// Mix level before settings are applied
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Jump => 0.7,
            SoundEffect::Dash => 0.3,
            SoundEffect::SodaHit => 0.4,
            SoundEffect::Machine => 0.8,
            SoundEffect::Water => 0.5,
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Music,
    Ambience,
}

impl Track {
    pub fn name(&self) -> &'static str {
        match self {
            Track::Music => "music",
            Track::Ambience => "ambience",
        }
    }

    pub fn base_volume(&self) -> f32 {
        match self {
            Track::Music => 0.3,
            Track::Ambience => 0.2,
        }
    }
}

/// Host audio backend
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    fn play_track(&mut self, track: Track, volume: f32, looped: bool);
    /// Release the device; called once on quit
    fn shutdown(&mut self) {}
}

/// Sink that drops everything (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play_effect(&mut self, _effect: SoundEffect, _volume: f32) {}
    fn play_track(&mut self, _track: Track, _volume: f32, _looped: bool) {}
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume) * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play_effect(effect, vol);
    }

    /// Play every cue raised during a tick, in order
    pub fn play_all(&mut self, effects: &[SoundEffect]) {
        for effect in effects {
            self.play(*effect);
        }
    }

    /// Start the looping music and ambience beds
    pub fn start_background(&mut self) {
        for track in [Track::Music, Track::Ambience] {
            let vol = self.effective_volume(self.music_volume) * track.base_volume();
            self.sink.play_track(track, vol, true);
        }
    }

    pub fn shutdown(&mut self) {
        self.sink.shutdown();
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
