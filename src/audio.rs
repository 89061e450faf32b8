//! Audio system using Web Audio API
//!
//! Procedurally generated jingles, no sound files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Runner leaves the ground
    Jump,
    /// Candy cane, present or star picked up
    Collect,
    /// Street changes look
    ThemeChange,
    /// Level signpost queued
    LevelUp,
    /// Crash
    GameOver,
    /// Run made the leaderboard
    HighScore,
}

/// One pitched tone: slide from `from` to `to` Hz over `length` seconds
#[derive(Debug, Clone, Copy)]
struct Tone {
    from: f32,
    to: f32,
    wave: OscillatorType,
    level: f32,
    length: f64,
}

impl Tone {
    const fn steady(freq: f32, wave: OscillatorType, level: f32, length: f64) -> Self {
        Self {
            from: freq,
            to: freq,
            wave,
            level,
            length,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Pick up volume or mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => {
                let hop = Tone {
                    from: 300.0,
                    to: 700.0,
                    wave: OscillatorType::Triangle,
                    level: 0.25,
                    length: 0.15,
                };
                self.tone(ctx, hop, 0.0, vol);
            }
            SoundEffect::Collect => {
                // Sleigh-bell sparkle
                self.arpeggio(ctx, &[880.0, 1320.0, 1760.0], 0.05, OscillatorType::Sine, 0.2, 0.15, vol);
            }
            SoundEffect::ThemeChange => {
                self.arpeggio(ctx, &[523.0, 659.0, 784.0], 0.09, OscillatorType::Triangle, 0.25, 0.3, vol);
            }
            SoundEffect::LevelUp => {
                self.arpeggio(
                    ctx,
                    &[523.0, 659.0, 784.0, 1047.0],
                    0.1,
                    OscillatorType::Square,
                    0.12,
                    0.3,
                    vol,
                );
            }
            SoundEffect::GameOver => {
                self.arpeggio(ctx, &[400.0, 350.0, 300.0, 200.0], 0.2, OscillatorType::Sine, 0.3, 0.3, vol);
                let thud = Tone {
                    from: 120.0,
                    to: 40.0,
                    wave: OscillatorType::Sawtooth,
                    level: 0.3,
                    length: 0.25,
                };
                self.tone(ctx, thud, 0.0, vol);
            }
            SoundEffect::HighScore => {
                self.arpeggio(
                    ctx,
                    &[500.0, 600.0, 700.0, 800.0, 1000.0],
                    0.08,
                    OscillatorType::Triangle,
                    0.25,
                    0.25,
                    vol,
                );
            }
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Schedule one tone `delay` seconds from now with a decaying envelope
    fn tone(&self, ctx: &AudioContext, tone: Tone, delay: f64, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, tone.from, tone.wave) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(vol * tone.level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + tone.length)
            .ok();
        if tone.to != tone.from {
            osc.frequency().set_value_at_time(tone.from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(tone.to, t + tone.length)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + tone.length + 0.05).ok();
    }

    /// Notes played one after another, `spacing` seconds apart
    #[allow(clippy::too_many_arguments)]
    fn arpeggio(
        &self,
        ctx: &AudioContext,
        freqs: &[f32],
        spacing: f64,
        wave: OscillatorType,
        level: f32,
        length: f64,
        vol: f32,
    ) {
        for (i, &freq) in freqs.iter().enumerate() {
            self.tone(ctx, Tone::steady(freq, wave, level, length), i as f64 * spacing, vol);
        }
    }
}
