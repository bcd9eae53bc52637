//! Audio cues using Web Audio API
//!
//! Procedurally generated blips - no sound files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Can grabbed
    Grab,
    /// Obstacle clicked
    Penalty,
    /// Empty cell clicked
    Miss,
    /// Milestone announced
    Milestone,
    /// Round won
    Win,
    /// Round lost
    Lose,
}

pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.6,
            muted: false,
        }
    }

    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn play(&self, effect: SoundEffect) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let vol = self.volume;
        match effect {
            SoundEffect::Grab => {
                self.play_notes(ctx, vol * 0.25, &[660.0, 990.0], 0.05, OscillatorType::Sine, 0.12)
            }
            SoundEffect::Penalty => {
                self.play_sweep(ctx, vol * 0.35, 220.0, 70.0, OscillatorType::Square, 0.25)
            }
            SoundEffect::Miss => {
                self.play_sweep(ctx, vol * 0.15, 180.0, 140.0, OscillatorType::Triangle, 0.08)
            }
            SoundEffect::Milestone => self.play_notes(
                ctx,
                vol * 0.25,
                &[600.0, 800.0, 1000.0],
                0.08,
                OscillatorType::Sine,
                0.15,
            ),
            SoundEffect::Win => self.play_notes(
                ctx,
                vol * 0.3,
                &[500.0, 600.0, 700.0, 800.0, 1000.0],
                0.09,
                OscillatorType::Triangle,
                0.3,
            ),
            SoundEffect::Lose => self.play_notes(
                ctx,
                vol * 0.3,
                &[400.0, 350.0, 300.0, 200.0],
                0.2,
                OscillatorType::Sine,
                0.3,
            ),
        }
    }

    /// Oscillator wired through its own gain node
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

    /// Short notes in sequence, `step` seconds apart
    fn play_notes(
        &self,
        ctx: &AudioContext,
        level: f32,
        freqs: &[f32],
        step: f64,
        osc_type: OscillatorType,
        decay: f64,
    ) {
        for (i, freq) in freqs.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * step;
            gain.gain().set_value_at_time(level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + decay)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + decay + 0.05).ok();
        }
    }

    /// One tone gliding from `from` to `to`
    fn play_sweep(
        &self,
        ctx: &AudioContext,
        level: f32,
        from: f32,
        to: f32,
        osc_type: OscillatorType,
        duration: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration + 0.05).ok();
    }
}
