//! Web Audio playback
//!
//! Procedurally generated oscillator blips - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{Arpeggio, SoundEffect};
use crate::Settings;
use crate::sim::GameEvent;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    arp: Arpeggio,
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
            arp: Arpeggio::default(),
        }
    }

    /// Resume audio context and start the arpeggio (needs a user gesture)
    pub fn unlock(&mut self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
        self.arp.start();
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// React to a game cue
    pub fn handle(&mut self, event: &GameEvent) {
        self.arp.on_event(event);
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    /// Advance the background arpeggio
    pub fn update(&mut self, now_ms: f64) {
        let Some(freq) = self.arp.next_note(now_ms) else {
            return;
        };
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = create_osc(ctx, freq, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(self.volume * 0.12, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.22).ok();
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        match effect {
            SoundEffect::Jump => blip(ctx, effect.frequency(), OscillatorType::Square, vol * 0.3, 0.05),
            SoundEffect::Hit => play_hit(ctx, vol),
            SoundEffect::Grab => blip(ctx, effect.frequency(), OscillatorType::Sine, vol * 0.4, 0.15),
            SoundEffect::Fanfare(_) => {
                blip(ctx, effect.frequency(), OscillatorType::Triangle, vol * 0.35, 0.16)
            }
        }
    }
}

/// Create an oscillator with gain envelope
fn create_osc(
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

/// Single decaying tone
fn blip(ctx: &AudioContext, freq: f32, osc_type: OscillatorType, peak: f32, length: f64) {
    let Some((osc, gain)) = create_osc(ctx, freq, osc_type) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(peak, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + length)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + length + 0.02).ok();
}

/// Hit - dull crunch with a falling pitch
fn play_hit(ctx: &AudioContext, vol: f32) {
    let t = ctx.current_time();

    if let Some((osc, gain)) = create_osc(ctx, 110.0, OscillatorType::Sawtooth) {
        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.08)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
    }
}
