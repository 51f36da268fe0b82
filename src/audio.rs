//! Audio cues using the Web Audio API
//!
//! Procedurally generated beeps - no external files needed. Playback is
//! fire-and-forget: any Web Audio failure is dropped silently.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// A point was scored
    Score,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::MatchOver { .. } => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(settings: &Settings) -> Self {
        Self {
            volume: settings.effective_volume(),
        }
    }

    /// Pick up volume/mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play the cue for every event that has one
    pub fn dispatch(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    #[cfg(target_arch = "wasm32")]
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
            SoundEffect::PaddleHit => play_paddle_hit(ctx, vol),
            SoundEffect::Score => play_score(ctx, vol),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, effect: SoundEffect) {
        if self.volume > 0.0 {
            log::trace!("(silent) {:?}", effect);
        }
    }
}

/// Create an oscillator with gain envelope
#[cfg(target_arch = "wasm32")]
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

/// Paddle hit - short square blip
#[cfg(target_arch = "wasm32")]
fn play_paddle_hit(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 440.0, OscillatorType::Square) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.3, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.08)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.1).ok();
}

/// Score - two falling tones
#[cfg(target_arch = "wasm32")]
fn play_score(ctx: &AudioContext, vol: f32) {
    for (i, freq) in [660.0, 330.0].iter().enumerate() {
        let delay = i as f64 * 0.12;
        if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Triangle) {
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Score, Side};

    #[test]
    fn test_event_cues() {
        let hit = GameEvent::PaddleHit {
            side: Side::Player,
            speed: 5.2,
        };
        let scored = GameEvent::Scored {
            scorer: Side::Opponent,
            score: Score::default(),
        };
        let over = GameEvent::MatchOver {
            winner: Side::Player,
        };
        assert_eq!(SoundEffect::for_event(&hit), Some(SoundEffect::PaddleHit));
        assert_eq!(SoundEffect::for_event(&scored), Some(SoundEffect::Score));
        assert_eq!(SoundEffect::for_event(&over), None);
    }

    #[test]
    fn test_muted_manager() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(&settings);
        assert_eq!(audio.volume(), 0.0);
        audio.apply_settings(&Settings::default());
        assert!(audio.volume() > 0.0);
    }
}
