//! Sound cues
//!
//! Three procedurally generated effects (jump, land, game over) triggered by
//! simulation events. Playback is fire-and-forget: failures are logged and
//! never reach the game state.

use thiserror::Error;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player leaves the ground
    Jump,
    /// Player lands on a platform
    Land,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Landed { .. } => Some(SoundEffect::Land),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::NewHighScore { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable")]
    Unavailable,
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Anything that can play a sound effect
pub trait CuePlayer {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError>;
}

/// Play the cue for each event. Errors are logged and dropped.
pub fn play_events<P: CuePlayer + ?Sized>(player: &mut P, events: &[GameEvent]) {
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        if let Err(e) = player.play(effect) {
            log::warn!("Failed to play {:?}: {}", effect, e);
        }
    }
}

/// No-op output for native runs
#[derive(Debug, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        log::debug!("Cue: {:?}", effect);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioError, CuePlayer, SoundEffect};

    fn js_err(err: JsValue) -> AudioError {
        AudioError::Playback(format!("{:?}", err))
    }

    /// Output level for every cue
    const MASTER_VOLUME: f32 = 0.8;

    /// Web Audio output
    pub struct AudioManager {
        ctx: Option<AudioContext>,
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
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn toggle_muted(&mut self) -> bool {
            self.muted = !self.muted;
            self.muted
        }

        /// Oscillator routed through a gain node to the output
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Result<(OscillatorNode, GainNode), AudioError> {
            let osc = ctx.create_oscillator().map_err(js_err)?;
            let gain = ctx.create_gain().map_err(js_err)?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).map_err(js_err)?;
            gain.connect_with_audio_node(&ctx.destination())
                .map_err(js_err)?;

            Ok((osc, gain))
        }

        /// Sweep `from` -> `to` Hz with an exponential fade over `secs`
        fn sweep(
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            level: f32,
            secs: f64,
        ) -> Result<(), AudioError> {
            let (osc, gain) = Self::create_osc(ctx, from, osc_type)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(level, t).map_err(js_err)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + secs)
                .map_err(js_err)?;
            osc.frequency().set_value_at_time(from, t).map_err(js_err)?;
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + secs)
                .map_err(js_err)?;

            osc.start().map_err(js_err)?;
            osc.stop_with_when(t + secs + 0.05).map_err(js_err)?;
            Ok(())
        }
    }

    impl CuePlayer for AudioManager {
        fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
            if self.muted {
                return Ok(());
            }
            let Some(ctx) = &self.ctx else {
                return Err(AudioError::Unavailable);
            };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let vol = MASTER_VOLUME;
            match effect {
                // Rising chirp
                SoundEffect::Jump => {
                    Self::sweep(ctx, OscillatorType::Sine, 300.0, 700.0, vol * 0.4, 0.15)
                }
                // Solid thump
                SoundEffect::Land => {
                    Self::sweep(ctx, OscillatorType::Sine, 150.0, 60.0, vol * 0.6, 0.1)
                }
                // Falling sawtooth
                SoundEffect::GameOver => {
                    Self::sweep(ctx, OscillatorType::Sawtooth, 400.0, 80.0, vol * 0.3, 0.45)
                }
            }
        }
    }
}
