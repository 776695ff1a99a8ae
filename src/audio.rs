//! Sound cues
//!
//! The simulation only names cues; the host plays them through an
//! [`AudioBackend`]. [`AudioManager`] applies volume and mute settings
//! in between.

/// One-shot sound cues emitted by the match core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Player shot, rotated between three samples
    PlayerFire(u8),
    /// An enemy fired
    EnemyFire,
    /// Player bullet destroyed an enemy
    EnemyKilled,
    /// Player bullet damaged an enemy that survived
    EnemyHit,
    /// Player lost a hit point
    PlayerHit,
    /// Player lost the last hit point
    PlayerDeath,
    /// Barrier absorbed a bullet
    ShieldAbsorb,
    /// Barrier broke
    ShieldBreak,
    /// Round cleared
    Victory,
    /// Rejected input (name full, incomplete confirm, ...)
    NoOp,
    /// Menu cursor moved or letter typed
    MenuMove,
    /// Menu choice confirmed
    Confirm,
}

/// Number of interchangeable player fire samples
pub const FIRE_VARIANTS: u8 = 3;

impl Cue {
    /// Stable identifier for asset lookup
    pub fn id(&self) -> &'static str {
        match self {
            Cue::PlayerFire(0) => "shoot_a",
            Cue::PlayerFire(1) => "shoot_b",
            Cue::PlayerFire(_) => "shoot_c",
            Cue::EnemyFire => "enemy_shoot",
            Cue::EnemyKilled => "enemy_explode",
            Cue::EnemyHit => "enemy_hit",
            Cue::PlayerHit => "player_hit",
            Cue::PlayerDeath => "player_death",
            Cue::ShieldAbsorb => "shield_absorb",
            Cue::ShieldBreak => "shield_break",
            Cue::Victory => "victory",
            Cue::NoOp => "no_op",
            Cue::MenuMove => "menu_move",
            Cue::Confirm => "confirm",
        }
    }
}

/// Host sound service
pub trait AudioBackend {
    /// Play `cue` once at `volume` (0.0 - 1.0)
    fn play(&mut self, cue: Cue, volume: f32);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend {
    pub played: usize,
}

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: Cue, volume: f32) {
        self.played += 1;
        log::debug!("play {} at {:.2}", cue.id(), volume);
    }
}

/// Routes simulation cues to a backend with volume and mute applied
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
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

    /// Silence every cue without touching the volume levels
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Master × SFX, or 0 when muted
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue
    pub fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(cue, vol);
    }

    /// Play every cue drained from the simulation this tick
    pub fn play_all(&mut self, cues: impl IntoIterator<Item = Cue>) {
        for cue in cues {
            self.play(cue);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
