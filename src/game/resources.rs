//! Game resources (singleton state).

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

use super::{GAME_OVER_DELAY, START_DELAY};

/// Where the game is between ticks, restarts and teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting before the very first move.
    Starting { remaining: Duration },
    Running,
    /// The snake died; let the final frame render before asking to restart.
    GameOverPending { remaining: Duration },
    AwaitingRestart,
    /// The board was reset; wait a moment before movement resumes.
    Resuming { remaining: Duration },
    Stopped,
}

/// Side effect a phase change asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    BeginMovement,
    PromptRestart,
}

/// Timed state machine wrapped around the game session.
#[derive(Resource, Debug)]
pub struct Lifecycle {
    phase: Phase,
    restart_delay: Duration,
}

impl Lifecycle {
    pub fn new(restart_delay: Duration) -> Self {
        Lifecycle {
            phase: Phase::Starting {
                remaining: START_DELAY,
            },
            restart_delay,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn accepts_input(&self) -> bool {
        self.phase != Phase::Stopped
    }

    /// Count down the timed phases.
    pub fn advance(&mut self, delta: Duration) -> Option<Transition> {
        match self.phase {
            Phase::Starting { remaining } | Phase::Resuming { remaining } => {
                if let Some(left) = remaining.checked_sub(delta).filter(|d| !d.is_zero()) {
                    self.set_remaining(left);
                    None
                } else {
                    self.phase = Phase::Running;
                    Some(Transition::BeginMovement)
                }
            }
            Phase::GameOverPending { remaining } => {
                if let Some(left) = remaining.checked_sub(delta).filter(|d| !d.is_zero()) {
                    self.phase = Phase::GameOverPending { remaining: left };
                    None
                } else {
                    self.phase = Phase::AwaitingRestart;
                    Some(Transition::PromptRestart)
                }
            }
            Phase::Running | Phase::AwaitingRestart | Phase::Stopped => None,
        }
    }

    fn set_remaining(&mut self, left: Duration) {
        self.phase = match self.phase {
            Phase::Starting { .. } => Phase::Starting { remaining: left },
            Phase::Resuming { .. } => Phase::Resuming { remaining: left },
            other => other,
        };
    }

    /// The snake died. Only meaningful while running.
    pub fn game_over(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::GameOverPending {
                remaining: GAME_OVER_DELAY,
            };
        }
    }

    /// The player confirmed the restart prompt. Returns true when the caller
    /// should now reset the board.
    pub fn acknowledge(&mut self) -> bool {
        if self.phase != Phase::AwaitingRestart {
            return false;
        }
        self.phase = Phase::Resuming {
            remaining: self.restart_delay,
        };
        true
    }

    /// Tear the game down. Nothing leaves this phase.
    pub fn stop(&mut self) {
        self.phase = Phase::Stopped;
    }
}

/// Repeating clock that paces the snake. Re-armed whenever movement begins.
#[derive(Resource)]
pub struct MoveTimer {
    pub timer: Timer,
}

impl MoveTimer {
    pub fn new(interval: Duration) -> Self {
        MoveTimer {
            timer: Timer::new(interval, TimerMode::Repeating),
        }
    }

    pub fn rearm(&mut self) {
        self.timer.reset();
    }
}

/// Resource for camera shake effect. `offset` is the jitter currently applied
/// on top of the camera's resting position.
#[derive(Resource)]
pub struct CameraShake {
    pub timer: Timer,
    pub intensity: f32,
    pub offset: Vec3,
}

impl Default for CameraShake {
    fn default() -> Self {
        CameraShake {
            timer: Timer::from_seconds(0.0, TimerMode::Once),
            intensity: 0.0,
            offset: Vec3::ZERO,
        }
    }
}

/// Random source used for food placement.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => GameRng(StdRng::seed_from_u64(seed)),
            None => GameRng(StdRng::from_os_rng()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESTART: Duration = Duration::from_millis(500);

    fn running() -> Lifecycle {
        let mut lifecycle = Lifecycle::new(RESTART);
        lifecycle.advance(START_DELAY);
        lifecycle
    }

    #[test]
    fn test_starts_after_delay() {
        let mut lifecycle = Lifecycle::new(RESTART);
        assert!(!lifecycle.is_running());

        assert_eq!(lifecycle.advance(Duration::from_millis(600)), None);
        assert!(!lifecycle.is_running());
        assert_eq!(
            lifecycle.advance(Duration::from_millis(400)),
            Some(Transition::BeginMovement)
        );
        assert!(lifecycle.is_running());
    }

    #[test]
    fn test_running_does_not_transition_on_its_own() {
        let mut lifecycle = running();

        assert_eq!(lifecycle.advance(Duration::from_secs(60)), None);
        assert!(lifecycle.is_running());
    }

    #[test]
    fn test_game_over_prompts_then_waits_for_acknowledgment() {
        let mut lifecycle = running();

        lifecycle.game_over();
        assert!(!lifecycle.is_running());
        assert_eq!(
            lifecycle.advance(GAME_OVER_DELAY),
            Some(Transition::PromptRestart)
        );
        assert_eq!(lifecycle.phase(), Phase::AwaitingRestart);

        // No automatic restart, however long we wait.
        assert_eq!(lifecycle.advance(Duration::from_secs(60)), None);
        assert_eq!(lifecycle.phase(), Phase::AwaitingRestart);
    }

    #[test]
    fn test_acknowledge_resumes_after_restart_delay() {
        let mut lifecycle = running();
        lifecycle.game_over();
        lifecycle.advance(GAME_OVER_DELAY);

        assert!(lifecycle.acknowledge());
        assert_eq!(
            lifecycle.phase(),
            Phase::Resuming { remaining: RESTART }
        );
        assert_eq!(lifecycle.advance(Duration::from_millis(499)), None);
        assert_eq!(
            lifecycle.advance(Duration::from_millis(1)),
            Some(Transition::BeginMovement)
        );
        assert!(lifecycle.is_running());
    }

    #[test]
    fn test_acknowledge_ignored_unless_prompted() {
        let mut lifecycle = running();
        assert!(!lifecycle.acknowledge());

        lifecycle.game_over();
        assert!(!lifecycle.acknowledge());
        assert!(matches!(lifecycle.phase(), Phase::GameOverPending { .. }));
    }

    #[test]
    fn test_game_over_only_from_running() {
        let mut lifecycle = Lifecycle::new(RESTART);
        lifecycle.game_over();
        assert!(matches!(lifecycle.phase(), Phase::Starting { .. }));
    }

    #[test]
    fn test_stop_is_final() {
        let mut lifecycle = running();
        lifecycle.stop();

        assert!(!lifecycle.accepts_input());
        assert_eq!(lifecycle.advance(Duration::from_secs(5)), None);
        assert!(!lifecycle.acknowledge());
        lifecycle.game_over();
        assert_eq!(lifecycle.phase(), Phase::Stopped);
    }
}
