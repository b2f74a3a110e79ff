//! Player/obstacle overlap detection and its game outcome
//!
//! Detection is plain AABB overlap. The outcome of an overlap (damage,
//! consuming the obstacle, game over) is decided in
//! [`GameSession::on_overlap`], which a host physics engine can also call
//! directly with its own overlap events.

use super::events::GameEvent;
use super::obstacle::Obstacle;
use super::player::{HurtOutcome, Player};
use super::state::{GameSession, SessionPhase};

/// Ids of every live obstacle whose hitbox overlaps the player's
pub fn detect_overlaps(player: &Player, obstacles: &[Obstacle]) -> Vec<u32> {
    let bounds = player.bounds();
    obstacles
        .iter()
        .filter(|obstacle| obstacle.bounds().overlaps(&bounds))
        .map(|obstacle| obstacle.id)
        .collect()
}

/// What an overlap event amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapOutcome {
    /// Player invincible/dead, session not running, or obstacle already gone
    Ignored,
    /// Obstacle consumed, player lost a life
    Hit,
    /// Obstacle consumed, last life lost; game over is pending
    Fatal,
}

impl GameSession {
    /// Apply one overlap event between the player and obstacle `obstacle_id`
    pub fn on_overlap(&mut self, obstacle_id: u32) -> OverlapOutcome {
        if self.phase != SessionPhase::Running || self.player.is_invincible() {
            return OverlapOutcome::Ignored;
        }
        if !self.spawner.obstacles().iter().any(|o| o.id == obstacle_id) {
            return OverlapOutcome::Ignored;
        }

        let outcome = self.player.hurt(&mut self.timers, &mut self.events);
        if outcome == HurtOutcome::Ignored {
            return OverlapOutcome::Ignored;
        }

        // One hit consumes exactly the obstacle that caused it
        if self.spawner.remove(obstacle_id).is_some() {
            self.events.push(GameEvent::ObstacleDestroyed { id: obstacle_id });
        }

        match outcome {
            HurtOutcome::Died => {
                self.begin_game_over();
                OverlapOutcome::Fatal
            }
            _ => OverlapOutcome::Hit,
        }
    }

    /// Detect and apply every overlap for this tick
    pub fn resolve_collisions(&mut self) {
        for id in detect_overlaps(&self.player, self.spawner.obstacles()) {
            self.on_overlap(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleKind;
    use crate::tuning::Tuning;

    /// Session with one obstacle parked on top of the player
    fn session_with_obstacle_on_player(kind: ObstacleKind) -> (GameSession, u32) {
        let mut session = GameSession::new(7);
        let id = 1000;
        let x = session.player.pos.x;
        let ground = Tuning::default().ground_y();
        session
            .spawner
            .insert_for_test(Obstacle::new(id, kind, x, ground, 200.0));
        (session, id)
    }

    #[test]
    fn test_rock_overlaps_standing_player() {
        let (session, id) = session_with_obstacle_on_player(ObstacleKind::Rock);
        assert_eq!(detect_overlaps(&session.player, session.spawner.obstacles()), vec![id]);
    }

    #[test]
    fn test_far_obstacle_does_not_overlap() {
        let mut session = GameSession::new(7);
        session.spawner.spawn(&mut session.events);
        assert!(detect_overlaps(&session.player, session.spawner.obstacles()).is_empty());
    }

    #[test]
    fn test_bird_clears_ducking_player() {
        let (mut session, _) = session_with_obstacle_on_player(ObstacleKind::Bird);
        session.player.duck(&mut session.events);
        assert!(detect_overlaps(&session.player, session.spawner.obstacles()).is_empty());
    }

    #[test]
    fn test_hit_consumes_obstacle() {
        let (mut session, id) = session_with_obstacle_on_player(ObstacleKind::Cactus);
        assert_eq!(session.on_overlap(id), OverlapOutcome::Hit);
        assert_eq!(session.player.lives, 2);
        assert!(session.spawner.obstacles().is_empty());
        assert!(session.events().contains(&GameEvent::ObstacleDestroyed { id }));

        // Same overlap reported again: obstacle is gone
        assert_eq!(session.on_overlap(id), OverlapOutcome::Ignored);
        assert_eq!(session.player.lives, 2);
    }

    #[test]
    fn test_invincible_player_keeps_obstacle() {
        let (mut session, id) = session_with_obstacle_on_player(ObstacleKind::Rock);
        session.player.hurt(&mut session.timers, &mut session.events);
        assert_eq!(session.on_overlap(id), OverlapOutcome::Ignored);
        assert_eq!(session.spawner.obstacles().len(), 1);
        assert_eq!(session.player.lives, 2);
    }

    #[test]
    fn test_fatal_hit_stops_spawning() {
        let (mut session, id) = session_with_obstacle_on_player(ObstacleKind::Rock);
        session.player.lives = 1;
        assert!(session.spawner.is_running());
        assert_eq!(session.on_overlap(id), OverlapOutcome::Fatal);
        assert_eq!(session.phase, SessionPhase::Dying);
        assert!(!session.spawner.is_running());
    }

    #[test]
    fn test_unknown_obstacle_ignored() {
        let mut session = GameSession::new(7);
        assert_eq!(session.on_overlap(999), OverlapOutcome::Ignored);
        assert_eq!(session.player.lives, 3);
    }
}
