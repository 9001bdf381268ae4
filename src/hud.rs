//! Score and game-over displays
//!
//! The world never touches the DOM; it queues [`GameEvent`]s and the shell
//! forwards them here once per frame.

use crate::sim::GameEvent;

/// Output side of the game UI
pub trait Hud {
    fn show_score(&mut self, score: u32);
    fn show_game_over(&mut self, final_score: u32);
    fn hide_game_over(&mut self);
}

/// Forward queued events to a HUD, oldest first
pub fn dispatch<H: Hud + ?Sized>(events: &[GameEvent], hud: &mut H) {
    for event in events {
        match *event {
            GameEvent::ScoreChanged(score) => hud.show_score(score),
            GameEvent::GameOver { final_score } => hud.show_game_over(final_score),
            GameEvent::Restarted => hud.hide_game_over(),
        }
    }
}

/// HUD that writes to the log (native / headless runs)
#[derive(Debug, Default)]
pub struct LogHud {
    pub score: u32,
    pub game_over: Option<u32>,
}

impl Hud for LogHud {
    fn show_score(&mut self, score: u32) {
        self.score = score;
        log::info!("Score: {}", score);
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.game_over = Some(final_score);
        log::info!("GAME OVER - final score {}", final_score);
    }

    fn hide_game_over(&mut self) {
        self.game_over = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::World;
    use crate::tuning::Tuning;

    #[test]
    fn test_dispatch_order() {
        let mut hud = LogHud::default();
        dispatch(
            &[
                GameEvent::ScoreChanged(3),
                GameEvent::GameOver { final_score: 3 },
            ],
            &mut hud,
        );
        assert_eq!(hud.score, 3);
        assert_eq!(hud.game_over, Some(3));

        dispatch(&[GameEvent::ScoreChanged(0), GameEvent::Restarted], &mut hud);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.game_over, None);
    }

    #[test]
    fn test_world_events_reach_hud() {
        let mut world = World::new(5, Tuning::default());
        let mut hud = LogHud {
            score: 99,
            game_over: Some(99),
        };
        dispatch(&world.drain_events(), &mut hud);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.game_over, None);

        world.end_game();
        dispatch(&world.drain_events(), &mut hud);
        assert_eq!(hud.game_over, Some(0));
    }
}
