//! World controller
//!
//! Owns the player and the obstacle set, advances one tick at a time, and
//! reports score / game-over changes as [`GameEvent`]s for the HUD.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::obstacle::Obstacle;
use super::player::Player;
use super::projector::Projector;
use crate::color::Color;
use crate::consts::{GRID_EXTENT, GRID_SIZE};
use crate::draw::DrawCommand;
use crate::renderer::RenderSurface;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (tap/click/space)
    pub jump: bool,
    /// Idle/demo mode - autopilot jumps over obstacles
    pub idle_mode: bool,
}

/// Notifications for the score and game-over displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Score changed (increment or reset)
    ScoreChanged(u32),
    /// Run ended
    GameOver { final_score: u32 },
    /// New run started; hide the game-over display
    Restarted,
}

/// Anything the world paints, ordered by forward position
#[derive(Debug, Clone, Copy)]
pub enum Drawable<'a> {
    Player(&'a Player),
    Obstacle(&'a Obstacle),
}

impl Drawable<'_> {
    pub fn z(&self) -> f32 {
        match self {
            Drawable::Player(p) => p.z,
            Drawable::Obstacle(o) => o.z,
        }
    }

    pub fn draw_commands(
        &self,
        projector: &Projector,
        viewport: Vec2,
        settings: &Settings,
        out: &mut Vec<DrawCommand>,
    ) {
        match self {
            Drawable::Player(p) => p.draw_commands(projector, viewport, settings.show_shadow, out),
            Drawable::Obstacle(o) => o.draw_commands(projector, viewport, out),
        }
    }
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct World {
    tuning: Tuning,
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    player: Player,
    /// Active obstacles in spawn order (ascending z)
    obstacles: Vec<Obstacle>,
    score: u32,
    game_over: bool,
    /// z of the most recently spawned obstacle
    last_obstacle_z: f32,
    /// Simulation tick counter
    time_ticks: u64,
    /// Pending HUD notifications
    events: Vec<GameEvent>,
}

impl World {
    /// Fresh run: player at the origin, initial obstacles spawned
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut world = Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            player: Player::new(tuning.player_radius),
            obstacles: Vec::with_capacity(tuning.obstacle_count + 1),
            score: 0,
            game_over: false,
            last_obstacle_z: tuning.first_obstacle_z,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };

        for _ in 0..world.tuning.obstacle_count {
            world.spawn_obstacle();
        }

        world.events.push(GameEvent::ScoreChanged(0));
        world.events.push(GameEvent::Restarted);
        world
    }

    /// Replace the whole run in one assignment
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(seed, self.tuning.clone());
        log::info!("Run restarted with seed {}", seed);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn last_obstacle_z(&self) -> f32 {
        self.last_obstacle_z
    }

    /// Take all notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply one tick of input, then advance the simulation
    pub fn tick(&mut self, input: &TickInput) {
        if input.jump || (input.idle_mode && self.autopilot_wants_jump()) {
            self.handle_tap();
        }
        self.update();
    }

    /// Jump request; ignored once the run is over
    pub fn handle_tap(&mut self) {
        if !self.game_over {
            self.player.jump(&self.tuning);
        }
    }

    /// Advance the simulation by one tick
    pub fn update(&mut self) {
        if self.game_over {
            return;
        }

        self.time_ticks += 1;
        self.player.update(&self.tuning);

        let mut collided = false;
        for obstacle in &mut self.obstacles {
            if self.player.collides_with(obstacle) {
                collided = true;
                break;
            }

            if !obstacle.passed && self.player.z > obstacle.far_z() {
                obstacle.passed = true;
                self.score += 1;
                self.events.push(GameEvent::ScoreChanged(self.score));
            }
        }
        if collided {
            self.end_game();
            return;
        }

        let cutoff = self.player.z - self.tuning.retire_distance;
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.z > cutoff);
        if self.obstacles.len() < before {
            log::debug!("Retired {} obstacle(s) behind z={}", before - self.obstacles.len(), cutoff);
        }

        if self.obstacles.len() < self.tuning.obstacle_count {
            self.spawn_obstacle();
        }
    }

    /// Terminal transition; repeated calls change nothing
    pub fn end_game(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!(
            "Game over at z={} after {} ticks, score {}",
            self.player.z,
            self.time_ticks,
            self.score
        );
    }

    /// Place one obstacle at least `min_obstacle_distance` past the last one
    fn spawn_obstacle(&mut self) {
        let gap = self.tuning.min_obstacle_distance
            + self.rng.random::<f32>() * self.tuning.spawn_jitter;
        let z = self.last_obstacle_z + gap;
        let obstacle = Obstacle::spawn(z, &self.tuning, &mut self.rng);
        log::debug!(
            "Spawned obstacle at x={} z={} ({}x{}x{})",
            obstacle.x,
            z,
            obstacle.width,
            obstacle.height,
            obstacle.depth
        );
        self.obstacles.push(obstacle);
        self.last_obstacle_z = z;
    }

    /// Jump when the next blocking obstacle is one half-arc ahead
    fn autopilot_wants_jump(&self) -> bool {
        if self.player.is_jumping {
            return false;
        }
        let t = &self.tuning;
        let lead = t.jump_force / t.gravity * t.speed;
        self.obstacles.iter().any(|o| {
            let ahead = o.z - self.player.z;
            let in_lane = (self.player.x - o.x).abs() < o.width / 2.0 + self.player.radius;
            in_lane && ahead > 0.0 && ahead <= lead
        })
    }

    /// Player and obstacles, far to near (painter's order)
    pub fn drawables(&self) -> Vec<Drawable<'_>> {
        let mut all: Vec<Drawable<'_>> = self.obstacles.iter().map(Drawable::Obstacle).collect();
        all.push(Drawable::Player(&self.player));
        all.sort_by(|a, b| a.z().total_cmp(&b.z()));
        all
    }

    /// Floor grid around the player, snapped to the grid spacing
    pub fn grid_commands(&self, projector: &Projector, viewport: Vec2, out: &mut Vec<DrawCommand>) {
        let color = Color::WHITE.with_alpha(0.2);
        let player_grid_z = (self.player.z / GRID_SIZE).floor() * GRID_SIZE;
        let steps = (2.0 * GRID_EXTENT / GRID_SIZE) as i32;

        // Lines across the track (fixed z)
        for i in 0..steps {
            let z = player_grid_z - GRID_EXTENT + i as f32 * GRID_SIZE;
            out.push(DrawCommand::Line {
                from: projector.project(Vec3::new(-GRID_EXTENT, 0.0, z), viewport),
                to: projector.project(Vec3::new(GRID_EXTENT, 0.0, z), viewport),
                color,
                width: 1.0,
            });
        }

        // Lines along the track (fixed x)
        for i in 0..steps {
            let x = -GRID_EXTENT + i as f32 * GRID_SIZE;
            out.push(DrawCommand::Line {
                from: projector.project(Vec3::new(x, 0.0, player_grid_z - GRID_EXTENT), viewport),
                to: projector.project(Vec3::new(x, 0.0, player_grid_z + GRID_EXTENT), viewport),
                color,
                width: 1.0,
            });
        }
    }

    /// Everything for one frame: grid, then entities far to near
    pub fn frame_commands(&self, viewport: Vec2, settings: &Settings) -> Vec<DrawCommand> {
        let projector = Projector::with_scale(settings.projection_scale);
        let mut out = Vec::new();
        if settings.show_grid {
            self.grid_commands(&projector, viewport, &mut out);
        }
        for drawable in self.drawables() {
            drawable.draw_commands(&projector, viewport, settings, &mut out);
        }
        out
    }

    /// Clear the surface and paint the current frame
    pub fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S, settings: &Settings) {
        let viewport = surface.viewport();
        surface.clear();
        for cmd in self.frame_commands(viewport, settings) {
            surface.submit(&cmd);
        }
    }
}
