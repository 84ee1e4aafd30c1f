//! Level lifecycle controller
//!
//! Orchestrates one level from instructions through active play to the
//! result screen and the advance to the next level. Owns the level's game
//! state and session metrics; everything platform-facing (audio, DOM,
//! storage) is reached through cues and collaborator traits.
//!
//! Phase machine: `Instructions -> Active -> Completed -> ResultShown ->
//! Advanced`. Scoring runs exactly once, at the `Active -> Completed`
//! transition; re-satisfying the completion predicate afterwards is a
//! no-op.

use glam::Vec2;

use crate::consts::GRAB_RADIUS;

use super::draw::DrawState;
use super::drop::{DropGame, DropOutcome};
use super::region::{Artwork, ColoringState};
use super::scoring::{RatingInput, StarPolicy};
use super::state::SessionMetrics;
use super::trace::{TraceEvent, TraceState};

/// Lifecycle phase of the active level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPhase {
    /// Instructions overlay is up; geometry need not be settled yet
    Instructions,
    /// Normal interaction loop
    Active,
    /// Completion detected, metrics frozen, waiting out the result delay
    Completed,
    /// Result surface is visible
    ResultShown,
    /// Result reported and navigation requested
    Advanced,
}

/// Audio cue requests emitted by the controller, drained by the host.
/// Fire-and-forget; losing one never affects gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Start,
    Match,
    Error,
    Swoosh,
    Complete,
}

/// The interaction game a level runs
#[derive(Debug, Clone)]
pub enum Game {
    Drop(DropGame),
    Trace(TraceState),
    Draw(DrawState),
    Color(ColoringState),
}

/// Frozen result of a completed level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelOutcome {
    pub stars: u8,
    pub elapsed_ms: f64,
    pub mistakes: u32,
    pub accuracy: Option<f32>,
}

/// Opaque screen identifier handed to the navigation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Level(u32),
}

/// Receives the final result of a level, exactly once, before navigation
pub trait ProgressionSink {
    fn on_level_complete(
        &mut self,
        level: u32,
        stars: u8,
        elapsed_ms: f64,
        mistakes: u32,
        artwork: Option<Artwork>,
    );
}

/// Screen routing collaborator. Called exactly once per advance.
pub trait Navigator {
    fn go_to(&mut self, screen: Screen);
}

/// State machine for one level attempt
#[derive(Debug)]
pub struct LevelController {
    /// 1-based level number
    pub level: u32,
    pub game: Game,
    pub metrics: SessionMetrics,
    policy: StarPolicy,
    phase: LevelPhase,
    outcome: Option<LevelOutcome>,
    /// How long the completion cue plays before the result surface shows
    result_delay_ms: f64,
    completed_at: Option<f64>,
    cues: Vec<Cue>,
}

impl LevelController {
    pub fn new(level: u32, game: Game, policy: StarPolicy, result_delay_ms: f64) -> Self {
        Self {
            level,
            game,
            metrics: SessionMetrics::new(),
            policy,
            phase: LevelPhase::Instructions,
            outcome: None,
            result_delay_ms,
            completed_at: None,
            cues: Vec::new(),
        }
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&LevelOutcome> {
        self.outcome.as_ref()
    }

    /// Pending audio cues, in emission order
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Dismiss the instructions overlay and enter active play. The session
    /// clock does NOT start here - only on the first pointer-down.
    pub fn start(&mut self) {
        if self.phase == LevelPhase::Instructions {
            self.phase = LevelPhase::Active;
            self.cues.push(Cue::Start);
        }
    }

    /// Pointer-down with an already-normalized point. `None` means the
    /// surface was not attached; the event is dropped.
    pub fn pointer_down(&mut self, p: Option<Vec2>, now_ms: f64) {
        if self.phase != LevelPhase::Active {
            return;
        }
        let Some(p) = p else { return };
        self.metrics.note_interaction(now_ms);
        match &mut self.game {
            Game::Drop(game) => {
                game.press(p, GRAB_RADIUS);
            }
            Game::Trace(game) => {
                if game.press(p) == TraceEvent::OffLine {
                    self.metrics.add_mistake();
                }
            }
            Game::Draw(game) => game.press(p),
            Game::Color(game) => {
                if game.apply(p).is_some() {
                    self.cues.push(Cue::Match);
                }
            }
        }
    }

    /// Pointer-move sample
    pub fn pointer_move(&mut self, p: Option<Vec2>, _now_ms: f64) {
        if self.phase != LevelPhase::Active {
            return;
        }
        let Some(p) = p else { return };
        match &mut self.game {
            Game::Drop(game) => game.track(p),
            Game::Trace(game) => {
                if game.sample(p) == TraceEvent::OffLine {
                    self.metrics.add_mistake();
                }
            }
            Game::Draw(game) => game.sample(p),
            Game::Color(_) => {}
        }
    }

    /// Pointer-up. Auto-detecting games check their completion predicate
    /// here; releasing outside any valid target IS the cancellation path.
    pub fn pointer_up(&mut self, now_ms: f64) {
        if self.phase != LevelPhase::Active {
            return;
        }
        match &mut self.game {
            Game::Drop(game) => {
                match game.release() {
                    Some(DropOutcome::Resolved) => self.cues.push(Cue::Match),
                    Some(DropOutcome::Mismatch) => {
                        self.metrics.add_mistake();
                        self.cues.push(Cue::Error);
                    }
                    Some(DropOutcome::NoTarget) | None => {}
                }
                if game.all_resolved() {
                    self.complete(now_ms);
                }
            }
            Game::Trace(game) => {
                if let TraceEvent::SegmentCompleted { .. } = game.release() {
                    self.cues.push(Cue::Swoosh);
                }
                if game.all_completed() {
                    self.complete(now_ms);
                }
            }
            Game::Draw(game) => game.release(),
            Game::Color(_) => {}
        }
    }

    /// Explicit player finish for the drawing and coloring levels. Ignored
    /// for auto-detecting games and for a drawing level with a blank canvas.
    pub fn finish(&mut self, now_ms: f64) {
        if self.phase != LevelPhase::Active {
            return;
        }
        match &self.game {
            Game::Draw(game) => {
                if game.has_drawn() {
                    self.complete(now_ms);
                }
            }
            Game::Color(_) => self.complete(now_ms),
            _ => {}
        }
    }

    /// Score the session. Guarded by the phase check so a re-satisfied
    /// completion predicate can never double-score.
    fn complete(&mut self, now_ms: f64) {
        if self.phase != LevelPhase::Active {
            return;
        }
        self.metrics.freeze(now_ms);
        let accuracy = match &self.game {
            Game::Trace(game) => Some(game.average_accuracy()),
            Game::Draw(game) => Some(game.coverage()),
            _ => None,
        };
        let input = RatingInput {
            elapsed_ms: self.metrics.elapsed_ms(now_ms),
            mistakes: self.metrics.mistakes,
            accuracy,
        };
        self.outcome = Some(LevelOutcome {
            stars: self.policy.rate(input),
            elapsed_ms: input.elapsed_ms,
            mistakes: input.mistakes,
            accuracy,
        });
        self.phase = LevelPhase::Completed;
        self.completed_at = Some(now_ms);
        self.cues.push(Cue::Complete);
    }

    /// Advance wall time. Surfaces the result after the presentation delay.
    pub fn tick(&mut self, now_ms: f64) {
        if self.phase == LevelPhase::Completed {
            if let Some(at) = self.completed_at {
                if now_ms - at >= self.result_delay_ms {
                    self.phase = LevelPhase::ResultShown;
                }
            }
        }
    }

    /// Player confirmed the result: report it and request navigation.
    /// Reports exactly once; repeated calls do nothing.
    pub fn advance(&mut self, sink: &mut dyn ProgressionSink, nav: &mut dyn Navigator) {
        if self.phase != LevelPhase::ResultShown {
            return;
        }
        let Some(outcome) = self.outcome else {
            // Cannot happen: ResultShown is only reachable after scoring
            log::warn!("advance without an outcome on level {}", self.level);
            return;
        };
        let artwork = match &self.game {
            Game::Color(game) => Some(game.artwork()),
            _ => None,
        };
        sink.on_level_complete(
            self.level,
            outcome.stars,
            outcome.elapsed_ms,
            outcome.mistakes,
            artwork,
        );
        self.phase = LevelPhase::Advanced;
        let next = if self.level < crate::consts::LEVEL_COUNT {
            Screen::Level(self.level + 1)
        } else {
            Screen::Menu
        };
        nav.go_to(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::region::{Boundary, FillRegion, Tool};
    use crate::sim::state::{Category, Draggable, DropTarget, TraceSegment};

    const SORTING_POLICY: StarPolicy = StarPolicy::Mistakes {
        three_max_mistakes: 0,
        three_max_ms: 10_000.0,
        two_max_mistakes: 1,
        two_max_ms: 20_000.0,
    };

    #[derive(Default)]
    struct SinkRecorder {
        reports: Vec<(u32, u8, f64, u32, Option<Artwork>)>,
    }

    impl ProgressionSink for SinkRecorder {
        fn on_level_complete(
            &mut self,
            level: u32,
            stars: u8,
            elapsed_ms: f64,
            mistakes: u32,
            artwork: Option<Artwork>,
        ) {
            self.reports.push((level, stars, elapsed_ms, mistakes, artwork));
        }
    }

    #[derive(Default)]
    struct NavRecorder {
        screens: Vec<Screen>,
    }

    impl Navigator for NavRecorder {
        fn go_to(&mut self, screen: Screen) {
            self.screens.push(screen);
        }
    }

    fn sorting_controller() -> LevelController {
        let rests = vec![
            Vec2::new(100.0, 100.0),
            Vec2::new(200.0, 100.0),
            Vec2::new(300.0, 100.0),
        ];
        let entities = vec![
            Draggable::new(1, Category(0), rests[0]),
            Draggable::new(2, Category(1), rests[1]),
            Draggable::new(3, Category(2), rests[2]),
        ];
        let targets = vec![
            DropTarget::new(10, Category(0), Vec2::new(100.0, 500.0)),
            DropTarget::new(11, Category(1), Vec2::new(200.0, 500.0)),
            DropTarget::new(12, Category(2), Vec2::new(300.0, 500.0)),
        ];
        let game = DropGame::new(entities, targets, rests, 80.0);
        LevelController::new(1, Game::Drop(game), SORTING_POLICY, 1000.0)
    }

    fn drag(ctrl: &mut LevelController, from: Vec2, to: Vec2, now: f64) {
        ctrl.pointer_down(Some(from), now);
        ctrl.pointer_move(Some(to), now);
        ctrl.pointer_up(now);
    }

    #[test]
    fn perfect_run_scores_three_stars() {
        let mut ctrl = sorting_controller();
        ctrl.start();
        drag(&mut ctrl, Vec2::new(100.0, 100.0), Vec2::new(100.0, 500.0), 1_000.0);
        drag(&mut ctrl, Vec2::new(200.0, 100.0), Vec2::new(200.0, 500.0), 4_000.0);
        drag(&mut ctrl, Vec2::new(300.0, 100.0), Vec2::new(300.0, 500.0), 10_000.0);

        assert_eq!(ctrl.phase(), LevelPhase::Completed);
        let out = ctrl.outcome().unwrap();
        // Clock started at the first pointer-down (1s), ended at 10s
        assert_eq!(out.elapsed_ms, 9_000.0);
        assert_eq!(out.mistakes, 0);
        assert_eq!(out.stars, 3);
    }

    #[test]
    fn one_corrected_mistake_scores_two_stars() {
        let mut ctrl = sorting_controller();
        ctrl.start();
        // Red fruit onto the wrong basket first
        drag(&mut ctrl, Vec2::new(100.0, 100.0), Vec2::new(200.0, 500.0), 1_000.0);
        drag(&mut ctrl, Vec2::new(100.0, 100.0), Vec2::new(100.0, 500.0), 5_000.0);
        drag(&mut ctrl, Vec2::new(200.0, 100.0), Vec2::new(200.0, 500.0), 9_000.0);
        drag(&mut ctrl, Vec2::new(300.0, 100.0), Vec2::new(300.0, 500.0), 19_000.0);

        let out = ctrl.outcome().unwrap();
        assert_eq!(out.mistakes, 1);
        assert_eq!(out.elapsed_ms, 18_000.0);
        assert_eq!(out.stars, 2);
    }

    #[test]
    fn timer_ignores_instructions_and_mount_time() {
        let mut ctrl = sorting_controller();
        ctrl.start();
        // Player stares at the board for a long while first
        ctrl.pointer_move(Some(Vec2::new(50.0, 50.0)), 60_000.0);
        assert_eq!(ctrl.metrics.started_at, None);
        drag(&mut ctrl, Vec2::new(100.0, 100.0), Vec2::new(100.0, 500.0), 100_000.0);
        assert_eq!(ctrl.metrics.started_at, Some(100_000.0));
    }

    #[test]
    fn input_before_start_is_ignored() {
        let mut ctrl = sorting_controller();
        ctrl.pointer_down(Some(Vec2::new(100.0, 100.0)), 1_000.0);
        ctrl.pointer_up(1_000.0);
        assert_eq!(ctrl.metrics.started_at, None);
        assert_eq!(ctrl.phase(), LevelPhase::Instructions);
    }

    #[test]
    fn unattached_surface_events_are_noops() {
        let mut ctrl = sorting_controller();
        ctrl.start();
        ctrl.pointer_down(None, 1_000.0);
        ctrl.pointer_move(None, 1_100.0);
        // No drag started, no clock started
        assert_eq!(ctrl.metrics.started_at, None);
        if let Game::Drop(game) = &ctrl.game {
            assert!(!game.is_dragging());
        }
    }

    #[test]
    fn completion_is_idempotent() {
        let mut ctrl = sorting_controller();
        ctrl.start();
        drag(&mut ctrl, Vec2::new(100.0, 100.0), Vec2::new(100.0, 500.0), 1_000.0);
        drag(&mut ctrl, Vec2::new(200.0, 100.0), Vec2::new(200.0, 500.0), 2_000.0);
        drag(&mut ctrl, Vec2::new(300.0, 100.0), Vec2::new(300.0, 500.0), 3_000.0);
        let first = *ctrl.outcome().unwrap();

        // The predicate is still true; poking the controller again must not
        // re-score or mutate the frozen metrics
        ctrl.pointer_up(50_000.0);
        ctrl.finish(60_000.0);
        assert_eq!(*ctrl.outcome().unwrap(), first);
        assert_eq!(ctrl.metrics.ended_at, Some(3_000.0));
    }

    #[test]
    fn result_waits_out_the_presentation_delay() {
        let mut ctrl = sorting_controller();
        ctrl.start();
        drag(&mut ctrl, Vec2::new(100.0, 100.0), Vec2::new(100.0, 500.0), 1_000.0);
        drag(&mut ctrl, Vec2::new(200.0, 100.0), Vec2::new(200.0, 500.0), 2_000.0);
        drag(&mut ctrl, Vec2::new(300.0, 100.0), Vec2::new(300.0, 500.0), 3_000.0);

        ctrl.tick(3_500.0);
        assert_eq!(ctrl.phase(), LevelPhase::Completed);
        ctrl.tick(4_000.0);
        assert_eq!(ctrl.phase(), LevelPhase::ResultShown);
    }

    #[test]
    fn advance_reports_once_and_navigates() {
        let mut ctrl = sorting_controller();
        ctrl.start();
        drag(&mut ctrl, Vec2::new(100.0, 100.0), Vec2::new(100.0, 500.0), 1_000.0);
        drag(&mut ctrl, Vec2::new(200.0, 100.0), Vec2::new(200.0, 500.0), 2_000.0);
        drag(&mut ctrl, Vec2::new(300.0, 100.0), Vec2::new(300.0, 500.0), 3_000.0);
        ctrl.tick(5_000.0);

        let mut sink = SinkRecorder::default();
        let mut nav = NavRecorder::default();
        ctrl.advance(&mut sink, &mut nav);
        ctrl.advance(&mut sink, &mut nav);

        assert_eq!(sink.reports.len(), 1);
        let (level, stars, elapsed, mistakes, artwork) = &sink.reports[0];
        assert_eq!((*level, *stars, *elapsed, *mistakes), (1, 3, 2_000.0, 0));
        assert!(artwork.is_none());
        assert_eq!(nav.screens, vec![Screen::Level(2)]);
        assert_eq!(ctrl.phase(), LevelPhase::Advanced);
    }

    #[test]
    fn last_level_advances_back_to_menu() {
        let regions = vec![FillRegion::new(
            1,
            Boundary::Polygon(vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(0.0, 100.0),
            ]),
        )];
        let game = ColoringState::new(regions, "#e53935");
        let mut ctrl = LevelController::new(5, Game::Color(game), StarPolicy::Fixed(3), 800.0);
        ctrl.start();
        ctrl.pointer_down(Some(Vec2::new(50.0, 50.0)), 1_000.0);
        ctrl.finish(2_000.0);
        ctrl.tick(2_800.0);

        let mut sink = SinkRecorder::default();
        let mut nav = NavRecorder::default();
        ctrl.advance(&mut sink, &mut nav);
        assert_eq!(nav.screens, vec![Screen::Menu]);
        let artwork = sink.reports[0].4.as_ref().unwrap();
        assert_eq!(artwork.0.get(&1).map(String::as_str), Some("#e53935"));
    }

    #[test]
    fn coloring_never_charges_mistakes() {
        let regions = vec![FillRegion::new(
            1,
            Boundary::Rect(crate::Rect::from_size(100.0, 100.0)),
        )];
        let game = ColoringState::new(regions, "#e53935");
        let mut ctrl = LevelController::new(5, Game::Color(game), StarPolicy::Fixed(3), 800.0);
        ctrl.start();
        // Fill, erase, refill, and a stray tap in open space
        ctrl.pointer_down(Some(Vec2::new(50.0, 50.0)), 1_000.0);
        if let Game::Color(g) = &mut ctrl.game {
            g.tool = Tool::Eraser;
        }
        ctrl.pointer_down(Some(Vec2::new(50.0, 50.0)), 2_000.0);
        if let Game::Color(g) = &mut ctrl.game {
            g.tool = Tool::Pencil;
            g.color = "#43a047".to_owned();
        }
        ctrl.pointer_down(Some(Vec2::new(50.0, 50.0)), 3_000.0);
        ctrl.pointer_down(Some(Vec2::new(900.0, 900.0)), 4_000.0);
        ctrl.finish(5_000.0);

        let out = ctrl.outcome().unwrap();
        assert_eq!(out.mistakes, 0);
        assert_eq!(out.stars, 3);
        if let Game::Color(g) = &ctrl.game {
            assert_eq!(g.regions[0].fill.as_deref(), Some("#43a047"));
        }
    }

    #[test]
    fn trace_level_completes_through_the_controller() {
        let segments = vec![
            TraceSegment::new(Vec2::new(100.0, 50.0), Vec2::new(100.0, 250.0), 30.0),
            TraceSegment::new(Vec2::new(200.0, 50.0), Vec2::new(200.0, 250.0), 30.0),
        ];
        let policy = StarPolicy::TraceAccuracy {
            three_min_accuracy: 90.0,
            three_max_ms: 8_000.0,
            two_min_accuracy: 70.0,
            two_fallback_max_ms: 15_000.0,
        };
        let mut ctrl =
            LevelController::new(3, Game::Trace(TraceState::new(segments)), policy, 1000.0);
        ctrl.start();

        for (x, t0) in [(100.0, 1_000.0), (200.0, 3_000.0)] {
            ctrl.pointer_down(Some(Vec2::new(x, 50.0)), t0);
            let mut y = 50.0;
            while y < 250.0 {
                y += 20.0;
                ctrl.pointer_move(Some(Vec2::new(x, y)), t0 + y as f64);
            }
            ctrl.pointer_up(t0 + 1_000.0);
        }

        assert_eq!(ctrl.phase(), LevelPhase::Completed);
        let out = ctrl.outcome().unwrap();
        assert_eq!(out.accuracy, Some(100.0));
        assert_eq!(out.mistakes, 0);
        // 3s elapsed, clean and accurate
        assert_eq!(out.stars, 3);
    }

    #[test]
    fn blank_drawing_cannot_finish() {
        let mut ctrl = LevelController::new(
            4,
            Game::Draw(DrawState::new("M0,0 L100,0")),
            StarPolicy::Coverage {
                three_min_coverage: 90.0,
                three_window_ms: (15_000.0, 20_000.0),
                two_min_coverage: 70.0,
                two_max_ms: 30_000.0,
            },
            1000.0,
        );
        ctrl.start();
        ctrl.finish(1_000.0);
        assert_eq!(ctrl.phase(), LevelPhase::Active);
    }

    #[test]
    fn cues_are_emitted_and_drained() {
        let mut ctrl = sorting_controller();
        ctrl.start();
        assert_eq!(ctrl.drain_cues(), vec![Cue::Start]);
        // Wrong basket
        drag(&mut ctrl, Vec2::new(100.0, 100.0), Vec2::new(200.0, 500.0), 1_000.0);
        assert_eq!(ctrl.drain_cues(), vec![Cue::Error]);
        // Correct basket
        drag(&mut ctrl, Vec2::new(100.0, 100.0), Vec2::new(100.0, 500.0), 2_000.0);
        assert_eq!(ctrl.drain_cues(), vec![Cue::Match]);
        assert!(ctrl.drain_cues().is_empty());
    }
}
