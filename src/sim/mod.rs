//! Per-level interaction state machines
//!
//! Everything gameplay lives here and is pure: no DOM, no audio, no
//! storage. The wasm entry point feeds normalized pointer samples in and
//! drains cue events out. Each level is one of four interaction games
//! driven by a shared lifecycle controller.

pub mod draw;
pub mod drop;
pub mod level;
pub mod region;
pub mod scoring;
pub mod state;
pub mod trace;

pub use draw::{DrawState, PathCmd, parse_path, path_length};
pub use drop::{DropGame, DropOutcome};
pub use level::{Cue, Game, LevelController, LevelOutcome, LevelPhase, Navigator, ProgressionSink, Screen};
pub use region::{Artwork, Boundary, ColoringState, FillRegion, Tool};
pub use scoring::{RatingInput, StarPolicy};
pub use state::{Category, Draggable, DropTarget, SessionMetrics, TraceSegment};
pub use trace::{TraceEvent, TraceState};
