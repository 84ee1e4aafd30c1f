//! Star-rating policy
//!
//! A pure, total function from frozen session metrics to 1-3 stars. Every
//! level tunes its own thresholds (intentional difficulty curve, not an
//! inconsistency), but the shape is uniform: tier 3 needs the tightest
//! bounds, tier 2 relaxes them, tier 1 is the fallback.

/// Snapshot of a finished session, as consumed by the policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingInput {
    pub elapsed_ms: f64,
    pub mistakes: u32,
    /// Tracing/drawing accuracy in 0-100, when the level measures one
    pub accuracy: Option<f32>,
}

/// Per-level star thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StarPolicy {
    /// Matching levels: judged on mistakes and time
    Mistakes {
        three_max_mistakes: u32,
        three_max_ms: f64,
        two_max_mistakes: u32,
        two_max_ms: f64,
    },
    /// Tracing: judged on average accuracy, time, and a clean run
    TraceAccuracy {
        three_min_accuracy: f32,
        three_max_ms: f64,
        two_min_accuracy: f32,
        two_fallback_max_ms: f64,
    },
    /// Drawing: judged on outline coverage inside a target time window
    Coverage {
        three_min_coverage: f32,
        three_window_ms: (f64, f64),
        two_min_coverage: f32,
        two_max_ms: f64,
    },
    /// Coloring has no failure mode; everyone gets the same stars
    Fixed(u8),
}

impl StarPolicy {
    /// Rate a finished session. Deterministic and side-effect free.
    pub fn rate(&self, input: RatingInput) -> u8 {
        let t = input.elapsed_ms;
        let acc = input.accuracy.unwrap_or(0.0);
        match *self {
            StarPolicy::Mistakes {
                three_max_mistakes,
                three_max_ms,
                two_max_mistakes,
                two_max_ms,
            } => {
                if input.mistakes <= three_max_mistakes && t <= three_max_ms {
                    3
                } else if input.mistakes <= two_max_mistakes && t <= two_max_ms {
                    2
                } else {
                    1
                }
            }
            StarPolicy::TraceAccuracy {
                three_min_accuracy,
                three_max_ms,
                two_min_accuracy,
                two_fallback_max_ms,
            } => {
                if acc >= three_min_accuracy && t <= three_max_ms && input.mistakes == 0 {
                    3
                } else if (acc >= two_min_accuracy && acc < three_min_accuracy)
                    || t <= two_fallback_max_ms
                {
                    2
                } else {
                    1
                }
            }
            StarPolicy::Coverage {
                three_min_coverage,
                three_window_ms,
                two_min_coverage,
                two_max_ms,
            } => {
                if acc >= three_min_coverage && t >= three_window_ms.0 && t <= three_window_ms.1 {
                    3
                } else if acc >= two_min_coverage && t <= two_max_ms {
                    2
                } else {
                    1
                }
            }
            StarPolicy::Fixed(stars) => stars.clamp(1, 3),
        }
    }
}
