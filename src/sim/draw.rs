//! Free drawing for the outline-drawing level
//!
//! The player draws over an apple outline; there is no per-sample
//! correctness judgment. On explicit finish, coverage is the ratio of
//! drawn stroke length to the template outline's length, clamped to 100%.
//!
//! Template outlines are authored as SVG-style path strings (absolute
//! M/L/C/Q commands). Length is a coarse anchor-to-anchor chord estimate -
//! plenty for scoring, and it treats the template and the player's
//! polyline strokes the same way.

use glam::Vec2;

/// Absolute path command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Cubic bezier; only the endpoint matters for chord length
    CurveTo { c1: Vec2, c2: Vec2, to: Vec2 },
    /// Quadratic bezier
    QuadTo { c: Vec2, to: Vec2 },
}

impl PathCmd {
    /// The command's anchor endpoint
    fn endpoint(&self) -> Vec2 {
        match *self {
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) => p,
            PathCmd::CurveTo { to, .. } | PathCmd::QuadTo { to, .. } => to,
        }
    }
}

/// Parse an absolute-command SVG path string (M/L/C/Q subset).
///
/// Malformed commands are skipped rather than failing the whole path - a
/// bad template should degrade, not break the level.
pub fn parse_path(path: &str) -> Vec<PathCmd> {
    let mut cmds = Vec::new();
    let mut chars = path.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if !matches!(ch, 'M' | 'L' | 'C' | 'Q') {
            continue;
        }
        // Slice until the next command letter
        let end = path[start + 1..]
            .find(['M', 'L', 'C', 'Q', 'Z', 'z'])
            .map(|i| start + 1 + i)
            .unwrap_or(path.len());
        let nums: Vec<f32> = path[start + 1..end]
            .split([' ', ',', '\n', '\t'])
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();

        match ch {
            'M' if nums.len() >= 2 => cmds.push(PathCmd::MoveTo(Vec2::new(nums[0], nums[1]))),
            'L' if nums.len() >= 2 => cmds.push(PathCmd::LineTo(Vec2::new(nums[0], nums[1]))),
            'Q' if nums.len() >= 4 => cmds.push(PathCmd::QuadTo {
                c: Vec2::new(nums[0], nums[1]),
                to: Vec2::new(nums[2], nums[3]),
            }),
            'C' if nums.len() >= 6 => cmds.push(PathCmd::CurveTo {
                c1: Vec2::new(nums[0], nums[1]),
                c2: Vec2::new(nums[2], nums[3]),
                to: Vec2::new(nums[4], nums[5]),
            }),
            _ => {}
        }
    }
    cmds
}

/// Anchor-chord length estimate of a command path. `MoveTo` breaks the
/// chain (pen up).
pub fn path_length(cmds: &[PathCmd]) -> f32 {
    let mut length = 0.0;
    let mut prev: Option<Vec2> = None;
    for cmd in cmds {
        let end = cmd.endpoint();
        match cmd {
            PathCmd::MoveTo(_) => {}
            _ => {
                if let Some(p) = prev {
                    length += p.distance(end);
                }
            }
        }
        prev = Some(end);
    }
    length
}

/// State for the drawing level
#[derive(Debug, Clone)]
pub struct DrawState {
    /// Completed and in-progress strokes, each a polyline in template
    /// coordinates
    strokes: Vec<Vec<Vec2>>,
    /// Length of the outline the player is asked to cover
    template_length: f32,
    drawing: bool,
}

impl DrawState {
    /// Build from a template path string
    pub fn new(template: &str) -> Self {
        Self {
            strokes: Vec::new(),
            template_length: path_length(&parse_path(template)),
            drawing: false,
        }
    }

    /// Begin a stroke at `p`
    pub fn press(&mut self, p: Vec2) {
        if self.drawing {
            return;
        }
        self.drawing = true;
        self.strokes.push(vec![p]);
    }

    /// Extend the current stroke
    pub fn sample(&mut self, p: Vec2) {
        if !self.drawing {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.push(p);
        }
    }

    /// End the current stroke
    pub fn release(&mut self) {
        self.drawing = false;
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn template_length(&self) -> f32 {
        self.template_length
    }

    pub fn has_drawn(&self) -> bool {
        self.strokes.iter().any(|s| s.len() > 1)
    }

    /// Total polyline length drawn so far
    pub fn drawn_length(&self) -> f32 {
        self.strokes
            .iter()
            .map(|s| s.windows(2).map(|w| w[0].distance(w[1])).sum::<f32>())
            .sum()
    }

    /// Coverage of the template outline, 0-100
    pub fn coverage(&self) -> f32 {
        if self.template_length <= 0.0 {
            return 0.0;
        }
        (self.drawn_length() / self.template_length).min(1.0) * 100.0
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = false;
    }
}
