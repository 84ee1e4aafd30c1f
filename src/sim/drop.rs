//! Proximity-radius drop resolution for the matching-style levels
//!
//! On release, targets are scanned in list order and the first unsatisfied
//! one within the drop radius is the candidate - deliberately not
//! nearest-of-several, matching how the game has always played.

use glam::Vec2;

use super::state::{Draggable, DropTarget};

/// What happened when a dragged entity was released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Locked onto its matching target
    Resolved,
    /// Landed on a target of the wrong category; returned to rest
    Mismatch,
    /// No target in radius; returned to rest, no mistake charged
    NoTarget,
}

/// In-flight drag bookkeeping
#[derive(Debug, Clone, Copy)]
struct Drag {
    entity: usize,
    /// Pointer-to-entity offset captured at press, so the item does not
    /// jump under the finger
    offset: Vec2,
}

/// State for a matching-style level (sorting, shadow matching)
#[derive(Debug, Clone)]
pub struct DropGame {
    pub entities: Vec<Draggable>,
    pub targets: Vec<DropTarget>,
    /// Canonical rest position per entity, index-aligned with `entities`.
    /// Refreshed by the layout resolver, never cached across resizes.
    pub rests: Vec<Vec2>,
    /// Drop radius for the current device class
    pub radius: f32,
    drag: Option<Drag>,
}

impl DropGame {
    pub fn new(
        entities: Vec<Draggable>,
        targets: Vec<DropTarget>,
        rests: Vec<Vec2>,
        radius: f32,
    ) -> Self {
        debug_assert_eq!(entities.len(), rests.len());
        Self {
            entities,
            targets,
            rests,
            radius,
            drag: None,
        }
    }

    /// Begin a drag if the point lands on an unresolved entity and no other
    /// drag is active. Returns whether a drag started.
    ///
    /// `grab_radius` is how close the press must be to an entity's anchor.
    pub fn press(&mut self, p: Vec2, grab_radius: f32) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let hit = self
            .entities
            .iter()
            .position(|e| !e.resolved && e.pos.distance(p) <= grab_radius);
        let Some(idx) = hit else {
            return false;
        };
        self.entities[idx].dragging = true;
        self.drag = Some(Drag {
            entity: idx,
            offset: p - self.entities[idx].pos,
        });
        true
    }

    /// Track the pointer. The dragged entity follows raw pointer samples
    /// regardless of any geometry recomputation happening mid-drag.
    pub fn track(&mut self, p: Vec2) {
        if let Some(drag) = self.drag {
            self.entities[drag.entity].pos = p - drag.offset;
        }
    }

    /// Release the active drag and resolve it against the current targets
    pub fn release(&mut self) -> Option<DropOutcome> {
        let drag = self.drag.take()?;
        let idx = drag.entity;
        let pos = self.entities[idx].pos;
        let category = self.entities[idx].category;
        self.entities[idx].dragging = false;

        // First target in list order within radius wins
        for t in 0..self.targets.len() {
            if self.targets[t].is_satisfied() {
                continue;
            }
            if pos.distance(self.targets[t].pos) < self.radius {
                if self.targets[t].category == category {
                    let target_pos = self.targets[t].pos;
                    let id = self.entities[idx].id;
                    self.entities[idx].pos = target_pos;
                    self.entities[idx].resolved = true;
                    self.targets[t].satisfied.push(id);
                    return Some(DropOutcome::Resolved);
                }
                self.entities[idx].pos = self.rests[idx];
                return Some(DropOutcome::Mismatch);
            }
        }

        self.entities[idx].pos = self.rests[idx];
        Some(DropOutcome::NoTarget)
    }

    /// Apply freshly resolved geometry: new rest anchors and target
    /// positions. Resolved entities snap to their target's new position;
    /// unresolved idle entities snap to their new rest; an in-flight drag is
    /// left alone until release.
    pub fn set_anchors(&mut self, rests: Vec<Vec2>, target_positions: &[Vec2]) {
        debug_assert_eq!(rests.len(), self.entities.len());
        debug_assert_eq!(target_positions.len(), self.targets.len());
        for (t, pos) in self.targets.iter_mut().zip(target_positions) {
            t.pos = *pos;
        }
        self.rests = rests;
        let dragging = self.drag.map(|d| d.entity);
        for (i, e) in self.entities.iter_mut().enumerate() {
            if Some(i) == dragging {
                continue;
            }
            if e.resolved {
                if let Some(t) = self.targets.iter().find(|t| t.satisfied.contains(&e.id)) {
                    e.pos = t.pos;
                }
            } else {
                e.pos = self.rests[i];
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Completion predicate: every entity locked onto its target
    pub fn all_resolved(&self) -> bool {
        !self.entities.is_empty() && self.entities.iter().all(|e| e.resolved)
    }
}
