//! Skills and skillsets.
//!
//! A skill is a relative move inside the 5x5 window centred on a unit. A
//! skillset is the full 5x5 boolean grid of such moves, indexed
//! `[dx + 2][dy + 2]`. Grids are never sparse: every operation works cell by
//! cell over the whole window.

use super::position::PositionDelta;

/// Largest absolute offset on either axis.
pub const SKILL_RANGE: i32 = 2;
/// Side length of the skill window.
pub const SKILL_SPAN: usize = (SKILL_RANGE * 2 + 1) as usize;

/// A relative move a unit knows or could learn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Skill {
    delta: PositionDelta,
}

impl Skill {
    /// Creates a skill, or `None` when the offset lies outside the window.
    pub fn new(delta: PositionDelta) -> Option<Skill> {
        let range = -SKILL_RANGE..=SKILL_RANGE;
        if range.contains(&delta.dx) && range.contains(&delta.dy) {
            Some(Skill { delta })
        } else {
            None
        }
    }

    pub const fn delta(self) -> PositionDelta {
        self.delta
    }

    /// A leap jumps more than one cell along some axis.
    pub const fn is_leap(self) -> bool {
        self.delta.dx.abs() > 1 || self.delta.dy.abs() > 1
    }

    const fn cell(self) -> (usize, usize) {
        (
            (self.delta.dx + SKILL_RANGE) as usize,
            (self.delta.dy + SKILL_RANGE) as usize,
        )
    }
}

/// A 5x5 grid of known (or knowable) skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SkillSet {
    map: [[bool; SKILL_SPAN]; SKILL_SPAN],
}

impl SkillSet {
    pub const fn empty() -> SkillSet {
        SkillSet { map: [[false; SKILL_SPAN]; SKILL_SPAN] }
    }

    /// Builds a skillset from a diagram drawn facing `+y`.
    ///
    /// The top row is `dy = +2` and the left column `dx = -2`; an `x` marks a
    /// skill.
    pub const fn from_diagram(rows: [&[u8; SKILL_SPAN]; SKILL_SPAN]) -> SkillSet {
        let mut map = [[false; SKILL_SPAN]; SKILL_SPAN];
        let mut i = 0;
        while i < SKILL_SPAN {
            let mut j = 0;
            while j < SKILL_SPAN {
                if rows[i][j] == b'x' {
                    map[j][SKILL_SPAN - 1 - i] = true;
                }
                j += 1;
            }
            i += 1;
        }
        SkillSet { map }
    }

    /// Builds a skillset from a raw `[dx + 2][dy + 2]` grid.
    pub const fn from_grid(map: [[bool; SKILL_SPAN]; SKILL_SPAN]) -> SkillSet {
        SkillSet { map }
    }

    /// The raw `[dx + 2][dy + 2]` grid.
    pub const fn grid(&self) -> &[[bool; SKILL_SPAN]; SKILL_SPAN] {
        &self.map
    }

    pub fn has(&self, skill: Skill) -> bool {
        let (i, j) = skill.cell();
        self.map[i][j]
    }

    pub fn add(&mut self, skill: Skill) {
        let (i, j) = skill.cell();
        self.map[i][j] = true;
    }

    pub fn union(&mut self, other: &SkillSet) -> &mut Self {
        self.apply(other, |a, b| a || b)
    }

    /// Removes every skill present in `other`.
    pub fn subtract(&mut self, other: &SkillSet) -> &mut Self {
        self.apply(other, |a, b| a && !b)
    }

    fn apply(&mut self, other: &SkillSet, op: impl Fn(bool, bool) -> bool) -> &mut Self {
        for i in 0..SKILL_SPAN {
            for j in 0..SKILL_SPAN {
                self.map[i][j] = op(self.map[i][j], other.map[i][j]);
            }
        }
        self
    }

    /// Rotates the grid by 180 degrees, mirroring every skill through the unit.
    pub fn flip(&mut self) {
        let old = self.map;
        for i in 0..SKILL_SPAN {
            for j in 0..SKILL_SPAN {
                self.map[i][j] = old[SKILL_SPAN - 1 - i][SKILL_SPAN - 1 - j];
            }
        }
    }

    /// Returns a flipped copy.
    pub fn flipped(mut self) -> SkillSet {
        self.flip();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.map.iter().flatten().all(|known| !known)
    }

    pub fn len(&self) -> usize {
        self.map.iter().flatten().filter(|known| **known).count()
    }

    /// Every skill in the set, `dx` outer and `dy` inner.
    pub fn list_skills(&self) -> Vec<Skill> {
        let mut skills = Vec::with_capacity(self.len());
        for (i, column) in self.map.iter().enumerate() {
            for (j, known) in column.iter().enumerate() {
                if *known {
                    skills.push(Skill {
                        delta: PositionDelta::new(i as i32 - SKILL_RANGE, j as i32 - SKILL_RANGE),
                    });
                }
            }
        }
        skills
    }
}
