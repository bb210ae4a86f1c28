//! Unit kinds and units.
//!
//! Every kind carries two static skill tables: the inborn set a freshly placed
//! unit knows and the perfect set it can eventually learn. Basic kinds (except
//! the King and the Wagon) also name a promotion pair; once a basic unit has
//! learned its whole perfect set it may be promoted into whichever of the two
//! advanced kinds claims the skill it is taught next.

use super::position::Player;
use super::skill::{Skill, SkillSet};

/// The closed set of unit variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    King,
    Rider,
    Soldier,
    Archer,
    Barbarian,
    Wagon,
    Lancer,
    Knight,
    Swordsman,
    Spearman,
    Warrior,
}

/// All kinds, basic tier first.
pub const ALL_UNIT_KINDS: [UnitKind; 11] = [
    UnitKind::King,
    UnitKind::Rider,
    UnitKind::Soldier,
    UnitKind::Archer,
    UnitKind::Barbarian,
    UnitKind::Wagon,
    UnitKind::Lancer,
    UnitKind::Knight,
    UnitKind::Swordsman,
    UnitKind::Spearman,
    UnitKind::Warrior,
];

/// Kinds that can be recruited by a non-zero skill, in lookup order.
pub const RECRUITABLE_KINDS: [UnitKind; 4] = [
    UnitKind::Rider,
    UnitKind::Soldier,
    UnitKind::Barbarian,
    UnitKind::Archer,
];

const KING_PERFECT: SkillSet = SkillSet::from_diagram([
    b"-----",
    b"--x--",
    b"-x-x-",
    b"--x--",
    b"-----",
]);

const RIDER_PERFECT: SkillSet = SkillSet::from_diagram([
    b"-x-x-",
    b"x---x",
    b"-----",
    b"x---x",
    b"-x-x-",
]);

const LANCER_PERFECT: SkillSet = SkillSet::from_diagram([
    b"-xxx-",
    b"x---x",
    b"x---x",
    b"x---x",
    b"-xxx-",
]);

const KNIGHT_PERFECT: SkillSet = SkillSet::from_diagram([
    b"-x-x-",
    b"xx-xx",
    b"-----",
    b"xx-xx",
    b"-x-x-",
]);

const SOLDIER_PERFECT: SkillSet = SkillSet::from_diagram([
    b"-----",
    b"--x--",
    b"-x-x-",
    b"--x--",
    b"-----",
]);

const SWORDSMAN_PERFECT: SkillSet = SkillSet::from_diagram([
    b"-----",
    b"-xxx-",
    b"-x-x-",
    b"-xxx-",
    b"-----",
]);

const SPEARMAN_PERFECT: SkillSet = SkillSet::from_diagram([
    b"--x--",
    b"--x--",
    b"xx-xx",
    b"--x--",
    b"--x--",
]);

const ARCHER_PERFECT: SkillSet = SkillSet::from_diagram([
    b"--x--",
    b"-----",
    b"x---x",
    b"-----",
    b"--x--",
]);

const BARBARIAN_PERFECT: SkillSet = SkillSet::from_diagram([
    b"-----",
    b"-x-x-",
    b"-----",
    b"-x-x-",
    b"-----",
]);

const WARRIOR_PERFECT: SkillSet = SkillSet::from_diagram([
    b"--x--",
    b"-x-x-",
    b"x---x",
    b"-x-x-",
    b"--x--",
]);

const WAGON_PERFECT: SkillSet = SkillSet::from_diagram([
    b"-----",
    b"--x--",
    b"-xxx-",
    b"--x--",
    b"-----",
]);

const RIDER_INBORN: SkillSet = SkillSet::from_diagram([
    b"-x-x-",
    b"-----",
    b"-----",
    b"-----",
    b"-----",
]);

const SOLDIER_INBORN: SkillSet = SkillSet::from_diagram([
    b"-----",
    b"--x--",
    b"-----",
    b"--x--",
    b"-----",
]);

const ARCHER_INBORN: SkillSet = SkillSet::from_diagram([
    b"--x--",
    b"-----",
    b"-----",
    b"-----",
    b"--x--",
]);

const BARBARIAN_INBORN: SkillSet = SkillSet::from_diagram([
    b"-----",
    b"-x-x-",
    b"-----",
    b"-----",
    b"-----",
]);

/// A wagon starts out only able to hold its own cell.
const WAGON_INBORN: SkillSet = SkillSet::from_diagram([
    b"-----",
    b"-----",
    b"--x--",
    b"-----",
    b"-----",
]);

impl UnitKind {
    /// Short tag used in snapshots and logs.
    pub const fn tag(self) -> &'static str {
        match self {
            UnitKind::King => "KING",
            UnitKind::Rider => "RDR",
            UnitKind::Soldier => "SLD",
            UnitKind::Archer => "ACH",
            UnitKind::Barbarian => "BAR",
            UnitKind::Wagon => "WAG",
            UnitKind::Lancer => "LAN",
            UnitKind::Knight => "KNT",
            UnitKind::Swordsman => "SWD",
            UnitKind::Spearman => "SPR",
            UnitKind::Warrior => "WAR",
        }
    }

    /// Parses a tag produced by [`UnitKind::tag`].
    pub fn from_tag(tag: &str) -> Option<UnitKind> {
        ALL_UNIT_KINDS.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Duel strength; higher wins, equal destroys both.
    pub const fn level(self) -> u8 {
        match self {
            UnitKind::Wagon => 0,
            UnitKind::King
            | UnitKind::Soldier
            | UnitKind::Archer
            | UnitKind::Barbarian => 1,
            UnitKind::Rider
            | UnitKind::Swordsman
            | UnitKind::Spearman
            | UnitKind::Warrior => 2,
            UnitKind::Lancer | UnitKind::Knight => 3,
        }
    }

    /// Supply awarded to the opponent when a unit of this kind falls.
    pub const fn trophy(self) -> u32 {
        match self {
            UnitKind::King => 0,
            UnitKind::Rider | UnitKind::Lancer | UnitKind::Knight => 8,
            UnitKind::Soldier | UnitKind::Spearman => 6,
            UnitKind::Archer | UnitKind::Swordsman => 5,
            UnitKind::Barbarian | UnitKind::Warrior => 4,
            UnitKind::Wagon => 20,
        }
    }

    /// Every skill a unit of this kind can ever learn.
    pub const fn perfect_skillset(self) -> SkillSet {
        match self {
            UnitKind::King => KING_PERFECT,
            UnitKind::Rider => RIDER_PERFECT,
            UnitKind::Soldier => SOLDIER_PERFECT,
            UnitKind::Archer => ARCHER_PERFECT,
            UnitKind::Barbarian => BARBARIAN_PERFECT,
            UnitKind::Wagon => WAGON_PERFECT,
            UnitKind::Lancer => LANCER_PERFECT,
            UnitKind::Knight => KNIGHT_PERFECT,
            UnitKind::Swordsman => SWORDSMAN_PERFECT,
            UnitKind::Spearman => SPEARMAN_PERFECT,
            UnitKind::Warrior => WARRIOR_PERFECT,
        }
    }

    /// Skills known by a unit placed at the start of a game, facing `+y`.
    pub const fn inborn_skillset(self) -> SkillSet {
        match self {
            UnitKind::King => KING_PERFECT,
            UnitKind::Rider => RIDER_INBORN,
            UnitKind::Soldier => SOLDIER_INBORN,
            UnitKind::Archer => ARCHER_INBORN,
            UnitKind::Barbarian => BARBARIAN_INBORN,
            UnitKind::Wagon => WAGON_INBORN,
            _ => SkillSet::empty(),
        }
    }

    /// The two advanced kinds this kind may become, if any.
    pub const fn promotions(self) -> Option<[UnitKind; 2]> {
        match self {
            UnitKind::Rider => Some([UnitKind::Lancer, UnitKind::Knight]),
            UnitKind::Soldier => Some([UnitKind::Swordsman, UnitKind::Spearman]),
            UnitKind::Archer => Some([UnitKind::Warrior, UnitKind::Spearman]),
            UnitKind::Barbarian => Some([UnitKind::Warrior, UnitKind::Swordsman]),
            _ => None,
        }
    }

    pub const fn is_advanced(self) -> bool {
        self.promotions().is_none()
    }

    /// The first kind in `kinds` whose perfect skillset contains `skill`.
    pub fn claiming(kinds: &[UnitKind], skill: Skill) -> Option<UnitKind> {
        kinds.iter().copied().find(|kind| kind.perfect_skillset().has(skill))
    }

    /// The kind recruited by offering `skill` on a home row.
    pub fn recruited_by(skill: Skill) -> Option<UnitKind> {
        if skill.delta().is_zero() {
            return Some(UnitKind::Wagon);
        }
        UnitKind::claiming(&RECRUITABLE_KINDS, skill)
    }
}

/// A unit on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    pub kind: UnitKind,
    pub owner: Player,
    pub skillset: SkillSet,
}

impl Unit {
    /// A unit knowing its inborn skills, oriented for its owner.
    ///
    /// Player two faces `-y`, so its inborn set is flipped.
    pub fn new(kind: UnitKind, owner: Player) -> Unit {
        let mut skillset = kind.inborn_skillset();
        if owner == Player::Two {
            skillset.flip();
        }
        Unit { kind, owner, skillset }
    }

    /// A unit with an explicit set of learned skills.
    pub const fn with_skillset(kind: UnitKind, owner: Player, skillset: SkillSet) -> Unit {
        Unit { kind, owner, skillset }
    }

    /// A unit that already knows its whole perfect set.
    pub const fn perfect(kind: UnitKind, owner: Player) -> Unit {
        Unit { kind, owner, skillset: kind.perfect_skillset() }
    }

    pub const fn level(&self) -> u8 {
        self.kind.level()
    }

    pub const fn perfect_skillset(&self) -> SkillSet {
        self.kind.perfect_skillset()
    }

    /// Learns `skill` if the kind allows it and it is not yet known.
    ///
    /// Returns false, leaving the unit untouched, when there is nothing to
    /// endow.
    pub fn endow(&mut self, skill: Skill) -> bool {
        if self.skillset.has(skill) || !self.perfect_skillset().has(skill) {
            return false;
        }
        self.skillset.add(skill);
        true
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skillset.has(skill)
    }

    pub fn is_perfect(&self) -> bool {
        self.skillset == self.perfect_skillset()
    }

    pub fn is_promotion_ready(&self) -> bool {
        !self.kind.is_advanced() && self.is_perfect()
    }

    /// Everything this unit could know: its perfect set, plus both promotion
    /// targets' sets once it is ready to promote.
    pub fn ultimate_skillset(&self) -> SkillSet {
        let mut ultimate = self.perfect_skillset();
        if self.is_promotion_ready() {
            if let Some(targets) = self.kind.promotions() {
                for target in targets {
                    ultimate.union(&target.perfect_skillset());
                }
            }
        }
        ultimate
    }

    /// Skills this unit could still learn.
    pub fn potential_skillset(&self) -> SkillSet {
        let mut potential = self.ultimate_skillset();
        potential.subtract(&self.skillset);
        potential
    }

    /// Promotes into whichever target claims `skill`, keeping learned skills.
    ///
    /// Returns `None` if the unit is not ready or neither target claims it.
    pub fn get_promoted(&self, skill: Skill) -> Option<Unit> {
        if !self.is_promotion_ready() {
            return None;
        }
        let target = UnitKind::claiming(&self.kind.promotions()?, skill)?;
        let mut promoted = Unit::with_skillset(target, self.owner, self.skillset);
        promoted.endow(skill);
        Some(promoted)
    }

    /// Recruits the kind claimed by `skill`, knowing only that skill.
    pub fn create_from_skill(owner: Player, skill: Skill) -> Option<Unit> {
        let kind = UnitKind::recruited_by(skill)?;
        let mut created = Unit::with_skillset(kind, owner, SkillSet::empty());
        created.endow(skill);
        Some(created)
    }

    /// The survivor of a duel, or `None` on equal levels.
    pub fn duel<'a>(&'a self, other: &'a Unit) -> Option<&'a Unit> {
        match self.level().cmp(&other.level()) {
            std::cmp::Ordering::Greater => Some(self),
            std::cmp::Ordering::Less => Some(other),
            std::cmp::Ordering::Equal => None,
        }
    }
}
