//! Age of War: a lane-defense strategy game.
//!
//! Each side spends gold on units of its current age or on advancing to the next age, which
//! also rebuilds its turret. The maximizer's base sits on the right end of the field and the
//! minimizer's on the left; the game ends when a turret falls.

use std::fmt;
use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use smallvec::{smallvec, SmallVec};
use thiserror::Error;

use crate::alpha_beta_searcher::{
    alpha_beta_search, GameModel, Score, SearchContext, SearchError, Side, Snapshot, ALL_SIDES,
};
use crate::evaluate::ScoreCard;

pub const FIELD_WIDTH: f64 = 800.0;
pub const STARTING_GOLD: u32 = 100;
pub const GOLD_PER_TICK: u32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct UnitSpec {
    pub name: &'static str,
    pub cost: u32,
    pub hp: u32,
    pub damage: u32,
    pub range: u32,
    pub speed: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AgeSpec {
    pub name: &'static str,
    pub units: SmallVec<[UnitSpec; 3]>,
    /// Gold needed to advance into this age.
    pub cost: u32,
    pub turret_hp: u32,
    pub turret_damage: u32,
}

fn unit(
    name: &'static str,
    cost: u32,
    hp: u32,
    damage: u32,
    range: u32,
    speed: f64,
) -> UnitSpec {
    UnitSpec {
        name,
        cost,
        hp,
        damage,
        range,
        speed,
    }
}

pub static STANDARD_AGES: Lazy<Vec<AgeSpec>> = Lazy::new(|| {
    vec![
        AgeSpec {
            name: "Stone Age",
            units: smallvec![
                unit("Clubman", 15, 50, 10, 1, 2.0),
                unit("Slinger", 30, 40, 8, 4, 1.5),
                unit("Dino Rider", 100, 200, 30, 1, 1.0),
            ],
            cost: 0,
            turret_hp: 200,
            turret_damage: 5,
        },
        AgeSpec {
            name: "Castle Age",
            units: smallvec![
                unit("Swordsman", 25, 80, 15, 1, 2.0),
                unit("Archer", 40, 60, 12, 5, 1.5),
                unit("Knight", 150, 300, 40, 1, 1.0),
            ],
            cost: 500,
            turret_hp: 350,
            turret_damage: 8,
        },
        AgeSpec {
            name: "Renaissance",
            units: smallvec![
                unit("Pikeman", 35, 100, 20, 2, 2.0),
                unit("Musketeer", 50, 80, 18, 6, 1.5),
                unit("Cannon", 200, 400, 50, 7, 0.8),
            ],
            cost: 1500,
            turret_hp: 500,
            turret_damage: 12,
        },
        AgeSpec {
            name: "Modern Age",
            units: smallvec![
                unit("Soldier", 50, 120, 25, 1, 2.5),
                unit("Sniper", 70, 100, 30, 8, 1.5),
                unit("Tank", 300, 600, 70, 6, 1.0),
            ],
            cost: 3000,
            turret_hp: 700,
            turret_damage: 15,
        },
        AgeSpec {
            name: "Future Age",
            units: smallvec![
                unit("Mech", 80, 150, 35, 2, 2.5),
                unit("Laser", 100, 120, 40, 9, 1.5),
                unit("Robot", 500, 1000, 100, 5, 1.2),
            ],
            cost: 5000,
            turret_hp: 1000,
            turret_damage: 20,
        },
    ]
});

#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    pub name: &'static str,
    pub hp: i32,
    pub damage: u32,
    pub range: u32,
    pub speed: f64,
    pub x: f64,
}

impl Unit {
    fn spawn(spec: &UnitSpec, side: Side) -> Self {
        Self {
            name: spec.name,
            hp: spec.hp as i32,
            damage: spec.damage,
            range: spec.range,
            speed: spec.speed,
            x: spawn_x(side),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Distance covered from the owner's base toward the enemy base.
    pub fn advancement(&self, side: Side) -> f64 {
        match side {
            Side::Maximizer => FIELD_WIDTH - self.x,
            Side::Minimizer => self.x,
        }
    }
}

fn spawn_x(side: Side) -> f64 {
    match side {
        Side::Maximizer => 750.0,
        Side::Minimizer => 50.0,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Turret {
    pub hp: i32,
    pub max_hp: u32,
    pub damage: u32,
}

impl Turret {
    fn for_age(age: &AgeSpec) -> Self {
        Self {
            hp: age.turret_hp as i32,
            max_hp: age.turret_hp,
            damage: age.turret_damage,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// One side's resources and entities.
///
/// Units sit behind an `Arc` so sibling search states share the army of whichever side did
/// not buy anything.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub gold: u32,
    /// Index into the age table.
    pub age: usize,
    pub units: Arc<Vec<Unit>>,
    pub turret: Turret,
}

impl PlayerState {
    /// Copies the units into a fresh allocation not shared with anything else.
    fn detached(&self) -> Self {
        Self {
            units: Arc::new(self.units.as_ref().clone()),
            ..self.clone()
        }
    }

    fn living_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.is_alive())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AgeOfWarState {
    players: [PlayerState; 2],
}

impl AgeOfWarState {
    pub fn new(maximizer: PlayerState, minimizer: PlayerState) -> Self {
        Self {
            players: [maximizer, minimizer],
        }
    }

    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut PlayerState {
        &mut self.players[side.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgeOfWarMove {
    Wait,
    BuyUnit(usize),
    UpgradeAge,
}

impl fmt::Display for AgeOfWarMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeOfWarMove::Wait => write!(f, "wait"),
            AgeOfWarMove::BuyUnit(index) => write!(f, "buy unit {}", index),
            AgeOfWarMove::UpgradeAge => write!(f, "upgrade age"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgeOfWarError {
    #[error("not enough gold: {needed} needed, {available} available")]
    InsufficientGold { needed: u32, available: u32 },
    #[error("the current age has no unit {index}")]
    UnknownUnit { index: usize },
    #[error("already in the last age")]
    MaxAgeReached,
    #[error("there is no age {age}")]
    UnknownAge { age: usize },
}

/// Weights of the static evaluation. Every term is counted for the maximizer and against the
/// minimizer.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationWeights {
    pub turret_hp: Score,
    pub unit_hp: Score,
    pub unit_damage: Score,
    /// Flat value of every living unit.
    pub per_unit: Score,
    pub advancement: Score,
    pub gold: Score,
    pub age: Score,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            turret_hp: 2.0,
            unit_hp: 1.0,
            unit_damage: 2.0,
            per_unit: 0.0,
            advancement: 0.1,
            gold: 0.5,
            age: 200.0,
        }
    }
}

impl EvaluationWeights {
    /// Counts living units only, `value` apiece.
    pub fn unit_count(value: Score) -> Self {
        Self {
            turret_hp: 0.0,
            unit_hp: 0.0,
            unit_damage: 0.0,
            per_unit: value,
            advancement: 0.0,
            gold: 0.0,
            age: 0.0,
        }
    }
}

/// Rules and evaluation for Age of War.
#[derive(Clone, Debug)]
pub struct AgeOfWar {
    ages: Vec<AgeSpec>,
    weights: EvaluationWeights,
}

impl Default for AgeOfWar {
    fn default() -> Self {
        Self::with_ages(STANDARD_AGES.clone())
    }
}

impl AgeOfWar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom age table. The table must contain at least one age.
    pub fn with_ages(ages: Vec<AgeSpec>) -> Self {
        assert!(!ages.is_empty(), "an age table needs at least one age");
        Self {
            ages,
            weights: EvaluationWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: EvaluationWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn ages(&self) -> &[AgeSpec] {
        &self.ages
    }

    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }

    pub fn starting_player(&self, gold: u32) -> PlayerState {
        PlayerState {
            gold,
            age: 0,
            units: Arc::new(Vec::new()),
            turret: Turret::for_age(&self.ages[0]),
        }
    }

    /// A player without units that has already reached `age` (an index into the age table),
    /// with that age's turret at full health.
    pub fn player_in_age(&self, gold: u32, age: usize) -> Result<PlayerState, AgeOfWarError> {
        let spec = self.ages.get(age).ok_or(AgeOfWarError::UnknownAge { age })?;
        Ok(PlayerState {
            age,
            turret: Turret::for_age(spec),
            ..self.starting_player(gold)
        })
    }

    pub fn starting_state(&self) -> AgeOfWarState {
        AgeOfWarState::new(
            self.starting_player(STARTING_GOLD),
            self.starting_player(STARTING_GOLD),
        )
    }

    fn age(&self, player: &PlayerState) -> &AgeSpec {
        &self.ages[player.age.min(self.ages.len() - 1)]
    }

    /// Performs `game_move` for one side, validating affordability first.
    fn perform(
        &self,
        player: &mut PlayerState,
        game_move: &AgeOfWarMove,
        side: Side,
    ) -> Result<(), AgeOfWarError> {
        match game_move {
            AgeOfWarMove::Wait => {}
            AgeOfWarMove::BuyUnit(index) => {
                let spec = self
                    .age(player)
                    .units
                    .get(*index)
                    .ok_or(AgeOfWarError::UnknownUnit { index: *index })?;
                spend(player, spec.cost)?;
                Arc::make_mut(&mut player.units).push(Unit::spawn(spec, side));
            }
            AgeOfWarMove::UpgradeAge => {
                let next = self
                    .ages
                    .get(player.age + 1)
                    .ok_or(AgeOfWarError::MaxAgeReached)?;
                spend(player, next.cost)?;
                player.age += 1;
                player.turret = Turret::for_age(next);
            }
        }
        Ok(())
    }
}

fn spend(player: &mut PlayerState, cost: u32) -> Result<(), AgeOfWarError> {
    if player.gold < cost {
        return Err(AgeOfWarError::InsufficientGold {
            needed: cost,
            available: player.gold,
        });
    }
    player.gold -= cost;
    Ok(())
}

impl GameModel for AgeOfWar {
    type State = AgeOfWarState;
    type Move = AgeOfWarMove;
    type Error = AgeOfWarError;

    fn generate_moves(&self, state: &AgeOfWarState, side: Side) -> Vec<AgeOfWarMove> {
        let player = state.player(side);
        let mut moves: Vec<AgeOfWarMove> = self
            .age(player)
            .units
            .iter()
            .enumerate()
            .filter(|(_, spec)| player.gold >= spec.cost)
            .map(|(index, _)| AgeOfWarMove::BuyUnit(index))
            .collect();

        if let Some(next) = self.ages.get(player.age + 1) {
            if player.gold >= next.cost {
                moves.push(AgeOfWarMove::UpgradeAge);
            }
        }

        moves.push(AgeOfWarMove::Wait);
        moves
    }

    fn apply_move(
        &self,
        state: &AgeOfWarState,
        game_move: &AgeOfWarMove,
        side: Side,
    ) -> Result<AgeOfWarState, AgeOfWarError> {
        let mut next = state.clone();
        self.perform(next.player_mut(side), game_move, side)?;
        Ok(next)
    }

    fn is_terminal(&self, state: &AgeOfWarState) -> bool {
        state
            .players
            .iter()
            .any(|player| !player.turret.is_alive())
    }

    fn evaluate(&self, state: &AgeOfWarState) -> Score {
        let weights = &self.weights;
        let mut card = ScoreCard::new();

        for side in ALL_SIDES {
            let player = state.player(side);

            if player.turret.is_alive() {
                card.add_for(side, weights.turret_hp, player.turret.hp as Score);
            }

            for unit in player.living_units() {
                card.add_for(side, weights.unit_hp, unit.hp as Score)
                    .add_for(side, weights.unit_damage, unit.damage as Score)
                    .add_for(side, weights.per_unit, 1.0)
                    .add_for(side, weights.advancement, unit.advancement(side));
            }

            card.add_for(side, weights.gold, player.gold as Score)
                .add_for(side, weights.age, player.age as Score);
        }

        card.total()
    }
}

/// The live game a host drives from its update loop.
#[derive(Clone, Debug)]
pub struct Battlefield {
    players: [PlayerState; 2],
}

impl Battlefield {
    pub fn new(model: &AgeOfWar, gold: u32) -> Self {
        Self {
            players: [model.starting_player(gold), model.starting_player(gold)],
        }
    }

    pub fn from_players(maximizer: PlayerState, minimizer: PlayerState) -> Self {
        Self {
            players: [maximizer, minimizer],
        }
    }

    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut PlayerState {
        &mut self.players[side.index()]
    }

    /// Grants both sides their income.
    pub fn tick(&mut self) {
        for player in self.players.iter_mut() {
            player.gold += GOLD_PER_TICK;
        }
    }

    /// Carries out a decided move: spends the gold and fields the unit or the new turret.
    pub fn execute(
        &mut self,
        model: &AgeOfWar,
        side: Side,
        game_move: &AgeOfWarMove,
    ) -> Result<(), AgeOfWarError> {
        model.perform(&mut self.players[side.index()], game_move, side)
    }

    /// Searches a snapshot of the current battle for `side`'s move.
    ///
    /// Falls back to waiting when the search has nothing to choose from.
    pub fn decide(
        &self,
        model: &AgeOfWar,
        context: &mut SearchContext,
        side: Side,
    ) -> Result<AgeOfWarMove, SearchError> {
        let state = self.snapshot();
        let result = alpha_beta_search(context, model, &state, side)?;
        debug!(
            "{} decided {:?} (score {}, {} positions)",
            side,
            result.best_move,
            result.score,
            context.searched_position_count()
        );
        Ok(result.best_move_or(AgeOfWarMove::Wait))
    }
}

impl Snapshot for Battlefield {
    type State = AgeOfWarState;

    fn snapshot(&self) -> AgeOfWarState {
        AgeOfWarState::new(
            self.players[Side::Maximizer.index()].detached(),
            self.players[Side::Minimizer.index()].detached(),
        )
    }
}
