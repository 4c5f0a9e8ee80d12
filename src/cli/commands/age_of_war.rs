//! Age of War command - decide the next action for one or both sides.

use std::process;

use adversary::alpha_beta_searcher::Side;
use adversary::games::age_of_war::{AgeOfWar, AgeOfWarError, Battlefield, PlayerState};
use structopt::StructOpt;

use super::util::{create_context, print_search_stats};
use super::Command;

#[derive(StructOpt)]
pub struct AgeOfWarArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(long, default_value = "maximizer", help = "The side to decide for")]
    pub side: Side,
    #[structopt(long, default_value = "100")]
    pub gold: u32,
    #[structopt(long = "enemy-gold", default_value = "100")]
    pub enemy_gold: u32,
    #[structopt(long, default_value = "1", help = "Current age, starting at 1")]
    pub age: usize,
    #[structopt(long = "enemy-age", default_value = "1")]
    pub enemy_age: usize,
    #[structopt(long, default_value = "1", help = "Rounds to play")]
    pub turns: u32,
    #[structopt(long, help = "Search root moves in parallel")]
    pub parallel: bool,
    #[structopt(long = "time-limit", help = "Search time limit in milliseconds")]
    pub time_limit_ms: Option<u64>,
}

/// Builds a player from a 1-based `age` as given on the command line.
fn player_from_flags(
    model: &AgeOfWar,
    gold: u32,
    age: usize,
) -> Result<PlayerState, AgeOfWarError> {
    age.checked_sub(1)
        .and_then(|index| model.player_in_age(gold, index).ok())
        .ok_or(AgeOfWarError::UnknownAge { age })
}

fn player_or_exit(model: &AgeOfWar, gold: u32, age: usize, flag: &str) -> PlayerState {
    match player_from_flags(model, gold, age) {
        Ok(player) => player,
        Err(error) => {
            eprintln!("invalid {}: {}", flag, error);
            process::exit(1);
        }
    }
}

impl Command for AgeOfWarArgs {
    fn execute(self) {
        let model = AgeOfWar::default();
        let own = player_or_exit(&model, self.gold, self.age, "--age");
        let enemy = player_or_exit(&model, self.enemy_gold, self.enemy_age, "--enemy-age");
        let mut battlefield = match self.side {
            Side::Maximizer => Battlefield::from_players(own, enemy),
            Side::Minimizer => Battlefield::from_players(enemy, own),
        };
        let mut context = create_context(self.depth, self.parallel, None, self.time_limit_ms);

        for turn in 1..=self.turns {
            for side in [self.side, self.side.opponent()] {
                let decision = match battlefield.decide(&model, &mut context, side) {
                    Ok(decision) => decision,
                    Err(error) => {
                        eprintln!("search failed: {}", error);
                        return;
                    }
                };
                println!(
                    "turn {}: {} chooses {} (score {})",
                    turn,
                    side,
                    decision,
                    context.last_score().unwrap_or_default()
                );
                print_search_stats(&context);

                if let Err(error) = battlefield.execute(&model, side, &decision) {
                    eprintln!("could not carry out {}: {}", decision, error);
                    return;
                }
            }
            battlefield.tick();
        }

        for side in [Side::Maximizer, Side::Minimizer] {
            let player = battlefield.player(side);
            println!(
                "{}: {} gold, {}, {} units, turret {} hp",
                side,
                player.gold,
                model.ages()[player.age].name,
                player.units.len(),
                player.turret.hp
            );
        }
    }
}
