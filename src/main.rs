mod cli;

use cli::commands::Command;
use cli::Adversary;
use structopt::StructOpt;

fn main() {
    env_logger::init();
    Adversary::from_args().execute();
}
