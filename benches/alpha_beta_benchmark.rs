use adversary::alpha_beta_searcher::{
    alpha_beta_search, minimax_search, SearchContext, Side,
};
use adversary::games::age_of_war::AgeOfWar;
use adversary::games::random_tree::RandomTree;
use adversary::games::scrabble::{Scrabble, ScrabbleState};

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let tree = RandomTree::generate(7, 4..=4, 5);
    c.bench_function("alpha beta random tree depth 5", |b| {
        b.iter(|| {
            let mut context = SearchContext::new(5);
            alpha_beta_search(&mut context, &tree, &RandomTree::ROOT, Side::Maximizer).unwrap()
        })
    });
    c.bench_function("minimax random tree depth 5", |b| {
        b.iter(|| {
            let mut context = SearchContext::new(5);
            minimax_search(&mut context, &tree, &RandomTree::ROOT, Side::Maximizer).unwrap()
        })
    });

    let age_of_war = AgeOfWar::default();
    let battle = age_of_war.starting_state();
    c.bench_function("age of war opening depth 4", |b| {
        b.iter(|| {
            let mut context = SearchContext::new(4);
            alpha_beta_search(&mut context, &age_of_war, &battle, Side::Maximizer).unwrap()
        })
    });

    let scrabble = Scrabble::default();
    let opening = ScrabbleState::opening("CHATONE", "RIVAGES").unwrap();
    c.bench_function("scrabble opening depth 2", |b| {
        b.iter(|| {
            let mut context = SearchContext::new(2).with_max_branching(20);
            alpha_beta_search(&mut context, &scrabble, &opening, Side::Maximizer).unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
