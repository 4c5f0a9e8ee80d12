//! An explicit game tree with random scores.
//!
//! States are node indices and moves are the index of the child they lead to, so a tree
//! can be searched by any algorithm and the results compared exactly.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::alpha_beta_searcher::{GameModel, Score, Side};

/// Static scores are whole numbers in this range so equal scores are common.
const SCORE_RANGE: RangeInclusive<i32> = -100..=100;

#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub score: Score,
    pub children: Vec<usize>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RandomTreeError {
    #[error("node {child} is not a child of node {node}")]
    NotAChild { node: usize, child: usize },
}

#[derive(Clone, Debug)]
pub struct RandomTree {
    nodes: Vec<TreeNode>,
}

impl RandomTree {
    pub const ROOT: usize = 0;

    /// Builds a tree `depth` plies deep where every interior node has a number of children
    /// drawn from `branching`. Every node, interior or not, gets a random score.
    pub fn generate(seed: u64, branching: RangeInclusive<usize>, depth: u8) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut nodes = vec![TreeNode {
            score: rng.gen_range(SCORE_RANGE) as Score,
            children: Vec::new(),
        }];

        let mut frontier = vec![Self::ROOT];
        for _ in 0..depth {
            let mut next_frontier = Vec::new();
            for parent in frontier {
                let child_count = rng.gen_range(branching.clone());
                for _ in 0..child_count {
                    let child = nodes.len();
                    nodes.push(TreeNode {
                        score: rng.gen_range(SCORE_RANGE) as Score,
                        children: Vec::new(),
                    });
                    nodes[parent].children.push(child);
                    next_frontier.push(child);
                }
            }
            frontier = next_frontier;
        }

        Self { nodes }
    }

    /// Builds a tree from explicit nodes. Node 0 is the root.
    pub fn from_nodes(nodes: Vec<TreeNode>) -> Self {
        assert!(!nodes.is_empty(), "a tree needs a root");
        Self { nodes }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes without children.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.children.is_empty())
            .count()
    }
}

impl GameModel for RandomTree {
    type State = usize;
    type Move = usize;
    type Error = RandomTreeError;

    fn generate_moves(&self, state: &usize, _side: Side) -> Vec<usize> {
        self.nodes
            .get(*state)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn apply_move(&self, state: &usize, game_move: &usize, _side: Side) -> Result<usize, Self::Error> {
        let is_child = self
            .nodes
            .get(*state)
            .map_or(false, |node| node.children.contains(game_move));
        if !is_child {
            return Err(RandomTreeError::NotAChild {
                node: *state,
                child: *game_move,
            });
        }
        Ok(*game_move)
    }

    fn is_terminal(&self, state: &usize) -> bool {
        self.nodes
            .get(*state)
            .map_or(true, |node| node.children.is_empty())
    }

    fn evaluate(&self, state: &usize) -> Score {
        self.nodes.get(*state).map_or(0.0, |node| node.score)
    }
}
