//! Forest adapter: bagged decision trees implementing the Classifier port.
//!
//! A small CART-style learner with no external ML dependency: each tree is
//! grown on a bootstrap sample with gini-impurity splits over a random
//! feature subset, and prediction is a majority vote across trees. All
//! randomness flows from one seeded `ChaCha20Rng`, so a fit is reproducible
//! bit-for-bit for a given (data, seed) pair.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::FEATURE_COUNT;
use crate::ports::{Classifier, FittedClassifier, TrainError};

/// Tuning knobs for the forest learner.
#[derive(Debug, Clone)]
pub struct ForestConfig {
    /// Number of bagged trees.
    pub tree_count: usize,

    /// Maximum depth a tree may reach before it must emit a leaf.
    pub max_depth: usize,

    /// Minimum samples a node needs before a split is attempted.
    pub min_split: usize,

    /// Features drawn (without replacement) per split candidate set.
    pub features_per_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 64,
            max_depth: 16,
            min_split: 2,
            // floor(sqrt(FEATURE_COUNT)) for six features
            features_per_split: 2,
        }
    }
}

impl ForestConfig {
    /// Load config overrides from environment (best-effort).
    ///
    /// Supported:
    /// - VITALSENSE_TREE_COUNT
    /// - VITALSENSE_MAX_DEPTH
    fn from_env_or_default() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("VITALSENSE_TREE_COUNT") {
            if let Ok(x) = v.trim().parse::<usize>() {
                if x > 0 {
                    cfg.tree_count = x;
                }
            }
        }

        if let Ok(v) = std::env::var("VITALSENSE_MAX_DEPTH") {
            if let Ok(x) = v.trim().parse::<usize>() {
                if x > 0 {
                    cfg.max_depth = x;
                }
            }
        }

        cfg
    }
}

/// Bagged decision-tree classifier.
#[derive(Debug, Clone)]
pub struct RandomForest {
    config: ForestConfig,
}

impl RandomForest {
    /// Create a forest with environment overrides applied.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ForestConfig::from_env_or_default())
    }

    /// Create a forest with an explicit configuration.
    #[must_use]
    pub fn with_config(config: ForestConfig) -> Self {
        Self { config }
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
enum Node {
    Leaf {
        class: usize,
    },
    /// Rows with `features[feature] <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug)]
struct Tree {
    root: Node,
}

impl Tree {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> usize {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// Fitted state: the grown trees plus the class-count needed for voting.
#[derive(Debug)]
pub struct FittedForest {
    trees: Vec<Tree>,
    class_count: usize,
}

impl FittedClassifier for FittedForest {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> usize {
        let mut votes = vec![0usize; self.class_count.max(1)];
        for tree in &self.trees {
            votes[tree.predict(features)] += 1;
        }
        argmax(&votes)
    }
}

impl Classifier for RandomForest {
    type Fitted = FittedForest;

    fn fit(
        &self,
        features: &[[f64; FEATURE_COUNT]],
        labels: &[usize],
        seed: u64,
    ) -> Result<FittedForest, TrainError> {
        let rows = features.len();
        if rows == 0 {
            return Err(TrainError::InsufficientData { rows: 0, min: 1 });
        }
        debug_assert_eq!(rows, labels.len());

        let class_count = labels.iter().copied().max().map_or(0, |m| m + 1);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);

        let grower = Grower {
            features,
            labels,
            class_count,
            config: &self.config,
        };

        let trees = (0..self.config.tree_count)
            .map(|_| {
                let sample: Vec<usize> = (0..rows).map(|_| rng.gen_range(0..rows)).collect();
                Tree {
                    root: grower.grow(&sample, 0, &mut rng),
                }
            })
            .collect();

        tracing::debug!(
            "Grew {} tree(s) over {} row(s), {} class(es)",
            self.config.tree_count,
            rows,
            class_count
        );

        Ok(FittedForest { trees, class_count })
    }
}

/// Shared context while growing one forest.
struct Grower<'a> {
    features: &'a [[f64; FEATURE_COUNT]],
    labels: &'a [usize],
    class_count: usize,
    config: &'a ForestConfig,
}

impl Grower<'_> {
    fn grow(&self, indices: &[usize], depth: usize, rng: &mut ChaCha20Rng) -> Node {
        let counts = self.class_counts(indices);
        let majority = argmax(&counts);

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        if pure || depth >= self.config.max_depth || indices.len() < self.config.min_split {
            return Node::Leaf { class: majority };
        }

        let k = self.config.features_per_split.clamp(1, FEATURE_COUNT);
        let candidates = rand::seq::index::sample(rng, FEATURE_COUNT, k);

        let Some((feature, threshold)) = self.best_split(indices, &counts, candidates.iter())
        else {
            // No candidate feature separates this node's rows.
            return Node::Leaf { class: majority };
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| self.features[i][feature] <= threshold);

        Node::Split {
            feature,
            threshold,
            left: Box::new(self.grow(&left, depth + 1, rng)),
            right: Box::new(self.grow(&right, depth + 1, rng)),
        }
    }

    /// Exhaustive threshold search over the candidate features; returns the
    /// split with the lowest weighted gini impurity, or `None` when every
    /// candidate feature is constant across the node.
    fn best_split(
        &self,
        indices: &[usize],
        parent_counts: &[usize],
        candidates: impl Iterator<Item = usize>,
    ) -> Option<(usize, f64)> {
        let total = indices.len();
        let mut best: Option<(f64, usize, f64)> = None;

        for feature in candidates {
            let mut column: Vec<(f64, usize)> = indices
                .iter()
                .map(|&i| (self.features[i][feature], self.labels[i]))
                .collect();
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_counts = vec![0usize; self.class_count];
            let mut right_counts = parent_counts.to_vec();

            for w in 0..total - 1 {
                let (value, label) = column[w];
                left_counts[label] += 1;
                right_counts[label] -= 1;

                // Only cut between distinct values.
                if value == column[w + 1].0 {
                    continue;
                }

                let left_len = w + 1;
                let right_len = total - left_len;
                let score = (left_len as f64 * gini(&left_counts, left_len)
                    + right_len as f64 * gini(&right_counts, right_len))
                    / total as f64;

                let threshold = (value + column[w + 1].0) / 2.0;
                if best.map_or(true, |(s, _, _)| score < s) {
                    best = Some((score, feature, threshold));
                }
            }
        }

        best.map(|(_, feature, threshold)| (feature, threshold))
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.class_count];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Index of the maximum; the lowest index wins ties, keeping votes
/// deterministic.
fn argmax(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[best] {
            best = i;
        }
    }
    best
}
