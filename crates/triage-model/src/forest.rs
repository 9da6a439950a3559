//! Random Forest inference over a serialized tree ensemble.
//!
//! Each tree is a flat node list with the root at index 0. Split nodes send a
//! sample left when `x[feature] <= threshold`. Leaves hold per-class weights
//! (training sample counts or fractions, in label-encoder order).
//!
//! Class probabilities are the mean over trees of each reached leaf's
//! normalized distribution, matching scikit-learn's `predict_proba` for
//! `RandomForestClassifier`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use triage_core::{ShapeMismatch, TriageError};

use crate::model::ProbabilisticModel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f32>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// Forest as stored in the artifact document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    pub trees: Vec<Tree>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ForestError {
    #[error("forest has no trees")]
    NoTrees,
    #[error("tree {tree} has no nodes")]
    EmptyTree { tree: usize },
    #[error("tree {tree} node {node}: child {child} must point forward within {len} nodes")]
    BadChild {
        tree: usize,
        node: usize,
        child: usize,
        len: usize,
    },
    #[error("tree {tree} node {node}: feature {feature} out of range for {width} features")]
    FeatureOutOfRange {
        tree: usize,
        node: usize,
        feature: usize,
        width: usize,
    },
    #[error("tree {tree} node {node}: threshold is not finite")]
    BadThreshold { tree: usize, node: usize },
    #[error("tree {tree} node {node}: leaf has {actual} class weights, expected {expected}")]
    LeafWidth {
        tree: usize,
        node: usize,
        expected: usize,
        actual: usize,
    },
    #[error("tree {tree} node {node}: leaf weights must be finite, non-negative and not all zero")]
    BadLeaf { tree: usize, node: usize },
}

/// Validated forest with leaves normalized to probability distributions.
///
/// Evaluation only reads `self`, so one ensemble can serve any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    trees: Vec<Tree>,
    n_features: usize,
    n_classes: usize,
}

impl TreeEnsemble {
    /// Validate the forest against the schema width and class count, then
    /// normalize every leaf.
    ///
    /// Children must point to a later node, which rules out cycles and
    /// guarantees every descent terminates at a leaf.
    pub fn new(forest: Forest, n_features: usize, n_classes: usize) -> Result<Self, ForestError> {
        if forest.trees.is_empty() {
            return Err(ForestError::NoTrees);
        }

        let mut trees = forest.trees;
        for (t, tree) in trees.iter_mut().enumerate() {
            let len = tree.nodes.len();
            if len == 0 {
                return Err(ForestError::EmptyTree { tree: t });
            }

            for (n, node) in tree.nodes.iter_mut().enumerate() {
                match node {
                    Node::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    } => {
                        if *feature >= n_features {
                            return Err(ForestError::FeatureOutOfRange {
                                tree: t,
                                node: n,
                                feature: *feature,
                                width: n_features,
                            });
                        }
                        if !threshold.is_finite() {
                            return Err(ForestError::BadThreshold { tree: t, node: n });
                        }
                        for &child in [*left, *right].iter() {
                            if child <= n || child >= len {
                                return Err(ForestError::BadChild {
                                    tree: t,
                                    node: n,
                                    child,
                                    len,
                                });
                            }
                        }
                    }
                    Node::Leaf { value } => {
                        if value.len() != n_classes {
                            return Err(ForestError::LeafWidth {
                                tree: t,
                                node: n,
                                expected: n_classes,
                                actual: value.len(),
                            });
                        }
                        let total: f32 = value.iter().sum();
                        if value.iter().any(|w| !w.is_finite() || *w < 0.0) || total <= 0.0 {
                            return Err(ForestError::BadLeaf { tree: t, node: n });
                        }
                        for w in value.iter_mut() {
                            *w /= total;
                        }
                    }
                }
            }
        }

        Ok(Self {
            trees,
            n_features,
            n_classes,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Total node count across all trees.
    pub fn n_nodes(&self) -> usize {
        self.trees.iter().map(|t| t.nodes.len()).sum()
    }

    /// Mean leaf distribution over all trees.
    ///
    /// `x` must have exactly `n_features` entries.
    fn mean_distribution(&self, x: &[f32]) -> Vec<f32> {
        let mut accum = vec![0.0f64; self.n_classes];
        for tree in &self.trees {
            for (acc, &p) in accum.iter_mut().zip(leaf(tree, x)) {
                *acc += p as f64;
            }
        }

        let n = self.trees.len() as f64;
        accum.into_iter().map(|v| (v / n) as f32).collect()
    }
}

impl ProbabilisticModel for TreeEnsemble {
    fn kind(&self) -> &'static str {
        "random-forest"
    }

    fn describe(&self) -> String {
        format!(
            "random forest, {} trees, {} nodes",
            self.n_trees(),
            self.n_nodes()
        )
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>, TriageError> {
        if features.len() != self.n_features {
            return Err(TriageError::FeatureShape(ShapeMismatch::Input {
                expected: self.n_features,
                actual: features.len(),
            }));
        }
        Ok(self.mean_distribution(features))
    }
}

/// Descend one validated tree to its leaf distribution.
fn leaf<'a>(tree: &'a Tree, x: &[f32]) -> &'a [f32] {
    let mut idx = 0;
    loop {
        match &tree.nodes[idx] {
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                idx = if x[*feature] <= *threshold {
                    *left
                } else {
                    *right
                };
            }
            Node::Leaf { value } => return value,
        }
    }
}
