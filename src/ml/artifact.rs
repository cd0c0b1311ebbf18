use anyhow::{Context, Result};
use ndarray::ArrayView1;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Faults raised by the model during inference. The classifier service
/// converts these into the sentinel outcome; they never cross a request
/// boundary as errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceFault {
    #[error("feature vector has {got} values, model expects {expected}")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("feature vector contains a non-finite value at index {index}")]
    NonFinite { index: usize },
    #[error("artifact is malformed: {0}")]
    Malformed(String),
}

/// A serialized random-forest export: flat node arrays per tree, the class
/// label list, and (when the training pipeline embedded it) the ordered
/// feature schema. Version 1 exports used the scikit-learn attribute names;
/// serde aliases keep those loadable.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierArtifact {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default, alias = "feature_names_in_")]
    pub feature_names: Vec<String>,
    #[serde(alias = "classes_")]
    pub classes: Vec<String>,
    #[serde(alias = "estimators_")]
    pub trees: Vec<DecisionTree>,
}

fn default_schema_version() -> u32 {
    1
}

/// One tree in the forest, stored as parallel node arrays. A node is a leaf
/// when its left child is -1; `leaf_class` then holds the class index.
/// `votes` carries per-class sample counts per node when the export included
/// them; without votes the forest predicts but reports no probabilities.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    #[serde(alias = "children_left")]
    pub left: Vec<i64>,
    #[serde(alias = "children_right")]
    pub right: Vec<i64>,
    #[serde(alias = "feature")]
    pub split_feature: Vec<i64>,
    #[serde(alias = "threshold")]
    pub thresholds: Vec<f64>,
    #[serde(alias = "node_class")]
    pub leaf_class: Vec<i64>,
    #[serde(default, alias = "value")]
    pub votes: Option<Vec<Vec<f64>>>,
}

impl ClassifierArtifact {
    /// Load and validate an artifact from disk. Missing file or a payload
    /// that does not parse even through the legacy aliases is a load error;
    /// the caller decides whether that means degraded mode.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact at {}", path.display()))?;
        let artifact: ClassifierArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("failed to deserialize model artifact at {}", path.display()))?;
        artifact.validate()?;

        info!(
            schema_version = artifact.schema_version,
            trees = artifact.trees.len(),
            classes = artifact.classes.len(),
            "loaded classifier artifact from {}",
            path.display()
        );

        Ok(artifact)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.classes.is_empty(), "artifact declares no classes");
        anyhow::ensure!(!self.trees.is_empty(), "artifact contains no trees");
        for (i, tree) in self.trees.iter().enumerate() {
            let nodes = tree.left.len();
            anyhow::ensure!(
                tree.right.len() == nodes
                    && tree.split_feature.len() == nodes
                    && tree.thresholds.len() == nodes
                    && tree.leaf_class.len() == nodes,
                "tree {i} has inconsistent node array lengths"
            );
            if let Some(votes) = &tree.votes {
                anyhow::ensure!(
                    votes.len() == nodes && votes.iter().all(|v| v.len() == self.classes.len()),
                    "tree {i} has vote rows that do not match its nodes or the class count"
                );
            }
        }
        Ok(())
    }

    /// Number of input features the forest expects: the embedded schema when
    /// present, otherwise the highest split index seen across the trees.
    pub fn n_features(&self) -> usize {
        if !self.feature_names.is_empty() {
            return self.feature_names.len();
        }
        self.trees
            .iter()
            .flat_map(|t| t.split_feature.iter())
            .filter(|&&f| f >= 0)
            .map(|&f| f as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Majority-vote prediction across the forest. Returns the winning class
    /// label.
    pub fn predict(&self, x: ArrayView1<'_, f64>) -> Result<&str, InferenceFault> {
        self.check_input(x)?;

        let mut tally = vec![0usize; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.descend(x)?;
            let class = tree.leaf_class[leaf];
            if class < 0 || class as usize >= self.classes.len() {
                return Err(InferenceFault::Malformed(format!(
                    "leaf class index {class} out of range"
                )));
            }
            tally[class as usize] += 1;
        }

        let winner = tally
            .iter()
            .enumerate()
            .max_by_key(|(_, count)| **count)
            .map(|(i, _)| i)
            .ok_or_else(|| InferenceFault::Malformed("empty class tally".to_string()))?;

        Ok(&self.classes[winner])
    }

    /// Per-class probabilities as averaged, normalized leaf vote fractions.
    /// `None` when any tree was exported without vote counts.
    pub fn predict_proba(&self, x: ArrayView1<'_, f64>) -> Result<Option<Vec<f64>>, InferenceFault> {
        self.check_input(x)?;

        let mut acc = vec![0.0f64; self.classes.len()];
        for tree in &self.trees {
            let votes = match &tree.votes {
                Some(votes) => votes,
                None => return Ok(None),
            };
            let leaf = tree.descend(x)?;
            let row = &votes[leaf];
            let total: f64 = row.iter().sum();
            if total <= 0.0 {
                return Err(InferenceFault::Malformed(format!(
                    "leaf node {leaf} has no votes"
                )));
            }
            for (slot, &count) in acc.iter_mut().zip(row.iter()) {
                *slot += count / total;
            }
        }

        let n_trees = self.trees.len() as f64;
        for slot in acc.iter_mut() {
            *slot /= n_trees;
        }

        Ok(Some(acc))
    }

    fn check_input(&self, x: ArrayView1<'_, f64>) -> Result<(), InferenceFault> {
        let expected = self.n_features();
        if x.len() != expected {
            return Err(InferenceFault::ShapeMismatch {
                expected,
                got: x.len(),
            });
        }
        if let Some(index) = x.iter().position(|v| !v.is_finite()) {
            return Err(InferenceFault::NonFinite { index });
        }
        Ok(())
    }
}

impl DecisionTree {
    /// Walk from the root to a leaf for the given input. Split indices and
    /// child pointers are bounds-checked so a corrupt artifact surfaces as a
    /// fault instead of a panic.
    fn descend(&self, x: ArrayView1<'_, f64>) -> Result<usize, InferenceFault> {
        let nodes = self.left.len();
        let mut node = 0usize;

        // Each hop moves strictly deeper; nodes+1 hops means a cycle.
        for _ in 0..=nodes {
            if node >= nodes {
                return Err(InferenceFault::Malformed(format!(
                    "node index {node} out of range"
                )));
            }
            if self.left[node] < 0 {
                return Ok(node);
            }

            let feature = self.split_feature[node];
            if feature < 0 || feature as usize >= x.len() {
                return Err(InferenceFault::Malformed(format!(
                    "split feature index {feature} out of range for input of length {}",
                    x.len()
                )));
            }

            node = if x[feature as usize] <= self.thresholds[node] {
                self.left[node] as usize
            } else {
                self.right[node] as usize
            };
        }

        Err(InferenceFault::Malformed(
            "tree traversal did not reach a leaf".to_string(),
        ))
    }
}
