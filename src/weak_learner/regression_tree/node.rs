//! Defines the inner representation
//! of the Regression Tree class.
//!
//! Nodes live in a flat arena and refer to their children by index,
//! so no operation on a tree recurses, however deep it grows.
use serde::{Serialize, Deserialize};

use super::split_rule::*;


/// Index of the root node.
pub(super) const ROOT: usize = 0;


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that have two childrens.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of regression tree.
/// Each `BranchNode` must have two childrens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(super) rule: Splitter,
    pub(super) left: usize,
    pub(super) right: usize,
}


/// Represents the leaf nodes of regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(super) prediction: f64,
}


impl Node {
    #[inline]
    pub(super) fn leaf(prediction: f64) -> Self {
        Self::Leaf(LeafNode { prediction })
    }


    #[inline]
    pub(super) fn branch(rule: Splitter, left: usize, right: usize) -> Self {
        Self::Branch(BranchNode { rule, left, right, })
    }
}


/// A trained tree.
///
/// Children are always stored after their parent.
/// Deserialization checks this, so a loaded tree has no cycles
/// and no dangling child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Node>", try_from = "Vec<Node>")]
pub struct Tree {
    nodes: Vec<Node>,
}


impl From<Tree> for Vec<Node> {
    fn from(tree: Tree) -> Self {
        tree.nodes
    }
}


impl TryFrom<Vec<Node>> for Tree {
    type Error = String;

    fn try_from(nodes: Vec<Node>) -> Result<Self, Self::Error> {
        if nodes.is_empty() {
            return Err("a tree needs at least one node".into());
        }
        for (index, node) in nodes.iter().enumerate() {
            let Node::Branch(b) = node else { continue; };
            let valid = |child: usize| index < child && child < nodes.len();
            if !valid(b.left) || !valid(b.right) {
                return Err(format!("node {index} has an invalid child"));
            }
        }
        Ok(Self { nodes })
    }
}


impl Tree {
    /// A tree with a single placeholder root.
    pub(super) fn new() -> Self {
        Self { nodes: vec![Node::leaf(0.0)] }
    }


    /// Appends a placeholder leaf and returns its index.
    pub(super) fn push_placeholder(&mut self) -> usize {
        self.nodes.push(Node::leaf(0.0));
        self.nodes.len() - 1
    }


    pub(super) fn set(&mut self, index: usize, node: Node) {
        self.nodes[index] = node;
    }


    /// Follows the splitting rules down to a leaf.
    pub(super) fn predict(&self, columns: &[Vec<f64>], row: usize) -> f64 {
        let mut index = ROOT;
        loop {
            match &self.nodes[index] {
                Node::Leaf(leaf) => return leaf.prediction,
                Node::Branch(branch) => {
                    index = match branch.rule.split(columns, row) {
                        LR::Left => branch.left,
                        LR::Right => branch.right,
                    };
                },
            }
        }
    }


    /// Number of splits on the longest root-to-leaf path.
    pub(super) fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(ROOT, 0_usize)];
        while let Some((index, depth)) = stack.pop() {
            match &self.nodes[index] {
                Node::Leaf(_) => { deepest = deepest.max(depth); },
                Node::Branch(b) => {
                    stack.push((b.left, depth + 1));
                    stack.push((b.right, depth + 1));
                },
            }
        }
        deepest
    }


    pub(super) fn n_leaves(&self) -> usize {
        self.nodes.iter()
            .filter(|node| matches!(node, Node::Leaf(_)))
            .count()
    }


    /// Largest feature index used by a splitting rule.
    pub(super) fn max_feature(&self) -> Option<usize> {
        self.nodes.iter()
            .filter_map(|node| match node {
                Node::Branch(b) => Some(b.rule.feature),
                Node::Leaf(_) => None,
            })
            .max()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    // A right-leaning chain: each branch peels off one row.
    fn chain(depth: usize) -> Tree {
        let mut tree = Tree::new();
        let mut index = ROOT;
        for d in 0..depth {
            let left = tree.push_placeholder();
            let right = tree.push_placeholder();
            tree.set(left, Node::leaf(d as f64));
            tree.set(index, Node::branch(Splitter::new(0, d as f64), left, right));
            index = right;
        }
        tree.set(index, Node::leaf(depth as f64));
        tree
    }


    #[test]
    fn deep_chain_is_walked_without_recursion() {
        let depth = 100_000;
        let tree = chain(depth);
        assert_eq!(tree.depth(), depth);
        assert_eq!(tree.n_leaves(), depth + 1);
        assert_eq!(tree.max_feature(), Some(0));

        let columns = vec![vec![-1.0, 10.5, 1e9]];
        assert_eq!(tree.predict(&columns, 0), 0.0);
        assert_eq!(tree.predict(&columns, 1), 11.0);
        assert_eq!(tree.predict(&columns, 2), depth as f64);
    }


    #[test]
    fn cyclic_tree_does_not_deserialize() {
        let json = serde_json::to_string(&chain(2)).unwrap();
        assert!(serde_json::from_str::<Tree>(&json).is_ok());

        let nodes = vec![
            Node::branch(Splitter::new(0, 0.0), 0, 1),
            Node::leaf(1.0),
        ];
        let json = serde_json::to_string(&nodes).unwrap();
        assert!(serde_json::from_str::<Tree>(&json).is_err());

        let json = serde_json::to_string(&Vec::<Node>::new()).unwrap();
        assert!(serde_json::from_str::<Tree>(&json).is_err());
    }
}
