use std::cmp::Ordering;

use crate::ir::RawNode;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    /// Dotted ancestor path, e.g. `root.Wii.Wii Sports`. Duplicate sibling
    /// names produce duplicate ids; the original left that unresolved and so
    /// do we.
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    /// Leaf: the declared value (missing counts as 0). Internal: exact sum
    /// of the children's values.
    pub value: f64,
    /// Distance to the deepest leaf below; 0 for leaves.
    pub height: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// True only when the input had no `children` key at all. A node with
    /// `"children": []` is internal and never rendered.
    pub is_leaf: bool,
    /// Filled in by the layout pass.
    pub rect: Rect,
}

/// Arena-backed hierarchy. Parent links are plain indices, so there is no
/// ownership cycle to manage.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<Node>,
}

pub const ROOT: NodeId = 0;

impl Hierarchy {
    /// Build the hierarchy from a raw dataset tree: assign dotted-path ids
    /// top-down, sum values and compute heights bottom-up, then sort every
    /// sibling list by height descending, ties by value descending.
    pub fn build(raw: &RawNode) -> Self {
        let mut hierarchy = Self { nodes: Vec::new() };
        hierarchy.insert(raw, None);
        hierarchy.aggregate(ROOT);
        hierarchy.sort_children(ROOT);
        hierarchy
    }

    fn insert(&mut self, raw: &RawNode, parent: Option<NodeId>) -> NodeId {
        let id = match parent {
            Some(parent_id) => format!("{}.{}", self.nodes[parent_id].id, raw.name),
            None => raw.name.clone(),
        };
        let node_id = self.nodes.len();
        self.nodes.push(Node {
            id,
            name: raw.name.clone(),
            category: raw.category.clone(),
            // Mirrors the `+value || 0` coercion of the original sum pass.
            value: raw.value.filter(|v| v.is_finite()).unwrap_or(0.0),
            height: 0,
            parent,
            children: Vec::new(),
            is_leaf: raw.children.is_none(),
            rect: Rect::default(),
        });
        if let Some(children) = &raw.children {
            for child in children {
                let child_id = self.insert(child, Some(node_id));
                self.nodes[node_id].children.push(child_id);
            }
        }
        node_id
    }

    fn aggregate(&mut self, node_id: NodeId) {
        let children = self.nodes[node_id].children.clone();
        if children.is_empty() {
            // A present-but-empty children list is internal: it sums to 0
            // and stays unrendered. True leaves keep their declared value.
            if !self.nodes[node_id].is_leaf {
                self.nodes[node_id].value = 0.0;
            }
            self.nodes[node_id].height = 0;
            return;
        }
        let mut sum = 0.0;
        let mut max_height = 0;
        for child_id in &children {
            self.aggregate(*child_id);
            sum += self.nodes[*child_id].value;
            max_height = max_height.max(self.nodes[*child_id].height);
        }
        self.nodes[node_id].value = sum;
        self.nodes[node_id].height = max_height + 1;
    }

    fn sort_children(&mut self, node_id: NodeId) {
        let mut children = self.nodes[node_id].children.clone();
        children.sort_by(|a, b| {
            let (na, nb) = (&self.nodes[*a], &self.nodes[*b]);
            nb.height
                .cmp(&na.height)
                .then(nb.value.partial_cmp(&na.value).unwrap_or(Ordering::Equal))
        });
        for child_id in &children {
            self.sort_children(*child_id);
        }
        self.nodes[node_id].children = children;
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal of all node ids, children in sorted order.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![ROOT];
        while let Some(node_id) = stack.pop() {
            out.push(node_id);
            for child_id in self.nodes[node_id].children.iter().rev() {
                stack.push(*child_id);
            }
        }
        out
    }

    /// Leaves in pre-order (post-sort) traversal order; the only nodes the
    /// renderer draws.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|id| self.nodes[*id].is_leaf)
            .collect()
    }

    /// Distinct leaf categories in first-encountered traversal order.
    pub fn leaf_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for leaf_id in self.leaves() {
            if let Some(category) = &self.nodes[leaf_id].category
                && !categories.iter().any(|seen| seen == category)
            {
                categories.push(category.clone());
            }
        }
        categories
    }

    /// Names of the root's direct children, in sorted order. Seeds the color
    /// scale domain.
    pub fn top_level_names(&self) -> Vec<String> {
        self.nodes[ROOT]
            .children
            .iter()
            .map(|id| self.nodes[*id].name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::RawNode;

    fn sample() -> RawNode {
        RawNode::branch(
            "root",
            vec![
                RawNode::branch(
                    "Wii",
                    vec![
                        RawNode::leaf("Wii Sports", "Wii", 82.9),
                        RawNode::leaf("Mario Kart Wii", "Wii", 35.52),
                    ],
                ),
                RawNode::branch("DS", vec![RawNode::leaf("New Super Mario Bros.", "DS", 29.8)]),
            ],
        )
    }

    #[test]
    fn ids_are_dotted_paths() {
        let hierarchy = Hierarchy::build(&sample());
        let ids: Vec<&str> = hierarchy
            .descendants()
            .into_iter()
            .map(|id| hierarchy.node(id).id.as_str())
            .collect();
        assert!(ids.contains(&"root.Wii.Wii Sports"));
        assert!(ids.contains(&"root.DS.New Super Mario Bros."));
    }

    #[test]
    fn internal_values_are_child_sums() {
        let hierarchy = Hierarchy::build(&sample());
        for node_id in hierarchy.descendants() {
            let node = hierarchy.node(node_id);
            if !node.children.is_empty() {
                let sum: f64 = node
                    .children
                    .iter()
                    .map(|child| hierarchy.node(*child).value)
                    .sum();
                assert_eq!(node.value, sum, "node {}", node.id);
            }
        }
        assert_eq!(hierarchy.node(ROOT).value, 82.9 + 35.52 + 29.8);
    }

    #[test]
    fn siblings_sorted_by_height_then_value_desc() {
        let raw = RawNode::branch(
            "root",
            vec![
                RawNode::leaf("small", "c", 1.0),
                RawNode::branch("deep", vec![RawNode::leaf("inner", "c", 2.0)]),
                RawNode::leaf("big", "c", 50.0),
            ],
        );
        let hierarchy = Hierarchy::build(&raw);
        let order: Vec<&str> = hierarchy.node(ROOT)
            .children
            .iter()
            .map(|id| hierarchy.node(*id).name.as_str())
            .collect();
        // "deep" has height 1 and wins despite the smaller value.
        assert_eq!(order, vec!["deep", "big", "small"]);
    }

    #[test]
    fn empty_children_is_internal_not_leaf() {
        let raw = RawNode::branch(
            "root",
            vec![
                RawNode {
                    name: "hollow".to_string(),
                    category: None,
                    value: Some(5.0),
                    children: Some(vec![]),
                },
                RawNode::leaf("solid", "c", 5.0),
            ],
        );
        let hierarchy = Hierarchy::build(&raw);
        let leaves = hierarchy.leaves();
        assert_eq!(leaves.len(), 1);
        assert_eq!(hierarchy.node(leaves[0]).name, "solid");
        let hollow = hierarchy
            .descendants()
            .into_iter()
            .find(|id| hierarchy.node(*id).name == "hollow")
            .expect("hollow node missing");
        assert_eq!(hierarchy.node(hollow).value, 0.0);
        assert_eq!(hierarchy.node(hollow).height, 0);
    }

    #[test]
    fn missing_leaf_value_counts_as_zero() {
        let raw = RawNode::branch(
            "root",
            vec![
                RawNode {
                    name: "unpriced".to_string(),
                    category: Some("c".to_string()),
                    value: None,
                    children: None,
                },
                RawNode::leaf("priced", "c", 7.0),
            ],
        );
        let hierarchy = Hierarchy::build(&raw);
        assert_eq!(hierarchy.node(ROOT).value, 7.0);
    }

    #[test]
    fn duplicate_sibling_names_keep_duplicate_ids() {
        let raw = RawNode::branch(
            "root",
            vec![
                RawNode::leaf("twin", "c", 1.0),
                RawNode::leaf("twin", "c", 2.0),
            ],
        );
        let hierarchy = Hierarchy::build(&raw);
        let leaves = hierarchy.leaves();
        assert_eq!(hierarchy.node(leaves[0]).id, "root.twin");
        assert_eq!(hierarchy.node(leaves[1]).id, "root.twin");
    }

    #[test]
    fn leaf_categories_in_traversal_order() {
        let hierarchy = Hierarchy::build(&sample());
        assert_eq!(hierarchy.leaf_categories(), vec!["Wii", "DS"]);
    }
}
