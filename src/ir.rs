use serde::Deserialize;

/// One node of the raw dataset tree, exactly as fetched.
///
/// `children: None` (key absent in the JSON) marks a leaf; an explicit
/// `"children": []` is kept distinct and treated as an internal node with
/// nothing under it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub children: Option<Vec<RawNode>>,
}

impl RawNode {
    pub fn leaf(name: &str, category: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            category: Some(category.to_string()),
            value: Some(value),
            children: None,
        }
    }

    pub fn branch(name: &str, children: Vec<RawNode>) -> Self {
        Self {
            name: name.to_string(),
            category: None,
            value: None,
            children: Some(children),
        }
    }
}
