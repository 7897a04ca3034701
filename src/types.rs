//! Shared types for the generated book config.
//!
//! These are the shapes the publishing pipeline reads back, so field names and
//! field order are part of the output format.

use serde::{Deserialize, Serialize};

/// One document in the book.
///
/// `url` is either the value from the document's metadata table or the
/// configured "missing" placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeafNode {
    pub name: String,
    pub id: String,
    pub url: String,
}

/// A collection and everything below it, documents first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchNode {
    pub name: String,
    pub contents: Vec<BookNode>,
}

/// An entry in `bookContents` or in a branch's `contents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookNode {
    Leaf(LeafNode),
    Branch(BranchNode),
}

impl BookNode {
    pub fn name(&self) -> &str {
        match self {
            BookNode::Leaf(leaf) => &leaf.name,
            BookNode::Branch(branch) => &branch.name,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            BookNode::Leaf(leaf) => Some(leaf),
            BookNode::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&BranchNode> {
        match self {
            BookNode::Branch(branch) => Some(branch),
            BookNode::Leaf(_) => None,
        }
    }
}

/// The whole generated config.
///
/// Field order here is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRoot {
    pub title: String,
    pub langs: Vec<String>,
    pub generation_script: String,
    pub documentation_link: String,
    pub last_generated: String,
    pub warning: String,
    pub book_contents: Vec<BookNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_json_is_not_read_as_leaf() {
        let node: BookNode =
            serde_json::from_str(r#"{"name": "Ch1", "contents": []}"#).unwrap();
        assert_eq!(
            node,
            BookNode::Branch(BranchNode {
                name: "Ch1".into(),
                contents: vec![],
            })
        );
    }

    #[test]
    fn leaf_json_is_read_as_leaf() {
        let node: BookNode =
            serde_json::from_str(r#"{"name": "Intro", "id": "a1", "url": "https://x"}"#).unwrap();
        assert_eq!(node.as_leaf().map(|l| l.url.as_str()), Some("https://x"));
        assert!(node.as_branch().is_none());
    }

    #[test]
    fn mixed_shape_is_rejected() {
        let result: Result<BookNode, _> =
            serde_json::from_str(r#"{"name": "X", "id": "a", "url": "u", "contents": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn config_root_uses_camel_case_keys_in_order() {
        let root = ConfigRoot {
            title: "Book".into(),
            langs: vec!["en".into()],
            generation_script: "g".into(),
            documentation_link: "d".into(),
            last_generated: "t".into(),
            warning: "w".into(),
            book_contents: vec![],
        };
        let json = serde_json::to_string(&root).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Book","langs":["en"],"generationScript":"g","documentationLink":"d","lastGenerated":"t","warning":"w","bookContents":[]}"#
        );
    }
}
