//! Translation dictionaries as a recursive tagged tree.
//!
//! A dictionary is either a string leaf or a mapping of keys to nested
//! dictionaries. Paths are dot-separated (`timeline.events.3.title`) and list
//! items are addressed by their zero-based index.

use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// One node of a translation dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    Text(String),
    Branch(BTreeMap<String, TranslationNode>),
}

/// Which side wins when a merge meets a key that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Existing entries win; incoming only fills gaps.
    PreserveExisting,
    /// Incoming entries replace existing ones.
    Overwrite,
}

impl Default for TranslationNode {
    fn default() -> Self {
        TranslationNode::empty()
    }
}

impl TranslationNode {
    /// An empty branch.
    pub fn empty() -> Self {
        TranslationNode::Branch(BTreeMap::new())
    }

    /// Convert a parsed JSON value.
    ///
    /// Strings become leaves, numbers and booleans become leaves holding their
    /// JSON text, arrays become branches keyed by index. `null` yields `None`
    /// and is dropped from its parent.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(TranslationNode::Text(s.clone())),
            Value::Bool(b) => Some(TranslationNode::Text(b.to_string())),
            Value::Number(n) => Some(TranslationNode::Text(n.to_string())),
            Value::Array(items) => Some(TranslationNode::Branch(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| Self::from_json(item).map(|node| (i.to_string(), node)))
                    .collect(),
            )),
            Value::Object(map) => Some(TranslationNode::Branch(
                map.iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|node| (k.clone(), node)))
                    .collect(),
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TranslationNode::Text(_) => false,
            TranslationNode::Branch(children) => children.is_empty(),
        }
    }

    /// Direct child of a branch.
    pub fn child(&self, key: &str) -> Option<&TranslationNode> {
        match self {
            TranslationNode::Branch(children) => children.get(key),
            TranslationNode::Text(_) => None,
        }
    }

    /// Walk `path` one segment at a time.
    pub fn lookup(&self, path: &str) -> Option<&TranslationNode> {
        path.split('.')
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Resolve `path` to a string. `None` when any segment is missing, a leaf
    /// is hit before the path ends, or the path ends on a branch.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        match self.lookup(path)? {
            TranslationNode::Text(text) => Some(text.as_str()),
            TranslationNode::Branch(_) => None,
        }
    }

    /// Deep merge `incoming` into `self`.
    ///
    /// Branches merge key by key. Any other collision (leaf vs leaf, leaf vs
    /// branch) is settled wholesale by `precedence`.
    pub fn merge(&mut self, incoming: TranslationNode, precedence: Precedence) {
        match (self, incoming) {
            (TranslationNode::Branch(existing), TranslationNode::Branch(incoming)) => {
                for (key, node) in incoming {
                    match existing.entry(key) {
                        Entry::Vacant(slot) => {
                            slot.insert(node);
                        }
                        Entry::Occupied(mut slot) => slot.get_mut().merge(node, precedence),
                    }
                }
            }
            (current, incoming) => {
                if precedence == Precedence::Overwrite {
                    *current = incoming;
                }
            }
        }
    }

    /// Dot-paths of every leaf, in key order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_leaf_paths(String::new(), &mut paths);
        paths
    }

    fn collect_leaf_paths(&self, prefix: String, out: &mut Vec<String>) {
        match self {
            TranslationNode::Text(_) => out.push(prefix),
            TranslationNode::Branch(children) => {
                for (key, child) in children {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    child.collect_leaf_paths(path, out);
                }
            }
        }
    }
}
