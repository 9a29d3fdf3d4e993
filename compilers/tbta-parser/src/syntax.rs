use serde::{Deserialize, Serialize};
use tbta_protocol::{Feature, Part};
use tracing::trace;

use crate::tags::{self, Features, CLAUSE_PREFIX, PERIOD_PREFIX};
use crate::token::Token;

pub const CLAUSE_OPEN: &str = "{";
pub const CLAUSE_CLOSE: &str = "}";
pub const PHRASE_OPEN: &str = "(";
pub const PHRASE_CLOSE: &str = ")";

/// A node of the reconstructed clause → phrase → word hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Raw tag, kept for traceability.
    pub code: String,
    pub part: Option<Part>,
    #[serde(default, skip_serializing_if = "Features::is_empty")]
    pub features: Features,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum NodeKind {
    Clause {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Node>,
    },
    Phrase {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Node>,
    },
    Word {
        constituent: String,
    },
    Period {
        constituent: String,
    },
}

impl Node {
    fn from_token(token: &Token<'_>, kind: NodeKind) -> Self {
        let decoded = tags::decode(token.tag);
        Self {
            code: token.tag.to_string(),
            part: decoded.part,
            features: decoded.features,
            kind,
        }
    }

    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Clause { children } | NodeKind::Phrase { children } => children,
            NodeKind::Word { .. } | NodeKind::Period { .. } => &[],
        }
    }

    pub fn constituent(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Word { constituent } | NodeKind::Period { constituent } => Some(constituent),
            NodeKind::Clause { .. } | NodeKind::Phrase { .. } => None,
        }
    }

    pub fn is_clause(&self) -> bool {
        matches!(self.kind, NodeKind::Clause { .. })
    }

    pub fn is_word(&self) -> bool {
        matches!(self.kind, NodeKind::Word { .. })
    }

    /// Part label, or the raw tag when the tag names no known part.
    pub fn label(&self) -> &str {
        match self.part {
            Some(part) => part.label(),
            None => &self.code,
        }
    }

    /// Word leaves of a whole verse, depth first, in document order.
    pub fn words_in(nodes: &[Node]) -> Words<'_> {
        Words { stack: nodes.iter().rev().collect() }
    }

    fn push_child(&mut self, child: Node) {
        if let NodeKind::Clause { children } | NodeKind::Phrase { children } = &mut self.kind {
            children.push(child);
        }
    }
}

pub struct Words<'n> {
    stack: Vec<&'n Node>,
}

impl<'n> Iterator for Words<'n> {
    type Item = &'n Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_word() {
                return Some(node);
            }
            self.stack.extend(node.children().iter().rev());
        }
        None
    }
}

/// Deepest nesting the builder opens. Openers below it are kept as
/// childless nodes.
pub const MAX_DEPTH: usize = 256;

/// A clause or phrase still waiting for its closer.
struct Frame {
    node: Node,
    close: &'static str,
}

enum Element {
    Leaf(Node),
    Open(Frame),
}

/// Classifies one token. `None` for tokens that cannot be classified.
fn element(token: &Token<'_>, depth: usize) -> Option<Element> {
    let (kind, open, close) = match token.first_tag_char()? {
        PERIOD_PREFIX => {
            let constituent = if token.constituent.is_empty() { "." } else { token.constituent };
            return Some(Element::Leaf(Node::from_token(
                token,
                NodeKind::Period { constituent: constituent.to_string() },
            )));
        }
        CLAUSE_PREFIX => (NodeKind::Clause { children: Vec::new() }, CLAUSE_OPEN, CLAUSE_CLOSE),
        c if c.is_lowercase() => (NodeKind::Phrase { children: Vec::new() }, PHRASE_OPEN, PHRASE_CLOSE),
        _ => {
            return Some(Element::Leaf(Node::from_token(
                token,
                NodeKind::Word { constituent: token.constituent.to_string() },
            )));
        }
    };

    let node = Node::from_token(token, kind);
    if token.constituent != open {
        return Some(Element::Leaf(node));
    }
    if depth >= MAX_DEPTH {
        trace!(depth, "nesting too deep, opener kept without children");
        return Some(Element::Leaf(node));
    }
    Some(Element::Open(Frame { node, close }))
}

/// Shift-reduce over the token stream with an explicit stack of open nodes.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    roots: Vec<Node>,
}

impl TreeBuilder {
    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.node.push_child(node),
            None => self.roots.push(node),
        }
    }

    fn close(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.attach(frame.node);
        }
    }

    fn build(mut self, tokens: &[Token<'_>]) -> Vec<Node> {
        let mut position = 0;

        while let Some(token) = tokens.get(position) {
            let constituent = token.constituent;

            match self.stack.last().map(|frame| frame.close) {
                None if is_closer(constituent) => {
                    trace!(position, "skipping unmatched closer at top level");
                }
                Some(close) if constituent == close => self.close(),
                // Only a phrase can be on top here; the clause sees the closer next
                Some(_) if constituent == CLAUSE_CLOSE => {
                    trace!(position, "clause closed inside an open phrase");
                    self.close();
                    continue;
                }
                Some(_) if constituent == PHRASE_CLOSE => {
                    trace!(position, "skipping stray phrase closer");
                }
                // Clauses are the expected top-level unit; anything else is kept
                // as an orphan element rather than dropped.
                _ => match element(token, self.stack.len()) {
                    Some(Element::Leaf(node)) => self.attach(node),
                    Some(Element::Open(frame)) => self.stack.push(frame),
                    None => trace!(position, "skipping token without tag"),
                },
            }
            position += 1;
        }

        while !self.stack.is_empty() {
            self.close();
        }
        self.roots
    }
}

fn is_closer(constituent: &str) -> bool {
    constituent == CLAUSE_CLOSE || constituent == PHRASE_CLOSE
}

/// Rebuilds the nested tree of a verse from its token stream.
///
/// Brackets are matched by order: the first closer met at the current level
/// closes the current node. Missing closers end the node at end of input.
pub fn build_tree(tokens: &[Token<'_>]) -> Vec<Node> {
    TreeBuilder::default().build(tokens)
}

/// A node carrying a meaningful value for a queried feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureHit<'n> {
    pub value: &'n str,
    pub constituent: Option<&'n str>,
    pub part: Option<Part>,
    /// Index of the top-level node the hit sits under.
    pub root: usize,
    /// Steps from that root, such as `Clause[0]/NP[1]`; empty for the root.
    pub path: String,
}

/// Every node of the verse with a meaningful value for `feature`, in
/// document order. Placeholder values such as `Not Applicable` are skipped.
pub fn find_feature(nodes: &[Node], feature: Feature) -> Vec<FeatureHit<'_>> {
    let mut hits = Vec::new();
    let mut stack: Vec<(&Node, usize, String)> = nodes
        .iter()
        .enumerate()
        .rev()
        .map(|(root, node)| (node, root, String::new()))
        .collect();

    while let Some((node, root, path)) = stack.pop() {
        let label = node.label();
        for (i, child) in node.children().iter().enumerate().rev() {
            let child_path = if path.is_empty() {
                format!("{}[{}]", label, i)
            } else {
                format!("{}/{}[{}]", path, label, i)
            };
            stack.push((child, root, child_path));
        }

        if let Some((_, value)) = node.features.meaningful().find(|(f, _)| *f == feature) {
            hits.push(FeatureHit {
                value,
                constituent: node.constituent(),
                part: node.part,
                root,
                path,
            });
        }
    }

    hits
}
