use std::collections::VecDeque;

use serde::Serialize;
use thiserror::Error;

use super::events::{TagEvent, TagKind};

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A tagged span of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// `None` only for the document root.
    pub tag: Option<TagKind>,
    pub open_line: usize,
    /// Inclusive for tagged nodes; for the root this is the line count.
    pub close_line: usize,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl TreeNode {
    fn new(tag: Option<TagKind>, line: usize, parent: Option<NodeId>) -> Self {
        Self {
            tag,
            open_line: line,
            close_line: line,
            children: vec![],
            parent,
        }
    }
}

/// The tag event stream was not balanced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("line {line}: close event with no open tag")]
    CloseAtRoot { line: usize },

    #[error("line {line}: close event for {closing:?} while {open:?} is open")]
    KindMismatch {
        line: usize,
        closing: TagKind,
        open: Option<TagKind>,
    },

    #[error("{open} tag(s) still open after the last line")]
    Unclosed { open: usize },
}

/// Nested structure of a document, stored as a flat arena.
///
/// Node 0 is the root and spans the whole document. Parent and child links
/// are `NodeId`s into the arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextTree {
    nodes: Vec<TreeNode>,
}

impl TextTree {
    /// Builds the tree from per-line tag events with an explicit stack.
    ///
    /// A line that both opens and closes yields a leaf `[i, i]`. A section
    /// trailer closes the enclosing section after the line's own tag.
    pub fn build(events: &[TagEvent]) -> Result<Self, TreeError> {
        let mut tree = TextTree {
            nodes: vec![TreeNode::new(None, 0, None)],
        };
        tree.nodes[0].close_line = events.len();

        let mut stack = vec![NodeId::ROOT];
        for (line, event) in events.iter().enumerate() {
            let Some(kind) = event.kind else {
                continue;
            };
            if event.opens() {
                let parent = *stack.last().unwrap_or(&NodeId::ROOT);
                let id = tree.push_child(parent, kind, line);
                stack.push(id);
            }
            if event.closes() {
                tree.close(&mut stack, kind, line)?;
            }
            if event.closes_section {
                tree.close(&mut stack, TagKind::Section, line)?;
            }
        }

        match stack.len() {
            1 => Ok(tree),
            n => Err(TreeError::Unclosed { open: n - 1 }),
        }
    }

    fn push_child(&mut self, parent: NodeId, kind: TagKind, line: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::new(Some(kind), line, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    fn close(&mut self, stack: &mut Vec<NodeId>, kind: TagKind, line: usize) -> Result<(), TreeError> {
        let current = match stack.last() {
            Some(&id) if id != NodeId::ROOT => id,
            _ => return Err(TreeError::CloseAtRoot { line }),
        };
        let node = &mut self.nodes[current.0];
        if node.tag != Some(kind) {
            return Err(TreeError::KindMismatch {
                line,
                closing: kind,
                open: node.tag,
            });
        }
        node.close_line = line;
        stack.pop();
        Ok(())
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&c| (c, &self.nodes[c.0]))
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Nodes in breadth-first order, root first.
    pub fn breadth_first(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        let mut queue = VecDeque::from([NodeId::ROOT]);
        std::iter::from_fn(move || {
            let id = queue.pop_front()?;
            let node = &self.nodes[id.0];
            queue.extend(node.children.iter().copied());
            Some((id, node))
        })
    }

    /// `(open_line, close_line)` of every node tagged `kind`, breadth-first.
    pub fn spans(&self, kind: TagKind) -> Vec<(usize, usize)> {
        self.breadth_first()
            .filter(|(_, n)| n.tag == Some(kind))
            .map(|(_, n)| (n.open_line, n.close_line))
            .collect()
    }

    /// One line per node, depth-first, children indented under parents.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(NodeId::ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.0];
            let indent = "  ".repeat(depth);
            let line = match node.tag {
                None => format!("{indent}document ({} lines)\n", node.close_line),
                Some(kind) => format!(
                    "{indent}{} [{}, {}]\n",
                    kind.name(),
                    node.open_line,
                    node.close_line
                ),
            };
            out.push_str(&line);
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagging::events::TagFlags;
    use pretty_assertions::assert_eq;

    fn open(kind: TagKind) -> TagEvent {
        TagEvent {
            flags: TagFlags::OPEN,
            kind: Some(kind),
            closes_section: false,
        }
    }

    fn close(kind: TagKind) -> TagEvent {
        TagEvent {
            flags: TagFlags::CLOSE,
            kind: Some(kind),
            closes_section: false,
        }
    }

    #[test]
    fn empty_events_give_bare_root() {
        let tree = TextTree::build(&[]).unwrap();
        assert_eq!(tree.root().open_line, 0);
        assert_eq!(tree.root().close_line, 0);
        assert!(tree.root().children.is_empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn leaves_hang_off_root() {
        let events = vec![
            TagEvent::leaf(TagKind::List),
            TagEvent::leaf(TagKind::List),
            TagEvent::leaf(TagKind::List),
        ];
        let tree = TextTree::build(&events).unwrap();
        assert_eq!(tree.root().children.len(), 3);
        assert_eq!(tree.spans(TagKind::List), vec![(0, 0), (1, 1), (2, 2)]);
        for (id, node) in tree.children(NodeId::ROOT) {
            assert_eq!(tree.parent(id), Some(NodeId::ROOT));
            assert!(node.children.is_empty());
        }
    }

    #[test]
    fn section_contains_its_lines() {
        let mut last = TagEvent::leaf(TagKind::PlainText);
        last.closes_section = true;
        let events = vec![
            TagEvent::leaf(TagKind::Title),
            open(TagKind::Section),
            TagEvent::leaf(TagKind::List),
            last,
        ];
        let tree = TextTree::build(&events).unwrap();
        assert_eq!(tree.spans(TagKind::Section), vec![(1, 3)]);
        insta::assert_snapshot!(tree.outline(), @r"
        document (4 lines)
          title [0, 0]
          s [1, 3]
            l [2, 2]
            p [3, 3]
        ");
    }

    #[test]
    fn close_only_line_ends_section() {
        let events = vec![open(TagKind::Section), TagEvent::default(), close(TagKind::Section)];
        let tree = TextTree::build(&events).unwrap();
        assert_eq!(tree.spans(TagKind::Section), vec![(0, 2)]);
    }

    #[test]
    fn unclosed_section_is_an_error() {
        let events = vec![open(TagKind::Section), TagEvent::leaf(TagKind::PlainText)];
        assert_eq!(TextTree::build(&events), Err(TreeError::Unclosed { open: 1 }));
    }

    #[test]
    fn stray_close_is_an_error() {
        let events = vec![close(TagKind::Section)];
        assert_eq!(TextTree::build(&events), Err(TreeError::CloseAtRoot { line: 0 }));
    }

    #[test]
    fn trailer_without_section_is_an_error() {
        let mut ev = TagEvent::leaf(TagKind::List);
        ev.closes_section = true;
        assert_eq!(TextTree::build(&[ev]), Err(TreeError::CloseAtRoot { line: 0 }));
    }

    #[test]
    fn mismatched_close_is_an_error() {
        let events = vec![open(TagKind::Section), close(TagKind::List)];
        assert!(matches!(
            TextTree::build(&events),
            Err(TreeError::KindMismatch { line: 1, .. })
        ));
    }

    #[test]
    fn breadth_first_visits_levels_in_order() {
        let mut trailer = TagEvent::leaf(TagKind::List);
        trailer.closes_section = true;
        let events = vec![
            open(TagKind::Section),
            trailer,
            TagEvent::leaf(TagKind::PlainText),
        ];
        let tree = TextTree::build(&events).unwrap();
        let tags: Vec<_> = tree.breadth_first().map(|(_, n)| n.tag).collect();
        assert_eq!(
            tags,
            vec![
                None,
                Some(TagKind::Section),
                Some(TagKind::PlainText),
                Some(TagKind::List)
            ]
        );
    }
}
