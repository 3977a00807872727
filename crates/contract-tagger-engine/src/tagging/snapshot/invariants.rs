use crate::tagging::{
    ParsedDocument,
    render::{TagStyle, strip_markers},
    tree::NodeId,
};

/// Validates tagger output invariants.
///
/// Asserts that:
/// - Lines, classifications and events line up one to one
/// - Every node's span is ordered and lies inside its parent's span
/// - Every parent/child link points both ways
/// - Stripping the markers from the tagged text gives back the normalized text
///
/// Balance is guaranteed by construction: `TextTree::build` refuses unbalanced
/// events.
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(doc: &ParsedDocument) {
    let n = doc.lines.len();
    assert_eq!(doc.classification.lines.len(), n, "classification length");
    assert_eq!(doc.events.len(), n, "event count");

    let tree = &doc.tree;
    assert_eq!(tree.root().open_line, 0, "root must start at line 0");
    assert_eq!(tree.root().close_line, n, "root must span every line");

    for (id, node) in tree.breadth_first() {
        if id == NodeId::ROOT {
            continue;
        }
        assert!(
            node.open_line <= node.close_line && node.close_line < n,
            "node span out of bounds: {:?} (lines: {n})",
            (node.open_line, node.close_line)
        );
        let parent_id = node.parent.expect("non-root node without parent");
        let parent = tree.node(parent_id);
        assert!(
            parent.children.contains(&id),
            "node {id:?} missing from its parent's children"
        );
        assert!(
            node.open_line >= parent.open_line && node.close_line <= parent.close_line,
            "node span {:?} not contained in parent span {:?}",
            (node.open_line, node.close_line),
            (parent.open_line, parent.close_line)
        );
    }

    let style = TagStyle::plain();
    let tagged = doc.render(&style);
    assert_eq!(
        strip_markers(&tagged, &style, doc.separator),
        doc.normalized_text(),
        "stripping markers must give back the normalized text"
    );
}
