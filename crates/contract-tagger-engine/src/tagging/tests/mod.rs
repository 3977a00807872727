//! Integration tests for the tagging pipeline.
//!
//! Fixtures (.txt) live in `fixtures/`; expected outlines and tagged text are
//! inline snapshots.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::tagging::{
    ParsedDocument,
    classify::{Category, ContractLineClassifier},
    events::{TagEvent, TagKind},
    lines::normalize_text,
    parse_document,
    render::TagStyle,
    resolve::resolve,
    snapshot,
};

fn load(name: &str) -> ParsedDocument {
    let fixtures_dir = format!("{}/src/tagging/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(format!("{fixtures_dir}/{name}.txt")).unwrap();
    let doc = parse_document(&text).unwrap();
    snapshot::invariants(&doc);
    doc
}

// Fixture-based snapshot tests

#[test]
fn fixture_services_agreement_outline() {
    let doc = load("services_agreement");
    insta::assert_snapshot!(doc.tree.outline(), @r"
    document (12 lines)
      title [2, 2]
      p [4, 4]
      s [6, 9]
        l [7, 7]
        l [8, 8]
      s [10, 11]
        p [11, 11]
    ");
}

#[test]
fn fixture_services_agreement_tagged_text() {
    let doc = load("services_agreement");
    insta::assert_snapshot!(doc.render(&TagStyle::plain()), @r"
    Exhibit 10.1

    <title> SERVICES AGREEMENT </title>

    <p> This Services Agreement is entered into by and between the Company and the Consultant. </p>

    <s> Section 1. Services
    <l> 1. Consulting services as described in Schedule A. </l>
    <l> 2. Reporting to the Board. </l>
     </s>
    <s> Section 2. Payment
    <p> The Company shall pay the Consultant monthly. </p> </s>
    ");
}

#[test]
fn fixture_uppercase_headings() {
    let doc = load("uppercase_headings");
    insta::assert_snapshot!(doc.tree.outline(), @r"
    document (10 lines)
      title [0, 0]
      s [1, 2]
        p [2, 2]
      s [3, 7]
        l [4, 4]
        l [5, 5]
        p [6, 6]
        l [7, 7]
      s [8, 9]
        p [9, 9]
    ");
    assert_eq!(doc.spans(TagKind::Section), vec![(1, 2), (3, 7), (8, 9)]);

    let runs = doc.list_runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].lines, vec![4, 5, 7]);
}

#[test]
fn fixture_mixed_headings() {
    let doc = load("mixed_headings");
    insta::assert_snapshot!(doc.tree.outline(), @r"
    document (10 lines)
      title [2, 2]
      s [3, 5]
        p [4, 4]
        p [5, 5]
      s [6, 9]
        l [7, 7]
        l [8, 8]
        l [9, 9]
    ");
    assert_eq!(doc.classification.lines[5].category, Category::Plain);
}

#[test]
fn fixture_snapshot_lines() {
    let doc = load("mixed_headings");
    let snap = snapshot::normalize(&doc);
    assert_eq!(snap.lines.len(), 10);
    assert_eq!(snap.lines[7].marker.as_deref(), Some("ParenthesizedWord(a)"));
    assert_eq!(snap.lines[3].flags, "open");
    assert_eq!(snap.lines[9].flags, "open+close");
    assert!(snap.lines[9].closes_section);
    assert_eq!(snap.outline[0], "document (10 lines)");
}

// Worked examples

#[test]
fn exhibit_preamble_then_title() {
    let doc = parse_document("Exhibit 10.1\n\nSERVICES AGREEMENT").unwrap();
    let categories = doc.classification.categories();
    assert_eq!(categories, vec![Category::None, Category::None, Category::Title]);
    assert_eq!(doc.events[0], TagEvent::default());
    assert_eq!(doc.events[1], TagEvent::default());
    assert_eq!(doc.spans(TagKind::Title), vec![(2, 2)]);
}

#[test]
fn numbered_lines_are_sibling_list_leaves() {
    let doc = parse_document("1. Term of Agreement\n2. Payment\n3. Confidentiality").unwrap();
    let root = doc.tree.root();
    assert_eq!(root.children.len(), 3);
    for (_, node) in doc.tree.children(crate::tagging::tree::NodeId::ROOT) {
        assert_eq!(node.tag, Some(TagKind::List));
        assert!(node.children.is_empty());
    }
    assert_eq!(doc.spans(TagKind::List), vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn heading_inside_numbered_list_is_plain() {
    let doc = parse_document("Preamble text\n4. Notices\nTERMINATION\n5. Assignment").unwrap();
    assert_eq!(doc.classification.lines[2].category, Category::Plain);
    assert!(doc.spans(TagKind::Section).is_empty());
}

#[test]
fn lone_section_closes_at_last_line() {
    let doc = parse_document(
        "Section 1. Definitions\n\"Affiliate\" means any controlled entity.\nThe parties agree.",
    )
    .unwrap();
    assert_eq!(doc.spans(TagKind::Section), vec![(0, 2)]);
}

#[test]
fn empty_input() {
    let doc = parse_document("").unwrap();
    let root = doc.tree.root();
    assert_eq!((root.open_line, root.close_line), (0, 0));
    assert!(root.children.is_empty());
    assert_eq!(doc.render(&TagStyle::plain()), "");
}

#[test]
fn crlf_documents_render_with_crlf() {
    let doc = parse_document("LEASE\r\nSection 1. Rent\r\nThe Tenant pays.").unwrap();
    assert_eq!(
        doc.render(&TagStyle::plain()),
        "<title> LEASE </title>\r\n<s> Section 1. Rent\r\n<p> The Tenant pays. </p> </s>"
    );
}

#[test]
fn tag_text_matches_render() {
    let text = "LEASE\nSection 1. Rent\nThe Tenant pays.";
    let style = TagStyle::plain();
    let expected = parse_document(text).unwrap().render(&style);
    assert_eq!(crate::tagging::tag_text(text, &style).unwrap(), expected);
}

// Properties over a spread of inputs

#[rstest]
#[case("")]
#[case("\n\n\n")]
#[case("Only a title")]
#[case("Exhibit 1\n\n\n")]
#[case("Section 1. A\nSection 2. B\nSection 3. C")]
#[case("Section 1. A\n1. one\n2. two\nSection 2. B\n- x\n- y")]
#[case("INTRO\n\n1. one\nMIDDLE\n2. two\n\nEND\n")]
#[case("Preamble.\n12\n\n(a) first\n(b) second\nSection 9.\n")]
#[case("Exhibit 3\n\nNOTE\nSection 1. A\nRECITALS\n\n\n- one\nthe wrapped tail\n")]
#[case("\u{FEFF}Exhibit 10.2\r\n\r\nLICENSE\r\nSection 1. Grant\r\n1. Scope\r\n")]
fn pipeline_invariants_hold(#[case] text: &str) {
    let doc = parse_document(text).unwrap();
    snapshot::invariants(&doc);
}

#[rstest]
#[case("Preamble text\n4. Notices\nTERMINATION\n5. Assignment")]
#[case("Exhibit 2\n\nLEASE\nSection 1. Premises\nRECITALS\n1. Rent\nFEES\n2. Deposit")]
#[case("A\nB\nC\n1. x\nD\n(a) y\nE\n(b) z")]
fn resolution_is_idempotent(#[case] text: &str) {
    let lines = normalize_text(text);
    let once = resolve(&lines, &ContractLineClassifier.classify(&lines));
    let twice = resolve(&lines, &once);
    assert_eq!(once, twice);
}
