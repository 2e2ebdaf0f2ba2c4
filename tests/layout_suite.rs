use std::path::Path;

use flow_autolayout::{
    AnchorSide, Diagram, DiagramStore, Direction, FlowNode, FlowStore, LayoutConfig, LayoutError,
    LayoutStabilizer, parse_diagram,
};

fn load_fixture(rel: &str) -> Diagram {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_diagram(&input).expect("parse failed")
}

fn assert_laid_out(store: &FlowStore, direction: Direction, fixture: &str) {
    let (source, target) = direction.anchor_sides();
    for node in store.nodes() {
        assert!(
            node.position.x.is_finite() && node.position.y.is_finite(),
            "{fixture}: {} has no usable position",
            node.id
        );
        assert_eq!(node.source_position, Some(source), "{fixture}: {}", node.id);
        assert_eq!(node.target_position, Some(target), "{fixture}: {}", node.id);
    }
}

#[tokio::test]
async fn layout_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = ["linear.json", "branching.json", "pending.json5", "empty.json"];

    for rel in candidates {
        let diagram = load_fixture(rel);
        let direction = diagram.direction.unwrap_or_default();
        let align = diagram.align;
        let node_count = diagram.nodes.len();
        let store = diagram.into_store();

        let mut stabilizer = LayoutStabilizer::new(LayoutConfig::default());
        let report = stabilizer
            .relayout(&store, direction, align)
            .await
            .unwrap_or_else(|err| panic!("{rel}: layout failed: {err}"));

        assert!(report.converged(), "{rel}: {report:?}");
        assert!(report.iterations < 300, "{rel}: {report:?}");
        assert_eq!(store.nodes().len(), node_count, "{rel}");
        assert_laid_out(&store, direction, rel);
    }
}

#[tokio::test]
async fn linear_chain_flows_left_to_right() {
    let store = load_fixture("linear.json").into_store();
    let mut stabilizer = LayoutStabilizer::new(LayoutConfig::default());
    stabilizer
        .relayout(&store, Direction::LeftRight, None)
        .await
        .unwrap();

    let x = |id: &str| {
        store
            .nodes()
            .into_iter()
            .find(|node| node.id == id)
            .map(|node| node.position.x)
            .unwrap()
    };
    assert!(x("start") < x("review"));
    assert!(x("review") < x("done"));

    let graph = stabilizer.graph().unwrap();
    let done = graph.node("done").unwrap();
    assert_eq!((done.width, done.height), (150.0, 50.0));
    let review = graph.node("review").unwrap();
    assert_eq!((review.width, review.height), (160.0, 60.0));
}

#[tokio::test]
async fn branching_keeps_node_metadata() {
    let store = load_fixture("branching.json").into_store();
    let before = store.nodes();
    let mut stabilizer = LayoutStabilizer::new(LayoutConfig::default());
    stabilizer
        .relayout(&store, Direction::TopBottom, None)
        .await
        .unwrap();

    for (old, new) in before.iter().zip(store.nodes()) {
        assert_eq!(old.id, new.id);
        assert_eq!(old.data, new.data);
        assert_eq!(old.parent_node, new.parent_node);
    }
    assert_eq!(stabilizer.graph().unwrap().edge_count(), 5);
}

#[tokio::test]
async fn right_to_left_still_uses_vertical_anchors() {
    let store = load_fixture("pending.json5").into_store();
    let mut stabilizer = LayoutStabilizer::new(LayoutConfig::default());
    stabilizer
        .relayout(&store, Direction::RightLeft, None)
        .await
        .unwrap();
    for node in store.nodes() {
        assert_eq!(node.source_position, Some(AnchorSide::Bottom));
        assert_eq!(node.target_position, Some(AnchorSide::Top));
    }
}

#[tokio::test]
async fn relayout_of_converged_diagram_is_quick() {
    let store = load_fixture("branching.json").into_store();
    let mut stabilizer = LayoutStabilizer::new(LayoutConfig::default());
    stabilizer
        .relayout(&store, Direction::TopBottom, None)
        .await
        .unwrap();
    let settled = store.nodes();

    let report = stabilizer
        .relayout(&store, Direction::TopBottom, None)
        .await
        .unwrap();
    assert!(report.converged());
    assert_eq!(report.iterations, 3);
    assert_eq!(store.nodes(), settled);
}

#[tokio::test]
async fn unknown_node_leaves_store_untouched() {
    let store = load_fixture("linear.json").into_store();
    let before = store.nodes();
    let mut nodes = store.nodes();
    nodes.push(FlowNode::new("orphan"));

    let mut stabilizer = LayoutStabilizer::new(LayoutConfig::default());
    let err = stabilizer
        .layout(&store, nodes, &store.edges(), Direction::LeftRight, None)
        .await
        .unwrap_err();

    assert!(matches!(err, LayoutError::NodeNotFound { ref id } if id == "orphan"));
    assert_eq!(store.nodes(), before);
    assert_eq!(store.revision(), 0);
}
