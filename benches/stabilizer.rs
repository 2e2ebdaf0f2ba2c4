use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flow_autolayout::layout::{DagreEngine, Immediate, LayoutStabilizer};
use flow_autolayout::{Direction, FlowNode, FlowStore, LayoutConfig, LayoutEdge, NodeDescriptor};
use std::hint::black_box;

fn dense_flow(nodes: usize, extra_edges: usize) -> FlowStore {
    let flow_nodes: Vec<FlowNode> = (0..nodes)
        .map(|i| FlowNode::with_data(NodeDescriptor::new(format!("N{i}"), format!("Node {i}"))))
        .collect();
    let mut edges = Vec::new();
    for i in 0..nodes.saturating_sub(1) {
        edges.push(LayoutEdge::edge(
            format!("e{i}"),
            format!("N{i}"),
            format!("N{}", i + 1),
        ));
    }
    let mut count = 0usize;
    'outer: for i in 0..nodes {
        for j in (i + 2)..nodes {
            if count >= extra_edges {
                break 'outer;
            }
            edges.push(LayoutEdge::pending(format!("N{i}"), format!("N{j}")));
            count += 1;
        }
    }
    FlowStore::with_diagram(flow_nodes, edges)
}

fn bench_stabilizer(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    let mut group = c.benchmark_group("stabilizer");
    for &(nodes, extra) in &[(10usize, 5usize), (50, 40), (150, 200)] {
        group.bench_with_input(
            BenchmarkId::new("dense", format!("{nodes}n_{extra}e")),
            &(nodes, extra),
            |b, &(nodes, extra)| {
                b.iter(|| {
                    let store = dense_flow(nodes, extra);
                    let mut stabilizer = LayoutStabilizer::with_parts(
                        DagreEngine,
                        Immediate,
                        LayoutConfig::default(),
                    );
                    let report = runtime
                        .block_on(stabilizer.relayout(&store, Direction::LeftRight, None))
                        .expect("layout");
                    black_box(report);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_stabilizer);
criterion_main!(benches);
