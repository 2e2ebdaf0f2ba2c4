use crate::ir::{AnchorSide, Direction, FlowNode};
use crate::layout::{LayoutGraph, LayoutReport};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub direction: String,
    pub align: Option<String>,
    pub report: LayoutReport,
    pub nodes: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub label: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub source_position: Option<AnchorSide>,
    pub target_position: Option<AnchorSide>,
}

impl LayoutDump {
    pub fn from_layout(
        nodes: &[FlowNode],
        graph: Option<&LayoutGraph>,
        report: LayoutReport,
        direction: Direction,
    ) -> Self {
        let nodes = nodes
            .iter()
            .map(|node| {
                let sized = graph.and_then(|g| g.node(&node.id));
                NodeDump {
                    id: node.id.clone(),
                    label: node.label().map(str::to_string),
                    x: node.position.x,
                    y: node.position.y,
                    width: sized.map(|s| s.width),
                    height: sized.map(|s| s.height),
                    source_position: node.source_position,
                    target_position: node.target_position,
                }
            })
            .collect();

        LayoutDump {
            direction: direction.as_token().to_string(),
            align: graph
                .and_then(|g| g.settings().align)
                .map(|align| align.as_token().to_string()),
            report,
            nodes,
        }
    }
}

/// Writes the dump as pretty JSON to `path`, or to stdout when `path` is `None`.
pub fn write_layout_dump(path: Option<&Path>, dump: &LayoutDump) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, dump)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, dump)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}
