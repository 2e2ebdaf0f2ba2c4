use crate::ir::{Align, Dimensions, Direction, FlowNode, LayoutEdge};
use crate::store::FlowStore;
use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;

/// A diagram as saved by the editor: the node collection, its edges and the
/// sizes the renderer last measured.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<LayoutEdge>,
    #[serde(default)]
    pub dimensions: HashMap<String, Dimensions>,
    pub direction: Option<Direction>,
    pub align: Option<Align>,
}

impl Diagram {
    /// Loads the diagram into a fresh store. Sizes for unknown ids are dropped.
    pub fn into_store(self) -> FlowStore {
        let store = FlowStore::with_diagram(self.nodes, self.edges);
        for (id, dimensions) in &self.dimensions {
            if !store.set_dimensions(id, *dimensions) {
                tracing::debug!(id = %id, "ignoring dimensions for unknown node");
            }
        }
        store
    }
}

pub fn parse_diagram(input: &str) -> Result<Diagram> {
    match serde_json::from_str::<Diagram>(input) {
        Ok(diagram) => Ok(diagram),
        Err(json_err) => json5::from_str::<Diagram>(input).map_err(|json5_err| {
            anyhow::anyhow!("invalid diagram: {json_err} (as JSON5: {json5_err})")
        }),
    }
}
