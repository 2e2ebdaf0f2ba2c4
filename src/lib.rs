#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod store;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use ir::{
    Align, AnchorSide, Connection, Dimensions, Direction, FlowEdge, FlowNode, LayoutEdge,
    NodeDescriptor, XYPosition,
};
pub use layout::{
    DagreEngine, LayoutEngine, LayoutError, LayoutGraph, LayoutPhase, LayoutReport,
    LayoutStabilizer, Scheduler,
};
pub use parser::{Diagram, parse_diagram};
pub use store::{DiagramStore, FlowStore, GraphNode, LayoutGuard};
