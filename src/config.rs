use crate::ir::{Align, Direction};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Gap between ranks along the rank direction.
    pub rank_spacing: f32,
    /// Gap between nodes of one rank. Unset leaves the engine default in place.
    pub node_spacing: Option<f32>,
    pub margin_x: Option<f32>,
    pub margin_y: Option<f32>,
    /// Size used for a node whose rendered width has not been measured.
    pub default_node_width: f32,
    pub default_node_height: f32,
    pub required_stable_iterations: usize,
    pub max_iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rank_spacing: 100.0,
            node_spacing: None,
            margin_x: None,
            margin_y: None,
            default_node_width: 150.0,
            default_node_height: 50.0,
            required_stable_iterations: 3,
            max_iterations: 300,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub direction: Direction,
    pub align: Option<Align>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    rank_spacing: Option<f32>,
    node_spacing: Option<f32>,
    margin_x: Option<f32>,
    margin_y: Option<f32>,
    default_node_width: Option<f32>,
    default_node_height: Option<f32>,
    required_stable_iterations: Option<usize>,
    max_iterations: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    direction: Option<Direction>,
    align: Option<Align>,
    layout: Option<LayoutConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(contents)?,
    };

    let mut config = Config::default();
    if let Some(direction) = parsed.direction {
        config.direction = direction;
    }
    config.align = parsed.align;

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.rank_spacing {
            config.layout.rank_spacing = v;
        }
        if let Some(v) = layout.node_spacing {
            config.layout.node_spacing = Some(v);
        }
        if let Some(v) = layout.margin_x {
            config.layout.margin_x = Some(v);
        }
        if let Some(v) = layout.margin_y {
            config.layout.margin_y = Some(v);
        }
        if let Some(v) = layout.default_node_width {
            config.layout.default_node_width = v;
        }
        if let Some(v) = layout.default_node_height {
            config.layout.default_node_height = v;
        }
        if let Some(v) = layout.required_stable_iterations {
            config.layout.required_stable_iterations = v.max(1);
        }
        if let Some(v) = layout.max_iterations {
            config.layout.max_iterations = v;
        }
    }

    Ok(config)
}
