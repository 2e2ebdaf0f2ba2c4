use serde::{Deserialize, Serialize};

/// Rank direction handed to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "TB", alias = "TD")]
    TopBottom,
    #[serde(rename = "RL")]
    RightLeft,
    #[serde(rename = "BT")]
    BottomTop,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "LR" => Some(Self::LeftRight),
            "TB" | "TD" => Some(Self::TopBottom),
            "RL" => Some(Self::RightLeft),
            "BT" => Some(Self::BottomTop),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::LeftRight => "LR",
            Self::TopBottom => "TB",
            Self::RightLeft => "RL",
            Self::BottomTop => "BT",
        }
    }

    pub fn rankdir(self) -> &'static str {
        match self {
            Self::LeftRight => "lr",
            Self::TopBottom => "tb",
            Self::RightLeft => "rl",
            Self::BottomTop => "bt",
        }
    }

    pub fn is_horizontal(self) -> bool {
        self == Self::LeftRight
    }

    /// Returns the `(source, target)` anchor sides for nodes laid out in this direction.
    ///
    /// Only `LR` gets horizontal anchors; `RL`, `TB` and `BT` all share the
    /// bottom/top pair. `RL` and `BT` probably want mirrored anchors, but
    /// diagrams already saved against this behaviour depend on it.
    pub fn anchor_sides(self) -> (AnchorSide, AnchorSide) {
        if self.is_horizontal() {
            (AnchorSide::Right, AnchorSide::Left)
        } else {
            (AnchorSide::Bottom, AnchorSide::Top)
        }
    }
}

/// Rank alignment. Accepted by the layout call but not forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Align {
    #[serde(rename = "UL")]
    UpLeft,
    #[serde(rename = "UR")]
    UpRight,
    #[serde(rename = "DL")]
    DownLeft,
    #[serde(rename = "DR")]
    DownRight,
}

impl Align {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "UL" => Some(Self::UpLeft),
            "UR" => Some(Self::UpRight),
            "DL" => Some(Self::DownLeft),
            "DR" => Some(Self::DownRight),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::UpLeft => "UL",
            Self::UpRight => "UR",
            Self::DownLeft => "DL",
            Self::DownRight => "DR",
        }
    }
}

/// Side of a node where connections attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Left,
    Top,
    Right,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct XYPosition {
    pub x: f32,
    pub y: f32,
}

impl XYPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rendered size of a node. Zero means the node has not been measured yet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Editable/display metadata of a diagram node.
///
/// `id` identifies the node within a diagram; uniqueness is up to the store.
/// Unset flags are treated as false by consumers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_source: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_target: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_hide_self: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_hide_children: Option<bool>,
}

impl NodeDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }
}

/// A node in the live diagram collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: String,
    #[serde(default)]
    pub position: XYPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_position: Option<AnchorSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<AnchorSide>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeDescriptor>,
}

impl FlowNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_data(data: NodeDescriptor) -> Self {
        Self {
            id: data.id.clone(),
            parent_node: data.parent_node.clone(),
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

/// A connection that is still being drawn and has no edge id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutEdge {
    Edge(FlowEdge),
    Pending(Connection),
}

impl LayoutEdge {
    pub fn edge(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Edge(FlowEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        })
    }

    pub fn pending(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Pending(Connection {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        })
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Edge(edge) => &edge.source,
            Self::Pending(conn) => &conn.source,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::Edge(edge) => &edge.target,
            Self::Pending(conn) => &conn.target,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl From<FlowEdge> for LayoutEdge {
    fn from(edge: FlowEdge) -> Self {
        Self::Edge(edge)
    }
}

impl From<Connection> for LayoutEdge {
    fn from(conn: Connection) -> Self {
        Self::Pending(conn)
    }
}
