#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Node with id {id} not found")]
    NodeNotFound { id: String },

    #[error("layout engine left node {id} without a position")]
    Unplaced { id: String },

    #[error("layout engine failed: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
