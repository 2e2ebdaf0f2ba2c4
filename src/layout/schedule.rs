use async_trait::async_trait;

/// Host hook the stabilizer awaits between iterations so observers can
/// react to intermediate positions.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn tick(&self);
}

/// Yields to the tokio scheduler once per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn tick(&self) {
        tokio::task::yield_now().await;
    }
}

/// Never suspends. Useful for batch layout where nothing renders in between.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

#[async_trait]
impl Scheduler for Immediate {
    async fn tick(&self) {}
}
