pub mod context;
pub mod lifecycle;
mod polling_bridge;

pub use lifecycle::run_standalone;

pub async fn run() -> anyhow::Result<()> {
    run_standalone().await
}
