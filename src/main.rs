mod app;
mod cli;
mod context;
mod query;
mod rest;
mod seed;
mod storage;
mod tracing;

#[cfg(test)]
mod integration_tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    crate::tracing::init();
    app::run().await
}
