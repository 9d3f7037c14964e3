#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wordround_backend::run().await
}
