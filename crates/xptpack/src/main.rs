#[tokio::main]
async fn main() -> anyhow::Result<()> {
    xptpack_lib::main().await
}
