#[tokio::main]
async fn main() -> anyhow::Result<()> {
    veo_proxy_lib::run().await
}
