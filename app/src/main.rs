#[tokio::main]
async fn main() -> anyhow::Result<()> {
    folio_lib::run().await
}
