#[tokio::main]
async fn main() -> anyhow::Result<()> {
    phrase_checkin_backend::run().await
}
