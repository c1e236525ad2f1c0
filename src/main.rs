#[tokio::main]
async fn main() -> anyhow::Result<()> {
    posture_diagnosis_lib::run().await
}
