#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = skill4edge_rust::run().await {
        eprintln!("skill4edge-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
