#[tokio::main]
async fn main() {
    healthdoc_lib::init_tracing();

    if let Err(e) = healthdoc_lib::run().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
