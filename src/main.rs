#[tokio::main]
async fn main() {
    if let Err(e) = entre_alas_feedback::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
