#[tokio::main]
async fn main() {
    if let Err(e) = hrms_backend::run().await {
        // The subscriber may not be installed yet when configuration fails.
        eprintln!("hrms-backend failed to start: {}", e);
        std::process::exit(1);
    }
}
