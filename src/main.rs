//! Binary entry point for the invitation backend.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    celebration_backend::serve().await
}
