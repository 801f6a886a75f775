use adapter::runtime::{boot, serve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let (config, route) = boot::boot()?;
    serve::serve(config, route).await
}
