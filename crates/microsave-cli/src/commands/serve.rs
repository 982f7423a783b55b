//! Server command implementation

use std::path::Path;

use anyhow::Result;

use microsave_server::ServerConfig;

use super::load_config;

pub async fn cmd_serve(
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    let projection = load_config(config_path)?;

    println!("Starting Microsave web server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(path) = config_path {
        println!("   Config: {}", path.display());
    }
    if allowed_origins.is_empty() {
        println!("   CORS: any origin");
    } else {
        println!("   CORS: {}", allowed_origins.join(", "));
    }

    microsave_server::serve(projection, host, port, ServerConfig { allowed_origins }).await
}
