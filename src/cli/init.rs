use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, name: Option<String>) -> Result<()> {
    let site_name = name.unwrap_or_else(|| "Trellis".to_string());

    std::fs::create_dir_all(&path)?;
    std::fs::create_dir_all(path.join("data"))?;

    let config = format!(
        r#"# {}

[server]
host = "127.0.0.1"
port = 4000

[database]
path = "./data/trellis.db"

[auth]
session_lifetime_days = 7
"#,
        site_name
    );

    std::fs::write(path.join("trellis.toml"), config)?;

    tracing::info!("Created new Trellis directory at {:?}", path);
    tracing::info!("Run 'trellis migrate' to set up the database");
    tracing::info!("Run 'trellis serve' to start the server");

    Ok(())
}
