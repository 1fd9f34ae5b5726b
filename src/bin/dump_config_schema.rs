use anyhow::Result;

// Prints the JSON schema of `config.toml` for editor integrations.
fn main() -> Result<()> {
    let schema = doodle_engine::Config::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
