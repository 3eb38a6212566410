use anyhow::Result;
use aria_verifier::verifier;

// Print the relay's OpenAPI document as JSON
fn main() -> Result<()> {
    let json = serde_json::to_string_pretty(&verifier::openapi())?;
    println!("{json}");
    Ok(())
}
