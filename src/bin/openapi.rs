//! Prints the OpenAPI document for the API without starting the server.
//!
//! Used by CI to publish the spec and diff it against the previous release.

use anyhow::Result;

fn main() -> Result<()> {
    let spec = luanto::api::openapi();
    println!("{}", spec.to_pretty_json()?);
    Ok(())
}
