//! Saving and loading configuration files.
//!
//! Run with: cargo run --example persistence

use serde_tagconf::{ParseOptions, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let dir = std::env::temp_dir().join("serde_tagconf_demo");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("service.conf");

    let mut config = Value::Null;
    config["service"]["name"] = Value::from("billing");
    config["service"]["replicas"] = Value::from(3);
    config["endpoints"][0]["url"] = Value::from("https://a.example.org");
    config["endpoints"][1]["url"] = Value::from("https://b.example.org");

    config.save(&path);
    println!("Saved to {}:\n{}", path.display(), std::fs::read_to_string(&path)?);

    let loaded = Value::load(&path)?;
    assert_eq!(loaded, config);
    println!("✓ Reloaded identical tree");

    // a missing file loads as Null
    let missing = Value::load(dir.join("missing.conf"))?;
    println!("missing file is null: {}", missing.is_null());

    // hand-edited files may leave scopes open; strict loading rejects them
    let edited = dir.join("edited.conf");
    std::fs::write(&edited, "<service>\n  <key=\"name\" type=\"String\" value=\"billing\">\n")?;
    println!("lenient load: {}", Value::load(&edited)?);
    match Value::load_with_options(&edited, ParseOptions::strict()) {
        Ok(_) => println!("strict load accepted"),
        Err(e) => println!("strict load rejected: {}", e),
    }

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
