use std::fs::File;
use std::io::Write;

pub fn save_json(data: &serde_json::Value, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;
    file.write_all(serde_json::to_string_pretty(data)?.as_bytes())?;
    println!("✅ {} written.", filename);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_json_writes_pretty_output() {
        let path = std::env::temp_dir().join("datastore_cli_save_json_test.json");
        let path = path.to_string_lossy().to_string();
        save_json(&serde_json::json!({ "rows": [] }), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"rows\""));
        std::fs::remove_file(&path).ok();
    }
}
