use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use crate::core::{
    HayaoshiError,
    QuizConfig,
};

const APP_NAME: &str = "hayaoshi";
const CONFIG_FILE: &str = "config.json";

pub fn app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn config_file_path() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

/// Loads the quiz settings, writing a default file on first run so there is
/// something to edit. A file that fails to parse falls back to defaults;
/// bad values inside a parsed file are caught by `QuizConfig::validate`
/// when a session starts.
pub fn load_config() -> QuizConfig {
    let path = config_file_path();

    if !path.exists() {
        let config = QuizConfig::default();
        if let Err(e) = save_config(&config) {
            eprintln!("Failed to write {}: {}", path.display(), e);
        }
        return config;
    }

    match read_config(&path) {
        Ok(config) => {
            println!("Config loaded from: {}", path.display());
            config
        }
        Err(e) => {
            eprintln!("Failed to load {}: {}. Using defaults.", path.display(), e);
            QuizConfig::default()
        }
    }
}

fn read_config(path: &Path) -> Result<QuizConfig, HayaoshiError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn save_config(config: &QuizConfig) -> Result<(), HayaoshiError> {
    let path = config_file_path();
    let json = serde_json::to_string_pretty(config)?;
    fs::write(&path, json)?;
    println!("Config saved to: {}", path.display());
    Ok(())
}
