#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::config::loader::{
        CONFIG_ENV_VAR, ConfigError, get_config_file_path, load_config_from_path,
        save_config_to_path,
    };
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::tempdir;

    // Helper function to create a test config path
    fn create_test_config_path() -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("test_config.toml");
        (temp_dir, config_path)
    }

    #[test]
    fn test_load_nonexistent_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        // Loading a non-existent config should create a default one
        let config = load_config_from_path(&config_path).expect("Failed to load default config");

        assert!(config_path.exists(), "Config file should have been created");
        assert_eq!(config, Config::default());
        assert_eq!(config.game.seed, None);
        assert!(config.display.show_ghost);
        assert_eq!(config.display.frame_ms, 16);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_save_and_load_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        let mut config = Config::default();
        config.game.seed = Some(1234);
        config.display.show_ghost = false;
        config.log.filter = "debug".to_string();

        save_config_to_path(&config, &config_path).expect("Failed to save config");
        let loaded_config = load_config_from_path(&config_path).expect("Failed to load config");

        assert_eq!(loaded_config, config);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let (temp_dir, _) = create_test_config_path();
        let nested = temp_dir.path().join("a").join("b").join("config.toml");

        save_config_to_path(&Config::default(), &nested).expect("Failed to save config");

        assert!(nested.exists());
    }

    #[test]
    fn test_malformed_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        fs::write(&config_path, "invalid toml content ! @ #")
            .expect("Failed to write invalid config");

        match load_config_from_path(&config_path) {
            Err(ConfigError::Parse(_)) => {}
            Ok(_) => panic!("Expected error when loading invalid config"),
            Err(e) => panic!("Unexpected error type: {e:?}"),
        }
    }

    #[test]
    fn test_partial_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        let partial_config = r#"
            [game]
            seed = 42

            [display]
            frame_ms = 33
        "#;
        fs::write(&config_path, partial_config).expect("Failed to write partial config");

        let loaded_config =
            load_config_from_path(&config_path).expect("Failed to load partial config");

        // Explicitly set values
        assert_eq!(loaded_config.game.seed, Some(42));
        assert_eq!(loaded_config.display.frame_interval(), Duration::from_millis(33));

        // Defaults for missing fields
        assert!(loaded_config.display.show_ghost);
        assert_eq!(loaded_config.log.file, "blockdrop.log");
    }

    #[test]
    fn test_zero_frame_interval_is_clamped() {
        let mut config = Config::default();
        config.display.frame_ms = 0;

        assert_eq!(config.display.frame_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_config_env_var_override() {
        let (_temp_dir, config_path) = create_test_config_path();

        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, &config_path);
        }
        let resolved = get_config_file_path();
        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }

        assert_eq!(resolved, config_path);
    }
}
