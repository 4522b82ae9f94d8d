use super::{Config, ConfigError};

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let train_dir = self.train_dir()?;
        if !train_dir.is_dir() {
            return Err(ConfigError::InvalidConfig(format!(
                "Training directory does not exist: {}",
                train_dir.display()
            )));
        }

        if let Some(test_dir) = self.test_dir.as_deref().filter(|dir| !dir.is_dir()) {
            return Err(ConfigError::InvalidConfig(format!(
                "Test directory does not exist: {}",
                test_dir.display()
            )));
        }

        if self.inputs.is_empty() && self.test_dir.is_none() && !self.show_templates {
            return Err(ConfigError::InvalidConfig(
                "Nothing to do: pass record files, --test-dir or --show-templates".to_string(),
            ));
        }

        if let Some(missing) = self.inputs.iter().find(|path| !path.is_file()) {
            return Err(ConfigError::InvalidConfig(format!(
                "Input file does not exist: {}",
                missing.display()
            )));
        }

        if self.fail_on_miss && self.test_dir.is_none() {
            return Err(ConfigError::InvalidConfig(
                "--fail-on-miss requires --test-dir".to_string(),
            ));
        }

        self.scoring.validate()?;
        Ok(())
    }
}
