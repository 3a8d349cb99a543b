use artillery_solver::{DEFAULT_GRID_SIZE, Point, Solver, SolverError};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{debug, error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
/// Environment variable that points at an alternative configuration file.
const CONFIG_PATH_VAR: &str = "ARTILLERY_CONFIG";
const ENV_PREFIX: &str = "ARTILLERY";

/// Origin, optional target and grid size for a single fire mission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FireMission {
    #[serde(default = "default_grid_size")]
    pub grid_size: i64,
    pub origin: Point,
    #[serde(default)]
    pub target: Option<Point>,
}

fn default_grid_size() -> i64 {
    i64::from(DEFAULT_GRID_SIZE)
}

impl FireMission {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.clone().try_deserialize()
    }

    /// Builds a solver for this mission. The target is only set when one was configured.
    pub fn build_solver(&self) -> Result<Solver, SolverError> {
        let mut solver = Solver::with_grid_size(self.origin, self.grid_size)?;
        if let Some(target) = self.target {
            solver.set_target(target);
        }
        debug!(%solver, "Built solver from fire mission");
        Ok(solver)
    }
}

/// Loads the fire mission configuration.
///
/// Reads `config/default.toml` (or the file named by `ARTILLERY_CONFIG`) and
/// layers `ARTILLERY_*` environment variables on top, e.g.
/// `ARTILLERY_GRID_SIZE=50` or `ARTILLERY_TARGET__X=3`.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(&path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    match settings {
        Ok(config) => {
            info!("Successfully loaded configuration: {:?}", config);
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-wide; tests touching them take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARS: [&str; 4] = [
        CONFIG_PATH_VAR,
        "ARTILLERY_GRID_SIZE",
        "ARTILLERY_TARGET__X",
        "ARTILLERY_TARGET__Y",
    ];

    fn clear_env() {
        for var in OVERRIDE_VARS {
            // SAFETY: callers hold ENV_LOCK, so no other test reads or writes the environment.
            unsafe { std::env::remove_var(var) };
        }
    }

    fn parse(toml: &str) -> Result<FireMission, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        FireMission::from_config(&config)
    }

    #[test]
    fn test_full_mission() {
        let mission = parse(
            r#"
            grid_size = 50
            [origin]
            x = 1
            y = 1
            [target]
            x = -1
            y = -1
            "#,
        )
        .unwrap();
        assert_eq!(mission.grid_size, 50);
        assert_eq!(mission.origin, Point::new(1, 1));
        assert_eq!(mission.target, Some(Point::new(-1, -1)));

        let solver = mission.build_solver().unwrap();
        assert_eq!(solver.grid_size(), 50);
        assert_eq!(solver.range().unwrap(), 141); // 2.83 grid units * 50 m
    }

    #[test]
    fn test_defaults_when_omitted() {
        let mission = parse(
            r#"
            [origin]
            x = 3
            y = 4
            "#,
        )
        .unwrap();
        assert_eq!(mission.grid_size, 100);
        assert_eq!(mission.target, None);

        let solver = mission.build_solver().unwrap();
        assert_eq!(solver.target(), None);
        assert!(matches!(solver.solve(), Err(SolverError::NoTarget(_))));
    }

    #[test]
    fn test_missing_origin_is_rejected() {
        let result = parse("grid_size = 100");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_grid_size_is_rejected_by_solver() {
        let mission = parse(
            r#"
            grid_size = 0
            [origin]
            x = 0
            y = 0
            "#,
        )
        .unwrap();
        assert!(matches!(
            mission.build_solver(),
            Err(SolverError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_default_config_file_parses() {
        let mission = parse(include_str!("../config/default.toml")).unwrap();
        assert_eq!(mission.origin, Point::new(1, 1));
        assert_eq!(mission.target, Some(Point::new(2, 2)));
    }

    #[test]
    fn test_config_path_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let path = std::env::temp_dir().join("artillery-calculator-config-path.toml");
        std::fs::write(&path, "grid_size = 25\n[origin]\nx = -4\ny = 7\n").unwrap();
        // SAFETY: ENV_LOCK is held.
        unsafe { std::env::set_var(CONFIG_PATH_VAR, &path) };

        let result = load_config().and_then(|config| FireMission::from_config(&config));
        clear_env();
        let _ = std::fs::remove_file(&path);

        let mission = result.unwrap();
        assert_eq!(mission.grid_size, 25);
        assert_eq!(mission.origin, Point::new(-4, 7));
        assert_eq!(mission.target, None);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        // SAFETY: ENV_LOCK is held.
        unsafe {
            std::env::set_var(CONFIG_PATH_VAR, path);
            std::env::set_var("ARTILLERY_GRID_SIZE", "50");
            std::env::set_var("ARTILLERY_TARGET__X", "3");
        }

        let result = load_config().and_then(|config| FireMission::from_config(&config));
        clear_env();

        let mission = result.unwrap();
        assert_eq!(mission.grid_size, 50);
        assert_eq!(mission.origin, Point::new(1, 1)); // From the file
        assert_eq!(mission.target, Some(Point::new(3, 2))); // x overridden, y from the file

        let solver = mission.build_solver().unwrap();
        assert_eq!(solver.range().unwrap(), 112); // sqrt(5) grid units * 50 m
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let path = std::env::temp_dir().join("artillery-calculator-does-not-exist.toml");
        // SAFETY: ENV_LOCK is held.
        unsafe { std::env::set_var(CONFIG_PATH_VAR, &path) };

        let result = load_config();
        clear_env();

        assert!(result.is_err());
    }
}
