//! Table layout configuration
//!
//! The web front end starts from the default layout; the native runner can
//! also read one from a JSON file.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BACKGROUND, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::error::ConfigError;
pub use crate::sim::state::BodySpec;
use crate::sim::state::{Bound, Color, Table};

/// Surface size, felt color and starting bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub width: f32,
    pub height: f32,
    /// CSS color for the table background
    #[serde(default = "default_background")]
    pub background: String,
    pub bodies: Vec<BodySpec>,
}

fn default_background() -> String {
    BACKGROUND.to_string()
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
            background: default_background(),
            bodies: vec![
                BodySpec::new(100.0, 120.0, 20.0, Color::Red),
                BodySpec::new(230.0, 190.0, 25.0, Color::Blue),
                BodySpec::new(464.0, 260.0, 30.0, Color::Yellow),
            ],
        }
    }
}

impl TableConfig {
    pub fn bound(&self) -> Bound {
        Bound::new(self.width, self.height)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the layout before any body is built from it
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::InvalidSurface {
                width: self.width,
                height: self.height,
            });
        }
        if self.bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }

        let bound = self.bound();
        for (index, spec) in self.bodies.iter().enumerate() {
            if !positive(spec.radius) {
                return Err(ConfigError::InvalidRadius {
                    index,
                    radius: spec.radius,
                });
            }
            let inside = spec.x.is_finite()
                && spec.y.is_finite()
                && spec.x - spec.radius >= 0.0
                && spec.x + spec.radius <= bound.width
                && spec.y - spec.radius >= 0.0
                && spec.y + spec.radius <= bound.height;
            if !inside {
                return Err(ConfigError::OutOfBounds { index });
            }
        }
        Ok(())
    }

    /// Validate and build a resting table
    pub fn build(&self) -> Result<Table, ConfigError> {
        self.validate()?;

        let mut table = Table::new(self.bound());
        for spec in &self.bodies {
            table.add_body(Vec2::new(spec.x, spec.y), spec.radius, spec.color);
        }

        log::info!(
            "Table built: {} bodies on {}x{}",
            table.len(),
            self.width,
            self.height
        );
        Ok(table)
    }

    /// Read a layout file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BodyId;

    #[test]
    fn test_default_layout_builds() {
        let table = TableConfig::default().build().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.bound, Bound::new(800.0, 400.0));

        let yellow = table.get(BodyId(2)).unwrap();
        assert_eq!(yellow.pos, Vec2::new(464.0, 260.0));
        assert_eq!(yellow.radius, 30.0);
        assert_eq!(yellow.color, Color::Yellow);
        assert!(table.iter().all(|b| b.vel == Vec2::ZERO));
    }

    #[test]
    fn test_json_round_trip_and_default_background() {
        let json = r#"{
            "width": 300,
            "height": 200,
            "bodies": [ { "x": 50, "y": 50, "radius": 10, "color": "blue" } ]
        }"#;
        let config = TableConfig::from_json(json).unwrap();
        assert_eq!(config.background, "#008000");
        assert_eq!(config.bodies[0].color, Color::Blue);

        let again = TableConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn test_rejects_bad_radius() {
        let mut config = TableConfig::default();
        config.bodies[1].radius = 0.0;
        assert!(matches!(
            config.build(),
            Err(ConfigError::InvalidRadius { index: 1, .. })
        ));

        config.bodies[1].radius = -4.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRadius { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_body_outside_surface() {
        let mut config = TableConfig::default();
        config.bodies[0].x = 5.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfBounds { index: 0 })
        ));
    }

    #[test]
    fn test_rejects_empty_and_degenerate_surface() {
        let mut config = TableConfig::default();
        config.bodies.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoBodies)));

        let config = TableConfig {
            width: 0.0,
            ..TableConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSurface { .. })
        ));
    }

    #[test]
    fn test_unknown_color_is_a_json_error() {
        let json = r#"{ "width": 300, "height": 200,
            "bodies": [ { "x": 50, "y": 50, "radius": 10, "color": "green" } ] }"#;
        assert!(matches!(
            TableConfig::from_json(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_path() {
        let path = std::env::temp_dir().join(format!("billiards-layout-{}.json", std::process::id()));
        std::fs::write(&path, TableConfig::default().to_json().unwrap()).unwrap();

        let loaded = TableConfig::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, TableConfig::default());

        assert!(matches!(
            TableConfig::load_from_path(&path),
            Err(ConfigError::Io(_))
        ));
    }
}
