// --- File: config.rs ---
use crate::behavior::{Behavior, CohesionTarget, FlockingGains};
use crate::constants::{
    DEFAULT_SAND_HEIGHT, DEFAULT_TANK_HEIGHT, DEFAULT_TANK_WIDTH, DEFAULT_WATER_QUALITY,
    SECONDS_PER_YEAR,
};
use crate::error::ConfigError;
use crate::tank::Tank;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Body extent in logical units. Width runs nose to tail.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodySize {
    pub width: f32,
    pub height: f32,
}

impl BodySize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Linear interpolation between `min` and `max`. `ratio` is not clamped, so
    /// ratios above 1 extrapolate past `max`.
    pub fn lerp(min: BodySize, max: BodySize, ratio: f32) -> BodySize {
        BodySize {
            width: min.width + (max.width - min.width) * ratio,
            height: min.height + (max.height - min.height) * ratio,
        }
    }
}

/// Pixel rectangle of the species' sprite inside its source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpriteRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl SpriteRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Per-species constants. Built once, shared behind an `Arc`, never mutated by
/// the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesConfig {
    pub name: String,
    pub max_velocity: f32,
    pub max_acceleration: f32,
    pub detection_range: f32,
    pub kp_chase_food: f32,
    pub cruising_speed: f32,
    pub kp_cruising: f32,
    pub kp_escape: f32,
    pub min_size: BodySize,
    pub max_size: BodySize,
    /// Food items needed to grow from `min_size` to `max_size`.
    pub food_required: u32,
    pub lifespan_secs: f64,
    pub sprite: SpriteRect,
    pub behavior: Behavior,
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self {
            name: String::from("neon_tetra"),
            max_velocity: 280.0,
            max_acceleration: 470.0,
            detection_range: 200.0,
            kp_chase_food: 3.0,
            cruising_speed: 40.0,
            kp_cruising: 0.6,
            kp_escape: 0.01,
            min_size: BodySize::new(18.0, 10.0),
            max_size: BodySize::new(35.0, 19.0),
            food_required: 1500,
            lifespan_secs: SECONDS_PER_YEAR * 1.5,
            sprite: SpriteRect::new(3, 8, 29, 22),
            behavior: Behavior::Schooling(FlockingGains {
                separation_distance: 40.0,
                kp_separation: 0.1,
                kp_alignment: 0.05,
                kp_cohesion: 0.05,
                cohesion_target: CohesionTarget::NearestNeighbour,
            }),
        }
    }
}

impl SpeciesConfig {
    // --- Shipped species ---

    pub fn neon_tetra() -> Self {
        Self::default()
    }

    pub fn cardinal_tetra() -> Self {
        let mut species = Self::default();
        species.name = String::from("cardinal_tetra");
        species.max_velocity = 330.0;
        species.min_size = BodySize::new(18.0, 9.0);
        species.max_size = BodySize::new(45.0, 23.0);
        species.cruising_speed = 50.0;
        species.kp_cruising = 1.0;
        species.lifespan_secs = SECONDS_PER_YEAR * 3.0;
        species.sprite = SpriteRect::new(2, 8, 30, 22);
        species.behavior = Behavior::Schooling(FlockingGains {
            separation_distance: 45.0,
            kp_separation: 1.0,
            kp_alignment: 1.0,
            kp_cohesion: 0.6,
            cohesion_target: CohesionTarget::NearestNeighbour,
        });
        species
    }

    pub fn black_neon_tetra() -> Self {
        let mut species = Self::cardinal_tetra();
        species.name = String::from("black_neon_tetra");
        species.max_velocity = 280.0;
        species.max_size = BodySize::new(40.0, 20.0);
        species
    }

    pub fn albino_neon_tetra() -> Self {
        let mut species = Self::neon_tetra();
        species.name = String::from("albino_neon_tetra");
        species
    }

    pub fn shipped() -> Vec<Self> {
        vec![
            Self::neon_tetra(),
            Self::cardinal_tetra(),
            Self::black_neon_tetra(),
            Self::albino_neon_tetra(),
        ]
    }

    /// Rejects constants that would divide by zero or never converge.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::UnnamedSpecies);
        }
        let positive: [(&'static str, f64); 8] = [
            ("max_velocity", self.max_velocity as f64),
            ("max_acceleration", self.max_acceleration as f64),
            ("food_required", self.food_required as f64),
            ("lifespan_secs", self.lifespan_secs),
            ("min_size.width", self.min_size.width as f64),
            ("min_size.height", self.min_size.height as f64),
            ("max_size.width", self.max_size.width as f64),
            ("max_size.height", self.max_size.height as f64),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(self.non_positive(field, value));
            }
        }
        let non_negative: [(&'static str, f32); 5] = [
            ("detection_range", self.detection_range),
            ("kp_chase_food", self.kp_chase_food),
            ("cruising_speed", self.cruising_speed),
            ("kp_cruising", self.kp_cruising),
            ("kp_escape", self.kp_escape),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative {
                    species: self.name.clone(),
                    field,
                    value: value as f64,
                });
            }
        }
        if self.max_size.width < self.min_size.width || self.max_size.height < self.min_size.height
        {
            return Err(ConfigError::InvertedSize {
                species: self.name.clone(),
                min_width: self.min_size.width,
                min_height: self.min_size.height,
                max_width: self.max_size.width,
                max_height: self.max_size.height,
            });
        }
        self.behavior.validate(&self.name)
    }

    fn non_positive(&self, field: &'static str, value: f64) -> ConfigError {
        ConfigError::NonPositive {
            species: self.name.clone(),
            field,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankConfig {
    pub width: f32,
    pub height: f32,
    pub sand_height: f32,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_TANK_WIDTH,
            height: DEFAULT_TANK_HEIGHT,
            sand_height: DEFAULT_SAND_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationEntry {
    pub species: String,
    pub count: usize,
}

impl PopulationEntry {
    pub fn new(species: impl Into<String>, count: usize) -> Self {
        Self {
            species: species.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tank: TankConfig,
    pub water_quality: f32,
    pub species: Vec<SpeciesConfig>,
    pub population: Vec<PopulationEntry>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self {
            tank: TankConfig::default(),
            water_quality: DEFAULT_WATER_QUALITY,
            species: SpeciesConfig::shipped(),
            // Albino tetras ship but are not seeded.
            population: vec![
                PopulationEntry::new("neon_tetra", 5),
                PopulationEntry::new("cardinal_tetra", 5),
                PopulationEntry::new("black_neon_tetra", 5),
            ],
        }
    }

    /// Load configuration from a TOML file. Missing keys fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded config from {} ({} species, {} population entries)",
            path.display(),
            config.species.len(),
            config.population.len()
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Tank::from_config(&self.tank)?;
        if !(0.0..=1.0).contains(&self.water_quality) {
            return Err(ConfigError::InvalidWaterQuality(self.water_quality));
        }

        let mut names = HashSet::with_capacity(self.species.len());
        for species in &self.species {
            species.validate()?;
            if !names.insert(species.name.as_str()) {
                return Err(ConfigError::DuplicateSpecies(species.name.clone()));
            }
        }
        for entry in &self.population {
            if !names.contains(entry.species.as_str()) {
                return Err(ConfigError::UnknownSpecies(entry.species.clone()));
            }
        }
        Ok(())
    }

    pub fn species(&self, name: &str) -> Option<&SpeciesConfig> {
        self.species.iter().find(|species| species.name == name)
    }

    /// Shared handles for every configured species, in declaration order.
    pub fn shared_species(&self) -> Vec<Arc<SpeciesConfig>> {
        self.species.iter().cloned().map(Arc::new).collect()
    }
}
// --- End of File: config.rs ---
