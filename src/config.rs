use crate::error::{PixmeshError, PixmeshResult};

/// Parameters of one projection pass.
///
/// The `scale_*` fields multiply the quad half-extent on the matching edge;
/// the `underlay_*` fields size the extension added to an edge when a depth
/// cliff is detected on that side. All eight live in `[0.01, 50.0]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub scale_left: f32,
    pub scale_right: f32,
    pub scale_up: f32,
    pub scale_down: f32,
    pub underlay_left: f32,
    pub underlay_right: f32,
    pub underlay_up: f32,
    pub underlay_down: f32,
    /// Minimum depth gap for a neighbor to count as a discontinuity.
    pub underlay_threshold: f32,
    /// Pixels at or beyond this depth produce no geometry.
    pub max_depth: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            scale_left: 1.0,
            scale_right: 1.0,
            scale_up: 1.0,
            scale_down: 1.0,
            underlay_left: 1.0,
            underlay_right: 1.0,
            underlay_up: 1.0,
            underlay_down: 1.0,
            underlay_threshold: 0.0005,
            max_depth: 65000.0,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> PixmeshResult<()> {
        let edges = [
            ("scale_left", self.scale_left),
            ("scale_right", self.scale_right),
            ("scale_up", self.scale_up),
            ("scale_down", self.scale_down),
            ("underlay_left", self.underlay_left),
            ("underlay_right", self.underlay_right),
            ("underlay_up", self.underlay_up),
            ("underlay_down", self.underlay_down),
        ];
        for (name, v) in edges {
            check_range(name, v, 0.01, 50.0)?;
        }
        if !self.underlay_threshold.is_finite() || self.underlay_threshold < 0.0 {
            return Err(PixmeshError::validation("underlay_threshold must be >= 0"));
        }
        if !self.max_depth.is_finite() || self.max_depth < 0.0 {
            return Err(PixmeshError::validation("max_depth must be >= 0"));
        }
        Ok(())
    }
}

fn check_range(name: &str, v: f32, min: f32, max: f32) -> PixmeshResult<()> {
    if !v.is_finite() || v < min || v > max {
        return Err(PixmeshError::validation(format!(
            "{name} must be within [{min}, {max}], got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ProjectionConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_scale() {
        let cfg = ProjectionConfig {
            scale_right: 0.0,
            ..ProjectionConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ProjectionConfig {
            underlay_up: 51.0,
            ..ProjectionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let cfg = ProjectionConfig {
            underlay_threshold: f32::NAN,
            ..ProjectionConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ProjectionConfig {
            max_depth: f32::INFINITY,
            ..ProjectionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ProjectionConfig =
            serde_json::from_str(r#"{"underlay_threshold": 0.25, "max_depth": 100.0}"#).unwrap();
        assert_eq!(cfg.underlay_threshold, 0.25);
        assert_eq!(cfg.max_depth, 100.0);
        assert_eq!(cfg.scale_left, 1.0);
        assert!(cfg.validate().is_ok());
    }
}
