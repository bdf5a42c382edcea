use crate::error::{ChartError, ChartResult};

use super::ChartConfig;

pub(super) fn validate_chart_config(config: &ChartConfig) -> ChartResult<()> {
    config.layout.validate()?;

    let durations = [
        ("axis.animation_ms", config.axis.animation_ms),
        ("axis.debounce_ms", config.axis.debounce_ms),
        ("axis.gridline_fade_ms", config.axis.gridline_fade_ms),
        ("labels.crossfade_ms", config.labels.crossfade_ms),
        ("gesture.selection_hold_ms", config.gesture.selection_hold_ms),
        ("picker.bounds_animation_ms", config.picker.bounds_animation_ms),
        ("fades.toggle_fade_ms", config.fades.toggle_fade_ms),
        ("fades.legend_fade_ms", config.fades.legend_fade_ms),
    ];
    for (name, value) in durations {
        validate_positive_millis(name, value)?;
    }

    let pixels = [
        ("axis.label_text_px", config.axis.label_text_px),
        ("gesture.handle_capture_width_px", config.gesture.handle_capture_width_px),
        ("gesture.touch_slop_px", config.gesture.touch_slop_px),
    ];
    for (name, value) in pixels {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "{name} must be finite and > 0"
            )));
        }
    }

    if !config.labels.edge_offset_px.is_finite() || config.labels.edge_offset_px < 0.0 {
        return Err(ChartError::InvalidConfig(
            "labels.edge_offset_px must be finite and >= 0".to_owned(),
        ));
    }
    if config.axis.gridline_intervals == 0 {
        return Err(ChartError::InvalidConfig(
            "axis.gridline_intervals must be >= 1".to_owned(),
        ));
    }
    if config.labels.label_count == 0 {
        return Err(ChartError::InvalidConfig(
            "labels.label_count must be >= 1".to_owned(),
        ));
    }
    if !config.labels.hysteresis.is_finite() || !(0.0..1.0).contains(&config.labels.hysteresis) {
        return Err(ChartError::InvalidConfig(
            "labels.hysteresis must be within [0, 1)".to_owned(),
        ));
    }

    let floor = config.picker.min_distance_floor;
    if !floor.is_finite() || floor <= 0.0 || floor > 1.0 {
        return Err(ChartError::InvalidConfig(
            "picker.min_distance_floor must be within (0, 1]".to_owned(),
        ));
    }
    Ok(())
}

fn validate_positive_millis(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::api::ChartConfig;
    use crate::error::ChartError;

    #[test]
    fn default_config_is_valid() {
        ChartConfig::default().validate().expect("defaults");
    }

    #[test]
    fn negative_duration_fails_fast() {
        let mut config = ChartConfig::default();
        config.axis.debounce_ms = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ChartError::InvalidConfig(message)) if message.contains("debounce")
        ));
    }
}
