//! Session configuration — the fixed set of tunables read once at open time.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::{ColorPrimaries, TransferFunction};
use crate::render::{DitherMethod, FilterKernel, RenderIntent, ScalerPreset, ToneMapping};

/// Where in the pipeline a custom LUT is applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LutMode {
    #[default]
    Disabled,
    /// Applied in the image's native colorspace.
    Native,
    /// Applied on normalized linear values.
    Normalized,
    /// Replaces the color conversion step.
    Conversion,
    /// Applied to the source image before color conversion.
    Decoding,
    /// Applied to the render target after color conversion.
    Encoding,
}

/// Tunables composing a custom scaler filter, used when the matching preset
/// is [`ScalerPreset::Custom`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomFilterOptions {
    /// `None` is an invalid selection and degrades the scaler to the engine
    /// default with a diagnostic.
    pub kernel: Option<FilterKernel>,
    pub window: Option<FilterKernel>,
    pub clamp: f32,
    pub blur: f32,
    pub taper: f32,
    pub polar: bool,
}

impl Default for CustomFilterOptions {
    fn default() -> Self {
        Self {
            kernel: Some(FilterKernel::Box),
            window: None,
            clamp: 0.0,
            blur: 1.0,
            taper: 0.0,
            polar: false,
        }
    }
}

/// All rendering tunables of a display session. Read once at open; changing
/// them afterwards requires a new session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    // Debanding
    pub debanding: bool,
    pub deband_iterations: u32,
    pub deband_threshold: f32,
    pub deband_radius: f32,
    pub deband_grain: f32,

    // Sigmoidization
    pub sigmoid: bool,
    pub sigmoid_center: f32,
    pub sigmoid_slope: f32,

    // Color mapping / tone mapping
    pub intent: RenderIntent,
    pub tone_mapping: ToneMapping,
    pub tone_mapping_param: f32,
    pub desat_strength: f32,
    pub desat_exponent: f32,
    pub desat_base: f32,
    pub max_boost: f32,
    pub gamut_clipping: bool,
    pub gamut_warning: bool,

    // HDR peak detection
    pub peak_period: f32,
    pub scene_threshold_low: f32,
    pub scene_threshold_high: f32,
    pub delayed_peak: bool,

    // Target colorimetry override (Unknown / 0.0 = leave source-inferred)
    pub target_primaries: ColorPrimaries,
    pub target_transfer: TransferFunction,
    pub target_avg: f32,

    // Dithering (`None` = off)
    pub dither_method: Option<DitherMethod>,
    pub dither_lut_size: u32,
    pub temporal_dither: bool,
    /// Override of the target sample depth (0 = off).
    pub dither_depth: u32,

    // Custom LUT
    pub lut_file: Option<PathBuf>,
    pub lut_mode: LutMode,

    // Custom shader hook
    pub shader_file: Option<PathBuf>,

    // Scaling
    pub upscaler_preset: ScalerPreset,
    pub downscaler_preset: ScalerPreset,
    pub upscaler_custom: CustomFilterOptions,
    pub downscaler_custom: CustomFilterOptions,
    pub lut_entries: u32,
    pub antiringing: f32,

    // Performance tweaks / debugging
    pub skip_anti_aliasing: bool,
    pub polar_cutoff: f32,
    pub overlay_direct: bool,
    pub disable_linear: bool,
    pub force_general: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            debanding: false,
            deband_iterations: 1,
            deband_threshold: 4.0,
            deband_radius: 16.0,
            deband_grain: 6.0,

            sigmoid: true,
            sigmoid_center: 0.75,
            sigmoid_slope: 6.5,

            intent: RenderIntent::RelativeColorimetric,
            tone_mapping: ToneMapping::Bt2390,
            tone_mapping_param: 0.0,
            desat_strength: 0.75,
            desat_exponent: 1.5,
            desat_base: 0.18,
            max_boost: 1.0,
            gamut_clipping: false,
            gamut_warning: false,

            peak_period: 100.0,
            scene_threshold_low: 5.5,
            scene_threshold_high: 10.0,
            delayed_peak: false,

            target_primaries: ColorPrimaries::Unknown,
            target_transfer: TransferFunction::Unknown,
            target_avg: 0.0,

            dither_method: None,
            dither_lut_size: 6,
            temporal_dither: false,
            dither_depth: 0,

            lut_file: None,
            lut_mode: LutMode::Disabled,

            shader_file: None,

            upscaler_preset: ScalerPreset::Builtin,
            downscaler_preset: ScalerPreset::Builtin,
            upscaler_custom: CustomFilterOptions::default(),
            downscaler_custom: CustomFilterOptions::default(),
            lut_entries: 64,
            antiringing: 0.0,

            skip_anti_aliasing: false,
            polar_cutoff: 0.001,
            overlay_direct: false,
            disable_linear: false,
            force_general: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_overrides_unset() {
        let opts = DisplayOptions::default();
        assert_eq!(opts.target_primaries, ColorPrimaries::Unknown);
        assert_eq!(opts.target_transfer, TransferFunction::Unknown);
        assert_eq!(opts.target_avg, 0.0);
        assert_eq!(opts.dither_depth, 0);
        assert!(opts.dither_method.is_none());
        assert!(opts.lut_file.is_none());
        assert!(opts.shader_file.is_none());
    }

    #[test]
    fn default_custom_filter_has_a_kernel() {
        let custom = CustomFilterOptions::default();
        assert_eq!(custom.kernel, Some(FilterKernel::Box));
        assert!(custom.window.is_none());
    }
}
