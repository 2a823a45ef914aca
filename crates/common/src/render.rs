//! Render-parameter types consumed by the render backend.
//!
//! These mirror the rendering engine's tunable sub-configurations. An absent
//! (`None`) sub-configuration means the feature is disabled or left at the
//! engine's built-in default; the parameter assembler in `opal-display`
//! decides activation from the session options.

use serde::{Deserialize, Serialize};

use crate::gpu::{HookHandle, LutBinding};

/// Debanding parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DebandParams {
    pub iterations: u32,
    pub threshold: f32,
    pub radius: f32,
    pub grain: f32,
}

impl Default for DebandParams {
    fn default() -> Self {
        Self {
            iterations: 1,
            threshold: 4.0,
            radius: 16.0,
            grain: 6.0,
        }
    }
}

/// Sigmoidal contrast curve applied around linear-light scaling.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SigmoidParams {
    pub center: f32,
    pub slope: f32,
}

impl Default for SigmoidParams {
    fn default() -> Self {
        Self {
            center: 0.75,
            slope: 6.5,
        }
    }
}

/// Gamut mapping intent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderIntent {
    Perceptual,
    #[default]
    RelativeColorimetric,
    Saturation,
    AbsoluteColorimetric,
}

/// Tone mapping curve for out-of-range source material.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneMapping {
    Clip,
    Mobius,
    Reinhard,
    Hable,
    Gamma,
    Linear,
    #[default]
    Bt2390,
}

/// Color mapping and tone mapping parameters. Always present; the engine
/// default values are the struct defaults.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorMapParams {
    pub intent: RenderIntent,
    pub tone_mapping: ToneMapping,
    /// Curve-specific parameter (0.0 = curve default).
    pub tone_mapping_param: f32,
    pub desaturation_strength: f32,
    pub desaturation_exponent: f32,
    pub desaturation_base: f32,
    pub max_boost: f32,
    pub gamut_clipping: bool,
    pub gamut_warning: bool,
}

impl Default for ColorMapParams {
    fn default() -> Self {
        Self {
            intent: RenderIntent::RelativeColorimetric,
            tone_mapping: ToneMapping::Bt2390,
            tone_mapping_param: 0.0,
            desaturation_strength: 0.75,
            desaturation_exponent: 1.5,
            desaturation_base: 0.18,
            max_boost: 1.0,
            gamut_clipping: false,
            gamut_warning: false,
        }
    }
}

/// Dithering algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DitherMethod {
    #[default]
    BlueNoise,
    OrderedLut,
    OrderedFixed,
    WhiteNoise,
}

/// Dithering parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DitherParams {
    pub method: DitherMethod,
    /// Size of the dither matrix as a power of two.
    pub lut_size: u32,
    pub temporal: bool,
}

impl Default for DitherParams {
    fn default() -> Self {
        Self {
            method: DitherMethod::BlueNoise,
            lut_size: 6,
            temporal: false,
        }
    }
}

/// HDR peak detection parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakDetectParams {
    /// Smoothing period in frames. Zero disables detection.
    pub smoothing_period: f32,
    pub scene_threshold_low: f32,
    pub scene_threshold_high: f32,
}

impl Default for PeakDetectParams {
    fn default() -> Self {
        Self {
            smoothing_period: 100.0,
            scene_threshold_low: 5.5,
            scene_threshold_high: 10.0,
        }
    }
}

/// Filter kernel functions recognized by the rendering engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKernel {
    Box,
    Triangle,
    Cosine,
    Hann,
    Hamming,
    Welch,
    Kaiser,
    Blackman,
    Gaussian,
    Sinc,
    Jinc,
    Sphinx,
    Bicubic,
    CatmullRom,
    Mitchell,
    Robidoux,
    RobidouxSharp,
    Spline16,
    Spline36,
    Spline64,
}

/// A fully specified scaler filter.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub kernel: FilterKernel,
    pub window: Option<FilterKernel>,
    /// Anti-ringing clamp (0.0 = off, 1.0 = full).
    pub clamp: f32,
    /// Blur/sharpen factor (1.0 = neutral).
    pub blur: f32,
    /// Flat tapering of the kernel center.
    pub taper: f32,
    /// Sample in a polar (elliptical) pattern instead of separably.
    pub polar: bool,
}

impl FilterConfig {
    /// A plain separable filter with the given kernel and neutral tuning.
    pub fn with_kernel(kernel: FilterKernel) -> Self {
        Self {
            kernel,
            window: None,
            clamp: 0.0,
            blur: 1.0,
            taper: 0.0,
            polar: false,
        }
    }
}

/// Named scaler presets selectable from configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalerPreset {
    /// Leave the scaler at the engine's built-in default.
    #[default]
    Builtin,
    Nearest,
    Bilinear,
    Spline16,
    Spline36,
    Spline64,
    Lanczos,
    EwaLanczos,
    Bicubic,
    CatmullRom,
    Mitchell,
    Robidoux,
    RobidouxSharp,
    /// Compose the filter from the individual custom-filter tunables.
    Custom,
}

impl ScalerPreset {
    /// The filter this preset stands for, or `None` for [`Builtin`] and
    /// [`Custom`] (the latter is composed by the parameter assembler).
    ///
    /// [`Builtin`]: ScalerPreset::Builtin
    /// [`Custom`]: ScalerPreset::Custom
    pub fn config(self) -> Option<FilterConfig> {
        let cfg = match self {
            Self::Builtin | Self::Custom => return None,
            Self::Nearest => FilterConfig::with_kernel(FilterKernel::Box),
            Self::Bilinear => FilterConfig::with_kernel(FilterKernel::Triangle),
            Self::Spline16 => FilterConfig::with_kernel(FilterKernel::Spline16),
            Self::Spline36 => FilterConfig::with_kernel(FilterKernel::Spline36),
            Self::Spline64 => FilterConfig::with_kernel(FilterKernel::Spline64),
            Self::Lanczos => FilterConfig {
                window: Some(FilterKernel::Sinc),
                ..FilterConfig::with_kernel(FilterKernel::Sinc)
            },
            Self::EwaLanczos => FilterConfig {
                window: Some(FilterKernel::Jinc),
                polar: true,
                ..FilterConfig::with_kernel(FilterKernel::Jinc)
            },
            Self::Bicubic => FilterConfig::with_kernel(FilterKernel::Bicubic),
            Self::CatmullRom => FilterConfig::with_kernel(FilterKernel::CatmullRom),
            Self::Mitchell => FilterConfig::with_kernel(FilterKernel::Mitchell),
            Self::Robidoux => FilterConfig::with_kernel(FilterKernel::Robidoux),
            Self::RobidouxSharp => FilterConfig::with_kernel(FilterKernel::RobidouxSharp),
        };
        Some(cfg)
    }
}

/// The complete per-session render configuration, composed once at open time
/// and applied unchanged on every frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderParams {
    pub deband: Option<DebandParams>,
    pub sigmoid: Option<SigmoidParams>,
    pub color_map: ColorMapParams,
    pub dither: Option<DitherParams>,
    pub peak_detect: Option<PeakDetectParams>,
    pub allow_delayed_peak: bool,
    /// `None` = engine default scaler.
    pub upscaler: Option<FilterConfig>,
    pub downscaler: Option<FilterConfig>,
    /// Precision of the scaler LUTs.
    pub lut_entries: u32,
    pub antiringing_strength: f32,
    pub skip_anti_aliasing: bool,
    /// Cutoff threshold below which polar filter taps are skipped.
    pub polar_cutoff: f32,
    pub disable_overlay_sampling: bool,
    pub disable_linear_scaling: bool,
    pub disable_builtin_scalers: bool,
    /// Color LUT applied inside the rendering pipeline (Native, Normalized
    /// and Conversion modes). Decoding/Encoding modes bind per-frame instead.
    pub lut: Option<LutBinding>,
    /// Custom shader hooks, applied in order.
    pub hooks: Vec<HookHandle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_and_custom_have_no_table_entry() {
        assert!(ScalerPreset::Builtin.config().is_none());
        assert!(ScalerPreset::Custom.config().is_none());
    }

    #[test]
    fn named_presets_resolve() {
        let lanczos = ScalerPreset::Lanczos.config().unwrap();
        assert_eq!(lanczos.kernel, FilterKernel::Sinc);
        assert_eq!(lanczos.window, Some(FilterKernel::Sinc));
        assert!(!lanczos.polar);

        let ewa = ScalerPreset::EwaLanczos.config().unwrap();
        assert!(ewa.polar);
    }

    #[test]
    fn default_params_disable_optional_features() {
        let params = RenderParams::default();
        assert!(params.deband.is_none());
        assert!(params.sigmoid.is_none());
        assert!(params.dither.is_none());
        assert!(params.peak_detect.is_none());
        assert!(params.lut.is_none());
        assert!(params.hooks.is_empty());
    }
}
