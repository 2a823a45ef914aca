//! Render parameter assembly.
//!
//! Turns the session's [`DisplayOptions`] into one [`RenderParams`] snapshot
//! plus the per-frame target adjustments. Assembly runs once at open time;
//! any sub-feature that fails to build degrades to disabled with a
//! diagnostic and never aborts the rest of the configuration.

use tracing::error;

use opal_common::color::{ColorPrimaries, ColorRepr, ColorSpaceDesc, LightLevel, TransferFunction};
use opal_common::config::{CustomFilterOptions, DisplayOptions, LutMode};
use opal_common::gpu::{HookHandle, LutBinding, LutHandle, LutType, RenderBackend};
use opal_common::render::{
    ColorMapParams, DebandParams, DitherParams, FilterConfig, PeakDetectParams, RenderParams,
    ScalerPreset, SigmoidParams,
};

use crate::assets::AssetCache;

/// Target-side overrides applied to every frame's render target. Fields at
/// their `Unknown`/zero sentinel leave the source-inferred value untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TargetOverrides {
    pub primaries: ColorPrimaries,
    pub transfer: TransferFunction,
    pub sig_avg: f32,
    pub dither_depth: u32,
}

impl TargetOverrides {
    /// Apply the overrides to a frame's target colorimetry. Overriding the
    /// transfer function resets the light level so the engine re-infers it.
    pub fn apply(&self, color: &mut ColorSpaceDesc, repr: &mut ColorRepr) {
        if self.primaries != ColorPrimaries::Unknown {
            color.primaries = self.primaries;
        }
        if self.transfer != TransferFunction::Unknown {
            color.transfer = self.transfer;
            color.light = LightLevel::Unknown; // re-infer
        }
        if self.sig_avg > 0.0 {
            color.sig_avg = self.sig_avg;
        }
        if self.dither_depth > 0 {
            repr.bits.override_sample_depth(self.dither_depth);
        }
    }
}

/// The complete assembled configuration of a session.
#[derive(Clone, Debug)]
pub struct AssembledParams {
    pub render: RenderParams,
    pub target: TargetOverrides,
    /// Where the loaded LUT applies; `Decoding`/`Encoding` bind per-frame.
    pub lut_mode: LutMode,
}

/// Load the configured assets and compose the render configuration.
pub fn assemble(
    options: &DisplayOptions,
    gpu: &dyn RenderBackend,
    assets: &mut AssetCache,
) -> AssembledParams {
    assets.load_lut(gpu, options.lut_file.as_deref());
    assets.load_hook(gpu, options.shader_file.as_deref());
    compose(options, assets.lut(), assets.hook())
}

/// Pure composition step, separated from asset I/O for testability.
pub(crate) fn compose(
    options: &DisplayOptions,
    lut: Option<LutHandle>,
    hook: Option<HookHandle>,
) -> AssembledParams {
    let deband = DebandParams {
        iterations: options.deband_iterations,
        threshold: options.deband_threshold,
        radius: options.deband_radius,
        grain: options.deband_grain,
    };
    let use_deband = options.debanding && (deband.iterations > 0 || deband.grain > 0.0);

    let sigmoid = SigmoidParams {
        center: options.sigmoid_center,
        slope: options.sigmoid_slope,
    };

    let color_map = ColorMapParams {
        intent: options.intent,
        tone_mapping: options.tone_mapping,
        tone_mapping_param: options.tone_mapping_param,
        desaturation_strength: options.desat_strength,
        desaturation_exponent: options.desat_exponent,
        desaturation_base: options.desat_base,
        max_boost: options.max_boost,
        gamut_clipping: options.gamut_clipping,
        gamut_warning: options.gamut_warning,
    };

    let dither = options.dither_method.map(|method| DitherParams {
        method,
        lut_size: options.dither_lut_size,
        temporal: options.temporal_dither,
    });

    let peak_active = options.peak_period > 0.0;
    let peak_detect = peak_active.then(|| PeakDetectParams {
        smoothing_period: options.peak_period,
        scene_threshold_low: options.scene_threshold_low,
        scene_threshold_high: options.scene_threshold_high,
    });

    let render = RenderParams {
        deband: use_deband.then_some(deband),
        sigmoid: options.sigmoid.then_some(sigmoid),
        color_map,
        dither,
        peak_detect,
        allow_delayed_peak: peak_active && options.delayed_peak,
        upscaler: scaler_config(
            options.upscaler_preset,
            &options.upscaler_custom,
            "upscaler",
        ),
        downscaler: scaler_config(
            options.downscaler_preset,
            &options.downscaler_custom,
            "downscaler",
        ),
        lut_entries: options.lut_entries,
        antiringing_strength: options.antiringing,
        skip_anti_aliasing: options.skip_anti_aliasing,
        polar_cutoff: options.polar_cutoff,
        disable_overlay_sampling: options.overlay_direct,
        disable_linear_scaling: options.disable_linear,
        disable_builtin_scalers: options.force_general,
        lut: lut.and_then(|lut| {
            let kind = match options.lut_mode {
                LutMode::Native => LutType::Native,
                LutMode::Normalized => LutType::Normalized,
                LutMode::Conversion => LutType::Conversion,
                // Disabled, or applied to the image/target per frame instead.
                _ => return None,
            };
            Some(LutBinding { lut, kind })
        }),
        hooks: hook.into_iter().collect(),
    };

    AssembledParams {
        render,
        target: TargetOverrides {
            primaries: options.target_primaries,
            transfer: options.target_transfer,
            sig_avg: options.target_avg,
            dither_depth: options.dither_depth,
        },
        lut_mode: options.lut_mode,
    }
}

/// Resolve a scaler preset, composing the custom filter when selected. An
/// invalid custom selection (no kernel) degrades to the engine default.
fn scaler_config(
    preset: ScalerPreset,
    custom: &CustomFilterOptions,
    which: &str,
) -> Option<FilterConfig> {
    match preset {
        ScalerPreset::Custom => match custom.kernel {
            Some(kernel) => Some(FilterConfig {
                kernel,
                window: custom.window,
                clamp: custom.clamp,
                blur: custom.blur,
                taper: custom.taper,
                polar: custom.polar,
            }),
            None => {
                error!(scaler = which, "Custom scaler configured with no kernel");
                None
            }
        },
        preset => preset.config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opal_common::color::BitEncoding;
    use opal_common::render::{DitherMethod, FilterKernel};

    #[test]
    fn deband_requires_flag_and_effect() {
        let mut options = DisplayOptions {
            debanding: true,
            ..Default::default()
        };
        assert!(compose(&options, None, None).render.deband.is_some());

        // Enabled but with nothing to do: stays off.
        options.deband_iterations = 0;
        options.deband_grain = 0.0;
        assert!(compose(&options, None, None).render.deband.is_none());

        // Grain alone re-activates it.
        options.deband_grain = 4.0;
        assert!(compose(&options, None, None).render.deband.is_some());

        // Without the flag the effect parameters are irrelevant.
        options.debanding = false;
        options.deband_iterations = 3;
        assert!(compose(&options, None, None).render.deband.is_none());
    }

    #[test]
    fn sigmoid_flag_is_independent() {
        let mut options = DisplayOptions {
            debanding: false,
            sigmoid: true,
            ..Default::default()
        };
        assert!(compose(&options, None, None).render.sigmoid.is_some());
        options.sigmoid = false;
        assert!(compose(&options, None, None).render.sigmoid.is_none());
    }

    #[test]
    fn dither_follows_method_selector() {
        let mut options = DisplayOptions::default();
        assert!(compose(&options, None, None).render.dither.is_none());

        options.dither_method = Some(DitherMethod::OrderedLut);
        options.temporal_dither = true;
        let dither = compose(&options, None, None).render.dither.unwrap();
        assert_eq!(dither.method, DitherMethod::OrderedLut);
        assert!(dither.temporal);
    }

    #[test]
    fn peak_detection_gates_on_period() {
        let mut options = DisplayOptions {
            delayed_peak: true,
            ..Default::default()
        };
        let params = compose(&options, None, None).render;
        assert!(params.peak_detect.is_some());
        assert!(params.allow_delayed_peak);

        options.peak_period = 0.0;
        let params = compose(&options, None, None).render;
        assert!(params.peak_detect.is_none());
        // The delayed flag is only meaningful while detection is active.
        assert!(!params.allow_delayed_peak);
    }

    #[test]
    fn custom_scaler_composes_filter() {
        let options = DisplayOptions {
            upscaler_preset: ScalerPreset::Custom,
            upscaler_custom: CustomFilterOptions {
                kernel: Some(FilterKernel::Gaussian),
                window: Some(FilterKernel::Hann),
                clamp: 0.5,
                blur: 1.2,
                taper: 0.1,
                polar: true,
            },
            ..Default::default()
        };
        let upscaler = compose(&options, None, None).render.upscaler.unwrap();
        assert_eq!(upscaler.kernel, FilterKernel::Gaussian);
        assert_eq!(upscaler.window, Some(FilterKernel::Hann));
        assert!(upscaler.polar);
    }

    #[test]
    fn custom_scaler_without_kernel_degrades_to_default() {
        let options = DisplayOptions {
            downscaler_preset: ScalerPreset::Custom,
            downscaler_custom: CustomFilterOptions {
                kernel: None,
                ..Default::default()
            },
            ..Default::default()
        };
        let params = compose(&options, None, None).render;
        assert!(params.downscaler.is_none());
    }

    #[test]
    fn lut_binds_in_pipeline_modes_only() {
        let lut = LutHandle(11);
        for (mode, kind) in [
            (LutMode::Native, Some(LutType::Native)),
            (LutMode::Normalized, Some(LutType::Normalized)),
            (LutMode::Conversion, Some(LutType::Conversion)),
            (LutMode::Decoding, None),
            (LutMode::Encoding, None),
            (LutMode::Disabled, None),
        ] {
            let options = DisplayOptions {
                lut_mode: mode,
                ..Default::default()
            };
            let assembled = compose(&options, Some(lut), None);
            assert_eq!(assembled.render.lut.map(|b| b.kind), kind, "mode {mode:?}");
            assert_eq!(assembled.lut_mode, mode);
        }
    }

    #[test]
    fn hook_attaches_when_loaded() {
        let options = DisplayOptions::default();
        let params = compose(&options, None, Some(HookHandle(3))).render;
        assert_eq!(params.hooks, vec![HookHandle(3)]);
        assert!(compose(&options, None, None).render.hooks.is_empty());
    }

    #[test]
    fn target_overrides_leave_unset_fields_alone() {
        let overrides = TargetOverrides::default();
        let mut color = ColorSpaceDesc {
            primaries: ColorPrimaries::Bt709,
            transfer: TransferFunction::Srgb,
            light: LightLevel::Display,
            sig_peak: 1.0,
            sig_avg: 0.2,
        };
        let mut repr = ColorRepr::default();
        let (before_color, before_repr) = (color, repr);
        overrides.apply(&mut color, &mut repr);
        assert_eq!(color, before_color);
        assert_eq!(repr, before_repr);
    }

    #[test]
    fn transfer_override_resets_light_level() {
        let overrides = TargetOverrides {
            transfer: TransferFunction::Pq,
            ..Default::default()
        };
        let mut color = ColorSpaceDesc {
            light: LightLevel::Display,
            ..Default::default()
        };
        let mut repr = ColorRepr::default();
        overrides.apply(&mut color, &mut repr);
        assert_eq!(color.transfer, TransferFunction::Pq);
        assert_eq!(color.light, LightLevel::Unknown);
    }

    #[test]
    fn dither_depth_override_preserves_depth_ratio() {
        let overrides = TargetOverrides {
            dither_depth: 8,
            ..Default::default()
        };
        let mut color = ColorSpaceDesc::default();
        let mut repr = ColorRepr {
            bits: BitEncoding {
                color_depth: 10,
                sample_depth: 10,
                bit_shift: 0,
            },
            ..Default::default()
        };
        overrides.apply(&mut color, &mut repr);
        assert_eq!(repr.bits.color_depth, 8);
        assert_eq!(repr.bits.sample_depth, 8);
    }
}
