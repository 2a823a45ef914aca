//! Path-cached LUT and shader-hook loading.
//!
//! Assets are identified by their source file path. Re-loading the same path
//! is a no-op — including after a failed load, so a broken file is not
//! re-parsed every frame the configuration is re-applied. An empty or absent
//! path releases the loaded asset.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use opal_common::error::AssetError;
use opal_common::gpu::{HookHandle, LutHandle, RenderBackend};

/// Session-owned LUT and shader-hook assets.
#[derive(Debug, Default)]
pub struct AssetCache {
    lut: Option<LutHandle>,
    lut_path: Option<PathBuf>,
    hook: Option<HookHandle>,
    hook_path: Option<PathBuf>,
}

fn wanted(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently loaded LUT, if any.
    pub fn lut(&self) -> Option<LutHandle> {
        self.lut
    }

    /// The currently loaded shader hook, if any.
    pub fn hook(&self) -> Option<HookHandle> {
        self.hook
    }

    /// Load (or clear) the color LUT from `path`. Idempotent per path; a
    /// failing file records the path and leaves the feature disabled.
    pub fn load_lut(&mut self, gpu: &dyn RenderBackend, path: Option<&Path>) {
        let Some(path) = wanted(path) else {
            if let Some(lut) = self.lut.take() {
                gpu.free_lut(lut);
            }
            self.lut_path = None;
            return;
        };

        if self.lut_path.as_deref() == Some(path) {
            return; // same LUT
        }
        self.lut_path = Some(path.to_owned());

        if let Some(old) = self.lut.take() {
            gpu.free_lut(old);
        }
        match read_and_parse(path, |data| gpu.parse_cube_lut(data)) {
            Ok(lut) => {
                info!(path = %path.display(), "Loaded color LUT");
                self.lut = Some(lut);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed loading color LUT");
            }
        }
    }

    /// Load (or clear) the custom shader hook from `path`. Same caching and
    /// failure semantics as [`load_lut`](AssetCache::load_lut).
    pub fn load_hook(&mut self, gpu: &dyn RenderBackend, path: Option<&Path>) {
        let Some(path) = wanted(path) else {
            if let Some(hook) = self.hook.take() {
                gpu.free_shader_hook(hook);
            }
            self.hook_path = None;
            return;
        };

        if self.hook_path.as_deref() == Some(path) {
            return; // same shader
        }
        self.hook_path = Some(path.to_owned());

        if let Some(old) = self.hook.take() {
            gpu.free_shader_hook(old);
        }
        match read_and_parse(path, |data| gpu.parse_shader_hook(data)) {
            Ok(hook) => {
                info!(path = %path.display(), "Loaded custom shader hook");
                self.hook = Some(hook);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed loading custom shader hook");
            }
        }
    }

    /// Free everything. LUTs and hooks are CPU-side engine objects, so this
    /// does not require the context to be current.
    pub fn release(&mut self, gpu: &dyn RenderBackend) {
        if let Some(lut) = self.lut.take() {
            gpu.free_lut(lut);
        }
        if let Some(hook) = self.hook.take() {
            gpu.free_shader_hook(hook);
        }
        self.lut_path = None;
        self.hook_path = None;
    }
}

fn read_and_parse<T>(
    path: &Path,
    parse: impl FnOnce(&[u8]) -> Result<T, opal_common::error::GpuError>,
) -> Result<T, AssetError> {
    let data = std::fs::read(path)?;
    parse(&data).map_err(AssetError::Parse)
}
