// libobs-backed implementations of the filter's host capabilities

use std::ffi::{c_char, CString};
use std::path::{Path, PathBuf};
use std::ptr::{self, NonNull};

use subsampling_detector_core::{
    ColorFormat, DirectRender, FilterHost, GraphicsHost, HostError, PropertyKind, PropertyList,
    Settings, Vec4,
};
use tracing::warn;

use crate::api::ObsApi;
use crate::ffi::*;
use crate::module;

fn c_string(value: &str) -> CString {
    CString::new(value.replace('\0', "")).unwrap_or_default()
}

#[derive(Clone, Copy)]
pub struct ObsHost {
    api: &'static ObsApi,
}

impl ObsHost {
    pub fn new(api: &'static ObsApi) -> Self {
        Self { api }
    }

    /// Materialize core property descriptors as an OBS property list.
    pub fn build_properties(&self, list: &PropertyList) -> *mut obs_properties_t {
        let props = unsafe { (self.api.obs_properties_create)() };
        if props.is_null() {
            return props;
        }

        for property in list {
            let name = c_string(property.key);
            let label = c_string(&property.label);
            match property.kind {
                PropertyKind::Color => unsafe {
                    (self.api.obs_properties_add_color)(props, name.as_ptr(), label.as_ptr());
                },
            }
        }

        props
    }
}

/// The filter's own source, owned by OBS.
pub struct ObsSource(NonNull<obs_source_t>);

impl ObsSource {
    pub fn new(source: *mut obs_source_t) -> Option<Self> {
        NonNull::new(source).map(Self)
    }

    fn as_ptr(&self) -> *mut obs_source_t {
        self.0.as_ptr()
    }
}

pub struct ObsEffect(NonNull<gs_effect_t>);

#[derive(Clone, Copy)]
pub struct ObsParam(NonNull<gs_eparam_t>);

impl GraphicsHost for ObsHost {
    type Effect = ObsEffect;
    type Param = ObsParam;

    fn enter_graphics(&self) {
        unsafe { (self.api.obs_enter_graphics)() }
    }

    fn leave_graphics(&self) {
        unsafe { (self.api.obs_leave_graphics)() }
    }

    fn create_effect(&self, path: &Path) -> Result<ObsEffect, HostError> {
        let file = path
            .to_str()
            .map(c_string)
            .ok_or_else(|| HostError::InvalidPath(path.to_path_buf()))?;

        let mut error: *mut c_char = ptr::null_mut();
        let effect = unsafe { (self.api.gs_effect_create_from_file)(file.as_ptr(), &mut error) };
        let reason = unsafe { self.api.take_string(error) };

        match NonNull::new(effect) {
            Some(effect) => {
                if let Some(reason) = reason {
                    warn!(%reason, "effect compiled with diagnostics");
                }
                Ok(ObsEffect(effect))
            }
            None => Err(HostError::EffectCompile {
                path: path.to_path_buf(),
                reason: reason.unwrap_or_else(|| "unknown error".to_owned()),
            }),
        }
    }

    fn effect_param(&self, effect: &ObsEffect, name: &str) -> Option<ObsParam> {
        let name = c_string(name);
        let param = unsafe { (self.api.gs_effect_get_param_by_name)(effect.0.as_ptr(), name.as_ptr()) };
        NonNull::new(param).map(ObsParam)
    }

    fn destroy_effect(&self, effect: ObsEffect) {
        unsafe { (self.api.gs_effect_destroy)(effect.0.as_ptr()) }
    }
}

impl FilterHost for ObsHost {
    type Source = ObsSource;

    fn module_file(&self, name: &str) -> Option<PathBuf> {
        let name = c_string(name);
        let path = unsafe {
            let raw = (self.api.obs_find_module_file)(module::current(), name.as_ptr());
            self.api.take_string(raw)
        };
        path.map(PathBuf::from)
    }

    fn begin_filter(&self, source: &ObsSource, format: ColorFormat, direct: DirectRender) -> bool {
        let format = match format {
            ColorFormat::Rgba => GS_RGBA,
        };
        let direct = match direct {
            DirectRender::Allow => OBS_ALLOW_DIRECT_RENDERING,
        };
        unsafe { (self.api.obs_source_process_filter_begin)(source.as_ptr(), format, direct) }
    }

    fn skip_filter(&self, source: &ObsSource) {
        unsafe { (self.api.obs_source_skip_video_filter)(source.as_ptr()) }
    }

    fn target_size(&self, source: &ObsSource) -> (u32, u32) {
        unsafe {
            let target = (self.api.obs_filter_get_target)(source.as_ptr());
            if target.is_null() {
                return (0, 0);
            }
            (
                (self.api.obs_source_get_width)(target),
                (self.api.obs_source_get_height)(target),
            )
        }
    }

    fn set_float(&self, param: ObsParam, value: f32) {
        unsafe { (self.api.gs_effect_set_float)(param.0.as_ptr(), value) }
    }

    fn set_vec4(&self, param: ObsParam, value: &Vec4) {
        unsafe { (self.api.gs_effect_set_vec4)(param.0.as_ptr(), value) }
    }

    fn end_filter(&self, source: &ObsSource, effect: &ObsEffect, width: u32, height: u32) {
        unsafe {
            (self.api.obs_source_process_filter_end)(source.as_ptr(), effect.0.as_ptr(), width, height)
        }
    }
}

/// Borrowed `obs_data_t` handed to a callback.
pub struct ObsSettings {
    api: &'static ObsApi,
    data: NonNull<obs_data_t>,
}

impl ObsSettings {
    pub fn new(api: &'static ObsApi, data: *mut obs_data_t) -> Option<Self> {
        NonNull::new(data).map(|data| Self { api, data })
    }
}

impl Settings for ObsSettings {
    fn int(&self, key: &str) -> Option<i64> {
        let key = c_string(key);
        let data = self.data.as_ptr();
        unsafe {
            let present = (self.api.obs_data_has_user_value)(data, key.as_ptr())
                || (self.api.obs_data_has_default_value)(data, key.as_ptr());
            present.then(|| (self.api.obs_data_get_int)(data, key.as_ptr()))
        }
    }

    fn set_default_int(&mut self, key: &str, value: i64) {
        let key = c_string(key);
        unsafe { (self.api.obs_data_set_default_int)(self.data.as_ptr(), key.as_ptr(), value) }
    }
}
