// libobs C types and constants used by the plugin
#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, c_longlong, c_void};

use subsampling_detector_core::Vec4;

macro_rules! opaque {
    ($($name:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
            }
        )*
    };
}

opaque!(
    obs_module_t,
    obs_source_t,
    obs_data_t,
    obs_properties_t,
    obs_property_t,
    gs_effect_t,
    gs_eparam_t,
    lookup_t,
);

/// `struct vec4` from `graphics/vec4.h`.
pub type vec4 = Vec4;

pub type obs_source_type = c_int;
pub const OBS_SOURCE_TYPE_FILTER: obs_source_type = 1;

pub const OBS_SOURCE_VIDEO: u32 = 1 << 0;

pub type gs_color_format = c_int;
pub const GS_RGBA: gs_color_format = 3;

pub type obs_allow_direct_render = c_int;
pub const OBS_ALLOW_DIRECT_RENDERING: obs_allow_direct_render = 1;

pub const LOG_ERROR: c_int = 100;
pub const LOG_WARNING: c_int = 200;
pub const LOG_INFO: c_int = 300;
pub const LOG_DEBUG: c_int = 400;

pub const LIBOBS_API_MAJOR_VER: u32 = 30;
pub const LIBOBS_API_MINOR_VER: u32 = 0;
pub const LIBOBS_API_PATCH_VER: u32 = 0;

/// `LIBOBS_API_VER` as computed by `MAKE_SEMANTIC_VERSION`.
pub const LIBOBS_API_VER: u32 =
    (LIBOBS_API_MAJOR_VER << 24) | (LIBOBS_API_MINOR_VER << 16) | LIBOBS_API_PATCH_VER;

/// Leading fields of `struct obs_source_info`, up to `video_render`.
///
/// libobs copies only as many bytes as the plugin reports and zero-fills the
/// callbacks past that point.
#[repr(C)]
pub struct obs_source_info {
    pub id: *const c_char,
    pub type_: obs_source_type,
    pub output_flags: u32,
    pub get_name: Option<unsafe extern "C" fn(type_data: *mut c_void) -> *const c_char>,
    pub create:
        Option<unsafe extern "C" fn(settings: *mut obs_data_t, source: *mut obs_source_t) -> *mut c_void>,
    pub destroy: Option<unsafe extern "C" fn(data: *mut c_void)>,
    pub get_width: Option<unsafe extern "C" fn(data: *mut c_void) -> u32>,
    pub get_height: Option<unsafe extern "C" fn(data: *mut c_void) -> u32>,
    pub get_defaults: Option<unsafe extern "C" fn(settings: *mut obs_data_t)>,
    pub get_properties: Option<unsafe extern "C" fn(data: *mut c_void) -> *mut obs_properties_t>,
    pub update: Option<unsafe extern "C" fn(data: *mut c_void, settings: *mut obs_data_t)>,
    pub activate: Option<unsafe extern "C" fn(data: *mut c_void)>,
    pub deactivate: Option<unsafe extern "C" fn(data: *mut c_void)>,
    pub show: Option<unsafe extern "C" fn(data: *mut c_void)>,
    pub hide: Option<unsafe extern "C" fn(data: *mut c_void)>,
    pub video_tick: Option<unsafe extern "C" fn(data: *mut c_void, seconds: f32)>,
    pub video_render: Option<unsafe extern "C" fn(data: *mut c_void, effect: *mut gs_effect_t)>,
}

pub type obs_register_source_s_fn = unsafe extern "C" fn(info: *const obs_source_info, size: usize);
pub type obs_find_module_file_fn =
    unsafe extern "C" fn(module: *mut obs_module_t, file: *const c_char) -> *mut c_char;
pub type bfree_fn = unsafe extern "C" fn(ptr: *mut c_void);
pub type blog_fn = unsafe extern "C" fn(log_level: c_int, format: *const c_char, ...);

pub type obs_enter_graphics_fn = unsafe extern "C" fn();
pub type obs_leave_graphics_fn = unsafe extern "C" fn();
pub type gs_effect_create_from_file_fn =
    unsafe extern "C" fn(file: *const c_char, error_string: *mut *mut c_char) -> *mut gs_effect_t;
pub type gs_effect_get_param_by_name_fn =
    unsafe extern "C" fn(effect: *const gs_effect_t, name: *const c_char) -> *mut gs_eparam_t;
pub type gs_effect_destroy_fn = unsafe extern "C" fn(effect: *mut gs_effect_t);
pub type gs_effect_set_float_fn = unsafe extern "C" fn(param: *mut gs_eparam_t, val: f32);
pub type gs_effect_set_vec4_fn = unsafe extern "C" fn(param: *mut gs_eparam_t, val: *const vec4);

pub type obs_data_get_int_fn =
    unsafe extern "C" fn(data: *mut obs_data_t, name: *const c_char) -> c_longlong;
pub type obs_data_set_default_int_fn =
    unsafe extern "C" fn(data: *mut obs_data_t, name: *const c_char, val: c_longlong);
pub type obs_data_has_value_fn = unsafe extern "C" fn(data: *mut obs_data_t, name: *const c_char) -> bool;

pub type obs_source_process_filter_begin_fn = unsafe extern "C" fn(
    filter: *mut obs_source_t,
    format: gs_color_format,
    allow_direct: obs_allow_direct_render,
) -> bool;
pub type obs_source_process_filter_end_fn =
    unsafe extern "C" fn(filter: *mut obs_source_t, effect: *mut gs_effect_t, width: u32, height: u32);
pub type obs_source_skip_video_filter_fn = unsafe extern "C" fn(filter: *mut obs_source_t);
pub type obs_filter_get_target_fn = unsafe extern "C" fn(filter: *const obs_source_t) -> *mut obs_source_t;
pub type obs_source_get_size_fn = unsafe extern "C" fn(source: *const obs_source_t) -> u32;

pub type obs_properties_create_fn = unsafe extern "C" fn() -> *mut obs_properties_t;
pub type obs_properties_add_color_fn = unsafe extern "C" fn(
    props: *mut obs_properties_t,
    name: *const c_char,
    description: *const c_char,
) -> *mut obs_property_t;

pub type obs_module_load_locale_fn = unsafe extern "C" fn(
    module: *mut obs_module_t,
    default_locale: *const c_char,
    locale: *const c_char,
) -> *mut lookup_t;
pub type text_lookup_getstr_fn =
    unsafe extern "C" fn(lookup: *mut lookup_t, lookup_val: *const c_char, out: *mut *const c_char) -> bool;
pub type text_lookup_destroy_fn = unsafe extern "C" fn(lookup: *mut lookup_t);
