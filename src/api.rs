// libobs entry points resolved at load time from the host process
//
// The plugin is loaded into an OBS process that already has libobs mapped, so
// every symbol is looked up in that image rather than linked at build time.

use std::ffi::{c_char, c_void, CStr, CString};

use anyhow::{Context, Result};
use libloading::Library;
use once_cell::sync::OnceCell;

use crate::ffi::*;

static API: OnceCell<ObsApi> = OnceCell::new();

macro_rules! obs_api {
    ($($name:ident: $ty:ty),* $(,)?) => {
        pub struct ObsApi {
            _lib: Option<Library>,
            $(pub $name: $ty,)*
        }

        impl ObsApi {
            fn from_library(lib: Library) -> Result<Self> {
                $(let $name = unsafe { symbol::<$ty>(&lib, stringify!($name))? };)*
                Ok(Self { _lib: Some(lib), $($name,)* })
            }
        }
    };
}

obs_api! {
    obs_register_source_s: obs_register_source_s_fn,
    obs_find_module_file: obs_find_module_file_fn,
    bfree: bfree_fn,
    blog: blog_fn,
    obs_enter_graphics: obs_enter_graphics_fn,
    obs_leave_graphics: obs_leave_graphics_fn,
    gs_effect_create_from_file: gs_effect_create_from_file_fn,
    gs_effect_get_param_by_name: gs_effect_get_param_by_name_fn,
    gs_effect_destroy: gs_effect_destroy_fn,
    gs_effect_set_float: gs_effect_set_float_fn,
    gs_effect_set_vec4: gs_effect_set_vec4_fn,
    obs_data_get_int: obs_data_get_int_fn,
    obs_data_set_default_int: obs_data_set_default_int_fn,
    obs_data_has_user_value: obs_data_has_value_fn,
    obs_data_has_default_value: obs_data_has_value_fn,
    obs_source_process_filter_begin: obs_source_process_filter_begin_fn,
    obs_source_process_filter_end: obs_source_process_filter_end_fn,
    obs_source_skip_video_filter: obs_source_skip_video_filter_fn,
    obs_filter_get_target: obs_filter_get_target_fn,
    obs_source_get_width: obs_source_get_size_fn,
    obs_source_get_height: obs_source_get_size_fn,
    obs_properties_create: obs_properties_create_fn,
    obs_properties_add_color: obs_properties_add_color_fn,
    obs_module_load_locale: obs_module_load_locale_fn,
    text_lookup_getstr: text_lookup_getstr_fn,
    text_lookup_destroy: text_lookup_destroy_fn,
}

unsafe fn symbol<T: Copy>(lib: &Library, name: &str) -> Result<T> {
    let symbol = lib
        .get::<T>(name.as_bytes())
        .with_context(|| format!("libobs does not export `{name}`"))?;
    Ok(*symbol)
}

#[cfg(unix)]
fn host_library() -> Result<Library> {
    Ok(libloading::os::unix::Library::this().into())
}

#[cfg(windows)]
fn host_library() -> Result<Library> {
    let lib = libloading::os::windows::Library::open_already_loaded("obs.dll")
        .context("obs.dll is not loaded in this process")?;
    Ok(lib.into())
}

/// Resolve the symbol table once per process. Safe to call from any module
/// entry point; later calls return the same table.
pub fn init() -> Result<&'static ObsApi> {
    API.get_or_try_init(resolve)
}

#[cfg(not(test))]
fn resolve() -> Result<ObsApi> {
    let lib = host_library()?;
    ObsApi::from_library(lib).context("failed to resolve libobs API")
}

#[cfg(test)]
fn resolve() -> Result<ObsApi> {
    Ok(stub::api())
}

pub fn get() -> Option<&'static ObsApi> {
    API.get()
}

impl ObsApi {
    /// Write one line to the OBS log.
    pub fn log(&self, level: i32, message: &str) {
        let Ok(line) = CString::new(message.replace('\0', "")) else {
            return;
        };
        unsafe { (self.blog)(level, c"%s".as_ptr(), line.as_ptr()) };
    }

    /// Take ownership of a `bmalloc`ed string, copying it out and freeing it.
    ///
    /// # Safety
    /// `ptr` must be null or a NUL-terminated string allocated by libobs.
    pub unsafe fn take_string(&self, ptr: *mut c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }
        let owned = CStr::from_ptr(ptr).to_string_lossy().into_owned();
        (self.bfree)(ptr.cast::<c_void>());
        Some(owned)
    }
}
