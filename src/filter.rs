// obs_source_info callbacks forwarding into the core filter

use std::ffi::{c_char, c_void, CStr};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use parking_lot::RwLock;
use subsampling_detector_core::filter::{defaults, properties};
use subsampling_detector_core::SubsamplingDetector;
use tracing::error;

use crate::api;
use crate::ffi::*;
use crate::host::{ObsHost, ObsSettings, ObsSource};
use crate::module::ModuleText;

type Filter = SubsamplingDetector<ObsHost>;

/// Per-source instance data. OBS calls `update` from the UI thread while the
/// graphics thread renders, so the filter sits behind a lock.
type Instance = RwLock<Filter>;

pub const FILTER_ID: &CStr = c"subsampling_detector";
pub const FILTER_NAME: &CStr = c"Subsampling Detector";

pub fn source_info() -> obs_source_info {
    obs_source_info {
        id: FILTER_ID.as_ptr(),
        type_: OBS_SOURCE_TYPE_FILTER,
        output_flags: OBS_SOURCE_VIDEO,
        get_name: Some(get_name),
        create: Some(create),
        destroy: Some(destroy),
        get_width: None,
        get_height: None,
        get_defaults: Some(get_defaults),
        get_properties: Some(get_properties),
        update: Some(update),
        activate: None,
        deactivate: None,
        show: None,
        hide: None,
        video_tick: None,
        video_render: Some(video_render),
    }
}

/// Run a callback body without letting a panic cross into OBS.
fn guarded<T>(callback: &str, fallback: T, body: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => value,
        Err(_) => {
            error!(callback, "panic in filter callback");
            fallback
        }
    }
}

unsafe extern "C" fn get_name(_type_data: *mut c_void) -> *const c_char {
    FILTER_NAME.as_ptr()
}

unsafe extern "C" fn create(settings: *mut obs_data_t, source: *mut obs_source_t) -> *mut c_void {
    guarded("create", ptr::null_mut(), || {
        let (Some(api), Some(source)) = (api::get(), ObsSource::new(source)) else {
            return ptr::null_mut();
        };
        let host = ObsHost::new(api);

        let filter = match ObsSettings::new(api, settings) {
            Some(settings) => Filter::create(host, source, &settings),
            None => Filter::create(host, source, &subsampling_detector_core::MemorySettings::new()),
        };
        Box::into_raw(Box::new(Instance::new(filter))).cast()
    })
}

unsafe extern "C" fn destroy(data: *mut c_void) {
    if data.is_null() {
        return;
    }
    guarded("destroy", (), || drop(Box::from_raw(data.cast::<Instance>())));
}

unsafe extern "C" fn update(data: *mut c_void, settings: *mut obs_data_t) {
    let (Some(instance), Some(api)) = (data.cast::<Instance>().as_ref(), api::get()) else {
        return;
    };
    let Some(settings) = ObsSettings::new(api, settings) else {
        return;
    };
    guarded("update", (), || instance.write().update(&settings));
}

unsafe extern "C" fn video_render(data: *mut c_void, _effect: *mut gs_effect_t) {
    let Some(instance) = data.cast::<Instance>().as_ref() else {
        return;
    };
    guarded("video_render", (), || instance.read().render());
}

unsafe extern "C" fn get_defaults(settings: *mut obs_data_t) {
    let Some(mut settings) = api::get().and_then(|api| ObsSettings::new(api, settings)) else {
        return;
    };
    guarded("get_defaults", (), || defaults(&mut settings));
}

unsafe extern "C" fn get_properties(_data: *mut c_void) -> *mut obs_properties_t {
    let Some(api) = api::get() else {
        return ptr::null_mut();
    };
    guarded("get_properties", ptr::null_mut(), || {
        ObsHost::new(api).build_properties(&properties(&ModuleText))
    })
}
