// Module entry points OBS looks up when it loads the plugin library

use std::ffi::{c_char, CStr, CString};
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicPtr, Ordering};

use anyhow::Result;
use parking_lot::{const_mutex, Mutex};
use subsampling_detector_core::config::DEFAULT_LOCALE;
use subsampling_detector_core::TextLookup;
use tracing::{debug, info};

use crate::api::{self, ObsApi};
use crate::config::LogConfig;
use crate::ffi::*;
use crate::{filter, logger};

static MODULE: AtomicPtr<obs_module_t> = AtomicPtr::new(ptr::null_mut());
static LOCALE: Mutex<Option<Locale>> = const_mutex(None);

struct Locale {
    api: &'static ObsApi,
    lookup: NonNull<lookup_t>,
}

// The lookup table is only reached through the mutex.
unsafe impl Send for Locale {}

impl Drop for Locale {
    fn drop(&mut self) {
        unsafe { (self.api.text_lookup_destroy)(self.lookup.as_ptr()) }
    }
}

pub fn current() -> *mut obs_module_t {
    MODULE.load(Ordering::Acquire)
}

#[no_mangle]
pub extern "C" fn obs_module_set_pointer(module: *mut obs_module_t) {
    MODULE.store(module, Ordering::Release);
}

#[no_mangle]
pub extern "C" fn obs_current_module() -> *mut obs_module_t {
    current()
}

#[no_mangle]
pub extern "C" fn obs_module_ver() -> u32 {
    LIBOBS_API_VER
}

#[no_mangle]
pub extern "C" fn obs_module_name() -> *const c_char {
    c"Subsampling Detector".as_ptr()
}

#[no_mangle]
pub extern "C" fn obs_module_description() -> *const c_char {
    c"Highlights pixels matching a reference color to reveal chroma subsampling".as_ptr()
}

#[no_mangle]
pub unsafe extern "C" fn obs_module_set_locale(locale: *const c_char) {
    // OBS sets the locale before calling obs_module_load.
    let Ok(api) = api::init() else {
        return;
    };

    let default_locale = CString::new(DEFAULT_LOCALE).unwrap_or_default();
    let lookup = (api.obs_module_load_locale)(current(), default_locale.as_ptr(), locale);

    let mut slot = LOCALE.lock();
    *slot = NonNull::new(lookup).map(|lookup| Locale { api, lookup });

    if !locale.is_null() {
        debug!(locale = %CStr::from_ptr(locale).to_string_lossy(), "locale loaded");
    }
}

#[no_mangle]
pub extern "C" fn obs_module_free_locale() {
    LOCALE.lock().take();
}

#[no_mangle]
pub extern "C" fn obs_module_load() -> bool {
    match load() {
        Ok(()) => true,
        Err(err) => {
            match api::get() {
                Some(api) => api.log(LOG_ERROR, &format!("[{}] failed to load: {err:#}", logger::PREFIX)),
                None => eprintln!("[{}] failed to load: {err:#}", logger::PREFIX),
            }
            false
        }
    }
}

#[no_mangle]
pub extern "C" fn obs_module_unload() {
    unload();
}

/// Resolve libobs, install logging and register the filter type.
pub fn load() -> Result<()> {
    let api = api::init()?;
    logger::init(api, &LogConfig::from_env());

    let info = filter::source_info();
    unsafe { (api.obs_register_source_s)(&info, std::mem::size_of::<obs_source_info>()) };

    info!(
        id = subsampling_detector_core::config::FILTER_ID,
        version = env!("CARGO_PKG_VERSION"),
        "plugin loaded"
    );
    Ok(())
}

pub fn unload() {
    obs_module_free_locale();
    logger::finalize();
}

#[no_mangle]
pub unsafe extern "C" fn obs_module_get_string(val: *const c_char, out: *mut *const c_char) -> bool {
    if val.is_null() || out.is_null() {
        return false;
    }
    lookup(val, out)
}

/// The returned string lives as long as the current locale table.
unsafe fn lookup(key: *const c_char, out: *mut *const c_char) -> bool {
    match LOCALE.lock().as_ref() {
        Some(locale) => (locale.api.text_lookup_getstr)(locale.lookup.as_ptr(), key, out),
        None => false,
    }
}

/// Strings from the module's locale files, e.g. `data/locale/en-US.ini`.
pub struct ModuleText;

impl TextLookup for ModuleText {
    fn text(&self, key: &str) -> Option<String> {
        let key = CString::new(key).ok()?;
        let mut out: *const c_char = ptr::null();

        unsafe {
            if !lookup(key.as_ptr(), &mut out) || out.is_null() {
                return None;
            }
            Some(CStr::from_ptr(out).to_string_lossy().into_owned())
        }
    }
}
