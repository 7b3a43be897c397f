//! Filter adapter binding a host filter instance to the color-matching effect.
//!
//! The host drives everything: it creates the filter on a source, pushes
//! settings changes through [`SubsamplingDetector::update`], calls
//! [`SubsamplingDetector::render`] once per frame on its graphics thread and
//! finally drops the instance.

use tracing::{debug, trace, warn};

use crate::color::Vec4;
use crate::config::{
    FilterSettings, COLOR_KEY, COLOR_LABEL, EFFECT_FILE, FILTER_NAME, PARAM_COLOR,
    PARAM_TEXTURE_HEIGHT, PARAM_TEXTURE_WIDTH,
};
use crate::graphics::GraphicsGuard;
use crate::host::{ColorFormat, DirectRender, FilterHost, GraphicsHost};
use crate::properties::{PropertyList, TextLookup};
use crate::settings::Settings;

/// Handles into the effect's parameter table. Each is `None` when the effect
/// does not declare that parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectParams<P> {
    pub texture_width: Option<P>,
    pub texture_height: Option<P>,
    pub color: Option<P>,
}

impl<P: Copy> EffectParams<P> {
    fn resolve<G>(host: &G, effect: &G::Effect) -> Self
    where
        G: GraphicsHost<Param = P> + ?Sized,
    {
        let lookup = |name: &str| {
            let param = host.effect_param(effect, name);
            if param.is_none() {
                debug!(param = name, "effect does not declare parameter, writes will be skipped");
            }
            param
        };

        Self {
            texture_width: lookup(PARAM_TEXTURE_WIDTH),
            texture_height: lookup(PARAM_TEXTURE_HEIGHT),
            color: lookup(PARAM_COLOR),
        }
    }
}

struct LoadedEffect<E, P> {
    effect: E,
    params: EffectParams<P>,
}

pub struct SubsamplingDetector<H: FilterHost> {
    host: H,
    source: H::Source,
    effect: Option<LoadedEffect<H::Effect, H::Param>>,
    color: Vec4,
}

impl<H: FilterHost> SubsamplingDetector<H> {
    pub fn name() -> &'static str {
        FILTER_NAME
    }

    /// Build the filter for `source`. Never fails: without a usable effect the
    /// instance simply passes frames through.
    pub fn create<S: Settings + ?Sized>(host: H, source: H::Source, settings: &S) -> Self {
        let effect = load_effect(&host);

        let mut filter = Self {
            host,
            source,
            effect,
            color: Vec4::default(),
        };
        filter.update(settings);

        debug!(effect_loaded = filter.has_effect(), "filter created");
        filter
    }

    pub fn update<S: Settings + ?Sized>(&mut self, settings: &S) {
        let settings = FilterSettings::read(settings);
        self.color = settings.reference_color();
        trace!(color = format_args!("{:#010x}", settings.color), "reference color updated");
    }

    /// Draw one frame. Must be called with the graphics context held.
    pub fn render(&self) {
        let Some(loaded) = &self.effect else {
            self.host.skip_filter(&self.source);
            return;
        };

        if !self
            .host
            .begin_filter(&self.source, ColorFormat::Rgba, DirectRender::Allow)
        {
            trace!("host declined filter pass");
            return;
        }

        let (width, height) = self.host.target_size(&self.source);
        let params = &loaded.params;

        if let Some(param) = params.texture_width {
            self.host.set_float(param, width as f32);
        }
        if let Some(param) = params.texture_height {
            self.host.set_float(param, height as f32);
        }
        if let Some(param) = params.color {
            self.host.set_vec4(param, &self.color);
        }

        self.host.end_filter(&self.source, &loaded.effect, 0, 0);
    }

    /// Release the effect and the instance.
    pub fn destroy(self) {
        drop(self);
    }

    pub fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    pub fn params(&self) -> Option<EffectParams<H::Param>> {
        self.effect.as_ref().map(|loaded| loaded.params)
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn source(&self) -> &H::Source {
        &self.source
    }
}

impl<H: FilterHost> Drop for SubsamplingDetector<H> {
    fn drop(&mut self) {
        if let Some(loaded) = self.effect.take() {
            let _graphics = GraphicsGuard::enter(&self.host);
            self.host.destroy_effect(loaded.effect);
        }
        debug!("filter destroyed");
    }
}

fn load_effect<H: FilterHost>(host: &H) -> Option<LoadedEffect<H::Effect, H::Param>> {
    let Some(path) = host.module_file(EFFECT_FILE) else {
        warn!(file = EFFECT_FILE, "effect file not found in plugin data, filter is inert");
        return None;
    };

    let _graphics = GraphicsGuard::enter(host);

    match host.create_effect(&path) {
        Ok(effect) => {
            let params = EffectParams::resolve(host, &effect);
            Some(LoadedEffect { effect, params })
        }
        Err(err) => {
            warn!(error = %err, "effect failed to load, filter is inert");
            None
        }
    }
}

/// Register default settings.
pub fn defaults<S: Settings + ?Sized>(settings: &mut S) {
    FilterSettings::apply_defaults(settings);
}

/// The single color picker bound to the reference color.
pub fn properties(locale: &dyn TextLookup) -> PropertyList {
    let mut properties = PropertyList::new();
    properties.add_color(COLOR_KEY, COLOR_LABEL, locale);
    properties
}
