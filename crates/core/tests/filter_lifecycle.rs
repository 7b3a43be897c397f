use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use subsampling_detector_core::config::{COLOR_KEY, DEFAULT_COLOR, EFFECT_FILE};
use subsampling_detector_core::filter::{defaults, properties};
use subsampling_detector_core::{
    ColorFormat, DirectRender, FilterHost, GraphicsHost, HostError, MemorySettings, PropertyKind,
    Settings, SubsamplingDetector, TextLookup, Vec4,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    EnterGraphics,
    LeaveGraphics,
    CreateEffect(PathBuf),
    DestroyEffect(u32),
    BeginFilter(ColorFormat, DirectRender),
    SkipFilter,
    SetFloat(&'static str, f32),
    SetVec4(&'static str, Vec4),
    EndFilter { effect: u32, width: u32, height: u32 },
}

#[derive(Debug)]
struct MockState {
    data_dir: Option<PathBuf>,
    compiles: bool,
    params: HashSet<&'static str>,
    accepts_frames: bool,
    target: (u32, u32),
    graphics_depth: i32,
    next_effect: u32,
    calls: Vec<Call>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            data_dir: Some(PathBuf::from("/usr/share/obs/obs-plugins/subsampling-detector")),
            compiles: true,
            params: ["texture_width", "texture_height", "color"].into_iter().collect(),
            accepts_frames: true,
            target: (1920, 1080),
            graphics_depth: 0,
            next_effect: 1,
            calls: Vec::new(),
        }
    }
}

#[derive(Debug, PartialEq)]
struct MockEffect(u32);

#[derive(Clone, Default)]
struct MockHost {
    state: Arc<Mutex<MockState>>,
}

impl MockHost {
    fn with(configure: impl FnOnce(&mut MockState)) -> Self {
        let host = Self::default();
        configure(&mut host.state.lock());
        host
    }

    fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn resize(&self, width: u32, height: u32) {
        self.state.lock().target = (width, height);
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push(call);
    }

    fn assert_graphics_held(&self, what: &str) {
        assert!(
            self.state.lock().graphics_depth > 0,
            "{what} called outside the graphics context"
        );
    }
}

impl GraphicsHost for MockHost {
    type Effect = MockEffect;
    type Param = &'static str;

    fn enter_graphics(&self) {
        let mut state = self.state.lock();
        state.graphics_depth += 1;
        state.calls.push(Call::EnterGraphics);
    }

    fn leave_graphics(&self) {
        let mut state = self.state.lock();
        state.graphics_depth -= 1;
        state.calls.push(Call::LeaveGraphics);
    }

    fn create_effect(&self, path: &Path) -> Result<MockEffect, HostError> {
        self.assert_graphics_held("create_effect");
        self.record(Call::CreateEffect(path.to_path_buf()));

        let mut state = self.state.lock();
        if !state.compiles {
            return Err(HostError::EffectCompile {
                path: path.to_path_buf(),
                reason: "syntax error".into(),
            });
        }
        let id = state.next_effect;
        state.next_effect += 1;
        Ok(MockEffect(id))
    }

    fn effect_param(&self, _effect: &MockEffect, name: &str) -> Option<&'static str> {
        self.assert_graphics_held("effect_param");
        self.state.lock().params.iter().copied().find(|p| *p == name)
    }

    fn destroy_effect(&self, effect: MockEffect) {
        self.assert_graphics_held("destroy_effect");
        self.record(Call::DestroyEffect(effect.0));
    }
}

impl FilterHost for MockHost {
    type Source = &'static str;

    fn module_file(&self, name: &str) -> Option<PathBuf> {
        self.state.lock().data_dir.as_ref().map(|dir| dir.join(name))
    }

    fn begin_filter(&self, _source: &&'static str, format: ColorFormat, direct: DirectRender) -> bool {
        self.record(Call::BeginFilter(format, direct));
        self.state.lock().accepts_frames
    }

    fn skip_filter(&self, _source: &&'static str) {
        self.record(Call::SkipFilter);
    }

    fn target_size(&self, _source: &&'static str) -> (u32, u32) {
        self.state.lock().target
    }

    fn set_float(&self, param: &'static str, value: f32) {
        self.record(Call::SetFloat(param, value));
    }

    fn set_vec4(&self, param: &'static str, value: &Vec4) {
        self.record(Call::SetVec4(param, *value));
    }

    fn end_filter(&self, _source: &&'static str, effect: &MockEffect, width: u32, height: u32) {
        self.record(Call::EndFilter {
            effect: effect.0,
            width,
            height,
        });
    }
}

fn settings_with_color(color: u32) -> MemorySettings {
    let mut settings = MemorySettings::new();
    defaults(&mut settings);
    settings.set_int(COLOR_KEY, i64::from(color));
    settings
}

fn render_calls(host: &MockHost, filter: &SubsamplingDetector<MockHost>) -> Vec<Call> {
    host.clear_calls();
    filter.render();
    host.calls()
}

const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

#[test]
fn create_loads_effect_inside_graphics_context() {
    let host = MockHost::default();
    let filter = SubsamplingDetector::create(host.clone(), "camera", &MemorySettings::new());

    let expected_path = PathBuf::from("/usr/share/obs/obs-plugins/subsampling-detector").join(EFFECT_FILE);
    assert_eq!(
        host.calls(),
        vec![
            Call::EnterGraphics,
            Call::CreateEffect(expected_path),
            Call::LeaveGraphics,
        ]
    );
    assert!(filter.has_effect());
    assert_eq!(filter.color(), RED);
    assert_eq!(*filter.source(), "camera");

    let params = filter.params().unwrap();
    assert_eq!(params.texture_width, Some("texture_width"));
    assert_eq!(params.texture_height, Some("texture_height"));
    assert_eq!(params.color, Some("color"));
}

#[test]
fn first_frame_binds_size_and_color_then_executes() {
    let host = MockHost::default();
    let filter = SubsamplingDetector::create(host.clone(), "camera", &settings_with_color(0xFF00_FF00));

    assert_eq!(
        render_calls(&host, &filter),
        vec![
            Call::BeginFilter(ColorFormat::Rgba, DirectRender::Allow),
            Call::SetFloat("texture_width", 1920.0),
            Call::SetFloat("texture_height", 1080.0),
            Call::SetVec4("color", GREEN),
            Call::EndFilter {
                effect: 1,
                width: 0,
                height: 0,
            },
        ]
    );
}

#[test]
fn last_update_before_render_wins() {
    let host = MockHost::default();
    let mut filter = SubsamplingDetector::create(host.clone(), "camera", &MemorySettings::new());

    filter.update(&settings_with_color(0xFF00_FF00));
    filter.update(&settings_with_color(0x8040_2010));

    let calls = render_calls(&host, &filter);
    let expected = Vec4::new(16.0 / 255.0, 32.0 / 255.0, 64.0 / 255.0, 128.0 / 255.0);
    assert!(calls.contains(&Call::SetVec4("color", expected)));

    filter.update(&settings_with_color(0xFF00_FF00));
    assert!(render_calls(&host, &filter).contains(&Call::SetVec4("color", GREEN)));
}

#[test]
fn update_without_color_falls_back_to_default() {
    let host = MockHost::default();
    let mut filter = SubsamplingDetector::create(host, "camera", &settings_with_color(0xFF00_FF00));
    assert_eq!(filter.color(), GREEN);

    filter.update(&MemorySettings::new());
    assert_eq!(filter.color(), RED);
}

#[test]
fn failed_compile_leaves_filter_inert() {
    let host = MockHost::with(|state| state.compiles = false);
    let filter = SubsamplingDetector::create(host.clone(), "camera", &MemorySettings::new());

    assert!(!filter.has_effect());
    assert!(filter.params().is_none());
    assert_eq!(host.calls().last(), Some(&Call::LeaveGraphics));
    assert_eq!(host.state.lock().graphics_depth, 0);

    assert_eq!(render_calls(&host, &filter), vec![Call::SkipFilter]);

    host.clear_calls();
    drop(filter);
    assert!(host.calls().is_empty());
}

#[test]
fn missing_effect_file_skips_graphics_entirely() {
    let host = MockHost::with(|state| state.data_dir = None);
    let filter = SubsamplingDetector::create(host.clone(), "camera", &MemorySettings::new());

    assert!(!filter.has_effect());
    assert!(host.calls().is_empty());
    assert_eq!(render_calls(&host, &filter), vec![Call::SkipFilter]);
}

#[test]
fn missing_parameter_only_skips_that_write() {
    let host = MockHost::with(|state| {
        state.params.remove("texture_height");
    });
    let filter = SubsamplingDetector::create(host.clone(), "camera", &MemorySettings::new());

    assert_eq!(filter.params().unwrap().texture_height, None);
    assert_eq!(
        render_calls(&host, &filter),
        vec![
            Call::BeginFilter(ColorFormat::Rgba, DirectRender::Allow),
            Call::SetFloat("texture_width", 1920.0),
            Call::SetVec4("color", RED),
            Call::EndFilter {
                effect: 1,
                width: 0,
                height: 0,
            },
        ]
    );
}

#[test]
fn declined_frame_does_no_further_work() {
    let host = MockHost::with(|state| state.accepts_frames = false);
    let filter = SubsamplingDetector::create(host.clone(), "camera", &MemorySettings::new());

    assert_eq!(
        render_calls(&host, &filter),
        vec![Call::BeginFilter(ColorFormat::Rgba, DirectRender::Allow)]
    );

    host.state.lock().accepts_frames = true;
    assert_eq!(render_calls(&host, &filter).len(), 5);
}

#[test]
fn target_size_is_read_every_frame() {
    let host = MockHost::default();
    let filter = SubsamplingDetector::create(host.clone(), "camera", &MemorySettings::new());

    let first = render_calls(&host, &filter);
    host.resize(1280, 720);
    let second = render_calls(&host, &filter);

    assert!(first.contains(&Call::SetFloat("texture_width", 1920.0)));
    assert!(first.contains(&Call::SetFloat("texture_height", 1080.0)));
    assert!(second.contains(&Call::SetFloat("texture_width", 1280.0)));
    assert!(second.contains(&Call::SetFloat("texture_height", 720.0)));
}

#[test]
fn destroy_releases_effect_inside_graphics_context() {
    let host = MockHost::default();
    let filter = SubsamplingDetector::create(host.clone(), "camera", &MemorySettings::new());

    host.clear_calls();
    filter.destroy();

    assert_eq!(
        host.calls(),
        vec![Call::EnterGraphics, Call::DestroyEffect(1), Call::LeaveGraphics]
    );
    assert_eq!(host.state.lock().graphics_depth, 0);
}

#[test]
fn each_instance_owns_its_effect() {
    let host = MockHost::default();
    let first = SubsamplingDetector::create(host.clone(), "camera", &MemorySettings::new());
    let second = SubsamplingDetector::create(host.clone(), "capture", &MemorySettings::new());

    host.clear_calls();
    drop(first);
    drop(second);

    let destroyed: Vec<_> = host
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::DestroyEffect(_)))
        .collect();
    assert_eq!(destroyed, vec![Call::DestroyEffect(1), Call::DestroyEffect(2)]);
}

#[test]
fn defaults_do_not_override_user_choice() {
    let mut settings = MemorySettings::new();
    defaults(&mut settings);
    assert_eq!(settings.int(COLOR_KEY), Some(i64::from(DEFAULT_COLOR)));

    settings.set_int(COLOR_KEY, 0xFF00_FF00);
    defaults(&mut settings);
    assert_eq!(settings.int(COLOR_KEY), Some(0xFF00_FF00));
}

struct Polish;

impl TextLookup for Polish {
    fn text(&self, key: &str) -> Option<String> {
        (key == "Color").then(|| "Kolor".to_owned())
    }
}

#[test]
fn properties_expose_one_color_picker() {
    let list = properties(&Polish);
    assert_eq!(list.len(), 1);

    let property = list.iter().next().unwrap();
    assert_eq!(property.key, COLOR_KEY);
    assert_eq!(property.kind, PropertyKind::Color);
    assert_eq!(property.label, "Kolor");

    let untranslated = properties(&());
    assert_eq!(untranslated.iter().next().unwrap().label, "Color");
}

#[test]
fn properties_do_not_depend_on_instance_state() {
    let inert = MockHost::with(|state| state.compiles = false);
    let _filter = SubsamplingDetector::create(inert.clone(), "camera", &MemorySettings::new());

    inert.clear_calls();
    assert_eq!(properties(&Polish), properties(&Polish));
    assert!(inert.calls().is_empty());
}

#[test]
fn describe_is_constant() {
    assert_eq!(SubsamplingDetector::<MockHost>::name(), "Subsampling Detector");
}
