//! The spinning choice wheel.
//!
//! [`WheelWidget`] owns the segments and configuration, rebuilds its layers
//! whenever either changes, and runs the spin protocol:
//!
//! 1. the started callback receives the spin duration,
//! 2. a random resting angle `r` is drawn from `[0, 360)`,
//! 3. the spinning layer transitions through whole turns plus `r`,
//! 4. after the duration (plus a small margin) the layer snaps to `r`,
//! 5. the segment under the pointer is reported to the stopped callback.
//!
//! A `WheelWidget` is a handle. Clones share the same wheel.
use std::{collections::HashMap, rc::Rc};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::{
    error::{
        Error, InvalidValueSnafu, ParseSnafu, SegmentsNotSequenceSnafu, UnknownHandlerSnafu,
        UnknownPropertySnafu, WrongKindSnafu,
    },
    reflect::{AttributeDecl, AttributeReflector, Reflected, ReflectTarget},
    render::{Layers, VIEW_SIZE, build_layers},
    segment::{Segment, WheelConfig, shadow_enabled},
    spin::{SpinPlan, landed_segment},
    sync::Shared,
    time,
    view::*,
};

/// The wheel's custom element tag.
pub const TAG_NAME: &str = "spinning-choice-wheel";

/// Receives the spin duration in seconds when a spin starts.
pub type StartedCallback = Rc<dyn Fn(f64) -> anyhow::Result<()>>;
/// Receives the selected segment's value when a spin settles.
pub type StoppedCallback<T> = Rc<dyn Fn(&T) -> anyhow::Result<()>>;
/// Produces resting angles in `[0, 360)`.
pub type AngleSource = Box<dyn FnMut() -> f64>;

/// The attributes a wheel reflects onto its properties.
pub fn wheel_attributes() -> Vec<AttributeDecl> {
    vec![
        AttributeDecl::new("segments").structured(),
        AttributeDecl::new("segments")
            .attribute("segments-json")
            .structured(),
        AttributeDecl::new("strokeColor"),
        AttributeDecl::new("strokeWidth").structured(),
        AttributeDecl::new("logoImage"),
        AttributeDecl::new("logoSize").structured(),
        AttributeDecl::new("logoSpins").structured(),
        AttributeDecl::new("pointerImage"),
        AttributeDecl::new("pointerSize").structured(),
        AttributeDecl::new("pointerAngle").structured(),
        AttributeDecl::new("pointerOffset").structured(),
        AttributeDecl::new("onWheelStopped").callable(),
        AttributeDecl::new("onWheelStarted").callable(),
        AttributeDecl::new("duration").structured(),
        AttributeDecl::new("revolutionsPerSecond").structured(),
        AttributeDecl::new("shadow"),
        AttributeDecl::new("spinnerBackgroundColor"),
    ]
}

/// What a settled spin landed on.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinOutcome<T> {
    /// Resting angle of the spinning layer, in `[0, 360)`.
    pub rotation: f64,
    /// Index of the selected segment, when there were at least two.
    pub index: Option<usize>,
    pub value: Option<T>,
}

struct WheelState<T> {
    segments: Vec<Segment<T>>,
    config: WheelConfig,
    rotation: f64,
    on_started: Option<StartedCallback>,
    on_stopped: Option<StoppedCallback<T>>,
    started_handlers: HashMap<String, StartedCallback>,
    stopped_handlers: HashMap<String, StoppedCallback<T>>,
}

impl<T> Default for WheelState<T> {
    fn default() -> Self {
        WheelState {
            segments: vec![],
            config: WheelConfig::default(),
            rotation: 0.0,
            on_started: None,
            on_stopped: None,
            started_handlers: HashMap::default(),
            stopped_handlers: HashMap::default(),
        }
    }
}

pub struct WheelWidget<V: View, T = serde_json::Value> {
    host: V::Element,
    root: V::Element,
    state: Shared<WheelState<T>>,
    layers: Shared<Option<Layers<V>>>,
    reflector: Shared<AttributeReflector>,
    angle_source: Shared<AngleSource>,
}

impl<V: View, T> Clone for WheelWidget<V, T> {
    fn clone(&self) -> Self {
        WheelWidget {
            host: self.host.clone(),
            root: self.root.clone(),
            state: self.state.clone(),
            layers: self.layers.clone(),
            reflector: self.reflector.clone(),
            angle_source: self.angle_source.clone(),
        }
    }
}

fn random_angles() -> AngleSource {
    let mut rng = SmallRng::from_entropy();
    Box::new(move || rng.gen_range(0.0..360.0))
}

fn json_value(property: &str, value: Reflected) -> Result<serde_json::Value, Error> {
    match value {
        Reflected::Json(json) => Ok(json),
        Reflected::Text(text) => serde_json::from_str(&text).context(InvalidValueSnafu { property }),
        Reflected::Handler(_) => WrongKindSnafu {
            property,
            expected: "a JSON value",
        }
        .fail(),
    }
}

fn number(property: &str, value: Reflected) -> Result<f64, Error> {
    match value {
        Reflected::Text(text) => text.trim().parse::<f64>().map_err(|e| {
            ParseSnafu {
                value: text.clone(),
                message: e.to_string(),
            }
            .build()
        }),
        other => serde_json::from_value(json_value(property, other)?)
            .context(InvalidValueSnafu { property }),
    }
}

fn text(property: &str, value: Reflected) -> Result<String, Error> {
    match value {
        Reflected::Text(text) | Reflected::Json(serde_json::Value::String(text)) => Ok(text),
        _ => WrongKindSnafu {
            property,
            expected: "a string",
        }
        .fail(),
    }
}

fn boolean(property: &str, value: Reflected) -> Result<bool, Error> {
    match value {
        Reflected::Text(text) => Ok(shadow_enabled(&text)),
        Reflected::Json(serde_json::Value::Bool(b)) => Ok(b),
        _ => WrongKindSnafu {
            property,
            expected: "a boolean",
        }
        .fail(),
    }
}

fn handler_name(property: &str, value: Reflected) -> Result<String, Error> {
    match value {
        Reflected::Handler(name) | Reflected::Text(name) => Ok(name),
        _ => WrongKindSnafu {
            property,
            expected: "a handler name",
        }
        .fail(),
    }
}

impl<V: View, T: DeserializeOwned + Clone + 'static> WheelWidget<V, T> {
    /// Create a wheel that renders into `host`.
    pub fn new(host: V::Element) -> Self {
        let widget = Self::new_detached(host);
        widget.host.append_child(&widget.root);
        widget
    }

    /// Create a wheel that reads its attributes from `host` but whose
    /// [`root`](Self::root) has not been placed anywhere yet.
    pub fn new_detached(host: V::Element) -> Self {
        let root = <V::Element as ViewElement>::new_svg("svg");
        root.set_property("viewBox", format!("0 0 {VIEW_SIZE} {VIEW_SIZE}"));
        root.set_property("class", "wheel");
        // Only the spinning layer is a hit target. Clicks on it bubble up here.
        root.set_style("pointer-events", "none");
        let widget = WheelWidget {
            host,
            root,
            state: Shared::new(WheelState::default()),
            layers: Shared::new(None),
            reflector: Shared::new(AttributeReflector::new(wheel_attributes())),
            angle_source: Shared::new(random_angles()),
        };
        widget.rebuild();
        widget
    }

    /// Another handle to this wheel.
    pub fn handle(&self) -> Self {
        self.clone()
    }

    /// Hand a live handle to `register`.
    ///
    /// This is how an outside holder obtains the wheel before any other
    /// property has been set.
    pub fn on_registered(&self, register: impl FnOnce(Self)) -> &Self {
        register(self.handle());
        self
    }

    /// The element the wheel reads its attributes from.
    pub fn host(&self) -> V::Element {
        self.host.clone()
    }

    /// The wheel's `svg` element.
    pub fn root(&self) -> V::Element {
        self.root.clone()
    }

    /// The current layers.
    pub fn layers(&self) -> Option<Layers<V>> {
        self.layers.get().clone()
    }

    pub fn segments(&self) -> Vec<Segment<T>> {
        self.state.get().segments.clone()
    }

    pub fn config(&self) -> WheelConfig {
        self.state.get().config.clone()
    }

    /// The spinning layer's resting angle.
    pub fn rotation(&self) -> f64 {
        self.state.get().rotation
    }

    pub fn set_segments(&self, segments: Vec<Segment<T>>) {
        self.state.get_mut().segments = segments;
        self.rebuild();
    }

    /// Set segments from a JSON array.
    pub fn set_segments_json(&self, json: serde_json::Value) -> Result<(), Error> {
        self.apply_segments("segments", json)?;
        self.rebuild();
        Ok(())
    }

    pub fn set_config(&self, config: WheelConfig) {
        self.state.get_mut().config = config;
        self.rebuild();
    }

    pub fn update_config(&self, f: impl FnOnce(&mut WheelConfig)) {
        f(&mut self.state.get_mut().config);
        self.rebuild();
    }

    pub fn on_wheel_started(&self, f: impl Fn(f64) -> anyhow::Result<()> + 'static) {
        self.state.get_mut().on_started = Some(Rc::new(f));
    }

    pub fn on_wheel_stopped(&self, f: impl Fn(&T) -> anyhow::Result<()> + 'static) {
        self.state.get_mut().on_stopped = Some(Rc::new(f));
    }

    /// Make `f` available to the `on-wheel-started` attribute as `name`.
    pub fn register_started_handler(
        &self,
        name: impl Into<String>,
        f: impl Fn(f64) -> anyhow::Result<()> + 'static,
    ) {
        self.state
            .get_mut()
            .started_handlers
            .insert(name.into(), Rc::new(f));
    }

    /// Make `f` available to the `on-wheel-stopped` attribute as `name`.
    pub fn register_stopped_handler(
        &self,
        name: impl Into<String>,
        f: impl Fn(&T) -> anyhow::Result<()> + 'static,
    ) {
        self.state
            .get_mut()
            .stopped_handlers
            .insert(name.into(), Rc::new(f));
    }

    /// Replace the source of random resting angles.
    pub fn set_angle_source(&self, source: impl FnMut() -> f64 + 'static) {
        self.angle_source.set(Box::new(source));
    }

    /// Assign a property by name, then rebuild.
    pub fn set_property(&self, property: &str, value: Reflected) -> Result<(), Error> {
        let needs_rebuild = self.apply_property(property, value)?;
        if needs_rebuild {
            self.rebuild();
        }
        Ok(())
    }

    /// Attribute names that [`attribute_changed`](Self::attribute_changed) reads.
    pub fn observed_attributes(&self) -> Vec<String> {
        let mut names = self.reflector.get().observed_attributes();
        names.dedup();
        names
    }

    /// Re-read the host's attributes and rebuild.
    ///
    /// The rebuild happens even when no attribute changed.
    pub fn attribute_changed(&self) {
        let assigned = self
            .reflector
            .get_mut()
            .poll(&self.host, &DeferredRebuild(self));
        log::debug!("attributes changed, {assigned} properties assigned");
        self.rebuild();
    }

    fn apply_segments(&self, property: &str, json: serde_json::Value) -> Result<(), Error> {
        if !json.is_array() {
            return SegmentsNotSequenceSnafu {
                found: json_kind(&json),
            }
            .fail();
        }
        let segments: Vec<Segment<T>> =
            serde_json::from_value(json).context(InvalidValueSnafu { property })?;
        self.state.get_mut().segments = segments;
        Ok(())
    }

    /// Returns whether the change is visible, ie needs a rebuild.
    fn apply_property(&self, property: &str, value: Reflected) -> Result<bool, Error> {
        match property {
            "segments" => {
                let json = json_value(property, value)?;
                self.apply_segments(property, json)?;
            }
            "config" => {
                let config = serde_json::from_value(json_value(property, value)?)
                    .context(InvalidValueSnafu { property })?;
                self.state.get_mut().config = config;
            }
            "onWheelStarted" => {
                let name = handler_name(property, value)?;
                let mut state = self.state.get_mut();
                let handler = state
                    .started_handlers
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| UnknownHandlerSnafu { name: &name }.build())?;
                state.on_started = Some(handler);
                return Ok(false);
            }
            "onWheelStopped" => {
                let name = handler_name(property, value)?;
                let mut state = self.state.get_mut();
                let handler = state
                    .stopped_handlers
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| UnknownHandlerSnafu { name: &name }.build())?;
                state.on_stopped = Some(handler);
                return Ok(false);
            }
            _ => {
                let mut config = self.config();
                match property {
                    "strokeColor" => config.stroke_color = text(property, value)?,
                    "strokeWidth" => config.stroke_width = number(property, value)?,
                    "logoImage" => config.logo_image = Some(text(property, value)?),
                    "logoSize" => config.logo_size = number(property, value)?,
                    "logoSpins" => config.logo_spins = boolean(property, value)?,
                    "pointerImage" => config.pointer_image = text(property, value)?,
                    "pointerSize" => config.pointer_size = number(property, value)?,
                    "pointerAngle" => config.pointer_angle = number(property, value)?,
                    "pointerOffset" => config.pointer_offset = number(property, value)?,
                    "duration" => config.duration = number(property, value)?,
                    "revolutionsPerSecond" => {
                        config.revolutions_per_second = number(property, value)?
                    }
                    "shadow" => config.shadow = boolean(property, value)?,
                    "spinnerBackgroundColor" => {
                        config.spinner_background_color = text(property, value)?
                    }
                    _ => return UnknownPropertySnafu { property }.fail(),
                }
                self.state.get_mut().config = config;
            }
        }
        Ok(true)
    }

    /// Throw away the current layers and build new ones.
    pub fn rebuild(&self) {
        let layers = {
            let state = self.state.get();
            build_layers::<V, T>(&state.segments, &state.config, state.rotation)
        };
        self.root.clear_children();
        self.root.append_child(&layers.background);
        self.root.append_child(&layers.spinning);
        self.root.append_child(&layers.fixed);
        *self.layers.get_mut() = Some(layers);
    }

    fn spinning_layer(&self) -> Option<V::Element> {
        self.layers.get().as_ref().map(|l| l.spinning.clone())
    }

    /// Spin to a random resting angle.
    pub async fn spin(&self) -> SpinOutcome<T> {
        let offset = {
            let mut source = self.angle_source.get_mut();
            (*source)()
        };
        self.spin_to(offset).await
    }

    /// Spin to the resting angle `offset`.
    pub async fn spin_to(&self, offset: f64) -> SpinOutcome<T> {
        let (config, on_started) = {
            let state = self.state.get();
            (state.config.clone(), state.on_started.clone())
        };
        if let Some(on_started) = on_started {
            if let Err(e) = on_started(config.duration) {
                log::error!("wheel started callback failed: {e:#}");
            }
        }

        let plan = SpinPlan::new(offset, config.duration, config.revolutions_per_second);
        log::debug!("spinning to {}deg over {}s", plan.offset, plan.duration);
        if let Some(spinning) = self.spinning_layer() {
            spinning.set_style("transition", plan.transition());
            spinning.set_style("transform", plan.spinning_transform());
        }

        time::wait_millis(plan.settle_delay_millis()).await;

        if let Some(spinning) = self.spinning_layer() {
            spinning.remove_style("transition");
            spinning.set_style("transform", plan.settled_transform());
        }

        let (index, value, on_stopped) = {
            let mut state = self.state.get_mut();
            state.rotation = plan.offset;
            let count = state.segments.len();
            let index = if count >= 2 {
                landed_segment(count, plan.offset, state.config.pointer_angle)
            } else {
                None
            };
            let value = index.map(|i| state.segments[i].value.clone());
            (index, value, state.on_stopped.clone())
        };

        if let (Some(value), Some(on_stopped)) = (value.as_ref(), on_stopped) {
            if let Err(e) = on_stopped(value) {
                log::error!("wheel stopped callback failed: {e:#}");
            }
        }

        SpinOutcome {
            rotation: plan.offset,
            index,
            value,
        }
    }

    /// Spin on every click of the wheel, forever.
    ///
    /// Clicks are heard on the root, which survives rebuilds, but only the
    /// spinning layer accepts pointer events, so clicks outside the disc
    /// are ignored.
    ///
    /// A click during a spin interrupts it: the interrupted spin never
    /// settles or reports, and a new spin starts from where the wheel is.
    pub async fn run(&self) {
        let clicks = self.root.listen("click");
        loop {
            clicks.next().await;
            loop {
                let spin = async {
                    self.spin().await;
                    false
                };
                let clicked_again = async {
                    clicks.next().await;
                    true
                };
                if !futures_lite::future::or(spin, clicked_again).await {
                    break;
                }
                log::debug!("spin interrupted by another click");
            }
        }
    }
}

/// Assigns reflected properties without rebuilding after each one.
struct DeferredRebuild<'a, V: View, T>(&'a WheelWidget<V, T>);

impl<V: View, T: DeserializeOwned + Clone + 'static> ReflectTarget for DeferredRebuild<'_, V, T> {
    fn assign(&self, property: &str, value: Reflected) -> Result<(), Error> {
        self.0.apply_property(property, value).map(|_| ())
    }
}

impl<V: View, T: DeserializeOwned + Clone + 'static> ReflectTarget for WheelWidget<V, T> {
    fn assign(&self, property: &str, value: Reflected) -> Result<(), Error> {
        self.set_property(property, value)
    }
}

fn json_kind(json: &serde_json::Value) -> String {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
    .to_owned()
}

#[cfg(all(test, feature = "ssr"))]
mod test {
    use std::cell::RefCell;

    use futures_lite::future::block_on;

    use super::*;
    use crate::{
        ssr::{Ssr, SsrElement},
        spin::wedge_bounds,
    };

    fn abcd() -> Vec<Segment<String>> {
        ["A", "B", "C", "D"]
            .into_iter()
            .map(|s| Segment::new(s, s.to_owned()))
            .collect()
    }

    fn instant_wheel() -> WheelWidget<Ssr, String> {
        let wheel = WheelWidget::<Ssr, String>::new(SsrElement::new(TAG_NAME));
        wheel.update_config(|c| c.duration = 0.0);
        wheel.set_segments(abcd());
        wheel
    }

    fn wedge_count(wheel: &WheelWidget<Ssr, String>) -> usize {
        wheel
            .root()
            .find_all(|el| el.get_property("class").as_deref() == Some("segment"))
            .len()
    }

    #[test]
    fn renders_into_host() {
        let wheel = instant_wheel();
        let svg = &wheel.host().child_elements()[0];
        assert_eq!("svg", svg.name);
        assert_eq!(Some("0 0 300 300".into()), svg.get_property("viewBox"));
        let layers = svg
            .child_elements()
            .into_iter()
            .map(|el| el.get_property("class").unwrap().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(vec!["background", "spinning", "fixed"], layers);
        assert_eq!(4, wedge_count(&wheel));
    }

    #[test]
    fn spin_lands_under_the_pointer() {
        let wheel = instant_wheel();
        let stopped = Rc::new(RefCell::new(vec![]));
        wheel.on_wheel_stopped({
            let stopped = stopped.clone();
            move |value: &String| {
                stopped.borrow_mut().push(value.clone());
                Ok(())
            }
        });

        let outcome = block_on(wheel.spin_to(0.0));
        assert_eq!(Some(0), outcome.index);
        assert_eq!(Some("A".to_owned()), outcome.value);

        let outcome = block_on(wheel.spin_to(90.0));
        assert_eq!(Some(3), outcome.index);
        assert_eq!(90.0, wheel.rotation());

        assert_eq!(vec!["A".to_owned(), "D".to_owned()], *stopped.borrow());
        let spinning = wheel.layers().unwrap().spinning;
        assert_eq!(Some("rotate(90deg)".into()), spinning.get_style("transform"));
        assert!(spinning.get_style("transition").is_none());
    }

    #[test]
    fn spin_reports_duration_when_started() {
        let wheel = instant_wheel();
        wheel.update_config(|c| c.duration = 0.01);
        let started = Rc::new(RefCell::new(None));
        wheel.on_wheel_started({
            let started = started.clone();
            move |duration| {
                *started.borrow_mut() = Some(duration);
                Ok(())
            }
        });
        block_on(wheel.spin_to(10.0));
        assert_eq!(Some(0.01), *started.borrow());
    }

    #[test]
    fn callback_errors_do_not_abort_the_spin() {
        let wheel = instant_wheel();
        wheel.on_wheel_started(|_| anyhow::bail!("started failed"));
        wheel.on_wheel_stopped(|_| anyhow::bail!("stopped failed"));
        let outcome = block_on(wheel.spin_to(180.0));
        assert_eq!(Some(2), outcome.index);
        assert_eq!(180.0, wheel.rotation());
    }

    #[test]
    fn fewer_than_two_segments_select_nothing() {
        let wheel = instant_wheel();
        let called = Rc::new(RefCell::new(false));
        wheel.on_wheel_stopped({
            let called = called.clone();
            move |_: &String| {
                *called.borrow_mut() = true;
                Ok(())
            }
        });
        wheel.set_segments(vec![Segment::new("Only", "only".to_owned())]);
        let outcome = block_on(wheel.spin_to(33.0));
        assert_eq!(None, outcome.index);
        assert_eq!(33.0, outcome.rotation);

        wheel.set_segments(vec![]);
        assert_eq!(None, block_on(wheel.spin_to(12.0)).index);
        assert!(!*called.borrow());
    }

    #[test]
    fn reconfiguring_replaces_the_wedges() {
        let wheel = instant_wheel();
        wheel.set_segments(abcd().into_iter().take(2).collect());
        assert_eq!(2, wedge_count(&wheel));
        let paths = wheel.root().find_all(|el| el.name == "path");
        let (start, end) = wedge_bounds(0, 2);
        assert_eq!((0.0, 180.0), (start, end));
        assert!(paths[0].get_property("d").unwrap().contains(" A 140 140 0 0 0 "));
    }

    #[test]
    fn rebuild_keeps_the_resting_angle() {
        let wheel = instant_wheel();
        block_on(wheel.spin_to(123.0));
        wheel.update_config(|c| c.stroke_width = 3.0);
        let spinning = wheel.layers().unwrap().spinning;
        assert_eq!(Some("rotate(123deg)".into()), spinning.get_style("transform"));
    }

    #[test]
    fn attributes_drive_the_wheel() {
        let wheel = instant_wheel();
        let host = wheel.host();
        host.set_property("segments-json", r#"[{"text": "X", "value": "x"}, {"text": "Y", "value": "y"}]"#);
        host.set_property("pointer-angle", "90");
        host.set_property("shadow", "true");
        wheel.attribute_changed();
        assert_eq!(2, wedge_count(&wheel));
        assert_eq!(90.0, wheel.config().pointer_angle);
        assert!(wheel.config().shadow);
        assert_eq!("XY", wheel.layers().unwrap().spinning.text_content());

        // Unparsable JSON leaves the previous segments in place.
        host.set_property("segments-json", "[{not json");
        wheel.attribute_changed();
        assert_eq!(2, wheel.segments().len());

        host.set_property("shadow", "off");
        wheel.attribute_changed();
        assert!(!wheel.config().shadow);
    }

    #[test]
    fn attribute_changed_always_rebuilds() {
        let wheel = instant_wheel();
        wheel.host().set_property("pointer-angle", "90");
        wheel.attribute_changed();
        let before = wheel.layers().unwrap().spinning;

        // Nothing changed, but the layers are still replaced.
        wheel.attribute_changed();
        let after = wheel.layers().unwrap().spinning;
        assert!(!before.children.ptr_eq(&after.children));
        assert_eq!(4, wedge_count(&wheel));
        assert_eq!(90.0, wheel.config().pointer_angle);
    }

    #[test]
    fn only_the_spinning_layer_takes_clicks() {
        let wheel = instant_wheel();
        let root = wheel.root();
        let layers = wheel.layers().unwrap();
        assert_eq!(Some("none".into()), root.get_style("pointer-events"));
        assert_eq!(Some("auto".into()), layers.spinning.get_style("pointer-events"));
        assert_eq!(Some("none".into()), layers.background.get_style("pointer-events"));
        assert_eq!(Some("none".into()), layers.fixed.get_style("pointer-events"));
    }

    #[test]
    fn observed_attributes_are_kebab_cased() {
        let wheel = instant_wheel();
        let observed = wheel.observed_attributes();
        for name in [
            "segments",
            "segments-json",
            "logo-spins",
            "on-wheel-stopped",
            "spinner-background-color",
            "revolutions-per-second",
        ] {
            assert!(observed.iter().any(|o| o == name), "missing {name}");
        }
    }

    #[test]
    fn segments_must_be_a_sequence() {
        let wheel = instant_wheel();
        let err = wheel
            .set_segments_json(serde_json::json!({"text": "A"}))
            .unwrap_err();
        assert!(matches!(err, Error::SegmentsNotSequence { .. }), "{err}");
        let err = wheel
            .set_segments_json(serde_json::json!([{"label": "A"}]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }), "{err}");
        assert_eq!(4, wheel.segments().len());

        wheel
            .set_segments_json(serde_json::json!([{"text": "Z", "value": "z"}]))
            .unwrap();
        assert_eq!("Z", wheel.segments()[0].text);
    }

    #[test]
    fn handler_attributes_name_registered_handlers() {
        let wheel = instant_wheel();
        let log = Rc::new(RefCell::new(vec![]));
        for name in ["first", "second"] {
            let log = log.clone();
            wheel.register_stopped_handler(name, move |value: &String| {
                log.borrow_mut().push(format!("{name}:{value}"));
                Ok(())
            });
        }
        let host = wheel.host();
        host.set_property("on-wheel-stopped", "first");
        wheel.attribute_changed();
        block_on(wheel.spin_to(0.0));

        // An unknown name keeps the handler already installed.
        host.set_property("on-wheel-stopped", "alert(1)");
        wheel.attribute_changed();
        block_on(wheel.spin_to(0.0));

        host.set_property("on-wheel-stopped", "second");
        wheel.attribute_changed();
        block_on(wheel.spin_to(90.0));

        assert_eq!(vec!["first:A", "first:A", "second:D"], *log.borrow());

        let err = wheel
            .set_property("onWheelStarted", Reflected::Handler("missing".into()))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownHandler { .. }), "{err}");
    }

    #[test]
    fn unknown_properties_are_rejected() {
        let wheel = instant_wheel();
        let err = wheel
            .set_property("colour", Reflected::Text("red".into()))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownProperty { .. }), "{err}");
        let err = wheel
            .set_property("duration", Reflected::Text("slow".into()))
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "{err}");
        wheel
            .set_property("config", Reflected::Json(serde_json::json!({"logoSize": 80})))
            .unwrap();
        assert_eq!(80.0, wheel.config().logo_size);
        assert_eq!(5.0, wheel.config().duration);
    }

    #[test]
    fn handles_share_one_wheel() {
        let wheel = instant_wheel();
        let held = Rc::new(RefCell::new(None));
        wheel.on_registered(|handle| *held.borrow_mut() = Some(handle));
        let handle = held.borrow_mut().take().unwrap();
        handle.set_segments(abcd().into_iter().take(3).collect());
        assert_eq!(3, wedge_count(&wheel));
    }

    #[test]
    fn second_click_interrupts_the_first_spin() {
        let wheel = instant_wheel();
        wheel.update_config(|c| c.duration = 0.2);
        let mut angles = vec![180.0, 90.0];
        wheel.set_angle_source(move || angles.pop().unwrap_or(0.0));
        let started = Rc::new(RefCell::new(0));
        let stopped = Rc::new(RefCell::new(vec![]));
        wheel.on_wheel_started({
            let started = started.clone();
            move |_| {
                *started.borrow_mut() += 1;
                Ok(())
            }
        });
        wheel.on_wheel_stopped({
            let stopped = stopped.clone();
            move |value: &String| {
                stopped.borrow_mut().push(value.clone());
                Ok(())
            }
        });

        let driver = async {
            // Let the run loop start listening.
            time::wait_millis(10.0).await;
            let clicks = wheel.root().events.get()[0].clone();
            clicks.fire().await;
            time::wait_millis(50.0).await;
            clicks.fire().await;
            time::wait_millis(600.0).await;
        };
        block_on(futures_lite::future::or(wheel.run(), driver));

        assert_eq!(2, *started.borrow());
        // Only the second spin, to 180, settled.
        assert_eq!(vec!["C".to_owned()], *stopped.borrow());
        assert_eq!(180.0, wheel.rotation());
    }
}
