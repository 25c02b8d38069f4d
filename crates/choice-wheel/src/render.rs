//! Building the wheel's layers from its segments and configuration.
//!
//! Everything here is a pure function of its inputs; the caller owns the
//! decision of when to throw the previous layers away.
use crate::{
    geometry::{describe_arc_path, describe_rotated_text_transform, polar_to_cartesian},
    segment::{Segment, WheelConfig},
    spin::{rotate_transform, segment_width, wedge_bounds},
    view::*,
};

/// Width and height of the wheel's viewBox.
pub const VIEW_SIZE: f64 = 300.0;
pub const CENTER: f64 = VIEW_SIZE / 2.0;
pub const RADIUS: f64 = 140.0;

/// Rough glyph advance as a fraction of the font size, used to decide when a
/// label must be squeezed into its band.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// The three overlaid layers of a rendered wheel.
pub struct Layers<V: View> {
    /// Static disc in the spinner color, beneath everything.
    pub background: V::Element,
    /// Segment wedges, and the logo when it spins.
    pub spinning: V::Element,
    /// Pointer, and the logo when it does not spin. Never receives clicks.
    pub fixed: V::Element,
}

impl<V: View> Clone for Layers<V> {
    fn clone(&self) -> Self {
        Layers {
            background: self.background.clone(),
            spinning: self.spinning.clone(),
            fixed: self.fixed.clone(),
        }
    }
}

fn svg<V: View>(name: &str) -> V::Element {
    <V::Element as ViewElement>::new_svg(name)
}

/// Build fresh layers. `rotation` is the spinning layer's resting angle.
pub fn build_layers<V: View, T>(
    segments: &[Segment<T>],
    config: &WheelConfig,
    rotation: f64,
) -> Layers<V> {
    let background = build_background::<V>(config);

    let spinning = svg::<V>("g");
    spinning.set_property("class", "spinning");
    spinning.set_style("transform-origin", format!("{CENTER}px {CENTER}px"));
    spinning.set_style("transform", rotate_transform(rotation));
    spinning.set_style("cursor", "pointer");
    spinning.set_style("pointer-events", "auto");
    for (index, segment) in segments.iter().enumerate() {
        spinning.append_child(&build_wedge::<V, T>(index, segments.len(), segment, config));
    }

    let fixed = svg::<V>("g");
    fixed.set_property("class", "fixed");
    fixed.set_style("pointer-events", "none");
    fixed.append_child(&build_pointer::<V>(config));

    if let Some(logo) = build_logo::<V>(config) {
        if config.logo_spins {
            spinning.append_child(&logo);
        } else {
            fixed.append_child(&logo);
        }
    }

    Layers {
        background,
        spinning,
        fixed,
    }
}

fn build_background<V: View>(config: &WheelConfig) -> V::Element {
    let background = svg::<V>("g");
    background.set_property("class", "background");
    background.set_style("pointer-events", "none");
    let disc = svg::<V>("circle");
    disc.set_property("cx", CENTER.to_string());
    disc.set_property("cy", CENTER.to_string());
    disc.set_property("r", RADIUS.to_string());
    disc.set_property("fill", &config.spinner_background_color);
    if config.shadow {
        disc.set_style("filter", "drop-shadow(0 2px 6px rgba(0, 0, 0, 0.4))");
    }
    background.append_child(&disc);
    background
}

fn build_wedge<V: View, T>(
    index: usize,
    count: usize,
    segment: &Segment<T>,
    config: &WheelConfig,
) -> V::Element {
    let wedge = svg::<V>("g");
    wedge.set_property("class", "segment");
    wedge.set_property("data-index", index.to_string());

    // A single segment is the whole disc; an arc from a point back to itself
    // draws nothing.
    let outline = if count == 1 {
        let circle = svg::<V>("circle");
        circle.set_property("cx", CENTER.to_string());
        circle.set_property("cy", CENTER.to_string());
        circle.set_property("r", RADIUS.to_string());
        circle
    } else {
        let (start, end) = wedge_bounds(index, count);
        let path = svg::<V>("path");
        path.set_property("d", describe_arc_path(CENTER, CENTER, RADIUS, start, end));
        path
    };
    outline.set_property(
        "fill",
        segment
            .background_color
            .as_deref()
            .unwrap_or(&config.segment_background_color),
    );
    outline.set_property(
        "stroke",
        segment
            .stroke_color
            .as_deref()
            .unwrap_or(&config.stroke_color),
    );
    outline.set_property("stroke-width", config.stroke_width.to_string());
    wedge.append_child(&outline);

    wedge.append_child(&build_label::<V, T>(index, count, segment, config));
    wedge
}

fn build_label<V: View, T>(
    index: usize,
    count: usize,
    segment: &Segment<T>,
    config: &WheelConfig,
) -> V::Element {
    let width = segment_width(count);
    let mid_angle = index as f64 * width + width / 2.0;
    let hub = config.hub_radius();
    let band = RADIUS - hub;
    let label_radius = hub + band / 2.0;
    let font_size = segment.font_size.unwrap_or(config.font_size);

    let label = svg::<V>("text");
    label.set_property(
        "transform",
        describe_rotated_text_transform(CENTER, CENTER, label_radius, mid_angle),
    );
    label.set_property("text-anchor", "middle");
    label.set_property("dominant-baseline", "central");
    label.set_property(
        "fill",
        segment.text_color.as_deref().unwrap_or(&config.text_color),
    );
    label.set_property("font-size", font_size.to_string());
    label.set_style("pointer-events", "none");

    let estimated = segment.text.chars().count() as f64 * font_size * GLYPH_WIDTH_RATIO;
    if estimated > band {
        label.set_property("textLength", band.to_string());
        label.set_property("lengthAdjust", "spacingAndGlyphs");
    }
    label.append_child(&<V::Text as ViewText>::new(&segment.text));
    label
}

fn build_pointer<V: View>(config: &WheelConfig) -> V::Element {
    let size = config.pointer_size;
    let at = polar_to_cartesian(
        CENTER,
        CENTER,
        RADIUS + config.pointer_offset - size / 2.0,
        config.pointer_angle,
    );
    let pointer = svg::<V>("image");
    pointer.set_property("class", "pointer");
    pointer.set_property("href", &config.pointer_image);
    pointer.set_property("x", (at.x - size / 2.0).to_string());
    pointer.set_property("y", (at.y - size / 2.0).to_string());
    pointer.set_property("width", size.to_string());
    pointer.set_property("height", size.to_string());
    pointer.set_property(
        "transform",
        format!("rotate({}, {}, {})", config.pointer_angle, at.x, at.y),
    );
    pointer
}

fn build_logo<V: View>(config: &WheelConfig) -> Option<V::Element> {
    let href = config.logo_image.as_deref()?;
    let size = config.logo_size;
    let logo = svg::<V>("image");
    logo.set_property("class", "logo");
    logo.set_property("href", href);
    logo.set_property("x", (CENTER - size / 2.0).to_string());
    logo.set_property("y", (CENTER - size / 2.0).to_string());
    logo.set_property("width", size.to_string());
    logo.set_property("height", size.to_string());
    Some(logo)
}
