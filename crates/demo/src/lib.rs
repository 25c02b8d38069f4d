use choice_wheel::prelude::*;

#[cfg(feature = "web")]
use wasm_bindgen::prelude::*;

/// The segments shown when the page gives none.
pub fn prizes() -> Vec<Segment> {
    [
        ("Tea", "#446688"),
        ("Coffee", "#884466"),
        ("Juice", "#668844"),
        ("Water", "#448888"),
        ("Soda", "#886644"),
        ("Milk", "#666688"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (text, color))| {
        Segment::new(text, serde_json::json!({ "id": i, "drink": text }))
            .with_background_color(color)
    })
    .collect()
}

/// Registers the handlers pages may name in their `on-wheel-*` attributes.
pub fn register_handlers<V: View>(wheel: &WheelWidget<V>) {
    wheel.register_started_handler("logStart", |duration| {
        log::info!("spinning for {duration}s");
        Ok(())
    });
    wheel.register_stopped_handler("logResult", |value| {
        log::info!("the wheel chose {value}");
        Ok(())
    });
}

#[cfg(feature = "web")]
#[wasm_bindgen(start)]
fn web_run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let hosts = document.get_elements_by_tag_name(TAG_NAME);
    for i in 0..hosts.length() {
        let Some(host) = hosts.item(i) else {
            continue;
        };
        let has_segments =
            host.has_attribute("segments") || host.has_attribute("segments-json");
        let wheel = WheelWidget::<choice_wheel::web::Web>::attach_with(host, register_handlers)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        if !has_segments {
            wheel.set_segments(prizes());
        }
    }
    Ok(())
}
