#![cfg(all(target_arch = "wasm32", feature = "web"))]
use choice_wheel::{prelude::*, time::wait_millis, web::Web};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn new_host(segments_json: &str) -> web_sys::Element {
    let document = choice_wheel::web::document();
    let host = document.create_element(TAG_NAME).unwrap();
    host.set_attribute("segments-json", segments_json).unwrap();
    host.set_attribute("duration", "0.05").unwrap();
    let body = document.body().unwrap();
    web_sys::Node::append_child(&body, &host).unwrap();
    host
}

fn wedges(host: &web_sys::Element) -> u32 {
    host.shadow_root()
        .unwrap()
        .query_selector_all("g.segment")
        .unwrap()
        .length()
}

#[wasm_bindgen_test]
async fn attach_renders_into_the_shadow_root() {
    let _ = console_log::init_with_level(log::Level::Trace);

    let host = new_host(
        r#"[{"text": "A", "value": 1}, {"text": "B", "value": 2}, {"text": "C", "value": 3}]"#,
    );
    let wheel = WheelWidget::<Web>::attach(host.clone()).unwrap();
    assert_eq!(3, wedges(&host));
    assert_eq!(0.05, wheel.config().duration);

    host.set_attribute("segments-json", r#"[{"text": "A", "value": 1}, {"text": "B", "value": 2}]"#)
        .unwrap();
    // Mutation records are delivered as a microtask.
    wait_millis(20.0).await;
    assert_eq!(2, wedges(&host));
}

#[wasm_bindgen_test]
fn attach_reports_dom_errors() {
    // Elements like `img` cannot host a shadow root.
    let img = choice_wheel::web::document().create_element("img").unwrap();
    let err = WheelWidget::<Web>::attach(img).err().unwrap();
    assert!(matches!(err, choice_wheel::Error::Dom { .. }), "{err}");
}

#[wasm_bindgen_test]
async fn listeners_resolve_on_the_following_event() {
    let el = choice_wheel::web::document().create_element("div").unwrap();
    let clicks = el.listen("click");
    let next = clicks.next();
    el.dispatch_event(&web_sys::Event::new("click").unwrap())
        .unwrap();
    assert_eq!("click", next.await.type_());
}

#[wasm_bindgen_test]
async fn spin_reports_to_a_named_handler() {
    let host = new_host(r#"[{"text": "A", "value": "a"}, {"text": "B", "value": "b"}]"#);
    host.set_attribute("on-wheel-stopped", "record").unwrap();
    let chosen = std::rc::Rc::new(std::cell::RefCell::new(vec![]));
    let wheel = WheelWidget::<Web>::attach_with(host, |wheel| {
        let chosen = chosen.clone();
        wheel.register_stopped_handler("record", move |value| {
            chosen.borrow_mut().push(value.clone());
            Ok(())
        });
    })
    .unwrap();

    let outcome = wheel.spin_to(0.0).await;
    // The pointer sits at 45 degrees, over the first half.
    assert_eq!(Some(0), outcome.index);
    assert_eq!(vec![serde_json::json!("a")], *chosen.borrow());
    let spinning = wheel.layers().unwrap().spinning;
    assert_eq!(Some("rotate(0deg)".into()), spinning.get_style("transform"));
}
