//! Server-side rendering demo.
use choice_wheel::ssr::prelude::*;
use demo::{prizes, register_handlers};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let host = SsrElement::new(TAG_NAME);
    host.set_property("pointer-angle", "0");
    host.set_property("on-wheel-stopped", "logResult");
    let wheel = WheelWidget::<Ssr>::new(host);
    register_handlers(&wheel);
    wheel.update_config(|c| c.duration = 0.5);
    wheel.set_segments(prizes());
    wheel.attribute_changed();

    let init_html_string = wheel.host().html_string();
    let outcome = futures_lite::future::block_on(wheel.spin());
    log::info!("settled at {:.1}deg", outcome.rotation);
    let value = outcome
        .value
        .ok_or_else(|| anyhow::anyhow!("the wheel did not select a segment"))?;
    let final_html_string = wheel.host().html_string();

    println!("init: {init_html_string}");
    println!();
    println!("final: {final_html_string}");
    println!();
    println!("selected: {value}");
    Ok(())
}
