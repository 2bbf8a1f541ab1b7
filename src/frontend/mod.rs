
mod dom;
mod form;
mod navigation;
mod notification;
mod observer;
mod reveal;
mod scroll;

use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::log::Logger;
use gloo_events::EventListener;
use serde_json::json;
use web_sys::Element;

fn load_config(logger: Logger) -> SiteConfig {
    let source = dom::element_by_id::<Element>(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .unwrap_or_default();

    match SiteConfig::from_json(&source) {
        Ok(config) => config,
        Err(error) => {
            logger.warn("config.invalid", json!({ "error": error.to_string() }));
            SiteConfig::default()
        }
    }
}

fn start() {
    let config = load_config(Logger::default());
    let logger = Logger::new(config.log_level);

    let notifier = notification::mount(&config);
    let navigation = navigation::init(logger);
    let back_to_top = scroll::init_back_to_top();
    scroll::init_scroll_effects(&config, back_to_top);
    let revealed = reveal::init_scroll_animations(&config);
    let counters = reveal::init_counters(&config, logger);
    let transport = form::init(&config, logger, notifier);
    let anchors = scroll::init_smooth_scroll();
    let sections = scroll::init_scroll_spy();
    let images = reveal::init_lazy_images(logger);

    logger.info(
        "site.ready",
        json!({
            "navigation": navigation,
            "revealTargets": revealed,
            "counters": counters,
            "contactTransport": transport,
            "anchors": anchors,
            "spySections": sections,
            "lazyImages": images,
        }),
    );
}

pub fn run() {
    let Some(document) = dom::document() else {
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| start()).forget();
    } else {
        start();
    }
}
