use super::dom;
use super::observer;
use crate::config::SiteConfig;
use crate::counter::{parse_target, CounterAnimation};
use crate::log::Logger;
use crate::viewport::ObserverOptions;
use gloo_render::{request_animation_frame, AnimationFrame};
use serde_json::json;
use std::{cell::RefCell, rc::Rc};
use web_sys::Element;

const PENDING_CLASS: &str = "animate-on-scroll";
const REVEALED_CLASS: &str = "animate-in";
const COUNTER_SELECTOR: &str = ".stat-number";
const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
const LOADED_CLASS: &str = "loaded";

pub fn init_scroll_animations(config: &SiteConfig) -> usize {
    let targets = dom::select_all(&config.reveal_selector);
    let count = targets.len();

    for target in &targets {
        dom::set_class(target, PENDING_CLASS, true);
    }

    observer::observe_once(
        targets,
        &ObserverOptions::with_threshold(config.reveal_threshold),
        |target| dom::set_class(target, REVEALED_CLASS, true),
    );
    count
}

struct CounterRun {
    element: Element,
    animation: RefCell<CounterAnimation>,
    frame: RefCell<Option<AnimationFrame>>,
}

fn schedule(run: Rc<CounterRun>) {
    let next = Rc::clone(&run);
    let handle = request_animation_frame(move |timestamp| {
        next.frame.borrow_mut().take();
        let frame = next.animation.borrow_mut().tick(timestamp);
        next.element.set_text_content(Some(&frame.value.to_string()));

        if !frame.done {
            schedule(Rc::clone(&next));
        }
    });
    *run.frame.borrow_mut() = Some(handle);
}

fn animate(element: Element, mut animation: CounterAnimation) {
    if dom::prefers_reduced_motion() {
        let frame = animation.finish();
        element.set_text_content(Some(&frame.value.to_string()));
        return;
    }

    schedule(Rc::new(CounterRun {
        element,
        animation: RefCell::new(animation),
        frame: RefCell::new(None),
    }));
}

pub fn init_counters(config: &SiteConfig, logger: Logger) -> usize {
    let counters = dom::select_all(COUNTER_SELECTOR);
    let count = counters.len();
    let duration_ms = f64::from(config.counter_duration_ms);

    observer::observe_once(
        counters,
        &ObserverOptions::with_threshold(config.counter_threshold),
        move |counter| {
            let raw = counter.get_attribute("data-target").unwrap_or_default();
            let Some(target) = parse_target(&raw) else {
                logger.warn("counter.skipped", json!({ "dataTarget": raw }));
                return;
            };

            animate(counter.clone(), CounterAnimation::new(target, duration_ms, dom::now()));
        },
    );
    count
}

fn load_image(image: &Element, mark_loaded: bool) {
    let Some(source) = image.get_attribute("data-src") else {
        return;
    };

    let _ = image.set_attribute("src", &source);
    let _ = image.remove_attribute("data-src");
    if mark_loaded {
        dom::set_class(image, LOADED_CLASS, true);
    }
}

pub fn init_lazy_images(logger: Logger) -> usize {
    let images = dom::select_all(LAZY_IMAGE_SELECTOR);
    let count = images.len();
    if images.is_empty() {
        return 0;
    }

    if !observer::supported() {
        logger.debug("lazy.fallback", json!({ "images": count }));
        for image in &images {
            load_image(image, false);
        }
        return count;
    }

    observer::observe_once(images, &ObserverOptions::default(), |image| {
        load_image(image, true)
    });
    count
}
