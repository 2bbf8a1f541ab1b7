use super::dom::{self, BACK_TO_TOP_ID, NAVBAR_ID};
use super::observer;
use crate::config::SiteConfig;
use crate::scroll::{
    anchor_target_id, scroll_destination, ScrollEffects, ScrollFrame, ScrollThresholds,
    BACK_TO_TOP_VISIBLE_CLASS,
};
use crate::scroll_spy::{ScrollSpy, ACTIVE_CLASS, ACTIVE_COLOR};
use crate::viewport::ObserverOptions;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{request_animation_frame, AnimationFrame};
use std::{cell::RefCell, rc::Rc};
use web_sys::{window, Element, HtmlElement};

struct ScrollController {
    navbar: Option<Element>,
    back_to_top: Option<Element>,
    effects: RefCell<ScrollEffects>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl ScrollController {
    fn on_scroll(self: &Rc<Self>) {
        if !self.effects.borrow_mut().on_scroll() {
            return;
        }

        let controller = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            controller.frame.borrow_mut().take();
            let frame = controller.effects.borrow_mut().on_frame(dom::scroll_offset());
            if let Some(frame) = frame {
                controller.apply(frame);
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn apply(&self, frame: ScrollFrame) {
        if let Some(navbar) = &self.navbar {
            dom::set_style(navbar, "box-shadow", frame.navbar_shadow_value());
        }

        if let Some(button) = &self.back_to_top {
            dom::set_class(button, BACK_TO_TOP_VISIBLE_CLASS, frame.back_to_top_visible);
        }
    }
}

pub fn init_scroll_effects(config: &SiteConfig, back_to_top: Option<Element>) {
    let Some(win) = window() else {
        return;
    };

    let controller = Rc::new(ScrollController {
        navbar: dom::element_by_id::<Element>(NAVBAR_ID),
        back_to_top,
        effects: RefCell::new(ScrollEffects::new(ScrollThresholds::from_config(config))),
        frame: RefCell::new(None),
    });

    // Pages restored mid-scroll need the right state before the first event.
    let initial = controller.effects.borrow_mut().on_frame(dom::scroll_offset());
    if let Some(frame) = initial {
        controller.apply(frame);
    }

    EventListener::new(&win, "scroll", move |_| controller.on_scroll()).forget();
}

pub fn init_back_to_top() -> Option<Element> {
    let document = dom::document()?;

    let button = match document.get_element_by_id(BACK_TO_TOP_ID) {
        Some(existing) => existing,
        None => {
            let created = document.create_element("button").ok()?;
            created.set_id(BACK_TO_TOP_ID);
            created.set_class_name("back-to-top");
            let _ = created.set_attribute("type", "button");
            let _ = created.set_attribute("aria-label", "Back to top");
            created.set_inner_html(r#"<i class="fas fa-arrow-up"></i>"#);
            document.body()?.append_child(&created).ok()?;
            created
        }
    };

    EventListener::new(&button, "click", |_| dom::scroll_to(0.0)).forget();
    Some(button)
}

pub fn init_smooth_scroll() -> usize {
    let anchors = dom::select_all("a[href^=\"#\"]");

    for anchor in &anchors {
        let link = anchor.clone();
        EventListener::new_with_options(
            anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();

                let href = link.get_attribute("href").unwrap_or_default();
                let Some(id) = anchor_target_id(&href) else {
                    return;
                };
                let Some(target) = dom::document().and_then(|d| d.get_element_by_id(id)) else {
                    return;
                };

                let navbar_height = dom::element_by_id::<HtmlElement>(NAVBAR_ID)
                    .map(|navbar| f64::from(navbar.offset_height()))
                    .unwrap_or(0.0);
                dom::scroll_to(scroll_destination(
                    target.get_bounding_client_rect().top(),
                    dom::scroll_offset(),
                    navbar_height,
                ));
            },
        )
        .forget();
    }

    anchors.len()
}

pub fn init_scroll_spy() -> usize {
    let sections = dom::select_all("section[id]");
    let links = dom::select_all(".nav-link");
    if sections.is_empty() || links.is_empty() {
        return 0;
    }

    let hrefs = links
        .iter()
        .map(|link| link.get_attribute("href").unwrap_or_default())
        .collect();
    let spy = ScrollSpy::new(hrefs);

    let watching = observer::observe(&sections, &ObserverOptions::center_band(), move |section, visibility| {
        if !visibility.intersecting {
            return;
        }

        for mark in spy.activate(&section.id()) {
            if let Some(link) = links.get(mark.link) {
                dom::set_class(link, ACTIVE_CLASS, mark.active);
                dom::set_style(link, "color", if mark.active { ACTIVE_COLOR } else { "" });
            }
        }
    });

    if watching {
        sections.len()
    } else {
        0
    }
}
