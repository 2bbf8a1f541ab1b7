use super::dom::{self, NAV_MENU_ID, NAV_TOGGLE_ID};
use crate::log::Logger;
use crate::navigation::{transition, MenuState, NavEffect, NavEvent, NavPart};
use gloo_events::EventListener;
use std::{cell::Cell, rc::Rc};
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent, Node};

struct NavigationController {
    toggle: Element,
    menu: Element,
    bars: Vec<Element>,
    state: Cell<MenuState>,
}

impl NavigationController {
    fn dispatch(&self, event: NavEvent) {
        let (next, effects) = transition(self.state.get(), event);
        self.state.set(next);

        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&self, effect: NavEffect) {
        match effect {
            NavEffect::SetClass { part, class, on } => {
                let element = match part {
                    NavPart::Menu => &self.menu,
                    NavPart::Toggle => &self.toggle,
                };
                dom::set_class(element, class, on);
            }
            NavEffect::SetExpanded(open) => {
                let _ = self
                    .toggle
                    .set_attribute("aria-expanded", if open { "true" } else { "false" });
            }
            NavEffect::SetBarStyle {
                bar,
                property,
                value,
            } => {
                if let Some(element) = self.bars.get(bar) {
                    dom::set_style(element, property, value);
                }
            }
        }
    }

    fn contains(&self, node: Option<&Node>) -> bool {
        self.toggle.contains(node) || self.menu.contains(node)
    }
}

pub fn init(logger: Logger) -> bool {
    let (Some(toggle), Some(menu)) = (
        dom::element_by_id::<Element>(NAV_TOGGLE_ID),
        dom::element_by_id::<Element>(NAV_MENU_ID),
    ) else {
        dom::missing(logger, "navigation");
        return false;
    };
    let Some(document) = dom::document() else {
        return false;
    };

    let bars = dom::select_within(&toggle, ".nav-toggle-bar");
    let links = dom::select_within(&menu, ".nav-link");
    let controller = Rc::new(NavigationController {
        toggle,
        menu,
        bars,
        state: Cell::new(MenuState::Closed),
    });

    {
        let controller = Rc::clone(&controller);
        EventListener::new(&controller.toggle.clone(), "click", move |_| {
            controller.dispatch(NavEvent::ToggleClicked);
        })
        .forget();
    }

    for link in links {
        let controller = Rc::clone(&controller);
        EventListener::new(&link, "click", move |_| {
            controller.dispatch(NavEvent::LinkClicked);
        })
        .forget();
    }

    {
        let controller = Rc::clone(&controller);
        EventListener::new(&document, "click", move |event| {
            let node = event.target().and_then(|target| target.dyn_into::<Node>().ok());
            if !controller.contains(node.as_ref()) {
                controller.dispatch(NavEvent::OutsideClick);
            }
        })
        .forget();
    }

    EventListener::new(&document, "keydown", move |event| {
        let escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Escape");
        if escape {
            controller.dispatch(NavEvent::EscapePressed);
        }
    })
    .forget();

    true
}
