use super::dom;
use crate::config::SiteConfig;
use crate::notification::{NotificationAction, NotificationCenter, NotificationPhase, Severity};
use gloo_timers::callback::Timeout;
use std::{cell::RefCell, rc::Rc};
use web_sys::Element;
use yew::prelude::*;

const HOST_CLASS: &str = "notification-host";

impl Reducible for NotificationCenter {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[derive(Default)]
struct NotifierSlot {
    dispatch: Option<Callback<NotificationAction>>,
    pending: Option<NotificationAction>,
}

/// Actions sent before the component mounts are held back; only the latest survives.
#[derive(Clone, Default)]
pub struct Notifier {
    slot: Rc<RefCell<NotifierSlot>>,
}

impl PartialEq for Notifier {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl Notifier {
    pub fn show(&self, message: &str, severity: Severity) {
        self.send(NotificationAction::Show {
            message: message.to_string(),
            severity,
        });
    }

    fn send(&self, action: NotificationAction) {
        let dispatch = self.slot.borrow().dispatch.clone();
        match dispatch {
            Some(dispatch) => dispatch.emit(action),
            None => self.slot.borrow_mut().pending = Some(action),
        }
    }

    fn attach(&self, dispatch: Callback<NotificationAction>) {
        let pending = {
            let mut slot = self.slot.borrow_mut();
            slot.dispatch = Some(dispatch.clone());
            slot.pending.take()
        };

        if let Some(action) = pending {
            dispatch.emit(action);
        }
    }

    fn detach(&self) {
        self.slot.borrow_mut().dispatch = None;
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationHostProps {
    pub notifier: Notifier,
    pub display_ms: u32,
    pub fade_ms: u32,
}

#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let center = use_reducer(NotificationCenter::default);

    {
        let dispatcher = center.dispatcher();
        use_effect_with(props.notifier.clone(), move |notifier| {
            notifier.attach(Callback::from(move |action| dispatcher.dispatch(action)));
            let notifier = notifier.clone();
            move || notifier.detach()
        });
    }

    {
        let dispatcher = center.dispatcher();
        let display_ms = props.display_ms;
        let fade_ms = props.fade_ms;
        use_effect_with(center.stage(), move |stage| {
            let timer = match *stage {
                Some((id, NotificationPhase::Visible)) => Some(Timeout::new(display_ms, move || {
                    dispatcher.dispatch(NotificationAction::Dismiss(id))
                })),
                Some((id, NotificationPhase::FadingOut)) => Some(Timeout::new(fade_ms, move || {
                    dispatcher.dispatch(NotificationAction::Detach(id))
                })),
                None => None,
            };
            move || drop(timer)
        });
    }

    let Some(notification) = center.current() else {
        return html! {};
    };

    let onclose = {
        let dispatcher = center.dispatcher();
        let id = notification.id;
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(NotificationAction::Dismiss(id)))
    };
    let fading = notification.phase == NotificationPhase::FadingOut;
    let role = match notification.severity {
        Severity::Error => "alert",
        Severity::Success => "status",
    };

    html! {
        <div
            key={notification.key()}
            class={classes!("notification", notification.class_name(), fading.then_some("fade-out"))}
            role={role}
        >
            <span class="notification-message">{notification.message.clone()}</span>
            <button
                class="notification-close"
                type="button"
                aria-label="Close notification"
                onclick={onclose}
            >
                {"×"}
            </button>
        </div>
    }
}

fn create_host() -> Option<Element> {
    let document = dom::document()?;
    let host = document.create_element("div").ok()?;
    host.set_class_name(HOST_CLASS);
    document.body()?.append_child(&host).ok()?;
    Some(host)
}

pub fn mount(config: &SiteConfig) -> Notifier {
    let notifier = Notifier::default();
    let Some(host) = create_host() else {
        return notifier;
    };

    yew::Renderer::<NotificationHost>::with_root_and_props(
        host,
        NotificationHostProps {
            notifier: notifier.clone(),
            display_ms: config.notification_display_ms,
            fade_ms: config.notification_fade_ms,
        },
    )
    .render();

    notifier
}
