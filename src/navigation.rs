/// Class shared by the menu container and the toggle while the menu is open.
pub const OPEN_CLASS: &str = "active";

/// Inline styles for the three hamburger bars while the menu is open.
pub const OPEN_BAR_STYLES: [BarStyle; 3] = [
    BarStyle {
        property: "transform",
        value: "rotate(45deg) translate(5px, 5px)",
    },
    BarStyle {
        property: "opacity",
        value: "0",
    },
    BarStyle {
        property: "transform",
        value: "rotate(-45deg) translate(5px, -5px)",
    },
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEvent {
    ToggleClicked,
    LinkClicked,
    OutsideClick,
    EscapePressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarStyle {
    pub property: &'static str,
    pub value: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavPart {
    Menu,
    Toggle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEffect {
    SetClass {
        part: NavPart,
        class: &'static str,
        on: bool,
    },
    SetExpanded(bool),
    /// An empty `value` clears the inline property.
    SetBarStyle {
        bar: usize,
        property: &'static str,
        value: &'static str,
    },
}

pub fn transition(state: MenuState, event: NavEvent) -> (MenuState, Vec<NavEffect>) {
    let next = match (state, event) {
        (MenuState::Closed, NavEvent::ToggleClicked) => MenuState::Open,
        (MenuState::Open, NavEvent::ToggleClicked) => MenuState::Closed,
        // Links always close, so a stale open class can never survive navigation.
        (_, NavEvent::LinkClicked) => MenuState::Closed,
        (MenuState::Open, NavEvent::OutsideClick | NavEvent::EscapePressed) => MenuState::Closed,
        (MenuState::Closed, NavEvent::OutsideClick | NavEvent::EscapePressed) => {
            return (MenuState::Closed, Vec::new());
        }
    };

    (next, render(next))
}

pub fn render(state: MenuState) -> Vec<NavEffect> {
    let open = state.is_open();
    let mut effects = vec![
        NavEffect::SetClass {
            part: NavPart::Menu,
            class: OPEN_CLASS,
            on: open,
        },
        NavEffect::SetClass {
            part: NavPart::Toggle,
            class: OPEN_CLASS,
            on: open,
        },
        NavEffect::SetExpanded(open),
    ];

    effects.extend(OPEN_BAR_STYLES.iter().enumerate().map(|(bar, style)| {
        NavEffect::SetBarStyle {
            bar,
            property: style.property,
            value: if open { style.value } else { "" },
        }
    }));

    effects
}
