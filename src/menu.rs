//! Narrow-viewport drop menu (`.drop_btn` / `.drop_menu`).

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

    pub fn aria_expanded(self) -> &'static str {
        if self.is_open() {
            "true"
        } else {
            "false"
        }
    }

    pub fn aria_hidden(self) -> &'static str {
        if self.is_open() {
            "false"
        } else {
            "true"
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuInput {
    ToggleClicked,
    LinkClicked,
    OutsideClicked,
    Escape,
    /// `focused` is the index of the active element within the focus ring
    /// (toggle first, then the menu's focusable descendants).
    Tab {
        shift: bool,
        focused: Option<usize>,
        ring_len: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusRequest {
    Toggle,
    FirstLink,
    Ring(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuOutcome {
    pub state: MenuState,
    pub changed: bool,
    pub focus: Option<FocusRequest>,
    pub prevent_default: bool,
}

impl MenuOutcome {
    fn unchanged(state: MenuState) -> Self {
        Self {
            state,
            changed: false,
            focus: None,
            prevent_default: false,
        }
    }

    fn moved_to(from: MenuState, to: MenuState, focus: Option<FocusRequest>) -> Self {
        Self {
            state: to,
            changed: from != to,
            focus,
            prevent_default: false,
        }
    }
}

pub fn transition(state: MenuState, input: MenuInput) -> MenuOutcome {
    match (state, input) {
        (MenuState::Closed, MenuInput::ToggleClicked) => {
            MenuOutcome::moved_to(state, MenuState::Open, Some(FocusRequest::FirstLink))
        }
        (MenuState::Open, MenuInput::ToggleClicked) => {
            MenuOutcome::moved_to(state, MenuState::Closed, None)
        }
        (_, MenuInput::LinkClicked) => MenuOutcome::moved_to(state, MenuState::Closed, None),
        (MenuState::Open, MenuInput::OutsideClicked) => {
            MenuOutcome::moved_to(state, MenuState::Closed, None)
        }
        (MenuState::Open, MenuInput::Escape) => {
            MenuOutcome::moved_to(state, MenuState::Closed, Some(FocusRequest::Toggle))
        }
        (
            MenuState::Open,
            MenuInput::Tab {
                shift,
                focused,
                ring_len,
            },
        ) => match trap_focus(ring_len, focused, shift) {
            Some(index) => MenuOutcome {
                focus: Some(FocusRequest::Ring(index)),
                prevent_default: true,
                ..MenuOutcome::unchanged(state)
            },
            None => MenuOutcome::unchanged(state),
        },
        (MenuState::Closed, _) => MenuOutcome::unchanged(state),
    }
}

/// Wraps Tab off the last ring element to the first and Shift+Tab off the
/// first to the last. `None` leaves focus movement to the browser.
pub fn trap_focus(ring_len: usize, focused: Option<usize>, shift: bool) -> Option<usize> {
    if ring_len == 0 {
        return None;
    }
    let last = ring_len - 1;

    match (shift, focused) {
        (true, Some(0)) => Some(last),
        (false, Some(index)) if index == last => Some(0),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Menu {
    state: MenuState,
}

impl Menu {
    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn handle(&mut self, input: MenuInput) -> MenuOutcome {
        let outcome = transition(self.state, input);
        self.state = outcome.state;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(shift: bool, focused: Option<usize>, ring_len: usize) -> MenuInput {
        MenuInput::Tab {
            shift,
            focused,
            ring_len,
        }
    }

    #[test]
    fn toggle_opens_and_focuses_first_link() {
        let mut menu = Menu::default();

        let outcome = menu.handle(MenuInput::ToggleClicked);
        assert_eq!(outcome.state, MenuState::Open);
        assert!(outcome.changed);
        assert_eq!(outcome.focus, Some(FocusRequest::FirstLink));
        assert_eq!(menu.state().aria_expanded(), "true");
        assert_eq!(menu.state().aria_hidden(), "false");

        let outcome = menu.handle(MenuInput::ToggleClicked);
        assert_eq!(outcome.state, MenuState::Closed);
        assert_eq!(outcome.focus, None);
    }

    #[test]
    fn link_and_outside_clicks_close() {
        let mut menu = Menu::default();

        menu.handle(MenuInput::ToggleClicked);
        assert_eq!(menu.handle(MenuInput::LinkClicked).state, MenuState::Closed);

        menu.handle(MenuInput::ToggleClicked);
        assert_eq!(menu.handle(MenuInput::OutsideClicked).state, MenuState::Closed);
    }

    #[test]
    fn escape_closes_and_returns_focus_to_toggle() {
        let mut menu = Menu::default();
        menu.handle(MenuInput::ToggleClicked);

        let outcome = menu.handle(MenuInput::Escape);
        assert_eq!(outcome.state, MenuState::Closed);
        assert_eq!(outcome.focus, Some(FocusRequest::Toggle));
    }

    #[test]
    fn tab_wraps_inside_open_menu() {
        let mut menu = Menu::default();
        menu.handle(MenuInput::ToggleClicked);

        let outcome = menu.handle(tab(false, Some(4), 5));
        assert_eq!(outcome.focus, Some(FocusRequest::Ring(0)));
        assert!(outcome.prevent_default);
        assert_eq!(outcome.state, MenuState::Open);

        let outcome = menu.handle(tab(true, Some(0), 5));
        assert_eq!(outcome.focus, Some(FocusRequest::Ring(4)));
        assert!(outcome.prevent_default);
    }

    #[test]
    fn tab_in_the_middle_is_left_to_the_browser() {
        let mut menu = Menu::default();
        menu.handle(MenuInput::ToggleClicked);

        assert_eq!(menu.handle(tab(false, Some(2), 5)).focus, None);
        assert_eq!(menu.handle(tab(true, Some(3), 5)).focus, None);
        assert_eq!(menu.handle(tab(false, None, 5)).focus, None);
        assert!(!menu.handle(tab(false, Some(2), 5)).prevent_default);
    }

    #[test]
    fn single_element_ring_keeps_focus_on_it() {
        assert_eq!(trap_focus(1, Some(0), false), Some(0));
        assert_eq!(trap_focus(1, Some(0), true), Some(0));
        assert_eq!(trap_focus(0, None, false), None);
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let mut menu = Menu::default();

        assert_eq!(menu.handle(MenuInput::Escape), MenuOutcome::unchanged(MenuState::Closed));
        assert_eq!(menu.handle(tab(false, Some(0), 3)).focus, None);
        assert_eq!(menu.handle(MenuInput::OutsideClicked).state, MenuState::Closed);
    }

    #[test]
    fn closing_a_closed_menu_is_idempotent() {
        let mut menu = Menu::default();
        let before = (menu.state().aria_expanded(), menu.state().aria_hidden());

        let outcome = menu.handle(MenuInput::LinkClicked);

        assert_eq!(outcome.state, MenuState::Closed);
        assert!(!outcome.changed);
        assert_eq!(outcome.focus, None);
        assert_eq!(
            (menu.state().aria_expanded(), menu.state().aria_hidden()),
            before
        );
    }
}
