//! Keyboard and gamepad input
//!
//! Device events are mapped to a small set of semantic actions so the session
//! state machine never sees raw key codes.

/// Semantic action driving the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Activate the highlighted menu option
    Confirm,
    /// Confirm in menus, pause during play
    Start,
    /// Flip between the two menu options
    ToggleSelection,
    /// Escape/back: pause, resume, or leave a lost run
    Cancel,
    MoveLeft,
    MoveRight,
}

/// Press or release of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub action: Action,
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(action: Action) -> Self {
        Self {
            action,
            pressed: true,
        }
    }

    pub fn release(action: Action) -> Self {
        Self {
            action,
            pressed: false,
        }
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    A,
    D,
    Return,
    KeypadEnter,
    Escape,
    Other,
}

impl Key {
    pub fn action(self) -> Option<Action> {
        match self {
            Key::Up | Key::Down => Some(Action::ToggleSelection),
            Key::Left | Key::A => Some(Action::MoveLeft),
            Key::Right | Key::D => Some(Action::MoveRight),
            Key::Return | Key::KeypadEnter => Some(Action::Confirm),
            Key::Escape => Some(Action::Cancel),
            Key::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
    Start,
    Back,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

impl GamepadButton {
    pub fn action(self) -> Action {
        use GamepadButton::*;
        match self {
            A | B | X | Y | LeftShoulder | RightShoulder | LeftTrigger | RightTrigger => {
                Action::Confirm
            }
            Start => Action::Start,
            Back => Action::Cancel,
            DpadUp | DpadDown => Action::ToggleSelection,
            DpadLeft => Action::MoveLeft,
            DpadRight => Action::MoveRight,
        }
    }
}

/// Map a key press/release to an event
pub fn key_event(key: Key, pressed: bool) -> Option<InputEvent> {
    key.action().map(|action| InputEvent { action, pressed })
}

/// Map a gamepad press/release to an event
pub fn gamepad_event(button: GamepadButton, pressed: bool) -> InputEvent {
    InputEvent {
        action: button.action(),
        pressed,
    }
}
