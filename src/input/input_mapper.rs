//! Input mapping from raw window events to semantic actions
//!
//! Only quitting is meaningful for this scene: closing the window or
//! pressing Escape. Everything else is ignored.

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Actions triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Stop the frame loop and exit
    Quit,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map any window event to an action
    pub fn map_window_event(event: &WindowEvent) -> Option<InputAction> {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(InputAction::Quit),
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(key) => Self::map_keyboard(key, event.state),
                PhysicalKey::Unidentified(_) => None,
            },
            _ => None,
        }
    }

    /// Map keyboard input to an action
    ///
    /// Only key presses count; releases never map to an action.
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Quit),
            _ => None,
        }
    }
}
