//! SDL event handling
//!
//! Polls SDL events and converts them to viewer events.

/// Viewer event types
#[derive(Debug, Clone)]
pub enum ViewerEvent {
    /// Quit the viewer
    Quit,
    /// Mouse button pressed
    MouseDown { x: f32, y: f32, button: MouseButton },
    /// Key pressed
    KeyDown { scancode: u32, modifiers: Modifiers },
    /// Window resize
    WindowResize { width: u32, height: u32 },
}

/// Keyboard modifier state
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Ctrl key is held
    pub ctrl: bool,
    /// Shift key is held
    pub shift: bool,
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u8),
}

// SDL event type constants
const SDL_QUIT: u32 = 0x100;
const SDL_KEYDOWN: u32 = 0x300;
const SDL_MOUSEBUTTONDOWN: u32 = 0x401;
const SDL_WINDOWEVENT: u32 = 0x200;

// SDL scancode constants
pub const SCANCODE_ESCAPE: u32 = 41;
pub const SCANCODE_SPACE: u32 = 44;
pub const SCANCODE_RETURN: u32 = 40;

pub const SCANCODE_UP: u32 = 82;
pub const SCANCODE_DOWN: u32 = 81;
pub const SCANCODE_LEFT: u32 = 80;
pub const SCANCODE_RIGHT: u32 = 79;

// Letter keys
pub const SCANCODE_G: u32 = 10;
pub const SCANCODE_H: u32 = 11;
pub const SCANCODE_I: u32 = 12;
pub const SCANCODE_N: u32 = 17;
pub const SCANCODE_O: u32 = 18;
pub const SCANCODE_P: u32 = 19;
pub const SCANCODE_Q: u32 = 20;
pub const SCANCODE_R: u32 = 21;
pub const SCANCODE_S: u32 = 22;
pub const SCANCODE_V: u32 = 25;
pub const SCANCODE_X: u32 = 27;

// SDL keyboard modifier masks
const KMOD_CTRL: u16 = 0x00C0;
const KMOD_SHIFT: u16 = 0x0003;

// SDL window event subtypes
const SDL_WINDOWEVENT_CLOSE: u8 = 14;
const SDL_WINDOWEVENT_SIZE_CHANGED: u8 = 6;

/// Poll all pending SDL events
///
/// # Safety
/// This function uses raw SDL2 calls.
pub fn poll_events() -> Vec<ViewerEvent> {
    let mut events = Vec::new();

    unsafe {
        let mut raw_event: sdl2::sys::SDL_Event = std::mem::zeroed();

        while sdl2::sys::SDL_PollEvent(&mut raw_event) != 0 {
            let event_type = raw_event.type_;

            match event_type {
                SDL_QUIT => {
                    events.push(ViewerEvent::Quit);
                }

                SDL_KEYDOWN => {
                    let key_event = raw_event.key;
                    let scancode = key_event.keysym.scancode as u32;
                    let mod_state = key_event.keysym.mod_;
                    let modifiers = Modifiers {
                        ctrl: (mod_state & KMOD_CTRL) != 0,
                        shift: (mod_state & KMOD_SHIFT) != 0,
                    };
                    events.push(ViewerEvent::KeyDown { scancode, modifiers });
                }

                SDL_MOUSEBUTTONDOWN => {
                    let button_event = raw_event.button;
                    let button = match button_event.button {
                        1 => MouseButton::Left,
                        2 => MouseButton::Middle,
                        3 => MouseButton::Right,
                        b => MouseButton::Other(b),
                    };
                    events.push(ViewerEvent::MouseDown {
                        x: button_event.x as f32,
                        y: button_event.y as f32,
                        button,
                    });
                }

                SDL_WINDOWEVENT => {
                    let window_event = raw_event.window;
                    match window_event.event {
                        SDL_WINDOWEVENT_CLOSE => {
                            events.push(ViewerEvent::Quit);
                        }
                        SDL_WINDOWEVENT_SIZE_CHANGED => {
                            events.push(ViewerEvent::WindowResize {
                                width: window_event.data1 as u32,
                                height: window_event.data2 as u32,
                            });
                        }
                        _ => {}
                    }
                }

                _ => {
                    // Ignore unknown events
                }
            }
        }
    }

    events
}
