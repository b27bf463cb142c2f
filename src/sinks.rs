//! Output/input seams between the emulator core and a frontend. The
//! teacher wires a frontend directly to `macroquad`/`cpal` inside
//! `emulator.rs`; here the core stays frontend-agnostic and a caller
//! supplies these instead, the way a library crate exposes a trait at
//! its boundary rather than picking a windowing toolkit for you.

use crate::info::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// What a sink reports back when it can't take what it was given.
///
/// `BufferFull` is the one error a sink can raise that the step loop
/// treats as non-fatal: logged at `warn!` and the batch is dropped.
/// Anything else becomes an `EmulatorError::HostSinkFailure`.
#[derive(Debug)]
pub enum SinkError {
    BufferFull,
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Receives a completed frame once per VBlank.
///
/// Pixels are the PPU's native 2-bit shade indices (0 = lightest, 3 =
/// darkest), row-major, not RGB — a frontend owns the palette.
pub trait VideoSink {
    fn present(&mut self, framebuffer: &[[u8; SCREEN_WIDTH]; SCREEN_HEIGHT]) -> Result<(), SinkError>;
}

/// Receives interleaved stereo samples (`[l0, r0, l1, r1, ...]`) as the
/// APU's sampling period elapses. The APU's internal mixer works in
/// normalized `f32`; the orchestrator converts to `i16` at this
/// boundary so sinks never have to agree on a float format.
pub trait AudioSink {
    fn push_samples(&mut self, samples: &[i16]) -> Result<(), SinkError>;
}

/// A button on the DMG's 2x4 input matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Select,
    Start,
}

/// Current press state of every button, polled once per step.
///
/// A frontend owns whatever representation it likes (keyboard state,
/// gamepad API, network message) and converts to this each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub a: bool,
    pub b: bool,
    pub select: bool,
    pub start: bool,
}

impl ButtonState {
    pub fn set(&mut self, button: Button, pressed: bool) {
        let field = match button {
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
            Button::A => &mut self.a,
            Button::B => &mut self.b,
            Button::Select => &mut self.select,
            Button::Start => &mut self.start,
        };
        *field = pressed;
    }

    pub(crate) fn to_internal_repr(self) -> (crate::regs::DPad, crate::regs::ActionButtons) {
        let mut dpad = crate::regs::DPad::new(0);
        dpad.up = self.up as u8;
        dpad.down = self.down as u8;
        dpad.left = self.left as u8;
        dpad.right = self.right as u8;

        let mut buttons = crate::regs::ActionButtons::new(0);
        buttons.a = self.a as u8;
        buttons.b = self.b as u8;
        buttons.select = self.select as u8;
        buttons.start = self.start as u8;

        (dpad, buttons)
    }
}

/// Either an event-driven or a polling button provider; a frontend
/// implements whichever fits its input backend.
///
/// `Emulator::step` calls `is_pressed` for all eight buttons every
/// step to build the frame's `ButtonState`; an event-driven frontend
/// (e.g. an OS keyboard callback) routes events through
/// `process_event` and answers `is_pressed` from its own latched
/// state, while a polling frontend (e.g. a gamepad API sampled each
/// frame) can leave `process_event` a no-op and answer `is_pressed`
/// directly from the backend.
pub trait InputSource {
    fn process_event(&mut self, button: Button, pressed: bool);
    fn is_pressed(&self, button: Button) -> bool;
}

/// No-op source for headless use (tests, benchmarks): every button
/// always reads as released.
impl InputSource for () {
    fn process_event(&mut self, _button: Button, _pressed: bool) {}
    fn is_pressed(&self, _button: Button) -> bool {
        false
    }
}

pub(crate) const ALL_BUTTONS: [Button; 8] = [
    Button::Up,
    Button::Down,
    Button::Left,
    Button::Right,
    Button::A,
    Button::B,
    Button::Select,
    Button::Start,
];

pub(crate) fn poll(source: &dyn InputSource) -> ButtonState {
    let mut state = ButtonState::default();
    for &button in &ALL_BUTTONS {
        state.set(button, source.is_pressed(button));
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_state_set_toggles_only_the_named_field() {
        let mut state = ButtonState::default();
        state.set(Button::A, true);
        state.set(Button::Left, true);
        assert_eq!(
            state,
            ButtonState { a: true, left: true, ..ButtonState::default() }
        );
    }

    #[derive(Default)]
    struct LatchedSource(ButtonState);

    impl InputSource for LatchedSource {
        fn process_event(&mut self, button: Button, pressed: bool) {
            self.0.set(button, pressed);
        }

        fn is_pressed(&self, button: Button) -> bool {
            match button {
                Button::Up => self.0.up,
                Button::Down => self.0.down,
                Button::Left => self.0.left,
                Button::Right => self.0.right,
                Button::A => self.0.a,
                Button::B => self.0.b,
                Button::Select => self.0.select,
                Button::Start => self.0.start,
            }
        }
    }

    #[test]
    fn poll_reflects_events_processed_since_the_last_poll() {
        let mut source = LatchedSource::default();
        source.process_event(Button::A, true);
        source.process_event(Button::Down, true);
        let state = poll(&source);
        assert_eq!(state, ButtonState { a: true, down: true, ..ButtonState::default() });
    }

    #[test]
    fn unit_input_source_never_reports_a_press() {
        assert_eq!(poll(&()), ButtonState::default());
    }

    #[test]
    fn to_internal_repr_maps_every_button() {
        let mut state = ButtonState::default();
        state.set(Button::Start, true);
        state.set(Button::Right, true);
        let (dpad, buttons) = state.to_internal_repr();
        assert_eq!(dpad.right, 1);
        assert_eq!(dpad.up, 0);
        assert_eq!(buttons.start, 1);
        assert_eq!(buttons.a, 0);
    }
}
