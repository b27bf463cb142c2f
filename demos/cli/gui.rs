//! sdl3-backed video/audio/input frontend, driven synchronously: unlike
//! the teacher's `gui.rs`, which ran the emulator on its own thread and
//! talked to it over `Request`/`Reply` channels, `Emulator::step`/
//! `run_until_frame` here are plain synchronous calls the render loop
//! makes directly — there's no channel protocol to keep in sync with.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
    sync::{Arc, Mutex},
};

use sdl3::{
    audio::{self, AudioCallback, AudioSpec, AudioStream},
    event::Event,
    gamepad::{Axis, Button as PadButton, Gamepad},
    hint,
    keyboard::{KeyboardState, Scancode},
    pixels::Color,
    render::{Canvas, FRect},
    video::Window,
    EventPump,
};

use dotmatrix::{AudioSink, Button, ButtonState, Emulator, InputSource, SinkError, VideoSink, SCREEN_RESOLUTION};

const BLOCK_SZ: u32 = 4;
const SCREEN_W: usize = SCREEN_RESOLUTION.0;
const SCREEN_H: usize = SCREEN_RESOLUTION.1;
const WX: u32 = SCREEN_W as u32 * BLOCK_SZ;
const WY: u32 = SCREEN_H as u32 * BLOCK_SZ;

pub(crate) const SAMPLE_RATE_HZ: u32 = 44_100;
const MAX_QUEUED_SAMPLES: usize = SAMPLE_RATE_HZ as usize; // ~1s of audio

const AUDIO_CONFIG: AudioSpec = AudioSpec {
    freq: Some(SAMPLE_RATE_HZ as i32),
    channels: Some(2),
    format: Some(audio::AudioFormat::s16_sys()),
};

/// Pale-green DMG palette, darkest shade last (matches the PPU's 2-bit
/// shade indices, 0 = lightest).
const PALETTE: [Color; 4] = [
    Color::RGB(0xE0, 0xF0, 0xD0),
    Color::RGB(0x90, 0xB0, 0x70),
    Color::RGB(0x50, 0x70, 0x40),
    Color::RGB(0x18, 0x28, 0x10),
];

type Framebuffer = [[u8; SCREEN_W]; SCREEN_H];
pub(crate) type SharedFrame = Rc<RefCell<Framebuffer>>;
pub(crate) type SharedAudioBuf = Arc<Mutex<VecDeque<i16>>>;

struct FrameSink(SharedFrame);

impl VideoSink for FrameSink {
    fn present(&mut self, framebuffer: &Framebuffer) -> Result<(), SinkError> {
        *self.0.borrow_mut() = *framebuffer;
        Ok(())
    }
}

struct QueuedAudioSink(SharedAudioBuf);

impl AudioSink for QueuedAudioSink {
    fn push_samples(&mut self, samples: &[i16]) -> Result<(), SinkError> {
        let mut buf = self.0.lock().unwrap();
        if buf.len() >= MAX_QUEUED_SAMPLES {
            return Err(SinkError::BufferFull);
        }
        buf.extend(samples);
        Ok(())
    }
}

struct PullAudioCallback(SharedAudioBuf);

impl AudioCallback<i16> for PullAudioCallback {
    fn callback(&mut self, stream: &mut AudioStream, requested: i32) {
        let mut buf = self.0.lock().unwrap();
        let data: Vec<i16> = (0..requested as usize).map(|_| buf.pop_front().unwrap_or(0)).collect();
        stream.put_data_s16(&data).unwrap();
    }
}

/// Latches keyboard/gamepad-derived button state between frames;
/// `Emulator::process_input_event` feeds it and `is_pressed` answers
/// from the latch, the same shape as the library's own `LatchedSource`
/// test helper.
#[derive(Default)]
struct LatchedInputSource(ButtonState);

impl InputSource for LatchedInputSource {
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

/// Builds a video sink plus the handle the GUI reads completed frames
/// from; both share one buffer so `Emulator::step`'s `VideoSink::present`
/// calls are visible to `EmulatorGui::draw` without any extra plumbing.
pub(crate) fn new_video_sink() -> (Box<dyn VideoSink>, SharedFrame) {
    let frame: SharedFrame = Rc::new(RefCell::new([[0; SCREEN_W]; SCREEN_H]));
    (Box::new(FrameSink(frame.clone())), frame)
}

/// Builds an audio sink plus the handle the playback callback drains
/// from; same sharing as `new_video_sink`, for the same reason.
pub(crate) fn new_audio_sink() -> (Box<dyn AudioSink>, SharedAudioBuf) {
    let audio_buf: SharedAudioBuf = Arc::new(Mutex::new(VecDeque::new()));
    (Box::new(QueuedAudioSink(audio_buf.clone())), audio_buf)
}

pub(crate) fn boxed_input_source() -> Box<dyn InputSource> {
    Box::new(LatchedInputSource::default())
}

pub struct EmulatorGui {
    sdl_ctx: sdl3::Sdl,
    gamepad_sys: sdl3::GamepadSubsystem,

    emulator: Emulator,
    running: bool,
    gamepads: HashMap<u32, Gamepad>,
    prev_buttons: ButtonState,

    frame: SharedFrame,
    audio_buf: SharedAudioBuf,
}

impl EmulatorGui {
    /// `frame`/`audio_buf` must be the handles returned alongside the
    /// `VideoSink`/`AudioSink` this `emulator` was constructed with.
    pub fn new(emulator: Emulator, frame: SharedFrame, audio_buf: SharedAudioBuf) -> Self {
        hint::set(hint::names::RENDER_VSYNC, "1");
        let sdl_ctx = sdl3::init().unwrap();
        let gamepad_sys = sdl_ctx.gamepad().unwrap();

        Self {
            sdl_ctx,
            gamepad_sys,
            emulator,
            running: false,
            gamepads: HashMap::new(),
            prev_buttons: ButtonState::default(),
            frame,
            audio_buf,
        }
    }

    pub fn emulator(&self) -> &Emulator {
        &self.emulator
    }

    pub fn main_loop(&mut self) {
        self.running = true;

        let video_sys = self.sdl_ctx.video().unwrap();
        let audio_sys = self.sdl_ctx.audio().unwrap();

        let window = video_sys
            .window(&format!("dotmatrix - {}", self.emulator.cartridge().title()), WX, WY)
            .position_centered()
            .build()
            .unwrap();

        let stream = audio_sys
            .open_playback_stream(&AUDIO_CONFIG, PullAudioCallback(self.audio_buf.clone()))
            .unwrap();
        stream.resume().unwrap();

        let mut canvas = window.into_canvas();
        let mut event_pump = self.sdl_ctx.event_pump().unwrap();

        while self.running {
            self.update(&mut event_pump);
            if let Err(e) = self.emulator.run_until_frame() {
                eprintln!("Emulator stopped: {e}.");
                self.running = false;
                break;
            }
            self.draw(&mut canvas);
        }

        stream.pause().unwrap();
    }

    fn update(&mut self, event_pump: &mut EventPump) {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown { scancode: Some(Scancode::Escape), .. } => self.running = false,

                Event::ControllerDeviceAdded { which, .. } => {
                    if let Ok(g) = self.gamepad_sys.open(which) {
                        self.gamepads.insert(which, g);
                    }
                }

                Event::ControllerDeviceRemoved { which, .. } => {
                    self.gamepads.remove(&which);
                }

                _ => (),
            }
        }

        self.update_buttons(event_pump);
    }

    fn update_buttons(&mut self, event_pump: &EventPump) {
        let s = KeyboardState::new(event_pump);
        let keydown = |scancode| s.is_scancode_pressed(scancode);
        let mut pressed = ButtonState {
            a: keydown(Scancode::Z),
            b: keydown(Scancode::X),
            select: keydown(Scancode::Return),
            start: keydown(Scancode::Backspace),
            up: keydown(Scancode::W) || keydown(Scancode::Up),
            down: keydown(Scancode::S) || keydown(Scancode::Down),
            left: keydown(Scancode::A) || keydown(Scancode::Left),
            right: keydown(Scancode::D) || keydown(Scancode::Right),
        };

        const THRES: i16 = i16::MAX / 2;
        for g in self.gamepads.values() {
            pressed.a |= g.button(PadButton::South);
            pressed.b |= g.button(PadButton::West);
            pressed.select |= g.button(PadButton::Back);
            pressed.start |= g.button(PadButton::Start);
            pressed.up |= g.button(PadButton::DPadUp) || g.axis(Axis::LeftY) < -THRES;
            pressed.down |= g.button(PadButton::DPadDown) || g.axis(Axis::LeftY) > THRES;
            pressed.left |= g.button(PadButton::DPadLeft) || g.axis(Axis::LeftX) < -THRES;
            pressed.right |= g.button(PadButton::DPadRight) || g.axis(Axis::LeftX) > THRES;
        }

        for (button, (was, is)) in [
            (Button::Up, (self.prev_buttons.up, pressed.up)),
            (Button::Down, (self.prev_buttons.down, pressed.down)),
            (Button::Left, (self.prev_buttons.left, pressed.left)),
            (Button::Right, (self.prev_buttons.right, pressed.right)),
            (Button::A, (self.prev_buttons.a, pressed.a)),
            (Button::B, (self.prev_buttons.b, pressed.b)),
            (Button::Select, (self.prev_buttons.select, pressed.select)),
            (Button::Start, (self.prev_buttons.start, pressed.start)),
        ] {
            if was != is {
                self.emulator.process_input_event(button, is);
            }
        }
        self.prev_buttons = pressed;
    }

    fn draw(&self, canvas: &mut Canvas<Window>) {
        let fb = self.frame.borrow();

        canvas.set_draw_color(PALETTE[0]);
        canvas.clear();

        for (y, row) in fb.iter().enumerate() {
            for (x, &shade) in row.iter().enumerate() {
                let rect = FRect {
                    x: x as f32 * BLOCK_SZ as f32,
                    y: y as f32 * BLOCK_SZ as f32,
                    w: BLOCK_SZ as f32,
                    h: BLOCK_SZ as f32,
                };
                canvas.set_draw_color(PALETTE[shade as usize]);
                canvas.fill_rect(rect).unwrap();
            }
        }

        canvas.present();
    }
}
