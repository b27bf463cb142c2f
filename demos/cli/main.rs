mod gui;

use std::{
    fmt::{Debug, Display},
    fs::File,
    io::Write,
    path::PathBuf,
    process::exit,
};

use clap::{arg, Parser, Subcommand};
use dotmatrix::{Emulator, PaceMode};

#[derive(Parser)]
#[command(name = "dotmatrix", about = "Game Boy (DMG) emulator")]
struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Verbosity passed straight to env_logger (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Run as fast as the host allows instead of tracking real time.
    #[arg(long, global = true, conflicts_with = "speed")]
    max_speed: bool,

    /// Run at `N` times real-time speed.
    #[arg(long, value_name = "N", global = true)]
    speed: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a ROM into the emulator and run.
    #[command(arg_required_else_help = true)]
    Run {
        /// Game Boy ROM file
        rom_file: PathBuf,
        /// Save the emulator state into a save file on exit
        #[arg(long, value_name = "SAVE_FILE")]
        save_to: Option<PathBuf>,
    },

    /// Resume the emulator from a save file; on exit the new state is
    /// saved into the same file unless changed using options below.
    #[command(verbatim_doc_comment, arg_required_else_help = true)]
    Resume {
        /// Saved file
        save_file: PathBuf,
        /// Do not save new state into the current save file
        #[arg(long, conflicts_with = "save_to")]
        no_save: bool,
        /// Save new state into the given file while leaving the
        /// current save file unchanged
        #[arg(long, value_name = "SAVE_FILE", conflicts_with = "no_save")]
        save_to: Option<PathBuf>,
    },

    /// Extract the ROM from a save file and write it into the given file.
    ExtractRom {
        /// Saved file
        save_file: PathBuf,
        /// New ROM file
        rom_file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(&cli.log_level);
    let pace_mode = if cli.max_speed {
        PaceMode::MaxSpeed
    } else if let Some(mult) = cli.speed {
        PaceMode::Multiplier(mult)
    } else {
        PaceMode::RealTime
    };

    let (video_sink, frame) = gui::new_video_sink();
    let (audio_sink, audio_buf) = gui::new_audio_sink();
    let input_source = gui::boxed_input_source();

    let (emulator, save_to) = match cli.commands {
        Commands::Run { rom_file, save_to } => (
            Emulator::new(
                &read_or_exit(&rom_file, "ROM file"),
                video_sink,
                audio_sink,
                input_source,
                pace_mode,
                gui::SAMPLE_RATE_HZ,
            ),
            save_to,
        ),

        Commands::Resume { save_file, no_save, save_to } => {
            let save_to = if no_save {
                None
            } else if save_to.is_some() {
                save_to
            } else {
                Some(save_file.clone())
            };
            (
                Emulator::from_saved(
                    &read_or_exit(&save_file, "save file"),
                    video_sink,
                    audio_sink,
                    input_source,
                    pace_mode,
                    gui::SAMPLE_RATE_HZ,
                ),
                save_to,
            )
        }

        Commands::ExtractRom { save_file, rom_file } => {
            match Emulator::rom_from_saved(&read_or_exit(&save_file, "save file")) {
                Ok(rom) => {
                    write_or_exit(&rom_file, "ROM file", &rom);
                    eprintln!("ROM saved to file {rom_file:?}.");
                }
                Err(e) => err_exit("Decoding save file failed", e),
            }
            return;
        }
    };

    if let Some(path) = &save_to {
        if !path.is_file() && path.exists() {
            err_exit(format!("{path:?} is not a file"), "InvalidArgument");
        }
    }
    let emulator = match emulator {
        Ok(emulator) => emulator,
        Err(e) => err_exit("Failed to initialize emulator", e),
    };

    let mut gui = gui::EmulatorGui::new(emulator, frame, audio_buf);
    eprint_keybindings();
    gui.main_loop();

    if let Some(path) = save_to {
        match gui.emulator().save_state() {
            Ok(saved) => {
                write_or_exit(&path, "save file", &saved);
                eprintln!("Game state saved to file {path:?}.");
            }
            Err(e) => err_exit("Failed to encode save state", e),
        }
    }

    eprintln!("Quit.");
}

fn init_logger(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn read_or_exit(path: &PathBuf, err_name: &str) -> Vec<u8> {
    match std::fs::read(path) {
        Ok(ret) => ret,
        Err(e) => err_exit(format!("Cannot open {err_name} {path:?} for reading"), e.kind()),
    }
}

fn write_or_exit(path: &PathBuf, err_name: &str, data: &[u8]) {
    match File::create(path) {
        Ok(mut f) => {
            if let Err(e) = f.write_all(data) {
                err_exit(format!("Write to {err_name} {path:?} failed"), e.kind());
            }
        }
        Err(e) => err_exit(format!("Cannot open {err_name} {path:?} for writing"), e.kind()),
    }
}

fn err_exit<M: Display, E: Debug>(msg: M, err: E) -> ! {
    eprintln!("{msg}.");
    eprintln!("Error: {err:?}.");
    exit(1);
}

fn eprint_keybindings() {
    eprintln!("--------Emulator Keybindings--------");
    eprintln!("START  : backspace");
    eprintln!("SELECT : return");
    eprintln!("A      : Z");
    eprintln!("B      : X");
    eprintln!("UP     : W/↑");
    eprintln!("DOWN   : S/↓");
    eprintln!("LEFT   : A/←");
    eprintln!("RIGHT  : D/→");
    eprintln!();

    eprintln!("--------Control Keybindings---------");
    eprintln!("Exit emulator   : escape");
    eprintln!();
}
