//! Terminal player: draws the towers as text and takes one command per
//! line on stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use hanoi_viz::input::{resolve_key, ControlAction};
use hanoi_viz::options::{step_speed, Options};
use hanoi_viz::scene::celebration::STEP_INTERVAL;
use hanoi_viz::scene::TextRenderer;
use hanoi_viz::PlaybackController;

/// ANSI: clear the screen and home the cursor.
const CLEAR: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Parser)]
#[command(
    name = "hanoi-viz",
    version,
    about = "Watch the optimal Tower of Hanoi solution play out"
)]
struct Cli {
    /// Number of disks (1-10).
    #[arg(long)]
    disks: Option<u8>,
    /// Seconds taken by each disk's motion.
    #[arg(long)]
    speed: Option<f32>,
    /// Animation frames per move.
    #[arg(long)]
    frames: Option<u32>,
    /// Load options from a TOML preset.
    #[arg(long, value_name = "FILE")]
    preset: Option<PathBuf>,
    /// Write the effective options to a TOML preset.
    #[arg(long, value_name = "FILE")]
    save_preset: Option<PathBuf>,
    /// Print the options JSON schema and exit.
    #[arg(long)]
    schema: bool,
    /// Start playback immediately.
    #[arg(long)]
    autostart: bool,
    /// Grid width in characters.
    #[arg(long, default_value_t = 80)]
    columns: usize,
    /// Grid height in characters, excluding the status line.
    #[arg(long, default_value_t = 24)]
    rows: usize,
    /// Paint disks in their palette colours (24-bit ANSI).
    #[arg(long)]
    color: bool,
}

impl Cli {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.preset {
            Some(path) => {
                let options = Options::load(path).with_context(|| {
                    format!("loading preset {}", path.display())
                })?;
                log::info!("loaded preset {}", path.display());
                options
            }
            None => Options::default(),
        };
        if let Some(disks) = self.disks {
            options.playback.disk_count = disks;
        }
        if let Some(speed) = self.speed {
            options.playback.speed_secs = speed;
        }
        if let Some(frames) = self.frames {
            options.playback.frame_count = frames;
        }
        options.validate()?;
        Ok(options)
    }
}

enum Flow {
    Continue,
    Quit,
}

struct Player {
    controller: PlaybackController,
    renderer: TextRenderer,
    options: Options,
}

impl Player {
    fn new(options: Options, cli: &Cli) -> Result<Self> {
        let controller = PlaybackController::new(&options)?;
        let renderer =
            TextRenderer::new(controller.layout(), cli.columns, cli.rows)
                .with_color(cli.color);
        Ok(Self {
            controller,
            renderer,
            options,
        })
    }

    /// Apply one line of input. Returns a message to show, if any.
    fn command(&mut self, line: &str) -> (Flow, Option<String>) {
        let bindings = &self.options.keybindings;
        if let Some(action) = resolve_key(bindings, line) {
            return self.action(action);
        }
        if let Ok(disks) = line.trim().parse::<u8>() {
            return match self.controller.configure(disks) {
                Ok(()) => {
                    self.renderer.set_layout(self.controller.layout());
                    (Flow::Continue, None)
                }
                Err(e) => (Flow::Continue, Some(e.to_string())),
            };
        }
        if line.trim().is_empty() {
            return (Flow::Continue, None);
        }
        (Flow::Continue, Some(self.help()))
    }

    fn action(&mut self, action: ControlAction) -> (Flow, Option<String>) {
        let message = match action {
            ControlAction::Start => {
                self.controller.start().err().map(|e| e.to_string())
            }
            ControlAction::TogglePause => {
                self.controller.toggle_pause();
                None
            }
            ControlAction::Reset => {
                self.controller.reset();
                None
            }
            ControlAction::Faster | ControlAction::Slower => {
                let steps = if action == ControlAction::Faster { -1 } else { 1 };
                let secs = step_speed(self.controller.speed_secs(), steps);
                self.controller
                    .set_speed(secs)
                    .err()
                    .map(|e| e.to_string())
                    .or_else(|| Some(format!("speed: {secs:.1}s per move")))
            }
            ControlAction::Quit => return (Flow::Quit, None),
        };
        (Flow::Continue, message)
    }

    fn help(&self) -> String {
        let keys: Vec<String> = ControlAction::ALL
            .iter()
            .filter_map(|&action| {
                self.options
                    .keybindings
                    .key_for(action)
                    .map(|key| format!("{key:?} {}", action.label()))
            })
            .collect();
        format!("{}; or a disk count 1-10", keys.join(", "))
    }

    fn draw(&self, out: &mut impl Write, message: Option<&str>) -> Result<()> {
        write!(out, "{CLEAR}{}", self.renderer.render())?;
        writeln!(out, "{}", message.unwrap_or(""))?;
        out.flush()?;
        Ok(())
    }
}

/// Forward stdin lines over a channel so the draw loop never blocks on
/// input.
fn spawn_input_reader() -> Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel();
    let _ = thread::Builder::new()
        .name("hanoi-input".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("spawning the input thread")?;
    Ok(rx)
}

fn run(mut player: Player, autostart: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    let commands = spawn_input_reader()?;
    let mut message = Some(player.help());
    let mut input_closed = false;
    let mut dirty = true;

    if autostart {
        player.controller.start()?;
    }

    loop {
        if input_closed {
            thread::sleep(STEP_INTERVAL);
        } else {
            match commands.recv_timeout(STEP_INTERVAL) {
                Ok(line) => {
                    let (flow, reply) = player.command(&line);
                    if matches!(flow, Flow::Quit) {
                        break;
                    }
                    message = reply;
                    dirty = true;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    log::debug!("stdin closed");
                    input_closed = true;
                }
            }
        }

        dirty |= player.controller.pump(&mut player.renderer) > 0;
        dirty |= player.renderer.step_celebration();
        if dirty {
            player.draw(&mut out, message.as_deref())?;
            dirty = false;
        }

        if input_closed
            && !player.controller.run_state().is_active()
            && !player.renderer.is_celebrating()
        {
            break;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())?;
        let mut out = io::stdout().lock();
        writeln!(out, "{schema}")?;
        return Ok(());
    }

    let options = cli.options()?;
    if let Some(path) = &cli.save_preset {
        options
            .save(path)
            .with_context(|| format!("saving preset {}", path.display()))?;
        log::info!("saved preset {}", path.display());
    }

    let player = Player::new(options, &cli)?;
    run(player, cli.autostart)
}
