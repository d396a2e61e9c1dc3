use clap::{Args, Parser, Subcommand};
use glam::Vec2;
use pyramid_common::Transform;
use pyramid_input::{Movement, MovementSet};
use pyramid_navigation::{NavigationConfig, NavigationState};
use pyramid_render::{DebugTextRenderer, RenderView, Renderer};
use tracing_subscriber::EnvFilter;

/// Aspect ratio of the desktop viewer's default 640x480 window.
const DEFAULT_ASPECT: f32 = 640.0 / 480.0;

#[derive(Parser)]
#[command(name = "pyramid-cli", about = "Headless tools for the pyramid viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the default navigation settings
    Info,
    /// Run the camera at a fixed timestep with scripted input and print the final pose
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
struct SimulateArgs {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 60)]
    frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Movement held for the whole run (repeatable): forward, backward,
    /// strafe-left, strafe-right, descend, ascend
    #[arg(long = "hold")]
    hold: Vec<Movement>,

    /// Horizontal pointer travel per frame, in pixels
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    look_dx: f32,

    /// Vertical pointer travel per frame, in pixels (negative looks up)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    look_dy: f32,

    /// Scroll offset applied once before the run (positive slows down)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    scroll: f32,

    /// Reset the camera after this frame
    #[arg(long)]
    reset_at: Option<u32>,

    /// Print the pose as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn simulate(args: &SimulateArgs) -> NavigationState {
    let mut nav = NavigationState::new(NavigationConfig::default());
    let held: MovementSet = args.hold.iter().copied().collect();
    let look = Vec2::new(args.look_dx, args.look_dy);
    let mut cursor = nav.config().initial_cursor;

    if args.scroll != 0.0 {
        nav.on_scroll(args.scroll);
    }
    nav.advance_frame(0.0);
    nav.on_pointer_move(cursor.x, cursor.y);

    for frame in 1..=args.frames {
        let elapsed = nav.advance_frame(f64::from(frame) * args.dt);
        nav.apply_directional_input(&held, elapsed);

        if look != Vec2::ZERO {
            cursor += look;
            nav.on_pointer_move(cursor.x, cursor.y);
        }

        if args.reset_at == Some(frame) {
            nav.reset();
        }
    }

    tracing::debug!(frames = args.frames, pose = ?nav.pose(), "simulation finished");
    nav
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("pyramid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", pyramid_render::crate_info());
            println!("navigation defaults:");
            println!(
                "{}",
                serde_json::to_string_pretty(&NavigationConfig::default())?
            );
        }
        Commands::Simulate(args) => {
            let nav = simulate(&args);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&nav.pose())?);
            } else {
                let view = RenderView::capture(&nav, &Transform::pyramid(), DEFAULT_ASPECT);
                print!("{}", DebugTextRenderer::new().render(&nav, &view));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use glam::Vec3;

    fn parse_simulate(args: &[&str]) -> SimulateArgs {
        let cli = Cli::try_parse_from(std::iter::once("pyramid-cli").chain(args.iter().copied()))
            .unwrap();
        match cli.command {
            Commands::Simulate(args) => args,
            Commands::Info => panic!("expected simulate"),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_movements_and_negative_offsets() {
        let args = parse_simulate(&[
            "simulate",
            "--hold",
            "forward",
            "--hold",
            "strafe-right",
            "--look-dx",
            "-4",
            "--scroll",
            "-2.5",
        ]);
        assert_eq!(args.hold, vec![Movement::Forward, Movement::StrafeRight]);
        assert_eq!(args.look_dx, -4.0);
        assert_eq!(args.scroll, -2.5);
        assert_eq!(args.frames, 60);
    }

    #[test]
    fn rejects_unknown_movement() {
        let result = Cli::try_parse_from(["pyramid-cli", "simulate", "--hold", "sideways"]);
        assert!(result.is_err());
    }

    #[test]
    fn one_second_forward() {
        let args = parse_simulate(&["simulate", "--frames", "4", "--dt", "0.25", "--hold", "forward"]);
        let nav = simulate(&args);
        assert!((nav.position() - Vec3::new(0.0, 0.5, -7.0)).length() < 1e-4);
    }

    #[test]
    fn scroll_then_move_uses_new_speed() {
        let args = parse_simulate(&[
            "simulate", "--frames", "2", "--dt", "0.5", "--hold", "backward", "--scroll", "-40",
        ]);
        let nav = simulate(&args);
        assert_eq!(nav.movement_rate(), 50.0);
        assert!((nav.position() - Vec3::new(0.0, 0.5, 53.0)).length() < 1e-3);
    }

    #[test]
    fn looking_turns_the_camera() {
        let args = parse_simulate(&["simulate", "--frames", "10", "--look-dx", "2"]);
        let nav = simulate(&args);
        assert_eq!(nav.yaw(), -80.0);
        assert_eq!(nav.pitch(), 0.0);
    }

    #[test]
    fn reset_mid_run_rebaselines_pointer() {
        let args = parse_simulate(&[
            "simulate", "--frames", "10", "--look-dx", "2", "--reset-at", "5",
        ]);
        let nav = simulate(&args);
        // Frame 6 is the new baseline; frames 7..=10 turn by 1 degree each.
        assert_eq!(nav.yaw(), -86.0);
        assert_eq!(nav.position(), Vec3::new(0.0, 0.5, 3.0));
    }
}
