use coach_core::state::SavedPlan;
use coach_core::*;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "mcoach")]
#[command(about = "Five-minute micro workout generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a routine and print it (default)
    Generate {
        #[command(flatten)]
        routine: RoutineArgs,

        /// Print the routine as JSON
        #[arg(long)]
        json: bool,

        /// Keep the routine as the last plan and add it to saved workouts
        #[arg(long)]
        save: bool,
    },

    /// Generate a routine (or reload the last plan) and run its timer
    Run {
        #[command(flatten)]
        routine: RoutineArgs,

        /// Run the last saved plan instead of generating a new one
        #[arg(long)]
        last: bool,

        /// Tick without waiting a second between ticks
        #[arg(long)]
        fast: bool,
    },

    /// Show the current daily streak
    Streak,

    /// List saved workouts
    Saved,
}

#[derive(Args, Clone)]
struct RoutineArgs {
    /// Intensity (chill, stretch, regular, intense, hardcore)
    #[arg(long, short, default_value = "regular")]
    intensity: String,

    /// Total length in seconds (defaults to the configured total)
    #[arg(long)]
    seconds: Option<u32>,

    /// Number of exercises (defaults to the intensity's count)
    #[arg(long)]
    count: Option<usize>,

    /// Seed for reproducible routines
    #[arg(long)]
    seed: Option<u64>,

    /// Music genre (electronic, lofi, hiphop, rock, pop)
    #[arg(long)]
    playlist: Option<String>,
}

impl RoutineArgs {
    fn to_request(&self) -> Result<GenerateRequest> {
        Ok(GenerateRequest {
            intensity: self.intensity.parse::<Intensity>()?,
            total_seconds: self.seconds,
            exercise_count: self.count,
            playlist: self.playlist.as_deref().map(str::parse::<PlaylistGenre>).transpose()?,
        })
    }
}

/// Resolved on-disk locations
struct DataPaths {
    state: PathBuf,
    journal: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        Self {
            state: data_dir.join("state.json"),
            journal: data_dir.join("workouts.jsonl"),
        }
    }
}

fn main() -> Result<()> {
    coach_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = DataPaths::new(&data_dir);

    match cli.command {
        Some(Commands::Generate {
            routine,
            json,
            save,
        }) => cmd_generate(&paths, &config, &routine, json, save),
        Some(Commands::Run {
            routine,
            last,
            fast,
        }) => cmd_run(&paths, &config, &routine, last, fast),
        Some(Commands::Streak) => cmd_streak(&paths),
        Some(Commands::Saved) => cmd_saved(&paths),
        None => {
            let defaults = RoutineArgs {
                intensity: "regular".into(),
                seconds: None,
                count: None,
                seed: None,
                playlist: None,
            };
            cmd_generate(&paths, &config, &defaults, false, false)
        }
    }
}

fn build_routine(config: &Config, args: &RoutineArgs) -> Result<Routine> {
    let request = args.to_request()?;

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Other("Invalid catalog".into()));
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    generate(catalog, &request, &config.generator, &mut rng)
}

fn cmd_generate(
    paths: &DataPaths,
    config: &Config,
    args: &RoutineArgs,
    json: bool,
    save: bool,
) -> Result<()> {
    let routine = build_routine(config, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&routine)?);
    } else {
        display_routine(&routine);
    }

    if save {
        save_routine(paths, &routine, args.playlist.clone())?;
        if !json {
            println!("\n✓ Workout saved!");
        }
    }

    Ok(())
}

fn save_routine(paths: &DataPaths, routine: &Routine, playlist: Option<String>) -> Result<()> {
    let store = FileStateStore::new(&paths.state);
    store.update(|state| {
        state.last_plan = Some(SavedPlan {
            routine: routine.clone(),
            intensity: routine.intensity_label,
            playlist,
            saved_at: chrono::Utc::now(),
        });
    })?;

    let mut sink = JsonlSink::new(&paths.journal);
    sink.append(&SavedWorkout::new(routine.clone()))?;
    Ok(())
}

fn cmd_run(
    paths: &DataPaths,
    config: &Config,
    args: &RoutineArgs,
    last: bool,
    fast: bool,
) -> Result<()> {
    let store = FileStateStore::new(&paths.state);

    let routine = if last {
        store
            .load()?
            .last_plan
            .map(|plan| plan.routine)
            .ok_or_else(|| Error::State("No saved plan yet. Run `generate --save` first.".into()))?
    } else {
        build_routine(config, args)?
    };

    display_routine(&routine);
    println!();

    let mut runner = SessionRunner::new(&routine, store);
    runner.start();
    if runner.state() != RunState::Running {
        println!("Nothing to run.");
        return Ok(());
    }
    announce_step(&runner);

    loop {
        let epoch = runner.epoch();
        if !fast {
            std::thread::sleep(Duration::from_secs(1));
        }

        match runner.tick_at(epoch) {
            TickEvent::Counted { index, .. } => {
                if !fast {
                    show_progress(&runner, index)?;
                }
            }
            TickEvent::Advanced { completed, .. } => {
                if !fast {
                    println!();
                }
                println!("  ✓ {}", runner.steps()[completed].step.name);
                announce_step(&runner);
            }
            TickEvent::Finished { streak } => {
                if !fast {
                    println!();
                }
                println!("\n✓ Workout complete!");
                if let Some(count) = streak {
                    println!("  Streak: {} day(s)", count);
                }
                break;
            }
            TickEvent::Ignored => break,
        }
    }

    Ok(())
}

fn announce_step<S: StateStore>(runner: &SessionRunner<S>) {
    if let Some(index) = runner.active_index() {
        let step = &runner.steps()[index].step;
        println!(
            "→ {} ({}), {} left",
            step.name,
            format_amount(step),
            format_time(runner.total_remaining())
        );
    }
}

/// Redraw the active step's progress line in place
fn show_progress<S: StateStore>(runner: &SessionRunner<S>, index: usize) -> Result<()> {
    print!(
        "\r    {:>3}%  {} left",
        runner.progress_percent(index),
        format_time(runner.total_remaining())
    );
    std::io::stdout().flush()?;
    Ok(())
}

fn cmd_streak(paths: &DataPaths) -> Result<()> {
    let state = FileStateStore::new(&paths.state).load()?;
    let today = chrono::Local::now().date_naive();
    let count = state.streak.current(today);

    println!("Streak: {} day(s)", count);
    if let Some(last) = state.streak.last {
        println!("  Last workout: {}", last);
    }
    Ok(())
}

fn cmd_saved(paths: &DataPaths) -> Result<()> {
    let workouts = read_saved_workouts(&paths.journal)?;
    if workouts.is_empty() {
        println!("No saved workouts.");
        return Ok(());
    }

    println!("{} saved workout(s)", workouts.len());
    for workout in &workouts {
        println!(
            "  {}  {}  {:<8} {} steps",
            workout.created_at.format("%Y-%m-%d %H:%M"),
            workout.id,
            workout.routine.intensity_label,
            workout.routine.main.len() + workout.routine.cooldown.len()
        );
    }
    Ok(())
}

fn display_routine(routine: &Routine) {
    println!("\n╭─────────────────────────────────────────╮");
    println!(
        "│  {} WORKOUT · {} min",
        routine.intensity_label.as_str().to_uppercase(),
        routine.total_duration_minutes
    );
    println!("╰─────────────────────────────────────────╯");
    println!();

    if routine.main.is_empty() {
        println!("  (no exercises available)");
    }
    for (i, step) in routine.main.iter().enumerate() {
        print_step(i + 1, step);
    }

    if !routine.cooldown.is_empty() {
        println!("\n  Cooldown");
        for (i, step) in routine.cooldown.iter().enumerate() {
            print_step(i + 1, step);
        }
    }

    for suggestion in &routine.playlist {
        println!();
        println!("  ♪ {} ({})", suggestion.title, suggestion.hint);
        println!("    {}", suggestion.reference);
    }
}

fn print_step(number: usize, step: &RoutineStep) {
    println!("  {:>2}. {:<34} {:>6}", number, step.name, format_amount(step));
    if !step.notes.is_empty() {
        println!("      {}", step.notes);
    }
}

fn format_amount(step: &RoutineStep) -> String {
    match step.unit {
        Unit::Time => format!("{}s", step.duration_or_reps),
        Unit::Reps => format!("{} reps", step.duration_or_reps),
    }
}

fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
