use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{LevelFilter, error};

use advent_engine::engine::{Output, OutputBlock, render_room};
use advent_engine::{GameState, load_world_from_file};

/// Play a text adventure described by a TOML world file.
#[derive(Parser, Debug)]
#[command(name = "advent", version, about)]
struct Cli {
    /// World file to load
    #[arg(default_value = "worlds/lantern.toml")]
    world: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn flush_output(out: Output) {
    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => println!("\n{}", t),
            OutputBlock::Text(line) => println!("{}", line),
            OutputBlock::Exits(exits) => println!("\n{}", exits),
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let world = match load_world_from_file(&cli.world) {
        Ok(w) => w,
        Err(e) => {
            error!("failed to load '{}': {}", cli.world.display(), e);
            eprintln!("Failed to load world file '{}': {e}", cli.world.display());
            process::exit(1);
        }
    };

    let mut state = match GameState::new(world) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    state.on_move(render_room);

    flush_output(state.initialize());
    println!("\nType 'look' to look around, 'quit' to exit.");

    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nGoodbye.");
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (out, quit) = state.step(input);
        flush_output(out);

        if quit {
            break;
        }
    }

    Ok(())
}
