//! ARM Invaders - CLI entry point.
//!
//! An interactive prompt loop over the flag simulator. The session ends on
//! `quit`, `exit`, or end-of-input, always with exit code 0; rendering
//! failures are the only hard errors.

use arm_invaders::hud::Hud;
use arm_invaders::repl::{run_script, Action, ScriptReport, Session};
use clap::Parser;
use rand_core::OsRng;
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "arm-invaders")]
#[command(version = "0.1.0")]
#[command(about = "A didactic simulator of a reduced ARM-like instruction set with NZCV flags")]
struct Cli {
    /// Replay a command script before the interactive prompt
    #[arg(short, long)]
    script: Option<String>,

    /// Disable colors, screen clearing, and animation
    #[arg(long)]
    plain: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("terminal error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> io::Result<()> {
    let mut session = Session::new(OsRng);
    let mut hud = Hud::new(cli.plain);

    if let Some(path) = &cli.script {
        match run_script(&mut session, path) {
            Ok(report) => {
                print_report(path, &report);
                if report.halted {
                    hud.render(&session.snapshot())?;
                    return Ok(());
                }
            }
            Err(e) => println!("failed to run script '{}': {}", path, e),
        }
    }

    hud.render(&session.snapshot())?;

    let mut line = String::new();
    loop {
        print!("\n> ");
        io::stdout().flush()?;

        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            println!("\nEOF received, exiting.");
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.execute(input) {
            Ok(Action::Quit) => {
                println!("Exiting. See you!");
                break;
            }
            Ok(Action::Executed { instr, .. }) => {
                println!("[ASM] {}", instr);
                hud.animate(&session.snapshot())?;
                if session.take_zeroed().is_some() {
                    hud.explosion()?;
                }
            }
            Ok(Action::Saved { path }) => {
                println!("State saved to '{}'.", path);
            }
            Ok(Action::Loaded { path }) => {
                println!("State loaded from '{}'.", path);
                hud.refresh(&session.snapshot())?;
            }
            Ok(Action::ScriptReplayed { path, report }) => {
                let halted = report.halted;
                print_report(&path, &report);
                hud.refresh(&session.snapshot())?;
                if session.take_zeroed().is_some() {
                    hud.explosion()?;
                }
                if halted {
                    break;
                }
            }
            Ok(Action::Show | Action::Help) => {
                hud.render(&session.snapshot())?;
            }
            Ok(Action::Reset) => {
                hud.refresh(&session.snapshot())?;
            }
            Ok(Action::Nothing) => {}
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}

fn print_report(path: &str, report: &ScriptReport) {
    println!(
        "Replayed '{}': {} commands dispatched, {} lines skipped.",
        path, report.dispatched, report.skipped
    );
    for (line, err) in &report.errors {
        println!("  line {}: {}", line, err);
    }
    if report.halted {
        println!("  script requested quit.");
    }
}
