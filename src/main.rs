/*!
 * tomodb - Time-Travelling Line Stepper
 *
 * Minimal debugger host for the tomography core. Steps through a text file
 * one line at a time; every stop forks a universe the user can jump back to.
 *
 * Usage: tomodb <file>
 */

use miette::{miette, IntoDiagnostic, Result};
use std::io::{self, BufRead, Write};
use tracing::info;

use tomography::{
    dispatch, init_tracing, parse, Multiverse, ShutdownReport, SourceLocation, StopContext,
    TomographyConfig,
};

/// The program being "debugged": a file and a cursor into it
struct LineStepper {
    path: String,
    lines: Vec<String>,
    cursor: usize,
}

impl LineStepper {
    fn open(path: String) -> Result<Self> {
        let text = std::fs::read_to_string(&path).into_diagnostic()?;
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        if lines.is_empty() {
            return Err(miette!("{path} is empty"));
        }
        Ok(Self {
            path,
            lines,
            cursor: 0,
        })
    }

    /// Advance one line; false once the end of the file is reached
    fn step(&mut self) -> bool {
        if self.cursor + 1 < self.lines.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn current(&self) -> String {
        format!("{:>4}  {}", self.cursor + 1, self.lines[self.cursor])
    }
}

impl StopContext for LineStepper {
    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.path.clone(), self.cursor as u32 + 1)
    }
}

fn main() -> Result<()> {
    init_tracing();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| miette!("usage: tomodb <file>"))?;
    let mut stepper = LineStepper::open(path)?;
    let mut multiverse = Multiverse::new(TomographyConfig::from_env()?)?;

    info!(file = %stepper.path, lines = stepper.lines.len(), "debugging session started");

    println!("{}", stepper.current());
    multiverse.on_stop_event(&stepper);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}", multiverse.prompt());
        io::stdout().flush().into_diagnostic()?;

        line.clear();
        if stdin.lock().read_line(&mut line).into_diagnostic()? == 0 {
            println!();
            break;
        }

        if let Some(command) = parse(&line) {
            for output in dispatch(&mut multiverse, command) {
                println!("{output}");
            }
            continue;
        }

        match line.trim() {
            "" => {}
            "next" | "n" => {
                if stepper.step() {
                    println!("{}", stepper.current());
                    multiverse.on_stop_event(&stepper);
                } else {
                    println!("End of file.");
                }
            }
            "where" | "w" => println!("{}", stepper.current()),
            "quit" | "q" => break,
            "help" | "h" => {
                println!("next (n), where (w), quit (q), help (h)");
                for output in dispatch(&mut multiverse, tomography::Command::Help) {
                    println!("{output}");
                }
            }
            other => println!("*** Unknown command: {other}"),
        }
    }

    match multiverse.on_session_end() {
        ShutdownReport::Detached => info!("left this universe"),
        ShutdownReport::Terminated { pids } => info!(count = pids.len(), "session closed"),
    }
    Ok(())
}
