use clap::{Parser, Subcommand};
use machina::{analyze, MachineLoader, TraceEntry, Transducer, TuringMachine, MAX_EXECUTION_STEPS};
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a Turing machine defined by alphabet, rule and tape files
    Tape {
        /// Alphabet declaration file: whitespace-separated symbols on one line
        #[clap(short, long)]
        alphabet: PathBuf,

        /// Rule definition file: `<state> <symbol> -> <state> <symbol> <L|R|E>`
        #[clap(short, long)]
        rules: PathBuf,

        /// Initial tape file: one line of concatenated symbols
        #[clap(short, long)]
        tape: PathBuf,

        /// File the execution trace is written to
        #[clap(short, long, default_value = "trace.txt")]
        output: PathBuf,

        /// Step ceiling guarding against non-terminating programs
        #[clap(long, default_value_t = MAX_EXECUTION_STEPS)]
        limit: usize,

        /// Write the trace as JSON instead of the text report
        #[clap(long)]
        json: bool,
    },
    /// Check words against the built-in Mealy sequence detector
    Mealy {
        /// Words to check; with none given, reads words interactively
        words: Vec<String>,

        /// Print the dense transition and output tables first
        #[clap(short, long)]
        matrices: bool,
    },
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Tape {
            alphabet,
            rules,
            tape,
            output,
            limit,
            json,
        } => run_tape(&alphabet, &rules, &tape, &output, limit, json),
        Command::Mealy { words, matrices } => run_mealy(&words, matrices),
    }
}

fn run_tape(
    alphabet: &PathBuf,
    rules: &PathBuf,
    tape: &PathBuf,
    output: &PathBuf,
    limit: usize,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let program = MachineLoader::load(alphabet, rules, tape)?;
    for finding in analyze(&program) {
        eprintln!("Warning: {finding}");
    }

    let mut machine = TuringMachine::new(program)?;

    // A failed run leaves no trace file behind; the error names the fault.
    let result = machine.run(limit)?;

    let report = if json {
        serde_json::to_string_pretty(machine.trace())?
    } else {
        render_trace(&machine.program().name, machine.trace(), &result)
    };
    fs::write(output, report)?;

    println!("Result: {result}");
    println!("Trace written to {}", output.display());

    Ok(())
}

fn render_trace(name: &str, trace: &[TraceEntry], result: &str) -> String {
    let bar = "=".repeat(70);
    let mut report = format!("{bar}\nTuring machine execution trace\n{name}\n{bar}\n\n");

    for (i, entry) in trace.iter().enumerate() {
        report.push_str(&format!(
            "Step {i}:\n{}\n{}\nRule: {}\n\n",
            entry.window, entry.marker, entry.rule
        ));
    }

    report.push_str(&format!("{bar}\nResult: {result}\n{bar}\n"));
    report
}

fn run_mealy(words: &[String], matrices: bool) -> Result<(), Box<dyn Error>> {
    let mut machine = Transducer::sequence_detector()?;

    if matrices {
        print_matrices(&machine);
    }

    if words.is_empty() {
        interactive(&mut machine)?;
    } else {
        for word in words {
            check_word(&mut machine, word);
        }
    }

    Ok(())
}

fn check_word(machine: &mut Transducer, word: &str) {
    let accepted = machine.process(word);

    for entry in machine.trace() {
        println!("{}", entry.window);
        println!("{}", entry.marker);
        println!("{}", entry.rule);
    }

    let verdict = if accepted { "ACCEPTED" } else { "REJECTED" };
    println!("Word '{word}': {verdict}");
    println!("Final state: {}\n", machine.state());
}

fn interactive(machine: &mut Transducer) -> Result<(), Box<dyn Error>> {
    println!("Enter a word to check (or 'exit' to quit):");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let word = line.trim();
        if word == "exit" {
            break;
        }
        if word.is_empty() {
            continue;
        }

        check_word(machine, word);
    }

    Ok(())
}

fn print_matrices(machine: &Transducer) {
    let symbols: Vec<char> = machine.inputs().collect();

    let header: String = symbols.iter().map(|s| format!("{s:<4}")).collect();

    println!("Transition function Δ:");
    println!("{:<6}{header}", "");
    for (state, row) in machine.transition_matrix() {
        let cells: String = symbols.iter().map(|s| format!("{:<4}", row[s])).collect();
        println!("{state:<6}{cells}");
    }

    println!();
    println!("Output function Λ:");
    println!("{:<6}{header}", "");
    for (state, row) in machine.output_matrix() {
        let cells: String = symbols.iter().map(|s| format!("{:<4}", row[s])).collect();
        println!("{state:<6}{cells}");
    }
    println!();
}
