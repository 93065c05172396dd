use anyhow::Error;
use clap::Parser;
use std::io::BufRead;

use snol::Session;

/// Interpreter for SNOL, the Simple Number Only Language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command lines to run instead of reading standard input. A `BEG`
    /// takes its value from the next argument.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    commands: Vec<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let args = Args::parse();

    let stdout = std::io::stdout();
    let lock = stdout.lock();
    let w = std::io::BufWriter::new(lock);

    if !args.commands.is_empty() {
        let mut session = Session::new(w, false);
        session.run(args.commands.into_iter().map(Ok))
    } else {
        let stdin = std::io::stdin();
        let reader = std::io::BufReader::new(stdin);
        let is_interactive = atty::is(atty::Stream::Stdin);

        let mut session = Session::new(w, is_interactive);
        session.run(reader.lines())
    }
}
