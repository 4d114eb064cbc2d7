//! Replaces the words of a phrase by their synonyms.
//!
//! Reads one line from stdin and prints it with every word replaced by its
//! first synonym. With `+word`, the line is treated as a single word.
//!
//! Options:
//!
//! * `+word`: single word mode,
//! * `+reject`: refuse phrases longer than the parallel lookup limit,
//! * `+verbose`: list the words that could not be looked up,
//! * `@host` or `@host:port`: use a different DICT server.
//!
//! Set RUST_LOG to see what is going on.
use std::env;
use std::io::{self, BufRead, Write};

use dictsyn::logging::init_logging;
use dictsyn::{Client, Config, OverflowPolicy};

fn parse_server(conf: &mut Config, arg: &str) {
    match arg.rsplit_once(':') {
        Some((host, port)) => match port.parse() {
            Ok(port) => {
                conf.set_host(host);
                conf.set_port(port);
            }
            Err(_) => {
                println!("Warning: ignoring bad port {}", port);
                conf.set_host(host);
            }
        },
        None => conf.set_host(arg),
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(err) => {
            eprintln!("Error reading from stdin: {}", err);
            None
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let mut conf = Config::new();
    let mut single = false;
    let mut verbose = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "+word" => single = true,
            "+reject" => conf.set_overflow(OverflowPolicy::Reject),
            "+verbose" => verbose = true,
            _ if arg.starts_with('@') => parse_server(&mut conf, &arg[1..]),
            _ => {
                println!("Usage: phrase [+word] [+reject] [+verbose] [@host[:port]]");
                return;
            }
        }
    }

    let client = Client::new(Some(conf));

    if single {
        let Some(line) = read_line("Enter a word: ") else {
            return;
        };
        println!("Synonym: {}", client.synonym(&line).await);
        return;
    }

    let Some(line) = read_line("Enter a phrase: ") else {
        return;
    };
    match client.process_phrase(&line).await {
        Ok(phrase) => {
            println!("New phrase: {}", phrase);
            if verbose {
                for res in phrase.failures() {
                    if let Some(err) = res.error() {
                        eprintln!("{}: {}", res.word(), err);
                    }
                }
            }
        }
        Err(err) => eprintln!("Error: {}", err),
    }
}
