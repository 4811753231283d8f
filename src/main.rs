use std::{error::Error, io::Write};

use mobilegraph::{
    art::welcome_message,
    storage::{config::StoreConfig, storage_manager::GraphStore},
    types::{label::LabelAddress, property::NodeProp},
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const HISTORY_FILE: &str = ".mobilegraph_history";

fn read_multiline_command(rl: &mut DefaultEditor) -> rustyline::Result<String> {
    let mut input = String::new();
    let mut prompt = "mobilegraph> ".to_string();

    loop {
        let line = rl.readline(&prompt)?;
        let trimmed_line = line.trim_end();

        // Trailing backslash continues the command on the next line
        if let Some(continued) = trimmed_line.strip_suffix('\\') {
            input.push_str(continued);
            input.push(' ');
            prompt = "         -> ".to_string();
        } else {
            input.push_str(trimmed_line);
            break;
        }
    }

    Ok(input)
}

fn parse_u32(token: Option<&str>, what: &str) -> Result<u32, String> {
    let token = token.ok_or_else(|| format!("missing {}", what))?;
    token
        .parse()
        .map_err(|_| format!("{} must be an unsigned integer, got '{}'", what, token))
}

fn describe_label(store: &mut GraphStore, address: LabelAddress) -> String {
    match store.label_store().get(address) {
        Ok(label) => format!("{} ({})", label.text(), address),
        Err(e) => format!("<{}> ({})", e, address),
    }
}

fn execute(store: &mut GraphStore, command: &str) -> Result<(), Box<dyn Error>> {
    let mut tokens = command.split_whitespace();
    let verb = tokens.next().unwrap_or_default().to_lowercase();

    match verb.as_str() {
        "label" => {
            let text = tokens.next().ok_or("usage: label <TEXT>")?;
            let address = store.label_store().insert(text)?;
            println!("Inserted at {}", address);
        }
        "node" => {
            let external_id = parse_u32(tokens.next(), "external id")?;
            let labels: Vec<&str> = tokens.collect();
            let id = store.insert_node(external_id, &labels)?;
            println!("Inserted id: {}", id);
        }
        "get" => {
            let id = parse_u32(tokens.next(), "node id")?;
            let node = store.get_node(id)?;
            println!(
                "node {}: external_id={} in_use={}",
                id, node.external_id, node.in_use
            );
            for address in node.labels() {
                println!("  :{}", describe_label(store, address));
            }
        }
        "prop" => {
            let key_id = parse_u32(tokens.next(), "key id")?;
            let value_id = parse_u32(tokens.next(), "value id")?;
            let id = store.insert_property(&NodeProp::new(key_id, value_id))?;
            println!("Inserted property: {}", id);
        }
        _ => println!("Unknown command '{}'. Type 'help' for commands.", verb),
    }

    Ok(())
}

fn process_command(store: &mut GraphStore, command: &str) -> bool {
    let cmd = command.trim();

    match cmd.to_lowercase().as_str() {
        "exit" | "quit" | "q" => {
            println!("Goodbye!");
            return false;
        }
        "help" | "h" => {
            println!(
                r#"
Available commands:
  label <TEXT>                 - Store a label (max 17 bytes) and print its address
  node <EXTERNAL_ID> [LABEL..] - Store a node with up to 3 labels
  get <ID>                     - Show a stored node and its labels
  prop <KEY_ID> <VALUE_ID>     - Append a property record
  help, h                      - Show this help message
  clear, ctrl + l              - Clear the screen
  exit, quit, q                - Exit

Use '\' at the end of a line for multiline input.
Use Up/Down arrows to navigate command history.
"#
            );
        }
        "clear" => {
            print!("\x1B[2J\x1B[1;1H");
            let _ = std::io::stdout().flush();
        }
        "" => {}
        _ => {
            if let Err(e) = execute(store, cmd) {
                warn!(command = cmd, error = %e, "command failed");
                println!("Error: {}", e);
            }
        }
    }

    true
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mobilegraph=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };

    println!("{}", welcome_message("MOBILEGRAPH"));

    let mut store = GraphStore::open(config)?;
    let mut rl = DefaultEditor::new()?;
    let _ = rl.load_history(HISTORY_FILE);

    loop {
        match read_multiline_command(&mut rl) {
            Ok(input) => {
                let command = input.trim().to_string();

                if !command.is_empty() {
                    rl.add_history_entry(&command)?;
                    if !process_command(&mut store, &command) {
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("EOF");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Err(e) = rl.save_history(HISTORY_FILE) {
        warn!(error = %e, "could not save history");
    }

    Ok(())
}
