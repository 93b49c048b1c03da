use std::{env, process};

use ember_lang::Ember;

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        n if n > 2 => {
            eprintln!("Usage: ember [script]");
            process::exit(64);
        }
        2 => {
            let mut ember = Ember::new(false);
            let code = ember.run_file(&args[1]);
            process::exit(code);
        }
        _ => {
            let mut ember = Ember::new(true);
            ember.run_prompt();
        }
    }
}
