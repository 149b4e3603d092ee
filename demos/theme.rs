//! Theme resolution probe - run with: cargo run --example theme

use termfolio::platform::detect_background;
use termfolio::prefs::{resolve_initial, PrefStore};

fn main() {
    let background = detect_background();
    println!("Terminal signal: {}", background);

    match PrefStore::open_default() {
        Ok(store) => {
            match store.get() {
                Some(mode) => println!("Stored:          {}", mode),
                None => println!("Stored:          (none)"),
            }
            let resolved = resolve_initial(store.get(), background.prefers_light());
            println!("Resolved:        {}", resolved);
        }
        Err(e) => {
            eprintln!("Could not open preference store: {}", e);
            std::process::exit(1);
        }
    }
}
