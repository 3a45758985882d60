//! kmlogger main entrypoint.

use kmlogger::run;
use kmlogger::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
