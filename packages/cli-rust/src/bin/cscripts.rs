//! cscripts - short alias for continuous-scripts

use console::style;

fn main() {
    if let Err(err) = continuous_scripts::run() {
        eprintln!("{} {err:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
