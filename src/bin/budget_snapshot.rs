use std::process;

fn main() {
    smart_budget_core::init();
    if let Err(err) = smart_budget_core::cli::run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
