use shopfront_core::cli;

fn main() {
    shopfront_core::init();
    if let Err(err) = cli::run_cli() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
