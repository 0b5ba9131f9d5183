mod cli;

fn main() {
    if let Err(e) = cli::run() {
        if e.is_fatal() {
            tracing::error!("{}", e);
            eprintln!("Fatal: {}", e);
            eprintln!("Stopped before touching anything else. Check the save directory before retrying.");
            std::process::exit(2);
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
