fn main() {
    if let Err(err) = annomark::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
