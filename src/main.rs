fn main() {
    if let Err(e) = fire_sim::core::Engine::run() {
        eprintln!("Engine failed to start: {}", e);
        std::process::exit(1);
    }
}
