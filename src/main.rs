use perfect_maze::{app::App, logging};

fn main() -> std::io::Result<()> {
    let app = App::from_env();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = match logging::init_tracing(app.log_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };
    tracing::info!("Starting perfect-maze");

    app.run(&mut std::io::stdout())
}
