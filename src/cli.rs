//! Command-line argument parsing for the timewheel demo driver

/// Parse command line arguments
pub struct Args {
    pub once: bool,
    pub validate: bool,
    pub help: bool,
}

pub fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    parse_from(&args)
}

pub fn parse_from(args: &[String]) -> Args {
    let mut result = Args {
        once: false,
        validate: false,
        help: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--once" => result.once = true,
            "--validate" => result.validate = true,
            "--help" | "-h" => result.help = true,
            _ => {}
        }
        i += 1;
    }

    result
}

pub fn print_help() {
    println!("timewheel - wheel time-picker engine demo\n");
    println!("USAGE:");
    println!("    timewheel [OPTIONS]\n");
    println!("OPTIONS:");
    println!("    --once              Run a scripted demonstration and exit");
    println!("    --validate          Validate configuration and exit");
    println!("    --help, -h          Show this help message\n");
    println!("ENVIRONMENT:");
    println!("    See .env.example for the picker configuration variables");
}
