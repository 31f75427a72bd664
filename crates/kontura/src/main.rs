//! Kontura - an image viewer and page layout editor
//!
//! Usage: kontura [OPTIONS] <IMAGE_DIR>

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use kontura_geom::{format_value, PageUnit};
use kontura_layout::PageLayout;
use kontura_shell::{ImageLibrary, Viewer, ViewerConfig};
use kontura_template::load_template;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return ExitCode::FAILURE;
    }

    let command = args[1].as_str();

    match command {
        "--help" | "-h" => {
            print_usage(&args[0]);
            ExitCode::SUCCESS
        }
        "--version" | "-V" => {
            println!("Kontura {}", VERSION);
            ExitCode::SUCCESS
        }
        "--show" => {
            // Text-only mode: parse a template and print its area tree
            if args.len() < 3 {
                eprintln!("Usage: {} --show <TEMPLATE>", args[0]);
                return ExitCode::FAILURE;
            }
            if let Err(e) = show_template(&args[2]) {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        "--template" => {
            // Edit an existing template, browsing images from a directory
            if args.len() < 4 {
                eprintln!("Usage: {} --template <TEMPLATE> <IMAGE_DIR>", args[0]);
                return ExitCode::FAILURE;
            }
            if let Err(e) = run_template(&args[2], &args[3]) {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        "--unit" => {
            // Start with a blank page in the given unit
            if args.len() < 4 {
                eprintln!("Usage: {} --unit <cm|in> <IMAGE_DIR>", args[0]);
                return ExitCode::FAILURE;
            }
            let Some(unit) = PageUnit::parse(&args[2]) else {
                eprintln!("Error: unknown unit '{}', expected cm or in", args[2]);
                return ExitCode::FAILURE;
            };
            if let Err(e) = run_viewer(&args[3], PageLayout::new(unit), None) {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        dir => {
            // Default: blank inch page over the given image directory
            if let Err(e) = run_viewer(dir, PageLayout::default(), None) {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn print_usage(program: &str) {
    println!(
        r#"Kontura {} - an image viewer and page layout editor

USAGE:
    {} [OPTIONS] <IMAGE_DIR>

OPTIONS:
    -h, --help                         Print this help message
    -V, --version                      Print version information
    --unit <cm|in> <IMAGE_DIR>         Start with a blank page in the given unit
    --template <TEMPLATE> <IMAGE_DIR>  Open an existing layout template
    --show <TEMPLATE>                  Print a template's area tree and exit

KEYS:
    click          select area         i/g/v/h        image/grid/split
    space/n, p     next/prev image     arrows         adjust rows/cols/percent
    x, r           clear/rotate image  o              toggle outlines
    s              save template       q, esc         quit

EXAMPLES:
    {} ~/Pictures
    {} --unit cm ~/Pictures
    {} --template sheet.xml ~/Pictures
    {} --show sheet.xml

"#,
        VERSION, program, program, program, program, program
    );
}

/// Open the viewer on a page layout
fn run_viewer(
    dir: &str,
    page: PageLayout,
    template_path: Option<PathBuf>,
) -> Result<(), String> {
    let library = ImageLibrary::scan(Path::new(dir))
        .map_err(|e| format!("failed to scan {}: {}", dir, e))?;

    let config = ViewerConfig::default();
    let mut viewer = Viewer::new(config, page, library, template_path)?;
    viewer.run()
}

/// Open the viewer on an existing template file
fn run_template(template: &str, dir: &str) -> Result<(), String> {
    let path = PathBuf::from(template);
    let page = load_template(&path).map_err(|e| e.to_string())?;
    run_viewer(dir, page, Some(path))
}

/// Text-only mode: parse a template and print its area tree
fn show_template(template: &str) -> Result<(), String> {
    let page = load_template(Path::new(template)).map_err(|e| e.to_string())?;

    println!(
        "page: {} x {} {}",
        format_value(page.width()),
        format_value(page.height()),
        page.unit()
    );
    if let Some(description) = page.description() {
        println!("description: {}", description);
    }

    println!("\n=== Area Tree ===\n");
    print!("{}", page.tree().pretty_print());

    let areas = page.tree().descendants(page.root_id()).len() + 1;
    let slots = page.tree().image_slots(page.root_id()).len();
    println!("\n=== Stats ===");
    println!("Total areas: {}", areas);
    println!("Image slots: {}", slots);

    Ok(())
}
