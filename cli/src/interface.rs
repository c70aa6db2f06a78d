//! Banner and panel rendering

use console::{measure_text_width, style};

const LOGO: &[&str] = &[
    "███████╗███████╗███╗   ██╗██╗████████╗██╗  ██╗",
    "╚══███╔╝███╔═══╝████╗  ██║██║╚══██╔══╝██║  ██║",
    "  ███╔╝ █████╗  ██╔██╗ ██║██║   ██║   ███████║",
    " ███╔╝  ██╔══╝  ██║╚██╗██║██║   ██║   ██╔══██║",
    "███████╗███████╗██║ ╚████║██║   ██║   ██║  ██║",
    "╚══════╝╚══════╝╚═╝  ╚═══╝╚═╝   ╚═╝   ╚═╝  ╚═╝",
];

const TAGLINE: &str = "Transforming Natural Language Into Production-Ready Code";

/// Print a bordered panel around `lines`, in the given border color.
fn print_panel(lines: &[String], border: console::Color) {
    let width = lines
        .iter()
        .map(|line| measure_text_width(line))
        .max()
        .unwrap_or(0);

    let bar = "─".repeat(width + 2);
    println!("{}", style(format!("╭{bar}╮")).fg(border));
    for line in lines {
        let padding = " ".repeat(width - measure_text_width(line));
        println!(
            "{} {line}{padding} {}",
            style("│").fg(border),
            style("│").fg(border)
        );
    }
    println!("{}", style(format!("╰{bar}╯")).fg(border));
}

/// Print the startup banner: logo, tagline and working directory.
pub fn print_banner() {
    let cwd = std::env::current_dir()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "<unknown>".to_string());

    let mut lines: Vec<String> = LOGO
        .iter()
        .map(|line| style(line).cyan().bold().to_string())
        .collect();
    lines.push(String::new());
    lines.push(style(TAGLINE).italic().to_string());
    lines.push(String::new());
    lines.push(format!("Working Directory: {}", style(&cwd).dim()));

    print_panel(&lines, console::Color::Cyan);
}

/// Print a fatal error inside a red panel.
pub fn print_error_panel(message: &str) {
    let mut lines = vec![style("Error").red().bold().to_string()];
    lines.push(String::new());
    for line in message.lines() {
        lines.push(style(line).red().to_string());
    }

    print_panel(&lines, console::Color::Red);
}
