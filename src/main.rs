mod commands;
mod core;

use crate::core::config::Mode;
use crate::core::error::{PushError, print_error};
use clap::Parser;

/// Render Kaggle kernel metadata from a template and push it
#[derive(Parser)]
#[command(name = "kaggle-push")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Which kernel to push: train or inference
  #[arg(long, value_enum)]
  mode: Mode,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  match commands::run_push(cli.mode) {
    // The publish command's exit code is passed through untouched
    Ok(code) => std::process::exit(code),
    Err(err) => handle_error(err),
  }
}

fn handle_error(err: PushError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
