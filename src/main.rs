// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sales_report::{load, render, render_full_analysis, CsvDirectory, Ready, ReportKind, TopN};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sales reports from the ventas / productos / detalle_ventas / clientes tables
#[derive(Parser, Debug)]
#[command(name = "sales-report", version, about)]
struct Args {
    /// Directory holding ventas.csv, productos.csv, detalle_ventas.csv and clientes.csv
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a single report
    Report {
        #[arg(value_enum)]
        kind: ReportArg,

        /// Rows to show in ranking reports (non-numeric falls back to 10)
        #[arg(long)]
        top: Option<String>,
    },
    /// Print every report, one after another
    All,
    /// Interactive menu (default)
    Menu,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ReportArg {
    Overview,
    TopProducts,
    ByCategory,
    TopCustomers,
    PaymentMethods,
    ByMonth,
}

impl ReportArg {
    fn into_kind(self, top: Option<&str>) -> ReportKind {
        let n = top.map(TopN::parse).unwrap_or_default();
        match self {
            ReportArg::Overview => ReportKind::Overview,
            ReportArg::TopProducts => ReportKind::TopProducts(n),
            ReportArg::ByCategory => ReportKind::ByCategory,
            ReportArg::TopCustomers => ReportKind::TopCustomers(n),
            ReportArg::PaymentMethods => ReportKind::PaymentMethods,
            ReportArg::ByMonth => ReportKind::ByMonth,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so report tables on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = CsvDirectory::new(&args.data_dir);

    match args.command.unwrap_or(Command::Menu) {
        Command::Report { kind, top } => {
            let ready = load_ready(&source)?;
            println!("{}", render(&ready, kind.into_kind(top.as_deref())));
        }
        Command::All => {
            let ready = load_ready(&source)?;
            println!("{}", render_full_analysis(&ready));
        }
        Command::Menu => run_menu(source)?,
    }

    Ok(())
}

fn load_ready(source: &CsvDirectory) -> Result<Ready> {
    let ready = load(source).with_context(|| {
        format!("Failed to load sales data from {}", source.root().display())
    })?;
    Ok(ready)
}

#[cfg(feature = "tui")]
fn run_menu(source: CsvDirectory) -> Result<()> {
    let mut app = ui::App::new(source);
    ui::run_ui(&mut app)?;

    println!("Thanks for using the sales analysis system!");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_menu(_source: CsvDirectory) -> Result<()> {
    eprintln!("❌ Interactive menu not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print reports directly: sales-report report overview");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_report_with_top() {
        let args = Args::try_parse_from([
            "sales-report",
            "--data-dir",
            "data",
            "report",
            "top-products",
            "--top",
            "3",
        ])
        .unwrap();

        assert_eq!(args.data_dir, PathBuf::from("data"));
        match args.command {
            Some(Command::Report { kind, top }) => {
                assert_eq!(
                    kind.into_kind(top.as_deref()),
                    ReportKind::TopProducts(TopN::new(3))
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_args_non_numeric_top_falls_back() {
        let args =
            Args::try_parse_from(["sales-report", "report", "top-customers", "--top", "all"])
                .unwrap();

        match args.command {
            Some(Command::Report { kind, top }) => {
                assert_eq!(
                    kind.into_kind(top.as_deref()),
                    ReportKind::TopCustomers(TopN::default())
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_args_default_to_menu() {
        let args = Args::try_parse_from(["sales-report"]).unwrap();

        assert!(args.command.is_none());
        assert_eq!(args.data_dir, PathBuf::from("."));
    }
}
