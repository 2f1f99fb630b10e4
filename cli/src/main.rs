mod report;
mod tui;
mod workspace;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;
use tracker_core::service::aggregator::select_month;
use tracker_core::time::report_day;
use tracker_core::{parse_day, parse_month, ItemInput, StaffInput, TrackerConfig};

use crate::workspace::{describe_save, Workspace};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Daily staff attendance and item receipt tracker", long_about = None)]
struct Cli {
    /// Day to work on: today, yesterday, +1d, -2d or YYYY-MM-DD
    #[arg(long, global = true, allow_hyphen_values = true)]
    date: Option<String>,

    /// Directory holding saved records and the roster
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage staff (usage: staff add "Name" salary:5000 shifts:2)
    Staff {
        #[command(subcommand)]
        action: StaffCommand,
    },
    /// Manage items (usage: item add Milk price:30 unit:liters)
    Item {
        #[command(subcommand)]
        action: ItemCommand,
    },
    /// Toggle today's attendance for a staff member
    Attend { id: u32 },
    /// Change today's received quantity for an item (e.g. receive 1 3, receive 1 -1)
    Receive {
        id: u32,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Show the day's totals
    Today,
    /// Save the day: push to the webhook, then store locally
    Save,
    /// Month-to-date summary
    Summary {
        /// Month to summarize (YYYY-MM); defaults to the selected day's month
        #[arg(long)]
        month: Option<String>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved records
    Records {
        #[arg(long)]
        month: Option<String>,
    },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(clap::Subcommand)]
enum StaffCommand {
    /// List staff
    List,
    /// Add a staff member
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Remove a staff member
    Remove { id: u32 },
    /// Set a monthly salary
    Salary { id: u32, amount: String },
    /// Set shifts per day (1 or 2)
    Shifts { id: u32, shifts: String },
}

#[derive(clap::Subcommand)]
enum ItemCommand {
    /// List items
    List,
    /// Add an item
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Remove an item
    Remove { id: u32 },
    /// Set the price per unit
    Price { id: u32, amount: String },
    /// Set the unit an item is counted in
    Unit { id: u32, unit: String },
}

fn init_tracing(interactive: bool) {
    // The TUI owns the terminal, so it stays quiet unless RUST_LOG asks otherwise.
    let default_filter = if interactive { "off" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn selected_month(month: Option<&str>, date: NaiveDate, today: NaiveDate) -> Result<NaiveDate> {
    match month {
        Some(m) => {
            let (year, month) = parse_month(m)?;
            report_day(year, month, today).ok_or_else(|| anyhow!("Invalid month: {}", m))
        }
        None => Ok(date),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);
    init_tracing(matches!(command, Commands::Tui));
    dotenv().ok();

    let mut config = TrackerConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let today = Local::now().date_naive();
    let date = match &cli.date {
        Some(d) => parse_day(d, today)?,
        None => today,
    };

    let mut ws = Workspace::open(&config)?;

    match command {
        Commands::Staff { action } => run_staff(&mut ws, action)?,
        Commands::Item { action } => run_item(&mut ws, action)?,
        Commands::Attend { id } => match ws.roster.toggle_attendance(id) {
            Some(present) => {
                ws.save_roster()?;
                let name = ws.roster.staff_member(id).map(|s| s.name.clone()).unwrap_or_default();
                println!("{} is now {}", name, if present { "present" } else { "absent" });
            }
            None => println!("Error: no staff member with ID {}", id),
        },
        Commands::Receive { id, delta } => match ws.roster.adjust_quantity(id, delta) {
            Some(quantity) => {
                ws.save_roster()?;
                if let Some(item) = ws.roster.item(id) {
                    println!("{}: {} {} received today", item.name, quantity, item.unit);
                }
            }
            None => println!("Error: no item with ID {}", id),
        },
        Commands::Today => report::show_today(date, &ws.roster),
        Commands::Save => {
            let outcome = ws.save_day(date)?;
            println!("{}", describe_save(&outcome));
            println!();
            report::show_month_report(&ws.month_report(date));
        }
        Commands::Summary { month, json } => {
            let day = selected_month(month.as_deref(), date, today)?;
            let month_report = ws.month_report(day);
            if json {
                println!("{}", serde_json::to_string_pretty(&month_report)?);
            } else {
                report::show_month_report(&month_report);
            }
        }
        Commands::Records { month } => {
            let day = selected_month(month.as_deref(), date, today)?;
            let records = select_month(ws.tracker.records(), day.year(), day.month());
            report::show_records(&records);
        }
        Commands::Tui => tui::run(ws, date)?,
    }
    Ok(())
}

fn run_staff(ws: &mut Workspace, action: StaffCommand) -> Result<()> {
    match action {
        StaffCommand::List => report::show_staff(&ws.roster.staff),
        StaffCommand::Add { args } => {
            let input = StaffInput::parse(&args)?;
            match input.add_to(&mut ws.roster) {
                Some(id) => {
                    ws.save_roster()?;
                    println!("Staff added: {} (ID: {})", input.name.trim(), id);
                }
                None => println!("Error: Staff name is required."),
            }
        }
        StaffCommand::Remove { id } => {
            if ws.roster.remove_staff(id) {
                ws.save_roster()?;
                println!("Removed staff member {}", id);
            } else {
                println!("Error: no staff member with ID {}", id);
            }
        }
        StaffCommand::Salary { id, amount } => {
            let edit = StaffInput::parse(&[format!("salary:{}", amount)])?;
            apply_staff_edit(ws, id, &edit)?;
        }
        StaffCommand::Shifts { id, shifts } => {
            let edit = StaffInput::parse(&[format!("shifts:{}", shifts)])?;
            apply_staff_edit(ws, id, &edit)?;
        }
    }
    Ok(())
}

fn apply_staff_edit(ws: &mut Workspace, id: u32, edit: &StaffInput) -> Result<()> {
    if edit.apply_to(&mut ws.roster, id) {
        ws.save_roster()?;
        report::show_staff(&ws.roster.staff);
    } else {
        println!("Error: no staff member with ID {}", id);
    }
    Ok(())
}

fn run_item(ws: &mut Workspace, action: ItemCommand) -> Result<()> {
    match action {
        ItemCommand::List => report::show_items(&ws.roster.items),
        ItemCommand::Add { args } => {
            let input = ItemInput::parse(&args)?;
            match input.add_to(&mut ws.roster) {
                Some(id) => {
                    ws.save_roster()?;
                    println!("Item added: {} (ID: {})", input.name.trim(), id);
                }
                None => println!("Error: Item name is required."),
            }
        }
        ItemCommand::Remove { id } => {
            if ws.roster.remove_item(id) {
                ws.save_roster()?;
                println!("Removed item {}", id);
            } else {
                println!("Error: no item with ID {}", id);
            }
        }
        ItemCommand::Price { id, amount } => {
            let edit = ItemInput::parse(&[format!("price:{}", amount)])?;
            apply_item_edit(ws, id, &edit)?;
        }
        ItemCommand::Unit { id, unit } => {
            let edit = ItemInput::parse(&[format!("unit:{}", unit)])?;
            apply_item_edit(ws, id, &edit)?;
        }
    }
    Ok(())
}

fn apply_item_edit(ws: &mut Workspace, id: u32, edit: &ItemInput) -> Result<()> {
    if edit.apply_to(&mut ws.roster, id) {
        ws.save_roster()?;
        report::show_items(&ws.roster.items);
    } else {
        println!("Error: no item with ID {}", id);
    }
    Ok(())
}
