use chrono::NaiveDate;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use tracker_core::service::aggregator::monthly_payroll;
use tracker_core::{DailyRecord, Item, MonthReport, Roster, StaffMember};

pub fn money(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

#[derive(Tabled)]
struct StaffRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Salary")]
    salary: String,
    #[tabled(rename = "Shifts")]
    shifts: String,
    #[tabled(rename = "Today")]
    today: String,
}

pub fn show_staff(staff: &[StaffMember]) {
    if staff.is_empty() {
        println!("No staff found.");
        return;
    }
    let rows: Vec<StaffRow> = staff
        .iter()
        .map(|s| StaffRow {
            id: s.id,
            name: s.name.clone(),
            salary: money(s.salary),
            shifts: format!("×{}", s.shifts),
            today: if s.present { "Present" } else { "Absent" }.to_string(),
        })
        .collect();
    println!("{}", styled(Table::new(rows)));
    println!("Monthly payroll: {}", money(monthly_payroll(staff)));
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Today")]
    quantity: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

pub fn show_items(items: &[Item]) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }
    let rows: Vec<ItemRow> = items
        .iter()
        .map(|i| ItemRow {
            id: i.id,
            name: i.name.clone(),
            price: format!("{}/{}", money(i.price), i.unit),
            quantity: format!("{} {}", i.quantity, i.unit),
            cost: money(i.cost()),
        })
        .collect();
    println!("{}", styled(Table::new(rows)));
}

pub fn show_today(date: NaiveDate, roster: &Roster) {
    println!("\x1b[1;36m{}\x1b[0m", date.format("%d %b %Y"));
    show_staff(&roster.staff);
    show_items(&roster.items);
    let staff_cost = roster.daily_staff_cost();
    let items_cost = roster.daily_items_cost();
    println!("Staff salaries: {}", money(staff_cost));
    println!("Items cost:     {}", money(items_cost));
    println!("Total:          {}", money(staff_cost + items_cost));
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Recorded")]
    detail: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

pub fn show_month_report(report: &MonthReport) {
    let summary = &report.summary;
    println!(
        "\x1b[1;36mMonth-to-date {}\x1b[0m ({} days recorded)",
        report.period_label(),
        summary.days_recorded
    );

    let staff_rows: Vec<LineRow> = report
        .staff
        .iter()
        .map(|l| LineRow {
            name: if l.shifts.count() > 1 {
                format!("{} ×{}", l.name, l.shifts)
            } else {
                l.name.clone()
            },
            detail: format!("{} days", l.present_days),
            cost: money(l.cost),
        })
        .collect();
    println!("{}", styled(Table::new(staff_rows)));
    println!("Total staff: {}", money(summary.staff_cost));

    let item_rows: Vec<LineRow> = report
        .items
        .iter()
        .map(|l| LineRow {
            name: l.name.clone(),
            detail: format!("{} {}", l.quantity, l.unit),
            cost: money(l.cost),
        })
        .collect();
    println!("{}", styled(Table::new(item_rows)));
    println!("Total items: {}", money(summary.items_cost));
    println!("\x1b[1mGrand total: {}\x1b[0m", money(report.grand_total()));
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Present")]
    present: String,
    #[tabled(rename = "Items")]
    items: u64,
    #[tabled(rename = "Salaries")]
    salaries: String,
    #[tabled(rename = "Items cost")]
    items_cost: String,
}

pub fn show_records(records: &[&DailyRecord]) {
    if records.is_empty() {
        println!("No saved records for this month.");
        return;
    }
    let rows: Vec<RecordRow> = records
        .iter()
        .map(|r| RecordRow {
            date: r.date.clone(),
            present: format!(
                "{}/{}",
                r.staff.iter().filter(|s| s.present).count(),
                r.staff.len()
            ),
            items: r.items.iter().map(|i| u64::from(i.quantity)).sum(),
            salaries: money(r.total_salary),
            items_cost: money(r.total_items_cost),
        })
        .collect();
    println!("{}", styled(Table::new(rows)));
}
