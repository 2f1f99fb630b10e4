pub mod month_report;
