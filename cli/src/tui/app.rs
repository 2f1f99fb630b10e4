use chrono::{Duration, NaiveDate};
use ratatui::widgets::TableState;
use tracker_core::{ItemInput, MonthReport, StaffInput};

use crate::workspace::{describe_save, describe_sync, Workspace};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tab {
    Daily,
    Staff,
    Items,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Daily, Tab::Staff, Tab::Items];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Daily => "Daily Tracker",
            Tab::Staff => "Staff",
            Tab::Items => "Items",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Daily => 0,
            Tab::Staff => 1,
            Tab::Items => 2,
        }
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

pub enum InputMode {
    Normal,
    Adding,
    Modifying,
}

/// A row of the Daily tab: staff attendance first, then items received.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DailyRow {
    Staff(usize),
    Item(usize),
}

pub struct App {
    pub workspace: Workspace,
    pub date: NaiveDate,
    pub tab: Tab,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<String>,
    pub report: MonthReport,
}

impl App {
    pub fn new(workspace: Workspace, date: NaiveDate) -> App {
        let report = workspace.month_report(date);
        let status = Some(describe_sync(&workspace.tracker));
        let mut app = App {
            workspace,
            date,
            tab: Tab::Daily,
            state: TableState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status,
            report,
        };
        app.reset_selection();
        app
    }

    fn row_count(&self) -> usize {
        let roster = &self.workspace.roster;
        match self.tab {
            Tab::Daily => roster.staff.len() + roster.items.len(),
            Tab::Staff => roster.staff.len(),
            Tab::Items => roster.items.len(),
        }
    }

    pub fn daily_row(&self, index: usize) -> Option<DailyRow> {
        let staff_len = self.workspace.roster.staff.len();
        if index < staff_len {
            Some(DailyRow::Staff(index))
        } else if index < self.row_count() {
            Some(DailyRow::Item(index - staff_len))
        } else {
            None
        }
    }

    fn reset_selection(&mut self) {
        if self.row_count() == 0 {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.row_count();
        match self.state.selected() {
            _ if count == 0 => self.state.select(None),
            Some(i) if i >= count => self.state.select(Some(count - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
    }

    pub fn next(&mut self) {
        let count = self.row_count();
        if count == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= count - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let count = self.row_count();
        if count == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    count - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.select_tab(self.tab.previous());
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.reset_selection();
        }
    }

    pub fn next_day(&mut self) {
        self.date += Duration::days(1);
        self.refresh_report();
    }

    pub fn previous_day(&mut self) {
        self.date -= Duration::days(1);
        self.refresh_report();
    }

    pub fn refresh_report(&mut self) {
        self.report = self.workspace.month_report(self.date);
    }

    fn persist_roster(&mut self) {
        if let Err(e) = self.workspace.save_roster() {
            self.status = Some(format!("Could not save roster: {}", e));
        }
        self.clamp_selection();
        self.refresh_report();
    }

    fn selected_staff_id(&self) -> Option<u32> {
        let i = self.state.selected()?;
        let index = match self.tab {
            Tab::Daily => match self.daily_row(i)? {
                DailyRow::Staff(s) => s,
                DailyRow::Item(_) => return None,
            },
            Tab::Staff => i,
            Tab::Items => return None,
        };
        self.workspace.roster.staff.get(index).map(|s| s.id)
    }

    fn selected_item_id(&self) -> Option<u32> {
        let i = self.state.selected()?;
        let index = match self.tab {
            Tab::Daily => match self.daily_row(i)? {
                DailyRow::Item(it) => it,
                DailyRow::Staff(_) => return None,
            },
            Tab::Items => i,
            Tab::Staff => return None,
        };
        self.workspace.roster.items.get(index).map(|i| i.id)
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_staff_id() {
            self.workspace.roster.toggle_attendance(id);
            self.persist_roster();
        }
    }

    pub fn adjust_selected(&mut self, delta: i64) {
        if let Some(id) = self.selected_item_id() {
            self.workspace.roster.adjust_quantity(id, delta);
            self.persist_roster();
        }
    }

    pub fn delete_selected(&mut self) {
        let removed = match self.tab {
            Tab::Staff => self
                .selected_staff_id()
                .map(|id| self.workspace.roster.remove_staff(id)),
            Tab::Items => self
                .selected_item_id()
                .map(|id| self.workspace.roster.remove_item(id)),
            Tab::Daily => None,
        };
        if removed == Some(true) {
            self.persist_roster();
        }
    }

    pub fn save_day(&mut self) {
        self.status = Some(match self.workspace.save_day(self.date) {
            Ok(outcome) => describe_save(&outcome),
            Err(e) => format!("Error saving data: {}", e),
        });
        self.refresh_report();
    }

    pub fn enter_add_mode(&mut self) {
        if self.tab == Tab::Daily { return; }
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn enter_modify_mode(&mut self) {
        if self.tab != Tab::Daily && self.state.selected().is_some() {
            self.input_mode = InputMode::Modifying;
            self.input.clear();
            self.cursor_position = 0;
        }
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn byte_index(&self) -> usize {
        self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum()
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        match self.input_mode {
            InputMode::Adding => self.submit_add(&args),
            InputMode::Modifying => self.submit_modify(&args),
            InputMode::Normal => {},
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    fn submit_add(&mut self, args: &[String]) {
        let added = match self.tab {
            Tab::Staff => StaffInput::parse(args).map(|input| input.add_to(&mut self.workspace.roster)),
            Tab::Items => ItemInput::parse(args).map(|input| input.add_to(&mut self.workspace.roster)),
            Tab::Daily => return,
        };
        match added {
            Ok(Some(_)) => {
                self.persist_roster();
                let count = self.row_count();
                self.state.select(count.checked_sub(1));
            }
            Ok(None) => self.status = Some("A name is required.".to_string()),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn submit_modify(&mut self, args: &[String]) {
        let applied = match self.tab {
            Tab::Staff => match self.selected_staff_id() {
                Some(id) => StaffInput::parse(args).map(|edit| edit.apply_to(&mut self.workspace.roster, id)),
                None => return,
            },
            Tab::Items => match self.selected_item_id() {
                Some(id) => ItemInput::parse(args).map(|edit| edit.apply_to(&mut self.workspace.roster, id)),
                None => return,
            },
            Tab::Daily => return,
        };
        match applied {
            Ok(true) => self.persist_roster(),
            Ok(false) => {}
            Err(e) => self.status = Some(e.to_string()),
        }
    }
}
