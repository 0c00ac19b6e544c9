use std::io;

use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Terminal,
};
use uuid::Uuid;

use crate::project::{project, ViewState};
use crate::store::{TaskStore, TaskUpdate};
use crate::task::{Priority, Task};

const HELP: &str =
    "a add  e edit  d delete  space toggle  f filter  s sort  / search  c clear done  q quit";

/// Edit in progress, seeded from the task and owned by the UI until it is
/// committed to the store or discarded.
struct EditDraft {
    title: String,
    due: Option<String>,
    priority: Priority,
}

impl EditDraft {
    fn seed(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            due: task.due.clone(),
            priority: task.priority,
        }
    }

    fn into_update(self) -> TaskUpdate {
        TaskUpdate {
            title: Some(self.title),
            due: Some(self.due),
            priority: Some(self.priority),
        }
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, store: &mut TaskStore) -> io::Result<()> {
    let mut view = ViewState::default();
    let mut selected: usize = 0;
    let mut status: Option<String> = None;

    loop {
        let visible_ids: Vec<Uuid> = project(store.tasks(), &view)
            .visible
            .iter()
            .map(|t| t.id)
            .collect();
        if selected >= visible_ids.len() {
            selected = visible_ids.len().saturating_sub(1);
        }

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .split(f.area());

            let projection = project(store.tasks(), &view);

            let mut title = format!(
                " tasks [{} | {}]",
                view.filter.label(),
                view.sort.label()
            );
            if !view.query.is_empty() {
                title.push_str(&format!(" /{}", view.query));
            }
            title.push(' ');

            let items: Vec<ListItem> = projection
                .visible
                .iter()
                .enumerate()
                .map(|(i, task)| task_row(task, i == selected))
                .collect();
            let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
            f.render_widget(list, chunks[0]);

            let stats = format!(
                "{} task{} • {} completed",
                projection.total,
                if projection.total == 1 { "" } else { "s" },
                projection.completed
            );
            f.render_widget(Paragraph::new(stats), chunks[1]);

            let line = status.clone().unwrap_or_else(|| HELP.to_string());
            f.render_widget(
                Paragraph::new(line).style(Style::default().fg(Color::DarkGray)),
                chunks[2],
            );
        })?;

        if let Event::Key(key) = event::read()? {
            status = None;
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('a') => {
                    if let Some(title) = prompt("New task title:") {
                        let due = prompt("Due date (YYYY-MM-DD, empty for none):");
                        let priority = prompt("Priority (low/medium/high, empty for medium):")
                            .as_deref()
                            .and_then(Priority::parse);
                        status = Some(match store.add(&title, due, priority) {
                            Ok(task) => format!("added \"{}\"", task.title),
                            Err(err) => err.to_string(),
                        });
                    }
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(&id) = visible_ids.get(selected) {
                        store.toggle_completed(id);
                    }
                }
                KeyCode::Char('e') => {
                    if let Some(&id) = visible_ids.get(selected) {
                        if let Some(draft) = store.get(id).map(EditDraft::seed) {
                            status = edit_task(store, id, draft);
                        }
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(&id) = visible_ids.get(selected) {
                        if let Some(answer) = prompt("Delete this task? (y/N)") {
                            if answer.eq_ignore_ascii_case("y") {
                                store.remove(id);
                            }
                        }
                    }
                }
                KeyCode::Char('c') => {
                    let removed = store.clear_completed();
                    status = Some(format!(
                        "cleared {removed} completed task{}",
                        if removed == 1 { "" } else { "s" }
                    ));
                }
                KeyCode::Char('f') => view.filter = view.filter.next(),
                KeyCode::Char('s') => view.sort = view.sort.next(),
                KeyCode::Char('/') => {
                    if let Some(query) = prompt("Search (empty clears):") {
                        view.query = query;
                    }
                }
                KeyCode::Up => selected = selected.saturating_sub(1),
                KeyCode::Down => {
                    if selected + 1 < visible_ids.len() {
                        selected += 1;
                    }
                }
                _ => {}
            }
        }
    }
}

/// Prompt sequence for an edit. Empty input keeps the current value and
/// '-' clears the due date; a failed read discards the draft untouched.
fn edit_task(store: &mut TaskStore, id: Uuid, mut draft: EditDraft) -> Option<String> {
    let title = prompt(&format!("Title [{}]:", draft.title))?;
    if !title.is_empty() {
        draft.title = title;
    }

    let current_due = draft.due.clone().unwrap_or_else(|| "none".to_string());
    let due = prompt(&format!("Due date [{current_due}] ('-' clears):"))?;
    if due == "-" {
        draft.due = None;
    } else if !due.is_empty() {
        draft.due = Some(due);
    }

    let priority = prompt(&format!("Priority [{}]:", draft.priority.label()))?;
    if let Some(priority) = Priority::parse(&priority) {
        draft.priority = priority;
    }

    Some(match store.edit(id, draft.into_update()) {
        Ok(true) => "saved".to_string(),
        Ok(false) => "task is gone".to_string(),
        Err(err) => err.to_string(),
    })
}

fn task_row(task: &Task, selected: bool) -> ListItem<'_> {
    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let title_style = if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::raw(checkbox),
        Span::styled(task.title.as_str(), title_style),
    ];
    if let Some(due) = &task.due {
        spans.push(Span::raw(format!("  (due {due})")));
    }
    spans.push(Span::styled(
        format!("  {}", task.priority.label()),
        Style::default().fg(priority_color(task.priority)),
    ));

    let mut item = ListItem::new(Line::from(spans));
    if selected {
        item = item.style(Style::default().add_modifier(Modifier::REVERSED));
    }
    item
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
        Priority::Unknown => Color::DarkGray,
    }
}

fn prompt(message: &str) -> Option<String> {
    disable_raw_mode().ok();
    println!("{}", message);
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_ok() {
        enable_raw_mode().ok();
        Some(input.trim().to_string())
    } else {
        enable_raw_mode().ok();
        None
    }
}
