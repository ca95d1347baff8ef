use chrono::NaiveDate;

use bridge_core::model::{Todo, TodoId};

use crate::vm::time_fmt::format_short_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoRowVm {
    pub id: TodoId,
    pub title: String,
    pub due_label: String,
    pub due_input: String,
    pub completed: bool,
    pub overdue: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TodoCounts {
    pub total: usize,
    pub done: usize,
    pub overdue: usize,
}

impl TodoRowVm {
    #[must_use]
    pub fn from_todo(todo: &Todo, today: NaiveDate) -> Self {
        Self {
            id: todo.id(),
            title: todo.title().to_owned(),
            due_label: format_short_date(todo.due_date()),
            due_input: todo.due_date().format("%Y-%m-%d").to_string(),
            completed: todo.is_completed(),
            overdue: todo.is_overdue(today),
        }
    }
}

#[must_use]
pub fn map_todos(todos: &[Todo], today: NaiveDate) -> Vec<TodoRowVm> {
    todos.iter().map(|t| TodoRowVm::from_todo(t, today)).collect()
}

#[must_use]
pub fn count_todos(rows: &[TodoRowVm]) -> TodoCounts {
    TodoCounts {
        total: rows.len(),
        done: rows.iter().filter(|r| r.completed).count(),
        overdue: rows.iter().filter(|r| r.overdue).count(),
    }
}

/// Parse the value of an `<input type="date">`; blank means "no date".
#[must_use]
pub fn parse_due_input(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::model::UserId;
    use bridge_core::time::fixed_now;

    fn todo(id: u64, due: NaiveDate, completed: bool) -> Todo {
        Todo::from_persisted(
            TodoId::new(id),
            UserId::generate(),
            format!("task {id}"),
            due,
            completed,
            fixed_now(),
        )
    }

    #[test]
    fn rows_flag_overdue_and_format_dates() {
        let today = NaiveDate::from_ymd_opt(2023, 12, 4).unwrap();
        let rows = map_todos(
            &[
                todo(1, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(), false),
                todo(2, NaiveDate::from_ymd_opt(2023, 12, 3).unwrap(), true),
                todo(3, NaiveDate::from_ymd_opt(2023, 12, 5).unwrap(), false),
            ],
            today,
        );
        assert_eq!(rows[0].due_label, "Dec 1");
        assert_eq!(rows[0].due_input, "2023-12-01");
        assert!(rows[0].overdue);
        assert!(!rows[1].overdue);
        assert!(!rows[2].overdue);

        let counts = count_todos(&rows);
        assert_eq!(
            counts,
            TodoCounts {
                total: 3,
                done: 1,
                overdue: 1
            }
        );
    }

    #[test]
    fn due_input_parsing() {
        assert_eq!(parse_due_input(""), None);
        assert_eq!(parse_due_input("not a date"), None);
        assert_eq!(
            parse_due_input("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }
}
