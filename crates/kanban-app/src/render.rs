//! Declarative view of the board.
//!
//! [`render`] rebuilds the whole tree from the store on every call. Adapters
//! bind interaction handlers from [`BoardView::bindings`]; since the list is
//! derived from state alone, binding it again after a re-render never
//! duplicates a handler.

use crate::handlers::drag_drop::DropTarget;
use chrono::{DateTime, Utc};
use kanban_domain::{Age, AgeClass, BoardId, BoardStore, ColumnId, Task, TaskId};
use serde::Serialize;
use std::fmt;

/// Interaction a rendered element offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "action", content = "id", rename_all = "snake_case")]
pub enum Action {
    SelectBoard(BoardId),
    AddTask(ColumnId),
    DragTask(TaskId),
    EditTask(TaskId),
    DeleteTask(TaskId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub header: HeaderView,
    pub board_options: Vec<BoardOption>,
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardOption {
    pub id: BoardId,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub id: ColumnId,
    pub name: String,
    pub task_count: usize,
    #[serde(skip)]
    pub drop_zone: DropTarget,
    pub tasks: Vec<TaskCardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCardView {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub created: String,
    pub age: String,
    pub age_class: AgeClass,
    pub actions: Vec<Action>,
}

pub fn render(store: &BoardStore, now: DateTime<Utc>) -> BoardView {
    let header = match store.current_board() {
        Some(board) => HeaderView {
            title: board.name.clone(),
            description: board.description.clone().unwrap_or_default(),
        },
        None => HeaderView {
            title: String::new(),
            description: String::new(),
        },
    };

    let current = store.current_board_id();
    let board_options = store
        .boards()
        .iter()
        .map(|board| BoardOption {
            id: board.id,
            name: board.name.clone(),
            selected: Some(board.id) == current,
        })
        .collect();

    let columns = store
        .columns()
        .iter()
        .map(|column| {
            let tasks: Vec<TaskCardView> = store
                .tasks_in_column(column.id)
                .map(|task| render_task(task, now))
                .collect();
            ColumnView {
                id: column.id,
                name: column.name.clone(),
                task_count: tasks.len(),
                drop_zone: DropTarget::Zone(column.id),
                tasks,
            }
        })
        .collect();

    BoardView {
        header,
        board_options,
        columns,
    }
}

fn render_task(task: &Task, now: DateTime<Utc>) -> TaskCardView {
    let age = Age::since(task.created_at, now);
    TaskCardView {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone().filter(|d| !d.is_empty()),
        created: task
            .created_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Recently".to_string()),
        age: age.to_string(),
        age_class: age.class(),
        actions: vec![
            Action::DragTask(task.id),
            Action::EditTask(task.id),
            Action::DeleteTask(task.id),
        ],
    }
}

impl BoardView {
    /// Every handler the adapter has to attach for this tree.
    pub fn bindings(&self) -> Vec<Action> {
        let mut bindings: Vec<Action> = self
            .board_options
            .iter()
            .map(|option| Action::SelectBoard(option.id))
            .collect();
        for column in &self.columns {
            bindings.push(Action::AddTask(column.id));
            for task in &column.tasks {
                bindings.extend(task.actions.iter().copied());
            }
        }
        bindings
    }

    pub fn column(&self, id: ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn task_card_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.header.title.is_empty() {
            writeln!(f, "(no board selected)")?;
        } else {
            writeln!(f, "{}", self.header.title)?;
        }
        if !self.header.description.is_empty() {
            writeln!(f, "{}", self.header.description)?;
        }
        for column in &self.columns {
            writeln!(f)?;
            writeln!(f, "== {} ({}) [column {}]", column.name, column.task_count, column.id)?;
            for task in &column.tasks {
                writeln!(f, "  #{} {}", task.id, task.title)?;
                if let Some(ref description) = task.description {
                    writeln!(f, "      {}", description)?;
                }
                writeln!(
                    f,
                    "      Created: {}  [{}: {}]",
                    task.created, task.age_class, task.age
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use kanban_domain::{Board, Column, ColumnWithTasks};

    fn store_with(tasks_per_column: Vec<Vec<Task>>) -> BoardStore {
        let mut store = BoardStore::new();
        let columns = tasks_per_column
            .into_iter()
            .enumerate()
            .map(|(i, tasks)| {
                let id = i as i64 + 1;
                ColumnWithTasks::new(Column::new(id, 1, format!("Col {}", id), i as i32), tasks)
            })
            .collect();
        store.set_boards(vec![Board::new(1, "Main", Some("Team board".into())), Board::new(2, "Side", None)]);
        store.load(Board::new(1, "Main", Some("Team board".into())), columns);
        store
    }

    #[test]
    fn test_task_count_matches_cards() {
        let store = store_with(vec![
            vec![Task::new(1, 0, "a", 0), Task::new(2, 0, "b", 1), Task::new(3, 0, "c", 2)],
            vec![],
        ]);
        let view = render(&store, Utc::now());

        for column in &view.columns {
            assert_eq!(column.task_count, column.tasks.len());
        }
        assert_eq!(view.column(1).unwrap().task_count, 3);
        assert_eq!(view.column(2).unwrap().task_count, 0);
    }

    #[test]
    fn test_empty_columns_render_zero_cards() {
        let store = store_with(vec![vec![]]);
        let view = render(&store, Utc::now());

        assert_eq!(view.task_card_count(), 0);
        assert_eq!(view.columns[0].task_count, 0);
        assert!(view.to_string().contains("== Col 1 (0)"));
    }

    #[test]
    fn test_task_card_fields() {
        let now = Utc::now();
        let store = store_with(vec![vec![
            Task::new(1, 0, "old", 0)
                .with_description("details")
                .with_created_at(now - Duration::days(10)),
            Task::new(2, 0, "undated", 1),
        ]]);
        let view = render(&store, now);
        let cards = &view.columns[0].tasks;

        assert_eq!(cards[0].age, "10 days");
        assert_eq!(cards[0].age_class, AgeClass::Stale);
        assert_eq!(cards[0].description.as_deref(), Some("details"));
        assert_eq!(cards[1].age, "New");
        assert_eq!(cards[1].created, "Recently");
        assert_eq!(cards[1].age_class, AgeClass::Fresh);
    }

    #[test]
    fn test_header_and_selector() {
        let store = store_with(vec![vec![]]);
        let view = render(&store, Utc::now());

        assert_eq!(view.header.title, "Main");
        assert_eq!(view.header.description, "Team board");
        let selected: Vec<_> = view.board_options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, 1);
    }

    #[test]
    fn test_empty_store_placeholder() {
        let view = render(&BoardStore::new(), Utc::now());
        assert!(view.header.title.is_empty());
        assert!(view.columns.is_empty());
        assert!(view.to_string().starts_with("(no board selected)"));
    }

    #[test]
    fn test_rerender_is_identical_and_bindings_unique() {
        let now = Utc::now();
        let store = store_with(vec![vec![Task::new(1, 0, "a", 0)], vec![Task::new(2, 0, "b", 0)]]);

        let first = render(&store, now);
        let second = render(&store, now);
        assert_eq!(first, second);

        let bindings = second.bindings();
        let unique: std::collections::HashSet<_> = bindings.iter().collect();
        assert_eq!(unique.len(), bindings.len());
        assert!(bindings.contains(&Action::DragTask(2)));
        assert!(bindings.contains(&Action::AddTask(1)));
    }

    #[test]
    fn test_tasks_keep_store_order() {
        let store = store_with(vec![vec![
            Task::new(7, 0, "second", 1),
            Task::new(3, 0, "first", 0),
        ]]);
        let view = render(&store, Utc::now());
        let ids: Vec<_> = view.columns[0].tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }
}
