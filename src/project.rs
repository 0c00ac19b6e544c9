use crate::task::Task;

/// Completion filter applied before search and sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }
}

/// Display ordering. Only the projection is reordered; the stored
/// collection always stays in manual (newest-first) order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Manual,
    DueAsc,
    DueDesc,
    PriorityDesc,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Manual => SortMode::DueAsc,
            SortMode::DueAsc => SortMode::DueDesc,
            SortMode::DueDesc => SortMode::PriorityDesc,
            SortMode::PriorityDesc => SortMode::Manual,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Manual => "manual",
            SortMode::DueAsc => "due asc",
            SortMode::DueDesc => "due desc",
            SortMode::PriorityDesc => "priority",
        }
    }
}

/// How the task list should be viewed. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub filter: Filter,
    pub query: String,
    pub sort: SortMode,
}

/// The computed view: tasks to display plus whole-collection counts.
#[derive(Debug)]
pub struct Projection<'a> {
    pub visible: Vec<&'a Task>,
    pub total: usize,
    pub completed: usize,
}

/// Filters, searches, and sorts the collection for display. Pure: the
/// input slice is never mutated and identical inputs give identical
/// output. `total` and `completed` always describe the whole collection,
/// regardless of filter, query, or sort.
pub fn project<'a>(tasks: &'a [Task], view: &ViewState) -> Projection<'a> {
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| match view.filter {
            Filter::All => true,
            Filter::Active => !t.completed,
            Filter::Completed => t.completed,
        })
        .collect();

    let query = view.query.trim().to_lowercase();
    if !query.is_empty() {
        visible.retain(|t| t.title.to_lowercase().contains(&query));
    }

    match view.sort {
        SortMode::Manual => {}
        SortMode::DueAsc => visible.sort_by(|a, b| a.due_key().cmp(b.due_key())),
        // Mirror of DueAsc, not a date-aware inverse: a task with no due
        // date carries the minimal key in both directions, so it sorts
        // first ascending and last descending.
        SortMode::DueDesc => visible.sort_by(|a, b| b.due_key().cmp(a.due_key())),
        SortMode::PriorityDesc => {
            visible.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
        }
    }

    Projection {
        visible,
        total: tasks.len(),
        completed: tasks.iter().filter(|t| t.completed).count(),
    }
}
