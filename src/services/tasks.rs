use crate::error::{Error, Result};
use crate::models::{
    CreateTask, Feature, Priority, Project, Task, TaskStatus, TaskWithContext, UpdateTask,
};
use crate::services::slug;
use crate::Database;
use rusqlite::OptionalExtension;

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        feature_id: row.get(1)?,
        title: row.get(2)?,
        slug: row.get(3)?,
        description: row.get(4)?,
        status: row
            .get::<_, String>(5)?
            .parse()
            .unwrap_or(TaskStatus::Todo),
        priority: row
            .get::<_, String>(6)?
            .parse()
            .unwrap_or(Priority::Medium),
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Resolve a feature through its project chain and check ownership. An
/// unresolved chain is a 404; a chain owned by someone else is a 403.
fn resolve_feature(
    db: &Database,
    user_id: i64,
    project_slug: &str,
    feature_slug: &str,
) -> Result<(Feature, Project)> {
    let conn = db.get()?;
    let found = conn
        .query_row(
            "SELECT f.id, f.project_id, f.name, f.slug, f.description, f.created_at, f.updated_at,
                    p.id, p.user_id, p.name, p.slug, p.description, p.created_at, p.updated_at
             FROM features f
             JOIN projects p ON p.id = f.project_id
             WHERE f.slug = ? AND p.slug = ?",
            (feature_slug, project_slug),
            |row| {
                let feature = Feature {
                    id: row.get(0)?,
                    project_id: row.get(1)?,
                    name: row.get(2)?,
                    slug: row.get(3)?,
                    description: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                };
                let project = Project {
                    id: row.get(7)?,
                    user_id: row.get(8)?,
                    name: row.get(9)?,
                    slug: row.get(10)?,
                    description: row.get(11)?,
                    created_at: row.get(12)?,
                    updated_at: row.get(13)?,
                };
                Ok((feature, project))
            },
        )
        .optional()?;

    match found {
        None => Err(Error::not_found(
            "feature",
            format!("{}/{}", project_slug, feature_slug),
        )),
        Some((_, project)) if project.user_id != user_id => Err(Error::Forbidden("feature")),
        Some(pair) => Ok(pair),
    }
}

pub fn create_task(
    db: &Database,
    user_id: i64,
    project_slug: &str,
    feature_slug: &str,
    input: &CreateTask,
) -> Result<TaskWithContext> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(Error::validation("Task title cannot be empty"));
    }

    let (feature, project) = resolve_feature(db, user_id, project_slug, feature_slug)?;

    let task = slug::retry_on_conflict(|| {
        let conn = db.get()?;
        let slug_value = slug::assign_slug(title, |candidate| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM tasks WHERE feature_id = ? AND slug = ?",
                (feature.id, candidate),
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })?;

        conn.execute(
            "INSERT INTO tasks (feature_id, title, slug, description, status, priority)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                feature.id,
                title,
                &slug_value,
                &input.description,
                input.status.to_string(),
                input.priority.to_string(),
            ),
        )?;
        let id = conn.last_insert_rowid();
        let task = conn.query_row(
            "SELECT id, feature_id, title, slug, description, status, priority, created_at, updated_at
             FROM tasks WHERE id = ?",
            [id],
            row_to_task,
        )?;
        Ok(task)
    })?;

    Ok(TaskWithContext {
        task,
        feature: (&feature).into(),
        project: (&project).into(),
    })
}

pub fn list_tasks(
    db: &Database,
    user_id: i64,
    project_slug: &str,
    feature_slug: &str,
) -> Result<Vec<Task>> {
    let (feature, _) = resolve_feature(db, user_id, project_slug, feature_slug)?;

    let conn = db.get()?;
    let mut stmt = conn.prepare(
        "SELECT id, feature_id, title, slug, description, status, priority, created_at, updated_at
         FROM tasks WHERE feature_id = ? ORDER BY created_at DESC, id DESC",
    )?;
    let tasks = stmt
        .query_map([feature.id], row_to_task)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub fn get_task(
    db: &Database,
    user_id: i64,
    project_slug: &str,
    feature_slug: &str,
    task_slug: &str,
) -> Result<TaskWithContext> {
    let (feature, project) = resolve_feature(db, user_id, project_slug, feature_slug)?;

    let conn = db.get()?;
    let task = conn
        .query_row(
            "SELECT id, feature_id, title, slug, description, status, priority, created_at, updated_at
             FROM tasks WHERE feature_id = ? AND slug = ?",
            (feature.id, task_slug),
            row_to_task,
        )
        .optional()?
        .ok_or_else(|| {
            Error::not_found(
                "task",
                format!("{}/{}/{}", project_slug, feature_slug, task_slug),
            )
        })?;

    Ok(TaskWithContext {
        task,
        feature: (&feature).into(),
        project: (&project).into(),
    })
}

pub fn update_task(
    db: &Database,
    user_id: i64,
    project_slug: &str,
    feature_slug: &str,
    task_slug: &str,
    input: &UpdateTask,
) -> Result<TaskWithContext> {
    let current = get_task(db, user_id, project_slug, feature_slug, task_slug)?;

    let title = match &input.title {
        Some(title) if title.trim().is_empty() => {
            return Err(Error::validation("Task title cannot be empty"));
        }
        Some(title) => title.trim().to_string(),
        None => current.task.title,
    };
    let description = input.description.clone().or(current.task.description);
    let status = input.status.unwrap_or(current.task.status);
    let priority = input.priority.unwrap_or(current.task.priority);

    let conn = db.get()?;
    conn.execute(
        "UPDATE tasks SET title = ?, description = ?, status = ?, priority = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
        (
            &title,
            &description,
            status.to_string(),
            priority.to_string(),
            current.task.id,
        ),
    )?;

    get_task(db, user_id, project_slug, feature_slug, task_slug)
}

pub fn delete_task(
    db: &Database,
    user_id: i64,
    project_slug: &str,
    feature_slug: &str,
    task_slug: &str,
) -> Result<TaskWithContext> {
    let task = get_task(db, user_id, project_slug, feature_slug, task_slug)?;
    let conn = db.get()?;
    conn.execute("DELETE FROM tasks WHERE id = ?", [task.task.id])?;
    Ok(task)
}
