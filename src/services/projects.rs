use crate::error::{Error, Result};
use crate::models::{CreateProject, Project, UpdateProject};
use crate::services::slug;
use crate::Database;
use rusqlite::OptionalExtension;

fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        slug: row.get(3)?,
        description: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn create_project(db: &Database, user_id: i64, input: &CreateProject) -> Result<Project> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::validation("Project name cannot be empty"));
    }

    slug::retry_on_conflict(|| {
        let conn = db.get()?;
        let slug_value = slug::assign_slug(name, |candidate| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM projects WHERE user_id = ? AND slug = ?",
                (user_id, candidate),
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })?;

        conn.execute(
            "INSERT INTO projects (user_id, name, slug, description) VALUES (?, ?, ?, ?)",
            (user_id, name, &slug_value, &input.description),
        )?;
        let id = conn.last_insert_rowid();
        let project = conn.query_row(
            "SELECT id, user_id, name, slug, description, created_at, updated_at FROM projects WHERE id = ?",
            [id],
            row_to_project,
        )?;
        Ok(project)
    })
}

pub fn list_projects(db: &Database, user_id: i64) -> Result<Vec<Project>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, slug, description, created_at, updated_at
         FROM projects WHERE user_id = ? ORDER BY updated_at DESC, id DESC",
    )?;
    let projects = stmt
        .query_map([user_id], row_to_project)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(projects)
}

pub fn get_project(db: &Database, id: i64, user_id: i64) -> Result<Project> {
    let conn = db.get()?;
    let project = conn
        .query_row(
            "SELECT id, user_id, name, slug, description, created_at, updated_at FROM projects WHERE id = ?",
            [id],
            row_to_project,
        )
        .optional()?
        .ok_or_else(|| Error::not_found("project", id.to_string()))?;

    if project.user_id != user_id {
        return Err(Error::Forbidden("project"));
    }
    Ok(project)
}

pub fn get_project_by_slug(db: &Database, user_id: i64, slug: &str) -> Result<Project> {
    let conn = db.get()?;
    conn.query_row(
        "SELECT id, user_id, name, slug, description, created_at, updated_at
         FROM projects WHERE user_id = ? AND slug = ?",
        (user_id, slug),
        row_to_project,
    )
    .optional()?
    .ok_or_else(|| Error::not_found("project", slug))
}

/// PATCH semantics over name and description. The slug never changes, even
/// when the name does.
pub fn update_project(
    db: &Database,
    id: i64,
    user_id: i64,
    input: &UpdateProject,
) -> Result<Project> {
    let current = get_project(db, id, user_id)?;

    let name = match &input.name {
        Some(name) if name.trim().is_empty() => {
            return Err(Error::validation("Project name cannot be empty"));
        }
        Some(name) => name.trim().to_string(),
        None => current.name,
    };
    let description = input.description.clone().or(current.description);

    let conn = db.get()?;
    conn.execute(
        "UPDATE projects SET name = ?, description = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        (&name, &description, id),
    )?;

    get_project(db, id, user_id)
}

/// Deletes the project and, through the schema's cascades, every feature and
/// task under it. Returns the deleted row.
pub fn delete_project(db: &Database, id: i64, user_id: i64) -> Result<Project> {
    let project = get_project(db, id, user_id)?;
    let conn = db.get()?;
    conn.execute("DELETE FROM projects WHERE id = ?", [id])?;
    Ok(project)
}
