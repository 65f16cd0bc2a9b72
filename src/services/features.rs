use crate::error::{Error, Result};
use crate::models::{CreateFeature, Feature, FeatureWithCount, Project, UpdateFeature};
use crate::services::{projects, slug};
use crate::Database;
use rusqlite::OptionalExtension;

fn row_to_feature(row: &rusqlite::Row) -> rusqlite::Result<Feature> {
    Ok(Feature {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        slug: row.get(3)?,
        description: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn create_feature(
    db: &Database,
    user_id: i64,
    project_slug: &str,
    input: &CreateFeature,
) -> Result<Feature> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::validation("Feature name cannot be empty"));
    }

    // Resolving through the caller's own projects doubles as the ownership
    // check: someone else's project slug is simply not found.
    let project: Project = projects::get_project_by_slug(db, user_id, project_slug)?;

    slug::retry_on_conflict(|| {
        let conn = db.get()?;
        let slug_value = slug::assign_slug(name, |candidate| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM features WHERE project_id = ? AND slug = ?",
                (project.id, candidate),
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })?;

        conn.execute(
            "INSERT INTO features (project_id, name, slug, description) VALUES (?, ?, ?, ?)",
            (project.id, name, &slug_value, &input.description),
        )?;
        let id = conn.last_insert_rowid();
        let feature = conn.query_row(
            "SELECT id, project_id, name, slug, description, created_at, updated_at FROM features WHERE id = ?",
            [id],
            row_to_feature,
        )?;
        Ok(feature)
    })
}

pub fn list_features(
    db: &Database,
    user_id: i64,
    project_slug: &str,
) -> Result<Vec<FeatureWithCount>> {
    let project = projects::get_project_by_slug(db, user_id, project_slug)?;

    let conn = db.get()?;
    let mut stmt = conn.prepare(
        "SELECT f.id, f.project_id, f.name, f.slug, f.description, f.created_at, f.updated_at,
                (SELECT COUNT(*) FROM tasks t WHERE t.feature_id = f.id) AS task_count
         FROM features f
         WHERE f.project_id = ?
         ORDER BY f.updated_at DESC, f.id DESC",
    )?;
    let features = stmt
        .query_map([project.id], |row| {
            Ok(FeatureWithCount {
                feature: row_to_feature(row)?,
                task_count: row.get(7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(features)
}

/// Hierarchical lookup: the chain is resolved without a user filter, then
/// ownership is checked, so a foreign feature is a 403 rather than a 404.
pub fn get_feature(
    db: &Database,
    user_id: i64,
    project_slug: &str,
    feature_slug: &str,
) -> Result<Feature> {
    let conn = db.get()?;
    let found = conn
        .query_row(
            "SELECT f.id, f.project_id, f.name, f.slug, f.description, f.created_at, f.updated_at,
                    p.user_id
             FROM features f
             JOIN projects p ON p.id = f.project_id
             WHERE f.slug = ? AND p.slug = ?",
            (feature_slug, project_slug),
            |row| Ok((row_to_feature(row)?, row.get::<_, i64>(7)?)),
        )
        .optional()?;

    match found {
        None => Err(Error::not_found(
            "feature",
            format!("{}/{}", project_slug, feature_slug),
        )),
        Some((_, owner_id)) if owner_id != user_id => Err(Error::Forbidden("feature")),
        Some((feature, _)) => Ok(feature),
    }
}

pub fn update_feature(
    db: &Database,
    user_id: i64,
    project_slug: &str,
    feature_slug: &str,
    input: &UpdateFeature,
) -> Result<Feature> {
    let current = get_feature(db, user_id, project_slug, feature_slug)?;

    let name = match &input.name {
        Some(name) if name.trim().is_empty() => {
            return Err(Error::validation("Feature name cannot be empty"));
        }
        Some(name) => name.trim().to_string(),
        None => current.name,
    };
    let description = input.description.clone().or(current.description);

    let conn = db.get()?;
    conn.execute(
        "UPDATE features SET name = ?, description = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        (&name, &description, current.id),
    )?;

    get_feature(db, user_id, project_slug, feature_slug)
}

pub fn delete_feature(
    db: &Database,
    user_id: i64,
    project_slug: &str,
    feature_slug: &str,
) -> Result<Feature> {
    let feature = get_feature(db, user_id, project_slug, feature_slug)?;
    let conn = db.get()?;
    conn.execute("DELETE FROM features WHERE id = ?", [feature.id])?;
    Ok(feature)
}
