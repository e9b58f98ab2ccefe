use super::ITaskRepo;
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use std::convert::TryFrom;
use taskbell_domain::{Reminder, Task, ID};
use tracing::error;

pub struct PostgresTaskRepo {
    pool: PgPool,
}

impl PostgresTaskRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRaw {
    task_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: Option<String>,
    deadline: Option<i64>,
    status: String,
    reminders: Json<Vec<Reminder>>,
    created: i64,
    updated: i64,
}

impl TryFrom<TaskRaw> for Task {
    type Error = anyhow::Error;

    fn try_from(raw: TaskRaw) -> anyhow::Result<Self> {
        Ok(Task {
            id: raw.task_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            description: raw.description,
            deadline: raw.deadline,
            status: raw.status.parse()?,
            reminders: raw.reminders.0,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

fn into_tasks(rows: Vec<TaskRaw>) -> anyhow::Result<Vec<Task>> {
    rows.into_iter().map(Task::try_from).collect()
}

#[async_trait::async_trait]
impl ITaskRepo for PostgresTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks
            (task_uid, user_uid, title, description, deadline, status, reminders, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(task.user_id.inner_ref())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.deadline)
        .bind(task.status.to_string())
        .bind(Json(&task.reminders))
        .bind(task.created)
        .bind(task.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                deadline = $4,
                status = $5,
                reminders = $6,
                updated = $7
            WHERE task_uid = $1
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.deadline)
        .bind(task.status.to_string())
        .bind(Json(&task.reminders))
        .bind(task.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save_reminders(&self, task_id: &ID, reminders: &[Reminder]) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tasks
            SET reminders = $2
            WHERE task_uid = $1
            "#,
        )
        .bind(task_id.inner_ref())
        .bind(Json(reminders))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, task_id: &ID) -> Option<Task> {
        let raw = sqlx::query_as::<_, TaskRaw>(
            r#"
            SELECT * FROM tasks AS t
            WHERE t.task_uid = $1
            "#,
        )
        .bind(task_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()??;

        match Task::try_from(raw) {
            Ok(task) => Some(task),
            Err(e) => {
                error!("Unable to read task {}. Err: {:?}", task_id, e);
                None
            }
        }
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Task> {
        let rows = sqlx::query_as::<_, TaskRaw>(
            r#"
            SELECT * FROM tasks AS t
            WHERE t.user_uid = $1
            ORDER BY t.created
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        into_tasks(rows).unwrap_or_else(|e| {
            error!("Unable to read tasks of user {}. Err: {:?}", user_id, e);
            vec![]
        })
    }

    async fn delete(&self, task_id: &ID) -> Option<Task> {
        let raw = sqlx::query_as::<_, TaskRaw>(
            r#"
            DELETE FROM tasks AS t
            WHERE t.task_uid = $1
            RETURNING *
            "#,
        )
        .bind(task_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()??;

        Task::try_from(raw).ok()
    }

    async fn find_reminder_candidates(&self, now: i64) -> anyhow::Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRaw>(
            r#"
            SELECT * FROM tasks AS t
            WHERE t.status <> 'completed'
                AND t.deadline > $1
                AND jsonb_array_length(t.reminders) > 0
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        into_tasks(rows)
    }
}
