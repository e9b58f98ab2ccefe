use crate::dtos::TaskDTO;
use serde::{Deserialize, Deserializer, Serialize};
use taskbell_domain::{RawReminder, ReminderAction, Task, TaskStatus, UtcReminderSpec, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task: TaskDTO,
}

impl TaskResponse {
    pub fn new(task: Task) -> Self {
        Self {
            task: TaskDTO::new(task),
        }
    }
}

/// Distinguishes a field set to `null` (`Some(None)`) from a missing
/// field (`None`)
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

pub mod create_task {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub deadline: Option<i64>,
        #[serde(default)]
        pub status: Option<TaskStatus>,
        #[serde(default)]
        pub reminders: Vec<RawReminder>,
    }

    pub type APIResponse = TaskResponse;
}

pub mod get_task {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub task_id: ID,
    }

    pub type APIResponse = TaskResponse;
}

pub mod get_user_tasks {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub tasks: Vec<TaskDTO>,
    }

    impl APIResponse {
        pub fn new(tasks: Vec<Task>) -> Self {
            Self {
                tasks: tasks.into_iter().map(TaskDTO::new).collect(),
            }
        }
    }
}

pub mod update_task {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub task_id: ID,
    }

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        /// `null` clears the deadline together with all reminders
        #[serde(
            default,
            deserialize_with = "deserialize_some",
            skip_serializing_if = "Option::is_none"
        )]
        pub deadline: Option<Option<i64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub status: Option<TaskStatus>,
        /// Replaces all reminders when present
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub reminders: Option<Vec<RawReminder>>,
    }

    pub type APIResponse = TaskResponse;
}

pub mod update_task_reminders {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub task_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub action: ReminderAction,
        pub reminders: Vec<UtcReminderSpec>,
    }

    pub type APIResponse = TaskResponse;
}

pub mod delete_task {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub task_id: ID,
    }

    pub type APIResponse = TaskResponse;
}

#[cfg(test)]
mod test {
    use super::update_task::RequestBody;

    #[test]
    fn update_body_distinguishes_null_from_missing_deadline() {
        let body: RequestBody = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(body.deadline, None);

        let body: RequestBody = serde_json::from_str(r#"{"deadline": null}"#).unwrap();
        assert_eq!(body.deadline, Some(None));

        let body: RequestBody = serde_json::from_str(r#"{"deadline": 1613865600000}"#).unwrap();
        assert_eq!(body.deadline, Some(Some(1613865600000)));

        let json = serde_json::to_value(RequestBody {
            deadline: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert!(json["deadline"].is_null());
        assert!(json.get("title").is_none());
    }
}
