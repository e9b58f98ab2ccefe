use crate::shared::entity::{Entity, ID};

/// The owner of `Task`s and the recipient of their reminders
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(email: String, name: String) -> Self {
        Self {
            id: Default::default(),
            email,
            name,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
