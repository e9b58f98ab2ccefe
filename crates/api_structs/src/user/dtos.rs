use serde::{Deserialize, Serialize};
use taskbell_domain::{User, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub email: String,
    pub name: String,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}
