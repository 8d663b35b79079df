//! User Model

use serde::{Deserialize, Serialize};

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Kasir,
    Waiter,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Kasir, UserRole::Waiter];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Kasir => "kasir",
            UserRole::Waiter => "waiter",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "kasir" => Ok(UserRole::Kasir),
            "waiter" => Ok(UserRole::Waiter),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User entity (without password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Unix seconds
    pub created_at: i64,
    pub updated_at: i64,
}

/// Partial user, shallow-merged over an existing [`User`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub updated_at: Option<i64>,
}

impl User {
    /// Overwrite every field the patch carries, keep the rest
    pub fn merge(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }
}

impl From<User> for UserPatch {
    fn from(user: User) -> Self {
        Self {
            name: Some(user.name),
            email: Some(user.email),
            role: Some(user.role),
            updated_at: Some(user.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Sari".into(),
            email: "sari@pesanin.id".into(),
            role: UserRole::Kasir,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let mut u = user();
        u.merge(UserPatch {
            name: Some("Sari W.".into()),
            ..Default::default()
        });
        assert_eq!(u.name, "Sari W.");
        assert_eq!(u.email, "sari@pesanin.id");
        assert_eq!(u.role, UserRole::Kasir);
        assert_eq!(u.id, "u1");
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&UserRole::Waiter).unwrap();
        assert_eq!(json, "\"waiter\"");
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
        assert_eq!("kasir".parse::<UserRole>().unwrap(), UserRole::Kasir);
        assert!("chef".parse::<UserRole>().is_err());
    }
}
