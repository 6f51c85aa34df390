// src/models/user.rs
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

// ======== USER ROLE ========

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Approver,
    Employee,
    Viewer,
}

impl Role {
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Διαχειριστής",
            Role::Approver => "Εγκριτής",
            Role::Employee => "Υπάλληλος",
            Role::Viewer => "Θεατής",
        }
    }

    /// Labels only. Nothing in the service enforces them.
    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            Role::Admin => &["Πλήρης πρόσβαση", "Διαχείριση χρηστών", "System config"],
            Role::Approver => &["Έγκριση αιτήσεων", "Διαχείριση πόρων", "Αναφορές"],
            Role::Employee => &["Καταγραφή πόρων", "Υποβολή αιτήσεων", "Προβολή"],
            Role::Viewer => &["Μόνο προβολή"],
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Viewer
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleInfo {
    pub role: Role,
    pub label: &'static str,
    pub permissions: &'static [&'static str],
}

pub fn role_catalogue() -> Vec<RoleInfo> {
    Role::iter()
        .map(|role| RoleInfo {
            role,
            label: role.display_name(),
            permissions: role.permissions(),
        })
        .collect()
}

// ======== USER ========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbacUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub municipality: String,
    pub status: UserStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_lists_every_role() {
        let catalogue = role_catalogue();
        assert_eq!(catalogue.len(), 4);
        assert_eq!(catalogue[0].role, Role::Admin);
        assert_eq!(catalogue[3].permissions, &["Μόνο προβολή"]);
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(UserStatus::Active.toggled(), UserStatus::Inactive);
        assert_eq!(UserStatus::Inactive.toggled(), UserStatus::Active);
    }
}
