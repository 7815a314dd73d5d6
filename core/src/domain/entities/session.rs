//! Authenticated user and session returned when a flow completes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a portal user; decides which dashboard they land on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Hospital administrator
    Admin,
    /// Medical staff
    Doctor,
    /// Registered patient
    Patient,
}

impl UserRole {
    /// Path of the role's dashboard
    pub fn dashboard_path(self) -> &'static str {
        match self {
            UserRole::Admin => "/admin/dashboard",
            UserRole::Doctor => "/doctor/dashboard",
            UserRole::Patient => "/patient/dashboard",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserRole::Admin => "admin",
            UserRole::Doctor => "doctor",
            UserRole::Patient => "patient",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "doctor" => Ok(UserRole::Doctor),
            "patient" => Ok(UserRole::Patient),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// User as returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-side identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address the account is bound to
    pub email: String,

    /// Role deciding the landing dashboard
    pub role: UserRole,
}

/// Token and user issued when a flow completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent API calls
    pub token: String,

    /// The authenticated user
    pub user: UserProfile,
}

/// Where the host navigates once a flow completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The sign-in page
    SignIn,
    /// A role dashboard
    Dashboard(UserRole),
}

impl Route {
    /// Path of the route in the portal
    pub fn path(self) -> &'static str {
        match self {
            Route::SignIn => "/signin",
            Route::Dashboard(role) => role.dashboard_path(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
