//! Domain enums for the Campus Connect identity service

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User category discriminator
///
/// Decides which profile table a user owns: college students get a
/// `college_students` row, alumni get an `alumni` row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    College,
    Alumni,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::College => "college",
            Category::Alumni => "alumni",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "college" => Ok(Category::College),
            "alumni" => Ok(Category::Alumni),
            _ => Err(()),
        }
    }
}

/// User gender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(()),
        }
    }
}

/// Account status
///
/// Stored as text in the database; anything outside the known set is
/// treated as suspended for login purposes. Responses echo the raw
/// database value, so the lenient mapping here only drives the login
/// permission check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Pending,
    Suspended,
}

impl AccountStatus {
    /// Map a raw database status string, collapsing unknown values
    pub fn from_db(status: &str) -> Self {
        match status {
            "active" => AccountStatus::Active,
            "pending" => AccountStatus::Pending,
            _ => AccountStatus::Suspended,
        }
    }

    /// Whether a user with this status may log in
    pub fn can_login(&self) -> bool {
        matches!(self, AccountStatus::Active | AccountStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        assert_eq!("college".parse::<Category>(), Ok(Category::College));
        assert_eq!("alumni".parse::<Category>(), Ok(Category::Alumni));
        assert!("staff".parse::<Category>().is_err());
        assert_eq!(Category::College.as_str(), "college");
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Female));
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn test_status_login_permission() {
        assert!(AccountStatus::from_db("active").can_login());
        assert!(AccountStatus::from_db("pending").can_login());
        assert!(!AccountStatus::from_db("suspended").can_login());
        // Unknown statuses are never allowed to log in
        assert!(!AccountStatus::from_db("banned").can_login());
    }
}
