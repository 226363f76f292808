use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LendingError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // This is a retry-able error, which indicates that the record being
    // updated was changed by another caller since it was read, or that the
    // resource is held in a state the transition does not expect.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LendingError {
    pub fn duplicate_key(message: &str) -> LendingError {
        LendingError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LendingError {
        LendingError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LendingError {
        LendingError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LendingError {
        LendingError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LendingError {
        LendingError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LendingError {
        LendingError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LendingError::DuplicateKey { .. } => { false }
            LendingError::NotFound { .. } => { false }
            LendingError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LendingError::Validation { .. } => { false }
            LendingError::Serialization { .. } => { false }
            LendingError::Runtime { .. } => { false }
        }
    }
}

impl From<serde_json::Error> for LendingError {
    fn from(err: serde_json::Error) -> Self {
        LendingError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for LendingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LendingError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LendingError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LendingError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LendingError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LendingError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LendingError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

/// A specialized Result type for lending services and repositories.
pub type LendingResult<T> = Result<T, LendingError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub fn new(page: Option<&str>, page_size: usize,
               next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum ResourceStatus {
    Available,
    CheckedOut,
    Deleted,
    Unknown,
}

impl From<String> for ResourceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Available" => ResourceStatus::Available,
            "CheckedOut" => ResourceStatus::CheckedOut,
            "Deleted" => ResourceStatus::Deleted,
            _ => ResourceStatus::Unknown,
        }
    }
}

impl Display for ResourceStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ResourceStatus::Available => write!(f, "Available"),
            ResourceStatus::CheckedOut => write!(f, "CheckedOut"),
            ResourceStatus::Deleted => write!(f, "Deleted"),
            ResourceStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum LoanStatus {
    CheckedOut,
    Returned,
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Returned" => LoanStatus::Returned,
            _ => LoanStatus::CheckedOut,
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::CheckedOut => write!(f, "CheckedOut"),
            LoanStatus::Returned => write!(f, "Returned"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum RideStatus {
    Dispatched,
    Completed,
}

impl From<String> for RideStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Completed" => RideStatus::Completed,
            _ => RideStatus::Dispatched,
        }
    }
}

impl Display for RideStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RideStatus::Dispatched => write!(f, "Dispatched"),
            RideStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Regular,
    Librarian,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Admin" => Role::Admin,
            "Librarian" => Role::Librarian,
            _ => Role::Regular,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Regular => write!(f, "Regular"),
            Role::Librarian => write!(f, "Librarian"),
        }
    }
}
