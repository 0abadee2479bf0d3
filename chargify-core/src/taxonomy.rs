//! Classification of HTTP status codes into error kinds.

use std::fmt;

use crate::tables::TableError;

/// Failure categories a call can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never produced a response.
    Connection,
    Unauthorized,
    Forbidden,
    NotFound,
    /// The resource already exists (409).
    Duplicate,
    UnprocessableEntity,
    Server,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Connection => "connection error",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not found",
            ErrorKind::Duplicate => "duplicate",
            ErrorKind::UnprocessableEntity => "unprocessable entity",
            ErrorKind::Server => "server error",
        };
        f.write_str(s)
    }
}

/// `None` marks a status that is listed but explicitly not an error.
const CHARGIFY_STATUS_CODES: &[(u16, Option<ErrorKind>)] = &[
    (201, None),
    (401, Some(ErrorKind::Unauthorized)),
    (403, Some(ErrorKind::Forbidden)),
    (404, Some(ErrorKind::NotFound)),
    (409, Some(ErrorKind::Duplicate)),
    (422, Some(ErrorKind::UnprocessableEntity)),
    (500, Some(ErrorKind::Server)),
];

/// Static status-code table.
///
/// Codes listed in the table map to their entry. Unlisted codes in the
/// 5xx range are server errors; every other unlisted code is a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorTaxonomy {
    entries: &'static [(u16, Option<ErrorKind>)],
}

impl ErrorTaxonomy {
    /// Build a taxonomy from `entries`, rejecting codes listed twice.
    pub fn new(entries: &'static [(u16, Option<ErrorKind>)]) -> Result<Self, TableError> {
        for (i, (code, _)) in entries.iter().enumerate() {
            if entries[i + 1..].iter().any(|(other, _)| other == code) {
                return Err(TableError::DuplicateStatus(*code));
            }
        }
        Ok(Self { entries })
    }

    pub const fn chargify() -> Self {
        Self {
            entries: CHARGIFY_STATUS_CODES,
        }
    }

    /// Return the error kind for `status`, or `None` when the call succeeded.
    pub fn classify(&self, status: u16) -> Option<ErrorKind> {
        if let Some((_, kind)) = self.entries.iter().find(|(code, _)| *code == status) {
            return *kind;
        }
        (500..=599).contains(&status).then_some(ErrorKind::Server)
    }
}

impl Default for ErrorTaxonomy {
    fn default() -> Self {
        Self::chargify()
    }
}
