// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

/// Form fields a transaction is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Kind,
    Amount,
    Note,
    Date,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Kind => "kind",
            Field::Amount => "amount",
            Field::Note => "note",
            Field::Date => "date",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Please fill in every field ({0} is empty)")]
    MissingField(Field),

    #[error("Invalid amount '{0}', expected a whole non-negative number")]
    InvalidAmount(String),

    #[error("Invalid kind '{0}', expected income or expense")]
    InvalidKind(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Stored value under '{key}' is not a transaction list")]
    CorruptState {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Deletion cancelled")]
    ConfirmationDeclined,

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),

    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// An [`Error`] the user has already been shown through the view.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Reported(#[from] pub Error);

/// Whether `e` was already put in front of the user and needs no second
/// report at exit.
pub fn already_reported(e: &anyhow::Error) -> bool {
    e.downcast_ref::<Reported>().is_some()
}
