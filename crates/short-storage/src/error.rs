use short_core::StoreError;

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

/// Maps a driver error into the store taxonomy.
///
/// Errors that mean a row could not be decoded point at bad stored data and
/// become `Corrupt`; everything else is a failure to reach or query the
/// database.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_) => StoreError::Corrupt(message),
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("timed out acquiring a connection: {message}"))
        }
        _ => StoreError::Unavailable(message),
    }
}

/// Maps an insert failure, turning duplicate keys into `AliasConflict`.
pub(crate) fn map_insert_error(alias: &str, err: sqlx::Error) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::AliasConflict(alias.to_string())
    } else {
        map_sqlx_error(err)
    }
}
