//! Batch handlers for the four store routes.

use giztoy_simhash::{Engine, SimStore};
use tracing::{debug, info, warn};

use crate::error::{Result, RowError, ServiceError};
use crate::params::Params;
use crate::service::Reply;
use crate::stores::{CreateOutcome, StoreManager};

/// Create every store named in `name`. Existing stores are left alone.
pub(crate) fn create<E: Engine>(
    stores: &StoreManager<E::Store>,
    engine: &E,
    params: &Params,
) -> Reply {
    let lines = params
        .get_all("name")
        .iter()
        .map(|name| match stores.create(name, || engine.create_instance()) {
            CreateOutcome::Created => {
                info!(store = %name, "created store");
                format!("Created store named {name}")
            }
            CreateOutcome::AlreadyExists => {
                debug!(store = %name, "store already exists");
                format!("Store {name} already exists")
            }
        })
        .collect();
    Reply::ok(lines)
}

/// Delete every store named in `name`. Absent stores are reported deleted too.
pub(crate) fn delete<S>(stores: &StoreManager<S>, params: &Params) -> Reply {
    let lines = params
        .get_all("name")
        .iter()
        .map(|name| {
            let existed = stores.delete(name);
            info!(store = %name, existed, "deleted store");
            format!("Store {name} deleted")
        })
        .collect();
    Reply::ok(lines)
}

/// Insert the parallel `id`/`content` rows into the single store `name`.
///
/// Rows with a non-integer id are skipped and reported; the others are
/// inserted in row order.
pub(crate) fn insert<S: SimStore>(stores: &StoreManager<S>, params: &Params) -> Result<Reply> {
    let name = single_name(params)?;

    let ids = params.get_all("id");
    let contents = params.get_all("content");
    if ids.len() != contents.len() {
        return Err(ServiceError::ParameterCountMismatch {
            ids: ids.len(),
            contents: contents.len(),
        });
    }

    let store = stores
        .lookup(name)
        .ok_or_else(|| ServiceError::StoreNotFound(name.to_string()))?;

    let mut failures = Vec::new();
    for (raw, content) in ids.iter().zip(contents) {
        match raw.parse::<i64>() {
            Ok(id) => store.insert(content, id),
            Err(reason) => {
                warn!(store = %name, id = %raw, error = %reason, "id not an int");
                failures.push(RowError {
                    value: raw.clone(),
                    reason,
                });
            }
        }
    }

    let total = ids.len();
    let inserted = total - failures.len();
    info!(store = %name, inserted, total, "inserted rows");

    if !failures.is_empty() {
        return Err(ServiceError::IdentifierParse {
            store: name.to_string(),
            failures,
            inserted,
            total,
        });
    }
    Ok(Reply::ok(vec![format!(
        "Inserted {total} rows into store {name}"
    )]))
}

/// Report the representative and outlier entries of the store `name`.
pub(crate) async fn consensus<S: SimStore + 'static>(
    stores: &StoreManager<S>,
    params: &Params,
) -> Result<Reply> {
    let name = single_name(params)?;
    let store = stores
        .lookup(name)
        .ok_or_else(|| ServiceError::StoreNotFound(name.to_string()))?;

    // Scoring is quadratic in the store size; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || store.consensus())
        .await
        .map_err(|err| ServiceError::Internal(err.to_string()))?;

    let Some(c) = result else {
        return Ok(Reply::ok(vec![format!("Store {name} is empty")]));
    };
    debug!(store = %name, ?c, "consensus");

    let mut lines = vec![format!(
        "representative: {} ({} neighbors)",
        c.representative, c.representative_neighbors
    )];
    if let (Some(id), Some(n)) = (c.outlier, c.outlier_neighbors) {
        lines.push(format!("outlier: {id} ({n} neighbors)"));
    }
    lines.push(format!("entries: {}", c.entries));
    Ok(Reply::ok(lines))
}

fn single_name(params: &Params) -> Result<&str> {
    match params.get_all("name") {
        [name] => Ok(name.as_str()),
        names => Err(ServiceError::AmbiguousTarget(names.to_vec())),
    }
}
