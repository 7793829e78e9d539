//! Tag-driven dispatch between scalars and container proxies.
//!
//! Reading never pulls a whole subtree: the store is asked for the type
//! tag at a path, the registry routes container tags to fresh proxies, and
//! only scalar payloads are actually transferred. Writing goes the other
//! way around: containers are materialized in the store as the registry's
//! empty shells first and then filled one child at a time, so every nested
//! level exists by the time anything is written beneath it.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::DocContext;
use super::list::List;
use super::map::Map;
use super::path::Path;
use super::registry::ProxyKind;
use super::value::Value;

/// Resolves the value at `path`, or `None` when nothing is there.
///
/// Container tags produce proxies without reading any data. Scalar tags
/// read the payload and decode it; a container payload behind a scalar tag
/// is a type mismatch, never silently interpreted.
pub(crate) fn resolve(ctx: &Arc<DocContext>, path: &Path) -> crate::Result<Option<Value>> {
    let Some(tag) = ctx.store.kind_of(&ctx.name, path)? else {
        return Ok(None);
    };
    match ctx.registry.kind_of(&tag) {
        ProxyKind::Mapping => Ok(Some(Value::Map(Map::new(ctx.clone(), path.clone())))),
        ProxyKind::Sequence => Ok(Some(Value::List(List::new(ctx.clone(), path.clone())))),
        ProxyKind::Scalar => {
            let Some(json) = ctx.store.get(&ctx.name, path)? else {
                // Vanished between the tag probe and the read.
                return Ok(None);
            };
            Ok(Some(Value::from_scalar_json(&json)?))
        }
    }
}

/// Writes `value` at `path`, recursing through containers.
///
/// Objects and arrays are written as the registry's empty shells and
/// then populated child by child, replacing whatever was at the path
/// before.
pub(crate) fn write(ctx: &Arc<DocContext>, path: &Path, value: &JsonValue) -> crate::Result<()> {
    match value {
        JsonValue::Object(members) => {
            let Some(shell) = ctx.registry.shell(ProxyKind::Mapping) else {
                return Ok(ctx.store.set(&ctx.name, path, value)?);
            };
            ctx.store.set(&ctx.name, path, &shell)?;
            for (key, member) in members {
                write(ctx, &path.child_key(key), member)?;
            }
            Ok(())
        }
        JsonValue::Array(items) => {
            let Some(shell) = ctx.registry.shell(ProxyKind::Sequence) else {
                return Ok(ctx.store.set(&ctx.name, path, value)?);
            };
            ctx.store.set(&ctx.name, path, &shell)?;
            for item in items {
                append(ctx, path, item)?;
            }
            Ok(())
        }
        scalar => Ok(ctx.store.set(&ctx.name, path, scalar)?),
    }
}

/// Appends `value` to the sequence at `path` and returns the new length.
///
/// Scalars append directly. Containers append a registry shell and are
/// then filled in place at the position the append produced.
pub(crate) fn append(ctx: &Arc<DocContext>, path: &Path, value: &JsonValue) -> crate::Result<usize> {
    let kind = match value {
        JsonValue::Object(_) => ProxyKind::Mapping,
        JsonValue::Array(_) => ProxyKind::Sequence,
        scalar => return Ok(ctx.store.array_append(&ctx.name, path, scalar)?),
    };
    let Some(shell) = ctx.registry.shell(kind) else {
        return Ok(ctx.store.array_append(&ctx.name, path, value)?);
    };
    let len = ctx.store.array_append(&ctx.name, path, &shell)?;
    write(ctx, &path.child_index(len - 1), value)?;
    Ok(len)
}

/// Inserts `value` into the sequence at `path` and returns the new length.
///
/// Follows the same shell-then-fill scheme as [`append`]; the store clamps
/// a past-the-end position to an append.
pub(crate) fn insert(
    ctx: &Arc<DocContext>,
    path: &Path,
    index: usize,
    value: &JsonValue,
) -> crate::Result<usize> {
    let kind = match value {
        JsonValue::Object(_) => ProxyKind::Mapping,
        JsonValue::Array(_) => ProxyKind::Sequence,
        scalar => return Ok(ctx.store.array_insert(&ctx.name, path, index, scalar)?),
    };
    let Some(shell) = ctx.registry.shell(kind) else {
        return Ok(ctx.store.array_insert(&ctx.name, path, index, value)?);
    };
    let len = ctx.store.array_insert(&ctx.name, path, index, &shell)?;
    let slot = index.min(len - 1);
    write(ctx, &path.child_index(slot), value)?;
    Ok(len)
}
