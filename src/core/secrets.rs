//! Secret workflows (list, get, set, delete, example env).
//!
//! Each workflow recovers the project key, takes one snapshot of the
//! remote set and works from it. Nothing is cached between calls.

use crate::core::cipher::ProjectKey;
use crate::core::domain::SecretEntry;
use crate::core::reconcile::{self, Lookup, Plan};
use crate::core::remote::{self, Context, EnvelopeSource, Remote, SecretSource};
use crate::core::template;
use crate::core::validation::{parse_assignment, validate_environment};
use crate::error::Result;

fn snapshot<R: EnvelopeSource + SecretSource>(
    ctx: &Context,
    remote: &R,
) -> Result<(ProjectKey, Vec<SecretEntry>)> {
    let key = remote::unlock(ctx, remote)?;
    let secrets = remote.fetch(ctx, &key)?;
    Ok((key, secrets))
}

/// All secrets in the context's environment.
///
/// # Errors
///
/// Returns `CipherError::Integrity` if the project key or any field fails
/// to open.
pub fn list<R: EnvelopeSource + SecretSource>(ctx: &Context, remote: &R) -> Result<Vec<SecretEntry>> {
    let (_, secrets) = snapshot(ctx, remote)?;
    Ok(secrets)
}

/// Look up `names`, case-insensitive, in request order.
///
/// Missing names come back as `None`.
pub fn get<R, S>(names: &[S], ctx: &Context, remote: &R) -> Result<Vec<(String, Option<SecretEntry>)>>
where
    R: EnvelopeSource + SecretSource,
    S: AsRef<str>,
{
    let (_, secrets) = snapshot(ctx, remote)?;
    let found = reconcile::lookup(names, &secrets)
        .into_iter()
        .map(|hit| match hit {
            Lookup::Found(entry) => (entry.key.clone(), Some(entry.clone())),
            Lookup::Missing(name) => (name, None),
        })
        .collect();
    Ok(found)
}

/// Bring the remote set in line with `KEY=VALUE` assignments.
///
/// Every assignment is parsed and the environment checked before the project
/// key is touched.
///
/// # Errors
///
/// Returns `ValidationError` for malformed input, `CipherError` for key or
/// field failures, and `TransportError` naming the failed batch.
pub fn set<R: Remote, S: AsRef<str>>(assignments: &[S], ctx: &Context, remote: &R) -> Result<Plan> {
    validate_environment(&ctx.environment)?;
    let desired = assignments
        .iter()
        .map(|a| parse_assignment(a.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let (key, secrets) = snapshot(ctx, remote)?;
    let plan = reconcile::reconcile(&desired, &secrets, &key)?;
    remote::apply(&plan, remote, ctx)?;
    Ok(plan)
}

/// Delete the secrets named in `names`, all or nothing.
///
/// Returns the deleted keys in request order.
///
/// # Errors
///
/// Returns `SecretError::UnknownNames` listing every name not found; in
/// that case nothing is deleted.
pub fn delete<R: Remote, S: AsRef<str>>(names: &[S], ctx: &Context, remote: &R) -> Result<Vec<String>> {
    validate_environment(&ctx.environment)?;
    let (_, secrets) = snapshot(ctx, remote)?;

    let ids = reconcile::resolve_for_deletion(names, &secrets).into_ids()?;
    remote::apply_deletion(&ids, remote, ctx)?;

    Ok(names
        .iter()
        .map(|n| crate::core::domain::normalize_key(n.as_ref()))
        .collect())
}

/// Render the `.env.example` template for the context's environment.
pub fn example_env<R: EnvelopeSource + SecretSource>(ctx: &Context, remote: &R) -> Result<String> {
    let (_, secrets) = snapshot(ctx, remote)?;
    Ok(template::render(&secrets))
}
