//! Secrets command - list, get, set, delete and example env.

use tracing::debug;

use crate::cli::output;
use crate::cli::SecretsAction;
use crate::core::config::Config;
use crate::core::constants::NOT_FOUND;
use crate::core::expand::substitute;
use crate::core::keystore::KeyStore;
use crate::core::remote::{Context, FileRemote};
use crate::core::secrets;
use crate::core::validation::validate_environment;
use crate::error::Result;

/// Build the command context from `.stowaway.toml` and the user identity.
fn open(env: Option<&str>) -> Result<(Context, FileRemote)> {
    let config = Config::load()?;
    let identity = KeyStore::new().load()?;

    let environment = config.environment(env);
    validate_environment(&environment)?;
    debug!(workspace = %config.workspace.id, env = %environment, "context ready");

    let ctx = Context::new(config.workspace.id.clone(), environment, identity.key_pair);
    Ok((ctx, FileRemote::open(config.store_path())))
}

/// Run a secrets subcommand; with none, list every secret.
pub fn execute(env: Option<String>, expand: bool, action: Option<SecretsAction>) -> Result<()> {
    let (ctx, remote) = open(env.as_deref())?;

    match action {
        None => {
            let mut all = secrets::list(&ctx, &remote)?;
            if all.is_empty() {
                output::dimmed(&format!("no secrets in {}", ctx.environment));
                return Ok(());
            }
            if expand {
                substitute(&mut all);
            }
            let rows: Vec<Vec<String>> = all
                .iter()
                .map(|e| vec![e.key.clone(), e.value.clone(), e.secret_type.to_string()])
                .collect();
            output::table(&["KEY", "VALUE", "TYPE"], &rows);
        }
        Some(SecretsAction::Get { names }) => {
            let rows: Vec<Vec<String>> = secrets::get(names.as_slice(), &ctx, &remote)?
                .into_iter()
                .map(|(name, entry)| match entry {
                    Some(e) => vec![e.key, e.value, e.secret_type.to_string()],
                    None => vec![name, NOT_FOUND.to_string(), String::new()],
                })
                .collect();
            output::table(&["KEY", "VALUE", "TYPE"], &rows);
        }
        Some(SecretsAction::Set { assignments }) => {
            let plan = secrets::set(assignments.as_slice(), &ctx, &remote)?;
            let rows: Vec<Vec<String>> = plan
                .operations()
                .iter()
                .map(|op| vec![op.key.clone(), op.value.clone(), op.kind.to_string()])
                .collect();
            output::table(&["KEY", "VALUE", "STATUS"], &rows);
        }
        Some(SecretsAction::Delete { names }) => {
            let deleted = secrets::delete(names.as_slice(), &ctx, &remote)?;
            output::success(&format!(
                "deleted {} from {}: {}",
                deleted.len(),
                ctx.environment,
                deleted.join(", ")
            ));
        }
        Some(SecretsAction::GenerateExampleEnv) => {
            output::raw(&secrets::example_env(&ctx, &remote)?);
        }
    }

    Ok(())
}
