//! Implementation of the `morio init` command.
//!
//! Gives the client its identity: a v4 UUID stored as the default value of
//! `MORIO_CLIENT_UUID`. Running it again only reports the existing UUID.

use super::services::status_report;
use crate::agents::Agent;
use crate::agents::service::ServiceManager;
use crate::context::ClientContext;
use crate::error::Result;
use crate::vars::VarStore;
use tracing::info;
use uuid::Uuid;

/// Variable holding the client identity.
pub const CLIENT_UUID_VAR: &str = "MORIO_CLIENT_UUID";

/// Outcome of making sure the client has a UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientIdentity {
    Created(String),
    Existing(String),
}

/// Generate and store a client UUID unless one is already set.
pub fn ensure_client_uuid(store: &VarStore) -> Result<ClientIdentity> {
    let current = store.get(CLIENT_UUID_VAR)?;
    if !current.is_empty() {
        return Ok(ClientIdentity::Existing(current));
    }

    let uuid = Uuid::new_v4().to_string();
    store.set_default(CLIENT_UUID_VAR, &uuid)?;
    info!(uuid = %uuid, "generated client UUID");
    Ok(ClientIdentity::Created(uuid))
}

/// Execute the `morio init` command.
pub fn cmd_init(ctx: &ClientContext, services: &dyn ServiceManager) -> Result<()> {
    let store = VarStore::from_context(ctx);

    match ensure_client_uuid(&store)? {
        ClientIdentity::Created(uuid) => {
            println!("Initializing Morio client.");
            println!("Morio client initialised with UUID {}", uuid);
        }
        ClientIdentity::Existing(uuid) => {
            println!("This Morio client is already initialised.");
            println!("Its UUID is {}", uuid);
        }
    }

    println!();
    println!("Agent status:");
    for line in status_report(services, Agent::ALL)? {
        println!("{}", line);
    }

    Ok(())
}
