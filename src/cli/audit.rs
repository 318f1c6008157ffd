//! Audit log CLI command

use clap::Args;

use crate::error::SpendwiseResult;
use crate::models::OwnerRef;
use crate::storage::Storage;

/// Default number of entries shown by `spendwise audit`
pub const DEFAULT_AUDIT_LIMIT: usize = 20;

/// Show recent changes to the owner's data
#[derive(Args)]
pub struct AuditArgs {
    /// Number of entries to show
    #[arg(short, long, default_value_t = DEFAULT_AUDIT_LIMIT)]
    limit: usize,
}

/// Print the owner's most recent audit entries, oldest first
pub fn handle_audit_command(
    storage: &Storage,
    owner: &OwnerRef,
    args: AuditArgs,
) -> SpendwiseResult<()> {
    let log = storage.audit();
    let entries = log.read_recent(owner, args.limit)?;

    if entries.is_empty() {
        println!("No audit entries for {} in {}", owner, log.path().display());
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry);
    }
    Ok(())
}
