//! replboot - PostgreSQL replication bootstrap CLI.

use anyhow::Result;

fn main() -> Result<()> {
    replboot_cli::run()
}
