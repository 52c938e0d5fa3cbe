//! `lutforge looks` - print the named look catalog.

use anyhow::Result;
use lutforge_analysis::TransferMethod;

/// Prints every catalog entry with its transfer method.
pub fn run() -> Result<()> {
    println!("Available looks:");
    for look in lutforge_analysis::looks() {
        let method = match look.method {
            TransferMethod::Linear => "linear",
            TransferMethod::GlobalStats => "global",
        };
        println!("  {:<14} [{}]  {}", look.name, method, look.description);
    }
    Ok(())
}
